use anyhow::Result;

use crate::cli::render;
use crate::schemas::{UserCreate, UserLogin};
use crate::services::AuthService;

pub(crate) async fn register(
    auth: &AuthService,
    username: String,
    email: String,
    password: String,
    full_name: Option<String>,
) -> Result<()> {
    let user = auth.register(UserCreate { username, email, password, full_name }).await?;
    println!("Registered {}. Log in with `codecraft login`.", user.username);
    Ok(())
}

pub(crate) async fn login(auth: &AuthService, username: String, password: String) -> Result<()> {
    auth.login(UserLogin { username: username.clone(), password }).await?;
    println!("Logged in as {username}.");
    Ok(())
}

pub(crate) fn logout(auth: &AuthService) -> Result<()> {
    auth.logout()?;
    println!("Logged out.");
    Ok(())
}

pub(crate) async fn whoami(auth: &AuthService) -> Result<()> {
    let user = auth.current_user().await?;
    print!("{}", render::render_user(&user));
    Ok(())
}
