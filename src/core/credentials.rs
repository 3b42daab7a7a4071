use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::core::config::Settings;

/// Persistence seam for the bearer token. The token is read at request time,
/// written at login and cleared at logout.
pub(crate) trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Token persisted to a plain file so it survives across invocations.
#[derive(Debug)]
pub(crate) struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).context("Failed to read token file"),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create token directory")?;
        }
        fs::write(&self.path, token).context("Failed to write token file")
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("Failed to remove token file"),
        }
    }
}

/// In-memory store for tests and embedding.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().expect("token lock").clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().expect("token lock") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().expect("token lock") = None;
        Ok(())
    }
}

/// Explicit auth context injected into the HTTP client instead of a
/// module-level singleton.
#[derive(Clone)]
pub(crate) struct AuthContext {
    store: Arc<dyn TokenStore>,
}

impl AuthContext {
    pub(crate) fn from_settings(settings: &Settings) -> Self {
        Self { store: Arc::new(FileTokenStore::new(settings.auth().token_path.clone())) }
    }

    #[cfg(test)]
    pub(crate) fn in_memory() -> Self {
        Self { store: Arc::new(MemoryTokenStore::default()) }
    }

    pub(crate) fn token(&self) -> Result<Option<String>> {
        self.store.load()
    }

    pub(crate) fn store_token(&self, token: &str) -> Result<()> {
        self.store.save(token)
    }

    pub(crate) fn clear_token(&self) -> Result<()> {
        self.store.clear()
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        matches!(self.store.load(), Ok(Some(_)))
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext").finish_non_exhaustive()
    }
}
