#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = codecraft::run().await {
        eprintln!("codecraft: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
