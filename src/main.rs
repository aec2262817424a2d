use anyhow::Result;
use sensei::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
