use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    superglue_cli::main_entry().await
}
