use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    apkscout_lib::main().await
}
