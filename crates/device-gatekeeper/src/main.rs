use anyhow::Result;
use device_gatekeeper::app;

#[tokio::main]
async fn main() -> Result<()> {
  app::run().await
}
