mod app;
mod bot;
mod config;
mod server;
mod telemetry;
mod util;

use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
  telemetry::init()?;
  let config = config::Config::from_env()?;
  info!(
    listen_addr = %config.listen_addr,
    webhook = config.webhook_url.is_some(),
    owner = config.owner.name.as_str(),
    "starting bot"
  );

  let app = app::App::new(config);
  app.run().await
}
