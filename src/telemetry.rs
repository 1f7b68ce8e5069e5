use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

const DEFAULT_FILTER: &str = "info,menu_bot=debug";

pub fn init() -> Result<()> {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
  fmt()
    .with_env_filter(env_filter)
    .with_target(true)
    .try_init()
    .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}
