use std::env;
use std::net::SocketAddr;

use thiserror::Error;

use crate::bot::Owner;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_OWNER_NAME: &str = "Bot Owner";
const DEFAULT_OWNER_USERNAME: &str = "@owner";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("BOT_TOKEN or TELOXIDE_TOKEN must be set")]
  MissingToken,
  #[error("PORT must be a valid port number, got {0:?}")]
  InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct Config {
  pub bot_token: String,
  pub owner: Owner,
  pub listen_addr: SocketAddr,
  pub webhook_url: Option<String>,
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    if let Err(err) = dotenvy::dotenv()
      && !err.not_found()
    {
      tracing::warn!(error = %err, "failed to load .env file");
    }
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let var = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

    let bot_token = var("BOT_TOKEN")
      .or_else(|| var("TELOXIDE_TOKEN"))
      .ok_or(ConfigError::MissingToken)?;

    let port = match var("PORT") {
      Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
      None => DEFAULT_PORT,
    };

    let owner = Owner {
      name: var("OWNER_NAME").unwrap_or_else(|| DEFAULT_OWNER_NAME.to_string()),
      username: var("OWNER_USERNAME")
        .map(|handle| normalize_handle(&handle))
        .unwrap_or_else(|| DEFAULT_OWNER_USERNAME.to_string()),
    };

    let webhook_url = var("WEBHOOK_URL").or_else(|| {
      var("RENDER_EXTERNAL_HOSTNAME").map(|host| format!("https://{host}/webhook/{bot_token}"))
    });

    Ok(Self {
      bot_token,
      owner,
      listen_addr: SocketAddr::from(([0, 0, 0, 0], port)),
      webhook_url,
    })
  }
}

fn normalize_handle(raw: &str) -> String {
  if raw.starts_with('@') {
    raw.to_string()
  } else {
    format!("@{raw}")
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::Config;
  use super::ConfigError;

  fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    Config::from_lookup(|key| vars.get(key).cloned())
  }

  #[test]
  fn missing_or_blank_token_is_fatal() {
    assert_eq!(load(&[]).unwrap_err(), ConfigError::MissingToken);
    assert_eq!(load(&[("BOT_TOKEN", "   ")]).unwrap_err(), ConfigError::MissingToken);
  }

  #[test]
  fn falls_back_to_teloxide_token() {
    let config = load(&[("TELOXIDE_TOKEN", "123:abc")]).unwrap();
    assert_eq!(config.bot_token, "123:abc");
  }

  #[test]
  fn applies_defaults() {
    let config = load(&[("BOT_TOKEN", "123:abc")]).unwrap();
    assert_eq!(config.listen_addr.port(), 5000);
    assert_eq!(config.owner.name, "Bot Owner");
    assert_eq!(config.owner.username, "@owner");
    assert!(config.webhook_url.is_none());
  }

  #[test]
  fn rejects_invalid_port() {
    assert_eq!(
      load(&[("BOT_TOKEN", "t"), ("PORT", "http")]).unwrap_err(),
      ConfigError::InvalidPort("http".to_string())
    );
  }

  #[test]
  fn derives_webhook_url_from_hostname() {
    let config = load(&[
      ("BOT_TOKEN", "123:abc"),
      ("RENDER_EXTERNAL_HOSTNAME", "bot.example.com"),
      ("OWNER_USERNAME", "someone"),
    ])
    .unwrap();
    assert_eq!(config.webhook_url.as_deref(), Some("https://bot.example.com/webhook/123:abc"));
    assert_eq!(config.owner.username, "@someone");
  }

  #[test]
  fn explicit_webhook_url_wins() {
    let config = load(&[
      ("BOT_TOKEN", "t"),
      ("WEBHOOK_URL", "https://hooks.example.com/webhook/t"),
      ("RENDER_EXTERNAL_HOSTNAME", "ignored.example.com"),
    ])
    .unwrap();
    assert_eq!(config.webhook_url.as_deref(), Some("https://hooks.example.com/webhook/t"));
  }
}
