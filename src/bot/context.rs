use std::time::Duration;
use std::time::Instant;

use crate::bot::session::SessionStore;

#[derive(Debug, Clone)]
pub struct Owner {
  pub name: String,
  pub username: String,
}

pub struct AppContext {
  sessions: SessionStore,
  owner: Owner,
  started_at: Instant,
}

impl AppContext {
  pub fn new(owner: Owner) -> Self {
    Self {
      sessions: SessionStore::new(),
      owner,
      started_at: Instant::now(),
    }
  }

  pub fn sessions(&self) -> &SessionStore {
    &self.sessions
  }

  pub fn owner(&self) -> &Owner {
    &self.owner
  }

  pub fn uptime(&self) -> Duration {
    self.started_at.elapsed()
  }
}
