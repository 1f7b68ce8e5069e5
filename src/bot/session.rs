use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::bot::style::DesignStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
  #[default]
  Idle,
  GuessGame {
    target: u8,
  },
  DesignText {
    style: DesignStyle,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
  pub echo_enabled: bool,
  pub mode: Mode,
}

#[cfg(test)]
impl Session {
  pub fn design_style(&self) -> Option<DesignStyle> {
    match self.mode {
      Mode::DesignText { style } => Some(style),
      _ => None,
    }
  }

  pub fn guess_target(&self) -> Option<u8> {
    match self.mode {
      Mode::GuessGame { target } => Some(target),
      _ => None,
    }
  }
}

#[derive(Debug, Default)]
pub struct SessionStore {
  sessions: Mutex<HashMap<i64, Session>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get_or_create(&self, user_id: i64) -> Session {
    *self.lock().entry(user_id).or_default()
  }

  pub fn reset(&self, user_id: i64) {
    self.with_session(user_id, |session| session.mode = Mode::Idle);
  }

  pub fn toggle_echo(&self, user_id: i64) -> bool {
    self.with_session(user_id, |session| {
      session.echo_enabled = !session.echo_enabled;
      session.echo_enabled
    })
  }

  pub fn enter_guess_mode(&self, user_id: i64, target: u8) {
    self.with_session(user_id, |session| session.mode = Mode::GuessGame { target });
  }

  pub fn enter_design_mode(&self, user_id: i64, style: DesignStyle) {
    self.with_session(user_id, |session| session.mode = Mode::DesignText { style });
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  fn with_session<T>(&self, user_id: i64, f: impl FnOnce(&mut Session) -> T) -> T {
    let mut sessions = self.lock();
    f(sessions.entry(user_id).or_default())
  }

  // Sessions are plain data, so a panic mid-update cannot leave them torn.
  fn lock(&self) -> MutexGuard<'_, HashMap<i64, Session>> {
    self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

#[cfg(test)]
mod tests {
  use super::Mode;
  use super::SessionStore;
  use crate::bot::style::DesignStyle;

  #[test]
  fn creates_default_session_once() {
    let store = SessionStore::new();
    let session = store.get_or_create(7);
    assert!(!session.echo_enabled);
    assert_eq!(session.mode, Mode::Idle);
    assert!(session.design_style().is_none());
    assert!(session.guess_target().is_none());

    store.get_or_create(7);
    assert_eq!(store.len(), 1);
  }

  #[test]
  fn toggle_echo_is_an_involution() {
    let store = SessionStore::new();
    assert!(store.toggle_echo(1));
    assert!(!store.toggle_echo(1));
    assert!(!store.get_or_create(1).echo_enabled);
  }

  #[test]
  fn reset_clears_mode_but_keeps_echo() {
    let store = SessionStore::new();
    store.toggle_echo(3);
    store.enter_guess_mode(3, 4);
    store.reset(3);
    let session = store.get_or_create(3);
    assert_eq!(session.mode, Mode::Idle);
    assert!(session.guess_target().is_none());
    assert!(session.echo_enabled);

    store.enter_design_mode(3, DesignStyle::Italic);
    store.reset(3);
    let session = store.get_or_create(3);
    assert!(session.design_style().is_none());
    assert!(session.echo_enabled);
  }

  #[test]
  fn entering_a_mode_drops_the_other_payload() {
    let store = SessionStore::new();
    store.enter_guess_mode(9, 6);
    assert_eq!(store.get_or_create(9).guess_target(), Some(6));

    store.enter_design_mode(9, DesignStyle::Fancy);
    let session = store.get_or_create(9);
    assert_eq!(session.design_style(), Some(DesignStyle::Fancy));
    assert!(session.guess_target().is_none());
  }

  #[test]
  fn reset_auto_creates_unknown_users() {
    let store = SessionStore::new();
    store.reset(42);
    assert_eq!(store.len(), 1);
  }
}
