use std::time::Duration;

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Utc;
use rand::RngExt as _;

pub const IMAGE_URL_BASE: &str = "https://picsum.photos/512?random=";
const TOKEN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 8;
const IST: FixedOffset = match FixedOffset::east_opt(5 * 3600 + 30 * 60) {
  Some(offset) => offset,
  None => panic!("IST offset out of range"),
};

pub fn format_uptime(elapsed: Duration) -> String {
  let total = elapsed.as_secs();
  let hours = total / 3600;
  let minutes = (total % 3600) / 60;
  let seconds = total % 60;
  format!("{hours:02}:{minutes:02}:{seconds:02}")
}

pub fn format_ist(now: DateTime<Utc>) -> String {
  now.with_timezone(&IST).format("%Y-%m-%d %H:%M:%S IST").to_string()
}

pub fn random_token() -> String {
  let mut rng = rand::rng();
  (0 .. TOKEN_LEN)
    .map(|_| TOKEN_CHARSET[rng.random_range(0 .. TOKEN_CHARSET.len())] as char)
    .collect()
}

pub fn image_url(token: &str) -> String {
  format!("{IMAGE_URL_BASE}{token}")
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use chrono::TimeZone;
  use chrono::Utc;

  use super::IMAGE_URL_BASE;
  use super::format_ist;
  use super::format_uptime;
  use super::image_url;
  use super::random_token;

  #[test]
  fn formats_uptime_without_wrapping_days() {
    assert_eq!(format_uptime(Duration::from_secs(0)), "00:00:00");
    assert_eq!(format_uptime(Duration::from_secs(3_725)), "01:02:05");
    assert_eq!(format_uptime(Duration::from_secs(100 * 3600 + 59)), "100:00:59");
  }

  #[test]
  fn shifts_clock_to_ist() {
    let now = Utc.with_ymd_and_hms(2024, 1, 31, 20, 45, 10).unwrap();
    assert_eq!(format_ist(now), "2024-02-01 02:15:10 IST");
  }

  #[test]
  fn tokens_are_short_lowercase_alphanumeric() {
    let token = random_token();
    assert_eq!(token.len(), 8);
    assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
  }

  #[test]
  fn image_url_appends_token() {
    let url = image_url("abcd1234");
    assert!(url.starts_with(IMAGE_URL_BASE));
    assert!(url.ends_with("abcd1234"));
  }
}
