use crate::bot::style::DesignStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
  Greet,
  GameDice,
  GameGuess,
  ToggleEcho,
  Design(DesignStyle),
  ImageGen,
  BotStatus,
  Owner,
  About,
  Help,
  Links,
  Profile,
  Time,
  Joke,
  Quote,
  Close,
  Unrecognized(String),
}

impl CallbackAction {
  pub fn parse(data: &str) -> Self {
    match data {
      "greet" => Self::Greet,
      "game_dice" => Self::GameDice,
      "game_guess" => Self::GameGuess,
      "toggle_echo" => Self::ToggleEcho,
      "image_gen" => Self::ImageGen,
      "bot_status" => Self::BotStatus,
      "owner" => Self::Owner,
      "about" => Self::About,
      "help" => Self::Help,
      "links" => Self::Links,
      "profile" => Self::Profile,
      "time" => Self::Time,
      "joke" => Self::Joke,
      "quote" => Self::Quote,
      "close" => Self::Close,
      other => other
        .strip_prefix("design_")
        .and_then(DesignStyle::parse)
        .map(Self::Design)
        .unwrap_or_else(|| Self::Unrecognized(other.to_string())),
    }
  }

  pub fn data(&self) -> String {
    match self {
      Self::Greet => "greet".to_string(),
      Self::GameDice => "game_dice".to_string(),
      Self::GameGuess => "game_guess".to_string(),
      Self::ToggleEcho => "toggle_echo".to_string(),
      Self::Design(style) => format!("design_{}", style.as_str()),
      Self::ImageGen => "image_gen".to_string(),
      Self::BotStatus => "bot_status".to_string(),
      Self::Owner => "owner".to_string(),
      Self::About => "about".to_string(),
      Self::Help => "help".to_string(),
      Self::Links => "links".to_string(),
      Self::Profile => "profile".to_string(),
      Self::Time => "time".to_string(),
      Self::Joke => "joke".to_string(),
      Self::Quote => "quote".to_string(),
      Self::Close => "close".to_string(),
      Self::Unrecognized(raw) => raw.clone(),
    }
  }
}
