use chrono::Utc;
use rand::RngExt as _;
use rand::seq::IndexedRandom as _;
use teloxide::utils::command::BotCommands;
use teloxide::utils::html;
use tracing::info;

use crate::bot::callback::CallbackAction;
use crate::bot::commands::Command;
use crate::bot::context::AppContext;
use crate::bot::session::Mode;
use crate::bot::style::DesignStyle;
use crate::util;

pub const MENU_TEXT: &str = "🤖 Welcome! Choose an option 👇";
pub const IMAGE_CAPTION: &str = "🖼️ Here is your random image!";
pub const IMAGE_FAILED_TEXT: &str = "😔 Sorry, I could not fetch an image right now. Please try again later.";
const ABOUT_TEXT: &str = "🤖 <b>About</b>\nA small demo bot with a guessing game, dice, echo mode and text styling.";
const HELP_TEXT: &str = "ℹ️ <b>Help</b>\n\
  • 🎯 Guess: I pick a number from 1 to 10 and you try to find it.\n\
  • 🎲 Dice: roll a die.\n\
  • 🔁 Echo: I repeat every message you send.\n\
  • ✍️ Design: send some text and get it back styled.\n\n\
  Use /cancel to leave a game and /menu to bring the buttons back.";
const LINKS_TEXT: &str = "🔗 <b>Links</b>\n\
  • Telegram Bot API: https://core.telegram.org/bots/api\n\
  • teloxide: https://github.com/teloxide/teloxide";
const GUESS_PROMPT: &str = "🎯 I picked a number between 1 and 10. Send your guess!";
const GUESS_NOT_A_NUMBER: &str = "🔢 Please send a number 1–10.";
const FALLBACK_TEXT: &str = "🤔 I did not understand that. Choose an option below 👇";
const CANCEL_TEXT: &str = "❌ Cancelled. Send /menu to pick something else.";
const CLOSE_TEXT: &str = "👋 Menu closed. Send /menu to open it again.";
const UNKNOWN_OPTION_TEXT: &str = "⚠️ Unknown option!";

pub const JOKES: [&str; 3] = [
  "😂 Why did the computer go to the doctor? Because it caught a virus!",
  "🤣 I asked my laptop for a joke… it said '404 Joke Not Found!'",
  "😜 Why was the math book sad? Because it had too many problems.",
];

pub const QUOTES: [&str; 3] = [
  "🌟 Believe in yourself!",
  "🚀 Dreams don’t work unless you do.",
  "🔥 Stay positive, work hard, make it happen.",
];

#[derive(Debug, Clone, Copy)]
pub struct Sender<'a> {
  pub user_id: i64,
  pub first_name: &'a str,
  pub username: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
  pub label: &'static str,
  pub action: CallbackAction,
}

pub type Keyboard = Vec<Vec<MenuButton>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
  Plain,
  Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
  Text {
    text: String,
    format: TextFormat,
    keyboard: Option<Keyboard>,
  },
  Photo {
    url: String,
    caption: String,
  },
  Dice,
  CloseMenu {
    text: String,
  },
}

impl Reply {
  fn plain(text: impl Into<String>) -> Self {
    Self::Text {
      text: text.into(),
      format: TextFormat::Plain,
      keyboard: None,
    }
  }

  fn html(text: impl Into<String>) -> Self {
    Self::Text {
      text: text.into(),
      format: TextFormat::Html,
      keyboard: None,
    }
  }

  fn menu(text: impl Into<String>) -> Self {
    Self::Text {
      text: text.into(),
      format: TextFormat::Plain,
      keyboard: Some(main_menu()),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessFeedback {
  Correct,
  Bigger,
  Smaller,
}

pub fn judge_guess(guess: i64, target: u8) -> GuessFeedback {
  let target = i64::from(target);
  if guess == target {
    GuessFeedback::Correct
  } else if guess < target {
    GuessFeedback::Bigger
  } else {
    GuessFeedback::Smaller
  }
}

pub fn main_menu() -> Keyboard {
  fn button(label: &'static str, action: CallbackAction) -> MenuButton {
    MenuButton { label, action }
  }
  fn design(style: DesignStyle) -> MenuButton {
    button(style.label(), CallbackAction::Design(style))
  }

  vec![
    vec![
      button("👋 Greet", CallbackAction::Greet),
      button("👤 Owner", CallbackAction::Owner),
    ],
    vec![
      button("🎯 Guess number", CallbackAction::GameGuess),
      button("🎲 Roll dice", CallbackAction::GameDice),
    ],
    vec![
      button("🔁 Toggle echo", CallbackAction::ToggleEcho),
      button("🖼️ Random image", CallbackAction::ImageGen),
    ],
    vec![design(DesignStyle::Bold), design(DesignStyle::Italic)],
    vec![design(DesignStyle::Mono), design(DesignStyle::Fancy)],
    vec![
      button("📊 Bot status", CallbackAction::BotStatus),
      button("📌 About", CallbackAction::About),
    ],
    vec![
      button("🪪 My profile", CallbackAction::Profile),
      button("⏰ Time & date", CallbackAction::Time),
    ],
    vec![
      button("😂 Random joke", CallbackAction::Joke),
      button("💡 Quote", CallbackAction::Quote),
    ],
    vec![
      button("ℹ️ Help", CallbackAction::Help),
      button("🔗 Links", CallbackAction::Links),
    ],
    vec![button("❌ Close", CallbackAction::Close)],
  ]
}

pub fn on_command(ctx: &AppContext, sender: Sender<'_>, command: Command) -> Reply {
  let sessions = ctx.sessions();
  match command {
    Command::Start | Command::Menu => {
      sessions.reset(sender.user_id);
      Reply::menu(MENU_TEXT)
    },
    Command::Cancel => {
      sessions.reset(sender.user_id);
      Reply::plain(CANCEL_TEXT)
    },
    Command::Help => {
      sessions.get_or_create(sender.user_id);
      let mut text = Command::descriptions().to_string();
      text.push_str("\n\nEverything else lives behind the menu buttons. Use /menu to open it.");
      Reply::plain(text)
    },
  }
}

pub fn on_callback(ctx: &AppContext, sender: Sender<'_>, action: &CallbackAction) -> Reply {
  let sessions = ctx.sessions();
  sessions.get_or_create(sender.user_id);
  match action {
    CallbackAction::Greet => Reply::html(format!(
      "👋 Hello, <b>{}</b>! Nice to see you.",
      html::escape(sender.first_name)
    )),
    CallbackAction::GameDice => Reply::Dice,
    CallbackAction::GameGuess => {
      let target = rand::rng().random_range(1 ..= 10u8);
      sessions.enter_guess_mode(sender.user_id, target);
      info!(user_id = sender.user_id, "started guessing game");
      Reply::plain(GUESS_PROMPT)
    },
    CallbackAction::ToggleEcho => {
      let enabled = sessions.toggle_echo(sender.user_id);
      info!(user_id = sender.user_id, enabled, "toggled echo");
      Reply::plain(if enabled {
        "🔁 Echo is now ON."
      } else {
        "🔁 Echo is now OFF."
      })
    },
    CallbackAction::Design(style) => {
      sessions.enter_design_mode(sender.user_id, *style);
      Reply::plain(format!("✍️ Send the text you want in {} style.", style.as_str()))
    },
    CallbackAction::ImageGen => Reply::Photo {
      url: util::image_url(&util::random_token()),
      caption: IMAGE_CAPTION.to_string(),
    },
    CallbackAction::BotStatus => Reply::html(format!(
      "📊 <b>Bot status</b>\nUptime: <code>{}</code>\nTime: {}\nActive sessions: {}",
      util::format_uptime(ctx.uptime()),
      util::format_ist(Utc::now()),
      sessions.len()
    )),
    CallbackAction::Owner => {
      let owner = ctx.owner();
      Reply::html(format!(
        "👤 <b>Owner</b>\nName: {}\nContact: {}",
        html::escape(&owner.name),
        html::escape(&owner.username)
      ))
    },
    CallbackAction::About => Reply::html(ABOUT_TEXT),
    CallbackAction::Help => Reply::html(HELP_TEXT),
    CallbackAction::Links => Reply::html(LINKS_TEXT),
    CallbackAction::Profile => Reply::html(format!(
      "🪪 <b>Profile</b>\nName: {}\nUsername: {}\nID: <code>{}</code>",
      html::escape(sender.first_name),
      sender
        .username
        .map(|username| format!("@{}", html::escape(username)))
        .unwrap_or_else(|| "-".to_string()),
      sender.user_id
    )),
    CallbackAction::Time => Reply::plain(format!("⏰ Current time: {}", util::format_ist(Utc::now()))),
    CallbackAction::Joke => Reply::plain(pick(&JOKES)),
    CallbackAction::Quote => Reply::plain(pick(&QUOTES)),
    CallbackAction::Close => Reply::CloseMenu {
      text: CLOSE_TEXT.to_string(),
    },
    CallbackAction::Unrecognized(_) => Reply::plain(UNKNOWN_OPTION_TEXT),
  }
}

fn pick(options: &[&'static str]) -> &'static str {
  options.choose(&mut rand::rng()).copied().unwrap_or_default()
}

pub fn on_text(ctx: &AppContext, sender: Sender<'_>, text: &str) -> Reply {
  let sessions = ctx.sessions();
  let session = sessions.get_or_create(sender.user_id);
  match session.mode {
    Mode::GuessGame { target } => {
      let Ok(guess) = text.trim().parse::<i64>() else {
        return Reply::plain(GUESS_NOT_A_NUMBER);
      };
      match judge_guess(guess, target) {
        GuessFeedback::Correct => {
          sessions.reset(sender.user_id);
          info!(user_id = sender.user_id, target, "guessing game won");
          Reply::plain(format!("🎉 Correct! The number was {target}."))
        },
        GuessFeedback::Bigger => Reply::plain("⬆️ Bigger! Try again."),
        GuessFeedback::Smaller => Reply::plain("⬇️ Smaller! Try again."),
      }
    },
    Mode::DesignText { style } => {
      sessions.reset(sender.user_id);
      Reply::html(style.apply(text))
    },
    Mode::Idle if session.echo_enabled => Reply::plain(text),
    Mode::Idle => Reply::menu(FALLBACK_TEXT),
  }
}
