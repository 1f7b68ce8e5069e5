use std::ops::ControlFlow;
use std::sync::Arc;

use anyhow::Context;
use teloxide::dispatching::UpdateHandler;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::types::ChatId;
use teloxide::types::InlineKeyboardButton;
use teloxide::types::InlineKeyboardMarkup;
use teloxide::types::InputFile;
use teloxide::types::Me;
use teloxide::types::Message;
use teloxide::types::MessageId;
use teloxide::types::ParseMode;
use teloxide::types::User;
use tracing::debug;
use tracing::info;
use tracing::instrument;
use tracing::warn;
use url::Url;

use crate::bot::Command;
use crate::bot::HandlerResult;
use crate::bot::callback::CallbackAction;
use crate::bot::context::AppContext;
use crate::bot::flow;
use crate::bot::flow::Keyboard;
use crate::bot::flow::Reply;
use crate::bot::flow::Sender;
use crate::bot::flow::TextFormat;

type SharedContext = Arc<AppContext>;

pub fn build_schema() -> UpdateHandler<anyhow::Error> {
  let message_handler = Update::filter_message()
    .branch(command_branch())
    .branch(dptree::endpoint(handle_message));

  let callback_handler = Update::filter_callback_query().endpoint(handle_callback_query);

  dptree::entry().branch(message_handler).branch(callback_handler)
}

fn command_branch() -> UpdateHandler<anyhow::Error> {
  dptree::entry().filter_command::<Command>().endpoint(handle_command)
}

pub async fn dispatch_update(
  handler: &UpdateHandler<anyhow::Error>,
  bot: Bot,
  ctx: SharedContext,
  me: Me,
  update: Update,
) -> HandlerResult {
  let update_id = update.id.0;
  match handler.dispatch(dptree::deps![bot, ctx, me, update]).await {
    ControlFlow::Break(result) => result,
    ControlFlow::Continue(_) => {
      debug!(update_id, "no handler matched update");
      Ok(())
    },
  }
}

#[instrument(skip(bot, ctx, msg))]
async fn handle_command(bot: Bot, ctx: SharedContext, msg: Message, cmd: Command) -> HandlerResult {
  let user = msg.from.as_ref().context("message missing sender")?;
  info!(user_id = user.id.0, chat_id = %msg.chat.id, "received command");
  let reply = flow::on_command(&ctx, sender(user), cmd);
  deliver(&bot, msg.chat.id, None, reply).await
}

#[instrument(skip(bot, ctx, msg))]
async fn handle_message(bot: Bot, ctx: SharedContext, msg: Message) -> HandlerResult {
  let Some(user) = msg.from.as_ref() else {
    debug!(chat_id = %msg.chat.id, "ignoring message without sender");
    return Ok(());
  };
  let Some(text) = msg.text() else {
    info!(user_id = user.id.0, chat_id = %msg.chat.id, "ignoring non-text message");
    return Ok(());
  };
  let reply = flow::on_text(&ctx, sender(user), text);
  deliver(&bot, msg.chat.id, None, reply).await
}

#[instrument(skip(bot, ctx, query))]
async fn handle_callback_query(bot: Bot, ctx: SharedContext, query: CallbackQuery) -> HandlerResult {
  let data = query.data.as_deref().unwrap_or_default();
  let action = CallbackAction::parse(data);
  let user_id = query.from.id.0;
  if let Err(err) = bot.answer_callback_query(query.id.clone()).await {
    warn!(user_id, error = %err, "failed to answer callback query");
  }

  let Some(message) = query.message.as_ref() else {
    info!(user_id, callback = data, "callback query without message context");
    return Ok(());
  };
  let chat_id = message.chat().id;
  if let CallbackAction::Unrecognized(raw) = &action {
    warn!(user_id, chat_id = %chat_id, callback = raw.as_str(), "unrecognized callback data");
  } else {
    info!(user_id, chat_id = %chat_id, callback = data, "handling callback query");
  }

  let reply = flow::on_callback(&ctx, sender(&query.from), &action);
  deliver(&bot, chat_id, Some(message.id()), reply).await
}

fn sender(user: &User) -> Sender<'_> {
  Sender {
    user_id: user.id.0 as i64,
    first_name: &user.first_name,
    username: user.username.as_deref(),
  }
}

async fn deliver(bot: &Bot, chat: ChatId, origin: Option<MessageId>, reply: Reply) -> HandlerResult {
  match reply {
    Reply::Text { text, format, keyboard } => {
      let mut request = bot.send_message(chat, text);
      if format == TextFormat::Html {
        request = request.parse_mode(ParseMode::Html);
      }
      if let Some(keyboard) = keyboard {
        request = request.reply_markup(inline_keyboard(&keyboard));
      }
      request.await?;
    },
    Reply::Photo { url, caption } => send_photo_or_apologize(bot, chat, &url, caption).await?,
    Reply::Dice => {
      let sent = bot.send_dice(chat).await?;
      match sent.dice() {
        Some(dice) => {
          bot
            .send_message(chat, format!("🎲 You rolled a {}!", dice.value))
            .await?;
        },
        None => warn!(chat_id = %chat, "dice message came back without a value"),
      }
    },
    Reply::CloseMenu { text } => {
      if let Some(message_id) = origin
        && let Err(err) = bot.delete_message(chat, message_id).await
      {
        warn!(chat_id = %chat, message_id = %message_id, error = %err, "failed to delete menu message");
      }
      bot.send_message(chat, text).await?;
    },
  }
  Ok(())
}

#[instrument(skip(bot, caption))]
async fn send_photo_or_apologize(bot: &Bot, chat: ChatId, url: &str, caption: String) -> HandlerResult {
  let sent = match Url::parse(url) {
    Ok(parsed) => bot
      .send_photo(chat, InputFile::url(parsed))
      .caption(caption)
      .await
      .map(|_| ())
      .map_err(anyhow::Error::from),
    Err(err) => Err(err.into()),
  };

  match sent {
    Ok(()) => info!(chat_id = %chat, "sent random image"),
    Err(err) => {
      warn!(chat_id = %chat, error = %err, "failed to deliver random image");
      bot.send_message(chat, flow::IMAGE_FAILED_TEXT).await?;
    },
  }
  Ok(())
}

fn inline_keyboard(keyboard: &Keyboard) -> InlineKeyboardMarkup {
  InlineKeyboardMarkup::new(keyboard.iter().map(|row| {
    row
      .iter()
      .map(|button| InlineKeyboardButton::callback(button.label, button.action.data()))
      .collect::<Vec<_>>()
  }))
}
