use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use futures::FutureExt;
use teloxide::dispatching::UpdateHandler;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::Me;
use tracing::info;
use tracing::warn;
use url::Url;

use crate::bot;
use crate::bot::AppContext;
use crate::config::Config;
use crate::server;
use crate::server::ServerState;
use crate::server::UpdateSink;

pub struct App {
  bot: Bot,
  token: String,
  context: Arc<AppContext>,
  handler: UpdateHandler<anyhow::Error>,
  listen_addr: SocketAddr,
  webhook_url: Option<String>,
}

impl App {
  pub fn new(config: Config) -> Self {
    let bot = Bot::new(config.bot_token.clone());
    let context = Arc::new(AppContext::new(config.owner));
    let handler = bot::build_schema();
    Self {
      bot,
      token: config.bot_token,
      context,
      handler,
      listen_addr: config.listen_addr,
      webhook_url: config.webhook_url,
    }
  }

  pub async fn run(self) -> anyhow::Result<()> {
    let me = self.bot.get_me().await.context("failed to fetch bot identity")?;
    info!(username = me.username(), "bot identity resolved");

    match self.webhook_url.clone() {
      Some(url) => self.run_webhook(me, &url).await,
      None => self.run_polling(me).await,
    }
  }

  async fn run_polling(self, me: Me) -> anyhow::Result<()> {
    let listener = server::bind(self.listen_addr).await?;
    let health = tokio::spawn(server::serve(listener, ServerState::liveness(&self.token)));

    // Polling is refused while a webhook is registered.
    if let Err(err) = self.bot.delete_webhook().await {
      warn!(error = %err, "failed to clear webhook before polling");
    }
    info!("dispatching updates via long polling");

    Dispatcher::builder(self.bot.clone(), self.handler)
      .dependencies(dptree::deps![self.context.clone(), me])
      .enable_ctrlc_handler()
      .build()
      .dispatch()
      .await;

    health.await.context("http server task panicked")?
  }

  async fn run_webhook(self, me: Me, url: &str) -> anyhow::Result<()> {
    let url = Url::parse(url).context("WEBHOOK_URL is not a valid URL")?;
    let listener = server::bind(self.listen_addr).await?;

    self
      .bot
      .delete_webhook()
      .drop_pending_updates(true)
      .await
      .context("failed to delete previous webhook")?;
    self
      .bot
      .set_webhook(url.clone())
      .await
      .context("failed to register webhook")?;
    info!(host = url.host_str().unwrap_or("-"), "webhook registered");

    let sink = update_sink(self.bot, self.context, self.handler, me);
    server::serve(listener, ServerState::webhook(&self.token, sink)).await
  }
}

fn update_sink(bot: Bot, context: Arc<AppContext>, handler: UpdateHandler<anyhow::Error>, me: Me) -> UpdateSink {
  Arc::new(move |update: Update| {
    let bot = bot.clone();
    let context = context.clone();
    let handler = handler.clone();
    let me = me.clone();
    async move { bot::dispatch_update(&handler, bot, context, me, update).await }.boxed()
  })
}
