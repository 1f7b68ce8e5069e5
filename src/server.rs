use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use futures::future::BoxFuture;
use teloxide::types::Update;
use tokio::net::TcpListener;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

pub const LIVENESS_BODY: &str = "Bot is running fine!";
const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

pub type UpdateSink = Arc<dyn Fn(Update) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

#[derive(Clone)]
pub struct ServerState {
  token: Arc<str>,
  sink: Option<UpdateSink>,
}

impl ServerState {
  pub fn liveness(token: &str) -> Self {
    Self {
      token: Arc::from(token),
      sink: None,
    }
  }

  pub fn webhook(token: &str, sink: UpdateSink) -> Self {
    Self {
      token: Arc::from(token),
      sink: Some(sink),
    }
  }
}

pub fn router(state: ServerState) -> Router {
  Router::new()
    .route("/", get(liveness))
    .route("/webhook/{token}", post(receive_update))
    .with_state(state)
}

pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
  let listener = TcpListener::bind(addr)
    .await
    .with_context(|| format!("failed to bind http listener on {addr}"))?;
  info!(%addr, "http server listening");
  Ok(listener)
}

pub async fn serve(listener: TcpListener, state: ServerState) -> anyhow::Result<()> {
  axum::serve(listener, router(state))
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("http server failed")
}

async fn shutdown_signal() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    error!(error = %err, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  info!("shutting down http server");
}

async fn liveness() -> &'static str {
  LIVENESS_BODY
}

async fn receive_update(State(state): State<ServerState>, Path(token): Path<String>, body: Bytes) -> StatusCode {
  let Some(sink) = state.sink.clone() else {
    return StatusCode::NOT_FOUND;
  };
  if token != *state.token {
    warn!("webhook called with unexpected token");
    return StatusCode::NOT_FOUND;
  }

  let update: Update = match serde_json::from_slice(&body) {
    Ok(update) => update,
    Err(err) => {
      warn!(error = %err, bytes = body.len(), "discarding malformed webhook payload");
      return StatusCode::OK;
    },
  };

  let update_id = update.id.0;
  let mut task = tokio::spawn(sink(update));
  match tokio::time::timeout(DISPATCH_TIMEOUT, &mut task).await {
    Ok(Ok(Ok(()))) => debug!(update_id, "webhook update handled"),
    Ok(Ok(Err(err))) => warn!(update_id, error = %err, "webhook update handler failed"),
    Ok(Err(err)) => error!(update_id, error = %err, "webhook update task aborted"),
    Err(_) => {
      task.abort();
      warn!(update_id, timeout_secs = DISPATCH_TIMEOUT.as_secs(), "webhook update timed out");
    },
  }
  StatusCode::OK
}
