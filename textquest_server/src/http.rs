//! HTTP front end.
//!
//! `POST /plain` and `POST /sms` take Twilio-style form posts and run one turn for the
//! sender; `/plain` answers with plain text, `/sms` with TwiML. `GET /metrics` reports
//! session counts. A background task sweeps idle sessions.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use log::{debug, error, info};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::task::{self, JoinHandle};

use crate::app::App;
use crate::twilio::{SmsReceived, simple_twiml};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/plain", post(plain))
        .route("/sms", post(sms))
        .route("/metrics", get(metrics))
}

/// Serve until the listener fails, sweeping idle sessions in the background.
///
/// # Errors
/// - if the address cannot be bound or the server stops with an error
pub async fn serve(app: Arc<App>, addr: &str) -> Result<()> {
    let sweeper = spawn_sweeper(Arc::clone(&app), app.config.session.sweep_interval());
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("while binding {addr}"))?;
    info!("listening on {addr}");
    let result = axum::serve(listener, routes().with_state(app))
        .await
        .context("http server stopped");
    sweeper.abort();
    result
}

/// Periodically drop sessions that are expired or already stopped.
pub fn spawn_sweeper(app: Arc<App>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // the first tick fires immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let app = Arc::clone(&app);
            if let Err(err) = task::spawn_blocking(move || app.store.sweep_expired()).await {
                error!("session sweep failed: {err}");
            }
        }
    })
}

#[derive(Debug)]
pub enum ApiError {
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Internal(msg) => {
                error!("request failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            },
        }
    }
}

/// Run one turn on the blocking pool. `None` if the form lacked a sender or body.
async fn take_turn(app: Arc<App>, message: &SmsReceived) -> Result<Option<String>, ApiError> {
    let Some((from, body)) = message.sender_and_body() else {
        debug!("ignoring post without From and Body");
        return Ok(None);
    };
    debug!("message from {from} ({}): {body:?}", message.from_city);
    let (from, body) = (from.to_string(), body.to_string());
    let reply = task::spawn_blocking(move || app.play_turn(&from, &body))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Some(reply))
}

async fn plain(State(app): State<Arc<App>>, Form(message): Form<SmsReceived>) -> Result<String, ApiError> {
    Ok(take_turn(app, &message).await?.unwrap_or_default())
}

async fn sms(State(app): State<Arc<App>>, Form(message): Form<SmsReceived>) -> Result<Response, ApiError> {
    let Some(reply) = take_turn(app, &message).await? else {
        return Ok(String::new().into_response());
    };
    Ok(([(header::CONTENT_TYPE, "text/xml; charset=utf-8")], simple_twiml(&reply)).into_response())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Metrics {
    pub active_games: usize,
    pub total_games: u64,
    pub uptime_seconds: u64,
}

async fn metrics(State(app): State<Arc<App>>) -> Json<Metrics> {
    Json(Metrics {
        active_games: app.store.active_count(),
        total_games: app.store.total_started(),
        uptime_seconds: app.store.uptime().as_secs(),
    })
}
