// =============================================================================
// LINE Webhook Endpoint
// =============================================================================
//
// POST /webhook
//
// 1. Verify `X-Line-Signature` over the raw body (401 on failure).
// 2. Parse the payload (400 on malformed JSON).
// 3. Spawn one tracked task per text-message event and acknowledge with 200
//    right away; each task runs the analysis pipeline and sends exactly one
//    reply. Shutdown drains these tasks before the process exits.
// =============================================================================

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::{self, Outcome};
use crate::app_state::AppState;
use crate::line::messages::{
    fetch_failed_text, flex_report, insufficient_data_text, text_message, usage_text,
};
use crate::line::{signature, WebhookPayload, SIGNATURE_HEADER};
use crate::types::Locale;

fn reject(status: StatusCode, message: &'static str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if state.credentials.channel_secret.is_empty() {
        warn!("LINE_CHANNEL_SECRET is not set — rejecting webhook delivery");
        return reject(StatusCode::UNAUTHORIZED, "Webhook verification not configured");
    }

    let Some(sig) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        warn!("webhook delivery without signature header");
        return reject(StatusCode::UNAUTHORIZED, "Missing signature");
    };

    if !signature::verify(&state.credentials.channel_secret, &body, sig) {
        warn!("webhook signature mismatch");
        return reject(StatusCode::UNAUTHORIZED, "Invalid signature");
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "malformed webhook payload");
            return reject(StatusCode::BAD_REQUEST, "Malformed payload");
        }
    };

    let delivery_id = Uuid::new_v4();
    let locale = state.config.locale;
    let mut spawned = 0usize;

    for event in &payload.events {
        let Some((reply_token, text)) = event.text_query() else {
            continue;
        };
        let span = info_span!("chat_query", delivery = %delivery_id, query = %text.trim());
        let task_state = state.clone();
        let reply_token = reply_token.to_string();
        let text = text.to_string();
        state
            .spawn_reply(
                async move { answer(&task_state, &reply_token, &text, locale).await }
                    .instrument(span),
            )
            .await;
        spawned += 1;
    }

    info!(
        delivery = %delivery_id,
        destination = payload.destination.as_deref().unwrap_or("-"),
        events = payload.events.len(),
        queries = spawned,
        "webhook delivery accepted"
    );
    StatusCode::OK.into_response()
}

/// Run one chat query and send its reply.
async fn answer(state: &AppState, reply_token: &str, text: &str, locale: Locale) {
    let outcome = analysis::analyze(state, text, locale).await;
    if let Err(e) = &outcome {
        error!(error = %format!("{e:#}"), "market data fetch failed");
    }

    let message = reply_for(&outcome, locale);
    if let Err(e) = state.line.reply(reply_token, &[message]).await {
        error!(error = %format!("{e:#}"), "failed to deliver reply");
    }
}

/// Choose the reply message for a pipeline result.
pub fn reply_for(outcome: &anyhow::Result<Outcome>, locale: Locale) -> Value {
    match outcome {
        Ok(Outcome::Report(report)) => flex_report(report),
        Ok(Outcome::UnknownSymbol) => text_message(usage_text(locale)),
        Ok(Outcome::InsufficientData { .. }) => text_message(insufficient_data_text(locale)),
        Err(_) => text_message(fetch_failed_text(locale)),
    }
}
