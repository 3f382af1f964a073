// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
//   POST /webhook                    LINE webhook (signature-verified)
//   GET  /api/v1/health              public
//   GET  /api/v1/analysis/:query     admin bearer token
//
// CORS is permissive so an ops dashboard can call the admin API directly.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::analysis::{self, Outcome};
use crate::api::auth::AuthBearer;
use crate::api::webhook::webhook;
use crate::app_state::{AppState, Counters};
use crate::types::Locale;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full router with tracing, CORS and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Messaging platform ──────────────────────────────────────
        .route("/webhook", post(webhook))
        // ── Public ──────────────────────────────────────────────────
        .route("/api/v1/health", get(health))
        // ── Authenticated ───────────────────────────────────────────
        .route("/api/v1/analysis/:query", get(analysis_report))
        // ── Middleware & State ───────────────────────────────────────
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Health (public)
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
    line_configured: bool,
    #[serde(flatten)]
    counters: Counters,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        server_time: chrono::Utc::now().timestamp_millis(),
        line_configured: state.line.is_configured()
            && !state.credentials.channel_secret.is_empty(),
        counters: state.counters(),
    };
    Json(resp)
}

// =============================================================================
// Analysis (authenticated)
// =============================================================================

#[derive(Debug, Deserialize)]
struct AnalysisParams {
    locale: Option<Locale>,
}

async fn analysis_report(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
    Query(params): Query<AnalysisParams>,
) -> Response {
    let locale = params.locale.unwrap_or(state.config.locale);

    match analysis::analyze(&state, &query, locale).await {
        Ok(Outcome::Report(report)) => Json(*report).into_response(),
        Ok(Outcome::UnknownSymbol) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "unknown stock name or code", "query": query })),
        )
            .into_response(),
        Ok(Outcome::InsufficientData { actual }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "insufficient price history",
                "required": crate::indicators::engine::WINDOW,
                "actual": actual,
            })),
        )
            .into_response(),
        Err(e) => {
            error!(query = %query, error = %format!("{e:#}"), "analysis request failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "market data unavailable" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BotConfig, Credentials};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let creds = Credentials {
            admin_token: "admin".to_string(),
            ..Credentials::default()
        };
        router(Arc::new(AppState::new(BotConfig::default(), creds).unwrap()))
    }

    #[tokio::test]
    async fn health_is_public() {
        let resp = app()
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["queries_served"], 0);
        assert_eq!(json["line_configured"], false);
    }

    #[tokio::test]
    async fn analysis_requires_token() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/analysis/2330")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn analysis_unknown_symbol_is_404() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/analysis/nothing-here?locale=en")
                    .header("authorization", "Bearer admin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
