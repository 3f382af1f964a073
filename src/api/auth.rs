// =============================================================================
// Bearer Token Authentication — Axum extractor for the admin API
// =============================================================================
//
// Validates `Authorization: Bearer <token>` against the admin token held in
// the application state (`TWSE_BOT_ADMIN_TOKEN`). The comparison always walks
// every byte. If the token is missing or invalid the extractor short-circuits
// with 403 before the handler body runs; an unset admin token rejects every
// request.
// =============================================================================

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::app_state::AppState;

/// Compare two byte slices without early exit on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Marker extractor: present in a handler signature means the caller is an
/// authenticated admin.
pub struct AuthBearer;

/// Rejection type returned when authentication fails.
#[derive(Debug)]
pub struct AuthRejection {
    status: StatusCode,
    message: &'static str,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

/// Check an `Authorization` header value against `expected`.
fn check_bearer(header: Option<&str>, expected: &str) -> Result<(), AuthRejection> {
    if expected.is_empty() {
        warn!("TWSE_BOT_ADMIN_TOKEN is not set — all admin requests will be rejected");
        return Err(AuthRejection {
            status: StatusCode::FORBIDDEN,
            message: "Server authentication not configured",
        });
    }

    let Some(token) = header.and_then(|value| value.strip_prefix("Bearer ")) else {
        warn!("Missing or malformed Authorization header");
        return Err(AuthRejection {
            status: StatusCode::FORBIDDEN,
            message: "Missing or invalid authorization token",
        });
    };

    if !constant_time_eq(token.as_bytes(), expected.as_bytes()) {
        warn!("Invalid admin token presented");
        return Err(AuthRejection {
            status: StatusCode::FORBIDDEN,
            message: "Invalid authorization token",
        });
    }

    Ok(())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthBearer {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        check_bearer(header, &state.credentials.admin_token)?;
        Ok(AuthBearer)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_time_eq_identical() {
        assert!(constant_time_eq(b"hello", b"hello"));
    }

    #[test]
    fn constant_time_eq_different() {
        assert!(!constant_time_eq(b"hello", b"world"));
    }

    #[test]
    fn constant_time_eq_different_lengths() {
        assert!(!constant_time_eq(b"short", b"longer_string"));
    }

    #[test]
    fn bearer_accepted() {
        assert!(check_bearer(Some("Bearer s3cret"), "s3cret").is_ok());
    }

    #[test]
    fn bearer_wrong_token() {
        let err = check_bearer(Some("Bearer nope"), "s3cret").unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message, "Invalid authorization token");
    }

    #[test]
    fn bearer_missing_or_malformed() {
        assert!(check_bearer(None, "s3cret").is_err());
        assert!(check_bearer(Some("Basic s3cret"), "s3cret").is_err());
    }

    #[test]
    fn unconfigured_server_rejects() {
        let err = check_bearer(Some("Bearer "), "").unwrap_err();
        assert_eq!(err.message, "Server authentication not configured");
    }
}
