//! Shared-secret extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lyric_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Guard for endpoints that require the `X-API-Key` header.
///
/// When no `API_KEY` is configured every request passes. Otherwise the
/// header must match exactly.
///
/// ```ignore
/// async fn upload(_key: ApiKey, multipart: Multipart) -> AppResult<Json<()>> { .. }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.api_key.as_deref() else {
            return Ok(ApiKey);
        };

        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        match provided {
            Some(key) if keys_match(key, expected) => Ok(ApiKey),
            Some(_) => {
                tracing::warn!("Rejected request with wrong API key");
                Err(AppError::Core(CoreError::Unauthorized(
                    "Invalid API key".into(),
                )))
            }
            None => Err(AppError::Core(CoreError::Unauthorized(
                "Missing X-API-Key header".into(),
            ))),
        }
    }
}

/// Compare two keys in time independent of where they first differ.
fn keys_match(provided: &str, expected: &str) -> bool {
    let (a, b) = (provided.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
