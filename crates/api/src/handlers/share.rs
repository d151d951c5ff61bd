use axum::extract::State;
use axum::Json;
use lyric_core::share::{poem_page_url, SharePlatform, SHARE_TEXT};
use lyric_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub poem_id: DbId,
    pub platform: SharePlatform,
    /// Public URL of the source image, used as the shared link when absolute.
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub message: &'static str,
    pub platform: &'static str,
    pub share_url: String,
}

/// POST /share-on-sns
///
/// Only builds the platform's share link; nothing is posted.
pub async fn share_on_sns(
    State(state): State<AppState>,
    AppJson(input): AppJson<ShareRequest>,
) -> AppResult<Json<ShareResponse>> {
    let link = match input.image_url.as_deref().map(str::trim) {
        Some(url) if url.starts_with("https://") || url.starts_with("http://") => url.to_string(),
        _ => poem_page_url(&state.config.frontend_url, input.poem_id),
    };

    let share_url = input.platform.share_url(SHARE_TEXT, &link)?;
    tracing::info!(poem_id = input.poem_id, platform = input.platform.name(), "Share link built");

    Ok(Json(ShareResponse {
        message: "Share link created",
        platform: input.platform.name(),
        share_url,
    }))
}
