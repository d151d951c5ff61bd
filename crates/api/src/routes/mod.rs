pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use lyric_core::upload::MAX_UPLOAD_BYTES;

use crate::handlers;
use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                      welcome payload (GET)
/// /upload-photo          multipart photo upload (POST, X-API-Key when configured)
/// /submit-character      register character attributes (POST)
/// /generate-poem         generate a poem from an image or a character (POST)
/// /customize-poem        replace a poem's content (PUT)
/// /rate-poem             rate a poem good or bad (POST)
/// /share-on-sns          build a share link for a social network (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root::welcome))
        .route(
            "/upload-photo",
            post(handlers::upload::upload_photo)
                // Leaves room for the multipart framing; the file itself is
                // capped while streaming.
                .layer(DefaultBodyLimit::max(2 * MAX_UPLOAD_BYTES)),
        )
        .route(
            "/submit-character",
            post(handlers::character::submit_character),
        )
        .route("/generate-poem", post(handlers::poem::generate_poem))
        .route("/customize-poem", put(handlers::poem::customize_poem))
        .route("/rate-poem", post(handlers::poem::rate_poem))
        .route("/share-on-sns", post(handlers::share::share_on_sns))
}
