//! Photo upload.

use axum::extract::multipart::{Field, Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use lyric_core::error::CoreError;
use lyric_core::upload::{
    resolve_content_type, timestamped_filename, validate_size, MAX_UPLOAD_BYTES,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::ApiKey;
use crate::state::AppState;

/// Multipart field carrying the photo.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Stored name, `{YYYYMMDD_HHMMSS}_{original_name}`.
    pub filename: String,
    /// Where the stored object can be fetched.
    pub location: String,
}

/// POST /upload-photo
///
/// Reads the `file` field, enforces the size cap while streaming, checks the
/// content type and hands the bytes to the configured storage backend.
/// Nothing is stored when any check fails.
pub async fn upload_photo(
    _key: ApiKey,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let declared_type = field.content_type().map(str::to_owned);
        let data = read_capped(field).await?;

        validate_size(data.len())?;
        let content_type = resolve_content_type(declared_type.as_deref(), &data)?;
        let filename = timestamped_filename(chrono::Utc::now(), &original_name);

        let size = data.len();
        let stored = state
            .storage
            .store(&filename, &content_type, data)
            .await
            .map_err(CoreError::from)?;

        tracing::info!(
            filename = %filename,
            content_type = %content_type,
            size,
            backend = state.storage.kind().name(),
            "Photo uploaded",
        );

        return Ok(Json(UploadResponse {
            filename,
            location: stored.location,
        }));
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

/// Collect a field's bytes, failing as soon as the size cap is exceeded.
async fn read_capped(mut field: Field<'_>) -> AppResult<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        let len = data.len() + chunk.len();
        if len > MAX_UPLOAD_BYTES {
            validate_size(len)?;
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}
