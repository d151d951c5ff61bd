//! Upload acceptance rules and stored-name generation.

use image::ImageFormat;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Largest accepted upload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Content types accepted for photo uploads.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// `strftime` pattern prefixed to stored file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Used when the client sends no usable file name.
const FALLBACK_NAME: &str = "upload";

/// Decide the content type of an upload.
///
/// The declared type wins when present; a missing or generic
/// `application/octet-stream` declaration is replaced by the type sniffed from
/// the file's magic bytes. The result must be on the allow-list.
pub fn resolve_content_type(declared: Option<&str>, data: &[u8]) -> Result<String, CoreError> {
    let declared = declared
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

    let content_type = match declared {
        Some(ct) => ct,
        None => sniff_content_type(data)
            .ok_or_else(|| CoreError::Validation("Could not determine file type".into()))?
            .to_string(),
    };

    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported file type '{content_type}'. Allowed: {}",
            ALLOWED_CONTENT_TYPES.join(", ")
        )));
    }
    Ok(content_type)
}

/// Reject empty and oversized uploads.
pub fn validate_size(len: usize) -> Result<(), CoreError> {
    if len == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if len > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "File too large: {len} bytes (maximum {MAX_UPLOAD_BYTES} bytes)"
        )));
    }
    Ok(())
}

/// Stored name for an upload: `{YYYYMMDD_HHMMSS}_{original_name}`.
pub fn timestamped_filename(now: Timestamp, original_name: &str) -> String {
    format!(
        "{}_{}",
        now.format(TIMESTAMP_FORMAT),
        sanitize_original_name(original_name)
    )
}

/// Keep only the final path component of a client-supplied name.
pub fn sanitize_original_name(name: &str) -> String {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base.chars().all(|c| c == '.') {
        FALLBACK_NAME.to_string()
    } else {
        base.to_string()
    }
}

fn sniff_content_type(data: &[u8]) -> Option<&'static str> {
    match image::guess_format(data).ok()? {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Gif => Some("image/gif"),
        _ => None,
    }
}
