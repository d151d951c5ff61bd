use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` extractor whose rejections render as `{"detail"}` 400 responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
