//! Storage gateway for uploaded photos.
//!
//! [`StorageGateway`] abstracts "persist a blob, return where it can be
//! fetched". Two backends exist: [`LocalStorage`] (files served by the API
//! itself under `/uploads`) and [`S3Storage`] (S3-compatible object
//! storage). [`build_gateway`] picks one from [`StorageSettings`] at startup.

mod local;
mod s3;
mod settings;

use std::sync::Arc;

use async_trait::async_trait;
use lyric_core::error::CoreError;

pub use local::{LocalStorage, UPLOADS_ROUTE};
pub use s3::S3Storage;
pub use settings::{S3Settings, StorageBackendKind, StorageSettings};

/// Where a stored blob can be retrieved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub location: String,
}

/// Errors from a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Required settings are missing; no network call was attempted.
    #[error("Storage backend is not configured: missing {}", .0.join(", "))]
    NotConfigured(Vec<&'static str>),

    /// The backend rejected or failed the write.
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotConfigured(_) => CoreError::Configuration(err.to_string()),
            StorageError::UploadFailed(_) | StorageError::Io(_) => CoreError::Upstream {
                summary: "Upload failed",
                detail: err.to_string(),
            },
        }
    }
}

/// Persist an uploaded blob and report its location.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Which backend this is (reported by the health endpoint).
    fn kind(&self) -> StorageBackendKind;

    /// Write `data` under `name`. Exactly one object is created per
    /// successful call; existing objects with the same name are overwritten.
    async fn store(
        &self,
        name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<StoredObject, StorageError>;
}

/// Construct the configured backend.
///
/// The local backend creates its directory here so the static file server
/// has something to serve from the first request on.
pub async fn build_gateway(
    settings: &StorageSettings,
) -> Result<Arc<dyn StorageGateway>, StorageError> {
    match settings.backend {
        StorageBackendKind::Local => {
            let storage = LocalStorage::init(settings.upload_dir.clone()).await?;
            Ok(Arc::new(storage))
        }
        StorageBackendKind::S3 => {
            let storage = S3Storage::new(&settings.s3);
            if let Some(missing) = storage.missing_settings() {
                tracing::warn!(
                    missing = ?missing,
                    "S3 storage selected but not fully configured; uploads will fail"
                );
            }
            Ok(Arc::new(storage))
        }
    }
}
