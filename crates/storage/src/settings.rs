use std::path::PathBuf;

use lyric_core::config::{non_empty, ConfigError};

/// Default directory for locally stored uploads.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Default S3 region when `AWS_REGION` is unset.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Which storage backend serves uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendKind {
    Local,
    S3,
}

impl StorageBackendKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "local" => Some(Self::Local),
            "s3" => Some(Self::S3),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
        }
    }
}

/// Credentials and location of the S3 bucket.
///
/// All three of access key, secret key and bucket must be present for the
/// backend to accept uploads; they are kept optional here so a partially
/// configured deployment still starts and reports the problem per request.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub bucket: Option<String>,
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint_url: Option<String>,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            bucket: None,
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }
}

/// Storage configuration.
///
/// | Env Var                 | Default     |
/// |-------------------------|-------------|
/// | `STORAGE_BACKEND`       | `local`     |
/// | `UPLOAD_DIR`            | `uploads`   |
/// | `AWS_ACCESS_KEY_ID`     | unset       |
/// | `AWS_SECRET_ACCESS_KEY` | unset       |
/// | `S3_BUCKET_NAME`        | unset       |
/// | `AWS_REGION`            | `us-east-1` |
/// | `S3_ENDPOINT_URL`       | unset       |
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackendKind,
    pub upload_dir: PathBuf,
    pub s3: S3Settings,
}

impl StorageSettings {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match non_empty(lookup, "STORAGE_BACKEND") {
            None => StorageBackendKind::Local,
            Some(value) => {
                StorageBackendKind::from_name(&value).ok_or_else(|| ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value,
                    reason: "expected 'local' or 's3'".into(),
                })?
            }
        };

        let upload_dir = non_empty(lookup, "UPLOAD_DIR")
            .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.into())
            .into();

        let s3 = S3Settings {
            access_key_id: non_empty(lookup, "AWS_ACCESS_KEY_ID"),
            secret_access_key: non_empty(lookup, "AWS_SECRET_ACCESS_KEY"),
            bucket: non_empty(lookup, "S3_BUCKET_NAME"),
            region: non_empty(lookup, "AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.into()),
            endpoint_url: non_empty(lookup, "S3_ENDPOINT_URL"),
        };

        Ok(Self {
            backend,
            upload_dir,
            s3,
        })
    }
}
