use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::{S3Settings, StorageBackendKind, StorageError, StorageGateway, StoredObject};

/// Key prefix for uploaded photos inside the bucket.
const KEY_PREFIX: &str = "uploads";

/// Stores uploads in an S3-compatible bucket.
pub struct S3Storage {
    target: Result<S3Target, Vec<&'static str>>,
    region: String,
    endpoint_url: Option<String>,
}

struct S3Target {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Storage {
    /// Build the backend from settings.
    ///
    /// No network traffic happens here. If the access key, secret key or
    /// bucket is missing, every [`store`](StorageGateway::store) call fails
    /// with [`StorageError::NotConfigured`].
    pub fn new(settings: &S3Settings) -> Self {
        let target = match (
            &settings.access_key_id,
            &settings.secret_access_key,
            &settings.bucket,
        ) {
            (Some(access_key), Some(secret_key), Some(bucket)) => Ok(S3Target {
                client: build_client(settings, access_key, secret_key),
                bucket: bucket.clone(),
            }),
            _ => {
                let mut missing = Vec::new();
                if settings.access_key_id.is_none() {
                    missing.push("AWS_ACCESS_KEY_ID");
                }
                if settings.secret_access_key.is_none() {
                    missing.push("AWS_SECRET_ACCESS_KEY");
                }
                if settings.bucket.is_none() {
                    missing.push("S3_BUCKET_NAME");
                }
                Err(missing)
            }
        };

        Self {
            target,
            region: settings.region.clone(),
            endpoint_url: settings.endpoint_url.clone(),
        }
    }

    /// Names of the settings that still need to be provided, if any.
    pub fn missing_settings(&self) -> Option<&[&'static str]> {
        self.target.as_ref().err().map(Vec::as_slice)
    }

    /// Bucket-qualified URI of an object.
    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        match &self.endpoint_url {
            Some(endpoint) => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
            None => format!("https://{bucket}.s3.{}.amazonaws.com/{key}", self.region),
        }
    }
}

fn build_client(settings: &S3Settings, access_key: &str, secret_key: &str) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(access_key, secret_key, None, None, "lyric-static");

    let mut builder = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .credentials_provider(credentials);

    if let Some(endpoint) = &settings.endpoint_url {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    aws_sdk_s3::Client::from_conf(builder.build())
}

#[async_trait]
impl StorageGateway for S3Storage {
    fn kind(&self) -> StorageBackendKind {
        StorageBackendKind::S3
    }

    async fn store(
        &self,
        name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<StoredObject, StorageError> {
        let target = self
            .target
            .as_ref()
            .map_err(|missing| StorageError::NotConfigured(missing.clone()))?;

        let key = format!("{KEY_PREFIX}/{name}");
        let size = data.len();

        target
            .client
            .put_object()
            .bucket(&target.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(DisplayErrorContext(&e).to_string()))?;

        tracing::info!(bucket = %target.bucket, key = %key, bytes = size, "Stored upload in S3");

        Ok(StoredObject {
            location: self.object_url(&target.bucket, &key),
        })
    }
}
