use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{StorageBackendKind, StorageError, StorageGateway, StoredObject};

/// URL prefix under which the API serves the upload directory.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Stores uploads in a local directory that the API also serves read-only.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create the backend, making sure `root` exists.
    pub async fn init(root: PathBuf) -> Result<Self, StorageError> {
        tokio::fs::create_dir_all(&root).await?;
        tracing::info!(root = %root.display(), "Local upload directory ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public path of a stored file.
    pub fn location_for(name: &str) -> String {
        format!("{UPLOADS_ROUTE}/{name}")
    }
}

#[async_trait]
impl StorageGateway for LocalStorage {
    fn kind(&self) -> StorageBackendKind {
        StorageBackendKind::Local
    }

    async fn store(
        &self,
        name: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> Result<StoredObject, StorageError> {
        let path = self.root.join(name);
        tokio::fs::write(&path, &data).await?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored upload locally");

        Ok(StoredObject {
            location: Self::location_for(name),
        })
    }
}
