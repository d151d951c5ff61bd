use std::sync::Arc;

use lyric_inference::InferenceClient;
use lyric_storage::StorageGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Backend chosen once at startup from `STORAGE_BACKEND`.
    pub storage: Arc<dyn StorageGateway>,
    pub inference: Arc<InferenceClient>,
    /// Present only when `DATABASE_URL` is configured.
    pub pool: Option<lyric_db::DbPool>,
}
