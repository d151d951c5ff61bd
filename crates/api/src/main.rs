use std::net::SocketAddr;
use std::sync::Arc;

use lyric_core::config::env_lookup;
use lyric_inference::InferenceClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lyric_api::config::{LogFormat, ServerConfig};
use lyric_api::router::build_app_router;
use lyric_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let json_logs = LogFormat::from_lookup(&env_lookup) == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lyric_api=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(
        host = %config.host,
        port = config.port,
        storage_backend = config.storage.backend.name(),
        generation_configured = config.inference.is_configured(),
        "Loaded server configuration"
    );

    let pool = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = lyric_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            lyric_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            lyric_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database ready, persistence enabled");
            Some(pool)
        }
        None => {
            tracing::info!("DATABASE_URL not set, persistence disabled");
            None
        }
    };

    let storage = lyric_storage::build_gateway(&config.storage)
        .await
        .expect("Failed to initialise storage backend");

    if !config.inference.is_configured() {
        tracing::warn!("HUGGINGFACE_API_KEY not set; poem generation will fail");
    }
    let inference = Arc::new(InferenceClient::new(config.inference.clone()));

    let state = AppState {
        config: Arc::new(config.clone()),
        storage,
        inference,
        pool,
    };

    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
