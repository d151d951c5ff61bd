#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use lyric_api::config::ServerConfig;
use lyric_api::router::build_app_router;
use lyric_api::state::AppState;
use lyric_db::DbPool;
use lyric_inference::InferenceClient;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_FRONTEND_URL: &str = "http://localhost:3000";

/// Build a test `ServerConfig` storing uploads under `upload_dir`.
///
/// `vars` are applied on top as if they were environment variables.
pub fn test_config(upload_dir: &Path, vars: &[(&str, &str)]) -> ServerConfig {
    let mut env: HashMap<String, String> = HashMap::from([
        ("HOST".to_string(), "127.0.0.1".to_string()),
        ("PORT".to_string(), "0".to_string()),
        ("FRONTEND_URL".to_string(), TEST_FRONTEND_URL.to_string()),
        (
            "UPLOAD_DIR".to_string(),
            upload_dir.to_string_lossy().into_owned(),
        ),
    ]);
    for (key, value) in vars {
        env.insert(key.to_string(), value.to_string());
    }
    ServerConfig::from_lookup(&|key: &str| env.get(key).cloned()).unwrap()
}

/// Build the full application router the way `main.rs` does.
pub async fn build_test_app(config: ServerConfig) -> Router {
    build_test_app_with_pool(config, None).await
}

pub async fn build_test_app_with_pool(config: ServerConfig, pool: Option<DbPool>) -> Router {
    let storage = lyric_storage::build_gateway(&config.storage).await.unwrap();
    let inference = InferenceClient::with_client(reqwest::Client::new(), config.inference.clone());

    let state = AppState {
        config: Arc::new(config.clone()),
        storage,
        inference: Arc::new(inference),
        pool,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &'static str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Multipart uploads
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "lyric-test-boundary";

/// A `multipart/form-data` POST carrying one file field.
pub struct Upload<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: Option<&'a str>,
    pub data: Vec<u8>,
    pub api_key: Option<&'a str>,
}

impl<'a> Upload<'a> {
    pub fn file(file_name: &'a str, content_type: &'a str, data: Vec<u8>) -> Self {
        Self {
            field: "file",
            file_name,
            content_type: Some(content_type),
            data,
            api_key: None,
        }
    }

    pub fn into_request(self) -> Request<Body> {
        let mut body = Vec::with_capacity(self.data.len() + 256);
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                self.field, self.file_name
            )
            .as_bytes(),
        );
        if let Some(content_type) = self.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&self.data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/upload-photo")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(key) = self.api_key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::from(body)).unwrap()
    }
}

pub async fn upload(app: Router, upload: Upload<'_>) -> Response {
    app.oneshot(upload.into_request()).await.unwrap()
}

/// `len` bytes that start with a JPEG signature.
pub fn jpeg_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    data.resize(len, 0);
    data
}

/// Names of the files currently in `dir`.
pub fn stored_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// Stub generation backend
// ---------------------------------------------------------------------------

/// A local stand-in for the hosted generation endpoint.
pub struct GenerationStub {
    pub url: String,
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl GenerationStub {
    /// Number of requests the stub has answered.
    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The `inputs` string of the most recent request.
    pub fn last_inputs(&self) -> String {
        let requests = self.requests.lock().unwrap();
        let (_, body) = requests.last().expect("no request recorded");
        body["inputs"].as_str().unwrap().to_string()
    }

    pub fn last_authorization(&self) -> Option<String> {
        let requests = self.requests.lock().unwrap();
        requests.last().and_then(|(auth, _)| auth.clone())
    }
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    delay: Duration,
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn stub_generate(
    State(stub): State<StubState>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    // Recorded only once the reply is ready, so an abandoned call is not counted.
    tokio::time::sleep(stub.delay).await;
    stub.requests.lock().unwrap().push((auth, body));
    (stub.status, Json(stub.reply.clone()))
}

/// Serve `reply` with `status` on an ephemeral port.
pub async fn spawn_generation_stub(status: StatusCode, reply: Value) -> GenerationStub {
    spawn_slow_generation_stub(status, reply, Duration::ZERO).await
}

/// Like [`spawn_generation_stub`], but each reply is held back for `delay`.
pub async fn spawn_slow_generation_stub(
    status: StatusCode,
    reply: Value,
    delay: Duration,
) -> GenerationStub {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/models/poet", post(stub_generate))
        .with_state(StubState {
            status,
            reply,
            delay,
            requests: Arc::clone(&requests),
        });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    GenerationStub {
        url: format!("http://{addr}/models/poet"),
        requests,
    }
}
