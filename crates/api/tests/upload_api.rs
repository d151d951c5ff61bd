//! Integration tests for `POST /upload-photo` and the static `/uploads` route.

mod common;

use axum::http::StatusCode;
use common::{
    body_bytes, body_json, build_test_app, get, jpeg_bytes, stored_files, test_config, upload,
    Upload,
};

/// `YYYYMMDD_HHMMSS_` prefix length.
const TIMESTAMP_PREFIX_LEN: usize = 16;

fn assert_timestamped(filename: &str, original: &str) {
    assert_eq!(filename.len(), TIMESTAMP_PREFIX_LEN + original.len(), "{filename}");
    let (prefix, rest) = filename.split_at(TIMESTAMP_PREFIX_LEN);
    assert_eq!(rest, original);
    let digits: String = prefix.chars().filter(|c| *c != '_').collect();
    assert_eq!(digits.len(), 14);
    assert!(digits.chars().all(|c| c.is_ascii_digit()), "{prefix}");
    assert_eq!(&prefix[8..9], "_");
    assert_eq!(&prefix[15..16], "_");
}

#[tokio::test]
async fn stores_jpeg_and_returns_location() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[])).await;
    let data = jpeg_bytes(2 * 1024 * 1024);

    let response = upload(app, Upload::file("photo.jpg", "image/jpeg", data.clone())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let filename = json["filename"].as_str().unwrap();
    assert_timestamped(filename, "photo.jpg");
    assert_eq!(json["location"], format!("/uploads/{filename}"));

    let stored = std::fs::read(dir.path().join(filename)).unwrap();
    assert_eq!(stored, data);
}

#[tokio::test]
async fn stored_upload_is_served_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), &[]);
    let data = jpeg_bytes(1024);

    let app = build_test_app(config.clone()).await;
    let json = body_json(upload(app, Upload::file("cat.jpg", "image/jpeg", data.clone())).await).await;
    let location = json["location"].as_str().unwrap().to_string();

    let app = build_test_app(config).await;
    let response = get(app, &location).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, data);
}

#[tokio::test]
async fn oversized_upload_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[])).await;

    let response = upload(
        app,
        Upload::file("big.jpg", "image/jpeg", jpeg_bytes(6 * 1024 * 1024)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("too large"));
    assert!(stored_files(dir.path()).is_empty());
}

#[tokio::test]
async fn disallowed_type_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[])).await;

    let response = upload(
        app,
        Upload::file("notes.txt", "text/plain", b"hello".to_vec()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("text/plain"));
    assert!(stored_files(dir.path()).is_empty());
}

#[tokio::test]
async fn empty_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[])).await;

    let response = upload(app, Upload::file("empty.jpg", "image/jpeg", Vec::new())).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(stored_files(dir.path()).is_empty());
}

#[tokio::test]
async fn missing_content_type_is_sniffed() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[])).await;

    let response = upload(
        app,
        Upload {
            content_type: None,
            ..Upload::file("snap.jpg", "", jpeg_bytes(512))
        },
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stored_files(dir.path()).len(), 1);
}

#[tokio::test]
async fn path_components_are_stripped_from_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[])).await;

    let response = upload(
        app,
        Upload::file("../../etc/evil.png", "image/png", b"\x89PNG\r\n\x1a\n0000".to_vec()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_timestamped(json["filename"].as_str().unwrap(), "evil.png");
    assert_eq!(stored_files(dir.path()).len(), 1);
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[])).await;

    let response = upload(
        app,
        Upload {
            field: "photo",
            ..Upload::file("a.jpg", "image/jpeg", jpeg_bytes(64))
        },
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("'file'"));
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[])).await;

    let response = common::post_raw(app, "/upload-photo", "application/json", "{}").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["detail"].is_string());
}

// ---------------------------------------------------------------------------
// X-API-Key
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_api_key_is_unauthorized_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[("API_KEY", "s3cret")])).await;

    let response = upload(app, Upload::file("a.jpg", "image/jpeg", jpeg_bytes(64))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(stored_files(dir.path()).is_empty());
}

#[tokio::test]
async fn wrong_api_key_is_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[("API_KEY", "s3cret")])).await;

    let response = upload(
        app,
        Upload {
            api_key: Some("guess"),
            ..Upload::file("a.jpg", "image/jpeg", jpeg_bytes(64))
        },
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["detail"], "Invalid API key");
}

#[tokio::test]
async fn matching_api_key_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_config(dir.path(), &[("API_KEY", "s3cret")])).await;

    let response = upload(
        app,
        Upload {
            api_key: Some("s3cret"),
            ..Upload::file("a.jpg", "image/jpeg", jpeg_bytes(64))
        },
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stored_files(dir.path()).len(), 1);
}

// ---------------------------------------------------------------------------
// S3 backend
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unconfigured_s3_backend_fails_with_generic_detail() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), &[("STORAGE_BACKEND", "s3")]);
    let app = build_test_app(config).await;

    let response = upload(app, Upload::file("a.jpg", "image/jpeg", jpeg_bytes(64))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["detail"], "Service is not configured");
}

#[tokio::test]
async fn s3_backend_does_not_serve_local_uploads() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("old.jpg"), jpeg_bytes(16)).unwrap();
    let config = test_config(dir.path(), &[("STORAGE_BACKEND", "s3")]);
    let app = build_test_app(config).await;

    let response = get(app, "/uploads/old.jpg").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
