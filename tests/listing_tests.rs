//! Listing, photo serving and gallery page tests.

#[path = "common.rs"]
mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{SECRET, TestApp, body_bytes, jpeg_bytes, json_body};
use std::time::Duration;

// =============================================================================
// GET /api/photos
// =============================================================================

#[tokio::test]
async fn test_listing_without_store_dir_is_empty() {
    let app = TestApp::new();
    assert!(!app.store_dir().exists());

    let resp = app.get("/api/photos").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert_eq!(body["photos"], serde_json::json!([]));
}

#[tokio::test]
async fn test_listing_contains_every_upload() {
    let app = TestApp::new();
    for len in [100, 200, 300] {
        app.upload_ok(&jpeg_bytes(len)).await;
    }

    let body = json_body(app.get("/api/photos").await).await;

    assert_eq!(body["count"], 3);
    let photos = body["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 3);
    for photo in photos {
        let filename = photo["filename"].as_str().unwrap();
        assert_eq!(photo["url"], format!("uploads/{filename}"));
        assert!(photo["size"].as_u64().unwrap() >= 100);
        let date = photo["date"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok(), "bad date {date}");
    }
}

#[tokio::test]
async fn test_listing_is_newest_first() {
    let app = TestApp::new();

    let first = app.upload_ok(&jpeg_bytes(100)).await;
    // Filenames and mtimes have second resolution
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let second = app.upload_ok(&jpeg_bytes(200)).await;

    let body = json_body(app.get("/api/photos").await).await;
    let photos = body["photos"].as_array().unwrap();

    assert_eq!(photos[0]["filename"], second["filename"]);
    assert_eq!(photos[1]["filename"], first["filename"]);
}

#[tokio::test]
async fn test_listing_skips_foreign_files() {
    let app = TestApp::new();
    app.upload_ok(&jpeg_bytes(100)).await;
    std::fs::write(app.store_dir().join("notes.txt"), b"hello").unwrap();
    std::fs::create_dir(app.store_dir().join("nested.jpg")).unwrap();

    let body = json_body(app.get("/api/photos").await).await;

    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_listing_key_required_when_configured() {
    let app = TestApp::with_config(|c| c.gallery.require_key_for_listing = true);

    let resp = app.get("/api/photos").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["success"], false);

    let resp = app
        .send(
            Request::get("/api/photos")
                .header("x-api-key", SECRET)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_gallery_page_public_when_listing_protected() {
    let app = TestApp::with_config(|c| c.gallery.require_key_for_listing = true);

    let resp = app.get("/").await;

    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// GET /<prefix>/{filename}
// =============================================================================

#[tokio::test]
async fn test_photo_is_served_with_content_type() {
    let app = TestApp::new();
    let photo = jpeg_bytes(1500);
    let uploaded = app.upload_ok(&photo).await;
    let url = uploaded["url"].as_str().unwrap();

    let resp = app.get(&format!("/{url}")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/jpeg");
    assert!(resp.headers().get(header::CACHE_CONTROL).is_some());
    assert_eq!(body_bytes(resp).await, photo);
}

#[tokio::test]
async fn test_missing_photo_is_not_found() {
    let app = TestApp::new();
    app.upload_ok(&jpeg_bytes(100)).await;

    let resp = app
        .get("/uploads/photo_2020-01-01_00-00-00_deadbeef.jpg")
        .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["success"], false);
}

#[tokio::test]
async fn test_traversal_is_rejected() {
    let app = TestApp::new();
    std::fs::write(app.tmp.path().join("secret.jpg"), jpeg_bytes(64)).unwrap();

    let resp = app.get("/uploads/..%2Fsecret.jpg").await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_photo_extension_is_rejected() {
    let app = TestApp::new();
    app.upload_ok(&jpeg_bytes(100)).await;
    std::fs::write(app.store_dir().join("notes.txt"), b"hello").unwrap();

    let resp = app.get("/uploads/notes.txt").await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_custom_url_prefix() {
    let app = TestApp::with_config(|c| c.store.url_prefix = "photos".to_string());
    let uploaded = app.upload_ok(&jpeg_bytes(100)).await;
    let filename = uploaded["filename"].as_str().unwrap();
    assert_eq!(uploaded["url"], format!("photos/{filename}"));

    let resp = app.get(&format!("/photos/{filename}")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.get(&format!("/uploads/{filename}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// GET /
// =============================================================================

#[tokio::test]
async fn test_empty_gallery_page() {
    let app = TestApp::with_config(|c| c.gallery.title = "Wedding Booth".to_string());

    let resp = app.get("/").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));

    let html = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(html.contains("<title>Wedding Booth</title>"));
    assert!(html.contains("No photos yet"));
}

#[tokio::test]
async fn test_gallery_page_shows_uploads() {
    let app = TestApp::new();
    let uploaded = app.upload_ok(&jpeg_bytes(2048)).await;
    let url = uploaded["url"].as_str().unwrap();

    let html = String::from_utf8(body_bytes(app.get("/").await).await).unwrap();

    assert!(!html.contains("No photos yet"));
    assert!(html.contains(&format!("<img src=\"{url}\"")));
    assert!(html.contains("2.0 KB"));
    assert!(html.contains("1 photo"));
}

// =============================================================================
// Misc
// =============================================================================

#[tokio::test]
async fn test_health_reports_store_dir() {
    let app = TestApp::new();

    let body = json_body(app.get("/health").await).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store_dir_exists"], false);

    app.upload_ok(&jpeg_bytes(100)).await;

    let body = json_body(app.get("/health").await).await;
    assert_eq!(body["store_dir_exists"], true);
}

#[tokio::test]
async fn test_unknown_path_is_json_not_found() {
    let app = TestApp::new();

    let resp = app.get("/wp-admin").await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = json_body(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not found");
}
