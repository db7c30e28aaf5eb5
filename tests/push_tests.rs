//! Push client against a live server on a loopback port.

#[path = "common.rs"]
mod common;

use axum::Router;
use common::{SECRET, jpeg_bytes};
use pibox_gallery::client::retry::RetryConfig;
use pibox_gallery::client::{PushError, PushOptions, push_photo};
use pibox_gallery::config::Config;
use pibox_gallery::http::{AppState, router};
use std::net::SocketAddr;
use std::time::Duration;
use tempfile::TempDir;

struct LiveServer {
    addr: SocketAddr,
    store_dir: std::path::PathBuf,
    _tmp: TempDir,
}

impl LiveServer {
    async fn start() -> Self {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.upload.api_key = SECRET.to_string();
        config.store.dir = tmp.path().join("uploads");
        let store_dir = config.store.dir.clone();

        let app: Router = router(AppState::new(config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        Self {
            addr,
            store_dir,
            _tmp: tmp,
        }
    }

    fn options(&self, api_key: &str) -> PushOptions {
        let mut options = PushOptions::new(format!("http://{}/upload", self.addr));
        options.api_key = Some(api_key.to_string());
        options.timeout = Duration::from_secs(5);
        options.retry = RetryConfig::default()
            .with_max_retries(1)
            .with_initial_delay(Duration::from_millis(10));
        options
    }
}

fn write_photo(dir: &TempDir, len: usize) -> std::path::PathBuf {
    let path = dir.path().join("capture.jpg");
    std::fs::write(&path, jpeg_bytes(len)).unwrap();
    path
}

#[tokio::test]
async fn test_push_stores_photo() {
    let server = LiveServer::start().await;
    let files = TempDir::new().unwrap();
    let path = write_photo(&files, 4096);

    let receipt = push_photo(&path, &server.options(SECRET)).await.unwrap();

    assert_eq!(receipt.status, 201);
    assert_eq!(receipt.body["success"], true);
    assert_eq!(receipt.body["size"], 4096);

    let filename = receipt.body["filename"].as_str().unwrap();
    let stored = std::fs::read(server.store_dir.join(filename)).unwrap();
    assert_eq!(stored, jpeg_bytes(4096));
}

#[tokio::test]
async fn test_push_with_wrong_key_is_final() {
    let server = LiveServer::start().await;
    let files = TempDir::new().unwrap();
    let path = write_photo(&files, 128);

    let err = push_photo(&path, &server.options("wrong")).await.unwrap_err();

    match err {
        PushError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid or missing API key"));
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(!server.store_dir.exists());
}

#[tokio::test]
async fn test_push_to_closed_port_fails_after_retries() {
    // Bind then drop to get a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let files = TempDir::new().unwrap();
    let path = write_photo(&files, 128);
    let mut options = PushOptions::new(format!("http://{addr}/upload"));
    options.retry = RetryConfig::default()
        .with_max_retries(1)
        .with_initial_delay(Duration::from_millis(10));

    let err = push_photo(&path, &options).await.unwrap_err();

    assert!(matches!(err, PushError::Request(_)));
    assert!(err.is_transient());
}
