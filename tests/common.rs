//! Shared helpers for the HTTP integration tests.
//!
//! `TestApp` owns a temporary store directory and drives the router
//! in-process with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pibox_gallery::config::Config;
use pibox_gallery::http::{AppState, router};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tower::ServiceExt;

pub const SECRET: &str = "secret123";
const BOUNDARY: &str = "----pibox-test-boundary-7MA4YWxkTrZu0gW";

/// Minimal JPEG-looking payload of `len` bytes (JFIF header, zero padding).
pub fn jpeg_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    data.resize(len.max(data.len()), 0);
    data
}

/// PNG signature followed by padding.
pub fn png_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.resize(len.max(data.len()), 0);
    data
}

/// One multipart part.
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

impl<'a> Part<'a> {
    pub fn photo(data: &'a [u8]) -> Self {
        Self::File {
            name: "photo",
            filename: "capture.jpg",
            content_type: "image/jpeg",
            data,
        }
    }
}

/// Encode parts as a `multipart/form-data` body.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            },
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            },
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Router plus its private store directory.
pub struct TestApp {
    pub tmp: TempDir,
    pub config: Config,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Build with the test defaults (`secret123`, 10 MiB, store in a temp
    /// dir), then apply `customize`.
    pub fn with_config(customize: impl FnOnce(&mut Config)) -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut config = Config::default();
        config.upload.api_key = SECRET.to_string();
        config.store.dir = tmp.path().join("uploads");
        customize(&mut config);

        let router = router(AppState::new(config.clone()));
        Self {
            tmp,
            config,
            router,
        }
    }

    pub fn store_dir(&self) -> &Path {
        &self.config.store.dir
    }

    /// Files currently in the store directory (empty if it does not exist).
    pub fn stored_files(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(self.store_dir()) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST /upload with the given key and parts.
    pub async fn upload(&self, api_key: Option<&str>, parts: &[Part<'_>]) -> Response<Body> {
        let mut builder = Request::post("/upload").header("content-type", multipart_content_type());
        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }
        self.send(builder.body(Body::from(multipart_body(parts))).unwrap())
            .await
    }

    /// Upload `data` as the photo with the correct key; returns the JSON body.
    pub async fn upload_ok(&self, data: &[u8]) -> serde_json::Value {
        let resp = self.upload(Some(SECRET), &[Part::photo(data)]).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        json_body(resp).await
    }
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    resp.into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
        .to_vec()
}

pub async fn json_body(resp: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).expect("Body is not JSON")
}
