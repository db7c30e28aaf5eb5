//! Request/response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::store::{PhotoEntry, StoredPhoto};

/// Body of every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

/// 201 body for a stored upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub size: u64,
    /// Client-declared capture time, or server time when none was sent
    pub timestamp: String,
    /// Relative access path
    pub url: String,
}

impl UploadResponse {
    pub fn new(stored: StoredPhoto, timestamp: String) -> Self {
        Self {
            success: true,
            filename: stored.filename,
            size: stored.size,
            timestamp,
            url: stored.url,
        }
    }
}

/// GET /api/photos body.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub photos: Vec<PhotoEntry>,
}

impl From<Vec<PhotoEntry>> for ListResponse {
    fn from(photos: Vec<PhotoEntry>) -> Self {
        Self {
            success: true,
            count: photos.len(),
            photos,
        }
    }
}

/// GET /health body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store_dir_exists: bool,
}
