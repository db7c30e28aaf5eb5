//! Types returned by the photo store.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Result of a successful `persist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    /// Generated filename (e.g. `photo_2026-10-18_14-03-59_9f3a01bc.jpg`)
    pub filename: String,
    /// Size in bytes
    pub size: u64,
    /// Relative access path (e.g. `uploads/photo_...jpg`)
    pub url: String,
}

/// One photo found while scanning the store.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PhotoEntry {
    pub filename: String,
    pub url: String,
    pub size: u64,
    /// Modification time, RFC 3339 with seconds precision
    pub date: String,
    /// Modification time used for ordering
    #[serde(skip)]
    pub modified: DateTime<Local>,
}
