//! Async wrappers for store operations.
//!
//! These run the blocking filesystem work in `spawn_blocking` so HTTP
//! handlers never stall the runtime on disk I/O.

use bytes::Bytes;

use super::error::{Result, StoreError};
use super::sniff::ImageKind;
use super::types::{PhotoEntry, StoredPhoto};
use super::PhotoStore;

impl PhotoStore {
    /// Async version of `persist`.
    pub async fn persist_async(&self, data: Bytes, kind: ImageKind) -> Result<StoredPhoto> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.persist(&data, kind))
            .await
            .map_err(|e| StoreError::Join(e.to_string()))?
    }

    /// Async version of `list`.
    pub async fn list_async(&self) -> Result<Vec<PhotoEntry>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.list())
            .await
            .map_err(|e| StoreError::Join(e.to_string()))?
    }
}
