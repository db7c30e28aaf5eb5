//! The photo store: one flat directory of uploaded images.
//!
//! The directory listing is the only source of truth. There is no manifest
//! or metadata database; size and date come from the filesystem on every
//! scan.
//!
//! Writes go to a hidden temporary file inside the store directory and are
//! then renamed into place without clobbering, so a photo is either fully
//! present under its final name or not present at all.
//!
//! # Async Usage
//!
//! All filesystem operations are blocking. From async contexts use
//! `persist_async` / `list_async`, which run on `spawn_blocking`.

mod async_ops;
mod error;
mod naming;
mod sniff;
mod types;
mod validation;

use chrono::{DateTime, Local, SecondsFormat};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::MAX_NAME_ATTEMPTS;

pub use error::{Result, StoreError};
pub use naming::{generate_filename, is_generated_name};
pub use sniff::ImageKind;
pub use types::{PhotoEntry, StoredPhoto};

use validation::{has_known_extension, validate_photo_name};

/// Filesystem-backed photo store.
///
/// `PhotoStore` is cheap to clone and holds no open handles; every call
/// works directly against the directory.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
    url_prefix: String,
    kinds: Arc<[ImageKind]>,
}

impl PhotoStore {
    /// Create a store rooted at `dir` accepting the given kinds.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(
        dir: impl Into<PathBuf>,
        url_prefix: impl Into<String>,
        kinds: impl Into<Arc<[ImageKind]>>,
    ) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into(),
            kinds: kinds.into(),
        }
    }

    /// Create the store described by `[store]` and `upload.allowed_types`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.store.dir.clone(),
            config.store.url_prefix.clone(),
            config.upload.allowed_kinds(),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Kinds accepted for upload and recognised when listing.
    pub fn kinds(&self) -> &[ImageKind] {
        &self.kinds
    }

    pub fn accepts(&self, kind: ImageKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Relative access path for a stored file.
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{filename}", self.url_prefix)
    }

    /// Create the store directory if it is missing.
    ///
    /// On Unix a newly created directory is private to the server user
    /// (`0700`). An existing directory keeps its permissions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CreateDir`] if the directory cannot be created.
    pub fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }
        create_private_dir(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        debug!(dir = %self.dir.display(), "Created store directory");
        Ok(())
    }

    /// Write one photo under a freshly generated name.
    ///
    /// The caller must already have checked the size and kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the temporary
    /// file cannot be written, or no free name is found. No file is left
    /// behind in any of these cases.
    pub fn persist(&self, data: &[u8], kind: ImageKind) -> Result<StoredPhoto> {
        self.persist_with(data, || generate_filename(&Local::now(), kind))
    }

    /// [`persist`](Self::persist) with the name source supplied by the caller.
    ///
    /// `next_name` is called once per attempt, at most
    /// [`MAX_NAME_ATTEMPTS`] times.
    pub(crate) fn persist_with<F>(&self, data: &[u8], mut next_name: F) -> Result<StoredPhoto>
    where
        F: FnMut() -> String,
    {
        self.ensure_dir()?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".upload-")
            .suffix(".part")
            .tempfile_in(&self.dir)
            .map_err(|source| StoreError::TempFile {
                path: self.dir.clone(),
                source,
            })?;
        tmp.write_all(data).map_err(StoreError::Write)?;
        tmp.as_file().sync_all().map_err(StoreError::Write)?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = next_name();
            match tmp.persist_noclobber(self.dir.join(&filename)) {
                Ok(_) => {
                    return Ok(StoredPhoto {
                        url: self.url_for(&filename),
                        filename,
                        size: data.len() as u64,
                    });
                },
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                    warn!(%filename, "Generated filename already taken, retrying");
                    tmp = err.file;
                },
                Err(err) => {
                    return Err(StoreError::Persist {
                        filename,
                        source: err.error,
                    });
                },
            }
        }

        Err(StoreError::NameExhausted {
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    /// Scan the store, newest first.
    ///
    /// Only regular files with an extension of an accepted kind are listed
    /// (case-insensitive). A missing directory is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReadDir`] if the directory exists but cannot be read.
    pub fn list(&self) -> Result<Vec<PhotoEntry>> {
        let read_dir_err = |source| StoreError::ReadDir {
            path: self.dir.clone(),
            source,
        };

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(read_dir_err(e)),
        };

        let mut photos = Vec::new();
        for entry in entries {
            let entry = entry.map_err(read_dir_err)?;
            let Ok(filename) = entry.file_name().into_string() else {
                continue;
            };
            if filename.starts_with('.') || !has_known_extension(&filename, &self.kinds) {
                continue;
            }

            let meta = match entry.metadata() {
                Ok(meta) if meta.is_file() => meta,
                Ok(_) => continue,
                Err(e) => {
                    // Removed between read_dir and stat
                    debug!(%filename, error = %e, "Skipping unreadable entry");
                    continue;
                },
            };

            let modified: DateTime<Local> = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH).into();
            photos.push(PhotoEntry {
                url: self.url_for(&filename),
                size: meta.len(),
                date: modified.to_rfc3339_opts(SecondsFormat::Secs, false),
                modified,
                filename,
            });
        }

        photos.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.filename.cmp(&a.filename))
        });
        Ok(photos)
    }

    /// Resolve a stored photo by name for serving.
    ///
    /// Returns `Ok(None)` when the name is valid but no such file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidName`] for names that could escape the
    /// store or do not carry an accepted extension.
    pub fn locate(&self, filename: &str) -> Result<Option<PathBuf>> {
        validate_photo_name(filename, &self.kinds)?;
        let path = self.dir.join(filename);
        Ok(path.is_file().then_some(path))
    }
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
