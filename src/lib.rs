//! pibox gallery server.
//!
//! Photo booths upload captures to `POST /upload`; viewers browse them at
//! `/` or fetch `/api/photos`. The store is a single directory of files
//! named `photo_<date>_<time>_<suffix>.jpg`.
//!
//! - [`config`] - TOML configuration and validation
//! - [`store`] - the photo directory: writes, scans, content sniffing
//! - [`http`] - axum router and handlers
//! - [`gallery`] - HTML page and lightbox model
//! - [`client`] - uploader used by `pibox push`

pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod gallery;
pub mod http;
pub mod store;
pub mod utils;
