//! HTTP handlers organized by endpoint group.

mod gallery;
mod photos;
mod system;
mod upload;

// Re-export all handlers for use in routing
pub(crate) use gallery::gallery_page;
pub(crate) use photos::{get_photo, list_photos};
pub(crate) use system::{health, method_not_allowed, not_found, preflight};
pub(crate) use upload::upload;
