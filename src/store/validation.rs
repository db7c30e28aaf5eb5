//! Name checks for photos requested over HTTP.
//!
//! Stored photos live flat in one directory, so a valid request names exactly
//! one normal path component with a recognised image extension.

use std::path::{Component, Path};

use super::error::{Result, StoreError};
use super::sniff::ImageKind;

/// Lowercased extension of `name`, if any.
pub(crate) fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Whether `name` carries an extension belonging to one of `kinds`.
pub(crate) fn has_known_extension(name: &str, kinds: &[ImageKind]) -> bool {
    extension_of(name).is_some_and(|ext| {
        kinds
            .iter()
            .any(|kind| kind.known_extensions().contains(&ext.as_str()))
    })
}

/// Validate a single photo filename.
///
/// Rejects:
/// - empty names and hidden names (temporary uploads start with `.`)
/// - anything with separators, `..`, root or prefix components
/// - extensions outside the allowed kinds
pub(crate) fn validate_photo_name(name: &str, kinds: &[ImageKind]) -> Result<()> {
    let invalid = || StoreError::InvalidName(name.to_string());

    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\', '\0']) {
        return Err(invalid());
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {},
        _ => return Err(invalid()),
    }

    if !has_known_extension(name, kinds) {
        return Err(invalid());
    }

    Ok(())
}
