//! Content type detection from magic bytes.
//!
//! Uploads are classified by what the bytes are, never by the filename or
//! the `Content-Type` the client declared for the part.

use std::fmt;

/// Image formats the store knows how to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Webp,
}

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

impl ImageKind {
    /// All recognised kinds.
    pub const ALL: [ImageKind; 4] = [Self::Jpeg, Self::Png, Self::Gif, Self::Webp];

    /// Classify a buffer by its leading bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pibox_gallery::store::ImageKind;
    ///
    /// assert_eq!(ImageKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
    /// assert_eq!(ImageKind::sniff(b"GIF89a...."), Some(ImageKind::Gif));
    /// assert_eq!(ImageKind::sniff(b"hello"), None);
    /// ```
    #[must_use]
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(JPEG_MAGIC) {
            Some(Self::Jpeg)
        } else if data.starts_with(PNG_MAGIC) {
            Some(Self::Png)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    /// Parse a configured MIME type. Matching ignores case and parameters.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.mime().eq_ignore_ascii_case(essence))
    }

    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    /// Extension used for newly stored files.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    /// Extensions accepted when scanning the store (lowercase).
    #[must_use]
    pub fn known_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
            Self::Gif => &["gif"],
            Self::Webp => &["webp"],
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}
