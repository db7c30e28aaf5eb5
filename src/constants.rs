//! Default values shared by configuration, the store and the HTTP layer.

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pibox.toml";

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default maximum upload size (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Upload sizes above this produce a validation warning (100 MiB).
pub const LARGE_FILE_SIZE_WARNING: u64 = 100 * 1024 * 1024;

/// Extra request body allowance on top of `max_file_size` for multipart framing
/// and the text fields.
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Default store directory, relative to the working directory.
pub const DEFAULT_STORE_DIR: &str = "uploads";

/// Default URL prefix under which stored photos are served.
pub const DEFAULT_URL_PREFIX: &str = "uploads";

/// Default gallery page title.
pub const DEFAULT_TITLE: &str = "Photo Gallery";

/// Declared page size for the gallery. The listing always returns everything.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// API keys shorter than this produce a validation warning.
pub const MIN_RECOMMENDED_KEY_LEN: usize = 8;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Environment variable overriding `upload.api_key`.
pub const API_KEY_ENV: &str = "PIBOX_API_KEY";

/// Multipart field holding the photo.
pub const PHOTO_FIELD: &str = "photo";

/// Optional multipart field with the client capture timestamp.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Optional multipart field naming the uploading device.
pub const SOURCE_FIELD: &str = "source";

/// Cache-Control header value for served photos (1 hour).
pub const PHOTO_CACHE_CONTROL: &str = "public, max-age=3600";

/// Number of fresh names tried when a generated filename already exists.
pub const MAX_NAME_ATTEMPTS: usize = 5;
