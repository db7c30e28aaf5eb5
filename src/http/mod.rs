//! HTTP surface of the gallery server.
//!
//! Routes:
//! - `POST /upload` - intake (`OPTIONS` answers preflights, anything else is 405)
//! - `GET /api/photos` - JSON listing
//! - `GET /` - gallery page
//! - `GET /<url_prefix>/{filename}` - stored photo
//! - `GET /health` - liveness
//!
//! All handlers share one [`AppState`] built from the immutable [`Config`].

mod audit;
mod error;
mod handlers;
mod types;

use axum::extract::{ConnectInfo, DefaultBodyLimit, Request};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use subtle::ConstantTimeEq;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Instrument, debug, info_span};

use crate::config::Config;
use crate::constants::{API_KEY_HEADER, MULTIPART_OVERHEAD, REQUEST_ID_HEADER};
use crate::store::PhotoStore;

pub use audit::{AuditEvent, log_audit_event};
pub use error::{AppError, TransferFailure};
pub use types::{ErrorBody, HealthResponse, ListResponse, UploadResponse};

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: PhotoStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = PhotoStore::from_config(&config);
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Check the `X-API-Key` header against the configured secret.
    ///
    /// The comparison runs in constant time. An empty configured key never
    /// authorizes anything.
    pub(crate) fn check_api_key(&self, headers: &HeaderMap) -> Result<(), &'static str> {
        let expected = self.config.upload.api_key.as_bytes();
        if expected.is_empty() {
            return Err("no api key configured");
        }
        let Some(provided) = headers.get(API_KEY_HEADER) else {
            return Err("missing api key");
        };
        if bool::from(provided.as_bytes().ct_eq(expected)) {
            Ok(())
        } else {
            Err("invalid api key")
        }
    }

    /// Like [`check_api_key`](Self::check_api_key), auditing failures.
    pub(crate) fn authorize(
        &self,
        headers: &HeaderMap,
        ctx: &RequestContext,
        path: &str,
    ) -> Result<(), AppError> {
        self.check_api_key(headers).map_err(|reason| {
            log_audit_event(AuditEvent::AuthFailure {
                remote_addr: ctx.remote_addr,
                path: path.to_string(),
                reason,
            });
            AppError::Unauthorized
        })
    }
}

/// Per-request data attached by the outermost middleware.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub remote_addr: Option<SocketAddr>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.upload.max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);
    let photo_route = format!("/{}/{{filename}}", state.config.store.url_prefix);

    Router::new()
        .route("/", get(handlers::gallery_page))
        .route(
            "/upload",
            post(handlers::upload)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route("/api/photos", get(handlers::list_photos))
        .route(&photo_route, get(handlers::get_photo))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer())
        .layer(middleware::from_fn(request_context))
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(API_KEY_HEADER),
        ])
}

/// Attach a request id and peer address, and trace the request.
///
/// An incoming `X-Request-ID` is kept when it is short and printable,
/// otherwise a UUID is generated. The id is echoed on the response.
async fn request_context(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);

    let span = info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = %request_id,
    );
    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
        remote_addr,
    });

    let start = Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| {
        debug!(
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
