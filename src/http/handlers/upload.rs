//! Photo intake.
//!
//! Order of checks: API key, multipart framing, the `photo` field, size,
//! sniffed type, then the write. Each failure ends the request; nothing is
//! retried server-side and nothing is written unless every check passes.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use bytes::{Bytes, BytesMut};
use chrono::{Local, SecondsFormat};

use super::super::{
    AppError, AppState, AuditEvent, RequestContext, TransferFailure, UploadResponse,
    log_audit_event,
};
use crate::constants::{PHOTO_FIELD, SOURCE_FIELD, TIMESTAMP_FIELD};
use crate::store::ImageKind;
use crate::utils::human_size;

/// Fields collected from the multipart body.
#[derive(Debug, Default)]
struct UploadForm {
    photo: Option<Bytes>,
    timestamp: Option<String>,
    source: Option<String>,
}

/// POST /upload - Authenticate, validate and store one photo.
pub(crate) async fn upload(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    state.authorize(&headers, &ctx, "/upload")?;

    let result = accept(&state, &ctx, multipart).await;
    if let Err(err) = &result {
        log_audit_event(AuditEvent::UploadRejected {
            remote_addr: ctx.remote_addr,
            status: err.status_code().as_u16(),
            reason: err.to_string(),
        });
    }
    result.map(|response| (StatusCode::CREATED, Json(response)))
}

async fn accept(
    state: &AppState,
    ctx: &RequestContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadResponse, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        AppError::BadRequest(format!(
            "Expected a multipart/form-data body: {}",
            rejection.body_text()
        ))
    })?;

    let max_size = state.config.upload.max_file_size;
    let form = read_form(&mut multipart, max_size).await?;

    let photo = form
        .photo
        .filter(|data| !data.is_empty())
        .ok_or(TransferFailure::NoFile)?;

    let kind = ImageKind::sniff(&photo)
        .filter(|kind| state.store.accepts(*kind))
        .ok_or_else(|| {
            let allowed: Vec<&str> = state.store.kinds().iter().map(|k| k.mime()).collect();
            AppError::UnsupportedMediaType(format!(
                "Invalid file type. Allowed: {}",
                allowed.join(", ")
            ))
        })?;

    let stored = state.store.persist_async(photo, kind).await?;

    log_audit_event(AuditEvent::PhotoStored {
        remote_addr: ctx.remote_addr,
        filename: stored.filename.clone(),
        size: stored.size,
        source: form.source,
    });

    let timestamp = form
        .timestamp
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| Local::now().to_rfc3339_opts(SecondsFormat::Secs, false));

    Ok(UploadResponse::new(stored, timestamp))
}

/// Read the multipart body, enforcing `max_size` on the photo while streaming.
async fn read_form(multipart: &mut Multipart, max_size: u64) -> Result<UploadForm, AppError> {
    let transfer = |e: axum::extract::multipart::MultipartError| {
        AppError::from(TransferFailure::from_multipart(&e))
    };

    let mut form = UploadForm::default();
    while let Some(mut field) = multipart.next_field().await.map_err(transfer)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(PHOTO_FIELD) => {
                // A plain text part named `photo` is not a file
                if field.file_name().is_none() {
                    return Err(TransferFailure::NoFile.into());
                }
                if form.photo.is_some() {
                    return Err(AppError::BadRequest(
                        "Only one photo may be uploaded per request".to_string(),
                    ));
                }
                let mut buf = BytesMut::new();
                while let Some(chunk) = field.chunk().await.map_err(transfer)? {
                    if (buf.len() + chunk.len()) as u64 > max_size {
                        return Err(AppError::PayloadTooLarge(format!(
                            "File too large. Maximum size is {}",
                            human_size(max_size)
                        )));
                    }
                    buf.extend_from_slice(&chunk);
                }
                form.photo = Some(buf.freeze());
            },
            Some(TIMESTAMP_FIELD) => form.timestamp = Some(field.text().await.map_err(transfer)?),
            Some(SOURCE_FIELD) => form.source = Some(field.text().await.map_err(transfer)?),
            // Unknown fields are skipped by the next `next_field` call
            _ => {},
        }
    }
    Ok(form)
}
