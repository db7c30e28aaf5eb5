//! Security audit logging for intake events.
//!
//! Emits structured events on the `audit` target so they can be filtered
//! and shipped separately (`RUST_LOG=audit=info`).

use std::net::SocketAddr;
use tracing::{info, warn};

/// Events worth keeping an audit trail of.
#[derive(Debug, Clone)]
pub enum AuditEvent {
    /// A request to a protected endpoint failed authentication.
    AuthFailure {
        remote_addr: Option<SocketAddr>,
        path: String,
        reason: &'static str,
    },
    /// An authenticated upload was refused.
    UploadRejected {
        remote_addr: Option<SocketAddr>,
        status: u16,
        reason: String,
    },
    /// A photo was written to the store.
    PhotoStored {
        remote_addr: Option<SocketAddr>,
        filename: String,
        size: u64,
        source: Option<String>,
    },
}

fn addr(remote_addr: Option<SocketAddr>) -> String {
    remote_addr.map_or_else(|| "unknown".to_string(), |a| a.to_string())
}

/// Log an audit event with structured fields.
pub fn log_audit_event(event: AuditEvent) {
    match event {
        AuditEvent::AuthFailure {
            remote_addr,
            path,
            reason,
        } => {
            warn!(
                target: "audit",
                event_type = "auth_failure",
                remote_addr = %addr(remote_addr),
                %path,
                reason,
                "Authentication failed"
            );
        },
        AuditEvent::UploadRejected {
            remote_addr,
            status,
            reason,
        } => {
            warn!(
                target: "audit",
                event_type = "upload_rejected",
                remote_addr = %addr(remote_addr),
                status,
                %reason,
                "Upload rejected"
            );
        },
        AuditEvent::PhotoStored {
            remote_addr,
            filename,
            size,
            source,
        } => {
            info!(
                target: "audit",
                event_type = "photo_stored",
                remote_addr = %addr(remote_addr),
                %filename,
                size,
                source = source.as_deref().unwrap_or("-"),
                "Photo stored"
            );
        },
    }
}
