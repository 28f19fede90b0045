// Audit trail - append-only, per-record history of workflow transitions
//
// The recorder is handed to the status machine as a capability rather than
// living in a global, so tests can inject an in-memory ledger and
// deployments can swap in a durable one.

pub mod json_file;
pub mod memory;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{AuditBackend, AuditSettings};

pub use json_file::JsonFileAuditTrail;
pub use memory::InMemoryAuditTrail;
pub use types::{ReviewAction, ReviewRecord};

/// Errors that can occur while reading or writing the audit trail
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("audit serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("audit history for '{content_id}' is corrupt: {reason}")]
    Corrupt { content_id: String, reason: String },
}

/// Append-only ledger keyed by content id.
///
/// No update or delete is exposed; histories outlive the records they
/// describe.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AuditTrailRecorder: Send + Sync {
    /// Insert at the head of the content id's history
    async fn append(&self, content_id: &str, record: ReviewRecord) -> Result<(), AuditError>;

    /// Full history, newest first; empty when nothing was recorded yet
    async fn history(&self, content_id: &str) -> Result<Vec<ReviewRecord>, AuditError>;
}

/// Build the configured audit backend
pub fn audit_trail_from_settings(settings: &AuditSettings) -> Arc<dyn AuditTrailRecorder> {
    match settings.backend {
        AuditBackend::Memory => Arc::new(InMemoryAuditTrail::new()),
        AuditBackend::JsonFile => Arc::new(JsonFileAuditTrail::new(settings.directory.clone())),
    }
}
