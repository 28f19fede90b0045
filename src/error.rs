use thiserror::Error;

use crate::audit::AuditError;
use crate::content::ContentStatus;
use crate::roles::{Capability, Role};
use crate::store::StorageError;
use crate::workflow::WorkflowAction;

/// Errors surfaced by workflow transitions.
///
/// None of these are fatal to the calling session: whenever one is returned
/// the record is unchanged and no audit entry was written (except `Audit`,
/// where the store write already happened).
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("permission denied: role '{role}' lacks the '{capability}' capability")]
    PermissionDenied { role: Role, capability: Capability },

    #[error("content is not publishable: {}", errors.join("; "))]
    NotPublishable { errors: Vec<String> },

    #[error("cannot {action} content in status '{from}'")]
    InvalidTransition {
        from: ContentStatus,
        action: WorkflowAction,
    },

    #[error("content record '{id}' already exists with status '{status}'")]
    AlreadyExists { id: String, status: ContentStatus },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl WorkflowError {
    /// Validator messages attached to a `NotPublishable` rejection
    pub fn validation_errors(&self) -> &[String] {
        match self {
            WorkflowError::NotPublishable { errors } => errors,
            _ => &[],
        }
    }
}

pub type Result<T, E = WorkflowError> = std::result::Result<T, E>;
