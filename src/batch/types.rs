// Batch operation types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::{ContentKind, ContentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchAction {
    Publish,
    Archive,
}

impl fmt::Display for BatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchAction::Publish => write!(f, "publish"),
            BatchAction::Archive => write!(f, "archive"),
        }
    }
}

/// One selectable row of the batch view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    pub kind: ContentKind,
    pub id: String,
    pub status: ContentStatus,
}

impl BatchRow {
    pub fn new(kind: ContentKind, id: impl Into<String>, status: ContentStatus) -> Self {
        Self {
            kind,
            id: id.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub id: String,
    /// Display text of the underlying error
    pub error: String,
}

/// Outcome of a batch run. `success` and `failed` partition the input ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOperationResult {
    pub success: Vec<String>,
    pub failed: Vec<BatchFailure>,
}

impl BatchOperationResult {
    pub fn total(&self) -> usize {
        self.success.len() + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failure_for(&self, id: &str) -> Option<&BatchFailure> {
        self.failed.iter().find(|failure| failure.id == id)
    }
}

/// Advisory progress of the running batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

impl BatchProgress {
    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}
