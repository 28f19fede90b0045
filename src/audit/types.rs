use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::content::ContentStatus;

/// Audit label for a transition. One fixed label per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Created,
    Edited,
    SubmittedForReview,
    Approved,
    Rejected,
    Published,
    Archived,
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReviewAction::Created => "created",
            ReviewAction::Edited => "edited",
            ReviewAction::SubmittedForReview => "submitted_for_review",
            ReviewAction::Approved => "approved",
            ReviewAction::Rejected => "rejected",
            ReviewAction::Published => "published",
            ReviewAction::Archived => "archived",
        };
        f.write_str(label)
    }
}

/// Immutable audit entry describing one successful transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: Uuid,
    pub action: ReviewAction,
    /// `None` when the record was just created
    pub from_status: Option<ContentStatus>,
    pub to_status: ContentStatus,
    pub actor: String,
    pub comment: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ReviewRecord {
    pub fn new(
        action: ReviewAction,
        from_status: Option<ContentStatus>,
        to_status: ContentStatus,
        actor: impl Into<String>,
        comment: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            from_status,
            to_status,
            actor: actor.into(),
            comment,
            timestamp,
        }
    }
}
