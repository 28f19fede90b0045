// Core types for the content status machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::audit::ReviewAction;
use crate::content::{ContentRecord, ContentStatus};
use crate::roles::{Capability, Role};

/// Already-resolved identity of whoever requests a transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), role }
    }
}

/// Transitions that produce a next record (delete is handled separately)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    Create,
    Edit,
    SubmitForReview,
    Approve,
    Reject,
    Archive,
    /// Skip the review step, when the deployment allows it
    PublishDirectly,
}

impl WorkflowAction {
    pub fn required_capability(&self) -> Capability {
        match self {
            WorkflowAction::Create | WorkflowAction::Edit => Capability::Edit,
            WorkflowAction::SubmitForReview => Capability::SubmitForReview,
            WorkflowAction::Approve | WorkflowAction::Reject => Capability::ApproveReview,
            WorkflowAction::Archive => Capability::Archive,
            WorkflowAction::PublishDirectly => Capability::Publish,
        }
    }

    pub fn review_action(&self) -> ReviewAction {
        match self {
            WorkflowAction::Create => ReviewAction::Created,
            WorkflowAction::Edit => ReviewAction::Edited,
            WorkflowAction::SubmitForReview => ReviewAction::SubmittedForReview,
            WorkflowAction::Approve => ReviewAction::Approved,
            WorkflowAction::Reject => ReviewAction::Rejected,
            WorkflowAction::Archive => ReviewAction::Archived,
            WorkflowAction::PublishDirectly => ReviewAction::Published,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowAction::Create => "create",
            WorkflowAction::Edit => "edit",
            WorkflowAction::SubmitForReview => "submit_for_review",
            WorkflowAction::Approve => "approve",
            WorkflowAction::Reject => "reject",
            WorkflowAction::Archive => "archive",
            WorkflowAction::PublishDirectly => "publish_directly",
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context for planning a transition
#[derive(Debug, Clone)]
pub struct TransitionContext<'a> {
    pub role: Role,
    pub comment: Option<&'a str>,
    pub allow_direct_publish: bool,
    pub now: DateTime<Utc>,
}

/// A transition that passed every guard but has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTransition {
    pub action: WorkflowAction,
    pub from_status: Option<ContentStatus>,
    pub to_status: ContentStatus,
    pub next: ContentRecord,
    pub comment: Option<String>,
    /// Non-blocking validator warnings, surfaced for display
    pub warnings: Vec<String>,
}
