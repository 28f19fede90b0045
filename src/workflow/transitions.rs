// Pure transition planning: guards and next-state computation, no IO

use super::types::{PlannedTransition, TransitionContext, WorkflowAction};
use crate::content::{ContentRecord, ContentStatus};
use crate::error::WorkflowError;
use crate::publishing::PublishingValidator;
use crate::roles;

pub const REJECTION_COMMENT: &str = "Needs revision";

/// Check the guards for `action` on `record` and compute the next record.
///
/// Guards run in order: capability, source status, readiness. The input
/// record is never modified.
pub fn plan(
    record: &ContentRecord,
    action: WorkflowAction,
    validator: &PublishingValidator,
    ctx: &TransitionContext<'_>,
) -> Result<PlannedTransition, WorkflowError> {
    roles::require(ctx.role, action.required_capability())?;

    let from = record.status;
    let invalid = || WorkflowError::InvalidTransition { from, action };

    let (from_status, to_status) = match action {
        WorkflowAction::Create => (None, ContentStatus::Draft),
        WorkflowAction::Edit => (Some(from), from),
        WorkflowAction::SubmitForReview => match from {
            ContentStatus::Draft => (Some(from), ContentStatus::InReview),
            _ => return Err(invalid()),
        },
        WorkflowAction::Approve => match from {
            ContentStatus::InReview => (Some(from), ContentStatus::Published),
            _ => return Err(invalid()),
        },
        WorkflowAction::Reject => match from {
            ContentStatus::InReview => (Some(from), ContentStatus::Draft),
            _ => return Err(invalid()),
        },
        WorkflowAction::Archive => match from {
            ContentStatus::Draft | ContentStatus::Published => {
                (Some(from), ContentStatus::Archived)
            }
            _ => return Err(invalid()),
        },
        WorkflowAction::PublishDirectly => match from {
            ContentStatus::Draft | ContentStatus::InReview if ctx.allow_direct_publish => {
                (Some(from), ContentStatus::Published)
            }
            _ => return Err(invalid()),
        },
    };

    let mut warnings = Vec::new();
    if to_status == ContentStatus::Published && from_status != Some(ContentStatus::Published) {
        let result = validator.validate(&record.publishing);
        if !result.is_publishable {
            return Err(WorkflowError::NotPublishable {
                errors: result.errors,
            });
        }
        warnings = result.warnings;
    }

    let mut next = record.clone();
    next.status = to_status;
    next.updated_at = ctx.now;
    match action {
        WorkflowAction::Create => next.published_at = None,
        _ if to_status == ContentStatus::Published && next.published_at.is_none() => {
            next.published_at = Some(ctx.now);
        }
        _ => {}
    }

    let comment = match action {
        WorkflowAction::Reject => Some(match ctx.comment.map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("{REJECTION_COMMENT}: {extra}"),
            _ => REJECTION_COMMENT.to_string(),
        }),
        _ => ctx
            .comment
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    };

    Ok(PlannedTransition {
        action,
        from_status,
        to_status,
        next,
        comment,
        warnings,
    })
}
