// Content status machine: guarded transitions persisted through the store
// and recorded in the audit trail

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::transitions;
use super::types::{Actor, PlannedTransition, TransitionContext, WorkflowAction};
use crate::audit::{AuditTrailRecorder, ReviewRecord};
use crate::config::WorkflowConfig;
use crate::content::{ContentRecord, ContentStatus};
use crate::error::{Result, WorkflowError};
use crate::publishing::{PublishingValidator, ValidationResult};
use crate::roles::{self, Capability};
use crate::store::{ContentStore, StorageError};

pub struct ContentStatusMachine {
    store: Arc<dyn ContentStore>,
    audit: Arc<dyn AuditTrailRecorder>,
    validator: PublishingValidator,
    allow_direct_publish: bool,
}

impl ContentStatusMachine {
    pub fn new(store: Arc<dyn ContentStore>, audit: Arc<dyn AuditTrailRecorder>) -> Self {
        Self {
            store,
            audit,
            validator: PublishingValidator::default(),
            allow_direct_publish: false,
        }
    }

    pub fn from_config(
        store: Arc<dyn ContentStore>,
        audit: Arc<dyn AuditTrailRecorder>,
        config: &WorkflowConfig,
    ) -> Self {
        Self::new(store, audit)
            .with_validator(PublishingValidator::from_settings(&config.publishing))
            .with_direct_publish(config.workflow.allow_direct_publish)
    }

    pub fn with_validator(mut self, validator: PublishingValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_direct_publish(mut self, allow: bool) -> Self {
        self.allow_direct_publish = allow;
        self
    }

    pub fn validator(&self) -> &PublishingValidator {
        &self.validator
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Readiness of a record's publishing metadata, using this machine's thresholds
    pub fn validate(&self, record: &ContentRecord) -> ValidationResult {
        self.validator.validate(&record.publishing)
    }

    /// Store a new record as a draft. Fails if the id is already taken.
    pub async fn create(&self, record: ContentRecord, actor: &Actor) -> Result<ContentRecord> {
        self.authorize(&record.id, WorkflowAction::Create, actor)?;
        match self.store.load_record(&record.id).await {
            Ok(stored) => {
                warn!(
                    content_id = %record.id,
                    actor = %actor.id,
                    status = %stored.status,
                    "Create rejected: id already in use"
                );
                return Err(WorkflowError::AlreadyExists {
                    id: stored.id,
                    status: stored.status,
                });
            }
            Err(StorageError::NotFound { .. }) => {}
            Err(e) => return Err(e.into()),
        }

        let planned = self.plan(&record, WorkflowAction::Create, actor, None)?;
        self.commit(&record, planned, actor).await
    }

    /// Save edits to an existing record.
    ///
    /// Status and `published_at` are taken from the stored copy, so an edit can
    /// never move a record through the lifecycle.
    pub async fn save(&self, edited: &ContentRecord, actor: &Actor) -> Result<ContentRecord> {
        self.apply(edited, WorkflowAction::Edit, actor, None).await
    }

    pub async fn submit_for_review(&self, record: &ContentRecord, actor: &Actor) -> Result<ContentRecord> {
        self.apply(record, WorkflowAction::SubmitForReview, actor, None).await
    }

    pub async fn approve(&self, record: &ContentRecord, actor: &Actor) -> Result<ContentRecord> {
        self.apply(record, WorkflowAction::Approve, actor, None).await
    }

    /// Send back to draft; `comment` is appended to the fixed rejection note
    pub async fn reject(
        &self,
        record: &ContentRecord,
        actor: &Actor,
        comment: Option<&str>,
    ) -> Result<ContentRecord> {
        self.apply(record, WorkflowAction::Reject, actor, comment).await
    }

    pub async fn archive(&self, record: &ContentRecord, actor: &Actor) -> Result<ContentRecord> {
        self.apply(record, WorkflowAction::Archive, actor, None).await
    }

    /// Publish without review. Only available when enabled in configuration.
    pub async fn publish_directly(&self, record: &ContentRecord, actor: &Actor) -> Result<ContentRecord> {
        self.apply(record, WorkflowAction::PublishDirectly, actor, None).await
    }

    /// Draft goes through submit then approve; in-review content is approved.
    ///
    /// Both steps are planned before anything is written, so a draft that
    /// would fail approval is left as a draft. If the approve write itself
    /// fails, the submit step stays committed: the record is left `in_review`
    /// with its `submitted_for_review` entry and the error is returned.
    pub async fn publish_through_review(
        &self,
        record: &ContentRecord,
        actor: &Actor,
    ) -> Result<ContentRecord> {
        self.authorize(&record.id, WorkflowAction::Approve, actor)?;
        let current = self.current(record).await?;

        match current.status {
            ContentStatus::Draft => {
                let submitted = self.plan(&current, WorkflowAction::SubmitForReview, actor, None)?;
                self.plan(&submitted.next, WorkflowAction::Approve, actor, None)?;

                let in_review = self.commit(&current, submitted, actor).await?;
                self.approve(&in_review, actor).await
            }
            _ => self.approve(&current, actor).await,
        }
    }

    /// Remove a record. Its audit history is kept for investigation.
    pub async fn delete(&self, id: &str, actor: &Actor) -> Result<()> {
        if let Err(e) = roles::require(actor.role, Capability::Delete) {
            warn!(content_id = %id, actor = %actor.id, role = %actor.role, "Delete rejected: {}", e);
            return Err(e);
        }
        self.store.delete_record(id).await.map_err(|e| {
            error!(content_id = %id, actor = %actor.id, "Delete failed: {}", e);
            WorkflowError::from(e)
        })?;
        info!(content_id = %id, actor = %actor.id, "Content deleted");
        Ok(())
    }

    pub async fn history(&self, id: &str) -> Result<Vec<ReviewRecord>> {
        Ok(self.audit.history(id).await?)
    }

    pub async fn publish_by_id(&self, id: &str, actor: &Actor) -> Result<ContentRecord> {
        let record = self.store.load_record(id).await?;
        self.publish_through_review(&record, actor).await
    }

    pub async fn archive_by_id(&self, id: &str, actor: &Actor) -> Result<ContentRecord> {
        let record = self.store.load_record(id).await?;
        self.archive(&record, actor).await
    }

    /// Run `action` against the stored status of `record`.
    ///
    /// The caller's copy supplies the edited fields only; status and
    /// `published_at` always come from the store, so a stale copy cannot
    /// skip a step or misreport `from_status` in the audit trail.
    async fn apply(
        &self,
        record: &ContentRecord,
        action: WorkflowAction,
        actor: &Actor,
        comment: Option<&str>,
    ) -> Result<ContentRecord> {
        self.authorize(&record.id, action, actor)?;
        let current = self.current(record).await?;
        let planned = self.plan(&current, action, actor, comment)?;
        self.commit(&current, planned, actor).await
    }

    /// Capability check ahead of any store access
    fn authorize(&self, content_id: &str, action: WorkflowAction, actor: &Actor) -> Result<()> {
        roles::require(actor.role, action.required_capability()).inspect_err(|e| {
            warn!(
                content_id = %content_id,
                action = %action,
                actor = %actor.id,
                role = %actor.role,
                "Transition rejected: {}",
                e
            );
        })
    }

    /// Caller's edits over the stored lifecycle fields
    async fn current(&self, record: &ContentRecord) -> Result<ContentRecord> {
        let stored = self.store.load_record(&record.id).await?;
        let mut merged = record.clone();
        merged.status = stored.status;
        merged.published_at = stored.published_at;
        Ok(merged)
    }

    fn plan(
        &self,
        record: &ContentRecord,
        action: WorkflowAction,
        actor: &Actor,
        comment: Option<&str>,
    ) -> Result<PlannedTransition> {
        let ctx = TransitionContext {
            role: actor.role,
            comment,
            allow_direct_publish: self.allow_direct_publish,
            now: Utc::now(),
        };

        transitions::plan(record, action, &self.validator, &ctx).inspect_err(|e| {
            warn!(
                content_id = %record.id,
                action = %action,
                actor = %actor.id,
                role = %actor.role,
                status = %record.status,
                "Transition rejected: {}",
                e
            );
        })
    }

    /// Persist first, then audit. A failed write leaves no audit entry.
    async fn commit(
        &self,
        record: &ContentRecord,
        planned: PlannedTransition,
        actor: &Actor,
    ) -> Result<ContentRecord> {
        if let Err(e) = self.store.save_record(&planned.next).await {
            error!(
                content_id = %record.id,
                action = %planned.action,
                "Storage write failed; transition discarded: {}",
                e
            );
            return Err(e.into());
        }

        let entry = ReviewRecord::new(
            planned.action.review_action(),
            planned.from_status,
            planned.to_status,
            actor.id.clone(),
            planned.comment.clone(),
            planned.next.updated_at,
        );
        if let Err(e) = self.audit.append(&record.id, entry).await {
            error!(
                content_id = %record.id,
                action = %planned.action,
                "Transition persisted but audit append failed: {}",
                e
            );
            return Err(e.into());
        }

        info!(
            content_id = %record.id,
            action = %planned.action,
            actor = %actor.id,
            from = ?planned.from_status,
            to = %planned.to_status,
            warnings = planned.warnings.len(),
            "Transition applied"
        );
        Ok(planned.next)
    }
}
