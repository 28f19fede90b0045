// Batch coordinator: drives the status machine over many ids with
// independent per-id outcomes

use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn, Instrument};

use super::selection::SelectionSet;
use super::types::{BatchAction, BatchFailure, BatchOperationResult, BatchProgress, BatchRow};
use crate::config::BatchSettings;
use crate::content::ContentRecord;
use crate::error::Result;
use crate::telemetry::{create_workflow_span, generate_correlation_id};
use crate::workflow::{Actor, ContentStatusMachine};

pub struct BatchOperationCoordinator {
    machine: Arc<ContentStatusMachine>,
    selection: SelectionSet,
    max_concurrency: usize,
    progress: watch::Sender<BatchProgress>,
}

impl BatchOperationCoordinator {
    pub fn new(machine: Arc<ContentStatusMachine>) -> Self {
        Self::from_settings(machine, &BatchSettings::default())
    }

    pub fn from_settings(machine: Arc<ContentStatusMachine>, settings: &BatchSettings) -> Self {
        let (progress, _) = watch::channel(BatchProgress::default());
        Self {
            machine,
            selection: SelectionSet::default(),
            max_concurrency: settings.max_concurrency.max(1),
            progress,
        }
    }

    pub fn with_rows(mut self, rows: Vec<BatchRow>) -> Self {
        self.selection.set_rows(rows);
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn set_rows(&mut self, rows: Vec<BatchRow>) {
        self.selection.set_rows(rows);
    }

    pub fn select_all(&mut self) {
        self.selection.select_all();
    }

    pub fn select_row(&mut self, id: &str, index: usize, extend_range: bool) {
        self.selection.select_row(id, index, extend_range);
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn selected_for_publish(&self) -> Vec<String> {
        self.selection.selected_for_publish()
    }

    pub fn selected_for_archive(&self) -> Vec<String> {
        self.selection.selected_for_archive()
    }

    /// Receiver for `{completed, total}` updates of the current run
    pub fn progress(&self) -> watch::Receiver<BatchProgress> {
        self.progress.subscribe()
    }

    /// Run `action` over the eligible part of the current selection.
    /// The selection itself is left for the caller to clear.
    pub async fn run_selected(&self, action: BatchAction, actor: &Actor) -> BatchOperationResult {
        let ids = match action {
            BatchAction::Publish => self.selection.selected_for_publish(),
            BatchAction::Archive => self.selection.selected_for_archive(),
        };
        self.run_batch(action, &ids, actor).await
    }

    /// Apply `action` to every id independently.
    ///
    /// Duplicate ids collapse to their first occurrence. Results come back in
    /// input order whatever order the ids complete in.
    pub async fn run_batch(
        &self,
        action: BatchAction,
        ids: &[String],
        actor: &Actor,
    ) -> BatchOperationResult {
        let correlation_id = generate_correlation_id();
        let span = create_workflow_span(
            &format!("batch_{action}"),
            None,
            Some(&actor.id),
            Some(&correlation_id),
        );

        self.execute(action, dedupe(ids), actor).instrument(span).await
    }

    async fn execute(
        &self,
        action: BatchAction,
        ids: Vec<String>,
        actor: &Actor,
    ) -> BatchOperationResult {
        let total = ids.len();
        self.progress.send_replace(BatchProgress { completed: 0, total });
        info!(action = %action, total, concurrency = self.max_concurrency, "Batch started");

        let mut outcomes = Vec::with_capacity(total);
        let mut pending = stream::iter(ids.into_iter().enumerate())
            .map(|(position, id)| async move {
                let outcome = self.apply_one(action, &id, actor).await;
                (position, id, outcome)
            })
            .buffer_unordered(self.max_concurrency);

        while let Some(outcome) = pending.next().await {
            outcomes.push(outcome);
            self.progress.send_replace(BatchProgress {
                completed: outcomes.len(),
                total,
            });
        }
        outcomes.sort_by_key(|(position, _, _)| *position);

        let mut result = BatchOperationResult::default();
        for (_, id, outcome) in outcomes {
            match outcome {
                Ok(_) => result.success.push(id),
                Err(e) => {
                    warn!(content_id = %id, action = %action, "Batch item failed: {}", e);
                    result.failed.push(BatchFailure {
                        id,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            action = %action,
            succeeded = result.success.len(),
            failed = result.failed.len(),
            "Batch finished"
        );
        result
    }

    async fn apply_one(&self, action: BatchAction, id: &str, actor: &Actor) -> Result<ContentRecord> {
        match action {
            BatchAction::Publish => self.machine.publish_by_id(id, actor).await,
            BatchAction::Archive => self.machine.archive_by_id(id, actor).await,
        }
    }
}

fn dedupe(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if seen.insert(id.as_str()) {
            unique.push(id.clone());
        }
    }
    unique
}
