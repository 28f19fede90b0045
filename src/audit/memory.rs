use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;

use super::{AuditError, AuditTrailRecorder, ReviewRecord};

/// Process-local audit trail
#[derive(Debug, Default)]
pub struct InMemoryAuditTrail {
    entries: RwLock<HashMap<String, VecDeque<ReviewRecord>>>,
}

impl InMemoryAuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of content ids with at least one entry
    pub async fn tracked_ids(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl AuditTrailRecorder for InMemoryAuditTrail {
    async fn append(&self, content_id: &str, record: ReviewRecord) -> Result<(), AuditError> {
        self.entries
            .write()
            .await
            .entry(content_id.to_string())
            .or_default()
            .push_front(record);
        Ok(())
    }

    async fn history(&self, content_id: &str) -> Result<Vec<ReviewRecord>, AuditError> {
        Ok(self
            .entries
            .read()
            .await
            .get(content_id)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default())
    }
}
