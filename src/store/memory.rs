use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{ContentStore, StorageError};
use crate::content::{ContentKind, ContentRecord};

/// In-memory content store with write-failure injection
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    records: RwLock<HashMap<String, ContentRecord>>,
    failing_writes: RwLock<HashMap<String, String>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store without going through the workflow
    pub async fn with_records(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.write().await;
            for record in records {
                map.insert(record.id.clone(), record);
            }
        }
        store
    }

    /// Make every subsequent write or delete for `id` fail with `message`
    pub async fn fail_writes_for(&self, id: &str, message: &str) {
        self.failing_writes
            .write()
            .await
            .insert(id.to_string(), message.to_string());
    }

    pub async fn restore_writes_for(&self, id: &str) {
        self.failing_writes.write().await.remove(id);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn check_writable(&self, id: &str) -> Result<(), StorageError> {
        match self.failing_writes.read().await.get(id) {
            Some(message) => Err(StorageError::WriteFailed {
                id: id.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn load_record(&self, id: &str) -> Result<ContentRecord, StorageError> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound { id: id.to_string() })
    }

    async fn save_record(&self, record: &ContentRecord) -> Result<(), StorageError> {
        self.check_writable(&record.id).await?;
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete_record(&self, id: &str) -> Result<(), StorageError> {
        self.check_writable(id).await?;
        self.records
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound { id: id.to_string() })
    }

    async fn load_all(&self, kind: Option<ContentKind>) -> Result<Vec<ContentRecord>, StorageError> {
        let mut records: Vec<ContentRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|record| kind.map_or(true, |kind| record.kind == kind))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }
}
