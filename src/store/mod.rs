// Storage collaborator interface
//
// The workflow core never owns content records; it reads and writes them
// through this port and only ever computes the next state.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::content::{ContentKind, ContentRecord};

pub use memory::InMemoryContentStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("content record '{id}' not found")]
    NotFound { id: String },

    #[error("failed to write content record '{id}': {message}")]
    WriteFailed { id: String, message: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistent store for content records
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn load_record(&self, id: &str) -> Result<ContentRecord, StorageError>;

    /// Insert or replace by id
    async fn save_record(&self, record: &ContentRecord) -> Result<(), StorageError>;

    async fn delete_record(&self, id: &str) -> Result<(), StorageError>;

    /// All records, optionally restricted to one content kind
    async fn load_all(&self, kind: Option<ContentKind>) -> Result<Vec<ContentRecord>, StorageError>;
}
