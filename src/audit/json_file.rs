use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::{AuditError, AuditTrailRecorder, ReviewRecord};

const FORMAT_VERSION: u32 = 1;

/// On-disk layout of one content id's history
#[derive(Debug, Serialize, Deserialize)]
struct HistoryDocument {
    version: u32,
    content_id: String,
    /// Newest first
    records: Vec<ReviewRecord>,
}

/// Durable audit trail: one JSON document per content id.
///
/// Writes go to a temp file that is then renamed over the old document, so
/// a crash mid-write leaves the previous history intact.
#[derive(Debug)]
pub struct JsonFileAuditTrail {
    directory: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileAuditTrail {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn document_path(&self, content_id: &str) -> PathBuf {
        self.directory.join(format!("{}.json", file_stem(content_id)))
    }

    async fn read_document(&self, content_id: &str) -> Result<Option<HistoryDocument>, AuditError> {
        let path = self.document_path(content_id);
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let document: HistoryDocument =
            serde_json::from_slice(&raw).map_err(|e| AuditError::Corrupt {
                content_id: content_id.to_string(),
                reason: e.to_string(),
            })?;

        if document.content_id != content_id {
            return Err(AuditError::Corrupt {
                content_id: content_id.to_string(),
                reason: format!("file belongs to '{}'", document.content_id),
            });
        }
        if document.version != FORMAT_VERSION {
            return Err(AuditError::Corrupt {
                content_id: content_id.to_string(),
                reason: format!(
                    "unsupported format version {} (expected {FORMAT_VERSION})",
                    document.version
                ),
            });
        }

        Ok(Some(document))
    }
}

#[async_trait]
impl AuditTrailRecorder for JsonFileAuditTrail {
    async fn append(&self, content_id: &str, record: ReviewRecord) -> Result<(), AuditError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self
            .read_document(content_id)
            .await?
            .unwrap_or_else(|| HistoryDocument {
                version: FORMAT_VERSION,
                content_id: content_id.to_string(),
                records: Vec::new(),
            });
        document.records.insert(0, record);

        fs::create_dir_all(&self.directory).await?;
        let path = self.document_path(content_id);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec_pretty(&document)?).await?;
        fs::rename(&tmp_path, &path).await?;

        debug!(
            content_id = %content_id,
            entries = document.records.len(),
            path = %path.display(),
            "Audit history persisted"
        );
        Ok(())
    }

    async fn history(&self, content_id: &str) -> Result<Vec<ReviewRecord>, AuditError> {
        Ok(self
            .read_document(content_id)
            .await?
            .map(|document| document.records)
            .unwrap_or_default())
    }
}

/// Content ids are opaque; escape anything that is not filename-safe
fn file_stem(content_id: &str) -> String {
    let mut stem = String::with_capacity(content_id.len());
    for byte in content_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("%{byte:02x}"));
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_escapes_unsafe_characters() {
        assert_eq!(file_stem("lesson-1_a"), "lesson-1_a");
        assert_eq!(file_stem("../etc/passwd"), "%2e%2e%2fetc%2fpasswd");
        assert_eq!(file_stem("a b"), "a%20b");
    }
}
