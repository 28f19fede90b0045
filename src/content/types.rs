use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a content record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    /// Being written or revised; the initial status
    Draft,
    /// Submitted and waiting for an approver
    InReview,
    /// Visible to learners
    Published,
    /// Withdrawn from normal flow
    Archived,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::InReview => "in_review",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Lesson,
    Reading,
    Dialog,
    Grammar,
    Vocabulary,
    Exercise,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentKind::Lesson => "lesson",
            ContentKind::Reading => "reading",
            ContentKind::Dialog => "dialog",
            ContentKind::Grammar => "grammar",
            ContentKind::Vocabulary => "vocabulary",
            ContentKind::Exercise => "exercise",
        };
        f.write_str(name)
    }
}

/// Search-engine metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    pub title: String,
    pub description: String,
}

/// Generative-engine metadata: a short answer snippet plus its key points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    pub snippet: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Metadata that gates publication.
///
/// Absent sections deserialize to empty values, so "missing" and "empty"
/// are the same thing to the readiness validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishingConfig {
    pub slug: String,
    pub seo: SeoConfig,
    pub geo: GeoConfig,
    pub faq: Vec<FaqEntry>,
}

/// One unit of publishable content (lesson, reading, dialog, grammar rule, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub kind: ContentKind,
    pub status: ContentStatus,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    /// Set once, when the record first becomes published
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub publishing: PublishingConfig,
}

impl ContentRecord {
    /// Fresh draft with empty publishing metadata
    pub fn new_draft(id: impl Into<String>, kind: ContentKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            status: ContentStatus::Draft,
            title: title.into(),
            updated_at: Utc::now(),
            published_at: None,
            publishing: PublishingConfig::default(),
        }
    }

    pub fn with_publishing(mut self, publishing: PublishingConfig) -> Self {
        self.publishing = publishing;
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }
}
