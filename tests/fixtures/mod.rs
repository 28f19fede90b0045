//! Shared fixtures for the workflow integration tests
#![allow(dead_code)]

use std::sync::Arc;

use courseware_workflow::content::{FaqEntry, GeoConfig, SeoConfig};
use courseware_workflow::{
    Actor, AuditTrailRecorder, ContentKind, ContentRecord, ContentStatus, ContentStatusMachine,
    InMemoryAuditTrail, InMemoryContentStore, PublishingConfig, Role,
};

pub struct Harness {
    pub store: Arc<InMemoryContentStore>,
    pub audit: Arc<InMemoryAuditTrail>,
    pub machine: Arc<ContentStatusMachine>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryContentStore::new());
        let audit = Arc::new(InMemoryAuditTrail::new());
        let machine = Arc::new(ContentStatusMachine::new(store.clone(), audit.clone()));
        Self { store, audit, machine }
    }

    pub fn with_direct_publish() -> Self {
        let store = Arc::new(InMemoryContentStore::new());
        let audit = Arc::new(InMemoryAuditTrail::new());
        let machine = Arc::new(
            ContentStatusMachine::new(store.clone(), audit.clone()).with_direct_publish(true),
        );
        Self { store, audit, machine }
    }

    /// Create a record through the workflow and move it to `status`
    pub async fn seed(&self, record: ContentRecord, status: ContentStatus) -> ContentRecord {
        let admin = admin();
        let draft = self.machine.create(record, &admin).await.unwrap();
        match status {
            ContentStatus::Draft => draft,
            ContentStatus::InReview => self.machine.submit_for_review(&draft, &admin).await.unwrap(),
            ContentStatus::Published => self
                .machine
                .publish_through_review(&draft, &admin)
                .await
                .unwrap(),
            ContentStatus::Archived => self.machine.archive(&draft, &admin).await.unwrap(),
        }
    }

    pub async fn history_len(&self, id: &str) -> usize {
        self.audit.history(id).await.unwrap().len()
    }
}

pub fn admin() -> Actor {
    Actor::new("admin@school.test", Role::Admin)
}

pub fn editor() -> Actor {
    Actor::new("editor@school.test", Role::Editor)
}

pub fn viewer() -> Actor {
    Actor::new("viewer@school.test", Role::Viewer)
}

pub fn ready_publishing(slug: &str) -> PublishingConfig {
    PublishingConfig {
        slug: slug.to_string(),
        seo: SeoConfig {
            title: "Ordering food at a restaurant".to_string(),
            description: "Phrases for ordering, asking for the bill and describing allergies.".to_string(),
        },
        geo: GeoConfig {
            snippet: "Learn the phrases you need when eating out.".to_string(),
            key_points: vec![
                "Asking for a table".to_string(),
                "Ordering dishes".to_string(),
                "Paying the bill".to_string(),
            ],
        },
        faq: vec![FaqEntry {
            question: "Is tipping expected?".to_string(),
            answer: "It depends on the country.".to_string(),
        }],
    }
}

pub fn ready_record(id: &str) -> ContentRecord {
    ContentRecord::new_draft(id, ContentKind::Lesson, "At the restaurant")
        .with_publishing(ready_publishing(id))
}

pub fn bare_record(id: &str) -> ContentRecord {
    ContentRecord::new_draft(id, ContentKind::Lesson, "Untitled")
}
