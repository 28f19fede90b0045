// Courseware Workflow Library - publishing workflow for educational content
// Role-gated status machine, readiness validation, audit trail and batch operations

pub mod audit;
pub mod batch;
pub mod config;
pub mod content;
pub mod error;
pub mod publishing;
pub mod roles;
pub mod store;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use audit::{
    audit_trail_from_settings, AuditError, AuditTrailRecorder, InMemoryAuditTrail,
    JsonFileAuditTrail, ReviewAction, ReviewRecord,
};
pub use batch::{
    BatchAction, BatchFailure, BatchOperationCoordinator, BatchOperationResult, BatchProgress,
    BatchRow, SelectionSet,
};
pub use config::{config, init_config, WorkflowConfig};
pub use content::{ContentKind, ContentRecord, ContentStatus, PublishingConfig};
pub use error::{Result, WorkflowError};
pub use publishing::{severity, stats, validate, PublishingStats, PublishingValidator, Severity, ValidationResult};
pub use roles::{Capability, Role};
pub use store::{ContentStore, InMemoryContentStore, StorageError};
pub use telemetry::{create_workflow_span, generate_correlation_id, init_telemetry};
pub use workflow::{Actor, ContentStatusMachine, WorkflowAction};
