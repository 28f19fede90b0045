// Publishing readiness - decides whether a record may become published

pub mod stats;
pub mod validator;

pub use stats::{stats, PublishingStats};
pub use validator::{
    severity, validate, Finding, FindingLevel, PublishingValidator, ReadinessRule, Severity,
    ValidationResult,
};
