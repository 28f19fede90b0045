// Content lifecycle: draft -> in_review -> published -> archived, gated by
// role capabilities and publishing readiness

pub mod machine;
pub mod transitions;
pub mod types;

pub use machine::ContentStatusMachine;
pub use transitions::{plan, REJECTION_COMMENT};
pub use types::{Actor, PlannedTransition, TransitionContext, WorkflowAction};
