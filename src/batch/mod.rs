// Batch operations over many content records

pub mod coordinator;
pub mod selection;
pub mod types;

pub use coordinator::BatchOperationCoordinator;
pub use selection::SelectionSet;
pub use types::{BatchAction, BatchFailure, BatchOperationResult, BatchProgress, BatchRow};
