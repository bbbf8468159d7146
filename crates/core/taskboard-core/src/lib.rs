//! Core domain types for the Taskboard client.
//!
//! This crate holds everything that does not touch the network:
//! - `Task`, `TaskId` and the request bodies sent to the collection resource
//! - `TaskCollection`, the ordered local copy and its reconciliation rules
//! - `HealthStatus`, the state machine derived from health probes

pub mod health;
pub mod task;

pub use health::{HealthReport, HealthStatus, UNKNOWN_INSTANCE};
pub use task::{CreateTaskRequest, Task, TaskCollection, TaskId, UpdateTaskRequest};

/// What a single synchronization operation did to local state.
///
/// Failures are reported here instead of as errors; callers render state,
/// they do not handle request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The remote call succeeded and its result was applied locally
    Applied,
    /// Nothing to do; no request was issued
    Ignored,
    /// The remote call failed; local state is unchanged
    Failed,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}
