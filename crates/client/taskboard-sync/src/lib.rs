//! Client-side synchronization for the Taskboard service.
//!
//! - [`TaskListController`] owns the local task collection, the loading flag
//!   and the input buffer, and patches them from each remote response
//! - [`HealthMonitor`] probes the health resource on a fixed interval and
//!   publishes the derived [`HealthStatus`](taskboard_core::HealthStatus)
//! - [`TaskBoardSession`] ties both to one UI session and cancels the poller
//!   when the session ends
//!
//! Local state is only ever changed after the remote call it depends on has
//! resolved. Failures are logged and leave state as it was.

pub mod controller;
pub mod health;
pub mod session;
pub mod settings;

pub use controller::{TaskListController, TaskListState};
pub use health::{HealthMonitor, MonitorHandle};
pub use session::TaskBoardSession;
pub use settings::Settings;

pub use taskboard_core::{HealthStatus, Outcome, Task, TaskCollection, TaskId};
pub use taskboard_rest_client::TaskApi;
