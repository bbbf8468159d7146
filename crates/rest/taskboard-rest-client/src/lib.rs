//! HTTP client for the Taskboard REST service.
//!
//! The service exposes a task collection under `/api/tasks` and a liveness
//! probe under `/health`. [`TaskApi`] is the seam the synchronization layer
//! depends on; [`TaskServiceClient`] is the reqwest implementation.
//!
//! ```rust,no_run
//! use taskboard_rest_client::{TaskApi, TaskServiceClientBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TaskServiceClientBuilder::new("http://localhost:3000").build()?;
//!     for task in client.list_tasks().await? {
//!         println!("{} {}", task.id, task.title);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use taskboard_core::{CreateTaskRequest, HealthReport, Task, TaskId, UpdateTaskRequest};

pub mod client;
pub mod error;

pub use client::{TaskServiceClient, TaskServiceClientBuilder};
pub use error::{ClientError, ClientResult};

/// Remote operations against the task service.
///
/// Every method is one round trip. Any failure, transport or status, comes
/// back as a `ClientError`.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> ClientResult<HealthReport>;

    /// `GET /api/tasks`
    async fn list_tasks(&self) -> ClientResult<Vec<Task>>;

    /// `POST /api/tasks`
    async fn create_task(&self, request: CreateTaskRequest) -> ClientResult<Task>;

    /// `PUT /api/tasks/{id}`
    async fn update_task(&self, id: &TaskId, request: UpdateTaskRequest) -> ClientResult<Task>;

    /// `DELETE /api/tasks/{id}`; the response body is ignored
    async fn delete_task(&self, id: &TaskId) -> ClientResult<()>;
}
