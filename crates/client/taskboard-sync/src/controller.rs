//! Local task list kept in step with the remote collection resource.

use std::sync::Arc;
use taskboard_core::{CreateTaskRequest, Outcome, Task, TaskCollection, TaskId, UpdateTaskRequest};
use taskboard_rest_client::TaskApi;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Everything the task list view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListState {
    pub tasks: TaskCollection,
    /// Set while a full list fetch is in flight
    pub loading: bool,
    /// Text typed for the next task
    pub input: String,
}

/// Owns the task list state and issues one remote call per user action.
///
/// The state lock is never held across a network call. Overlapping
/// operations are not sequenced: each applies its patch to the collection
/// as it stands when its own response arrives.
pub struct TaskListController {
    api: Arc<dyn TaskApi>,
    state: RwLock<TaskListState>,
}

impl TaskListController {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            state: RwLock::new(TaskListState::default()),
        }
    }

    pub async fn snapshot(&self) -> TaskListState {
        self.state.read().await.clone()
    }

    pub async fn tasks(&self) -> TaskCollection {
        self.state.read().await.tasks.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn input(&self) -> String {
        self.state.read().await.input.clone()
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.state.write().await.input = text.into();
    }

    pub async fn push_input(&self, c: char) {
        self.state.write().await.input.push(c);
    }

    pub async fn pop_input(&self) {
        self.state.write().await.input.pop();
    }

    /// Fetch the whole collection and replace the local copy with it.
    ///
    /// `loading` is cleared once the call resolves, whatever the result.
    pub async fn load_all(&self) -> Outcome {
        self.state.write().await.loading = true;

        let result = self.api.list_tasks().await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(tasks) => {
                info!("Loaded {} tasks", tasks.len());
                state.tasks.replace_all(tasks);
                Outcome::Applied
            }
            Err(e) => {
                error!("Error fetching tasks: {}", e);
                Outcome::Failed
            }
        }
    }

    /// Create a task and put it at the front of the list.
    ///
    /// Blank titles are ignored without a request. The input buffer is
    /// cleared only when the server confirms the task.
    pub async fn add_task(&self, title: &str) -> Outcome {
        if title.trim().is_empty() {
            return Outcome::Ignored;
        }

        let request = CreateTaskRequest {
            title: title.to_string(),
        };

        match self.api.create_task(request).await {
            Ok(task) => {
                info!("Created task {}", task.id);
                let mut state = self.state.write().await;
                state.tasks.prepend(task);
                state.input.clear();
                Outcome::Applied
            }
            Err(e) => {
                error!("Error adding task: {}", e);
                Outcome::Failed
            }
        }
    }

    /// Submit the input buffer as a new task.
    pub async fn submit_input(&self) -> Outcome {
        let title = self.input().await;
        self.add_task(&title).await
    }

    /// Flip the completion flag of a task and adopt the server's copy in the
    /// slot of `id`. The local copy keeps `id` whatever id the response
    /// carries.
    pub async fn toggle_task(&self, id: &TaskId, current_completed: bool) -> Outcome {
        let request = UpdateTaskRequest::toggle(current_completed);

        match self.api.update_task(id, request).await {
            Ok(task) => {
                let completed = task.completed;
                if self.state.write().await.tasks.replace_by_id(id, task) {
                    info!("Task {} completed={}", id, completed);
                } else {
                    debug!("Updated task {} is no longer listed", id);
                }
                Outcome::Applied
            }
            Err(e) => {
                error!("Error updating task: {}", e);
                Outcome::Failed
            }
        }
    }

    /// Convenience for toggling a task already in the list.
    pub async fn toggle(&self, task: &Task) -> Outcome {
        self.toggle_task(&task.id, task.completed).await
    }

    pub async fn delete_task(&self, id: &TaskId) -> Outcome {
        match self.api.delete_task(id).await {
            Ok(()) => {
                if self.state.write().await.tasks.remove(id) {
                    info!("Deleted task {}", id);
                } else {
                    debug!("Deleted task {} was not listed", id);
                }
                Outcome::Applied
            }
            Err(e) => {
                error!("Error deleting task: {}", e);
                Outcome::Failed
            }
        }
    }
}
