//! Task records and the local task collection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, server-assigned task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single to-do item as represented by the collection resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskPayload")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
}

/// Wire shape of a task. Document-store backends report the identifier as
/// `_id`, some alongside a virtual `id`; `_id` wins when both are present.
#[derive(Deserialize)]
struct TaskPayload {
    #[serde(rename = "_id")]
    document_id: Option<TaskId>,
    id: Option<TaskId>,
    title: String,
    #[serde(default)]
    completed: bool,
}

impl TryFrom<TaskPayload> for Task {
    type Error = &'static str;

    fn try_from(payload: TaskPayload) -> Result<Self, Self::Error> {
        let id = payload
            .document_id
            .or(payload.id)
            .ok_or("missing field `id` or `_id`")?;
        Ok(Self {
            id,
            title: payload.title,
            completed: payload.completed,
        })
    }
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

/// Body of `PUT /api/tasks/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub completed: bool,
}

impl UpdateTaskRequest {
    /// Request that flips the given completion flag.
    pub fn toggle(current_completed: bool) -> Self {
        Self {
            completed: !current_completed,
        }
    }
}

/// Ordered local copy of the remote task collection.
///
/// Every mutation keeps at most one task per identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole sequence, preserving the order given.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Insert a newly created task at the front.
    pub fn prepend(&mut self, task: Task) {
        self.tasks.retain(|existing| existing.id != task.id);
        self.tasks.insert(0, task);
    }

    /// Put `task` in the slot of the task listed under `id`, keeping its
    /// position and its id. Returns false when `id` is not listed, in which
    /// case nothing changes.
    pub fn replace_by_id(&mut self, id: &TaskId, mut task: Task) -> bool {
        match self.tasks.iter_mut().find(|existing| &existing.id == id) {
            Some(slot) => {
                task.id = id.clone();
                *slot = task;
                true
            }
            None => false,
        }
    }

    /// Remove the task with the given id. Returns false when it was absent.
    pub fn remove(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        self.tasks.len() != before
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl From<Vec<Task>> for TaskCollection {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
