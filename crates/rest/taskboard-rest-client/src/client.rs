//! reqwest implementation of [`TaskApi`]

use crate::TaskApi;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use std::time::Duration;
use taskboard_core::{CreateTaskRequest, HealthReport, Task, TaskId, UpdateTaskRequest};
use tracing::debug;
use url::Url;

const HEALTH_PATH: &[&str] = &["health"];
const TASKS_PATH: &[&str] = &["api", "tasks"];

/// Client for the task service
#[derive(Debug, Clone)]
pub struct TaskServiceClient {
    client: reqwest::Client,
    base_url: Url,
}

/// Builder for the task service client
pub struct TaskServiceClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl TaskServiceClientBuilder {
    /// Create a new client builder with the required base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set a timeout applied to every request. Without one, a hung request
    /// never resolves.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// underlying HTTP client fails to build
    pub fn build(self) -> ClientResult<TaskServiceClient> {
        let base_url = Url::parse(&self.base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ClientError::invalid_url(self.base_url));
        }

        let mut client_builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        Ok(TaskServiceClient {
            client: client_builder.build()?,
            base_url,
        })
    }
}

impl TaskServiceClient {
    /// Base URL every request path is appended to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, keeping any prefix it carries.
    /// Each segment is percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::invalid_url(self.base_url.as_str()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn task_endpoint(&self, id: &TaskId) -> ClientResult<Url> {
        let mut segments: Vec<&str> = TASKS_PATH.iter().copied().collect();
        segments.push(id.as_str());
        self.endpoint(&segments)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = request.send().await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::status(status.as_u16(), error_text))
        }
    }
}

#[async_trait]
impl TaskApi for TaskServiceClient {
    async fn health(&self) -> ClientResult<HealthReport> {
        let url = self.endpoint(HEALTH_PATH)?;
        debug!("GET {}", url);

        let response = self.execute(self.client.get(url)).await?;
        let body = response.text().await?;

        // Any success counts as healthy; only a JSON object can name the instance
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        let url = self.endpoint(TASKS_PATH)?;
        debug!("GET {}", url);

        let response = self.execute(self.client.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn create_task(&self, request: CreateTaskRequest) -> ClientResult<Task> {
        let url = self.endpoint(TASKS_PATH)?;
        debug!("POST {}", url);

        let response = self.execute(self.client.post(url).json(&request)).await?;
        Ok(response.json().await?)
    }

    async fn update_task(&self, id: &TaskId, request: UpdateTaskRequest) -> ClientResult<Task> {
        let url = self.task_endpoint(id)?;
        debug!("PUT {}", url);

        let response = self.execute(self.client.put(url).json(&request)).await?;
        Ok(response.json().await?)
    }

    async fn delete_task(&self, id: &TaskId) -> ClientResult<()> {
        let url = self.task_endpoint(id)?;
        debug!("DELETE {}", url);

        self.execute(self.client.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> TaskServiceClient {
        TaskServiceClientBuilder::new(base)
            .build()
            .expect("Failed to build client")
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = client("http://localhost:3000");
        assert_eq!(
            client.endpoint(TASKS_PATH).unwrap().as_str(),
            "http://localhost:3000/api/tasks"
        );
        assert_eq!(
            client.endpoint(HEALTH_PATH).unwrap().as_str(),
            "http://localhost:3000/health"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_prefix() {
        for base in ["http://lb.internal/taskboard", "http://lb.internal/taskboard/"] {
            assert_eq!(
                client(base).endpoint(TASKS_PATH).unwrap().as_str(),
                "http://lb.internal/taskboard/api/tasks"
            );
        }
    }

    #[test]
    fn test_task_endpoint_encodes_id() {
        let url = client("http://localhost:3000")
            .task_endpoint(&TaskId::from("a/b c"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/tasks/a%2Fb%20c");
    }

    #[test]
    fn test_builder_rejects_bad_urls() {
        for base in ["", "localhost:3000", "mailto:ops@example.com", "ftp://host"] {
            assert!(
                TaskServiceClientBuilder::new(base).build().is_err(),
                "{base} should be rejected"
            );
        }
    }

    #[test]
    fn test_builder_with_timeout() {
        let client = TaskServiceClientBuilder::new("https://tasks.example.com")
            .with_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build client");
        assert_eq!(client.base_url().host_str(), Some("tasks.example.com"));
    }
}
