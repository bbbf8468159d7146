//! One UI session: the task list, the health poller and their lifetimes.

use crate::controller::TaskListController;
use crate::health::{HealthMonitor, MonitorHandle};
use crate::settings::Settings;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use taskboard_core::Outcome;
use taskboard_rest_client::TaskApi;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Owns the health poller for as long as the session lives.
///
/// Starting a session kicks off the initial list fetch and the first health
/// probe. Ending it, by [`shutdown`](Self::shutdown) or by drop, cancels the
/// poller; sessions never share a timer.
pub struct TaskBoardSession {
    controller: Arc<TaskListController>,
    monitor: Arc<HealthMonitor>,
    monitor_handle: Option<MonitorHandle>,
    initial_load: Option<JoinHandle<Outcome>>,
}

impl TaskBoardSession {
    /// Build a client from `settings` and start a session against it.
    pub fn connect(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let api: Arc<dyn TaskApi> = Arc::new(settings.build_client()?);
        info!("Starting session against {}", settings.api_url);
        Ok(Self::start(api, settings.health_interval()))
    }

    /// Start a session. Must be called from within a Tokio runtime.
    pub fn start(api: Arc<dyn TaskApi>, health_interval: Duration) -> Self {
        let controller = Arc::new(TaskListController::new(Arc::clone(&api)));
        let monitor = Arc::new(HealthMonitor::new(api, health_interval));

        let monitor_handle = monitor.start();
        let initial_load = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.load_all().await }
        });

        Self {
            controller,
            monitor,
            monitor_handle: Some(monitor_handle),
            initial_load: Some(initial_load),
        }
    }

    pub fn controller(&self) -> &Arc<TaskListController> {
        &self.controller
    }

    pub fn monitor(&self) -> &Arc<HealthMonitor> {
        &self.monitor
    }

    pub fn is_polling(&self) -> bool {
        self.monitor_handle
            .as_ref()
            .is_some_and(MonitorHandle::is_running)
    }

    /// Wait for the initial list fetch. Later calls return `Ignored`.
    pub async fn initial_load(&mut self) -> Outcome {
        match self.initial_load.take() {
            Some(task) => match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Initial task load did not complete: {}", e);
                    Outcome::Failed
                }
            },
            None => Outcome::Ignored,
        }
    }

    /// End the session and wait for the health poller to stop.
    pub async fn shutdown(mut self) {
        if let Some(handle) = self.monitor_handle.take() {
            handle.stop().await;
        }
        info!("Session ended");
    }
}
