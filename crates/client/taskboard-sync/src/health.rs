//! Periodic health probing.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use taskboard_core::HealthStatus;
use taskboard_rest_client::TaskApi;
use tokio::sync::{oneshot, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Probes the health resource and publishes the derived status.
///
/// Probes may overlap when one outlives the interval. A result is only
/// published if no probe started later has published already.
pub struct HealthMonitor {
    api: Arc<dyn TaskApi>,
    interval: Duration,
    status: watch::Sender<HealthStatus>,
    next_probe: AtomicU64,
    last_published: AtomicU64,
}

impl HealthMonitor {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

    /// A zero `interval` falls back to [`DEFAULT_INTERVAL`](Self::DEFAULT_INTERVAL).
    pub fn new(api: Arc<dyn TaskApi>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!(
                "Health interval must be non-zero, using {:?}",
                Self::DEFAULT_INTERVAL
            );
            Self::DEFAULT_INTERVAL
        } else {
            interval
        };

        let (status, _) = watch::channel(HealthStatus::Checking);
        Self {
            api,
            interval,
            status,
            next_probe: AtomicU64::new(1),
            last_published: AtomicU64::new(0),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn status(&self) -> HealthStatus {
        self.status.borrow().clone()
    }

    /// Receiver that observes every status change.
    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.status.subscribe()
    }

    /// Run one probe and publish its result, unless a probe started after
    /// this one has already published.
    pub async fn probe(&self) -> HealthStatus {
        let seq = self.next_probe.fetch_add(1, Ordering::SeqCst);
        let result = self.api.health().await;
        if let Err(e) = &result {
            debug!("Health probe failed: {}", e);
        }
        let next = HealthStatus::from_probe(result);

        self.status.send_if_modified(|current| {
            // The watch lock serializes publishers
            if seq < self.last_published.load(Ordering::SeqCst) {
                debug!("Discarding result of superseded health probe {}", seq);
                return false;
            }
            self.last_published.store(seq, Ordering::SeqCst);

            if *current == next {
                return false;
            }
            match &next {
                HealthStatus::Online { instance } => info!("Server online ({})", instance),
                HealthStatus::Offline => warn!("Server offline"),
                HealthStatus::Checking => {}
            }
            *current = next.clone();
            true
        });

        next
    }

    /// Spawn the polling task: one probe now, then one per interval until
    /// the returned handle is stopped or dropped. Each tick starts a new
    /// probe whether or not earlier ones have resolved.
    pub fn start(self: &Arc<Self>) -> MonitorHandle {
        let monitor = Arc::clone(self);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(monitor.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut probes = JoinSet::new();

            loop {
                tokio::select! {
                    // Also fires when the handle is dropped
                    _ = &mut shutdown_rx => {
                        debug!("Health monitor received shutdown signal");
                        break;
                    }

                    _ = ticker.tick() => {
                        let monitor = Arc::clone(&monitor);
                        probes.spawn(async move {
                            monitor.probe().await;
                        });
                    }

                    Some(joined) = probes.join_next(), if !probes.is_empty() => {
                        if let Err(e) = joined {
                            if !e.is_cancelled() {
                                warn!("Health probe task failed: {}", e);
                            }
                        }
                    }
                }
            }

            // In-flight probes are abandoned and never publish
            probes.shutdown().await;
        });

        MonitorHandle {
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

/// Owns a running health poller. Dropping it cancels the poller.
#[derive(Debug)]
pub struct MonitorHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop polling and wait for the task to exit. An in-flight probe is
    /// abandoned and does not publish.
    pub async fn stop(mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("Health monitor task failed: {}", e);
                }
            }
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
