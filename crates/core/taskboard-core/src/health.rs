//! Health probe results and the derived status indicator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instance label used when a healthy backend does not name itself.
pub const UNKNOWN_INSTANCE: &str = "unknown";

/// Body of a successful `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Which backend replica answered
    #[serde(default)]
    pub instance: Option<String>,
}

/// Liveness of the remote service as last observed.
///
/// Starts at `Checking` and moves on every probe; there is no terminal state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HealthStatus {
    #[default]
    Checking,
    Online {
        instance: String,
    },
    Offline,
}

impl HealthStatus {
    /// Derive the status from a probe result.
    pub fn from_probe<E>(result: Result<HealthReport, E>) -> Self {
        match result {
            Ok(report) => HealthStatus::Online {
                instance: report
                    .instance
                    .filter(|instance| !instance.is_empty())
                    .unwrap_or_else(|| UNKNOWN_INSTANCE.to_string()),
            },
            Err(_) => HealthStatus::Offline,
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, HealthStatus::Online { .. })
    }

    /// The instance label, empty unless online.
    pub fn instance_label(&self) -> &str {
        match self {
            HealthStatus::Online { instance } => instance,
            _ => "",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Checking => write!(f, "Checking..."),
            HealthStatus::Online { instance } => write!(f, "Online ({})", instance),
            HealthStatus::Offline => write!(f, "Offline"),
        }
    }
}
