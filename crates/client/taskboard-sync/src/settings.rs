//! Client settings
//!
//! Sources, lowest precedence first:
//! - built-in defaults
//! - a settings file, `taskboard.toml` by default (optional)
//! - environment variables with the `TASKBOARD_` prefix, including any the
//!   caller loaded from `.env`

use anyhow::{Context, Result, bail};
use bon::Builder;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use taskboard_rest_client::{TaskServiceClient, TaskServiceClientBuilder};
use tracing::debug;
use url::Url;

/// Default settings file name
pub const SETTINGS_FILE: &str = "taskboard.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TASKBOARD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct Settings {
    /// Base URL prefixed to every request path
    #[builder(into, default = default_api_url())]
    pub api_url: String,

    /// Seconds between health probes
    #[builder(default = 30)]
    pub health_interval_secs: u64,

    /// Per-request timeout in seconds; unset means requests may hang
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            health_interval_secs: 30,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from an optional file and an environment.
    ///
    /// `env` replaces the process environment when given. The result is not
    /// validated, so callers can apply overrides first; see
    /// [`validate`](Self::validate).
    pub fn load_from(file: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = file {
            debug!("Reading settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );

        builder
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to parse settings")
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_url).with_context(|| format!("Invalid api_url: {}", self.api_url))?;
        if self.health_interval_secs == 0 {
            bail!("health_interval_secs must be greater than zero");
        }
        if self.request_timeout_secs == Some(0) {
            bail!("request_timeout_secs must be greater than zero when set");
        }
        Ok(())
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Build the HTTP client these settings describe.
    pub fn build_client(&self) -> Result<TaskServiceClient> {
        let mut builder = TaskServiceClientBuilder::new(self.api_url.clone());
        if let Some(timeout) = self.request_timeout() {
            builder = builder.with_timeout(timeout);
        }
        builder
            .build()
            .with_context(|| format!("Failed to build client for {}", self.api_url))
    }
}
