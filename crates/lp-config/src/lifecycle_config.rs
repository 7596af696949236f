use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_READY_POLL_INTERVAL_MS, DEFAULT_REQUIRE_OWNER_MATCH,
    DEFAULT_SHUTDOWN_GRACE_SECS, DEFAULT_STARTUP_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Overall budget for a fresh process to answer its first probe
    pub startup_timeout_secs: u64,
    /// Delay between readiness probes
    pub ready_poll_interval_ms: u64,
    /// Wait after the terminate signal before the process is killed
    pub shutdown_grace_secs: u64,
    /// Only terminate a port holder whose command line names the target script
    pub require_owner_match: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            startup_timeout_secs: DEFAULT_STARTUP_TIMEOUT_SECS,
            ready_poll_interval_ms: DEFAULT_READY_POLL_INTERVAL_MS,
            shutdown_grace_secs: DEFAULT_SHUTDOWN_GRACE_SECS,
            require_owner_match: DEFAULT_REQUIRE_OWNER_MATCH,
        }
    }
}

impl LifecycleConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.startup_timeout_secs == 0 {
            return Err(ConfigError::lifecycle(
                "lifecycle.startup_timeout_secs must be > 0",
            ));
        }

        if self.ready_poll_interval_ms == 0 {
            return Err(ConfigError::lifecycle(
                "lifecycle.ready_poll_interval_ms must be > 0",
            ));
        }

        if self.ready_poll_interval_ms >= self.startup_timeout_secs.saturating_mul(1000) {
            return Err(ConfigError::lifecycle(format!(
                "lifecycle.ready_poll_interval_ms ({}) must be shorter than the startup timeout ({}s)",
                self.ready_poll_interval_ms, self.startup_timeout_secs
            )));
        }

        Ok(())
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }

    pub fn ready_poll_interval(&self) -> Duration {
        Duration::from_millis(self.ready_poll_interval_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
