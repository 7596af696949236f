use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_PASSIVE_TIMEOUT_MS, DEFAULT_STARTUP_PROBE_TIMEOUT_MS,
};

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Timeout for the status probe run on every page render
    pub passive_timeout_ms: u64,
    /// Timeout for each probe while waiting for a fresh start
    pub startup_timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            passive_timeout_ms: DEFAULT_PASSIVE_TIMEOUT_MS,
            startup_timeout_ms: DEFAULT_STARTUP_PROBE_TIMEOUT_MS,
        }
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.passive_timeout_ms == 0 {
            return Err(ConfigError::probe("probe.passive_timeout_ms must be > 0"));
        }

        if self.startup_timeout_ms == 0 {
            return Err(ConfigError::probe("probe.startup_timeout_ms must be > 0"));
        }

        Ok(())
    }

    pub fn passive_timeout(&self) -> Duration {
        Duration::from_millis(self.passive_timeout_ms)
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }
}
