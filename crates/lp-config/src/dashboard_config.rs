use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DASHBOARD_HOST, DEFAULT_DASHBOARD_PORT,
    DEFAULT_DASHBOARD_TITLE, MIN_PORT,
};

use serde::Deserialize;

/// Where the dashboard itself listens and what it calls itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_DASHBOARD_HOST),
            port: DEFAULT_DASHBOARD_PORT,
            title: String::from(DEFAULT_DASHBOARD_TITLE),
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 lets the OS pick.
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::dashboard(format!(
                "dashboard.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::dashboard("dashboard.host cannot be empty"));
        }

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
