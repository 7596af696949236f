mod config;
mod dashboard_config;
mod error;
mod lifecycle_config;
mod log_level;
mod logging_config;
mod probe_config;
mod target_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use dashboard_config::DashboardConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use lifecycle_config::LifecycleConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use probe_config::ProbeConfig;
pub use target_config::TargetConfig;

const CONFIG_DIR_ENV: &str = "LP_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".launchpad";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_DASHBOARD_HOST: &str = "127.0.0.1";
const DEFAULT_DASHBOARD_PORT: u16 = 8501;
const DEFAULT_DASHBOARD_TITLE: &str = "Trading Dashboard";
const MIN_PORT: u16 = 1024;

const DEFAULT_TARGET_URL: &str = "http://192.168.0.73:5000/";
const DEFAULT_TARGET_INTERPRETER: &str = "python3";
const DEFAULT_TARGET_SCRIPT: &str = "app.py";

const DEFAULT_PASSIVE_TIMEOUT_MS: u64 = 2000;
const DEFAULT_STARTUP_PROBE_TIMEOUT_MS: u64 = 5000;

const DEFAULT_STARTUP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_READY_POLL_INTERVAL_MS: u64 = 250;
const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;
const DEFAULT_REQUIRE_OWNER_MATCH: bool = true;

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
