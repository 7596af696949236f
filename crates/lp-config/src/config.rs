use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DashboardConfig, LifecycleConfig, LoggingConfig, ProbeConfig, TargetConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub dashboard: DashboardConfig,
    pub target: TargetConfig,
    pub probe: ProbeConfig,
    pub lifecycle: LifecycleConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Load `.env` from the working directory if present
    /// 2. Resolve the config directory (LP_CONFIG_DIR, else ./.launchpad/)
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply LP_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let _ = dotenvy::dotenv();

        let config_dir = Self::config_dir()?;
        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: LP_CONFIG_DIR env var > ./.launchpad/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.dashboard.validate()?;
        self.target.validate()?;
        self.probe.validate()?;
        self.lifecycle.validate()?;

        let log_dir = Path::new(&self.logging.dir);
        if log_dir.is_absolute() || self.logging.dir.contains("..") {
            return Err(ConfigError::logging(
                "logging.dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Absolute path of the script the target is launched with.
    pub fn script_path(&self) -> ConfigErrorResult<PathBuf> {
        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(self.target.script_path(&cwd))
    }

    /// Absolute path of the log file, if logging to a file.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref filename) => {
                let log_dir = Self::config_dir()?.join(&self.logging.dir);
                Ok(Some(log_dir.join(filename)))
            }
            None => Ok(None),
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  dashboard: {} ({})",
            self.dashboard.bind_addr(),
            self.dashboard.title
        );
        info!(
            "  target: {} via {} {}",
            self.target.url, self.target.interpreter, self.target.script
        );
        info!(
            "  probe: passive={}ms, startup={}ms",
            self.probe.passive_timeout_ms, self.probe.startup_timeout_ms
        );
        info!(
            "  lifecycle: startup={}s, poll={}ms, grace={}s, owner_match={}",
            self.lifecycle.startup_timeout_secs,
            self.lifecycle.ready_poll_interval_ms,
            self.lifecycle.shutdown_grace_secs,
            self.lifecycle.require_owner_match
        );
        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Dashboard
        Self::apply_env_string("LP_DASHBOARD_HOST", &mut self.dashboard.host);
        Self::apply_env_parse("LP_DASHBOARD_PORT", &mut self.dashboard.port);
        Self::apply_env_string("LP_DASHBOARD_TITLE", &mut self.dashboard.title);

        // Target
        Self::apply_env_string("LP_TARGET_URL", &mut self.target.url);
        Self::apply_env_string("LP_TARGET_INTERPRETER", &mut self.target.interpreter);
        Self::apply_env_string("LP_TARGET_SCRIPT", &mut self.target.script);

        // Probe
        Self::apply_env_parse(
            "LP_PROBE_PASSIVE_TIMEOUT_MS",
            &mut self.probe.passive_timeout_ms,
        );
        Self::apply_env_parse(
            "LP_PROBE_STARTUP_TIMEOUT_MS",
            &mut self.probe.startup_timeout_ms,
        );

        // Lifecycle
        Self::apply_env_parse(
            "LP_STARTUP_TIMEOUT_SECS",
            &mut self.lifecycle.startup_timeout_secs,
        );
        Self::apply_env_parse(
            "LP_READY_POLL_INTERVAL_MS",
            &mut self.lifecycle.ready_poll_interval_ms,
        );
        Self::apply_env_parse(
            "LP_SHUTDOWN_GRACE_SECS",
            &mut self.lifecycle.shutdown_grace_secs,
        );
        Self::apply_env_bool(
            "LP_REQUIRE_OWNER_MATCH",
            &mut self.lifecycle.require_owner_match,
        );

        // Logging
        Self::apply_env_parse("LP_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("LP_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_string("LP_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("LP_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1", anything else is false
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored and the previous value kept
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
