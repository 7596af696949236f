use crate::{ProcessSpec, SupervisorResult};

use std::time::Duration;

use lp_config::Config;

/// Everything the supervisor needs, resolved from config.
#[derive(Debug, Clone)]
pub struct SupervisorSettings {
    pub spec: ProcessSpec,
    /// URL probed for readiness
    pub url: String,
    /// Port the target binds
    pub port: u16,
    /// Substring identifying the target in a process command line
    pub owner_hint: String,
    pub probe_timeout: Duration,
    pub startup_timeout: Duration,
    pub ready_poll_interval: Duration,
    pub shutdown_grace: Duration,
    pub require_owner_match: bool,
}

impl SupervisorSettings {
    pub fn from_config(config: &Config) -> SupervisorResult<Self> {
        let script = config.script_path()?;

        let mut spec =
            ProcessSpec::new(&config.target.interpreter).arg(script.to_string_lossy());
        for arg in &config.target.args {
            spec = spec.arg(arg);
        }
        if let Some(dir) = script.parent() {
            spec = spec.working_dir(dir);
        }

        Ok(Self {
            spec,
            url: config.target.url.clone(),
            port: config.target.port()?,
            owner_hint: script.to_string_lossy().into_owned(),
            probe_timeout: config.probe.startup_timeout(),
            startup_timeout: config.lifecycle.startup_timeout(),
            ready_poll_interval: config.lifecycle.ready_poll_interval(),
            shutdown_grace: config.lifecycle.shutdown_grace(),
            require_owner_match: config.lifecycle.require_owner_match,
        })
    }
}
