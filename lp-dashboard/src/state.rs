use crate::error::Result as DashboardResult;
use crate::flash::Flash;

use lp_config::Config;
use lp_supervisor::{HealthChecker, ProcessSupervisor, ServerState, SupervisorSettings};

use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex, watch};

/// Shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub title: Arc<str>,
    pub target_url: Arc<str>,
    /// Script name as configured, used in spawn error messages
    pub script: Arc<str>,
    /// Short-timeout checker for render-time probes
    pub passive: HealthChecker,
    /// Held for the whole of an action so clicks run one after another
    pub supervisor: Arc<Mutex<ProcessSupervisor>>,
    pub tracked: watch::Receiver<ServerState>,
    flash: Arc<StdMutex<Option<Flash>>>,
}

impl AppState {
    pub fn new(config: &Config) -> DashboardResult<Self> {
        let settings = SupervisorSettings::from_config(config)?;
        let supervisor = ProcessSupervisor::new(settings)?;
        let passive = HealthChecker::new(config.probe.passive_timeout())?;

        Ok(Self::from_parts(
            &config.dashboard.title,
            &config.target.script,
            passive,
            supervisor,
        ))
    }

    pub fn from_parts(
        title: &str,
        script: &str,
        passive: HealthChecker,
        supervisor: ProcessSupervisor,
    ) -> Self {
        Self {
            title: Arc::from(title),
            target_url: Arc::from(supervisor.settings().url.as_str()),
            script: Arc::from(script),
            passive,
            tracked: supervisor.subscribe(),
            supervisor: Arc::new(Mutex::new(supervisor)),
            flash: Arc::new(StdMutex::new(None)),
        }
    }

    pub fn set_flash(&self, flash: Flash) {
        let mut slot = self.flash.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(flash);
    }

    /// Remove and return the pending flash.
    ///
    /// There is one slot for the whole app, so with several tabs open the
    /// first render after an action shows its message.
    pub fn take_flash(&self) -> Option<Flash> {
        self.flash
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}
