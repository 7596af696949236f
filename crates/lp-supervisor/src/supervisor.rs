//! Per-session owner of the target process.

use crate::{
    HealthChecker, PortRelease, ReadyOutcome, ServerProcess, ServerState, SupervisorError,
    SupervisorResult, SupervisorSettings, release_port,
};

use std::time::Duration;

use log::{error, info, warn};
use tokio::sync::watch;

/// Starts, stops and tracks at most one target process.
///
/// Status shown to users comes from probing the URL, not from this state:
/// a process started by an earlier dashboard run is up but untracked here.
pub struct ProcessSupervisor {
    settings: SupervisorSettings,
    checker: HealthChecker,
    process: Option<ServerProcess>,
    state_tx: watch::Sender<ServerState>,
    state_rx: watch::Receiver<ServerState>,
}

impl ProcessSupervisor {
    pub fn new(settings: SupervisorSettings) -> SupervisorResult<Self> {
        let checker = HealthChecker::new(settings.probe_timeout)?;
        let (state_tx, state_rx) = watch::channel(ServerState::Unstarted);

        Ok(Self {
            settings,
            checker,
            process: None,
            state_tx,
            state_rx,
        })
    }

    pub fn settings(&self) -> &SupervisorSettings {
        &self.settings
    }

    /// Spawn the target and wait until it answers.
    ///
    /// A still-running tracked process is stopped first. On a readiness
    /// failure the new child is terminated before returning the error.
    pub async fn start(&mut self) -> SupervisorResult<u32> {
        if self.process.is_some() {
            self.stop().await?;
        }

        self.set_state(ServerState::Starting);

        let mut process = match ServerProcess::spawn(&self.settings.spec) {
            Ok(process) => process,
            Err(e) => {
                error!("Spawn failed: {e}");
                self.set_state(ServerState::Failed {
                    error: e.to_string(),
                });
                return Err(e);
            }
        };
        let pid = process.pid();

        let outcome = self
            .checker
            .wait_ready(
                &self.settings.url,
                self.settings.startup_timeout,
                self.settings.ready_poll_interval,
                || process.has_exited(),
            )
            .await;

        let message = match outcome {
            ReadyOutcome::Ready => {
                info!(
                    "PID {pid} ready at {} after {}ms",
                    self.settings.url,
                    process.uptime().as_millis()
                );
                self.process = Some(process);
                self.set_state(ServerState::Running { pid });
                return Ok(pid);
            }
            ReadyOutcome::TimedOut => format!(
                "{} did not answer within {}s",
                self.settings.url,
                self.settings.startup_timeout.as_secs()
            ),
            ReadyOutcome::Exited => format!("process {pid} exited before answering"),
        };

        warn!("Startup failed: {message}");
        if let Err(e) = process.terminate(self.settings.shutdown_grace).await {
            error!("Failed to terminate PID {pid} after failed startup: {e}");
        }
        self.set_state(ServerState::Failed {
            error: message.clone(),
        });

        Err(SupervisorError::startup_failed(Some(pid), message))
    }

    /// Stop the tracked process. Returns false when nothing was tracked.
    pub async fn stop(&mut self) -> SupervisorResult<bool> {
        let Some(process) = self.process.take() else {
            return Ok(false);
        };

        let pid = process.pid();
        self.set_state(ServerState::Stopping);
        info!("Stopping `{}` (PID {pid})", process.command());

        let result = process.terminate(self.settings.shutdown_grace).await;
        self.set_state(ServerState::Stopped);

        result.map(|outcome| {
            info!("PID {pid} stopped: {outcome:?}");
            true
        })
    }

    /// Free the target port from listeners left by other sessions.
    pub async fn release_port(&self) -> PortRelease {
        release_port(
            self.settings.port,
            &self.settings.owner_hint,
            self.settings.require_owner_match,
            self.settings.shutdown_grace,
        )
        .await
    }

    /// Whether the tracked process is alive. Forgets it once it has exited.
    pub fn is_running(&mut self) -> bool {
        let exited = match self.process.as_mut() {
            Some(process) => process.has_exited(),
            None => return false,
        };

        if exited {
            if let Some(process) = self.process.take() {
                warn!("PID {} exited on its own", process.pid());
            }
            self.set_state(ServerState::Stopped);
        }

        !exited
    }

    /// Pid of the tracked process, if any.
    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().map(ServerProcess::pid)
    }

    /// How long the tracked process has been up.
    pub fn uptime(&self) -> Option<Duration> {
        self.process.as_ref().map(ServerProcess::uptime)
    }

    pub fn state(&self) -> ServerState {
        self.state_rx.borrow().clone()
    }

    /// Observe state changes without holding the supervisor.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state_rx.clone()
    }

    /// Stop on dashboard exit, logging instead of failing.
    pub async fn shutdown(&mut self) {
        match self.stop().await {
            Ok(true) => info!("Target stopped on shutdown"),
            Ok(false) => {}
            Err(e) => error!("Failed to stop target on shutdown: {e}"),
        }
    }

    fn set_state(&self, state: ServerState) {
        info!("Target state: {state}");
        let _ = self.state_tx.send(state);
    }
}
