//! The spawned target process.

use crate::{SupervisorError, SupervisorResult, signal};

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};

const CHILD_LOG_TARGET: &str = "lp_supervisor::child";

/// Program and arguments for the target, e.g. `python3 app.py`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl ProcessSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Command line as it would be typed, for logs and messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a stop request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Had already exited before the request
    AlreadyExited(ExitStatus),
    /// Exited within the grace period
    Exited(ExitStatus),
    /// Force-killed after the grace period
    Killed,
}

/// Owned handle to a running child. Dropping it kills the child.
#[derive(Debug)]
pub struct ServerProcess {
    pid: u32,
    command: String,
    started_at: Instant,
    child: Child,
}

impl ServerProcess {
    /// Spawn with the inherited environment; stdout and stderr are forwarded
    /// to the log at debug level.
    #[track_caller]
    pub fn spawn(spec: &ProcessSpec) -> SupervisorResult<Self> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref dir) = spec.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => return Err(SupervisorError::process_spawn(spec.display(), e)),
        };

        let Some(pid) = child.id() else {
            return Err(SupervisorError::startup_failed(
                None,
                "Process exited during spawn",
            ));
        };

        if let Some(stdout) = child.stdout.take() {
            forward_output(pid, "stdout", stdout);
        }
        if let Some(stderr) = child.stderr.take() {
            forward_output(pid, "stderr", stderr);
        }

        info!("Spawned `{}` with PID {pid}", spec.display());

        Ok(Self {
            pid,
            command: spec.display(),
            started_at: Instant::now(),
            child,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Non-blocking exit check. Errors count as exited.
    pub fn has_exited(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(Some(status)) => {
                debug!("PID {} exited with {status}", self.pid);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to poll PID {}: {e}", self.pid);
                true
            }
        }
    }

    /// Graceful terminate, wait up to `grace`, then kill.
    pub async fn terminate(mut self, grace: Duration) -> SupervisorResult<StopOutcome> {
        if let Some(status) = self.child.try_wait()? {
            info!("PID {} had already exited ({status})", self.pid);
            return Ok(StopOutcome::AlreadyExited(status));
        }

        if signal::request_terminate(self.pid)? {
            info!("Sent terminate to PID {}", self.pid);
            match tokio::time::timeout(grace, self.child.wait()).await {
                Ok(status) => {
                    let status = status?;
                    info!("PID {} exited ({status})", self.pid);
                    return Ok(StopOutcome::Exited(status));
                }
                Err(_) => {
                    warn!(
                        "PID {} still running {}s after terminate, killing",
                        self.pid,
                        grace.as_secs_f32()
                    );
                }
            }
        }

        // Fails only when the child was reaped in the meantime
        if let Err(e) = self.child.start_kill() {
            debug!("Kill PID {}: {e}", self.pid);
        }
        self.child.wait().await?;
        info!("Killed PID {}", self.pid);
        Ok(StopOutcome::Killed)
    }
}

fn forward_output<R>(pid: u32, stream: &'static str, reader: R)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(target: CHILD_LOG_TARGET, "[{pid} {stream}] {line}");
        }
    });
}
