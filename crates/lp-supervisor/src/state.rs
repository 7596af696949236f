use std::fmt;

/// Tracked state of the process this session started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerState {
    /// Nothing started in this session yet
    Unstarted,
    /// Spawned, waiting for the first successful probe
    Starting,
    /// Answering probes
    Running { pid: u32 },
    /// Spawn or readiness failed; any spawned child has been terminated
    Failed { error: String },
    /// Terminate signal sent, waiting for exit
    Stopping,
    /// Exited or killed
    Stopped,
}

impl ServerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unstarted => "unstarted",
            Self::Starting => "starting",
            Self::Running { .. } => "running",
            Self::Failed { .. } => "failed",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
        }
    }

    pub fn pid(&self) -> Option<u32> {
        match self {
            Self::Running { pid } => Some(*pid),
            _ => None,
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running { pid } => write!(f, "running (pid {pid})"),
            Self::Failed { error } => write!(f, "failed: {error}"),
            other => f.write_str(other.as_str()),
        }
    }
}
