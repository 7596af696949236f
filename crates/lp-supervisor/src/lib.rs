//! Launches, health-checks and stops the target web application.

mod error;
mod health;
mod port;
mod process;
mod settings;
mod signal;
mod state;
mod supervisor;

#[cfg(test)]
mod tests;

pub use error::{Result as SupervisorResult, SupervisorError};
pub use health::{HealthChecker, ProbeReport, ProbeStatus, ReadyOutcome, probe};
pub use port::{PortRelease, listening_pids, release_port};
pub use process::{ProcessSpec, ServerProcess, StopOutcome};
pub use settings::SupervisorSettings;
pub use signal::is_alive;
pub use state::ServerState;
pub use supervisor::ProcessSupervisor;
