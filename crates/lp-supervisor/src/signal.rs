//! Platform process signalling.

use crate::SupervisorResult;

#[cfg(unix)]
use crate::SupervisorError;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{Signal, kill};
#[cfg(unix)]
use nix::unistd::Pid;

/// Ask `pid` to exit. Returns false when no graceful request was sent,
/// either because the process is gone or the platform has no such signal.
#[cfg(unix)]
pub(crate) fn request_terminate(pid: u32) -> SupervisorResult<bool> {
    match kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        Ok(()) => Ok(true),
        Err(Errno::ESRCH) => Ok(false),
        Err(e) => Err(SupervisorError::signal(pid, e.to_string())),
    }
}

#[cfg(windows)]
pub(crate) fn request_terminate(_pid: u32) -> SupervisorResult<bool> {
    Ok(false)
}

#[cfg(unix)]
pub(crate) fn force_kill(pid: u32) -> SupervisorResult<()> {
    match kill(Pid::from_raw(pid as i32), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(e) => Err(SupervisorError::signal(pid, e.to_string())),
    }
}

#[cfg(windows)]
pub(crate) fn force_kill(pid: u32) -> SupervisorResult<()> {
    std::process::Command::new("taskkill")
        .args(["/F", "/PID", &pid.to_string()])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()?;
    Ok(())
}

/// Whether a process with this pid exists.
#[cfg(unix)]
pub fn is_alive(pid: u32) -> bool {
    // EPERM: exists but belongs to someone else
    matches!(kill(Pid::from_raw(pid as i32), None), Ok(()) | Err(Errno::EPERM))
}

#[cfg(windows)]
pub fn is_alive(pid: u32) -> bool {
    std::process::Command::new("tasklist")
        .args(["/FI", &format!("PID eq {pid}"), "/NH"])
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).contains(&pid.to_string()))
        .unwrap_or(false)
}
