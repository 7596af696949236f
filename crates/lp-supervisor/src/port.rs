//! Frees the target port from a stale instance before a restart.
//!
//! Only processes *listening* on the port are considered, and by default
//! only those whose command line names the target script are terminated.

use crate::{SupervisorError, SupervisorResult, signal};

use std::time::{Duration, Instant};

use log::{debug, info, warn};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What a port release did. Purely informational.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortRelease {
    /// Pids found listening on the port
    pub holders: Vec<u32>,
    /// Pids that were terminated
    pub terminated: Vec<u32>,
    /// Pids left alone (unrelated, ourselves, or failed to terminate)
    pub skipped: Vec<u32>,
}

/// Best-effort: terminate the processes listening on `port` that belong to
/// the target. Never fails; problems are logged and the pid skipped.
pub async fn release_port(
    port: u16,
    owner_hint: &str,
    require_owner_match: bool,
    grace: Duration,
) -> PortRelease {
    let mut release = PortRelease::default();

    let holders = match tokio::task::spawn_blocking(move || listening_pids(port)).await {
        Ok(Ok(pids)) => pids,
        Ok(Err(e)) => {
            debug!("Could not list listeners on port {port}: {e}");
            return release;
        }
        Err(e) => {
            debug!("Port lookup task failed: {e}");
            return release;
        }
    };

    if holders.is_empty() {
        debug!("No process listening on port {port}");
        return release;
    }

    let own_pid = std::process::id();
    release.holders = holders.clone();

    for pid in holders {
        if pid == own_pid {
            release.skipped.push(pid);
            continue;
        }

        if require_owner_match {
            let owned = command_line(pid).is_some_and(|cmd| cmd.contains(owner_hint));
            if !owned {
                warn!("Port {port} is held by unrelated PID {pid}, leaving it running");
                release.skipped.push(pid);
                continue;
            }
        }

        match terminate_pid(pid, grace).await {
            Ok(()) => {
                info!("Terminated stale PID {pid} holding port {port}");
                release.terminated.push(pid);
            }
            Err(e) => {
                debug!("Failed to terminate PID {pid}: {e}");
                release.skipped.push(pid);
            }
        }
    }

    release
}

async fn terminate_pid(pid: u32, grace: Duration) -> SupervisorResult<()> {
    if signal::request_terminate(pid)? {
        let deadline = Instant::now() + grace;
        while Instant::now() < deadline {
            if !signal::is_alive(pid) {
                return Ok(());
            }
            tokio::time::sleep(EXIT_POLL_INTERVAL).await;
        }
        warn!("PID {pid} ignored terminate for {}s, killing", grace.as_secs_f32());
    }

    signal::force_kill(pid)
}

/// Pids with a TCP socket listening on `port`, any local address.
#[cfg(target_os = "linux")]
pub fn listening_pids(port: u16) -> SupervisorResult<Vec<u32>> {
    use procfs::net::TcpState;
    use procfs::process::FDTarget;
    use std::collections::HashSet;

    let mut entries =
        procfs::net::tcp().map_err(|e| SupervisorError::port_lookup(e.to_string()))?;
    entries.extend(procfs::net::tcp6().unwrap_or_default());

    let inodes: HashSet<u64> = entries
        .iter()
        .filter(|entry| entry.state == TcpState::Listen && entry.local_address.port() == port)
        .map(|entry| entry.inode)
        .collect();

    if inodes.is_empty() {
        return Ok(Vec::new());
    }

    let processes = procfs::process::all_processes()
        .map_err(|e| SupervisorError::port_lookup(e.to_string()))?;

    let mut pids = Vec::new();
    // Processes we may not inspect are skipped
    for process in processes.flatten() {
        let Ok(fds) = process.fd() else { continue };
        let holds_socket = fds.flatten().any(|fd| match fd.target {
            FDTarget::Socket(inode) => inodes.contains(&inode),
            _ => false,
        });
        if holds_socket {
            pids.push(process.pid as u32);
        }
    }

    pids.sort_unstable();
    pids.dedup();
    Ok(pids)
}

#[cfg(all(unix, not(target_os = "linux")))]
pub fn listening_pids(port: u16) -> SupervisorResult<Vec<u32>> {
    let output = std::process::Command::new("lsof")
        .args(["-nP", "-t", &format!("-iTCP:{port}"), "-sTCP:LISTEN"])
        .output()?;
    // lsof exits 1 when nothing matches
    Ok(parse_lsof_pids(&String::from_utf8_lossy(&output.stdout)))
}

#[cfg(windows)]
pub fn listening_pids(port: u16) -> SupervisorResult<Vec<u32>> {
    let output = std::process::Command::new("netstat")
        .args(["-ano", "-p", "TCP"])
        .output()?;
    if !output.status.success() {
        return Err(SupervisorError::port_lookup(format!(
            "netstat exited with {}",
            output.status
        )));
    }
    Ok(parse_netstat_listeners(
        &String::from_utf8_lossy(&output.stdout),
        port,
    ))
}

#[cfg(target_os = "linux")]
fn command_line(pid: u32) -> Option<String> {
    let process = procfs::process::Process::new(pid as i32).ok()?;
    let args = process.cmdline().ok()?;
    (!args.is_empty()).then(|| args.join(" "))
}

#[cfg(all(unix, not(target_os = "linux")))]
fn command_line(pid: u32) -> Option<String> {
    let output = std::process::Command::new("ps")
        .args(["-o", "command=", "-p", &pid.to_string()])
        .output()
        .ok()?;
    let cmd = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!cmd.is_empty()).then_some(cmd)
}

// netstat and tasklist report image names only, so an owner match never
// succeeds here; require_owner_match = false is needed to free the port.
#[cfg(windows)]
fn command_line(_pid: u32) -> Option<String> {
    None
}

/// One pid per line, as printed by `lsof -t`.
#[cfg_attr(target_os = "linux", allow(dead_code))]
pub(crate) fn parse_lsof_pids(output: &str) -> Vec<u32> {
    let mut pids: Vec<u32> = output
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect();
    pids.sort_unstable();
    pids.dedup();
    pids
}

/// Rows like `TCP  0.0.0.0:5000  0.0.0.0:0  LISTENING  1234`.
#[cfg_attr(unix, allow(dead_code))]
pub(crate) fn parse_netstat_listeners(output: &str, port: u16) -> Vec<u32> {
    let mut pids: Vec<u32> = output
        .lines()
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            match cols.as_slice() {
                [proto, local, _remote, state, pid]
                    if proto.eq_ignore_ascii_case("tcp") && *state == "LISTENING" =>
                {
                    let local_port = local.rsplit(':').next()?.parse::<u16>().ok()?;
                    (local_port == port).then(|| pid.parse().ok()).flatten()
                }
                _ => None,
            }
        })
        .collect();
    pids.sort_unstable();
    pids.dedup();
    pids
}
