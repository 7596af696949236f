//! Reachability probes against the target URL.

use crate::SupervisorResult;

use std::time::{Duration, Instant};

use log::debug;
use reqwest::StatusCode;
use serde::Serialize;

/// Reachability of the target, derived fresh from each probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Up,
    Down,
}

impl ProbeStatus {
    pub fn is_up(self) -> bool {
        self == ProbeStatus::Up
    }
}

/// Result of a single probe, with enough detail for the status API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub status: ProbeStatus,
    pub latency_ms: u64,
    /// HTTP status code, when a response arrived at all
    pub http_status: Option<u16>,
    /// Transport error or non-200 description
    pub error: Option<String>,
}

/// How a readiness wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyOutcome {
    Ready,
    TimedOut,
    /// The watched process exited before answering
    Exited,
}

/// Issues GET probes with a fixed per-request timeout.
///
/// Only HTTP 200 counts as up. Redirects are not followed, so a 3xx is down.
#[derive(Debug, Clone)]
pub struct HealthChecker {
    client: reqwest::Client,
}

impl HealthChecker {
    pub fn new(timeout: Duration) -> SupervisorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client })
    }

    pub async fn probe(&self, url: &str) -> ProbeStatus {
        self.probe_detailed(url).await.status
    }

    /// Single GET, no retries.
    pub async fn probe_detailed(&self, url: &str) -> ProbeReport {
        let start = Instant::now();
        let result = self.client.get(url).send().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let report = match result {
            Ok(resp) if resp.status() == StatusCode::OK => ProbeReport {
                status: ProbeStatus::Up,
                latency_ms,
                http_status: Some(resp.status().as_u16()),
                error: None,
            },
            Ok(resp) => ProbeReport {
                status: ProbeStatus::Down,
                latency_ms,
                http_status: Some(resp.status().as_u16()),
                error: Some(format!("HTTP {}", resp.status())),
            },
            Err(e) => ProbeReport {
                status: ProbeStatus::Down,
                latency_ms,
                http_status: None,
                error: Some(e.to_string()),
            },
        };

        debug!("Probe {url}: {:?} in {}ms", report.status, latency_ms);
        report
    }

    /// Poll `url` every `interval` until it answers 200, `timeout` elapses,
    /// or `exited` reports that the process being waited on is gone.
    pub async fn wait_ready<F>(
        &self,
        url: &str,
        timeout: Duration,
        interval: Duration,
        mut exited: F,
    ) -> ReadyOutcome
    where
        F: FnMut() -> bool,
    {
        let deadline = Instant::now() + timeout;

        loop {
            if exited() {
                return ReadyOutcome::Exited;
            }

            if self.probe(url).await.is_up() {
                return ReadyOutcome::Ready;
            }

            if Instant::now() + interval >= deadline {
                return ReadyOutcome::TimedOut;
            }

            tokio::time::sleep(interval).await;
        }
    }
}

/// One-shot probe with its own client.
pub async fn probe(url: &str, timeout: Duration) -> ProbeStatus {
    match HealthChecker::new(timeout) {
        Ok(checker) => checker.probe(url).await,
        Err(e) => {
            debug!("Probe client unavailable: {e}");
            ProbeStatus::Down
        }
    }
}
