//! Page render and the start/restart actions.
//!
//! Status always comes from a fresh probe of the target URL. The tracked
//! supervisor state is reported by the status endpoint but never decides
//! what the page shows, since the target may have been started elsewhere.

use crate::flash::Flash;
use crate::render::{self, PageView};
use crate::state::AppState;

use lp_supervisor::{ProbeReport, SupervisorError};

use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{Local, NaiveDateTime};
use log::{error, info, warn};
use serde::Serialize;

pub const STARTED: &str = "Web server started successfully!";
pub const NOT_READY: &str = "Could not connect to web server. It may not have started correctly.";
pub const ALREADY_RUNNING: &str = "Web server is already running";
pub const NOT_RUNNING: &str = "Web server is not running";

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let server_up = state.passive.probe(&state.target_url).await.is_up();
    let view = PageView {
        title: &state.title,
        target_url: &state.target_url,
        server_up,
        next_refresh: render::next_refresh(local_now()),
        flash: state.take_flash(),
    };

    Html(render::render_page(&view))
}

/// POST /start
pub async fn start(State(state): State<AppState>) -> Redirect {
    let flash = start_action(&state).await;
    state.set_flash(flash);
    Redirect::to("/")
}

/// POST /restart
pub async fn restart(State(state): State<AppState>) -> Redirect {
    let flash = restart_action(&state).await;
    state.set_flash(flash);
    Redirect::to("/")
}

/// Start the target unless it already answers.
pub async fn start_action(state: &AppState) -> Flash {
    let mut supervisor = state.supervisor.lock().await;

    if state.passive.probe(&state.target_url).await.is_up() {
        info!("Start requested but {} already answers", state.target_url);
        return Flash::info(ALREADY_RUNNING);
    }

    info!("Starting web server... please wait");
    start_outcome(state, supervisor.start().await)
}

/// Replace a running target: stop the tracked child, free the port, start.
pub async fn restart_action(state: &AppState) -> Flash {
    let mut supervisor = state.supervisor.lock().await;

    if !state.passive.probe(&state.target_url).await.is_up() {
        info!("Restart requested but {} does not answer", state.target_url);
        return Flash::info(NOT_RUNNING);
    }

    match supervisor.stop().await {
        Ok(true) => info!("Web server stopped"),
        Ok(false) => info!("No tracked web server, releasing port only"),
        Err(e) => warn!("Stopping tracked web server failed: {e}"),
    }

    let release = supervisor.release_port().await;
    if !release.terminated.is_empty() {
        info!("Released port held by {:?}", release.terminated);
    }

    start_outcome(state, supervisor.start().await)
}

fn start_outcome(state: &AppState, result: Result<u32, SupervisorError>) -> Flash {
    match result {
        Ok(pid) => {
            info!("Web server started with PID {pid}");
            Flash::success(STARTED)
        }
        Err(SupervisorError::StartupFailed { message, .. }) => {
            error!("Web server did not become ready: {message}");
            Flash::error(NOT_READY)
        }
        Err(SupervisorError::ProcessSpawn { source, .. }) => {
            error!("Spawning {} failed: {source}", state.script);
            Flash::error(format!("Error starting {}: {source}", state.script))
        }
        Err(e) => {
            error!("Starting {} failed: {e}", state.script);
            Flash::error(format!("Error starting {}: {e}", state.script))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub target_url: String,
    pub probe: ProbeReport,
    /// Tracked supervisor state, e.g. "running"
    pub state: &'static str,
    pub pid: Option<u32>,
    /// Seconds since the tracked process was spawned
    pub uptime_secs: Option<u64>,
    pub next_refresh: String,
}

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Response {
    let probe = state.passive.probe_detailed(&state.target_url).await;
    let tracked = state.tracked.borrow().clone();
    // Skipped while an action holds the supervisor
    let uptime_secs = state
        .supervisor
        .try_lock()
        .ok()
        .and_then(|supervisor| supervisor.uptime())
        .map(|uptime| uptime.as_secs());

    Json(StatusResponse {
        target_url: state.target_url.to_string(),
        probe,
        state: tracked.as_str(),
        pid: tracked.pid(),
        uptime_secs,
        next_refresh: render::next_refresh(local_now())
            .format("%H:%M")
            .to_string(),
    })
    .into_response()
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
