//! Integration tests for the dashboard page, actions and status API
mod common;

use crate::common::{
    create_test_app_state, create_test_server, refused_url, sleeper, target_up, target_up_after,
    url_of,
};

use lp_dashboard::controller::{ALREADY_RUNNING, NOT_READY, NOT_RUNNING, STARTED};
use lp_dashboard::render::{RUNNING_BANNER, STOPPED_BANNER};
use lp_supervisor::ProcessSpec;

use axum::http::StatusCode;
use googletest::assert_that;
use googletest::prelude::{contains_substring, not};

#[tokio::test]
async fn given_target_down_when_get_index_then_warning_and_start_button() {
    // Given
    let server = create_test_server(create_test_app_state(refused_url(), sleeper()));

    // When
    let response = server.get("/").await;

    // Then
    response.assert_status(StatusCode::OK);
    let html = response.text();
    assert_that!(html, contains_substring(STOPPED_BANNER));
    assert_that!(html, contains_substring("Start Server"));
    assert_that!(html, not(contains_substring("<iframe")));
}

#[tokio::test]
async fn given_target_up_when_get_index_then_frame_and_restart_button() {
    // Given
    let target = target_up().await;
    let url = url_of(&target);
    let server = create_test_server(create_test_app_state(url.clone(), sleeper()));

    // When
    let response = server.get("/").await;

    // Then
    let html = response.text();
    assert_that!(html, contains_substring(RUNNING_BANNER));
    assert_that!(html, contains_substring(format!(r#"<iframe src="{url}""#)));
    assert_that!(html, contains_substring("Restart Server"));
}

#[tokio::test]
async fn given_target_up_when_post_start_then_redirect_and_already_running_flash() {
    // Given
    let target = target_up().await;
    let state = create_test_app_state(url_of(&target), sleeper());
    let server = create_test_server(state.clone());

    // When
    let response = server.post("/start").await;

    // Then
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");
    assert!(state.supervisor.lock().await.pid().is_none());

    let html = server.get("/").await.text();
    assert_that!(html, contains_substring(ALREADY_RUNNING));
}

#[tokio::test]
async fn given_flash_shown_once_when_reloading_then_gone() {
    // Given
    let target = target_up().await;
    let server = create_test_server(create_test_app_state(url_of(&target), sleeper()));
    server.post("/start").await;

    // When
    let first = server.get("/").await.text();
    let second = server.get("/").await.text();

    // Then
    assert_that!(first, contains_substring(ALREADY_RUNNING));
    assert_that!(second, not(contains_substring(ALREADY_RUNNING)));
}

#[tokio::test]
async fn given_target_down_when_post_restart_then_not_running_flash() {
    let server = create_test_server(create_test_app_state(refused_url(), sleeper()));

    server.post("/restart").await.assert_status(StatusCode::SEE_OTHER);

    let html = server.get("/").await.text();
    assert_that!(html, contains_substring(NOT_RUNNING));
}

#[tokio::test]
async fn given_missing_interpreter_when_post_start_then_error_starting_flash() {
    // Given
    let spec = ProcessSpec::new("launchpad-no-such-interpreter-7f3a");
    let server = create_test_server(create_test_app_state(refused_url(), spec));

    // When
    server.post("/start").await;

    // Then
    let html = server.get("/").await.text();
    assert_that!(html, contains_substring("Error starting app.py: "));
    assert_that!(html, contains_substring(STOPPED_BANNER));
}

#[cfg(unix)]
#[tokio::test]
async fn given_target_never_answers_when_post_start_then_could_not_connect_flash() {
    // Given
    let state = create_test_app_state(refused_url(), sleeper());
    let server = create_test_server(state.clone());

    // When
    server.post("/start").await;

    // Then
    let html = server.get("/").await.text();
    assert_that!(html, contains_substring(NOT_READY));
    assert!(state.supervisor.lock().await.pid().is_none());
}

#[cfg(unix)]
#[tokio::test]
async fn given_target_down_when_post_start_then_started_flash_and_frame() {
    // Given
    let target = target_up_after(1).await;
    let state = create_test_app_state(url_of(&target), sleeper());
    let server = create_test_server(state.clone());

    // When
    let response = server.post("/start").await;

    // Then
    response.assert_status(StatusCode::SEE_OTHER);
    let html = server.get("/").await.text();
    assert_that!(html, contains_substring(STARTED));
    assert_that!(html, contains_substring("<iframe"));
    assert!(state.supervisor.lock().await.pid().is_some());

    state.supervisor.lock().await.shutdown().await;
}

#[cfg(unix)]
#[tokio::test]
async fn given_target_up_and_untracked_when_post_restart_then_start_attempted() {
    // Given
    let target = target_up().await;
    let state = create_test_app_state(url_of(&target), sleeper());
    let server = create_test_server(state.clone());

    // When
    server.post("/restart").await;

    // Then
    let pid = state.supervisor.lock().await.pid();
    assert!(pid.is_some());
    let html = server.get("/").await.text();
    assert_that!(html, contains_substring(STARTED));

    state.supervisor.lock().await.shutdown().await;
}

#[cfg(unix)]
#[tokio::test]
async fn given_tracked_target_when_post_restart_then_replaced_by_new_process() {
    // Given
    let target = target_up().await;
    let state = create_test_app_state(url_of(&target), sleeper());
    let server = create_test_server(state.clone());
    let first = state.supervisor.lock().await.start().await.unwrap();

    // When
    server.post("/restart").await;

    // Then
    let second = state.supervisor.lock().await.pid().unwrap();
    assert_ne!(first, second);

    state.supervisor.lock().await.shutdown().await;
}

#[tokio::test]
async fn given_target_up_when_get_status_then_json_report() {
    // Given
    let target = target_up().await;
    let url = url_of(&target);
    let server = create_test_server(create_test_app_state(url.clone(), sleeper()));

    // When
    let response = server.get("/api/status").await;

    // Then
    response.assert_status(StatusCode::OK);
    let json: serde_json::Value = response.json();
    assert_eq!(json["target_url"], url.as_str());
    assert_eq!(json["probe"]["status"], "up");
    assert_eq!(json["probe"]["http_status"], 200);
    assert_eq!(json["state"], "unstarted");
    assert!(json["pid"].is_null());
    assert!(json["uptime_secs"].is_null());
    assert_eq!(json["next_refresh"].as_str().unwrap().len(), 5);
}

#[cfg(unix)]
#[tokio::test]
async fn given_tracked_target_when_get_status_then_running_with_pid_and_uptime() {
    // Given
    let target = target_up().await;
    let state = create_test_app_state(url_of(&target), sleeper());
    let server = create_test_server(state.clone());
    let pid = state.supervisor.lock().await.start().await.unwrap();

    // When
    let json: serde_json::Value = server.get("/api/status").await.json();

    // Then
    assert_eq!(json["state"], "running");
    assert_eq!(json["pid"], pid);
    assert!(json["uptime_secs"].is_u64());

    state.supervisor.lock().await.shutdown().await;
}

#[tokio::test]
async fn given_target_down_when_get_status_then_down_with_error() {
    let server = create_test_server(create_test_app_state(refused_url(), sleeper()));

    let json: serde_json::Value = server.get("/api/status").await.json();

    assert_eq!(json["probe"]["status"], "down");
    assert!(json["probe"]["http_status"].is_null());
    assert!(json["probe"]["error"].is_string());
}

#[tokio::test]
async fn test_self_health_endpoints() {
    let server = create_test_server(create_test_app_state(refused_url(), sleeper()));

    let health: serde_json::Value = server.get("/health").await.json();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));

    let live = server.get("/live").await;
    live.assert_status(StatusCode::OK);
    assert_eq!(live.text(), "OK");

    assert_eq!(server.get("/ready").await.text(), "Ready");
}
