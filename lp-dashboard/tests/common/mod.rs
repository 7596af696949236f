#![allow(dead_code)]

//! Test infrastructure for dashboard route tests

use lp_dashboard::{AppState, build_router};
use lp_supervisor::{HealthChecker, ProcessSpec, ProcessSupervisor, SupervisorSettings};

use std::time::Duration;

use axum_test::TestServer;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TITLE: &str = "Trading Dashboard";
pub const TEST_SCRIPT: &str = "app.py";

/// A local port nothing listens on.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

pub fn refused_url() -> String {
    format!("http://127.0.0.1:{}/", free_port())
}

/// Target that always answers 200.
pub async fn target_up() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

/// Target that answers 503 `failures` times, then 200.
pub async fn target_up_after(failures: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(failures)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .with_priority(2)
        .mount(&server)
        .await;
    server
}

pub fn url_of(server: &MockServer) -> String {
    format!("{}/", server.uri())
}

pub fn create_test_app_state(url: String, spec: ProcessSpec) -> AppState {
    let settings = SupervisorSettings {
        spec,
        url,
        // Nothing listens here, so port release is a no-op
        port: free_port(),
        owner_hint: String::from(TEST_SCRIPT),
        probe_timeout: Duration::from_millis(500),
        startup_timeout: Duration::from_secs(2),
        ready_poll_interval: Duration::from_millis(50),
        shutdown_grace: Duration::from_secs(2),
        require_owner_match: true,
    };
    let supervisor = ProcessSupervisor::new(settings).unwrap();
    let passive = HealthChecker::new(Duration::from_millis(500)).unwrap();

    AppState::from_parts(TEST_TITLE, TEST_SCRIPT, passive, supervisor)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).unwrap()
}

pub fn sleeper() -> ProcessSpec {
    ProcessSpec::new("sleep").arg("30")
}
