use crate::{ProcessSpec, ServerProcess, StopOutcome, SupervisorError};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::contains_substring;

#[tokio::test]
async fn given_missing_program_when_spawn_then_error_points_at_call_site() {
    // Given
    let spec = ProcessSpec::new("launchpad-no-such-program-7f3a");

    // When
    let Err(err) = ServerProcess::spawn(&spec) else {
        panic!("spawn of a missing program succeeded");
    };

    // Then
    assert!(matches!(err, SupervisorError::ProcessSpawn { .. }));
    let err_msg = format!("{err}");
    assert_that!(err_msg, contains_substring("launchpad-no-such-program-7f3a"));
    assert_that!(err_msg, contains_substring("tests/process.rs"));
}

#[cfg(unix)]
#[tokio::test]
async fn given_running_child_when_terminate_then_exits_within_grace() {
    let process = ServerProcess::spawn(&ProcessSpec::new("sleep").arg("30")).unwrap();

    let outcome = process.terminate(Duration::from_secs(2)).await.unwrap();

    assert!(matches!(outcome, StopOutcome::Exited(_)));
}
