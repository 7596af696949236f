use crate::TargetConfig;

use std::path::{Path, PathBuf};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};

fn target_with_url(url: &str) -> TargetConfig {
    TargetConfig {
        url: url.to_string(),
        ..TargetConfig::default()
    }
}

#[test]
fn given_explicit_port_when_port_then_returns_it() {
    let target = target_with_url("http://192.168.0.73:5000/");

    assert_that!(target.port().unwrap(), eq(5000));
}

#[test]
fn given_http_without_port_when_port_then_80() {
    let target = target_with_url("http://localhost/");

    assert_that!(target.port().unwrap(), eq(80));
}

#[test]
fn given_https_url_when_validate_then_error() {
    let target = target_with_url("https://example.com/app");

    let result = target.validate();

    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("must use http"));
}

#[test]
fn given_non_http_scheme_when_validate_then_error() {
    let target = target_with_url("ftp://127.0.0.1:5000/");

    assert_that!(target.validate(), err(anything()));
}

#[test]
fn given_relative_url_when_validate_then_error() {
    let target = target_with_url("/just/a/path");

    assert_that!(target.validate(), err(anything()));
}

#[test]
fn given_empty_script_when_validate_then_error() {
    let target = TargetConfig {
        script: "  ".to_string(),
        ..TargetConfig::default()
    };

    assert_that!(target.validate(), err(anything()));
}

#[test]
fn given_default_target_when_validate_then_ok() {
    assert_that!(TargetConfig::default().validate(), ok(anything()));
}

#[test]
fn given_relative_script_when_script_path_then_joined_to_base() {
    let target = TargetConfig::default();

    let path = target.script_path(Path::new("/srv/trading"));

    assert_that!(path, eq(&PathBuf::from("/srv/trading/app.py")));
}

#[test]
fn given_absolute_script_when_script_path_then_unchanged() {
    let target = TargetConfig {
        script: "/opt/app/run.py".to_string(),
        ..TargetConfig::default()
    };

    let path = target.script_path(Path::new("/srv/trading"));

    assert_that!(path, eq(&PathBuf::from("/opt/app/run.py")));
}
