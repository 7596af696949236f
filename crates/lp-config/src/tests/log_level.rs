use crate::{LoggingConfig, LogLevel};

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err};
use log::LevelFilter;

#[test]
fn given_mixed_case_name_when_parse_then_level() {
    let level = LogLevel::from_str("DeBuG").unwrap();

    assert_that!(*level, eq(LevelFilter::Debug));
}

#[test]
fn given_unknown_name_when_parse_then_error() {
    assert_that!(LogLevel::from_str("loud"), err(anything()));
}

#[test]
fn given_level_when_display_then_lowercase() {
    let name = LogLevel(LevelFilter::Warn).to_string();

    assert_that!(name.as_str(), eq("warn"));
}

#[test]
fn given_invalid_level_in_toml_when_deserialize_then_error() {
    let result = toml::from_str::<LoggingConfig>("level = \"loud\"");

    assert!(result.is_err());
}
