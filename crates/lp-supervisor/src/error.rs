use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Failed to spawn {program}: {source} {location}")]
    ProcessSpawn {
        program: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Server did not become ready: {message} {location}")]
    StartupFailed {
        /// The terminated child, when one was spawned
        pid: Option<u32>,
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to signal pid {pid}: {message} {location}")]
    Signal {
        pid: u32,
        message: String,
        location: ErrorLocation,
    },

    #[error("Port lookup failed: {message} {location}")]
    PortLookup {
        message: String,
        location: ErrorLocation,
    },

    #[error("Configuration invalid: {source}")]
    Config {
        #[from]
        source: lp_config::ConfigError,
    },

    #[error("HTTP client error: {source} {location}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl SupervisorError {
    #[track_caller]
    pub fn process_spawn<S: Into<String>>(program: S, source: std::io::Error) -> Self {
        Self::ProcessSpawn {
            program: program.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn startup_failed<S: Into<String>>(pid: Option<u32>, message: S) -> Self {
        Self::StartupFailed {
            pid,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn port_lookup<S: Into<String>>(message: S) -> Self {
        Self::PortLookup {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn signal<S: Into<String>>(pid: u32, message: S) -> Self {
        Self::Signal {
            pid,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether the child process could not be created at all.
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, Self::ProcessSpawn { .. })
    }
}

impl From<std::io::Error> for SupervisorError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for SupervisorError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::HttpClient {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SupervisorError>;
