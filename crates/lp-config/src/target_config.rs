use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_TARGET_INTERPRETER, DEFAULT_TARGET_SCRIPT,
    DEFAULT_TARGET_URL,
};

use std::path::{Path, PathBuf};

use http::Uri;
use serde::Deserialize;

const HTTP_PORT: u16 = 80;

/// The web application the dashboard launches and embeds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// URL probed for health and shown in the inline frame
    pub url: String,
    /// Program used to run the script
    pub interpreter: String,
    /// Script passed as the first argument to the interpreter
    pub script: String,
    /// Extra arguments appended after the script
    pub args: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_TARGET_URL),
            interpreter: String::from(DEFAULT_TARGET_INTERPRETER),
            script: String::from(DEFAULT_TARGET_SCRIPT),
            args: Vec::new(),
        }
    }
}

impl TargetConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let uri = self.uri()?;

        // The probe client is built without TLS
        if uri.scheme_str() != Some("http") {
            return Err(ConfigError::target(format!(
                "target.url must use http, got {:?}",
                uri.scheme_str()
            )));
        }

        if uri.host().is_none_or(str::is_empty) {
            return Err(ConfigError::target("target.url must include a host"));
        }

        if self.interpreter.trim().is_empty() {
            return Err(ConfigError::target("target.interpreter cannot be empty"));
        }

        if self.script.trim().is_empty() {
            return Err(ConfigError::target("target.script cannot be empty"));
        }

        Ok(())
    }

    /// Parsed target URL.
    pub fn uri(&self) -> ConfigErrorResult<Uri> {
        self.url
            .parse::<Uri>()
            .map_err(|e| ConfigError::target(format!("target.url '{}': {}", self.url, e)))
    }

    /// Port the target binds, explicit or the http default.
    pub fn port(&self) -> ConfigErrorResult<u16> {
        Ok(self.uri()?.port_u16().unwrap_or(HTTP_PORT))
    }

    /// Script path, relative paths resolved against `base`.
    pub fn script_path(&self, base: &Path) -> PathBuf {
        let script = Path::new(&self.script);
        if script.is_absolute() {
            script.to_path_buf()
        } else {
            base.join(script)
        }
    }
}
