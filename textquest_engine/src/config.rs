//! Engine configuration.
//!
//! Settings come from an optional TOML file. Every field has a default, so a missing file
//! or a partial one is fine; a file that exists but cannot be parsed is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse config file '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// A session idle for longer than this is expired.
    pub idle_timeout_secs: u64,
    /// How often the transport sweeps expired sessions.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 60 * 60,
            sweep_interval_secs: 30 * 60,
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub from_name: String,
    pub from_address: String,
    pub subject: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_name: "Text Quest".into(),
            from_address: "textquest@example.com".into(),
            subject: "Message from the stone table".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub session: SessionConfig,
    pub mail: MailConfig,
}

impl EngineConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    /// - if the text is not valid TOML for this structure
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, or return defaults if `path` is `None` or does not exist.
    ///
    /// # Errors
    /// - on IO errors other than a missing file, or if the file cannot be parsed
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_toml(&text, path)?;
                info!("engine config loaded from '{}'", path.display());
                Ok(config)
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("no config at '{}', using defaults", path.display());
                Ok(Self::default())
            },
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
