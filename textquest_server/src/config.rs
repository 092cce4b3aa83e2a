//! Server configuration: the engine settings plus where to listen.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use textquest_engine::EngineConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    #[serde(default)]
    server: ListenConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub server: ListenConfig,
    pub engine: EngineConfig,
}

impl ServerConfig {
    /// Parse both halves of the config from one TOML document.
    ///
    /// # Errors
    /// - if either the engine sections or the `[server]` section are invalid
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        let engine = EngineConfig::from_toml(text, path)?;
        let section: ServerSection =
            toml::from_str(text).with_context(|| format!("while reading [server] from '{}'", path.display()))?;
        Ok(Self {
            server: section.server,
            engine,
        })
    }

    /// Load from `path`; a missing path or file yields defaults.
    ///
    /// # Errors
    /// - if the file exists but cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no config at '{}', using defaults", path.display());
                return Ok(Self::default());
            },
            Err(e) => return Err(e).with_context(|| format!("while reading config '{}'", path.display())),
        };
        let config = Self::from_toml(&text, path)?;
        info!("server config loaded from '{}'", path.display());
        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
