//! Host configuration, persisted as TOML.

use std::path::{Path, PathBuf};

use restaurant_search::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "CUISINE_ATLAS_CONFIG";

/// Listener settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        }
    }
}

/// Complete host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub server: ServerConfig,
    /// Provider settings handed to the aggregator.
    pub search: SearchConfig,
}

impl HostConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| HostError::Config(e.to_string()))
    }

    /// Load from `path` if it exists, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> crate::error::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| HostError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the config file path: `$CUISINE_ATLAS_CONFIG` if set,
    /// otherwise `~/.config/cuisine-atlas/config.toml`.
    pub fn config_path() -> PathBuf {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => Self::default_config_path(),
        }
    }

    /// Returns the default config file path: `~/.config/cuisine-atlas/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("cuisine-atlas").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("cuisine-atlas")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/cuisine-atlas/config.toml")
        }
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Validate the search settings and make sure the relays are not
    /// pointed back at this host, which serves no relay routes.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Search`] for invalid search settings, or
    /// [`HostError::Config`] if the relay origin is the listen address.
    pub fn validate(&self) -> crate::error::Result<()> {
        self.search.validate()?;
        if self.relays_to_self()? {
            return Err(HostError::Config(format!(
                "search.relay_base_url {} points at this host's own listener {}",
                self.search.relay_base_url,
                self.bind_addr()
            )));
        }
        Ok(())
    }

    fn relays_to_self(&self) -> crate::error::Result<bool> {
        let origin = self.search.relay_origin()?;
        if origin.port_or_known_default() != Some(self.server.port) {
            return Ok(false);
        }
        let relay_host = origin
            .host_str()
            .unwrap_or_default()
            .trim_start_matches('[')
            .trim_end_matches(']');
        let bind_host = self.server.host.as_str();
        let is_loopback = |h: &str| matches!(h, "localhost" | "127.0.0.1" | "::1");
        Ok(relay_host.eq_ignore_ascii_case(bind_host)
            || (is_loopback(relay_host)
                && (is_loopback(bind_host) || matches!(bind_host, "0.0.0.0" | "::"))))
    }
}
