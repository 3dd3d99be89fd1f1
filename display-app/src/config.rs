//! Static configuration loaded once at startup

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use display_core::PowerTimeouts;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no config path given and no user config directory available")]
    NoDefaultPath,
}

/// Player core connection for the event feed and artwork
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphicsConfig {
    /// Overlay a dithering texture on rendered artwork
    #[serde(default)]
    pub enable_dithering: bool,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            enable_dithering: false,
        }
    }
}

/// Remote log collector endpoint; telemetry is disabled when absent
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub host: String,
    pub port: u16,
}

/// Grace periods for the power cascade, in seconds
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_pause_timeout")]
    pub pause_timeout_secs: u64,
    #[serde(default = "default_display_off_timeout")]
    pub display_off_timeout_secs: u64,
}

fn default_pause_timeout() -> u64 {
    30
}

fn default_display_off_timeout() -> u64 {
    60
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            pause_timeout_secs: default_pause_timeout(),
            display_off_timeout_secs: default_display_off_timeout(),
        }
    }
}

/// Root configuration struct
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub core: CoreConfig,
    /// Display name of the zone this display mirrors
    pub target_zone: String,
    /// Base URL of the backlight service
    pub backlight_service: String,
    #[serde(default)]
    pub graphics: GraphicsConfig,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl DisplayConfig {
    /// Load and parse the config file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default config location under the user config directory
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("zone-display").join("config.json"))
            .ok_or(ConfigError::NoDefaultPath)
    }

    pub fn power_timeouts(&self) -> PowerTimeouts {
        PowerTimeouts {
            pause_timeout: Duration::from_secs(self.timeouts.pause_timeout_secs),
            display_off_timeout: Duration::from_secs(self.timeouts.display_off_timeout_secs),
        }
    }

    /// Base URL for artwork fetches, served by the player core
    pub fn artwork_endpoint(&self) -> String {
        format!("http://{}:{}", self.core.host, self.core.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"{
        "core": { "host": "192.168.0.206", "port": 9204 },
        "target_zone": "Office",
        "backlight_service": "http://192.168.0.114:8713",
        "graphics": { "enable_dithering": true },
        "logging": { "host": "localhost", "port": 55689 },
        "timeouts": { "pause_timeout_secs": 15, "display_off_timeout_secs": 45 }
    }"#;

    #[test]
    fn test_parse_full_config() {
        let config: DisplayConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.target_zone, "Office");
        assert_eq!(config.core.port, 9204);
        assert!(config.graphics.enable_dithering);
        assert_eq!(config.logging.as_ref().unwrap().port, 55689);
        assert_eq!(
            config.power_timeouts().pause_timeout,
            Duration::from_secs(15)
        );
        assert_eq!(config.artwork_endpoint(), "http://192.168.0.206:9204");
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: DisplayConfig = serde_json::from_str(
            r#"{
                "core": { "host": "10.0.0.2", "port": 9204 },
                "target_zone": "Den",
                "backlight_service": "http://10.0.0.3:8713"
            }"#,
        )
        .unwrap();

        assert!(config.logging.is_none());
        assert!(!config.graphics.enable_dithering);
        assert_eq!(
            config.power_timeouts().pause_timeout,
            Duration::from_secs(30)
        );
        assert_eq!(
            config.power_timeouts().display_off_timeout,
            Duration::from_secs(60)
        );
    }

    #[test]
    fn test_missing_target_zone_is_parse_error() {
        let result: Result<DisplayConfig, _> = serde_json::from_str(
            r#"{
                "core": { "host": "10.0.0.2", "port": 9204 },
                "backlight_service": "http://10.0.0.3:8713"
            }"#,
        );
        assert!(result.is_err());
    }
}
