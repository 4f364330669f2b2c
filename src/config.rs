//! Configuration management for notebook-alert.
//!
//! Loads config from YAML files in standard locations. Every field has a
//! default, so a missing or partial file is never an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "NOTEBOOK_ALERT_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub always_on_top: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 650.0,
            height: 300.0,
            always_on_top: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds the window stays up before closing itself.
    pub display_secs: f64,
    pub flash_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            display_secs: 12.0,
            flash_interval_ms: 150,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub notifications: bool,
    pub sounds: bool,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            notifications: true,
            sounds: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Explicit path to the `show-alert` executable.
    pub renderer_path: Option<PathBuf>,
    pub max_message_chars: usize,
    pub detect_session_name: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            renderer_path: None,
            max_message_chars: 100,
            detect_session_name: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub feedback: FeedbackConfig,
    pub launcher: LauncherConfig,
}

impl Config {
    /// Load configuration from YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. `$NOTEBOOK_ALERT_CONFIG`
    /// 2. ~/.config/notebook-alert/config.yaml
    /// 3. /etc/notebook-alert/config.yaml
    ///
    /// The working directory is never searched.
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::var_os(CONFIG_ENV).map(PathBuf::from),
                dirs::home_dir().map(|h| h.join(".config/notebook-alert/config.yaml")),
                Some(PathBuf::from("/etc/notebook-alert/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match serde_yml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {e}, using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {e}, using defaults", config_path.display());
                Self::default()
            }
        }
    }
}
