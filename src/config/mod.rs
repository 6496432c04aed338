use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub meeting: MeetingDefaults,
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingDefaults {
    /// Duration in minutes pre-filled for new sessions.
    pub duration_minutes: f64,
    /// Label used in the summary when none is given on the command line.
    pub meeting_name: String,
}

impl Default for MeetingDefaults {
    fn default() -> Self {
        Self {
            duration_minutes: 30.0,
            meeting_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Animate totals toward new values instead of jumping.
    pub animate: bool,
    /// Length of one transition in milliseconds (default: 600)
    pub animation_ms: u64,
    /// Interval between animation frames in milliseconds (default: 16)
    pub frame_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            animate: true,
            animation_ms: 600,
            frame_ms: 16,
        }
    }
}

impl DisplayConfig {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Copy the summary to the clipboard when an interactive session ends.
    pub copy_on_exit: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.meeting.duration_minutes, 30.0);
        assert!(config.display.animate);
        assert_eq!(
            config.display.animation_duration(),
            Duration::from_millis(600)
        );
        assert!(!config.behavior.copy_on_exit);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[display]\nanimate = false\n").unwrap();
        assert!(!config.display.animate);
        assert_eq!(config.display.animation_ms, 600);
        assert_eq!(config.meeting.duration_minutes, 30.0);
    }

    #[test]
    fn test_frame_interval_never_zero() {
        let display = DisplayConfig {
            frame_ms: 0,
            ..DisplayConfig::default()
        };
        assert_eq!(display.frame_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = Config::default();
        config.meeting.meeting_name = "Weekly sync".to_string();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.meeting.meeting_name, "Weekly sync");
    }
}
