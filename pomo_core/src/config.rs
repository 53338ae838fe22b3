//! Configuration file support for Pomo.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/pomo/config.toml`.
//!
//! Note that cycle counts and work/rest durations are deliberately not
//! configurable; the config covers scheduling granularity and display
//! preferences only.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Tick scheduling configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerConfig {
    /// How often the host tick source fires, in milliseconds.
    /// Affects display latency only; elapsed time is wall-clock based.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Display preferences for the terminal adapter
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Render the cycle history newest-first
    #[serde(default = "default_history_newest_first")]
    pub history_newest_first: bool,

    /// Use emoji glyphs for modes and cycle labels
    #[serde(default = "default_use_emoji")]
    pub use_emoji: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            history_newest_first: default_history_newest_first(),
            use_emoji: default_use_emoji(),
        }
    }
}

// Default value functions
fn default_tick_interval_ms() -> u64 {
    crate::types::TICK_INTERVAL_MS
}

fn default_history_newest_first() -> bool {
    true
}

fn default_use_emoji() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("pomo").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.timer.tick_interval_ms == 0 {
            return Err(Error::Config(
                "timer.tick_interval_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timer.tick_interval_ms, 1000);
        assert!(config.display.history_newest_first);
        assert!(config.display.use_emoji);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.timer.tick_interval_ms,
            parsed.timer.tick_interval_ms
        );
        assert_eq!(config.display.use_emoji, parsed.display.use_emoji);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[display]
use_emoji = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.display.use_emoji);
        assert!(config.display.history_newest_first); // default
        assert_eq!(config.timer.tick_interval_ms, 1000); // default
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[timer]\ntick_interval_ms = 0\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load_from_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.display.use_emoji = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.display.use_emoji);
    }
}
