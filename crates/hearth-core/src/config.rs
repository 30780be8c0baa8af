//! Configuration
//!
//! TOML file under the platform config directory. A missing file is not an
//! error; defaults apply and a save writes the file out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::animation::TypingConfig;

/// Backend connection settings (opaque hosted service)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
}

/// Typing animation timings in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub typing_interval_ms: u64,
    pub erasing_interval_ms: u64,
    pub hold_after_full_ms: u64,
    pub hold_after_empty_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        let defaults = TypingConfig::default();
        Self {
            typing_interval_ms: defaults.typing_interval.as_millis() as u64,
            erasing_interval_ms: defaults.erasing_interval.as_millis() as u64,
            hold_after_full_ms: defaults.hold_after_full.as_millis() as u64,
            hold_after_empty_ms: defaults.hold_after_empty.as_millis() as u64,
        }
    }
}

impl AnimationSettings {
    pub fn typing_config(&self) -> TypingConfig {
        TypingConfig {
            typing_interval: Duration::from_millis(self.typing_interval_ms),
            erasing_interval: Duration::from_millis(self.erasing_interval_ms),
            hold_after_full: Duration::from_millis(self.hold_after_full_ms),
            hold_after_empty: Duration::from_millis(self.hold_after_empty_ms),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendSettings,
    pub animation: AnimationSettings,
}

impl Config {
    /// Default location: `<config dir>/hearth/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hearth").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("no config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(?path, "config file missing, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config at {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hearth").join("config.toml");

        let mut config = Config::default();
        config.backend.url = Some("https://example.invalid".into());
        config.animation.typing_interval_ms = 700;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.animation.typing_config().typing_interval,
            Duration::from_millis(700)
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[animation]\ntyping_interval_ms = 99\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.animation.typing_interval_ms, 99);
        assert_eq!(
            config.animation.erasing_interval_ms,
            AnimationSettings::default().erasing_interval_ms
        );
        assert_eq!(config.backend, BackendSettings::default());
    }
}
