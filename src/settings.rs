//! Player settings and preferences
//!
//! Persisted as JSON next to the binary, separately from game balance.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, read_json};

/// Window size used when no settings file exists
pub const FALLBACK_WIDTH: i32 = 1440;
pub const FALLBACK_HEIGHT: i32 = 900;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    pub width: i32,
    pub height: i32,
    pub fullscreen: bool,
    /// Frame pacing target
    pub target_fps: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start the music track with the first level
    pub music_on_start: bool,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: FALLBACK_WIDTH,
            height: FALLBACK_HEIGHT,
            fullscreen: false,
            target_fps: 60,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            music_on_start: true,
            muted: false,
        }
    }
}

impl Settings {
    /// Milliseconds per frame at the target rate
    pub fn frame_ms(&self) -> u64 {
        1000 / u64::from(self.target_fps.max(1))
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            log::warn!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let settings: Settings = read_json(path)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(LoadError::invalid(
                "settings.width/height",
                format!("{}x{} is not a usable window", self.width, self.height),
            ));
        }
        if self.target_fps == 0 {
            return Err(LoadError::invalid("settings.target_fps", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("freighter-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(&temp_path("does-not-exist.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.width, 1440);
        assert_eq!(settings.frame_ms(), 16);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("settings.json");
        let settings = Settings {
            width: 800,
            height: 600,
            muted: true,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_zero_size_rejected() {
        let path = temp_path("bad-settings.json");
        fs::write(&path, r#"{ "width": 0 }"#).unwrap();
        let result = Settings::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(LoadError::Invalid { .. })));
    }
}
