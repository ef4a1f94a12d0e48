//! Game settings and preferences
//!
//! Persisted as JSON next to the highscore file. Load and save are
//! best-effort: a missing or corrupt file falls back to defaults with a
//! warning, never an error the host has to handle.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Audio preferences for the host shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute toggle
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("ignoring malformed settings file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings as JSON, logging on failure
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("failed to save settings to {}: {e}", path.display());
                }
            }
            Err(e) => log::warn!("failed to serialize settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.master_volume, 0.8);
        assert!(!settings.muted);
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("pixel_invaders_settings_test.json");

        let mut settings = Settings::default();
        settings.master_volume = 0.25;
        settings.muted = true;
        settings.save(&path);

        let restored = Settings::load(&path);
        assert_eq!(restored.master_volume, 0.25);
        assert!(restored.muted);

        let _ = std::fs::remove_file(&path);
    }
}
