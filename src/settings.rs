//! Game settings and preferences
//!
//! Persisted separately from high scores, as a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio (prep for later) ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Persistence ===
    /// Where the high score table lives
    pub scores_path: PathBuf,

    // === Simulation ===
    /// Fixed RNG seed; None derives one from the clock at startup
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            scores_path: PathBuf::from("scores.json"),
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Malformed settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to `path`. Failures are logged, never surfaced.
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("Failed to save settings to {}: {}", path.display(), e);
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("invaders_settings_{}_{}.json", tag, std::process::id()));
        p
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.scores_path, PathBuf::from("scores.json"));
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("roundtrip");
        let mut s = Settings::default();
        s.seed = Some(424242);
        s.save(&path);

        let loaded = Settings::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.seed, Some(424242));
        assert_eq!(loaded.scores_path, s.scores_path);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let s = Settings::load(&temp_path("missing"));
        assert_eq!(s.seed, None);
    }
}
