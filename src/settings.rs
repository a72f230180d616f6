//! Game settings and preferences
//!
//! Persisted as JSON next to the working directory. Unknown or missing fields
//! fall back to their defaults.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::highscores;
pub use crate::sim::Difficulty;

/// Default settings file name
pub const SETTINGS_PATH: &str = "archery_settings.json";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset for new sessions
    pub difficulty: Difficulty,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (hit and pickup bursts)
    pub particles: bool,
    /// Where the best score is kept
    pub highscore_path: String,
    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            quality: QualityPreset::Medium,
            particles: true,
            highscore_path: highscores::DEFAULT_PATH.to_string(),
            seed: None,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(json) = fs::read_to_string(path) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Ignoring malformed settings in {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.max_particles(), 500);
        assert_eq!(settings.highscore_path, "archery_highscore.txt");
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_particles_off_disables_cap() {
        let settings = Settings {
            particles: false,
            quality: QualityPreset::High,
            ..Default::default()
        };
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"difficulty":"Hard","seed":42}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.particles);
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = std::env::temp_dir();
        let missing = dir.join(format!("archery_settings_missing_{}.json", std::process::id()));
        assert_eq!(Settings::load(&missing), Settings::default());

        let bad = dir.join(format!("archery_settings_bad_{}.json", std::process::id()));
        fs::write(&bad, "{ not json").unwrap();
        assert_eq!(Settings::load(&bad), Settings::default());
        let _ = fs::remove_file(&bad);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("archery_settings_rt_{}.json", std::process::id()));
        let settings = Settings {
            difficulty: Difficulty::Easy,
            quality: QualityPreset::Low,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_quality_from_str() {
        assert_eq!(QualityPreset::from_str("LOW"), Some(QualityPreset::Low));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::High.max_particles(), 2000);
    }
}
