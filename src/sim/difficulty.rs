//! Difficulty presets

use serde::{Deserialize, Serialize};

use super::layout::Layout;

/// Smallest target radius a preset will produce (keeps rings distinct)
pub const MIN_TARGET_RADIUS: f32 = 12.0;

/// Named difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Session parameters a preset resolves to for a given playfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub arrow_count: u32,
    pub time_limit_secs: u32,
    pub target_radius: f32,
    /// Horizontal target velocity (negative drifts left)
    pub target_speed: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Target radius as a fraction of the smaller playfield dimension
    fn radius_fraction(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.12,
            Difficulty::Medium => 0.09,
            Difficulty::Hard => 0.07,
        }
    }

    /// Resolve the preset against a playfield
    pub fn config(&self, layout: &Layout) -> DifficultyConfig {
        let (arrow_count, time_limit_secs, target_speed) = match self {
            Difficulty::Easy => (20, 80, -120.0),
            Difficulty::Medium => (14, 60, -180.0),
            Difficulty::Hard => (10, 45, -260.0),
        };
        DifficultyConfig {
            arrow_count,
            time_limit_secs,
            target_radius: (layout.min_dim() * self.radius_fraction())
                .floor()
                .max(MIN_TARGET_RADIUS),
            target_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rings::ScoringRings;

    #[test]
    fn test_presets_at_reference_size() {
        let layout = Layout::default();
        let easy = Difficulty::Easy.config(&layout);
        assert_eq!((easy.arrow_count, easy.time_limit_secs), (20, 80));
        assert_eq!(easy.target_radius, 76.0);
        assert_eq!(easy.target_speed, -120.0);

        let medium = Difficulty::Medium.config(&layout);
        assert_eq!((medium.arrow_count, medium.time_limit_secs), (14, 60));
        assert_eq!(medium.target_radius, 57.0);

        let hard = Difficulty::Hard.config(&layout);
        assert_eq!((hard.arrow_count, hard.time_limit_secs), (10, 45));
        assert_eq!(hard.target_radius, 44.0);
        assert_eq!(hard.target_speed, -260.0);
    }

    #[test]
    fn test_every_preset_has_ordered_rings() {
        for layout in [Layout::default(), Layout::new(320.0, 200.0), Layout::new(10.0, 10.0)] {
            for difficulty in Difficulty::ALL {
                let config = difficulty.config(&layout);
                assert!(config.target_radius > 0.0);
                let rings = ScoringRings::for_radius(config.target_radius);
                assert!(rings.is_well_ordered(), "{:?} at {:?}", difficulty, layout);
                assert_eq!(rings.outer_radius(), config.target_radius);
            }
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
    }
}
