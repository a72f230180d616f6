//! Archery Challenge - a stickman archery arcade game
//!
//! Core modules:
//! - `sim`: Simulation (arrow flight, target, power-ups, particles, session state)
//! - `platform`: Frame clock and countdown timer for the host loop
//! - `driver`: Host-side session runner (clock + persistence + event draining)
//! - `highscores`: Single-integer high score file
//! - `settings`: Player settings and difficulty selection

pub mod driver;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use driver::Driver;
pub use highscores::HighScoreFile;
pub use settings::{Difficulty, QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Reference playfield the tuning values were authored against
    pub const BASE_WIDTH: f32 = 960.0;
    pub const BASE_HEIGHT: f32 = 640.0;

    /// Gravity at the reference playfield size (pixels/s²)
    pub const BASE_GRAVITY: f32 = 950.0;
    /// Proportional drag on arrows (fraction of velocity removed per second)
    pub const ARROW_DRAG: f32 = 0.03;
    /// Arrow length at the reference playfield size
    pub const BASE_ARROW_LEN: f32 = 56.0;

    /// Launch speed at zero charge
    pub const MIN_SPEED: f32 = 260.0;
    /// Launch speed at full charge
    pub const MAX_SPEED: f32 = 1050.0;
    /// Seconds of holding needed to reach full charge
    pub const MAX_CHARGE: f32 = 1.6;

    /// Aim is clamped to ±60° around horizontal
    pub const AIM_LIMIT: f32 = PI / 3.0;
    /// Aim before the player touches anything (slightly upward)
    pub const DEFAULT_AIM: f32 = -PI / 8.0;
    /// Extra gap between the anchor and a freshly fired arrow
    pub const LAUNCH_CLEARANCE: f32 = 10.0;
    /// Arrows this far outside the playfield are dropped
    pub const OFFSCREEN_MARGIN: f32 = 400.0;

    /// Target leaves/re-enters this far beyond the playfield edges
    pub const TARGET_WRAP_MARGIN: f32 = 40.0;
    /// Top of the band a respawned target may appear in
    pub const TARGET_SAFE_TOP: f32 = 120.0;
    /// The band ends this far above the ground line
    pub const TARGET_SAFE_INSET: f32 = 180.0;
    /// Per-tick wobble decay factor
    pub const WOBBLE_DECAY: f32 = 0.94;
    pub const WOBBLE_MIN: f32 = 8.0;
    pub const WOBBLE_SPREAD: f32 = 18.0;
    /// Converts wobble amplitude into a render-time phase
    pub const WOBBLE_RENDER_FREQ: f32 = 0.07;

    /// Ring radii as fractions of the target radius (outer to inner)
    pub const RING_FRACTIONS: [f32; 4] = [1.0, 0.72, 0.48, 0.28];
    /// Points per ring (outer to inner)
    pub const RING_POINTS: [u32; 4] = [10, 30, 60, 100];
    /// Score at or above which a hit counts as a bullseye
    pub const BULLSEYE_POINTS: u32 = 100;

    /// Chance per tick that a power-up spawns
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.003;
    pub const POWERUP_SPEED: f32 = -100.0;
    pub const POWERUP_DESPAWN_X: f32 = -100.0;
    pub const POWERUP_SAFE_TOP: f32 = 140.0;
    pub const POWERUP_SAFE_INSET: f32 = 200.0;
    pub const POWERUP_MIN_PICKUP_RADIUS: f32 = 18.0;
    /// Pickup radius as a fraction of playfield width
    pub const POWERUP_PICKUP_FRACTION: f32 = 0.03;
    pub const POWERUP_BONUS_ARROWS: u32 = 2;

    /// Particle drag (horizontal / vertical)
    pub const PARTICLE_DRAG_X: f32 = 1.2;
    pub const PARTICLE_DRAG_Y: f32 = 0.6;
    pub const PARTICLE_MIN_SPEED: f32 = 80.0;
    pub const PARTICLE_SPEED_SPREAD: f32 = 220.0;
    /// Bursts are flattened vertically
    pub const PARTICLE_VERTICAL_SQUASH: f32 = 0.6;
    pub const PARTICLE_MIN_LIFE: f32 = 0.6;
    pub const PARTICLE_LIFE_SPREAD: f32 = 0.8;
    pub const HIT_BURST: usize = 20;
    pub const PICKUP_BURST: usize = 12;

    /// Popups are fully opaque while more than this many seconds remain
    pub const POPUP_FADE_SECS: f32 = 1.0;

    /// Substituted for non-positive frame deltas
    pub const FALLBACK_DT: f32 = 0.016;
    /// Longest frame delta the simulation accepts
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Clamp an aim angle to the allowed firing arc
#[inline]
pub fn clamp_aim(angle: f32) -> f32 {
    if angle.is_nan() {
        return consts::DEFAULT_AIM;
    }
    angle.clamp(-consts::AIM_LIMIT, consts::AIM_LIMIT)
}

/// Unit vector pointing along `angle` (screen coordinates, +y down)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Make a wall-clock frame delta safe to integrate with
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if !(dt > 0.0) {
        consts::FALLBACK_DT
    } else {
        dt.min(consts::MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_clamp_aim() {
        assert_eq!(clamp_aim(0.2), 0.2);
        assert_eq!(clamp_aim(PI), consts::AIM_LIMIT);
        assert_eq!(clamp_aim(-PI), -consts::AIM_LIMIT);
        assert_eq!(clamp_aim(f32::NAN), consts::DEFAULT_AIM);
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.0), consts::FALLBACK_DT);
        assert_eq!(sanitize_dt(-1.0), consts::FALLBACK_DT);
        assert_eq!(sanitize_dt(f32::NAN), consts::FALLBACK_DT);
        assert_eq!(sanitize_dt(5.0), consts::MAX_FRAME_DT);
        assert_eq!(sanitize_dt(0.02), 0.02);
    }

    #[test]
    fn test_direction_is_unit() {
        let d = direction(0.7);
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert_eq!(direction(0.0), Vec2::X);
    }
}
