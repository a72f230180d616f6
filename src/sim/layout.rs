//! Playfield layout derived from the window size
//!
//! Everything that scales with the playfield (ground line, archer anchor,
//! arrow length, gravity) is computed here so the simulation never has to
//! know about windows.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    /// Y of the ground line
    pub ground_y: f32,
    /// Point arrows are launched from
    pub anchor: Vec2,
    pub arrow_len: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(BASE_WIDTH, BASE_HEIGHT)
    }
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let scale = (width / BASE_WIDTH).min(height / BASE_HEIGHT);
        let ground_y = (height * 0.82).floor();
        Self {
            width,
            height,
            ground_y,
            anchor: Vec2::new((width * 0.12).floor(), ground_y - (height * 0.05).floor()),
            arrow_len: (BASE_ARROW_LEN * scale).floor(),
            gravity: BASE_GRAVITY * scale,
        }
    }

    /// Smaller playfield dimension, used to size the target
    #[inline]
    pub fn min_dim(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Vertical band a respawned target may appear in, as (top, span)
    pub fn target_band(&self) -> (f32, f32) {
        (TARGET_SAFE_TOP, (self.ground_y - TARGET_SAFE_INSET).max(1.0))
    }

    /// Vertical band a power-up may appear in, as (top, span)
    pub fn powerup_band(&self) -> (f32, f32) {
        (POWERUP_SAFE_TOP, (self.ground_y - POWERUP_SAFE_INSET).max(1.0))
    }

    /// Distance at which an arrow tip collects a power-up
    pub fn pickup_radius(&self) -> f32 {
        POWERUP_MIN_PICKUP_RADIUS.max(self.width * POWERUP_PICKUP_FRACTION)
    }

    /// True once a point is further outside the playfield than `margin`
    pub fn is_far_outside(&self, p: Vec2, margin: f32) -> bool {
        p.x < -margin || p.x > self.width + margin || p.y < -margin || p.y > self.height + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_layout() {
        let layout = Layout::default();
        assert_eq!(layout.ground_y, 524.0);
        assert_eq!(layout.anchor, Vec2::new(115.0, 492.0));
        assert_eq!(layout.arrow_len, BASE_ARROW_LEN);
        assert_eq!(layout.gravity, BASE_GRAVITY);
    }

    #[test]
    fn test_layout_scales_with_smaller_dimension() {
        let layout = Layout::new(1920.0, 640.0);
        assert_eq!(layout.gravity, BASE_GRAVITY);
        let layout = Layout::new(480.0, 640.0);
        assert_eq!(layout.gravity, BASE_GRAVITY * 0.5);
        assert_eq!(layout.arrow_len, 28.0);
    }

    #[test]
    fn test_bands_never_empty() {
        let tiny = Layout::new(10.0, 10.0);
        assert!(tiny.target_band().1 >= 1.0);
        assert!(tiny.powerup_band().1 >= 1.0);
    }

    #[test]
    fn test_far_outside() {
        let layout = Layout::default();
        assert!(!layout.is_far_outside(Vec2::new(-399.0, 0.0), OFFSCREEN_MARGIN));
        assert!(layout.is_far_outside(Vec2::new(-401.0, 0.0), OFFSCREEN_MARGIN));
        assert!(layout.is_far_outside(Vec2::new(0.0, 640.0 + 401.0), OFFSCREEN_MARGIN));
    }
}
