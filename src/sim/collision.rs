//! Point-in-circle collision tests
//!
//! Arrows collide through their tip only, so every test here is a point
//! against a circle. Targets use the closed disc (a tip on the rim scores the
//! outer ring), pickups use the open disc.

use glam::Vec2;

use crate::direction;

/// Tip of an arrow whose center is `pos`, pointing along `angle`
#[inline]
pub fn arrow_tip(pos: Vec2, angle: f32, arrow_len: f32) -> Vec2 {
    pos + direction(angle) * (arrow_len / 2.0)
}

/// Center of an arrow whose tip sits at `tip`
#[inline]
pub fn arrow_center_from_tip(tip: Vec2, angle: f32, arrow_len: f32) -> Vec2 {
    tip - direction(angle) * (arrow_len / 2.0)
}

/// Closed disc test (boundary counts as inside)
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) <= radius
}

/// Open disc test (boundary counts as outside)
#[inline]
pub fn point_strictly_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}
