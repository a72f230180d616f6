//! Cosmetic effects: particle bursts and floating text
//!
//! Nothing here feeds back into gameplay. Particles fall under the same
//! gravity as arrows but with much stronger drag.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GOLD: Rgb = Rgb(255, 213, 77);
    pub const ORANGE: Rgb = Rgb(255, 200, 0);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    /// Seconds left
    pub life: f32,
    /// Seconds at spawn
    pub initial_life: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: Rgb, life: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            life,
            initial_life: life,
        }
    }

    /// Opacity in [0, 1]
    pub fn alpha(&self) -> f32 {
        if self.initial_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.initial_life).clamp(0.0, 1.0)
    }

    /// Particles grow as they fade
    pub fn size(&self) -> f32 {
        3.0 + 6.0 * (1.0 - self.alpha())
    }

    pub fn update(&mut self, dt: f32, gravity: f32) {
        self.vel.y += gravity * dt;
        self.vel.x -= self.vel.x * PARTICLE_DRAG_X * dt;
        self.vel.y -= self.vel.y * PARTICLE_DRAG_Y * dt;
        self.pos += self.vel * dt;
        self.life -= dt;
    }
}

/// Floating text (hit commentary, pickup notices)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub pos: Vec2,
    pub text: String,
    /// Seconds left
    pub life: f32,
}

impl Popup {
    pub fn new(pos: Vec2, text: impl Into<String>, life: f32) -> Self {
        Self {
            pos,
            text: text.into(),
            life,
        }
    }

    /// Opacity in [0, 1]; stays opaque until the last second
    pub fn alpha(&self) -> f32 {
        (self.life / POPUP_FADE_SECS).clamp(0.0, 1.0)
    }
}

/// Spawn `count` particles flying out of `origin`
///
/// `cap` bounds the live particle count; the oldest particles are evicted
/// first. A cap of zero disables particles entirely.
pub fn spawn_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    color: Rgb,
    count: usize,
    cap: usize,
) {
    if cap == 0 {
        return;
    }
    for _ in 0..count {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = PARTICLE_MIN_SPEED + rng.random::<f32>() * PARTICLE_SPEED_SPREAD;
        let vel = Vec2::new(
            angle.cos() * speed,
            angle.sin() * speed * PARTICLE_VERTICAL_SQUASH,
        );
        let life = PARTICLE_MIN_LIFE + rng.random::<f32>() * PARTICLE_LIFE_SPREAD;
        particles.push(Particle::new(origin, vel, color, life));
    }
    let excess = particles.len().saturating_sub(cap);
    if excess > 0 {
        particles.drain(..excess);
    }
}

/// Age all particles and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32, gravity: f32) {
    for particle in particles.iter_mut() {
        particle.update(dt, gravity);
    }
    particles.retain(|p| p.life > 0.0);
}

/// Count popups down and drop the expired ones
pub fn update_popups(popups: &mut Vec<Popup>, dt: f32) {
    for popup in popups.iter_mut() {
        popup.life -= dt;
    }
    popups.retain(|p| p.life > 0.0);
}

/// Commentary shown for a hit worth `points`
pub fn commentary_for(points: u32) -> &'static str {
    match points {
        p if p >= 100 => "Excellent!",
        p if p >= 60 => "Very Good!",
        p if p >= 30 => "Good!",
        _ => "Nice!",
    }
}
