//! Read-only view of a session for presentation
//!
//! Everything a frontend needs to draw a frame, with cosmetic offsets
//! already applied. Serializable so headless runs can dump it.

use glam::Vec2;
use serde::Serialize;

use super::difficulty::Difficulty;
use super::effects::Rgb;
use super::rings::Ring;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetView {
    /// Center including the wobble displacement
    pub center: Vec2,
    pub radius: f32,
    /// Outermost first
    pub rings: Vec<Ring>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowView {
    pub pos: Vec2,
    pub tip: Vec2,
    pub angle: f32,
    pub stuck: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: Rgb,
    pub alpha: f32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupView {
    pub pos: Vec2,
    pub text: String,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub label: &'static str,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub score: u32,
    pub arrows_left: u32,
    pub seconds_left: u32,
    pub high_score: u32,
    pub aim: f32,
    /// Present while the bow is drawn
    pub charge: Option<f32>,
    pub bow_pull: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    pub anchor: Vec2,
    pub hud: Hud,
    pub target: TargetView,
    pub arrows: Vec<ArrowView>,
    pub powerups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
    pub popups: Vec<PopupView>,
}

impl GameState {
    /// Capture everything needed to draw the current frame
    pub fn snapshot(&self) -> Snapshot {
        let layout = &self.layout;
        let offset = Vec2::new(0.0, self.target.render_offset());

        // Stuck arrows are drawn with the same wobble as their target
        let arrows = self
            .arrows
            .iter()
            .map(|arrow| {
                let shift = arrow
                    .stuck
                    .and_then(|attachment| self.target_by_id(attachment.target))
                    .map_or(Vec2::ZERO, |target| Vec2::new(0.0, target.render_offset()));
                ArrowView {
                    pos: arrow.pos + shift,
                    tip: arrow.tip(layout.arrow_len) + shift,
                    angle: arrow.angle,
                    stuck: arrow.is_stuck(),
                }
            })
            .collect();

        Snapshot {
            width: layout.width,
            height: layout.height,
            ground_y: layout.ground_y,
            anchor: layout.anchor,
            hud: Hud {
                phase: self.phase,
                difficulty: self.difficulty,
                score: self.score,
                arrows_left: self.arrows_left,
                seconds_left: self.seconds_left,
                high_score: self.high_score,
                aim: self.aim,
                charge: self.charge_ratio(),
                bow_pull: self.bow_pull(),
            },
            target: TargetView {
                center: self.target.center + offset,
                radius: self.target.radius,
                rings: self.target.rings.rings().to_vec(),
            },
            arrows,
            powerups: self
                .powerups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.render_pos(),
                    label: p.kind.label(),
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    color: p.color,
                    alpha: p.alpha(),
                    size: p.size(),
                })
                .collect(),
            popups: self
                .popups
                .iter()
                .map(|p| PopupView {
                    pos: p.pos,
                    text: p.text.clone(),
                    alpha: p.alpha(),
                })
                .collect(),
        }
    }
}
