//! Per-frame simulation tick
//!
//! Advances the session by a wall-clock delta. Order within a tick:
//! target, power-ups, arrows (with collisions), particles, popups.

use glam::Vec2;
use rand::Rng;

use super::collision::point_strictly_in_circle;
use super::effects::{self, Popup, Rgb, commentary_for, spawn_burst};
use super::state::{GameEvent, GamePhase, GameState, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::sanitize_dt;

/// Input commands gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New aim angle (from pointer position)
    pub aim: Option<f32>,
    /// Start drawing the bow (press)
    pub begin_charge: bool,
    /// Release the bow along this angle
    pub release: Option<f32>,
    /// Instant zero-charge shot at the current aim
    pub quick_fire: bool,
    /// Leave the menu
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Fresh session
    pub restart: bool,
    /// Dismiss the game-over screen
    pub acknowledge: bool,
    /// Terminate
    pub quit: bool,
}

/// Apply input, then advance the simulation by `dt`
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.quit {
        state.quit();
        return;
    }
    if input.restart {
        state.restart();
    } else if input.start {
        state.start();
    }
    if input.acknowledge {
        state.acknowledge_game_over();
    }
    if input.pause {
        state.toggle_pause();
    }
    if let Some(aim) = input.aim {
        state.set_aim(aim);
    }
    if input.begin_charge {
        state.begin_charge();
    }
    if let Some(angle) = input.release {
        state.release_and_fire(angle);
    }
    if input.quick_fire {
        state.quick_fire();
    }

    advance(state, dt);
}

/// Advance the simulation by `dt` seconds (no-op unless Playing)
///
/// Non-positive or oversized deltas are replaced the same way the frame
/// clock replaces them.
pub fn advance(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = sanitize_dt(dt);

    state.time_ticks += 1;
    state.clock += dt as f64;

    update_target(state, dt);
    spawn_powerups(state);
    update_powerups(state, dt);
    update_arrows(state, dt);

    let gravity = state.layout.gravity;
    effects::update_particles(&mut state.particles, dt, gravity);
    effects::update_popups(&mut state.popups, dt);
}

fn update_target(state: &mut GameState, dt: f32) {
    if state.target.advance(dt, &state.layout, &mut state.rng) {
        log::debug!("Target respawned at y={:.0}", state.target.center.y);
        state.emit(GameEvent::TargetRespawned);
    }
}

fn spawn_powerups(state: &mut GameState) {
    if !state.rng.random_bool(POWERUP_SPAWN_CHANCE) {
        return;
    }
    let (top, span) = state.layout.powerup_band();
    let pos = Vec2::new(
        state.layout.width + TARGET_WRAP_MARGIN,
        top + state.rng.random_range(0.0..span),
    );
    let id = state.next_entity_id();
    state.powerups.push(PowerUp::new(id, PowerUpKind::ExtraArrows, pos));
}

fn update_powerups(state: &mut GameState, dt: f32) {
    for powerup in state.powerups.iter_mut() {
        powerup.advance(dt);
    }
    state.powerups.retain(|p| p.pos.x >= POWERUP_DESPAWN_X);
}

fn update_arrows(state: &mut GameState, dt: f32) {
    let GameState {
        arrows,
        target,
        powerups,
        particles,
        popups,
        rng,
        layout,
        score,
        arrows_left,
        events,
        max_particles,
        ..
    } = state;
    let arrow_len = layout.arrow_len;
    let pickup_radius = layout.pickup_radius();
    let cap = *max_particles;

    arrows.retain_mut(|arrow| {
        if arrow.is_stuck() {
            arrow.follow(target, arrow_len);
            return true;
        }

        arrow.integrate(dt, layout.gravity);
        let tip = arrow.tip(arrow_len);

        powerups.retain(|powerup| {
            if !point_strictly_in_circle(tip, powerup.pos, pickup_radius) {
                return true;
            }
            match powerup.kind {
                PowerUpKind::ExtraArrows => *arrows_left += POWERUP_BONUS_ARROWS,
            }
            spawn_burst(particles, rng, tip, Rgb::CYAN, PICKUP_BURST, cap);
            popups.push(Popup::new(powerup.pos, powerup.kind.label(), 0.9));
            events.push(GameEvent::PowerUpCollected { kind: powerup.kind });
            log::debug!("Power-up {} collected", powerup.id);
            false
        });

        // The outer ring radius equals the collision radius, so this is `hit`
        if let Some(points) = target.points_for(tip) {
            *score = score.saturating_add(points);
            let bullseye = points >= BULLSEYE_POINTS;
            let color = if bullseye { Rgb::GOLD } else { Rgb::ORANGE };
            spawn_burst(particles, rng, tip, color, HIT_BURST, cap);
            popups.push(Popup::new(tip, commentary_for(points), 1.1));
            target.wobble(rng);
            arrow.stick_to(target, tip, arrow_len);
            if bullseye {
                popups.push(Popup::new(tip - Vec2::new(0.0, 30.0), "BULLSEYE!", 1.4));
            }
            events.push(GameEvent::TargetHit { points, bullseye });
            log::debug!("Arrow {} hit for {} points", arrow.id, points);
            return true;
        }

        if layout.is_far_outside(arrow.pos, OFFSCREEN_MARGIN) {
            events.push(GameEvent::ArrowLost);
            return false;
        }
        true
    });
}
