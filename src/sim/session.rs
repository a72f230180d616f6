//! Session control: phase transitions, aiming, charging and firing
//!
//! ```text
//! Menu --start--> Playing --pause--> Paused --resume--> Playing
//! Playing --countdown hits 0--> GameOver --acknowledge--> Menu
//! any --restart--> Playing (fresh session)
//! ```

use glam::Vec2;

use super::charge::{self, launch_speed};
use super::difficulty::Difficulty;
use super::layout::Layout;
use super::state::{Arrow, GameEvent, GamePhase, GameState, Target};
use crate::consts::LAUNCH_CLEARANCE;
use crate::{clamp_aim, direction};

/// Spawn position and velocity for an arrow leaving `anchor`
///
/// The arrow starts half a shaft plus a small clearance along the aim so it
/// never overlaps the archer.
pub fn launch(anchor: Vec2, arrow_len: f32, angle: f32, ratio: f32) -> (Vec2, Vec2) {
    let angle = clamp_aim(angle);
    let dir = direction(angle);
    let pos = anchor + dir * (arrow_len / 2.0 + LAUNCH_CLEARANCE);
    (pos, dir * launch_speed(ratio))
}

impl GameState {
    /// Choose the preset used by the next start/restart
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Adopt a new playfield size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.layout = Layout::new(width, height);
    }

    /// Menu (or GameOver) to Playing
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Menu | GamePhase::GameOver => self.reset_session(),
            GamePhase::Playing | GamePhase::Paused => {}
        }
    }

    /// Fresh session from any phase
    pub fn restart(&mut self) {
        self.reset_session();
    }

    fn reset_session(&mut self) {
        let config = self.difficulty.config(&self.layout);
        self.score = 0;
        self.arrows_left = config.arrow_count;
        self.seconds_left = config.time_limit_secs;
        self.clock = 0.0;
        self.charge.cancel();
        self.arrows.clear();
        self.particles.clear();
        self.popups.clear();
        self.powerups.clear();
        self.target.apply_config(&config);
        self.target.center = Target::home(&self.layout);
        self.target.wobble = 0.0;
        self.phase = GamePhase::Playing;
        self.emit(GameEvent::SessionStarted {
            difficulty: self.difficulty,
        });
        log::info!(
            "Session started ({}): {} arrows, {}s",
            self.difficulty.as_str(),
            self.arrows_left,
            self.seconds_left
        );
    }

    /// Playing <-> Paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::info!("Resumed");
        }
    }

    /// One tick of the 1 Hz countdown; ends the game at zero
    pub fn countdown_second(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.charge.cancel();
        let new_best = self.score > self.high_score;
        if new_best {
            self.high_score = self.score;
        }
        self.emit(GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
        });
        if new_best {
            self.emit(GameEvent::NewHighScore(self.high_score));
        }
        log::info!(
            "Time's up! Score: {} High Score: {}{}",
            self.score,
            self.high_score,
            if new_best { " (new)" } else { "" }
        );
    }

    /// GameOver to Menu
    pub fn acknowledge_game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.phase = GamePhase::Menu;
        }
    }

    /// Ask the host to terminate
    pub fn quit(&mut self) {
        self.quit_requested = true;
        log::info!("Quit requested");
    }

    /// Point the bow (clamped to the firing arc)
    pub fn set_aim(&mut self, angle: f32) {
        self.aim = clamp_aim(angle);
    }

    /// Start drawing the bow; ignored without arrows or outside play
    pub fn begin_charge(&mut self) {
        if self.phase != GamePhase::Playing || self.arrows_left == 0 {
            return;
        }
        self.charge.begin(self.clock);
    }

    /// Release the draw and fire along `angle`
    ///
    /// Returns the new arrow's id, or `None` if nothing was being charged.
    pub fn release_and_fire(&mut self, angle: f32) -> Option<u32> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let ratio = self.charge.release(self.clock)?;
        Some(self.fire(angle, ratio))
    }

    /// Fire immediately at the current aim with no charge
    pub fn quick_fire(&mut self) -> Option<u32> {
        if self.phase != GamePhase::Playing || self.arrows_left == 0 || self.charge.charging {
            return None;
        }
        Some(self.fire(self.aim, 0.0))
    }

    fn fire(&mut self, angle: f32, ratio: f32) -> u32 {
        let angle = clamp_aim(angle);
        self.aim = angle;
        let (pos, vel) = launch(self.layout.anchor, self.layout.arrow_len, angle, ratio);
        let id = self.next_entity_id();
        self.arrows.push(Arrow::new(id, pos, vel, angle));
        self.arrows_left = self.arrows_left.saturating_sub(1);
        let speed = vel.length();
        self.emit(GameEvent::ArrowFired { speed, angle });
        log::debug!(
            "Arrow {} fired at {:.0} px/s ({:.0}% charge), {} left",
            id,
            speed,
            ratio * 100.0,
            self.arrows_left
        );
        id
    }

    /// Charge ratio while the bow is drawn
    pub fn charge_ratio(&self) -> Option<f32> {
        self.charge
            .charging
            .then(|| self.charge.ratio(self.clock))
    }

    /// Cosmetic bowstring pull while the bow is drawn
    pub fn bow_pull(&self) -> Option<f32> {
        self.charge_ratio().map(charge::bow_pull)
    }
}
