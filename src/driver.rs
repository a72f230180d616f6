//! Host loop glue
//!
//! Owns a session plus everything around it that is not pure simulation:
//! frame timing, the 1 Hz countdown and high score persistence.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::highscores::HighScoreFile;
use crate::platform::{CountdownTimer, FrameClock};
use crate::sanitize_dt;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Layout, TickInput, tick};

pub struct Driver {
    pub state: GameState,
    store: HighScoreFile,
    clock: FrameClock,
    countdown: CountdownTimer,
}

impl Driver {
    /// Build a session from settings, loading the stored high score
    pub fn new(settings: &Settings) -> Self {
        Self::with_store(settings, HighScoreFile::new(&settings.highscore_path))
    }

    pub fn with_store(settings: &Settings, store: HighScoreFile) -> Self {
        let seed = settings.seed.unwrap_or_else(wall_seed);
        let mut state = GameState::new(seed, Layout::default(), settings.difficulty);
        state.max_particles = settings.max_particles();
        state.high_score = store.load();
        log::info!(
            "Game initialized with seed: {} ({}, high score {})",
            seed,
            settings.difficulty.as_str(),
            state.high_score
        );
        Self {
            state,
            store,
            clock: FrameClock::new(),
            countdown: CountdownTimer::default(),
        }
    }

    /// Run one frame measured against the wall clock
    pub fn frame(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let dt = self.clock.tick();
        self.step(input, dt)
    }

    /// Run one frame with an explicit delta
    pub fn step(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let dt = sanitize_dt(dt);
        tick(&mut self.state, input, dt);

        let mut events = self.state.drain_events();
        let started = events
            .iter()
            .any(|e| matches!(e, GameEvent::SessionStarted { .. }));
        if started {
            // A fresh session starts its countdown from zero
            self.countdown.reset();
            self.clock.reset();
        } else if self.state.phase == GamePhase::Playing {
            for _ in 0..self.countdown.accumulate(dt) {
                self.state.countdown_second();
            }
            events.extend(self.state.drain_events());
        }

        for event in &events {
            self.handle(event);
        }
        events
    }

    fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::NewHighScore(score) => {
                if let Err(err) = self.store.save(*score) {
                    log::warn!("Failed to save high score {}: {}", score, err);
                }
            }
            other => log::debug!("{:?}", other),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state.quit_requested
    }
}

fn wall_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let nanos = d.as_nanos();
            (nanos as u64) ^ ((nanos >> 64) as u64)
        })
        .unwrap_or(0)
}
