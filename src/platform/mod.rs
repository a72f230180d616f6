//! Platform abstraction layer
//!
//! Handles host timing for the native loop:
//! - Frame delta measurement
//! - The 1 Hz session countdown

use std::time::Instant;

use crate::consts::FALLBACK_DT;
use crate::sanitize_dt;

/// Measures wall time between frames
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Seconds since the previous call, sanitized for the simulation
    ///
    /// The first call has nothing to measure against and yields the
    /// fallback step.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => FALLBACK_DT,
        };
        self.last = Some(now);
        sanitize_dt(dt)
    }

    /// Forget the previous frame (after a stall or pause)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Turns accumulated frame time into whole-second countdown ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct CountdownTimer {
    accumulated: f32,
}

impl CountdownTimer {
    /// Feed `dt` seconds; returns how many whole seconds elapsed
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        if !(dt > 0.0) {
            return 0;
        }
        self.accumulated += dt;
        let whole = self.accumulated.floor();
        self.accumulated -= whole;
        whole as u32
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
