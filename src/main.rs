//! Archery Challenge headless entry point
//!
//! Runs one session with a scripted archer: it sweeps its aim across the
//! firing arc and draws the bow for varying durations.
//!
//! Flags:
//! - `--fast`: step a fixed 60 Hz clock instead of sleeping between frames
//! - `--difficulty <easy|medium|hard>`: override the configured preset
//! - `--quality <low|medium|high>`: override the particle budget
//!
//! A default settings file is written on first launch.

use std::path::Path;
use std::thread;
use std::time::Duration;

use archery_challenge::consts::{AIM_LIMIT, MAX_CHARGE};
use archery_challenge::settings::SETTINGS_PATH;
use archery_challenge::sim::{GameEvent, GamePhase, GameState, TickInput};
use archery_challenge::{Difficulty, Driver, QualityPreset, Settings};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

const FRAME: Duration = Duration::from_millis(16);
const FAST_DT: f32 = 1.0 / 60.0;

/// What the scripted archer is doing
#[derive(Debug, Clone, Copy)]
enum Stance {
    /// Waiting this many more seconds before drawing
    Resting(f32),
    /// Holding the draw for this many more seconds
    Drawing(f32),
}

struct ScriptedArcher {
    rng: Pcg32,
    sweep: f32,
    stance: Stance,
}

impl ScriptedArcher {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0xA5C3),
            sweep: 0.0,
            stance: Stance::Resting(0.5),
        }
    }

    fn aim(&self) -> f32 {
        // Mostly upward: the target sits above the anchor
        -AIM_LIMIT * 0.5 + self.sweep.sin() * AIM_LIMIT * 0.45
    }

    fn next_input(&mut self, state: &GameState, dt: f32) -> TickInput {
        let mut input = TickInput::default();
        match state.phase {
            GamePhase::Menu => {
                input.start = true;
                return input;
            }
            GamePhase::Paused => {
                input.pause = true;
                return input;
            }
            GamePhase::GameOver => return input,
            GamePhase::Playing => {}
        }

        self.sweep += dt * 0.7;
        input.aim = Some(self.aim());

        self.stance = match self.stance {
            Stance::Resting(left) if left <= 0.0 && state.arrows_left > 0 => {
                input.begin_charge = true;
                Stance::Drawing(self.rng.random_range(0.0..MAX_CHARGE * 1.2))
            }
            Stance::Resting(left) => Stance::Resting(left - dt),
            Stance::Drawing(left) if left <= 0.0 => {
                input.release = Some(self.aim());
                Stance::Resting(self.rng.random_range(0.3..1.5))
            }
            Stance::Drawing(left) => Stance::Drawing(left - dt),
        };
        input
    }
}

/// Apply command-line overrides; returns whether `--fast` was given
fn apply_args(settings: &mut Settings, args: &[String]) -> bool {
    let mut fast = false;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fast" => fast = true,
            "--difficulty" => match iter.next().and_then(|v| Difficulty::from_str(v)) {
                Some(difficulty) => settings.difficulty = difficulty,
                None => log::warn!("--difficulty expects easy, medium or hard"),
            },
            "--quality" => match iter.next().and_then(|v| QualityPreset::from_str(v)) {
                Some(quality) => settings.quality = quality,
                None => log::warn!("--quality expects low, medium or high"),
            },
            other => log::warn!("Ignoring unknown argument {}", other),
        }
    }
    fast
}

fn main() {
    env_logger::init();
    log::info!("Archery Challenge (headless) starting...");

    let mut settings = Settings::load(SETTINGS_PATH);
    if !Path::new(SETTINGS_PATH).exists() {
        if let Err(err) = settings.save(SETTINGS_PATH) {
            log::warn!("Could not write {}: {}", SETTINGS_PATH, err);
        }
    }
    let args: Vec<String> = std::env::args().skip(1).collect();
    let fast = apply_args(&mut settings, &args);
    log::info!(
        "Difficulty {}, quality {}",
        settings.difficulty.as_str(),
        settings.quality.as_str()
    );

    let mut driver = Driver::new(&settings);
    let mut archer = ScriptedArcher::new(driver.state.seed);
    let mut last_dt = FAST_DT;

    while !driver.is_finished() {
        let input = archer.next_input(&driver.state, last_dt);
        let events = if fast {
            driver.step(&input, FAST_DT)
        } else {
            driver.frame(&input)
        };
        last_dt = if fast { FAST_DT } else { FRAME.as_secs_f32() };

        for event in &events {
            match event {
                GameEvent::TargetHit { points, bullseye: true } => {
                    log::info!("Bullseye! +{}", points)
                }
                GameEvent::GameOver { score, high_score } => {
                    log::info!("Final score {} (best {})", score, high_score);
                    match serde_json::to_string(&driver.state.snapshot()) {
                        Ok(json) => log::debug!("Final frame: {}", json),
                        Err(err) => log::warn!("Could not serialize snapshot: {}", err),
                    }
                    driver.state.quit();
                }
                _ => {}
            }
        }

        if !fast {
            thread::sleep(FRAME);
        }
    }

    log::info!("Goodbye");
}
