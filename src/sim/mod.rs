//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` passed to a tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order of entities)
//! - No rendering or platform dependencies

pub mod charge;
pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod layout;
pub mod rings;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use charge::ChargeState;
pub use difficulty::{Difficulty, DifficultyConfig};
pub use effects::{Particle, Popup, Rgb};
pub use layout::Layout;
pub use rings::{Ring, ScoringRings};
pub use session::launch;
pub use snapshot::Snapshot;
pub use state::{
    Arrow, Attachment, GameEvent, GamePhase, GameState, MAX_PARTICLES, PowerUp, PowerUpKind,
    Target, TargetId,
};
pub use tick::{TickInput, advance, tick};
