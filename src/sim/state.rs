//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::charge::ChargeState;
use super::collision::{arrow_center_from_tip, arrow_tip, point_in_circle};
use super::difficulty::{Difficulty, DifficultyConfig, MIN_TARGET_RADIUS};
use super::effects::{Particle, Popup};
use super::layout::Layout;
use super::rings::ScoringRings;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen, all state retained
    Paused,
    /// Time ran out, waiting for acknowledgement
    GameOver,
}

/// Handle to a target in the session's target slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Where a stuck arrow sits on its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub target: TargetId,
    /// Tip position relative to the target's logical center at impact
    pub tip_offset: Vec2,
}

/// An arrow, in flight or stuck in the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub id: u32,
    /// Center of the shaft
    pub pos: Vec2,
    pub vel: Vec2,
    /// Orientation (radians); follows velocity while in flight
    pub angle: f32,
    pub stuck: Option<Attachment>,
}

impl Arrow {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, angle: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            angle,
            stuck: None,
        }
    }

    #[inline]
    pub fn is_stuck(&self) -> bool {
        self.stuck.is_some()
    }

    /// Collision point
    #[inline]
    pub fn tip(&self, arrow_len: f32) -> Vec2 {
        arrow_tip(self.pos, self.angle, arrow_len)
    }

    /// Gravity, proportional drag, explicit Euler
    ///
    /// Drag removes `drag * dt` of the current velocity each tick. This is
    /// not an exact exponential decay and results depend on the tick rate.
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        if self.is_stuck() {
            return;
        }
        self.vel.y += gravity * dt;
        self.vel.x -= self.vel.x * ARROW_DRAG * dt;
        self.vel.y -= self.vel.y * ARROW_DRAG * dt;
        self.pos += self.vel * dt;
        self.angle = self.vel.y.atan2(self.vel.x);
    }

    /// Embed the tip in `target` at `tip`
    pub fn stick_to(&mut self, target: &Target, tip: Vec2, arrow_len: f32) {
        self.stuck = Some(Attachment {
            target: target.id,
            tip_offset: tip - target.center,
        });
        self.pos = arrow_center_from_tip(tip, self.angle, arrow_len);
        self.vel = Vec2::ZERO;
    }

    /// Ride along with the target this arrow is stuck in
    pub fn follow(&mut self, target: &Target, arrow_len: f32) {
        if let Some(attachment) = self.stuck {
            if attachment.target == target.id {
                let tip = target.center + attachment.tip_offset;
                self.pos = arrow_center_from_tip(tip, self.angle, arrow_len);
            }
        }
    }
}

/// The drifting ring target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    /// Logical center used for all hit tests
    pub center: Vec2,
    pub radius: f32,
    /// Horizontal velocity (pixels/s)
    pub vx: f32,
    /// Hit-feedback jitter amplitude, decays every tick
    pub wobble: f32,
    pub rings: ScoringRings,
}

impl Target {
    pub fn new(id: TargetId, center: Vec2, radius: f32, vx: f32) -> Self {
        let radius = radius.max(MIN_TARGET_RADIUS);
        Self {
            id,
            center,
            radius,
            vx,
            wobble: 0.0,
            rings: ScoringRings::for_radius(radius),
        }
    }

    /// Starting position for a fresh session
    pub fn home(layout: &Layout) -> Vec2 {
        Vec2::new(
            layout.width - (layout.width * 0.18).floor(),
            layout.ground_y - (layout.height * 0.18).floor(),
        )
    }

    /// Adopt a preset's radius and speed, rebuilding the rings
    pub fn apply_config(&mut self, config: &DifficultyConfig) {
        self.radius = config.target_radius.max(MIN_TARGET_RADIUS);
        self.vx = config.target_speed;
        self.rings = ScoringRings::for_radius(self.radius);
    }

    /// Drift, decay wobble and wrap around. Returns true on respawn.
    pub fn advance<R: Rng>(&mut self, dt: f32, layout: &Layout, rng: &mut R) -> bool {
        self.center.x += self.vx * dt;
        self.wobble *= WOBBLE_DECAY;
        if self.center.x < -self.radius - TARGET_WRAP_MARGIN {
            let (top, span) = layout.target_band();
            self.center.x = layout.width + self.radius + TARGET_WRAP_MARGIN;
            self.center.y = top + rng.random_range(0.0..span);
            return true;
        }
        false
    }

    /// Tip-in-target test against the logical center
    #[inline]
    pub fn hit(&self, point: Vec2) -> bool {
        point_in_circle(point, self.center, self.radius)
    }

    /// Points for a hit at `point`, `None` if it misses
    pub fn points_for(&self, point: Vec2) -> Option<u32> {
        self.rings.points_at(point.distance(self.center))
    }

    /// Kick off hit-feedback jitter
    pub fn wobble<R: Rng>(&mut self, rng: &mut R) {
        self.wobble = WOBBLE_MIN + rng.random::<f32>() * WOBBLE_SPREAD;
    }

    /// Vertical render-only displacement
    pub fn render_offset(&self) -> f32 {
        (self.wobble * WOBBLE_RENDER_FREQ).sin()
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Grants extra arrows
    ExtraArrows,
}

impl PowerUpKind {
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::ExtraArrows => "+2 Arrows!",
        }
    }
}

/// A drifting pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub vx: f32,
    /// Seconds alive, drives the cosmetic bob
    pub bob: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vx: POWERUP_SPEED,
            bob: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.x += self.vx * dt;
        self.bob += dt;
    }

    /// Position including the cosmetic bob
    pub fn render_pos(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, (self.bob * 3.0).sin() * 3.0)
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { difficulty: Difficulty },
    ArrowFired { speed: f32, angle: f32 },
    TargetHit { points: u32, bullseye: bool },
    PowerUpCollected { kind: PowerUpKind },
    ArrowLost,
    TargetRespawned,
    GameOver { score: u32, high_score: u32 },
    /// A new high score that should be persisted
    NewHighScore(u32),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub layout: Layout,
    /// Preset applied on the next start/restart
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub score: u32,
    pub arrows_left: u32,
    pub seconds_left: u32,
    pub high_score: u32,
    /// Seconds of simulated play (only advances while Playing)
    pub clock: f64,
    pub time_ticks: u64,
    /// Current aim, always within the firing arc
    pub aim: f32,
    pub charge: ChargeState,
    pub target: Target,
    pub arrows: Vec<Arrow>,
    pub particles: Vec<Particle>,
    pub popups: Vec<Popup>,
    pub powerups: Vec<PowerUp>,
    /// Live particle cap (0 disables particles)
    pub max_particles: usize,
    /// Set by `quit`; the host loop stops when it sees it
    pub quit_requested: bool,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

/// Default live particle cap
pub const MAX_PARTICLES: usize = 500;

impl GameState {
    /// Create a session in the menu with the given seed
    pub fn new(seed: u64, layout: Layout, difficulty: Difficulty) -> Self {
        let config = difficulty.config(&layout);
        let target = Target::new(
            TargetId(1),
            Target::home(&layout),
            config.target_radius,
            config.target_speed,
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            layout,
            difficulty,
            phase: GamePhase::Menu,
            score: 0,
            arrows_left: config.arrow_count,
            seconds_left: config.time_limit_secs,
            high_score: 0,
            clock: 0.0,
            time_ticks: 0,
            aim: DEFAULT_AIM,
            charge: ChargeState::default(),
            target,
            arrows: Vec::new(),
            particles: Vec::new(),
            popups: Vec::new(),
            powerups: Vec::new(),
            max_particles: MAX_PARTICLES,
            quit_requested: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Look a target up by handle
    pub fn target_by_id(&self, id: TargetId) -> Option<&Target> {
        (self.target.id == id).then_some(&self.target)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn target_at(center: Vec2, radius: f32) -> Target {
        Target::new(TargetId(1), center, radius, -180.0)
    }

    #[test]
    fn test_arrow_integration_single_tick() {
        let mut arrow = Arrow::new(1, Vec2::ZERO, Vec2::new(600.0, -300.0), 0.0);
        arrow.integrate(DT, 950.0);

        let vy = (-300.0 + 950.0 * DT) * (1.0 - ARROW_DRAG * DT);
        let vx = 600.0 * (1.0 - ARROW_DRAG * DT);
        assert!((arrow.vel.x - vx).abs() < 1e-3);
        assert!((arrow.vel.y - vy).abs() < 1e-3);
        assert!((arrow.pos - Vec2::new(vx, vy) * DT).length() < 1e-4);
        assert!((arrow.angle - vy.atan2(vx)).abs() < 1e-6);
    }

    #[test]
    fn test_drag_is_per_tick_multiplicative() {
        // Without gravity, n ticks scale speed by (1 - drag*dt)^n exactly,
        // which is not the analytic exp(-drag*t)
        let mut arrow = Arrow::new(1, Vec2::ZERO, Vec2::new(1000.0, 0.0), 0.0);
        for _ in 0..60 {
            arrow.integrate(DT, 0.0);
        }
        let expected = 1000.0 * (1.0 - ARROW_DRAG * DT).powi(60);
        assert!((arrow.vel.x - expected).abs() < 1e-2);
        assert_eq!(arrow.angle, 0.0);
    }

    #[test]
    fn test_stuck_arrow_does_not_integrate() {
        let target = target_at(Vec2::new(500.0, 300.0), 50.0);
        let mut arrow = Arrow::new(1, Vec2::new(440.0, 300.0), Vec2::new(500.0, 0.0), 0.0);
        let tip = arrow.tip(56.0);
        arrow.stick_to(&target, tip, 56.0);

        assert_eq!(arrow.vel, Vec2::ZERO);
        let before = arrow.pos;
        arrow.integrate(DT, 950.0);
        assert_eq!(arrow.pos, before);
        assert_eq!(arrow.tip(56.0), tip);
    }

    #[test]
    fn test_stuck_arrow_follows_target() {
        let mut target = target_at(Vec2::new(500.0, 300.0), 50.0);
        let mut arrow = Arrow::new(1, Vec2::ZERO, Vec2::new(300.0, 100.0), 0.3);
        let tip = Vec2::new(480.0, 310.0);
        arrow.stick_to(&target, tip, 56.0);

        target.center += Vec2::new(-120.0, 45.0);
        arrow.follow(&target, 56.0);
        let expected = target.center + Vec2::new(-20.0, 10.0);
        assert!((arrow.tip(56.0) - expected).length() < 1e-3);

        // A different target handle leaves the arrow alone
        let other = Target::new(TargetId(9), Vec2::ZERO, 50.0, 0.0);
        let before = arrow.pos;
        arrow.follow(&other, 56.0);
        assert_eq!(arrow.pos, before);
    }

    #[test]
    fn test_target_hit_and_points() {
        let r = 100.0;
        let target = target_at(Vec2::new(0.0, 0.0), r);
        assert!(target.hit(Vec2::ZERO));
        assert_eq!(target.points_for(Vec2::ZERO), Some(100));
        assert!(target.hit(Vec2::new(r, 0.0)));
        assert_eq!(target.points_for(Vec2::new(r, 0.0)), Some(10));
        assert!(!target.hit(Vec2::new(r + 0.01, 0.0)));
        assert_eq!(target.points_for(Vec2::new(r + 0.01, 0.0)), None);
    }

    #[test]
    fn test_tiny_radius_keeps_rings_ordered() {
        let target = target_at(Vec2::ZERO, 3.0);
        assert_eq!(target.radius, MIN_TARGET_RADIUS);
        assert!(target.rings.is_well_ordered());

        let mut target = target_at(Vec2::ZERO, 57.0);
        target.apply_config(&DifficultyConfig {
            arrow_count: 5,
            time_limit_secs: 10,
            target_radius: 1.0,
            target_speed: -50.0,
        });
        assert_eq!(target.radius, MIN_TARGET_RADIUS);
        assert!(target.rings.is_well_ordered());
        assert_eq!(target.points_for(Vec2::ZERO), Some(100));
    }

    #[test]
    fn test_target_wraps_into_safe_band() {
        let layout = Layout::default();
        let r = 57.0;
        let mut rng = Pcg32::seed_from_u64(3);
        let mut target = target_at(Vec2::new(-r - 41.0, 200.0), r);
        target.vx = 0.0;

        assert!(target.advance(DT, &layout, &mut rng));
        assert!(target.center.x >= layout.width + r);
        let (top, span) = layout.target_band();
        assert!(target.center.y >= top && target.center.y < top + span);
    }

    #[test]
    fn test_target_does_not_wrap_early() {
        let layout = Layout::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut target = target_at(Vec2::new(-50.0, 200.0), 57.0);
        target.vx = 0.0;
        assert!(!target.advance(DT, &layout, &mut rng));
        assert_eq!(target.center, Vec2::new(-50.0, 200.0));
    }

    #[test]
    fn test_wobble_decays_and_stays_cosmetic() {
        let layout = Layout::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut target = target_at(Vec2::new(400.0, 300.0), 57.0);
        target.vx = 0.0;
        target.wobble(&mut rng);
        assert!(target.wobble >= WOBBLE_MIN && target.wobble < WOBBLE_MIN + WOBBLE_SPREAD);

        let start = target.wobble;
        target.advance(DT, &layout, &mut rng);
        assert!((target.wobble - start * WOBBLE_DECAY).abs() < 1e-5);
        // Hit geometry ignores the jitter
        assert_eq!(target.center, Vec2::new(400.0, 300.0));
        assert!(target.hit(Vec2::new(400.0, 300.0 + 57.0)));

        for _ in 0..400 {
            target.advance(DT, &layout, &mut rng);
        }
        assert!(target.wobble < 1e-6);
    }

    #[test]
    fn test_powerup_drift_and_bob() {
        let mut p = PowerUp::new(1, PowerUpKind::ExtraArrows, Vec2::new(1000.0, 200.0));
        p.advance(0.5);
        assert_eq!(p.pos, Vec2::new(950.0, 200.0));
        assert_eq!(p.bob, 0.5);
        assert!((p.render_pos().y - p.pos.y).abs() <= 3.0);
    }

    #[test]
    fn test_new_state_in_menu() {
        let state = GameState::new(42, Layout::default(), Difficulty::Hard);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.arrows_left, 10);
        assert_eq!(state.seconds_left, 45);
        assert_eq!(state.target.radius, 44.0);
        assert!(state.target_by_id(state.target.id).is_some());
        assert!(state.target_by_id(TargetId(99)).is_none());
    }
}
