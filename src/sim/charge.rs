//! Bow charge: hold time to launch speed

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CHARGE, MAX_SPEED, MIN_SPEED};

/// Sine ease-out: fast initial growth, soft cap at 1
#[inline]
pub fn ease(ratio: f32) -> f32 {
    (ratio.clamp(0.0, 1.0) * std::f32::consts::FRAC_PI_2).sin()
}

/// Fraction of a full draw reached after holding for `held_secs`
#[inline]
pub fn charge_ratio(held_secs: f32) -> f32 {
    held_secs.clamp(0.0, MAX_CHARGE) / MAX_CHARGE
}

/// Launch speed for a charge ratio, always within [MIN_SPEED, MAX_SPEED]
#[inline]
pub fn launch_speed(ratio: f32) -> f32 {
    MIN_SPEED + ease(ratio) * (MAX_SPEED - MIN_SPEED)
}

/// Cosmetic bowstring pull (pixels) for a charge ratio
#[inline]
pub fn bow_pull(ratio: f32) -> f32 {
    6.0 + 36.0 * ease(ratio)
}

/// Charge in progress, timed against the session clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeState {
    pub charging: bool,
    /// Session clock value when the draw started
    pub started_at: f64,
}

impl ChargeState {
    pub fn begin(&mut self, now: f64) {
        if !self.charging {
            self.charging = true;
            self.started_at = now;
        }
    }

    /// Stop charging and return the reached ratio, or `None` if idle
    pub fn release(&mut self, now: f64) -> Option<f32> {
        if !self.charging {
            return None;
        }
        let ratio = self.ratio(now);
        self.charging = false;
        Some(ratio)
    }

    pub fn cancel(&mut self) {
        self.charging = false;
    }

    /// Current ratio (0 when idle)
    pub fn ratio(&self, now: f64) -> f32 {
        if self.charging {
            charge_ratio((now - self.started_at) as f32)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_endpoints() {
        assert_eq!(launch_speed(charge_ratio(0.0)), MIN_SPEED);
        assert!((launch_speed(charge_ratio(MAX_CHARGE)) - MAX_SPEED).abs() < 1e-3);
        // Holding past full draw changes nothing
        assert_eq!(charge_ratio(10.0), 1.0);
    }

    #[test]
    fn test_charge_state_lifecycle() {
        let mut charge = ChargeState::default();
        assert_eq!(charge.release(1.0), None);

        charge.begin(2.0);
        // A second begin keeps the first start
        charge.begin(2.5);
        assert!((charge.ratio(2.8) - 0.5).abs() < 1e-5);

        let ratio = charge.release(3.6).unwrap();
        assert!((ratio - 1.0).abs() < 1e-6);
        assert!(!charge.charging);
        assert_eq!(charge.ratio(4.0), 0.0);
    }

    #[test]
    fn test_bow_pull_range() {
        assert_eq!(bow_pull(0.0), 6.0);
        assert!((bow_pull(1.0) - 42.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_speed_monotonic(a in 0.0f32..MAX_CHARGE, b in 0.0f32..MAX_CHARGE) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(launch_speed(charge_ratio(lo)) <= launch_speed(charge_ratio(hi)));
        }

        #[test]
        fn prop_speed_bounded(held in -5.0f32..10.0) {
            let speed = launch_speed(charge_ratio(held));
            prop_assert!(speed >= MIN_SPEED);
            prop_assert!(speed <= MAX_SPEED);
        }
    }
}
