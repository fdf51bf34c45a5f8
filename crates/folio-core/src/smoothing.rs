//! Exponential-decay easing shared by both visualizations.
//!
//! Each call moves a fixed fraction of the remaining distance, so convergence
//! speed follows the host frame rate rather than wall-clock time. Both scenes
//! are tuned against a nominal 60 Hz tick.

use std::ops::{Add, Mul, Sub};

use crate::error::{CoreError, Result};

/// Values that can be eased: scalars and glam vectors.
pub trait Ease: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Ease for T where T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T> {}

#[inline]
pub fn advance<T: Ease>(current: T, target: T, factor: f32) -> T {
    current + (target - current) * factor
}

/// A smoothing factor known to lie in the open interval (0, 1).
///
/// Inside that interval every step is a convex combination of `current` and
/// `target`, so the value approaches a fixed target monotonically and never
/// passes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingFactor(f32);

impl SmoothingFactor {
    pub fn new(factor: f32) -> Result<Self> {
        if factor > 0.0 && factor < 1.0 {
            Ok(Self(factor))
        } else {
            Err(CoreError::InvalidSmoothingFactor(factor))
        }
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

/// A value eased toward a target once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed<T = f32> {
    pub current: T,
    pub target: T,
    factor: SmoothingFactor,
}

impl<T: Ease> Smoothed<T> {
    pub fn new(value: T, factor: SmoothingFactor) -> Self {
        Self {
            current: value,
            target: value,
            factor,
        }
    }

    pub fn factor(&self) -> SmoothingFactor {
        self.factor
    }

    #[inline]
    pub fn tick(&mut self) -> T {
        self.current = advance(self.current, self.target, self.factor.get());
        self.current
    }
}

impl Smoothed<f32> {
    /// Number of ticks until `current` is within `epsilon` of a fixed target.
    ///
    /// Closed form of `|d|·(1−f)^n ≤ ε`; zero when already settled.
    pub fn ticks_to_settle(&self, epsilon: f32) -> u32 {
        let distance = (self.target - self.current).abs();
        if distance <= epsilon || epsilon <= 0.0 {
            return 0;
        }
        let keep = 1.0 - self.factor.get();
        ((epsilon / distance).ln() / keep.ln()).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn factor_outside_open_interval_is_rejected() {
        assert!(SmoothingFactor::new(0.0).is_err());
        assert!(SmoothingFactor::new(1.0).is_err());
        assert!(SmoothingFactor::new(-0.2).is_err());
        assert!(SmoothingFactor::new(f32::NAN).is_err());
        assert!(SmoothingFactor::new(0.05).is_ok());
    }

    #[test]
    fn advance_moves_fixed_fraction() {
        assert!((advance(0.0_f32, 10.0, 0.1) - 1.0).abs() < 1e-6);
        assert!((advance(10.0_f32, 0.0, 0.5) - 5.0).abs() < 1e-6);
        let v = advance(Vec2::ZERO, Vec2::new(2.0, -4.0), 0.25);
        assert!((v - Vec2::new(0.5, -1.0)).length() < 1e-6);
    }

    #[test]
    fn converges_without_overshoot() {
        for factor in [0.01_f32, 0.05, 0.1, 0.5, 0.9, 0.99] {
            for (start, target) in [(0.0_f32, 130.0_f32), (500.0, -20.0), (-3.0, -3.5)] {
                let mut s = Smoothed::new(start, SmoothingFactor::new(factor).unwrap());
                s.target = target;
                let bound = s.ticks_to_settle(1e-3);
                let mut prev_gap = (target - start).abs();
                for _ in 0..bound {
                    s.tick();
                    let gap = (target - s.current).abs();
                    assert!(gap <= prev_gap, "gap grew at factor {factor}");
                    // same side of the target as the start
                    assert!((s.current - target) * (start - target) >= 0.0);
                    prev_gap = gap;
                }
                assert!(
                    (s.current - target).abs() <= 2e-3,
                    "factor {factor}: {} vs {target} after {bound} ticks",
                    s.current
                );
            }
        }
    }

    #[test]
    fn vectors_ease_per_component() {
        let mut v = Smoothed::new(Vec2::ZERO, SmoothingFactor::new(0.5).unwrap());
        v.target = Vec2::new(4.0, -8.0);
        v.tick();
        assert!((v.current - Vec2::new(2.0, -4.0)).length() < 1e-6);
    }

    #[test]
    fn settled_value_needs_no_ticks() {
        let s = Smoothed::new(4.0_f32, SmoothingFactor::new(0.1).unwrap());
        assert_eq!(s.ticks_to_settle(1e-3), 0);
    }
}
