use glam::Vec3;

use crate::constants::{WHEEL_OFFSET_SCALE, WORLD_SMOOTHING};
use crate::error::Result;
use crate::smoothing::{Smoothed, SmoothingFactor};

/// Scroll-driven travel along the project path.
///
/// `target_offset` saturates in `[0, world_size]`; `current_offset` eases
/// toward it. The sun offset follows raw wheel input with no clamp, so the
/// light can drift past the world edge while travel has stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationController {
    world_size: f32,
    offset: Smoothed,
    sun_offset: Vec3,
}

impl NavigationController {
    /// Controller eased by the world smoothing factor.
    pub fn new(world_size: f32) -> Result<Self> {
        Ok(Self::with_smoothing(world_size, SmoothingFactor::new(WORLD_SMOOTHING)?))
    }

    pub fn with_smoothing(world_size: f32, smoothing: SmoothingFactor) -> Self {
        Self {
            world_size: world_size.max(0.0),
            offset: Smoothed::new(0.0, smoothing),
            sun_offset: Vec3::ZERO,
        }
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            return;
        }
        let step = delta_y * WHEEL_OFFSET_SCALE;
        self.offset.target = (self.offset.target + step).clamp(0.0, self.world_size);
        self.sun_offset.x += step;
    }

    /// Ease the travelled offset one tick toward the target.
    pub fn tick(&mut self) {
        // rounding can land a hair past the target
        self.offset.current = self.offset.tick().clamp(0.0, self.world_size);
    }

    #[inline]
    pub fn world_size(&self) -> f32 {
        self.world_size
    }

    #[inline]
    pub fn target_offset(&self) -> f32 {
        self.offset.target
    }

    #[inline]
    pub fn current_offset(&self) -> f32 {
        self.offset.current
    }

    #[inline]
    pub fn sun_offset(&self) -> Vec3 {
        self.sun_offset
    }

    /// Translation of the dynamic group along the path axis.
    #[inline]
    pub fn group_translation(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.offset.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_wheel_step_scales_delta() {
        let mut nav = NavigationController::new(130.0).unwrap();
        nav.on_wheel(500.0);
        assert!((nav.target_offset() - 5.0).abs() < 1e-5);
        assert_eq!(nav.current_offset(), 0.0);
    }

    #[test]
    fn upward_scroll_at_start_saturates_at_zero() {
        let mut nav = NavigationController::new(130.0).unwrap();
        nav.on_wheel(-300.0);
        assert_eq!(nav.target_offset(), 0.0);
        assert!((nav.sun_offset().x + 3.0).abs() < 1e-5);
    }

    #[test]
    fn tick_eases_by_tenth() {
        let mut nav = NavigationController::new(130.0).unwrap();
        nav.on_wheel(1000.0);
        nav.tick();
        assert!((nav.current_offset() - 1.0).abs() < 1e-5);
        assert_eq!(nav.group_translation(), Vec3::new(0.0, 0.0, nav.current_offset()));
    }

    #[test]
    fn custom_smoothing_sets_the_step() {
        let half = SmoothingFactor::new(0.5).unwrap();
        let mut nav = NavigationController::with_smoothing(130.0, half);
        nav.on_wheel(1000.0);
        nav.tick();
        assert!((nav.current_offset() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let mut nav = NavigationController::new(130.0).unwrap();
        nav.on_wheel(f32::NAN);
        nav.on_wheel(f32::INFINITY);
        assert_eq!(nav.target_offset(), 0.0);
        assert_eq!(nav.sun_offset(), Vec3::ZERO);
    }
}
