//! Parallax point-cloud backdrop.
//!
//! The cloud is generated once and never touched again; pointer input rotates
//! the cloud's transform and page-wheel input dollies the camera.

use glam::{EulerRot, Mat4, Vec2, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::camera::Camera;
use crate::constants::{
    PARTICLE_AUTO_ROTATION_STEP, PARTICLE_CAMERA_Z, PARTICLE_COUNT, PARTICLE_EXTENT,
    PARTICLE_FOV_DEG, PARTICLE_POINTER_ROTATION, PARTICLE_SCROLL_DEPTH, PARTICLE_SMOOTHING,
    PARTICLE_ZFAR, PARTICLE_ZNEAR,
};
use crate::error::Result;
use crate::input::{InputEvent, InputTracker, Viewport};
use crate::smoothing::{Smoothed, SmoothingFactor};

// Sub-pixel slack when comparing the page bottom (fractional device ratios).
const PAGE_EDGE_TOLERANCE: f32 = 1.0;

/// Fixed-size random point cloud.
pub struct ParticleCloud {
    positions: Vec<Vec3>,
}

impl ParticleCloud {
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-PARTICLE_EXTENT..=PARTICLE_EXTENT),
                    rng.gen_range(-PARTICLE_EXTENT..=PARTICLE_EXTENT),
                    rng.gen_range(-PARTICLE_EXTENT..=PARTICLE_EXTENT),
                )
            })
            .collect();
        Self { positions }
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Document scroll position sampled when a wheel event arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageScroll {
    pub scroll_top: f32,
    pub viewport_height: f32,
    pub document_height: f32,
}

impl PageScroll {
    #[inline]
    pub fn at_top(&self) -> bool {
        self.scroll_top <= 0.0
    }

    #[inline]
    pub fn at_bottom(&self) -> bool {
        self.scroll_top + self.viewport_height >= self.document_height - PAGE_EDGE_TOLERANCE
    }

    /// True when the page cannot scroll further in the wheel's direction.
    #[inline]
    pub fn is_dead_zone(&self, delta_y: f32) -> bool {
        (delta_y < 0.0 && self.at_top()) || (delta_y > 0.0 && self.at_bottom())
    }
}

/// Camera depth and cloud orientation, each eased toward its own target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleFieldState {
    depth: Smoothed,
    rotation: Smoothed<Vec2>,
    auto_rotate: bool,
}

impl ParticleFieldState {
    pub fn new(auto_rotate: bool) -> Result<Self> {
        Ok(Self::with_smoothing(auto_rotate, SmoothingFactor::new(PARTICLE_SMOOTHING)?))
    }

    pub fn with_smoothing(auto_rotate: bool, smoothing: SmoothingFactor) -> Self {
        Self {
            depth: Smoothed::new(PARTICLE_CAMERA_Z, smoothing),
            rotation: Smoothed::new(Vec2::ZERO, smoothing),
            auto_rotate,
        }
    }

    /// Dolly target update. No-op at the page edges.
    pub fn on_wheel(&mut self, delta_y: f32, page: PageScroll) {
        if !delta_y.is_finite() || page.is_dead_zone(delta_y) {
            return;
        }
        self.depth.target += delta_y * PARTICLE_SCROLL_DEPTH;
    }

    /// One animation tick: pick rotation targets, then ease everything.
    pub fn tick(mut self, input: &InputTracker) -> Self {
        self.rotation.target = if self.auto_rotate {
            self.rotation.target + Vec2::new(0.0, PARTICLE_AUTO_ROTATION_STEP)
        } else {
            // pointer y tilts about X, pointer x spins about Y
            let p = input.pointer();
            Vec2::new(p.y, p.x) * PARTICLE_POINTER_ROTATION
        };
        self.depth.tick();
        self.rotation.tick();
        self
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.depth.current
    }

    #[inline]
    pub fn target_z(&self) -> f32 {
        self.depth.target
    }

    #[inline]
    pub fn rotation(&self) -> Vec2 {
        self.rotation.current
    }

    #[inline]
    pub fn target_rotation(&self) -> Vec2 {
        self.rotation.target
    }

    #[inline]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }
}

/// Everything the renderer needs for one particle frame.
#[derive(Clone, Debug)]
pub struct ParticleFrame {
    pub model: Mat4,
    pub camera: Camera,
}

pub struct ParticleFieldScene {
    cloud: ParticleCloud,
    state: ParticleFieldState,
    input: InputTracker,
}

impl ParticleFieldScene {
    /// Narrow-viewport classification happens here, once.
    pub fn new(viewport: Viewport, seed: u64) -> Result<Self> {
        let auto_rotate = viewport.is_narrow();
        log::info!(
            "[particles] {} points, viewport {}x{}, auto_rotate={}",
            PARTICLE_COUNT,
            viewport.width,
            viewport.height,
            auto_rotate
        );
        Ok(Self {
            cloud: ParticleCloud::generate(PARTICLE_COUNT, seed),
            state: ParticleFieldState::new(auto_rotate)?,
            input: InputTracker::new(viewport),
        })
    }

    pub fn handle(&mut self, event: InputEvent, page: PageScroll) {
        self.input.record(event);
        if let InputEvent::Wheel { delta_y } = event {
            self.state.on_wheel(delta_y, page);
        }
    }

    pub fn tick(&mut self) {
        self.state = self.state.tick(&self.input);
    }

    pub fn frame(&self) -> ParticleFrame {
        let viewport = self.input.viewport();
        ParticleFrame {
            model: Mat4::from_euler(
                EulerRot::XYZ,
                self.state.rotation().x,
                self.state.rotation().y,
                0.0,
            ),
            camera: Camera::new(
                Vec3::new(0.0, 0.0, self.state.z()),
                Vec2::ZERO,
                viewport.aspect(),
                PARTICLE_FOV_DEG.to_radians(),
                PARTICLE_ZNEAR,
                PARTICLE_ZFAR,
            ),
        }
    }

    #[inline]
    pub fn cloud(&self) -> &ParticleCloud {
        &self.cloud
    }

    #[inline]
    pub fn state(&self) -> ParticleFieldState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MID_PAGE: PageScroll = PageScroll {
        scroll_top: 400.0,
        viewport_height: 800.0,
        document_height: 3000.0,
    };

    #[test]
    fn cloud_is_seeded_and_bounded() {
        let a = ParticleCloud::generate(PARTICLE_COUNT, 9);
        let b = ParticleCloud::generate(PARTICLE_COUNT, 9);
        assert_eq!(a.len(), PARTICLE_COUNT);
        assert_eq!(a.positions(), b.positions());
        for p in a.positions() {
            for c in p.to_array() {
                assert!((-PARTICLE_EXTENT..=PARTICLE_EXTENT).contains(&c));
            }
        }
    }

    #[test]
    fn wheel_moves_target_mid_page() {
        let mut s = ParticleFieldState::new(false).unwrap();
        s.on_wheel(100.0, MID_PAGE);
        assert!((s.target_z() - (PARTICLE_CAMERA_Z + 10.0)).abs() < 1e-4);
        s.on_wheel(-50.0, MID_PAGE);
        assert!((s.target_z() - (PARTICLE_CAMERA_Z + 5.0)).abs() < 1e-4);
    }

    #[test]
    fn auto_rotation_ignores_pointer() {
        let mut input = InputTracker::new(Viewport::new(400.0, 800.0));
        input.record(InputEvent::PointerMove {
            client_x: 400.0,
            client_y: 0.0,
        });
        let mut s = ParticleFieldState::new(true).unwrap();
        for _ in 0..10 {
            s = s.tick(&input);
        }
        assert!((s.target_rotation().y - 10.0 * PARTICLE_AUTO_ROTATION_STEP).abs() < 1e-6);
        assert_eq!(s.target_rotation().x, 0.0);
        assert!(s.rotation().y > 0.0 && s.rotation().y < s.target_rotation().y);
    }

    #[test]
    fn pointer_sets_rotation_target() {
        let mut input = InputTracker::new(Viewport::new(1200.0, 800.0));
        input.record(InputEvent::PointerMove {
            client_x: 1200.0,
            client_y: 800.0,
        });
        let s = ParticleFieldState::new(false).unwrap().tick(&input);
        assert_eq!(
            s.target_rotation(),
            Vec2::new(-PARTICLE_POINTER_ROTATION, PARTICLE_POINTER_ROTATION)
        );
        assert!((s.rotation().y - PARTICLE_POINTER_ROTATION * PARTICLE_SMOOTHING).abs() < 1e-6);
    }

    #[test]
    fn scene_classifies_viewport_once() {
        let scene = ParticleFieldScene::new(Viewport::new(320.0, 640.0), 1).unwrap();
        assert!(scene.state().auto_rotate());
        let scene = ParticleFieldScene::new(Viewport::new(1440.0, 900.0), 1).unwrap();
        assert!(!scene.state().auto_rotate());
    }

    #[test]
    fn dolly_settles_on_the_target_without_overshoot() {
        let mut s = ParticleFieldState::new(false).unwrap();
        s.on_wheel(300.0, MID_PAGE);
        let input = InputTracker::new(Viewport::new(1200.0, 800.0));
        let target = s.target_z();
        let mut prev = s.z();
        for _ in 0..400 {
            s = s.tick(&input);
            assert!(s.z() >= prev && s.z() <= target + 1e-4);
            prev = s.z();
        }
        assert!((s.z() - target).abs() < 1e-2);
    }
}
