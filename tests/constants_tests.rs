// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so host constants are included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use folio_core::*;

fn unit_color(c: [f32; 4]) -> bool {
    c.iter().all(|v| (0.0..=1.0).contains(v))
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_factors_are_open_unit_interval() {
    assert!(SmoothingFactor::new(PARTICLE_SMOOTHING).is_ok());
    assert!(SmoothingFactor::new(WORLD_SMOOTHING).is_ok());
    // the world eases faster than the backdrop
    assert!(WORLD_SMOOTHING > PARTICLE_SMOOTHING);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_rotation_ceiling_is_reachable() {
    assert!(MAX_CAMERA_ROTATION > 0.0);
    // full pointer deflection must hit the ceiling
    assert!(CAMERA_ROTATION_SCALE >= MAX_CAMERA_ROTATION);
}

#[test]
fn palette_is_normalized() {
    for c in [
        PARTICLE_COLOR,
        WATER_COLOR,
        SAND_COLOR,
        GRASS_COLOR,
        SUN_COLOR,
        MARKER_COLOR,
    ] {
        assert!(unit_color(c), "{c:?}");
    }
    for c in [PARTICLE_CLEAR, WORLD_CLEAR] {
        assert!(unit_color([c.r as f32, c.g as f32, c.b as f32, c.a as f32]));
    }
    assert!(WATER_COLOR[3] < 1.0, "water must be translucent");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn markers_sit_above_water_and_are_pickable() {
    assert!(MARKER_HEIGHT > WATER_LEVEL);
    assert!(MARKER_PICK_RADIUS >= MARKER_SIZE * 0.5);
    assert!(SUN_BASE_POSITION.y > MARKER_HEIGHT);
    assert!(LABEL_LIFT > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn cameras_frame_their_scenes() {
    assert!(PARTICLE_ZNEAR < PARTICLE_CAMERA_Z && PARTICLE_CAMERA_Z < PARTICLE_ZFAR);
    assert!(PARTICLE_EXTENT < PARTICLE_ZFAR);
    assert!(WORLD_ZNEAR < WORLD_CAMERA_EYE.z);
    assert!(WORLD_CAMERA_EYE.y > MARKER_HEIGHT);
}

#[test]
fn labels_never_capture_pointer_events() {
    assert!(LABEL_STYLE.contains("pointer-events:none"));
    assert!(LABEL_STYLE.contains("position:absolute"));
    assert!(!LABEL_CLASS.is_empty());
}
