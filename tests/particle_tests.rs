use folio_core::{
    InputEvent, PageScroll, ParticleFieldScene, Viewport, PARTICLE_CAMERA_Z, PARTICLE_SMOOTHING,
};
use glam::Vec3;

const TOP: PageScroll = PageScroll {
    scroll_top: 0.0,
    viewport_height: 800.0,
    document_height: 2400.0,
};
const BOTTOM: PageScroll = PageScroll {
    scroll_top: 1600.0,
    viewport_height: 800.0,
    document_height: 2400.0,
};
const MIDDLE: PageScroll = PageScroll {
    scroll_top: 700.0,
    viewport_height: 800.0,
    document_height: 2400.0,
};

fn scene() -> ParticleFieldScene {
    ParticleFieldScene::new(Viewport::new(1280.0, 800.0), 42).unwrap()
}

#[test]
fn wheel_up_at_top_is_a_dead_zone() {
    let mut s = scene();
    s.handle(InputEvent::Wheel { delta_y: -120.0 }, TOP);
    assert_eq!(s.state().target_z(), PARTICLE_CAMERA_Z);
    // scrolling down from the top still dollies
    s.handle(InputEvent::Wheel { delta_y: 120.0 }, TOP);
    assert!(s.state().target_z() > PARTICLE_CAMERA_Z);
}

#[test]
fn wheel_down_at_bottom_is_a_dead_zone() {
    let mut s = scene();
    s.handle(InputEvent::Wheel { delta_y: 120.0 }, BOTTOM);
    assert_eq!(s.state().target_z(), PARTICLE_CAMERA_Z);
    s.handle(InputEvent::Wheel { delta_y: -120.0 }, BOTTOM);
    assert!(s.state().target_z() < PARTICLE_CAMERA_Z);
}

#[test]
fn bottom_detection_tolerates_fractional_pixels() {
    let almost = PageScroll {
        scroll_top: 1599.5,
        ..BOTTOM
    };
    assert!(almost.at_bottom());
    assert!(!MIDDLE.at_bottom() && !MIDDLE.at_top());
}

#[test]
fn camera_eases_toward_dolly_target() {
    let mut s = scene();
    s.handle(InputEvent::Wheel { delta_y: 100.0 }, MIDDLE);
    s.tick();
    let z = s.frame().camera.eye.z;
    assert!((z - (PARTICLE_CAMERA_Z + 10.0 * PARTICLE_SMOOTHING)).abs() < 1e-3);
    for _ in 0..400 {
        s.tick();
    }
    assert!((s.frame().camera.eye.z - (PARTICLE_CAMERA_Z + 10.0)).abs() < 1e-2);
}

#[test]
fn pointer_rotates_the_cloud_not_the_camera() {
    let mut s = scene();
    s.handle(
        InputEvent::PointerMove {
            client_x: 1280.0,
            client_y: 400.0,
        },
        MIDDLE,
    );
    for _ in 0..200 {
        s.tick();
    }
    let frame = s.frame();
    assert_eq!(frame.camera.rotation, glam::Vec2::ZERO);
    // spin about +Y carries +Z toward +X
    let spun = frame.model.transform_vector3(Vec3::Z);
    assert!(spun.x > 0.4);
}

#[test]
fn cloud_is_fixed_after_creation() {
    let mut s = scene();
    let before = s.cloud().positions().to_vec();
    s.handle(InputEvent::Wheel { delta_y: 500.0 }, MIDDLE);
    for _ in 0..10 {
        s.tick();
    }
    assert_eq!(s.cloud().positions(), &before[..]);
}
