//! Perspective camera shared by both visualizations, plus the ray helpers
//! used for marker picking and label placement.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};

/// Right-handed perspective camera oriented by an XYZ Euler pair.
///
/// `rotation.x` pitches about X, `rotation.y` yaws about Y. With zero rotation
/// the camera looks down -Z.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub rotation: Vec2,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(
        eye: Vec3,
        rotation: Vec2,
        aspect: f32,
        fovy_radians: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        Self {
            eye,
            rotation,
            aspect,
            fovy_radians,
            znear,
            zfar,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.eye).inverse()
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Camera-space right and up axes in world space, for billboarding.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let q = self.orientation();
        (q * Vec3::X, q * Vec3::Y)
    }

    /// World-space ray through a point given in surface pixels (origin top-left).
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn screen_to_world_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye;
        let rd = (p1 - ro).normalize();
        (ro, rd)
    }

    /// Project a world point to surface pixels. `None` behind the camera.
    pub fn world_to_screen(&self, point: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let clip = self.view_proj() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(
            Vec3::new(0.0, 3.0, 5.0),
            Vec2::ZERO,
            16.0 / 9.0,
            60f32.to_radians(),
            0.1,
            500.0,
        )
    }

    #[test]
    fn centre_ray_looks_down_negative_z() {
        let cam = camera();
        let (ro, rd) = cam.screen_to_world_ray(800.0, 450.0, 1600.0, 900.0);
        assert_eq!(ro, cam.eye);
        assert!((rd - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn projection_round_trips_through_ray() {
        let cam = camera();
        let point = Vec3::new(2.0, 1.0, -20.0);
        let px = cam.world_to_screen(point, 1600.0, 900.0).unwrap();
        let (ro, rd) = cam.screen_to_world_ray(px.x, px.y, 1600.0, 900.0);
        let t = ray_sphere(ro, rd, point, 0.05);
        assert!(t.is_some());
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let cam = camera();
        assert!(cam.world_to_screen(Vec3::new(0.0, 3.0, 20.0), 800.0, 600.0).is_none());
    }

    #[test]
    fn yaw_turns_view_direction() {
        let mut cam = camera();
        cam.rotation = Vec2::new(0.0, 0.05);
        let (_, rd) = cam.screen_to_world_ray(400.0, 300.0, 800.0, 600.0);
        // positive yaw about +Y turns the -Z view toward -X
        assert!(rd.x < 0.0);
    }

    #[test]
    fn ray_sphere_hit_and_miss() {
        let hit = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
        assert!((hit.unwrap() - 3.0).abs() < 1e-5);
        assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
    }
}
