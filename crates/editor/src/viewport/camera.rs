use glam::{Mat4, Vec2, Vec3, Vec4};

use super::picking::Ray;

/// Arc-ball camera describing the viewpoint the host renders from.
///
/// Screen positions are pixels with the origin at the top-left corner of a
/// viewport of the given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcBallCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl Default for ArcBallCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcBallCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.6,
            distance: 12.0,
            target: Vec3::ZERO,
            fov: 45.0_f32.to_radians(),
        }
    }

    /// Camera looking at `target` from `distance` along +Z, no pitch
    pub fn front(target: Vec3, distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            target,
            ..Self::new()
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(0.5, 100.0);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        self.target += right * dx + up * dy;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 200.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        let right = self.right_vector();
        right.cross(fwd).normalize_or_zero()
    }

    /// Project a world point to screen pixels. `None` if the point is behind the camera.
    pub fn project(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let vp = self.view_projection(aspect(viewport));
        let p = vp * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }

    /// Cast a ray from a screen position into the 3D scene
    pub fn screen_ray(&self, screen_pos: Vec2, viewport: Vec2) -> Ray {
        // Screen → NDC
        let ndc_x = screen_pos.x / viewport.x * 2.0 - 1.0;
        let ndc_y = 1.0 - screen_pos.y / viewport.y * 2.0;

        let vp_inv = self.view_projection(aspect(viewport)).inverse();

        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray {
            origin: self.eye_position(),
            direction: (far - near).normalize_or_zero(),
        }
    }
}

fn aspect(viewport: Vec2) -> f32 {
    if viewport.y > 0.0 {
        viewport.x / viewport.y
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::picking::ray_ground;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_target_projects_to_center() {
        let cam = ArcBallCamera::new();
        let p = cam.project(Vec3::ZERO, VIEWPORT).unwrap();
        assert!((p - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_screen_ray_round_trips_ground_point() {
        let cam = ArcBallCamera::new();
        let world = Vec3::new(2.0, 0.0, -1.5);
        let screen = cam.project(world, VIEWPORT).unwrap();
        let ray = cam.screen_ray(screen, VIEWPORT);
        let back = ray_ground(&ray, 0.0).unwrap();
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_not_projected() {
        let cam = ArcBallCamera::front(Vec3::ZERO, 10.0);
        assert!(cam.project(Vec3::new(0.0, 0.0, 20.0), VIEWPORT).is_none());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut cam = ArcBallCamera::new();
        cam.zoom(5.0);
        assert_eq!(cam.distance, 0.5);
    }
}
