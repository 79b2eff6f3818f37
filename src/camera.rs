use glam::{Mat4, Vec2, Vec3};
use crate::math::Ray;

pub const ORBIT_SPEED: f32 = 0.01;
pub const ZOOM_SPEED: f32 = 0.001;
pub const PAN_SPEED: f32 = 1.0;
pub const MIN_DISTANCE: f32 = 0.5;
pub const MAX_DISTANCE: f32 = 500.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Camera orbiting a target point, driven by pointer drags and scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
}

impl OrbitCamera {
    /// Place the camera at `position` looking at `target`
    pub fn looking_at(position: Vec3, target: Vec3, fov_y_degrees: f32) -> Self {
        let offset = position - target;
        let distance = offset.length().max(MIN_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);

        Self {
            target,
            distance,
            yaw,
            pitch,
            fov_y: fov_y_degrees.to_radians(),
        }
    }

    pub fn position(&self) -> Vec3 {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.target + offset * self.distance
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Rotate around the target by a pointer drag in points
    pub fn orbit(&mut self, drag: Vec2) {
        self.yaw -= drag.x * ORBIT_SPEED;
        self.pitch = (self.pitch + drag.y * ORBIT_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move the target in the view plane; `viewport_height` is in points
    pub fn pan(&mut self, drag: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        // World units per point at the target distance
        let scale = 2.0 * self.distance * (self.fov_y * 0.5).tan() / viewport_height;
        self.target += (-self.right() * drag.x + self.up() * drag.y) * scale * PAN_SPEED;
    }

    /// Scroll toward (positive) or away from (negative) the target
    pub fn zoom(&mut self, scroll: f32) {
        let factor = (-scroll * ZOOM_SPEED).exp();
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(f32::EPSILON), NEAR_PLANE, FAR_PLANE)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Ray from the eye through a point in normalized device coordinates
    pub fn ray_through(&self, ndc: Vec2, aspect: f32) -> Ray {
        let inverse = self.view_projection(aspect).inverse();
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let origin = self.position();
        Ray::new(origin, far - origin)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(Vec3::splat(5.0), Vec3::ZERO, 75.0)
    }
}
