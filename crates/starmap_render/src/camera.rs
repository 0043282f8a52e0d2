//! Orbit camera for viewing the map
//!
//! The camera circles a look-at target on the map plane. Yaw spins around
//! the world Y axis, pitch tilts around X, and `dist` backs the eye away
//! from the target along the view axis.

use starmap_input::CameraControl;
use starmap_math::mat4::{self, Mat4};

/// Orbit camera state and projection parameters
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub dist: f32,
    pub pan_x: f32,
    pub pan_y: f32,

    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    pub start_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Pitch is clamped to +/- this many radians
    pub pitch_limit: f32,
    /// Fractional distance change per zoom step
    pub zoom_step: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            dist: 1800.0,
            pan_x: 0.0,
            pan_y: 0.0,

            fov: 55.0,
            near: 0.1,
            far: 50000.0,

            start_distance: 1800.0,
            min_distance: 300.0,
            max_distance: 6000.0,
            pitch_limit: 1.55,
            zoom_step: 0.12,
        }
    }

    /// Builder: set the projection
    pub fn with_projection(mut self, fov: f32, near: f32, far: f32) -> Self {
        self.fov = fov;
        self.near = near;
        self.far = far;
        self
    }

    /// Builder: set the starting and allowed distances
    pub fn with_distance(mut self, start: f32, min: f32, max: f32) -> Self {
        self.start_distance = start;
        self.min_distance = min;
        self.max_distance = max;
        self.dist = start.clamp(min, max);
        self
    }

    /// Builder: set the pitch clamp in radians
    pub fn with_pitch_limit(mut self, limit: f32) -> Self {
        self.pitch_limit = limit;
        self
    }

    /// Builder: set the zoom step fraction
    pub fn with_zoom_step(mut self, step: f32) -> Self {
        self.zoom_step = step;
        self
    }

    /// Projection matrix for the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), aspect, self.near, self.far)
    }

    /// World-to-camera matrix (rotation applied first, then the eye offset)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation = mat4::mul(mat4::rotation_x(self.pitch), mat4::rotation_y(self.yaw));
        mat4::mul(mat4::translation(-self.pan_x, -self.pan_y, -self.dist), rotation)
    }

    /// Combined model-view-projection matrix
    pub fn mvp(&self, aspect: f32) -> Mat4 {
        mat4::mul(self.projection_matrix(aspect), self.view_matrix())
    }
}

impl CameraControl for OrbitCamera {
    fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-self.pitch_limit, self.pitch_limit);
    }

    fn pan(&mut self, dx: f32, dy: f32) {
        // Pan speed scales with distance so the map tracks the cursor
        let s = self.dist / 1000.0;
        self.pan_x -= dx * s;
        self.pan_y += dy * s;
    }

    fn zoom(&mut self, direction: f32) {
        let factor = 1.0 + direction.signum() * self.zoom_step;
        self.dist = (self.dist * factor).clamp(self.min_distance, self.max_distance);
    }

    fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.dist = self.start_distance.clamp(self.min_distance, self.max_distance);
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}
