use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};

use crate::input::{InputFrame, InputState, MouseButton};

/// Radians of rotation per pixel of drag.
const ROTATE_PER_PIXEL: f32 = 0.005;
/// Radius change per wheel line.
const ZOOM_PER_LINE: f32 = 0.5;
/// Keeps the eye off the poles, where the up vector degenerates.
const BETA_EPSILON: f32 = 0.01;

/// Camera orbiting a target on a sphere.
///
/// `alpha` is the longitude around +Y measured from +X towards +Z, `beta` the
/// polar angle from +Y. `alpha = beta = π/2` looks down -Z from +Z.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,

    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,

    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            alpha: FRAC_PI_2,
            beta: FRAC_PI_2,
            radius: 10.0,
            target: Vec3::ZERO,
            fov_y: 0.8,
            near: 1.0,
            far: 10_000.0,
            min_radius: 2.0,
            max_radius: 50.0,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sa, ca) = self.alpha.sin_cos();
        let (sb, cb) = self.beta.sin_cos();
        self.target + self.radius * Vec3::new(ca * sb, cb, sa * sb)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-4), self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Rotates by a pointer drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.alpha = (self.alpha - dx * ROTATE_PER_PIXEL).rem_euclid(2.0 * PI);
        self.beta = (self.beta - dy * ROTATE_PER_PIXEL).clamp(BETA_EPSILON, PI - BETA_EPSILON);
    }

    /// Moves towards (positive lines) or away from the target.
    pub fn zoom(&mut self, lines: f32) {
        self.radius = (self.radius - lines * ZOOM_PER_LINE).clamp(self.min_radius, self.max_radius);
    }

    /// Left drag orbits, the wheel zooms.
    pub fn apply_input(&mut self, state: &InputState, frame: &InputFrame) {
        if state.button_down(MouseButton::Left) {
            let (dx, dy) = frame.pointer_delta;
            if dx != 0.0 || dy != 0.0 {
                self.orbit(dx, dy);
            }
        }
        if frame.wheel_lines != 0.0 {
            self.zoom(frame.wheel_lines);
        }
    }
}
