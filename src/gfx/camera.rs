//! Orbit camera
//!
//! Yaw/pitch/distance orbit around a target point, Z-up. Produces the view
//! and projection matrices the renderer finalizes at the start of each
//! frame.

use cgmath::{perspective, Matrix4, Point3, Rad, Vector3};

/// Maps the OpenGL clip-space depth range (-1..1) onto wgpu's (0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
const MIN_DISTANCE: f32 = 0.05;

#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Point3<f32>,
    pub distance: f32,
    /// Radians around the Z axis.
    pub yaw: f32,
    /// Radians above the XY plane, clamped short of the poles.
    pub pitch: f32,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Point3<f32>, aspect: f32) -> Self {
        Self {
            target,
            distance: distance.max(MIN_DISTANCE),
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            aspect,
            fovy: Rad(std::f32::consts::FRAC_PI_4),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn eye_position(&self) -> Point3<f32> {
        let offset = Vector3::new(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
        ) * self.distance;
        self.target + offset
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye_position(), self.target, Vector3::unit_z())
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw += delta;
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn add_distance(&mut self, delta: f32) {
        self.distance = (self.distance + delta).max(MIN_DISTANCE);
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector4;

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn eye_orbits_the_target() {
        let camera = OrbitCamera::new(5.0, 0.0, 0.0, Point3::new(1.0, 0.0, 0.0), 1.0);
        let eye = camera.eye_position();
        assert!(close(eye.x, 6.0) && close(eye.y, 0.0) && close(eye.z, 0.0));
    }

    #[test]
    fn view_matrix_moves_the_eye_to_the_origin() {
        let camera = OrbitCamera::new(3.0, 0.7, 1.3, Point3::new(0.0, 1.0, 2.0), 1.6);
        let eye = camera.eye_position();
        let mapped = camera.view_matrix() * Vector4::new(eye.x, eye.y, eye.z, 1.0);
        assert!(close(mapped.x, 0.0) && close(mapped.y, 0.0) && close(mapped.z, 0.0));
    }

    #[test]
    fn pitch_stays_clear_of_the_poles() {
        let mut camera = OrbitCamera::new(5.0, 0.0, 0.0, Point3::new(0.0, 0.0, 0.0), 1.0);
        camera.add_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        camera.add_pitch(-20.0);
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }
}
