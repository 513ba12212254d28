//! Orbit camera: the planet tumbles under mouse drags while the eye slides
//! along +Z with the scroll wheel.

use glam::{Mat4, Vec2, Vec3};

use crate::pipeline::PlanetUniform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCameraSettings {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Eye distance at startup.
    pub start_distance: f32,
    /// Closest the eye may get to the planet center.
    pub min_distance: f32,
    /// Distance moved per wheel notch.
    pub zoom_step: f32,
    /// Degrees of rotation per pixel of drag.
    pub sensitivity: f32,
}

impl Default for OrbitCameraSettings {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 1.0,
            far: 100.0,
            start_distance: 5.0,
            min_distance: 1.5,
            zoom_step: 1.0,
            sensitivity: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub settings: OrbitCameraSettings,
    /// Model rotation about the X, Y and Z axes in degrees.
    pub rotation: Vec3,
    distance: f32,
}

impl OrbitCamera {
    pub fn new(settings: OrbitCameraSettings) -> Self {
        let mut camera = Self {
            settings,
            rotation: Vec3::ZERO,
            distance: settings.start_distance,
        };
        camera.zoom(0.0);
        camera
    }

    /// Left drag: vertical motion tilts about X, horizontal motion turns about Z.
    pub fn drag_primary(&mut self, delta: Vec2) {
        let s = self.settings.sensitivity;
        self.rotation.x += delta.y * s;
        self.rotation.z += delta.x * s;
    }

    /// Right drag: any motion turns about Y.
    pub fn drag_secondary(&mut self, delta: Vec2) {
        self.rotation.y += (delta.x + delta.y) * self.settings.sensitivity;
    }

    /// Move the eye by `notches` wheel steps; positive moves closer.
    ///
    /// The distance stays between `min_distance` and half the far plane, so
    /// reversing direction at either limit takes effect immediately.
    pub fn zoom(&mut self, notches: f32) {
        let s = &self.settings;
        self.distance = (self.distance - notches * s.zoom_step)
            .min(s.far * 0.5)
            .max(s.min_distance);
    }

    /// Eye distance from the origin.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// `Rx · Rz · Ry`: the right-drag turn about Y is applied first.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, self.distance()), Vec3::ZERO, Vec3::Y)
    }

    /// Reverse-Z perspective: near and far are swapped so the near plane maps to 1.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let s = &self.settings;
        Mat4::perspective_rh(s.fov_y_degrees.to_radians(), aspect, s.far, s.near)
    }

    pub fn view_projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    pub fn uniform(&self, aspect: f32) -> PlanetUniform {
        PlanetUniform::new(self.view_projection_matrix(aspect), self.model_matrix())
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(OrbitCameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn ndc(m: Mat4, p: Vec3) -> Vec3 {
        let clip = m * Vec4::new(p.x, p.y, p.z, 1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn test_left_drag_turns_about_x_and_z() {
        let mut cam = OrbitCamera::default();
        cam.drag_primary(Vec2::new(10.0, -4.0));
        assert_eq!(cam.rotation, Vec3::new(-4.0, 0.0, 10.0));
    }

    #[test]
    fn test_right_drag_turns_about_y() {
        let mut cam = OrbitCamera::default();
        cam.drag_secondary(Vec2::new(3.0, 2.0));
        assert_eq!(cam.rotation, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_sensitivity_scales_drags() {
        let mut cam = OrbitCamera::new(OrbitCameraSettings {
            sensitivity: 0.5,
            ..Default::default()
        });
        cam.drag_primary(Vec2::new(4.0, 2.0));
        cam.drag_secondary(Vec2::new(2.0, 2.0));
        assert_eq!(cam.rotation, Vec3::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn test_wheel_moves_eye() {
        let mut cam = OrbitCamera::default();
        assert_eq!(cam.distance(), 5.0);
        cam.zoom(2.0);
        assert_eq!(cam.distance(), 3.0);
        cam.zoom(-5.0);
        assert_eq!(cam.distance(), 8.0);
    }

    #[test]
    fn test_distance_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.zoom(100.0);
        assert_eq!(cam.distance(), 1.5);
        cam.zoom(-1000.0);
        assert_eq!(cam.distance(), 50.0);
    }

    #[test]
    fn test_reversing_at_a_limit_moves_immediately() {
        let mut cam = OrbitCamera::default();
        cam.zoom(50.0);
        assert_eq!(cam.distance(), 1.5);
        cam.zoom(-1.0);
        assert_eq!(cam.distance(), 2.5);

        cam.zoom(-500.0);
        assert_eq!(cam.distance(), 50.0);
        cam.zoom(1.0);
        assert_eq!(cam.distance(), 49.0);
    }

    #[test]
    fn test_start_distance_outside_limits_is_clamped() {
        let cam = OrbitCamera::new(OrbitCameraSettings {
            start_distance: 0.5,
            ..Default::default()
        });
        assert_eq!(cam.distance(), 1.5);
    }

    #[test]
    fn test_reverse_z_depth_range() {
        let cam = OrbitCamera::default();
        let proj = cam.projection_matrix(1.0);
        let near = ndc(proj, Vec3::new(0.0, 0.0, -1.0));
        let far = ndc(proj, Vec3::new(0.0, 0.0, -100.0));
        assert!((near.z - 1.0).abs() < 1e-5);
        assert!(far.z.abs() < 1e-5);
    }

    #[test]
    fn test_planet_center_projects_to_screen_center() {
        let cam = OrbitCamera::default();
        let p = ndc(cam.view_projection_matrix(4.0 / 3.0), Vec3::ZERO);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
        assert!(p.z > 0.0 && p.z < 1.0);
    }

    #[test]
    fn test_model_matrix_is_a_rotation() {
        let mut cam = OrbitCamera::default();
        cam.rotation = Vec3::new(30.0, 45.0, 60.0);
        let m = cam.model_matrix();
        let v = m.transform_vector3(Vec3::new(0.3, -0.4, 0.5));
        assert!((v.length() - Vec3::new(0.3, -0.4, 0.5).length()).abs() < 1e-5);
        assert!((m.determinant() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let mut cam = OrbitCamera::default();
        cam.rotation.y = 90.0;
        let v = cam.model_matrix().transform_vector3(Vec3::X);
        assert!((v - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_y_turn_applies_before_z_turn() {
        let mut cam = OrbitCamera::default();
        cam.rotation.y = 90.0;
        cam.rotation.z = 90.0;
        // Ry takes X to -Z, then Rz leaves -Z alone.
        let v = cam.model_matrix().transform_vector3(Vec3::X);
        assert!((v - Vec3::NEG_Z).length() < 1e-5);
    }
}
