use glam::{Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::mesh::Aabb;
use crate::options::CameraOptions;

/// Orbital camera: rotates around, pans, and zooms toward a focus point.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,

    /// Derived camera, refreshed after every change.
    pub camera: Camera,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitCamera {
    /// Orbit placed at `options.eye`, looking at `options.focus`.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let focus_point = Vec3::from_array(options.focus);
        let offset = Vec3::from_array(options.eye) - focus_point;
        let min_distance = options.min_distance.max(f32::EPSILON);
        let max_distance = options.max_distance.max(min_distance);

        let orientation = offset
            .try_normalize()
            .map_or(Quat::IDENTITY, |dir| Quat::from_rotation_arc(Vec3::Z, dir));

        let mut orbit = Self {
            orientation,
            distance: offset.length().clamp(min_distance, max_distance),
            focus_point,
            camera: Camera {
                eye: focus_point,
                target: focus_point,
                up: Vec3::Y,
                aspect,
                fovy: options.fovy,
                znear: options.znear,
                zfar: options.zfar,
            },
            rotate_speed: options.rotate_speed * 0.02,
            pan_speed: options.pan_speed * 0.1,
            zoom_speed: options.zoom_speed,
            min_distance,
            max_distance,
        };
        orbit.update_camera_pos();
        orbit
    }

    /// Current focus point.
    #[must_use]
    pub fn focus_point(&self) -> Vec3 {
        self.focus_point
    }

    /// Current distance from the focus point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Update the aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Orbit by a mouse delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        // Horizontal rotation around camera's up vector
        let up = self.orientation * Vec3::Y;
        let horizontal =
            Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal * self.orientation;

        // Vertical rotation around camera's right vector (after horizontal)
        let right = self.orientation * Vec3::X;
        let vertical = Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = (vertical * self.orientation).normalize();

        self.update_camera_pos();
    }

    /// Translate the focus point within the view plane.
    pub fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;

        self.focus_point +=
            right * (-delta.x * self.pan_speed) + up * (delta.y * self.pan_speed);
        self.update_camera_pos();
    }

    /// Zoom in for positive `delta`, out for negative.
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.update_camera_pos();
    }

    /// Center on a bounding box and back off until it fits the view.
    pub fn fit_to_bounds(&mut self, bounds: &Aabb) {
        self.focus_point = bounds.center();

        let fovy_rad = self.camera.fovy.to_radians();
        let fit_distance = bounds.radius() / (fovy_rad / 2.0).tan();
        // 1.5x padding for a comfortable view
        self.distance =
            (fit_distance * 1.5).clamp(self.min_distance, self.max_distance);

        self.update_camera_pos();
    }
}
