use glam::{Mat4, Vec2, Vec3};

use crate::picking::Ray;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix, `[0, 1]` depth range.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Unit vector from eye toward target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Ray from the eye through a screen pixel, built from the camera basis
    /// rather than by inverting the projection.
    ///
    /// Screen coordinates are pixels from the top-left corner. Returns
    /// `None` for an empty viewport or a degenerate camera basis.
    #[must_use]
    pub fn ray_through(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> Option<Ray> {
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }

        let forward = self.forward();
        let right = forward.cross(self.up).try_normalize()?;
        let up = right.cross(forward);

        let ndc_x = (screen_x / screen_width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen_y / screen_height) * 2.0;

        let tan_fov = (self.fovy / 2.0).to_radians().tan();
        let ray_x = ndc_x * self.aspect * tan_fov;
        let ray_y = ndc_y * tan_fov;

        Ray::new(self.eye, forward + right * ray_x + up * ray_y)
    }

    /// Pixel position of a world point, or `None` if it is behind the eye.
    #[must_use]
    pub fn project_to_screen(
        &self,
        world: Vec3,
        screen_width: f32,
        screen_height: f32,
    ) -> Option<Vec2> {
        let clip = self.build_matrix() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen_width,
            (1.0 - ndc.y) * 0.5 * screen_height,
        ))
    }
}
