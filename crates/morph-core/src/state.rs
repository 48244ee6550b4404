//! Camera types shared with the web renderer.
//!
//! The tracking host normally supplies both the projection and the anchor pose
//! of the image target; [`Camera`] is the fallback used until it does, and
//! [`AnchorPose`] carries whatever pose was last reported.

use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: std::f32::consts::FRAC_PI_4,
            znear: 0.01,
            zfar: 100.0,
        }
    }
}

/// Pose of the tracked image target as last reported by the tracking host.
#[derive(Clone, Copy, Debug)]
pub struct AnchorPose {
    /// Target space to camera view space.
    pub model_view: Mat4,
    /// Overrides [`Camera::projection_matrix`] when present.
    pub projection: Option<Mat4>,
    pub visible: bool,
}

impl Default for AnchorPose {
    fn default() -> Self {
        Self {
            model_view: Mat4::IDENTITY,
            projection: None,
            visible: false,
        }
    }
}

impl AnchorPose {
    /// Build a matrix from 16 column-major floats; `None` for short or non-finite input.
    pub fn matrix_from_slice(values: &[f32]) -> Option<Mat4> {
        if values.len() < 16 || values[..16].iter().any(|v| !v.is_finite()) {
            return None;
        }
        Some(Mat4::from_cols_slice(&values[..16]))
    }

    /// Target space to view space: the reported pose while visible, else the fallback camera.
    pub fn view_matrix(&self, fallback: &Camera) -> Mat4 {
        if self.visible {
            self.model_view
        } else {
            fallback.view_matrix()
        }
    }

    /// Clip-space transform for target-space points, given the fallback camera.
    pub fn view_projection(&self, fallback: &Camera) -> Mat4 {
        let proj = self
            .projection
            .unwrap_or_else(|| fallback.projection_matrix());
        proj * self.view_matrix(fallback)
    }

    /// Camera right and up axes expressed in target space, for billboards.
    pub fn billboard_axes(&self, fallback: &Camera) -> (Vec3, Vec3) {
        let inv = self.view_matrix(fallback).inverse();
        let right = inv.transform_vector3(Vec3::X).normalize_or_zero();
        let up = inv.transform_vector3(Vec3::Y).normalize_or_zero();
        (right, up)
    }
}
