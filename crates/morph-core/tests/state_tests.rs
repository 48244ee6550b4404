// Host-side tests for the camera fallback and anchor pose handling.

use glam::{Mat4, Vec3, Vec4};
use morph_core::{AnchorPose, Camera};

#[test]
fn matrix_from_slice_rejects_bad_input() {
    assert!(AnchorPose::matrix_from_slice(&[0.0; 15]).is_none());
    let mut values = Mat4::IDENTITY.to_cols_array().to_vec();
    assert_eq!(
        AnchorPose::matrix_from_slice(&values),
        Some(Mat4::IDENTITY)
    );
    values[5] = f32::NAN;
    assert!(AnchorPose::matrix_from_slice(&values).is_none());
}

#[test]
fn hidden_pose_falls_back_to_camera() {
    let camera = Camera::default();
    let pose = AnchorPose {
        model_view: Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)),
        ..AnchorPose::default()
    };
    assert_eq!(pose.view_matrix(&camera), camera.view_matrix());

    let visible = AnchorPose {
        visible: true,
        ..pose
    };
    assert_eq!(visible.view_matrix(&camera), visible.model_view);
    assert_eq!(
        visible.view_projection(&camera),
        camera.projection_matrix() * visible.model_view
    );
}

#[test]
fn reported_projection_overrides_camera() {
    let camera = Camera::default();
    let proj = Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0);
    let pose = AnchorPose {
        projection: Some(proj),
        ..AnchorPose::default()
    };
    assert_eq!(pose.view_projection(&camera), proj * camera.view_matrix());
}

#[test]
fn target_center_lands_mid_screen() {
    let camera = Camera::default();
    let clip = AnchorPose::default().view_projection(&camera) * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip / clip.w;
    assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn billboard_axes_follow_the_view() {
    let camera = Camera::default();
    let (right, up) = AnchorPose::default().billboard_axes(&camera);
    assert!((right - Vec3::X).length() < 1e-5);
    assert!((up - Vec3::Y).length() < 1e-5);

    // target rolled 90 degrees about the view axis
    let pose = AnchorPose {
        model_view: Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2),
        visible: true,
        ..AnchorPose::default()
    };
    let (right, up) = pose.billboard_axes(&camera);
    assert!((right - Vec3::NEG_Y).length() < 1e-5);
    assert!((up - Vec3::X).length() < 1e-5);
}
