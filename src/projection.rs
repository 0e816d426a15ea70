use euclid::{Angle, Transform3D};

use crate::config::ProjectionConfig;

/// Coordinates the scene geometry is authored in.
#[derive(Debug, Clone, Copy)]
pub struct WorldSpace;

/// Camera-relative coordinates: the viewer looks down -Z.
#[derive(Debug, Clone, Copy)]
pub struct EyeSpace;

/// Homogeneous clip coordinates with depth in `0..=1`.
#[derive(Debug, Clone, Copy)]
pub struct ClipSpace;

pub type ViewTransform = Transform3D<f32, WorldSpace, EyeSpace>;
pub type ProjectionTransform = Transform3D<f32, EyeSpace, ClipSpace>;
pub type ViewProjection = Transform3D<f32, WorldSpace, ClipSpace>;

/// Clamps a drawable size so neither side is zero. Minimised windows report
/// 0×0, which would make the aspect ratio degenerate.
pub fn clamp_viewport(size: (u32, u32)) -> (u32, u32) {
    (size.0.max(1), size.1.max(1))
}

/// Right-handed perspective projection for a viewport of `size` pixels.
pub fn perspective(config: &ProjectionConfig, size: (u32, u32)) -> ProjectionTransform {
    let (width, height) = clamp_viewport(size);
    let aspect = width as f32 / height as f32;
    let focal = 1.0 / (Angle::degrees(config.fov_y_degrees).radians / 2.0).tan();
    let depth_range = config.near - config.far;

    Transform3D::new(
        focal / aspect, 0.0, 0.0, 0.0,
        0.0, focal, 0.0, 0.0,
        0.0, 0.0, config.far / depth_range, -1.0,
        0.0, 0.0, config.near * config.far / depth_range, 0.0,
    )
}

/// Model/view transform for a camera dollied along the view axis.
pub fn camera_view(offset: f32) -> ViewTransform {
    Transform3D::translation(0.0, 0.0, offset)
}

pub fn view_projection(offset: f32, projection: &ProjectionTransform) -> ViewProjection {
    camera_view(offset).then(projection)
}
