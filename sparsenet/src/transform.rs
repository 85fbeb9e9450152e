//! Editable parameterizations of paint transforms.
//!
//! Gradients vary along one axis, so their matrix is fully described by a
//! start point and a direction (`matrix_to_flattened` is exact). Image
//! transforms are general affines; `image_matrix_to_flattened` recovers
//! offset, scale, rotation and a single skew axis, which is lossy when a
//! matrix mixes both skew axes.

use serde::{Deserialize, Serialize};

use crate::geometry::tolerance::{near_zero, round_angular, round_linear, EPS_LEN, EPS_SKEW};
use crate::model::{Affine2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientParams {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    /// Length of the direction vector; when set on input, the direction is
    /// renormalized to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageTransformParams {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Degrees.
    pub rotation: f64,
    /// Degrees.
    pub skew_x: f64,
    /// Degrees.
    pub skew_y: f64,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Default for ImageTransformParams {
    fn default() -> Self {
        ImageTransformParams {
            offset_x: 0.0,
            offset_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            flip_x: false,
            flip_y: false,
        }
    }
}

pub fn matrix_to_flattened(m: &Affine2) -> GradientParams {
    let start = m.translation();
    let dir = m.x_axis();
    GradientParams {
        start_x: start.x,
        start_y: start.y,
        end_x: start.x + dir.x,
        end_y: start.y + dir.y,
        scale: Some(dir.length()),
    }
}

pub fn flattened_to_matrix(p: &GradientParams) -> Affine2 {
    let mut dir = Vec2::new(p.end_x - p.start_x, p.end_y - p.start_y);
    if let Some(scale) = p.scale {
        let len = dir.length();
        // A zero direction has nothing to renormalize.
        if len > EPS_LEN {
            dir = Vec2::new(dir.x / len * scale, dir.y / len * scale);
        }
    }
    let perp = Vec2::new(-dir.y, dir.x);
    Affine2::from_columns(dir, perp, Vec2::new(p.start_x, p.start_y))
}

/// Best-effort decomposition of a general affine. Skew is reported on the x
/// axis only; a reflection is reported as `flip_y`. Outputs are rounded to
/// 3 decimals (linear) and 1 decimal (degrees).
pub fn image_matrix_to_flattened(m: &Affine2) -> ImageTransformParams {
    let x_axis = m.x_axis();
    let y_axis = m.y_axis();
    let t = m.translation();

    let scale_x = x_axis.length();
    let theta = if scale_x > EPS_LEN { x_axis.y.atan2(x_axis.x) } else { 0.0 };
    let (sin, cos) = theta.sin_cos();

    // Second basis vector with the rotation removed: (tan(skew) * sy, sy).
    let sheared = cos * y_axis.x + sin * y_axis.y;
    let signed_sy = -sin * y_axis.x + cos * y_axis.y;
    let skew_x = if near_zero(signed_sy, EPS_LEN) { 0.0 } else { (sheared / signed_sy).atan() };

    ImageTransformParams {
        offset_x: round_linear(t.x),
        offset_y: round_linear(t.y),
        scale_x: round_linear(scale_x),
        scale_y: round_linear(signed_sy.abs()),
        rotation: round_angular(theta.to_degrees()),
        skew_x: round_angular(skew_x.to_degrees()),
        skew_y: 0.0,
        flip_x: false,
        flip_y: signed_sy < 0.0,
    }
}

/// Builds `R(rotation) * K(skew_x, skew_y) * S(scale_x, scale_y)` plus offset.
/// Flips negate the matching scale before composition.
pub fn flattened_to_image_matrix(p: &ImageTransformParams) -> Affine2 {
    let sx = if p.flip_x { -p.scale_x } else { p.scale_x };
    let sy = if p.flip_y { -p.scale_y } else { p.scale_y };
    let (sin, cos) = p.rotation.to_radians().sin_cos();
    let tan_kx = p.skew_x.to_radians().tan();
    let tan_ky = p.skew_y.to_radians().tan();
    let offset = Vec2::new(p.offset_x, p.offset_y);

    if near_zero(tan_kx, EPS_SKEW) && near_zero(tan_ky, EPS_SKEW) {
        return Affine2::from_columns(
            Vec2::new(cos * sx, sin * sx),
            Vec2::new(-sin * sy, cos * sy),
            offset,
        );
    }

    // K * S columns: (sx, tan_ky * sx) and (tan_kx * sy, sy), then rotate.
    let kx = Vec2::new(sx, tan_ky * sx);
    let ky = Vec2::new(tan_kx * sy, sy);
    Affine2::from_columns(
        Vec2::new(cos * kx.x - sin * kx.y, sin * kx.x + cos * kx.y),
        Vec2::new(cos * ky.x - sin * ky.y, sin * ky.x + cos * ky.y),
        offset,
    )
}
