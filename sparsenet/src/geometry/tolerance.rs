// Centralized tolerances and rounding for transform decomposition

pub const EPS_LEN: f64 = 1e-12;           // zero-length basis vector threshold
pub const EPS_SKEW: f64 = 1e-6;           // |tan(skew)| below this is treated as no skew

// Fixed output precision of decomposed image transforms
pub const LINEAR_DECIMALS: i32 = 3;       // offsets, scales
pub const ANGULAR_DECIMALS: i32 = 1;      // rotation, skew (degrees)

#[inline] pub fn near_zero(x: f64, eps: f64) -> bool { x.abs() <= eps }

/// Round to a fixed number of decimals, normalizing `-0.0` to `0.0`.
#[inline]
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    let r = (x * f).round() / f;
    if r == 0.0 { 0.0 } else { r }
}

#[inline] pub fn round_linear(x: f64) -> f64 { round_to(x, LINEAR_DECIMALS) }
#[inline] pub fn round_angular(x: f64) -> f64 { round_to(x, ANGULAR_DECIMALS) }
