//! Scalar helpers with shading-language semantics.

use glam::Vec3;

/// Luma weights used to order colors in the rank filter (BT.601).
pub const LUMA: Vec3 = Vec3::new(0.299, 0.587, 0.114);

/// Linearly interpolate between two f32 values
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite step between `edge0` and `edge1`, clamped to [0, 1].
///
/// Degenerate ranges (`edge0 == edge1`) step hard at the edge instead of dividing by zero.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let range = edge1 - edge0;
    if range.abs() <= f32::EPSILON {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / range).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fractional part with floor semantics: always in [0, 1), also for negative inputs.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Perceptual luminance of a linear RGB triple.
#[inline]
pub fn luminance(rgb: Vec3) -> f32 {
    rgb.dot(LUMA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.1, 0.3, 0.0), 0.0);
        assert_eq!(smoothstep(0.1, 0.3, 0.1), 0.0);
        assert!((smoothstep(0.1, 0.3, 0.2) - 0.5).abs() < 1e-5);
        assert_eq!(smoothstep(0.1, 0.3, 0.3), 1.0);
        assert_eq!(smoothstep(0.1, 0.3, 7.0), 1.0);
    }

    #[test]
    fn test_smoothstep_degenerate_range() {
        assert_eq!(smoothstep(0.5, 0.5, 0.4), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.5), 1.0);
    }

    #[test]
    fn test_fract_negative() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert!((fract(3.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_luminance_white() {
        assert!((luminance(Vec3::ONE) - 1.0).abs() < 1e-6);
        assert_eq!(luminance(Vec3::ZERO), 0.0);
    }

    #[test]
    fn test_lerp_f32() {
        assert_eq!(lerp_f32(0.0, 100.0, 0.0), 0.0);
        assert_eq!(lerp_f32(0.0, 100.0, 0.5), 50.0);
        assert_eq!(lerp_f32(0.0, 100.0, 1.0), 100.0);
    }
}
