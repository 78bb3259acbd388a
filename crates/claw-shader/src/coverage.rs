//! Coverage fields: the only per-glyph input the shader reads.
//!
//! Coordinate convention:
//! - `uv` is normalized glyph space, `(0, 0)` is the top-left of the bitmap
//! - texel `(x, y)` has its center at `((x + 0.5) / w, (y + 0.5) / h)`
//! - sampling outside [0, 1] clamps to the border texels (never wraps)

use glam::Vec2;

/// Coverage at or above this value is part of the glyph.
pub const COVERAGE_THRESHOLD: f32 = 0.1;

/// A read-only scalar coverage field over normalized glyph space.
pub trait CoverageSource {
    /// Bilinearly filtered coverage in [0, 1] at `uv`, clamped to the field's edges.
    fn sample(&self, uv: Vec2) -> f32;

    /// Resolution of the underlying bitmap in texels: (width, height).
    fn resolution(&self) -> (u32, u32);

    /// Size of one texel in normalized coordinates.
    ///
    /// A zero dimension is treated as a single texel.
    fn texel_size(&self) -> Vec2 {
        let (w, h) = self.resolution();
        Vec2::new(1.0 / w.max(1) as f32, 1.0 / h.max(1) as f32)
    }
}

impl<T: CoverageSource + ?Sized> CoverageSource for &T {
    fn sample(&self, uv: Vec2) -> f32 {
        (**self).sample(uv)
    }

    fn resolution(&self) -> (u32, u32) {
        (**self).resolution()
    }
}

/// Clamp a coordinate into [0, 1]², mapping NaN to 0.
#[inline]
pub fn clamp_uv(uv: Vec2) -> Vec2 {
    let fix = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    Vec2::new(fix(uv.x), fix(uv.y))
}

/// Clamp a coverage value into [0, 1], mapping NaN to 0.
#[inline]
fn unit_coverage(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// A W×H coverage bitmap with linear filtering and clamp-to-edge addressing.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverageMask {
    width: u32,
    height: u32,
    /// Row-major coverage values in [0, 1], length = `width * height`.
    values: Vec<f32>,
}

impl CoverageMask {
    /// Create a mask from row-major values. Returns `None` if the length does not match.
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Option<Self> {
        if values.len() != width as usize * height as usize {
            return None;
        }
        let values = values.into_iter().map(unit_coverage).collect();
        Some(Self {
            width,
            height,
            values,
        })
    }

    /// Create a mask from 8-bit coverage bytes (0..=255), as produced by glyph rasterizers.
    pub fn from_u8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        Self::new(
            width,
            height,
            bytes.iter().map(|&b| b as f32 / 255.0).collect(),
        )
    }

    /// Build a mask by evaluating `f` at every texel center (in normalized coordinates).
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(Vec2) -> f32) -> Self {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let uv = Vec2::new(
                    (x as f32 + 0.5) / width as f32,
                    (y as f32 + 0.5) / height as f32,
                );
                values.push(unit_coverage(f(uv)));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    /// An empty 0×0 mask (e.g. whitespace glyphs). Samples as fully transparent.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            values: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Unfiltered texel value with clamp-to-edge addressing.
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.values[y * self.width as usize + x]
    }
}

impl CoverageSource for CoverageMask {
    fn sample(&self, uv: Vec2) -> f32 {
        if self.is_empty() {
            return 0.0;
        }

        let uv = clamp_uv(uv);
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;

        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = crate::math::lerp_f32(self.texel(x0, y0), self.texel(x0 + 1, y0), fx);
        let bottom = crate::math::lerp_f32(self.texel(x0, y0 + 1), self.texel(x0 + 1, y0 + 1), fx);
        crate::math::lerp_f32(top, bottom, fy)
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> CoverageMask {
        CoverageMask::new(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap()
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        assert!(CoverageMask::new(2, 2, vec![0.0; 3]).is_none());
    }

    #[test]
    fn test_sample_texel_centers_exact() {
        let mask = checker();
        assert_eq!(mask.sample(Vec2::new(0.25, 0.25)), 0.0);
        assert_eq!(mask.sample(Vec2::new(0.75, 0.25)), 1.0);
        assert_eq!(mask.sample(Vec2::new(0.25, 0.75)), 1.0);
        assert_eq!(mask.sample(Vec2::new(0.75, 0.75)), 0.0);
    }

    #[test]
    fn test_sample_bilinear_midpoint() {
        let mask = checker();
        assert!((mask.sample(Vec2::new(0.5, 0.5)) - 0.5).abs() < 1e-6);
        assert!((mask.sample(Vec2::new(0.5, 0.25)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sample_clamps_outside() {
        let mask = checker();
        assert_eq!(mask.sample(Vec2::new(-3.0, -3.0)), 0.0);
        assert_eq!(mask.sample(Vec2::new(0.0, 0.0)), 0.0);
        assert_eq!(mask.sample(Vec2::new(4.0, 0.0)), 1.0);
        assert_eq!(mask.sample(Vec2::new(f32::NAN, 0.25)), 0.0);
    }

    #[test]
    fn test_empty_mask_is_transparent() {
        let mask = CoverageMask::empty();
        assert_eq!(mask.sample(Vec2::splat(0.5)), 0.0);
        assert_eq!(mask.texel_size(), Vec2::ONE);
    }

    #[test]
    fn test_nan_texels_read_as_empty() {
        let mask = CoverageMask::new(2, 1, vec![f32::NAN, 2.0]).unwrap();
        assert_eq!(mask.texel(0, 0), 0.0);
        assert_eq!(mask.texel(1, 0), 1.0);
        assert!(mask.sample(Vec2::splat(0.5)).is_finite());

        let generated = CoverageMask::from_fn(2, 2, |_| f32::NAN);
        assert_eq!(generated.sample(Vec2::splat(0.5)), 0.0);
    }

    #[test]
    fn test_from_u8_scales() {
        let mask = CoverageMask::from_u8(1, 1, &[255]).unwrap();
        assert_eq!(mask.sample(Vec2::splat(0.5)), 1.0);
    }
}
