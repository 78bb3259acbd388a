//! Fixed color palettes and the three-band quantizer.
//!
//! Each band blends between the first and last entry of its table. The intermediate
//! entries are part of the palette definition but are not read by the blend.

use crate::math::smoothstep;
use glam::{Vec2, Vec3};

/// Upper bound (exclusive) of the shadow band.
pub const SHADOW_BAND_END: f32 = 0.33;
/// Upper bound (exclusive) of the midtone band.
pub const MIDTONE_BAND_END: f32 = 0.66;

/// Exponent of the final contrast curve.
pub const CONTRAST_GAMMA: f32 = 1.25;

/// Strength of the faux highlight near the bottom-left corner of the glyph.
const HIGHLIGHT_BOOST: f32 = 0.15;

pub const SHADOW_COLORS: [Vec3; 7] = [
    Vec3::new(0.43, 0.32, 0.14),
    Vec3::new(0.33, 0.22, 0.07),
    Vec3::new(0.59, 0.33, 0.07),
    Vec3::new(0.71, 0.46, 0.13),
    Vec3::new(0.6, 0.48, 0.25),
    Vec3::new(0.51, 0.4, 0.31),
    Vec3::new(0.72, 0.54, 0.28),
];

pub const MIDTONE_COLORS: [Vec3; 8] = [
    Vec3::new(0.8, 0.71, 0.3),
    Vec3::new(0.67, 0.59, 0.42),
    Vec3::new(0.83, 0.78, 0.56),
    Vec3::new(0.95, 0.76, 0.3),
    Vec3::new(0.96, 0.84, 0.36),
    Vec3::new(0.99, 0.9, 0.35),
    Vec3::new(0.97, 0.95, 0.51),
    Vec3::new(0.99, 0.93, 0.52),
];

pub const HIGHLIGHT_COLORS: [Vec3; 7] = [
    Vec3::new(0.99, 0.93, 0.42),
    Vec3::new(0.99, 0.99, 0.68),
    Vec3::new(0.94, 0.94, 0.94),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0.91, 0.9, 0.72),
    Vec3::new(0.99, 0.96, 0.83),
    Vec3::new(1.0, 0.94, 0.94),
];

/// Intensity band of a clamped base intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Shadow,
    Midtone,
    Highlight,
}

impl Band {
    /// Classify an intensity in [0, 1].
    pub fn of(intensity: f32) -> Self {
        if intensity < SHADOW_BAND_END {
            Band::Shadow
        } else if intensity < MIDTONE_BAND_END {
            Band::Midtone
        } else {
            Band::Highlight
        }
    }

    /// The palette table of this band.
    pub fn colors(self) -> &'static [Vec3] {
        match self {
            Band::Shadow => &SHADOW_COLORS,
            Band::Midtone => &MIDTONE_COLORS,
            Band::Highlight => &HIGHLIGHT_COLORS,
        }
    }

    /// Renormalize `intensity` to the band-local parameter in [0, 1].
    pub fn local_t(self, intensity: f32) -> f32 {
        let (start, width) = match self {
            Band::Shadow => (0.0, 0.33),
            Band::Midtone => (SHADOW_BAND_END, 0.33),
            Band::Highlight => (MIDTONE_BAND_END, 0.34),
        };
        ((intensity - start) / width).clamp(0.0, 1.0)
    }

    /// Endpoint blend of the band table at `t`.
    pub fn lookup(self, t: f32) -> Vec3 {
        let colors = self.colors();
        colors[0].lerp(colors[colors.len() - 1], t)
    }
}

/// Map a clamped intensity to a palette color, before the contrast curve.
///
/// `uv` only feeds the highlight band's corner boost.
pub fn quantize(intensity: f32, uv: Vec2) -> Vec3 {
    let band = Band::of(intensity);
    let mut t = band.local_t(intensity);

    if band == Band::Highlight {
        let corner = smoothstep(0.5, 1.0, 1.0 - (uv - Vec2::new(0.0, 1.0)).length());
        t = (t + corner * HIGHLIGHT_BOOST).min(1.0);
    }

    band.lookup(t)
}

/// Final component-wise contrast curve.
#[inline]
pub fn contrast(color: Vec3) -> Vec3 {
    color.max(Vec3::ZERO).powf(CONTRAST_GAMMA)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAR_CORNER: Vec2 = Vec2::new(1.0, 0.0);

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_band_classification() {
        assert_eq!(Band::of(0.0), Band::Shadow);
        assert_eq!(Band::of(0.329), Band::Shadow);
        assert_eq!(Band::of(0.33), Band::Midtone);
        assert_eq!(Band::of(0.659), Band::Midtone);
        assert_eq!(Band::of(0.66), Band::Highlight);
        assert_eq!(Band::of(1.0), Band::Highlight);
    }

    #[test]
    fn test_band_endpoints_use_first_and_last_entries() {
        assert!(approx(quantize(0.0, FAR_CORNER), SHADOW_COLORS[0]));
        assert!(approx(quantize(0.33, FAR_CORNER), MIDTONE_COLORS[0]));
        assert!(approx(quantize(0.66, FAR_CORNER), HIGHLIGHT_COLORS[0]));
        assert!(approx(quantize(1.0, FAR_CORNER), HIGHLIGHT_COLORS[6]));
    }

    #[test]
    fn test_band_is_continuous_inside() {
        for band in [Band::Shadow, Band::Midtone, Band::Highlight] {
            let mut prev = band.lookup(0.0);
            for i in 1..=100 {
                let next = band.lookup(i as f32 / 100.0);
                assert!((next - prev).abs().max_element() < 0.01);
                prev = next;
            }
        }
    }

    #[test]
    fn test_highlight_boost_near_bottom_left() {
        let plain = quantize(0.7, FAR_CORNER);
        let boosted = quantize(0.7, Vec2::new(0.0, 1.0));
        let t_plain = Band::Highlight.local_t(0.7);
        assert!(approx(plain, Band::Highlight.lookup(t_plain)));
        assert!(approx(boosted, Band::Highlight.lookup(t_plain + HIGHLIGHT_BOOST)));
    }

    #[test]
    fn test_contrast_curve() {
        assert_eq!(contrast(Vec3::ONE), Vec3::ONE);
        assert_eq!(contrast(Vec3::ZERO), Vec3::ZERO);
        let mid = contrast(Vec3::splat(0.5)).x;
        assert!((mid - 0.5f32.powf(1.25)).abs() < 1e-6);
    }
}
