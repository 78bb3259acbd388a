//! Procedural value noise for the glyph interior texture.

use crate::math::{fract, lerp_f32, smoothstep};
use glam::Vec2;

/// Lattice frequency of the interior texture, in cells per glyph.
pub const TEXTURE_SCALE: f32 = 20.0;

const HASH_KEY: Vec2 = Vec2::new(12.9898, 78.233);
const HASH_SCALE: f32 = 43758.5453;

/// Pseudo-random value in [0, 1) for a lattice point.
#[inline]
pub fn hash(p: Vec2) -> f32 {
    fract(p.dot(HASH_KEY).sin() * HASH_SCALE)
}

/// Smoothly interpolated value noise in [0, 1].
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;

    let a = hash(i);
    let b = hash(i + Vec2::new(1.0, 0.0));
    let c = hash(i + Vec2::new(0.0, 1.0));
    let d = hash(i + Vec2::new(1.0, 1.0));

    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    lerp_f32(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

/// Interior texture term at `uv`, widened to roughly [-0.2, 3.8].
pub fn texture_noise(uv: Vec2) -> f32 {
    value_noise(uv * TEXTURE_SCALE) * 4.0 - 0.2
}

/// How much of the texture term survives at a given edge weight.
///
/// Zero on outlines, one in flat interiors.
#[inline]
pub fn texture_strength(edge: f32) -> f32 {
    smoothstep(0.1, 0.3, 1.0 - edge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_range() {
        for y in -20..20 {
            for x in -20..20 {
                let h = hash(Vec2::new(x as f32, y as f32));
                assert!((0.0..1.0).contains(&h), "hash out of range: {h}");
            }
        }
    }

    #[test]
    fn test_value_noise_hits_lattice_values() {
        let p = Vec2::new(3.0, 7.0);
        assert!((value_noise(p) - hash(p)).abs() < 1e-6);
    }

    #[test]
    fn test_value_noise_is_continuous() {
        let mut prev = value_noise(Vec2::new(0.0, 2.5));
        for i in 1..=400 {
            let next = value_noise(Vec2::new(i as f32 * 0.01, 2.5));
            assert!((next - prev).abs() < 0.05);
            prev = next;
        }
    }

    #[test]
    fn test_texture_strength_fades_on_edges() {
        assert_eq!(texture_strength(0.0), 1.0);
        assert_eq!(texture_strength(1.0), 0.0);
        assert!(texture_strength(0.8) > 0.0 && texture_strength(0.8) < 1.0);
    }
}
