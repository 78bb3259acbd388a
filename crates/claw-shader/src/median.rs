//! Rank-order filter over synthesized colors.
//!
//! The neighbourhood is shaded color by color (not read from a pre-shaded image), then
//! ordered by luminance and the sample at the requested rank is returned. Transparent
//! neighbours are skipped rather than counted as black, so outlines do not darken.

use crate::coverage::{CoverageSource, COVERAGE_THRESHOLD};
use crate::math::luminance;
use crate::params::MEDIAN_RADIUS_RANGE;
use crate::shader::Shader;
use glam::{Vec2, Vec3, Vec4};

/// Upper bound on accepted samples per pixel.
///
/// The largest radius (`ceil(2.5) = 3`) enumerates 7×7 = 49 offsets, so the cap is never hit
/// with sanitized parameters; it bounds the per-pixel cost regardless.
pub const MAX_SAMPLES: usize = 64;

/// Scale applied to `median_radius` before rounding up to whole texels.
const RADIUS_SCALE: f32 = 0.9;

/// One accepted neighbour.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RankSample {
    pub color: Vec3,
    pub alpha: f32,
}

impl RankSample {
    #[inline]
    pub fn luminance(&self) -> f32 {
        luminance(self.color)
    }

    #[inline]
    pub fn to_rgba(self) -> Vec4 {
        self.color.extend(self.alpha)
    }
}

/// Integer sample radius for a filter radius in texels.
pub fn sample_radius(median_radius: f32) -> i32 {
    let r = median_radius * RADIUS_SCALE;
    r.clamp(MEDIAN_RADIUS_RANGE.0, MEDIAN_RADIUS_RANGE.1).ceil() as i32
}

/// Index selected at `percentile` among `count` ordered samples.
#[inline]
pub fn rank_index(count: usize, percentile: f32) -> usize {
    debug_assert!(count > 0);
    ((count as f32 * percentile.clamp(0.0, 1.0)) as usize).min(count - 1)
}

/// Order samples by ascending luminance.
///
/// Exchange sort: equal luminances keep the order this loop produces, which makes the
/// selected sample reproducible across implementations of the filter.
fn order_by_luminance(samples: &mut [RankSample]) {
    let n = samples.len();
    for i in 0..n.saturating_sub(1) {
        for j in i + 1..n {
            if samples[i].luminance() > samples[j].luminance() {
                samples.swap(i, j);
            }
        }
    }
}

impl<C: CoverageSource + ?Sized> Shader<'_, C> {
    /// Rank filter with an arbitrary per-sample color function.
    ///
    /// Returns transparent black when no neighbour is covered.
    pub fn rank_filter(&self, uv: Vec2, mut color_at: impl FnMut(Vec2) -> Vec3) -> Vec4 {
        let texel = self.texel_size();
        let radius = sample_radius(self.params().median_radius);
        let lo = texel;
        let hi = (Vec2::ONE - texel).max(lo);

        let mut samples = [RankSample::default(); MAX_SAMPLES];
        let mut count = 0;

        for y in -radius..=radius {
            for x in -radius..=radius {
                let sample_uv = (uv + Vec2::new(x as f32, y as f32) * texel).clamp(lo, hi);
                let alpha = self.coverage(sample_uv);

                if alpha >= COVERAGE_THRESHOLD && count < MAX_SAMPLES {
                    samples[count] = RankSample {
                        color: color_at(sample_uv),
                        alpha,
                    };
                    count += 1;
                }
            }
        }

        if count == 0 {
            return Vec4::ZERO;
        }

        let accepted = &mut samples[..count];
        order_by_luminance(accepted);
        accepted[rank_index(count, self.params().median_percentile)].to_rgba()
    }

    /// Rank filter over [`colorize`](Self::colorize).
    pub fn median_blur(&self, uv: Vec2) -> Vec4 {
        self.rank_filter(uv, |p| self.colorize(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::CoverageMask;
    use crate::params::ShadingParams;

    #[test]
    fn test_sample_radius() {
        assert_eq!(sample_radius(0.0), 1);
        assert_eq!(sample_radius(1.5), 2);
        assert_eq!(sample_radius(1.0), 1);
        assert_eq!(sample_radius(10.0), 3);
        assert!(((2 * sample_radius(10.0) + 1).pow(2) as usize) <= MAX_SAMPLES);
    }

    #[test]
    fn test_rank_index_median() {
        assert_eq!(rank_index(1, 0.5), 0);
        assert_eq!(rank_index(9, 0.5), 4);
        assert_eq!(rank_index(10, 0.5), 5);
        assert_eq!(rank_index(9, 1.0), 8);
        assert_eq!(rank_index(9, 0.0), 0);
    }

    #[test]
    fn test_order_by_luminance() {
        let mut samples: Vec<RankSample> = [0.9, 0.1, 0.5, 0.3]
            .iter()
            .map(|&v| RankSample {
                color: Vec3::splat(v),
                alpha: 1.0,
            })
            .collect();
        order_by_luminance(&mut samples);
        let lums: Vec<f32> = samples.iter().map(|s| s.color.x).collect();
        assert_eq!(lums, vec![0.1, 0.3, 0.5, 0.9]);
    }

    #[test]
    fn test_isolated_pixel_without_neighbours_is_transparent() {
        let mask = CoverageMask::from_fn(16, 16, |_| 0.0);
        let shader = Shader::new(&mask, ShadingParams::default());
        assert_eq!(shader.median_blur(Vec2::splat(0.5)), Vec4::ZERO);
    }

    #[test]
    fn test_constant_neighbourhood_is_unchanged() {
        let mask = CoverageMask::from_fn(16, 16, |_| 1.0);
        let shader = Shader::new(&mask, ShadingParams::default());
        let color = Vec3::new(0.2, 0.4, 0.6);
        let out = shader.rank_filter(Vec2::splat(0.5), |_| color);
        assert_eq!(out, color.extend(1.0));
    }

    #[test]
    fn test_rejects_salt_noise() {
        let mask = CoverageMask::from_fn(16, 16, |_| 1.0);
        let shader = Shader::new(&mask, ShadingParams::default());
        let center = Vec2::splat(0.5 + 0.5 / 16.0);
        // A single bright texel in a dark neighbourhood is not the median.
        let out = shader.rank_filter(center, |p| {
            if p.distance(center) < 1e-4 {
                Vec3::ONE
            } else {
                Vec3::splat(0.1)
            }
        });
        assert_eq!(out.truncate(), Vec3::splat(0.1));
    }

    #[test]
    fn test_transparent_neighbours_are_excluded() {
        // Only the left half is covered; the filter must never return the black outside.
        let mask = CoverageMask::from_fn(16, 16, |uv| if uv.x < 0.5 { 1.0 } else { 0.0 });
        let shader = Shader::new(&mask, ShadingParams::default());
        let out = shader.rank_filter(Vec2::new(15.0 / 32.0, 0.5), |p| {
            if shader.coverage(p) >= COVERAGE_THRESHOLD {
                Vec3::splat(0.8)
            } else {
                Vec3::ZERO
            }
        });
        assert_eq!(out.truncate(), Vec3::splat(0.8));
        assert!(out.w >= COVERAGE_THRESHOLD);
    }
}
