//! Edge-aware blend of the rank-filtered and sharp colors.

use crate::coverage::CoverageSource;
use crate::math::smoothstep;
use crate::shader::Shader;
use glam::{Vec2, Vec4};

impl<C: CoverageSource + ?Sized> Shader<'_, C> {
    /// Maximum absolute coverage deviation from the center over the 3×3 texel neighbourhood.
    pub fn local_variance(&self, uv: Vec2) -> f32 {
        let texel = self.texel_size();
        let center = self.coverage(uv);

        let mut variance: f32 = 0.0;
        for y in -1..=1 {
            for x in -1..=1 {
                let sample = self.coverage(uv + Vec2::new(x as f32, y as f32) * texel);
                variance = variance.max((sample - center).abs());
            }
        }
        variance
    }

    /// Weight of the sharp color: 1 on glyph boundaries, 0 in flat interiors.
    pub fn boundary_weight(&self, uv: Vec2) -> f32 {
        smoothstep(0.1, 0.3, self.local_variance(uv))
    }

    /// Interiors get the rank-filtered color, boundaries keep the sharp one.
    ///
    /// Alpha is always the unfiltered center coverage.
    pub fn composite(&self, uv: Vec2) -> Vec4 {
        let weight = self.boundary_weight(uv);
        let blurred = self.median_blur(uv).truncate();
        let sharp = self.colorize(uv);
        blurred.lerp(sharp, weight).extend(self.coverage(uv))
    }
}
