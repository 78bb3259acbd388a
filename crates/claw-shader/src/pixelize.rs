//! Block pixelization: one representative sample per block.

use crate::coverage::CoverageSource;
use crate::math::{fract, smoothstep};
use crate::shader::Shader;
use glam::{Vec2, Vec4};

/// Smallest block extent in normalized coordinates.
const MIN_BLOCK_EXTENT: f32 = 1.0e-6;

impl<C: CoverageSource + ?Sized> Shader<'_, C> {
    /// Block extent in normalized coordinates.
    pub fn block_size(&self) -> Vec2 {
        (self.params().pixel_size * self.texel_size()).max(Vec2::splat(MIN_BLOCK_EXTENT))
    }

    /// Center of the block containing `uv`.
    pub fn block_center(&self, uv: Vec2) -> Vec2 {
        let block = self.block_size();
        (uv / block).floor() * block + block * 0.5
    }

    /// Pixelized fragment at `uv`.
    ///
    /// Alpha always comes from the block center. Lit draws soften the block seams by blending
    /// toward the per-pixel color near block borders; shadow draws stay flat.
    pub fn pixelize(&self, uv: Vec2) -> Vec4 {
        if !self.params().pixelize {
            return self.colorize(uv).extend(self.coverage(uv));
        }

        let block = self.block_size();
        let center = self.block_center(uv);
        let color = self.colorize(center);
        let alpha = self.coverage(center);

        if self.params().is_shadow {
            return color.extend(alpha);
        }

        let cell = uv / block;
        let offset = Vec2::new(fract(cell.x), fract(cell.y)) - Vec2::splat(0.5);
        let seam = smoothstep(0.4, 0.6, offset.abs().max_element());

        color.lerp(self.colorize(uv), seam).extend(alpha)
    }
}
