//! Edge and interior classification from the coverage gradient.

use crate::coverage::CoverageSource;
use crate::math::smoothstep;
use crate::shader::Shader;
use glam::{Vec2, Vec3};

/// Offset of the finite-difference taps, in texels.
pub const GRADIENT_TAP_TEXELS: f32 = 2.0;

/// Gradient magnitude at which a pixel counts as fully on an edge.
pub const EDGE_THRESHOLD: f32 = 0.01;

/// Finite-difference coverage gradient.
///
/// Signs follow the tap layout: `x = left - right`, `y = below - above` in uv space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gradient {
    pub x: f32,
    pub y: f32,
}

impl Gradient {
    #[inline]
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Surface normal of the coverage height field.
    #[inline]
    pub fn normal(self) -> Vec3 {
        Vec3::new(self.x, self.y, 1.0).normalize()
    }

    /// Edge weight in [0, 1]: ~0 in flat regions, ~1 on stroke boundaries.
    #[inline]
    pub fn edge(self) -> f32 {
        smoothstep(0.0, EDGE_THRESHOLD, self.magnitude())
    }
}

impl<C: CoverageSource + ?Sized> Shader<'_, C> {
    /// Four-tap coverage gradient at `uv`.
    pub fn gradient(&self, uv: Vec2) -> Gradient {
        let step = self.texel_size() * GRADIENT_TAP_TEXELS;
        let left = self.coverage(uv - Vec2::new(step.x, 0.0));
        let right = self.coverage(uv + Vec2::new(step.x, 0.0));
        let top = self.coverage(uv + Vec2::new(0.0, step.y));
        let bottom = self.coverage(uv - Vec2::new(0.0, step.y));

        Gradient {
            x: left - right,
            y: bottom - top,
        }
    }

    /// Edge weight at `uv`.
    pub fn edge(&self, uv: Vec2) -> f32 {
        self.gradient(uv).edge()
    }
}
