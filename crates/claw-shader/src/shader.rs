//! The per-pixel shading pipeline.

use crate::coverage::{CoverageSource, COVERAGE_THRESHOLD};
use crate::math::{lerp_f32, smoothstep};
use crate::noise::{texture_noise, texture_strength};
use crate::palette::{contrast, quantize};
use crate::params::{OutputStage, ShadingParams};
use glam::{Vec2, Vec3, Vec4};

/// How strongly the stylized intensity is pulled back toward raw coverage.
pub const COVERAGE_PULL: f32 = 0.6;

/// Gain applied to `bevel_strength` when blending the lit term.
pub const BEVEL_GAIN: f32 = 1.5;

/// Sharpness exponent of the bevel falloff.
pub const BEVEL_EXPONENT: i32 = 4;

/// Strength of the top-left corner highlight in the bevel term.
pub const BEVEL_CORNER_BOOST: f32 = 0.5;

/// Direction toward the light used by the bevel (normalized on use).
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(-1.0, -0.8, 0.5);

/// Shader bound to one glyph's coverage and one immutable parameter set.
///
/// Holds no mutable state; share it freely between threads when `C: Sync`.
#[derive(Debug)]
pub struct Shader<'a, C: ?Sized> {
    coverage: &'a C,
    params: ShadingParams,
}

impl<C: ?Sized> Clone for Shader<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for Shader<'_, C> {}

impl<'a, C: CoverageSource + ?Sized> Shader<'a, C> {
    /// Bind a coverage field and parameters. Parameters are clamped to their domains.
    pub fn new(coverage: &'a C, params: ShadingParams) -> Self {
        Self {
            coverage,
            params: params.sanitized(),
        }
    }

    #[inline]
    pub fn params(&self) -> &ShadingParams {
        &self.params
    }

    /// Coverage at `uv` (bilinear, clamped).
    #[inline]
    pub fn coverage(&self, uv: Vec2) -> f32 {
        self.coverage.sample(uv)
    }

    #[inline]
    pub fn texel_size(&self) -> Vec2 {
        self.coverage.texel_size()
    }

    /// Stylized intensity in [0, 1] before quantization.
    ///
    /// Edge/interior mix, pull toward coverage, optional bevel, clamp.
    pub fn base_intensity(&self, uv: Vec2) -> f32 {
        let p = &self.params;
        let alpha = self.coverage(uv);
        let gradient = self.gradient(uv);
        let edge = gradient.edge();

        let textured = p.interior_intensity + texture_noise(uv) * texture_strength(edge);
        let mut base = lerp_f32(textured, p.edge_intensity, edge);
        base = lerp_f32(base, alpha, COVERAGE_PULL);

        if p.use_bevel {
            let lit = gradient.normal().dot(LIGHT_DIRECTION.normalize());
            let mut t = ((lit + 1.0) * 0.5).powi(BEVEL_EXPONENT);
            let corner = smoothstep(0.5, 1.0, 1.0 - uv.length());
            t = (t + corner * BEVEL_CORNER_BOOST).min(1.0);
            base = lerp_f32(base, t, p.bevel_strength * BEVEL_GAIN);
        }

        base.clamp(0.0, 1.0)
    }

    /// Sharp stylized color at `uv`.
    ///
    /// Black for shadow draws and for uncovered pixels; the alpha decides visibility.
    pub fn colorize(&self, uv: Vec2) -> Vec3 {
        if self.params.is_shadow {
            return Vec3::ZERO;
        }
        if self.coverage(uv) < COVERAGE_THRESHOLD {
            return Vec3::ZERO;
        }

        let base = self.base_intensity(uv);
        if self.params.use_grayscale {
            return Vec3::splat(base);
        }

        contrast(quantize(base, uv))
    }

    /// Final fragment at `uv`, or `None` when the pixel must be discarded.
    pub fn shade(&self, uv: Vec2) -> Option<Vec4> {
        if self.coverage(uv) < COVERAGE_THRESHOLD {
            return None;
        }

        let color = match self.params.output_stage {
            OutputStage::Pixelized => self.pixelize(uv),
            OutputStage::Composited => self.composite(uv),
        };

        (color.w >= COVERAGE_THRESHOLD).then_some(color)
    }

    /// [`shade`](Self::shade) with discarded pixels as transparent black.
    pub fn shade_rgba(&self, uv: Vec2) -> Vec4 {
        self.shade(uv).unwrap_or(Vec4::ZERO)
    }
}
