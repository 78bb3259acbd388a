//! Per-draw shading parameters for runtime tuning

use glam::Vec2;

pub const DEFAULT_INTERIOR_INTENSITY: f32 = 0.7;
pub const DEFAULT_EDGE_INTENSITY: f32 = 0.9;
pub const DEFAULT_BEVEL_STRENGTH: f32 = 0.5;
pub const DEFAULT_MEDIAN_RADIUS: f32 = 1.5;
pub const DEFAULT_MEDIAN_PERCENTILE: f32 = 0.5;
pub const DEFAULT_PIXEL_SIZE: f32 = 1.5;

/// Valid range of `median_radius`, in texels.
pub const MEDIAN_RADIUS_RANGE: (f32, f32) = (0.5, 2.5);

/// Smallest pixelization block, in texels.
pub const MIN_PIXEL_SIZE: f32 = 1.0e-3;

/// Which stage produces the final fragment color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutputStage {
    /// Block pixelization of the colorized glyph (the classic look).
    #[default]
    Pixelized,
    /// Edge-aware blend of the rank-filtered and sharp colors, without pixelization.
    Composited,
}

/// Immutable parameter set for one glyph draw.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShadingParams {
    /// Base tone of the glyph interior.
    pub interior_intensity: f32,
    /// Base tone along glyph outlines.
    pub edge_intensity: f32,
    /// Shadow draws skip stylization and emit flat black blocks.
    pub is_shadow: bool,
    pub use_bevel: bool,
    pub bevel_strength: f32,
    /// Debug override: emit the clamped intensity as gray instead of palette colors.
    pub use_grayscale: bool,
    /// Rank filter radius in texels.
    pub median_radius: f32,
    /// Rank selected by the filter; 0.5 is the median.
    pub median_percentile: f32,
    /// Pixelization block size in texels.
    pub pixel_size: Vec2,
    pub pixelize: bool,
    pub output_stage: OutputStage,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            interior_intensity: DEFAULT_INTERIOR_INTENSITY,
            edge_intensity: DEFAULT_EDGE_INTENSITY,
            is_shadow: false,
            use_bevel: true,
            bevel_strength: DEFAULT_BEVEL_STRENGTH,
            use_grayscale: false,
            median_radius: DEFAULT_MEDIAN_RADIUS,
            median_percentile: DEFAULT_MEDIAN_PERCENTILE,
            pixel_size: Vec2::splat(DEFAULT_PIXEL_SIZE),
            pixelize: true,
            output_stage: OutputStage::Pixelized,
        }
    }
}

impl ShadingParams {
    /// The same parameters configured for the drop-shadow pass.
    pub fn shadow_pass(self) -> Self {
        Self {
            is_shadow: true,
            use_bevel: false,
            ..self
        }
    }

    /// Clamp every value into its documented domain.
    ///
    /// Non-finite values fall back to their defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let unit = |v: f32, fallback: f32| {
            if v.is_finite() {
                v.clamp(0.0, 1.0)
            } else {
                fallback
            }
        };
        let block = |v: f32| {
            if v.is_finite() {
                v.max(MIN_PIXEL_SIZE)
            } else {
                DEFAULT_PIXEL_SIZE
            }
        };

        let median_radius = if self.median_radius.is_finite() {
            self.median_radius
                .clamp(MEDIAN_RADIUS_RANGE.0, MEDIAN_RADIUS_RANGE.1)
        } else {
            defaults.median_radius
        };

        Self {
            interior_intensity: unit(self.interior_intensity, defaults.interior_intensity),
            edge_intensity: unit(self.edge_intensity, defaults.edge_intensity),
            bevel_strength: unit(self.bevel_strength, defaults.bevel_strength),
            median_radius,
            median_percentile: unit(self.median_percentile, defaults.median_percentile),
            pixel_size: Vec2::new(block(self.pixel_size.x), block(self.pixel_size.y)),
            ..self
        }
    }

    /// Whether [`sanitized`](Self::sanitized) would change anything.
    pub fn is_sanitized(&self) -> bool {
        self.sanitized() == *self
    }
}
