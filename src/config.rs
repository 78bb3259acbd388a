//! Render configuration assembled from command-line flags and an optional JSON preset.

use anyhow::{Context, Result};
use claw_render::TextStyle;
use claw_shader::{OutputStage, ShadingParams};
use glam::Vec2;
use std::path::{Path, PathBuf};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_TEXT: &str = "END GAME";

/// Pen origin of the title, in framebuffer pixels (y down).
pub const TITLE_BASELINE: Vec2 = Vec2::new(100.0, 300.0);
/// Pen origin of the underline glyph.
pub const UNDERLINE_BASELINE: Vec2 = Vec2::new(110.0, 295.0);
pub const UNDERLINE_TEXT: &str = "_";

/// Everything needed to render one frame.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub text: String,
    pub width: u32,
    pub height: u32,
    pub style: TextStyle,
    pub underline: bool,
    pub parallel: bool,
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            style: TextStyle::default(),
            underline: true,
            parallel: true,
            output: PathBuf::from("claw-text.png"),
        }
    }
}

impl RenderConfig {
    /// Reject sizes the renderer cannot work with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.width > 0 && self.height > 0,
            "Output size must be non-zero, got {}x{}",
            self.width,
            self.height
        );
        anyhow::ensure!(
            self.style.font_px.is_finite() && self.style.font_px > 0.0,
            "Font size must be a positive number of pixels, got {}",
            self.style.font_px
        );
        anyhow::ensure!(
            self.style.scale.is_finite() && self.style.scale > 0.0,
            "Scale must be positive, got {}",
            self.style.scale
        );
        Ok(())
    }
}

/// Command-line overrides applied on top of a parameter preset.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParamOverrides {
    pub grayscale: bool,
    pub no_pixelize: bool,
    pub composited: bool,
}

impl ParamOverrides {
    pub fn apply(self, mut params: ShadingParams) -> ShadingParams {
        if self.grayscale {
            params.use_grayscale = true;
        }
        if self.no_pixelize {
            params.pixelize = false;
        }
        if self.composited {
            params.output_stage = OutputStage::Composited;
        }
        params
    }
}

/// Parse a JSON preset. Missing fields keep their defaults.
pub fn parse_params(json: &str) -> Result<ShadingParams> {
    let params: ShadingParams =
        serde_json::from_str(json).context("Invalid shading parameter preset")?;

    if !params.is_sanitized() {
        log::warn!("Shading parameters out of range; they will be clamped");
    }
    Ok(params)
}

pub fn load_params(path: &Path) -> Result<ShadingParams> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_params(&json).with_context(|| format!("Failed to load {}", path.display()))
}
