//! Claw Text
//!
//! Renders a title through the stylized glyph shader on the CPU and writes it to a PNG.

mod config;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use claw_glyphs::cosmic::CosmicEngine;
use claw_render::{Executor, Framebuffer, RayonExecutor, SequentialExecutor, TextRenderer};
use claw_shader::ShadingParams;
use config::{ParamOverrides, RenderConfig};
use std::path::PathBuf;
use std::time::Instant;

/// Stylized glyph rendering with palette bands, bevel lighting and pixelization
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Text to render
    #[arg(long, default_value = config::DEFAULT_TEXT)]
    text: String,

    /// Font file to load (its family is preferred unless --family is given)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Preferred font family
    #[arg(long)]
    family: Option<String>,

    /// Rasterization size in pixels
    #[arg(long, default_value_t = claw_render::DEFAULT_FONT_PX)]
    font_px: f32,

    /// Screen-space glyph magnification
    #[arg(long, default_value_t = claw_render::DEFAULT_SCALE)]
    scale: f32,

    /// Output width in pixels
    #[arg(short, long, default_value_t = config::DEFAULT_WIDTH)]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = config::DEFAULT_HEIGHT)]
    height: u32,

    /// JSON preset overriding the shading parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Emit the raw intensity as gray
    #[arg(long)]
    grayscale: bool,

    /// Disable block pixelization
    #[arg(long)]
    no_pixelize: bool,

    /// Use the edge-aware compositor as the final stage
    #[arg(long)]
    composited: bool,

    /// Skip the underline glyph
    #[arg(long)]
    no_underline: bool,

    /// Shade on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// PNG file to write
    #[arg(short, long, default_value = "claw-text.png")]
    output: PathBuf,
}

impl Args {
    fn to_config(&self) -> Result<RenderConfig> {
        let params = match &self.params {
            Some(path) => config::load_params(path)?,
            None => ShadingParams::default(),
        };
        let overrides = ParamOverrides {
            grayscale: self.grayscale,
            no_pixelize: self.no_pixelize,
            composited: self.composited,
        };

        let mut config = RenderConfig {
            text: self.text.clone(),
            width: self.width,
            height: self.height,
            underline: !self.no_underline,
            parallel: !self.sequential,
            output: self.output.clone(),
            ..RenderConfig::default()
        };
        config.style.font_px = self.font_px;
        config.style.scale = self.scale;
        config.style.params = overrides.apply(params);

        Ok(config)
    }

    fn engine(&self) -> Result<CosmicEngine> {
        let mut engine = CosmicEngine::new_default();
        if let Some(family) = &self.family {
            engine = engine.with_family(family.clone());
        }
        if let Some(path) = &self.font {
            engine
                .load_font_file(path)
                .with_context(|| format!("Failed to load font {}", path.display()))?;
        }
        Ok(engine)
    }
}

fn render<X: Executor>(engine: CosmicEngine, executor: X, config: &RenderConfig) -> Framebuffer {
    let mut renderer = TextRenderer::new(engine, executor);
    scene::render_scene(&mut renderer, config)
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.to_config()?;
    config.validate()?;

    log::info!(
        "Rendering {:?} at {}px x{}",
        config.text,
        config.style.font_px,
        config.style.scale
    );

    let engine = args.engine()?;
    let start = Instant::now();
    let frame = if config.parallel {
        render(engine, RayonExecutor, &config)
    } else {
        render(engine, SequentialExecutor, &config)
    };
    log::info!("Frame shaded in {:.1?}", start.elapsed());

    image::save_buffer(
        &config.output,
        &frame.to_rgba8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("Failed to write {}", config.output.display()))?;

    log::info!("✓ Wrote {}", config.output.display());
    Ok(())
}
