//! The demo frame: a title with its underline over a dark teal background.

use crate::config::{RenderConfig, TITLE_BASELINE, UNDERLINE_BASELINE, UNDERLINE_TEXT};
use claw_glyphs::TextEngine;
use claw_render::{DrawStats, Executor, Framebuffer, TextRenderer, BACKGROUND};

pub fn render_scene<E, X>(renderer: &mut TextRenderer<E, X>, config: &RenderConfig) -> Framebuffer
where
    E: TextEngine,
    X: Executor,
{
    let mut target = Framebuffer::new(config.width, config.height);
    target.clear(BACKGROUND);

    let mut stats = DrawStats::default();
    stats += renderer.draw_text(&mut target, &config.text, TITLE_BASELINE, &config.style);
    if config.underline {
        stats += renderer.draw_text(
            &mut target,
            UNDERLINE_TEXT,
            UNDERLINE_BASELINE,
            &config.style,
        );
    }

    log::info!(
        "Rendered {}x{} frame: {} glyph quads, {} pixels shaded",
        config.width,
        config.height,
        stats.glyphs,
        stats.pixels_shaded
    );

    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use claw_glyphs::{
        FontId, GlyphBitmap, GlyphKey, LineMetrics, PositionedGlyph, ShapeLineRequest, ShapedLine,
    };
    use claw_render::SequentialExecutor;

    /// Every char is a 4x4 block resting on the baseline.
    struct BoxEngine;

    impl TextEngine for BoxEngine {
        fn shape_line(&mut self, req: ShapeLineRequest<'_>) -> ShapedLine {
            ShapedLine {
                glyphs: req
                    .text
                    .chars()
                    .enumerate()
                    .map(|(i, c)| PositionedGlyph {
                        key: GlyphKey::new(FontId(0), c as u32, req.font_px as u16, req.weight),
                        x_px: i as f32 * 6.0,
                        y_px: 0.0,
                    })
                    .collect(),
                metrics: LineMetrics::default(),
            }
        }

        fn rasterize_glyph(&mut self, key: GlyphKey) -> Option<GlyphBitmap> {
            Some(GlyphBitmap {
                key,
                size_px: [4, 4],
                bearing_px: [0, -4],
                pixels: vec![255; 16],
            })
        }
    }

    #[test]
    fn test_background_and_title() {
        let config = RenderConfig {
            underline: false,
            ..RenderConfig::default()
        };
        let mut renderer = TextRenderer::new(BoxEngine, SequentialExecutor);
        let frame = render_scene(&mut renderer, &config);

        assert_eq!(frame.width(), 800);
        assert_eq!(frame.height(), 600);
        assert_eq!(frame.pixel(0, 0), Some(BACKGROUND));

        // First glyph: 10x10 quad at (100, 290).
        assert_ne!(frame.pixel(101, 291), Some(BACKGROUND));
        assert_eq!(frame.pixel(101, 285), Some(BACKGROUND));
    }

    #[test]
    fn test_underline_drawn() {
        let mut renderer = TextRenderer::new(BoxEngine, SequentialExecutor);
        let with = render_scene(&mut renderer, &RenderConfig::default());
        let without = render_scene(
            &mut renderer,
            &RenderConfig {
                underline: false,
                ..RenderConfig::default()
            },
        );

        // Underline quad spans (110, 285) to (120, 295).
        assert_ne!(with.pixel(112, 286), without.pixel(112, 286));
    }
}
