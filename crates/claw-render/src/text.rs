use crate::executor::Executor;
use crate::framebuffer::Framebuffer;
use crate::quad::{draw_glyph, DrawStats, GlyphDraw, GlyphQuad};
use claw_glyphs::{CachedGlyph, GlyphCache, ShapeLineRequest, TextEngine};
use claw_shader::ShadingParams;
use glam::Vec2;
use std::sync::Arc;

pub const DEFAULT_FONT_PX: f32 = 48.0;
pub const DEFAULT_SCALE: f32 = 2.5;
/// Drop shadow offset in unscaled pixels, y down.
pub const DEFAULT_SHADOW_OFFSET: Vec2 = Vec2::new(2.0, 2.0);

/// How a string is laid out and shaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Size glyphs are shaped and rasterized at.
    pub font_px: f32,
    /// Screen-space magnification applied to the rasterized bitmaps.
    pub scale: f32,
    pub weight: u16,
    pub params: ShadingParams,
    pub draw_shadow: bool,
    pub shadow_offset: Vec2,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_px: DEFAULT_FONT_PX,
            scale: DEFAULT_SCALE,
            weight: 400,
            params: ShadingParams::default(),
            draw_shadow: true,
            shadow_offset: DEFAULT_SHADOW_OFFSET,
        }
    }
}

/// Draws shaped strings as stylized glyph quads.
pub struct TextRenderer<E, X> {
    glyphs: GlyphCache<E>,
    executor: X,
}

impl<E: TextEngine, X: Executor> TextRenderer<E, X> {
    pub fn new(engine: E, executor: X) -> Self {
        Self {
            glyphs: GlyphCache::new(engine),
            executor,
        }
    }

    pub fn glyph_cache_mut(&mut self) -> &mut GlyphCache<E> {
        &mut self.glyphs
    }

    /// Place each glyph of `text` with its pen origin at `baseline` (y down).
    fn layout(
        &mut self,
        text: &str,
        baseline: Vec2,
        style: &TextStyle,
    ) -> Vec<(Arc<CachedGlyph>, GlyphQuad)> {
        let line = self
            .glyphs
            .shape_line(ShapeLineRequest::new(text, style.font_px).with_weight(style.weight));

        line.glyphs
            .iter()
            .filter_map(|positioned| {
                let glyph = self.glyphs.get(positioned.key)?;
                let bearing = Vec2::new(glyph.bearing_px[0] as f32, glyph.bearing_px[1] as f32);
                let offset = Vec2::new(positioned.x_px, positioned.y_px) + bearing;
                let size = Vec2::new(glyph.size_px[0] as f32, glyph.size_px[1] as f32);

                let quad = GlyphQuad::new(baseline + offset * style.scale, size * style.scale);
                Some((glyph, quad))
            })
            .collect()
    }

    /// Draw `text` into `target`: the whole shadow pass first, then the lit pass on top.
    pub fn draw_text(
        &mut self,
        target: &mut Framebuffer,
        text: &str,
        baseline: Vec2,
        style: &TextStyle,
    ) -> DrawStats {
        let placed = self.layout(text, baseline, style);
        let mut stats = DrawStats::default();

        if style.draw_shadow {
            let params = style.params.shadow_pass();
            let offset = style.shadow_offset * style.scale;
            for (glyph, quad) in &placed {
                let draw = GlyphDraw::new(quad.translated(offset), &glyph.coverage, params);
                stats += draw_glyph(target, &self.executor, draw);
            }
        }

        for (glyph, quad) in &placed {
            let draw = GlyphDraw::new(*quad, &glyph.coverage, style.params);
            stats += draw_glyph(target, &self.executor, draw);
        }

        log::debug!(
            "Drew {:?}: {} glyph quads, {} pixels shaded, {} discarded",
            text,
            stats.glyphs,
            stats.pixels_shaded,
            stats.pixels_discarded
        );

        stats
    }
}
