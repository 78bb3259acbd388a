//! Glyph coverage cache.
//!
//! Owns the glyph → coverage mapping so the shader never sees glyph identities: renderers ask
//! for a key and get back an immutable coverage field plus placement info.
//!
//! Each key is rasterized at most once. Glyphs without a bitmap (whitespace, color glyphs,
//! unknown faces) are cached as misses so they are not retried every frame.

use crate::{GlyphKey, ShapeLineRequest, ShapedLine, TextEngine};
use claw_shader::CoverageMask;
use std::collections::HashMap;
use std::sync::Arc;

/// Rasterized glyph ready for shading.
#[derive(Debug)]
pub struct CachedGlyph {
    pub key: GlyphKey,
    /// Bitmap dimensions in pixels: (width, height).
    pub size_px: [u32; 2],
    /// Bearing (left, top) relative to the pen position on the baseline, y down.
    pub bearing_px: [i32; 2],
    pub coverage: CoverageMask,
}

/// A [`TextEngine`] wrapper memoizing rasterized glyphs.
pub struct GlyphCache<E> {
    engine: E,
    glyphs: HashMap<GlyphKey, Option<Arc<CachedGlyph>>>,
}

impl<E: TextEngine> GlyphCache<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            glyphs: HashMap::new(),
        }
    }

    /// Shape through the wrapped engine (shaping results are not cached).
    pub fn shape_line(&mut self, req: ShapeLineRequest<'_>) -> ShapedLine {
        self.engine.shape_line(req)
    }

    /// Coverage for `key`, rasterizing on first use.
    ///
    /// Returns `None` for glyphs with nothing to draw.
    pub fn get(&mut self, key: GlyphKey) -> Option<Arc<CachedGlyph>> {
        if let Some(hit) = self.glyphs.get(&key) {
            return hit.clone();
        }

        let glyph = self.rasterize(key).map(Arc::new);
        self.glyphs.insert(key, glyph.clone());
        glyph
    }

    fn rasterize(&mut self, key: GlyphKey) -> Option<CachedGlyph> {
        let bitmap = self.engine.rasterize_glyph(key)?;
        if bitmap.size_px[0] == 0 || bitmap.size_px[1] == 0 {
            return None;
        }

        let Some(coverage) = bitmap.to_coverage() else {
            log::warn!(
                "Glyph {} bitmap size {:?} does not match {} bytes",
                key.glyph_id,
                bitmap.size_px,
                bitmap.pixels.len()
            );
            return None;
        };

        log::debug!(
            "Rasterized glyph {} ({}x{})",
            key.glyph_id,
            bitmap.size_px[0],
            bitmap.size_px[1]
        );

        Some(CachedGlyph {
            key,
            size_px: bitmap.size_px,
            bearing_px: bitmap.bearing_px,
            coverage,
        })
    }

    /// Number of cached keys, including misses.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Drop every cached glyph.
    pub fn clear(&mut self) {
        self.glyphs.clear();
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
