//! Glyph shaping + rasterization for `claw-text`.
//!
//! # Design goals
//! - **Shader-agnostic**: produces coverage masks, knows nothing about stylization.
//! - **Practical**: provides CPU-side glyph bitmaps and positioned glyph runs.
//! - **Cache-friendly**: stable `GlyphKey` so renderers can memoize coverage per glyph.
//!
//! # Current implementation
//! The `cosmic` feature provides an implementation using `cosmic-text`. Fonts come from the
//! system font database, optionally extended with a font file given at startup.
//!
//! Renderers are expected to:
//! 1. Call [`TextEngine::shape_line`] for each string.
//! 2. Fetch coverage through a [`GlyphCache`], which calls [`TextEngine::rasterize_glyph`]
//!    once per key.
//! 3. Build one quad per [`PositionedGlyph`] from the cached bearing and bitmap size.

mod cache;

pub use cache::*;

use claw_shader::CoverageMask;

/// A stable identifier for a font face known to the text engine.
///
/// This is intentionally opaque to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontId(pub u64);

/// A stable key for caching a glyph bitmap.
///
/// Notes:
/// - `font_id` is engine owned.
/// - `glyph_id` is the font-specific glyph index (not Unicode scalar value).
/// - `px_size` is the requested font size in pixels (rounded).
/// - `weight` is the CSS weight the glyph was shaped with (variable fonts).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    pub font_id: FontId,
    pub glyph_id: u32,
    pub px_size: u16,
    pub weight: u16,
}

impl GlyphKey {
    pub fn new(font_id: FontId, glyph_id: u32, px_size: u16, weight: u16) -> Self {
        Self {
            font_id,
            glyph_id,
            px_size,
            weight,
        }
    }
}

/// CPU-side glyph coverage bitmap.
#[derive(Clone, Debug)]
pub struct GlyphBitmap {
    pub key: GlyphKey,
    /// Bitmap dimensions in pixels: (width, height).
    pub size_px: [u32; 2],
    /// Glyph bearing in pixels (left, top) relative to the pen position on the baseline.
    ///
    /// Coordinate convention:
    /// - x grows right
    /// - y grows down
    pub bearing_px: [i32; 2],
    /// Row-major coverage bytes (0..=255), length = `width * height`.
    pub pixels: Vec<u8>,
}

impl GlyphBitmap {
    /// Convert to a filterable coverage field for the shader.
    ///
    /// Returns `None` if the pixel buffer does not match `size_px`.
    pub fn to_coverage(&self) -> Option<CoverageMask> {
        let [w, h] = self.size_px;
        if w == 0 || h == 0 {
            return Some(CoverageMask::empty());
        }
        CoverageMask::from_u8(w, h, &self.pixels)
    }
}

/// A shaped glyph positioned in pixel space relative to the line's pen origin.
///
/// `x_px` advances along the baseline; `y_px` is the baseline-relative offset (y down).
#[derive(Clone, Copy, Debug)]
pub struct PositionedGlyph {
    pub key: GlyphKey,
    pub x_px: f32,
    pub y_px: f32,
}

/// Metric information of a shaped line.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineMetrics {
    pub width_px: f32,
    pub height_px: f32,
    /// Baseline offset from top of line box, in pixels.
    pub baseline_px: f32,
}

/// A shaped single-line run.
#[derive(Clone, Debug, Default)]
pub struct ShapedLine {
    pub glyphs: Vec<PositionedGlyph>,
    pub metrics: LineMetrics,
}

/// Input describing a single-line shaping request.
#[derive(Clone, Copy, Debug)]
pub struct ShapeLineRequest<'a> {
    pub text: &'a str,
    pub font_px: f32,
    /// CSS font weight (400 regular, 700 bold).
    pub weight: u16,
}

impl<'a> ShapeLineRequest<'a> {
    pub fn new(text: &'a str, font_px: f32) -> Self {
        Self {
            text,
            font_px,
            weight: 400,
        }
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }
}

/// A text engine: shaping and rasterization. Callers do the caching.
pub trait TextEngine {
    /// Shape a single line. Glyph positions are relative to the pen origin on the baseline.
    fn shape_line(&mut self, req: ShapeLineRequest<'_>) -> ShapedLine;

    /// Rasterize the glyph bitmap for the given `key`, if available.
    fn rasterize_glyph(&mut self, key: GlyphKey) -> Option<GlyphBitmap>;
}

impl<E: TextEngine + ?Sized> TextEngine for &mut E {
    fn shape_line(&mut self, req: ShapeLineRequest<'_>) -> ShapedLine {
        (**self).shape_line(req)
    }

    fn rasterize_glyph(&mut self, key: GlyphKey) -> Option<GlyphBitmap> {
        (**self).rasterize_glyph(key)
    }
}

#[cfg(feature = "cosmic")]
pub mod cosmic {
    //! `cosmic-text` implementation of shaping and glyph rasterization.
    //!
    //! Focused on:
    //! - shaping a single line (no wrapping)
    //! - rasterizing glyph coverage masks

    use super::{
        FontId, GlyphBitmap, GlyphKey, LineMetrics, PositionedGlyph, ShapeLineRequest,
        ShapedLine, TextEngine,
    };

    use cosmic_text::{fontdb, Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
    use std::io;
    use std::path::Path;

    /// Concrete engine backed by `cosmic-text`.
    pub struct CosmicEngine {
        font_system: FontSystem,

        // Raster cache for swash (used by cosmic-text under the hood).
        swash_cache: cosmic_text::SwashCache,

        /// Preferred family; cosmic-text falls back per glyph when it lacks coverage.
        family: Option<String>,

        /// `FontId(i)` is `faces[i]`.
        faces: Vec<fontdb::ID>,
    }

    impl CosmicEngine {
        /// Create the engine with the system font database.
        pub fn new_default() -> Self {
            let font_system = FontSystem::new();
            log::info!(
                "Font database loaded ({} faces)",
                font_system.db().faces().count()
            );

            Self {
                font_system,
                swash_cache: cosmic_text::SwashCache::new(),
                family: None,
                faces: Vec::new(),
            }
        }

        /// Prefer `family` when shaping.
        pub fn with_family(mut self, family: impl Into<String>) -> Self {
            self.family = Some(family.into());
            self
        }

        /// Load a font file and prefer its family (unless a family was set explicitly).
        pub fn load_font_file(&mut self, path: &Path) -> io::Result<()> {
            let bytes = std::fs::read(path)?;
            let before: Vec<fontdb::ID> = self.font_system.db().faces().map(|f| f.id).collect();

            self.font_system.db_mut().load_font_data(bytes);

            let loaded = self
                .font_system
                .db()
                .faces()
                .find(|face| !before.contains(&face.id))
                .and_then(|face| face.families.first().map(|f| f.0.clone()));

            match loaded {
                Some(name) => {
                    log::info!("Loaded font '{}' from {}", name, path.display());
                    if self.family.is_none() {
                        self.family = Some(name);
                    }
                    Ok(())
                }
                None => Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("no font face found in {}", path.display()),
                )),
            }
        }

        fn font_id_for(&mut self, id: fontdb::ID) -> FontId {
            let index = match self.faces.iter().position(|&f| f == id) {
                Some(index) => index,
                None => {
                    self.faces.push(id);
                    self.faces.len() - 1
                }
            };
            FontId(index as u64)
        }
    }

    impl TextEngine for CosmicEngine {
        fn shape_line(&mut self, req: ShapeLineRequest<'_>) -> ShapedLine {
            // cosmic-text asserts on a zero line height.
            if !(req.font_px.is_finite() && req.font_px > 0.0) {
                log::warn!("Cannot shape {:?} at {}px", req.text, req.font_px);
                return ShapedLine::default();
            }

            let metrics = Metrics::new(req.font_px, req.font_px * 1.2);
            let mut buffer = Buffer::new(&mut self.font_system, metrics);

            // Prevent wrapping: set a huge width and line height from metrics.
            buffer.set_size(
                &mut self.font_system,
                Some(f32::MAX),
                Some(metrics.line_height),
            );

            let family = match &self.family {
                Some(name) => Family::Name(name.as_str()),
                None => Family::Serif,
            };
            let attrs = Attrs::new()
                .family(family)
                .weight(fontdb::Weight(req.weight));

            buffer.set_text(
                &mut self.font_system,
                req.text,
                &attrs,
                Shaping::Advanced,
                None,
            );
            buffer.shape_until_scroll(&mut self.font_system, false);

            let mut out = ShapedLine {
                glyphs: Vec::new(),
                metrics: LineMetrics {
                    width_px: 0.0,
                    height_px: metrics.line_height,
                    baseline_px: 0.0,
                },
            };

            // `LayoutGlyph::physical` gives the exact cache key swash rasterizes with, plus the
            // integer pixel offsets relative to the baseline. We keep positions baseline-relative
            // so renderers can place strings by their baseline.
            let mut placed = Vec::new();
            if let Some(run) = buffer.layout_runs().next() {
                out.metrics.width_px = run.line_w;
                out.metrics.height_px = run.line_height;
                out.metrics.baseline_px = (run.line_y - run.line_top).max(0.0);

                for glyph in run.glyphs.iter() {
                    let physical = glyph.physical((0.0, 0.0), 1.0);
                    placed.push((
                        physical.cache_key.font_id,
                        physical.cache_key.glyph_id as u32,
                        f32::from_bits(physical.cache_key.font_size_bits)
                            .round()
                            .max(1.0) as u16,
                        physical.x as f32,
                        physical.y as f32,
                    ));
                }
            }

            for (font, glyph_id, px_size, x_px, y_px) in placed {
                let key = GlyphKey::new(self.font_id_for(font), glyph_id, px_size, req.weight);
                out.glyphs.push(PositionedGlyph { key, x_px, y_px });
            }

            log::debug!(
                "Shaped {:?}: {} glyphs, {:.1}px wide",
                req.text,
                out.glyphs.len(),
                out.metrics.width_px
            );

            out
        }

        fn rasterize_glyph(&mut self, key: GlyphKey) -> Option<GlyphBitmap> {
            let font_id = *self.faces.get(key.font_id.0 as usize)?;

            // `CacheKey::new` returns (cache_key, x, y) where x/y are the integer placement offsets.
            let (cache_key, x, y) = cosmic_text::CacheKey::new(
                font_id,
                key.glyph_id as u16,
                key.px_size as f32,
                (0.0, 0.0),
                fontdb::Weight(key.weight),
                cosmic_text::CacheKeyFlags::empty(),
            );

            let image = self
                .swash_cache
                .get_image(&mut self.font_system, cache_key)
                .clone()?;

            // Only coverage masks feed the shader; color glyphs (emoji) are skipped.
            if image.content != cosmic_text::SwashContent::Mask {
                log::warn!("Glyph {} is not a coverage mask, skipping", key.glyph_id);
                return None;
            }

            // Swash `top` is the distance from baseline to the top edge (positive up);
            // our bearing is y-down, so it flips.
            let bearing_px = [image.placement.left + x, -image.placement.top + y];

            Some(GlyphBitmap {
                key,
                size_px: [image.placement.width, image.placement.height],
                bearing_px,
                pixels: image.data,
            })
        }
    }
}
