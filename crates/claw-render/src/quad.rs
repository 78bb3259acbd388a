//! Quad rasterization: the CPU counterpart of drawing one textured glyph quad.

use crate::executor::Executor;
use crate::framebuffer::Framebuffer;
use claw_shader::{CoverageSource, Shader, ShadingParams};
use glam::Vec2;
use std::ops::AddAssign;

/// Screen-space rectangle a glyph bitmap is stretched over, y down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphQuad {
    pub min: Vec2,
    pub size: Vec2,
}

impl GlyphQuad {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            ..self
        }
    }

    /// Normalized glyph coordinate of a screen point; `(0, 0)` is the quad's top-left.
    #[inline]
    pub fn uv(&self, point: Vec2) -> Vec2 {
        (point - self.min) / self.size
    }

    /// Half-open pixel ranges `(x0..x1, y0..y1)` whose centers fall inside the quad,
    /// clipped to a `width` x `height` target. `None` when nothing is covered.
    pub fn pixel_span(&self, width: u32, height: u32) -> Option<([u32; 2], [u32; 2])> {
        if !(self.size.x > 0.0 && self.size.y > 0.0) {
            return None;
        }

        // Center x + 0.5 is inside when min <= x + 0.5 < max.
        let first = (self.min - 0.5).ceil().max(Vec2::ZERO);
        let last = (self.max() - 0.5)
            .ceil()
            .min(Vec2::new(width as f32, height as f32));

        if first.x >= last.x || first.y >= last.y {
            return None;
        }

        Some((
            [first.x as u32, last.x as u32],
            [first.y as u32, last.y as u32],
        ))
    }
}

/// Per-draw fragment counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub glyphs: usize,
    pub pixels_shaded: usize,
    pub pixels_discarded: usize,
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.glyphs += rhs.glyphs;
        self.pixels_shaded += rhs.pixels_shaded;
        self.pixels_discarded += rhs.pixels_discarded;
    }
}

/// One draw call: a quad bound to a glyph's coverage and an immutable parameter set.
#[derive(Debug)]
pub struct GlyphDraw<'a, C: ?Sized> {
    pub quad: GlyphQuad,
    pub coverage: &'a C,
    pub params: ShadingParams,
}

impl<C: ?Sized> Clone for GlyphDraw<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for GlyphDraw<'_, C> {}

impl<'a, C: ?Sized> GlyphDraw<'a, C> {
    pub fn new(quad: GlyphQuad, coverage: &'a C, params: ShadingParams) -> Self {
        Self {
            quad,
            coverage,
            params,
        }
    }
}

/// Shade every pixel of the draw's quad and blend the survivors into `target`.
///
/// Rows are shaded through `executor`; blending happens afterwards in row order, so the
/// result does not depend on the executor.
pub fn draw_glyph<C, X>(target: &mut Framebuffer, executor: &X, draw: GlyphDraw<'_, C>) -> DrawStats
where
    C: CoverageSource + Sync + ?Sized,
    X: Executor,
{
    let GlyphDraw {
        quad,
        coverage,
        params,
    } = draw;

    let Some(([x0, x1], [y0, y1])) = quad.pixel_span(target.width(), target.height()) else {
        return DrawStats {
            glyphs: 1,
            ..DrawStats::default()
        };
    };

    let shader = Shader::new(coverage, params);
    let fragments = executor.flatten_into_vector((y1 - y0) as usize, |row| {
        let y = y0 + row as u32;
        (x0..x1)
            .map(|x| {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                (x, y, shader.shade(quad.uv(center)))
            })
            .collect()
    });

    let mut stats = DrawStats {
        glyphs: 1,
        ..DrawStats::default()
    };
    for (x, y, fragment) in fragments {
        match fragment {
            Some(color) => {
                target.blend(x, y, color);
                stats.pixels_shaded += 1;
            }
            None => stats.pixels_discarded += 1,
        }
    }

    log::trace!(
        "Glyph quad {:?}: {} shaded, {} discarded",
        quad,
        stats.pixels_shaded,
        stats.pixels_discarded
    );

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, BACKGROUND};
    use crate::executor::SequentialExecutor;
    use claw_shader::CoverageMask;

    fn solid(size: u32) -> CoverageMask {
        CoverageMask::from_fn(size, size, |_| 1.0)
    }

    #[test]
    fn test_pixel_span() {
        let quad = GlyphQuad::new(Vec2::new(2.0, 3.0), Vec2::new(4.0, 2.0));
        assert_eq!(quad.pixel_span(100, 100), Some(([2, 6], [3, 5])));

        // Clipped by the target.
        assert_eq!(quad.pixel_span(4, 4), Some(([2, 4], [3, 4])));

        // Fully off-screen and degenerate quads.
        let off = GlyphQuad::new(Vec2::new(-10.0, -10.0), Vec2::new(4.0, 4.0));
        assert_eq!(off.pixel_span(100, 100), None);
        let flat = GlyphQuad::new(Vec2::ZERO, Vec2::new(4.0, 0.0));
        assert_eq!(flat.pixel_span(100, 100), None);
    }

    #[test]
    fn test_uv_corners() {
        let quad = GlyphQuad::new(Vec2::new(10.0, 20.0), Vec2::new(4.0, 8.0));
        assert_eq!(quad.uv(Vec2::new(10.0, 20.0)), Vec2::ZERO);
        assert_eq!(quad.uv(Vec2::new(14.0, 28.0)), Vec2::ONE);
    }

    #[test]
    fn test_empty_coverage_leaves_target() {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear(BACKGROUND);

        let mask = CoverageMask::from_fn(8, 8, |_| 0.0);
        let quad = GlyphQuad::new(Vec2::new(4.0, 4.0), Vec2::splat(8.0));
        let draw = GlyphDraw::new(quad, &mask, ShadingParams::default());
        let stats = draw_glyph(&mut fb, &SequentialExecutor, draw);

        assert_eq!(stats.pixels_shaded, 0);
        assert_eq!(stats.pixels_discarded, 64);
        assert!(fb.pixels().iter().all(|&c| c == BACKGROUND));
    }

    #[test]
    fn test_shadow_quad_is_black() {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear(BACKGROUND);

        let mask = solid(8);
        let quad = GlyphQuad::new(Vec2::new(4.0, 4.0), Vec2::splat(8.0));
        let params = ShadingParams::default().shadow_pass();
        let stats = draw_glyph(&mut fb, &SequentialExecutor, GlyphDraw::new(quad, &mask, params));

        assert_eq!(stats.pixels_shaded, 64);
        assert_eq!(fb.pixel(8, 8), Some(Color::rgb(0.0, 0.0, 0.0)));
        assert_eq!(fb.pixel(3, 3), Some(BACKGROUND));
        assert_eq!(fb.pixel(12, 12), Some(BACKGROUND));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_rayon_matches_sequential() {
        use crate::executor::RayonExecutor;

        let mask = CoverageMask::from_fn(24, 24, |uv| {
            if (uv - Vec2::splat(0.5)).length() < 0.4 {
                1.0
            } else {
                0.0
            }
        });
        let quad = GlyphQuad::new(Vec2::new(3.5, 2.0), Vec2::new(30.0, 27.0));

        let mut a = Framebuffer::new(40, 40);
        let mut b = Framebuffer::new(40, 40);
        a.clear(BACKGROUND);
        b.clear(BACKGROUND);

        let draw = GlyphDraw::new(quad, &mask, ShadingParams::default());
        let sa = draw_glyph(&mut a, &SequentialExecutor, draw);
        let sb = draw_glyph(&mut b, &RayonExecutor, draw);

        assert_eq!(sa, sb);
        assert_eq!(a.pixels(), b.pixels());
    }
}
