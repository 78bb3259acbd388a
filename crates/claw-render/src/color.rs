use glam::Vec4;

/// RGBA color with values in [0, 1], stored as written (no transfer function applied)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Source-over blend with straight alpha, applied to all four channels:
    /// `src * src.a + dst * (1 - src.a)`.
    pub fn blend_over(self, src: Color) -> Color {
        let a = src.a.clamp(0.0, 1.0);
        Color {
            r: src.r * a + self.r * (1.0 - a),
            g: src.g * a + self.g * (1.0 - a),
            b: src.b * a + self.b * (1.0 - a),
            a: src.a * a + self.a * (1.0 - a),
        }
    }

    /// Quantize to 8 bits per channel.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

/// Background of the demo scene (dark teal).
pub const BACKGROUND: Color = Color::rgb(0.2, 0.3, 0.3);
