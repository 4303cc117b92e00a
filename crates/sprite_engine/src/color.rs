use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Largest per-channel difference. Two fully transparent colors are equal.
    pub fn distance(&self, other: Color) -> u8 {
        if self.a == 0 && other.a == 0 {
            return 0;
        }
        self.r
            .abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
            .max(self.a.abs_diff(other.a))
    }

    pub fn matches(&self, other: Color, tolerance: u8) -> bool {
        self.distance(other) <= tolerance
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8)) -> Self {
        Color::rgb(value.0, value.1, value.2)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8, u8)) -> Self {
        Color::rgba(value.0, value.1, value.2, value.3)
    }
}

/// Rounded `a * b / 255`.
pub fn mul_un8(a: i32, b: i32) -> i32 {
    let t = a * b + 0x80;
    ((t >> 8) + t) >> 8
}

/// How a painted color is combined with the pixel under it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendFormula {
    /// Porter-Duff "source over" with the opacity applied to the source alpha.
    #[default]
    Normal,
    /// Legacy formula: interpolates every channel, alpha included, by opacity.
    Merge,
}

impl BlendFormula {
    pub fn blend(self, backdrop: Color, src: Color, opacity: u8) -> Color {
        match self {
            BlendFormula::Normal => blend_normal(backdrop, src, opacity as i32),
            BlendFormula::Merge => blend_merge(backdrop, src, opacity as i32),
        }
    }
}

fn blend_normal(backdrop: Color, src: Color, opacity: i32) -> Color {
    if backdrop.a == 0 {
        return src.with_alpha(mul_un8(src.a as i32, opacity) as u8);
    }
    if src.a == 0 {
        return backdrop;
    }

    let sa = mul_un8(src.a as i32, opacity);
    let ba = backdrop.a as i32;
    let ra = sa + ba - mul_un8(ba, sa);
    if ra == 0 {
        return Color::TRANSPARENT;
    }
    let channel = |b: u8, s: u8| {
        let b = b as i32;
        (b + (s as i32 - b) * sa / ra).clamp(0, 255) as u8
    };

    Color::rgba(
        channel(backdrop.r, src.r),
        channel(backdrop.g, src.g),
        channel(backdrop.b, src.b),
        ra.clamp(0, 255) as u8,
    )
}

fn blend_merge(backdrop: Color, src: Color, opacity: i32) -> Color {
    let (r, g, b) = if backdrop.a == 0 {
        (src.r as i32, src.g as i32, src.b as i32)
    } else if src.a == 0 {
        (backdrop.r as i32, backdrop.g as i32, backdrop.b as i32)
    } else {
        let lerp = |b: u8, s: u8| b as i32 + mul_un8(s as i32 - b as i32, opacity);
        (lerp(backdrop.r, src.r), lerp(backdrop.g, src.g), lerp(backdrop.b, src.b))
    };
    let a = backdrop.a as i32 + mul_un8(src.a as i32 - backdrop.a as i32, opacity);
    if a == 0 {
        return Color::TRANSPARENT;
    }

    Color::rgba(r.clamp(0, 255) as u8, g.clamp(0, 255) as u8, b.clamp(0, 255) as u8, a.clamp(0, 255) as u8)
}
