//! Inks decide which color ends up in a destination pixel.
//!
//! The color functions here only look at their arguments: the same source
//! pixel, color and opacity always give the same result, so a sample can
//! be redrawn over a restored destination any number of times.

use std::collections::HashMap;

use sprite_engine::{BlendFormula, Color};

use super::{Button, InkType};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaintMode {
    /// Copies opaque colors, blends the rest
    #[default]
    Simple,
    /// Replaces the pixel, alpha included
    Copy,
    /// Blends but keeps the alpha of the pixel underneath
    LockAlpha,
    /// Paints the foreground color whatever the button
    WithFg,
    /// Paints the background color whatever the button
    WithBg,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EraserMode {
    #[default]
    Eraser,
    ReplaceFgWithBg,
    ReplaceBgWithFg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PickTarget {
    Foreground,
    Background,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ink {
    Paint(PaintMode),
    Shading,
    Eraser(EraserMode),
    Pick(PickTarget),
    Selection,
    Zoom,
    Scroll,
    Move,
    Slice,
    Blur,
    Jumble,
}

impl Default for Ink {
    fn default() -> Self {
        Ink::Paint(PaintMode::Simple)
    }
}

/// Colors and settings an ink reads, frozen at gesture start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InkColors {
    pub fg: Color,
    pub bg: Color,
    /// fg for the left button, bg for the right one
    pub primary: Color,
    pub secondary: Color,
    /// What erasing writes: transparent, or bg on a background layer
    pub transparent: Color,
    pub opacity: u8,
    pub tolerance: u8,
    pub blend: BlendFormula,
}

impl InkColors {
    pub fn new(fg: Color, bg: Color, button: Button) -> Self {
        let (primary, secondary) = if button == Button::Right { (bg, fg) } else { (fg, bg) };
        Self {
            fg,
            bg,
            primary,
            secondary,
            transparent: Color::TRANSPARENT,
            opacity: 255,
            tolerance: 0,
            blend: BlendFormula::Normal,
        }
    }
}

impl Ink {
    pub const ALL: [Ink; 18] = [
        Ink::Selection,
        Ink::Paint(PaintMode::Simple),
        Ink::Paint(PaintMode::WithFg),
        Ink::Paint(PaintMode::WithBg),
        Ink::Paint(PaintMode::Copy),
        Ink::Paint(PaintMode::LockAlpha),
        Ink::Shading,
        Ink::Eraser(EraserMode::Eraser),
        Ink::Eraser(EraserMode::ReplaceFgWithBg),
        Ink::Eraser(EraserMode::ReplaceBgWithFg),
        Ink::Pick(PickTarget::Foreground),
        Ink::Pick(PickTarget::Background),
        Ink::Zoom,
        Ink::Scroll,
        Ink::Move,
        Ink::Slice,
        Ink::Blur,
        Ink::Jumble,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Ink::Selection => "selection",
            Ink::Paint(PaintMode::Simple) => "paint",
            Ink::Paint(PaintMode::WithFg) => "paint_fg",
            Ink::Paint(PaintMode::WithBg) => "paint_bg",
            Ink::Paint(PaintMode::Copy) => "paint_copy",
            Ink::Paint(PaintMode::LockAlpha) => "paint_lock_alpha",
            Ink::Shading => "shading",
            Ink::Eraser(EraserMode::Eraser) => "eraser",
            Ink::Eraser(EraserMode::ReplaceFgWithBg) => "replace_fg_with_bg",
            Ink::Eraser(EraserMode::ReplaceBgWithFg) => "replace_bg_with_fg",
            Ink::Pick(PickTarget::Foreground) => "pick_fg",
            Ink::Pick(PickTarget::Background) => "pick_bg",
            Ink::Zoom => "zoom",
            Ink::Scroll => "scroll",
            Ink::Move => "move",
            Ink::Slice => "slice",
            Ink::Blur => "blur",
            Ink::Jumble => "jumble",
        }
    }

    pub fn is_paint(self) -> bool {
        matches!(self, Ink::Paint(_) | Ink::Shading)
    }

    pub fn is_eraser(self) -> bool {
        matches!(self, Ink::Eraser(_))
    }

    pub fn is_effect(self) -> bool {
        matches!(self, Ink::Blur | Ink::Jumble)
    }

    pub fn is_shading(self) -> bool {
        self == Ink::Shading
    }

    pub fn is_selection(self) -> bool {
        self == Ink::Selection
    }

    pub fn is_slice(self) -> bool {
        self == Ink::Slice
    }

    /// Inks used by tools that change the view or metadata, not pixels.
    pub fn is_navigation(self) -> bool {
        matches!(self, Ink::Zoom | Ink::Scroll | Ink::Move)
    }

    /// Whether strokes with this ink are committed to the layer.
    pub fn modifies_pixels(self) -> bool {
        self.is_paint() || self.is_eraser() || self.is_effect()
    }

    /// Applies the ink type preference to a generic paint ink.
    ///
    /// Fixed-color and non-paint inks are returned unchanged.
    pub fn with_ink_type(self, ink_type: InkType) -> Ink {
        match self {
            Ink::Paint(PaintMode::Simple | PaintMode::Copy | PaintMode::LockAlpha) => match ink_type {
                InkType::Simple | InkType::AlphaCompositing => Ink::Paint(PaintMode::Simple),
                InkType::CopyColor => Ink::Paint(PaintMode::Copy),
                InkType::LockAlpha => Ink::Paint(PaintMode::LockAlpha),
                InkType::Shading => Ink::Shading,
            },
            ink => ink,
        }
    }

    /// Color written over `src`, or `None` when the pixel stays untouched.
    ///
    /// `paint` is the color being applied (the primary color, or the image
    /// brush pixel). Neighborhood inks (blur, jumble) and inks that do not
    /// write pixels return `None`; the tool loop handles them.
    pub fn pixel(self, src: Color, paint: Color, colors: &InkColors, shade: &HashMap<Color, Color>) -> Option<Color> {
        let blend = |color: Color| colors.blend.blend(src, color, colors.opacity);
        match self {
            Ink::Paint(mode) => {
                let color = match mode {
                    PaintMode::WithFg => colors.fg,
                    PaintMode::WithBg => colors.bg,
                    _ => paint,
                };
                Some(match mode {
                    PaintMode::Copy => color,
                    PaintMode::LockAlpha => blend(color).with_alpha(src.a),
                    PaintMode::Simple | PaintMode::WithFg | PaintMode::WithBg => {
                        if colors.opacity == 255 && color.is_opaque() {
                            color
                        } else {
                            blend(color)
                        }
                    }
                })
            }
            Ink::Shading => Some(shade.get(&src).copied().unwrap_or(src)),
            Ink::Eraser(EraserMode::Eraser) => Some(BlendFormula::Merge.blend(src, colors.transparent, colors.opacity)),
            Ink::Eraser(EraserMode::ReplaceFgWithBg) => src.matches(colors.fg, colors.tolerance).then(|| blend(colors.bg)),
            Ink::Eraser(EraserMode::ReplaceBgWithFg) => src.matches(colors.bg, colors.tolerance).then(|| blend(colors.fg)),
            Ink::Pick(_) | Ink::Selection | Ink::Zoom | Ink::Scroll | Ink::Move | Ink::Slice | Ink::Blur | Ink::Jumble => None,
        }
    }
}

/// Maps every ramp color to its neighbor: the next one for the left
/// button, the previous one for the right button. Ends are clamped.
pub fn shade_remap(ramp: &[Color], button: Button) -> HashMap<Color, Color> {
    let mut remap = HashMap::with_capacity(ramp.len());
    if ramp.is_empty() {
        return remap;
    }
    let last = ramp.len() - 1;
    for (i, color) in ramp.iter().enumerate() {
        let j = if button == Button::Right { i.saturating_sub(1) } else { (i + 1).min(last) };
        remap.entry(*color).or_insert(ramp[j]);
    }
    remap
}

/// Average of the 3x3 neighborhood given by `get`, mixed into `src` by `opacity`.
pub fn blur_pixel(src: Color, opacity: u8, get: impl Fn(i32, i32) -> Option<Color>) -> Color {
    let (mut r, mut g, mut b, mut a, mut n) = (0u32, 0u32, 0u32, 0u32, 0u32);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if let Some(c) = get(dx, dy) {
                r += c.r as u32 * c.a as u32;
                g += c.g as u32 * c.a as u32;
                b += c.b as u32 * c.a as u32;
                a += c.a as u32;
                n += 1;
            }
        }
    }
    if n == 0 {
        return src;
    }
    let avg = if a == 0 {
        Color::TRANSPARENT
    } else {
        Color::rgba((r / a) as u8, (g / a) as u8, (b / a) as u8, (a / n) as u8)
    };
    BlendFormula::Merge.blend(src, avg, opacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(opacity: u8) -> InkColors {
        InkColors {
            opacity,
            tolerance: 0,
            ..InkColors::new(Color::rgb(255, 0, 0), Color::rgb(0, 0, 255), Button::Left)
        }
    }

    #[test]
    fn test_ink_registry_ids_are_unique() {
        let mut ids: Vec<_> = Ink::ALL.iter().map(|i| i.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Ink::ALL.len());
    }

    #[test]
    fn test_every_ink_is_idempotent() {
        let shade = shade_remap(&[Color::rgb(0, 0, 0), Color::rgb(9, 9, 9)], Button::Left);
        let sources = [Color::TRANSPARENT, Color::rgb(0, 0, 0), Color::rgba(40, 50, 60, 128), Color::rgb(255, 0, 0)];
        for ink in Ink::ALL {
            for opacity in [0, 77, 255] {
                let c = colors(opacity);
                for src in sources {
                    let first = ink.pixel(src, c.primary, &c, &shade);
                    let second = ink.pixel(src, c.primary, &c, &shade);
                    assert_eq!(first, second, "{} {opacity}", ink.id());
                }
            }
        }
    }

    #[test]
    fn test_simple_paint_copies_opaque_color() {
        let c = colors(255);
        let out = Ink::Paint(PaintMode::Simple).pixel(Color::rgb(1, 2, 3), c.primary, &c, &HashMap::new());
        assert_eq!(out, Some(Color::rgb(255, 0, 0)));
        let out = Ink::Paint(PaintMode::WithBg).pixel(Color::rgb(1, 2, 3), c.primary, &c, &HashMap::new());
        assert_eq!(out, Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn test_lock_alpha_keeps_source_alpha() {
        let c = colors(255);
        let out = Ink::Paint(PaintMode::LockAlpha).pixel(Color::rgba(1, 2, 3, 100), c.primary, &c, &HashMap::new());
        assert_eq!(out.map(|c| c.a), Some(100));
    }

    #[test]
    fn test_eraser_variants() {
        let c = colors(255);
        let none = HashMap::new();
        assert_eq!(
            Ink::Eraser(EraserMode::Eraser).pixel(Color::rgb(5, 5, 5), c.primary, &c, &none),
            Some(Color::TRANSPARENT)
        );
        assert_eq!(
            Ink::Eraser(EraserMode::ReplaceFgWithBg).pixel(Color::rgb(255, 0, 0), c.primary, &c, &none),
            Some(Color::rgb(0, 0, 255))
        );
        assert_eq!(Ink::Eraser(EraserMode::ReplaceFgWithBg).pixel(Color::rgb(5, 5, 5), c.primary, &c, &none), None);
    }

    #[test]
    fn test_shade_remap_directions() {
        let ramp = [Color::rgb(0, 0, 0), Color::rgb(1, 1, 1), Color::rgb(2, 2, 2)];
        let left = shade_remap(&ramp, Button::Left);
        assert_eq!(left[&ramp[0]], ramp[1]);
        assert_eq!(left[&ramp[2]], ramp[2]);
        let right = shade_remap(&ramp, Button::Right);
        assert_eq!(right[&ramp[1]], ramp[0]);
        assert_eq!(right[&ramp[0]], ramp[0]);
        let c = colors(255);
        assert_eq!(Ink::Shading.pixel(Color::WHITE, c.primary, &c, &left), Some(Color::WHITE));
    }

    #[test]
    fn test_ink_type_retargets_generic_paint_only() {
        assert_eq!(Ink::Paint(PaintMode::Simple).with_ink_type(InkType::LockAlpha), Ink::Paint(PaintMode::LockAlpha));
        assert_eq!(Ink::Paint(PaintMode::Simple).with_ink_type(InkType::Shading), Ink::Shading);
        assert_eq!(Ink::Paint(PaintMode::WithFg).with_ink_type(InkType::CopyColor), Ink::Paint(PaintMode::WithFg));
        assert_eq!(Ink::Blur.with_ink_type(InkType::CopyColor), Ink::Blur);
    }

    #[test]
    fn test_navigation_inks_never_write() {
        let c = colors(255);
        let navigation: Vec<_> = Ink::ALL.iter().copied().filter(|ink| ink.is_navigation()).collect();
        assert_eq!(navigation, vec![Ink::Zoom, Ink::Scroll, Ink::Move]);
        for ink in navigation {
            assert!(!ink.modifies_pixels());
            assert_eq!(ink.pixel(Color::WHITE, c.primary, &c, &HashMap::new()), None);
        }
        assert!(!Ink::Slice.is_navigation());
    }

    #[test]
    fn test_blur_of_uniform_area_is_identity() {
        let c = Color::rgb(10, 20, 30);
        assert_eq!(blur_pixel(c, 255, |_, _| Some(c)), c);
    }
}
