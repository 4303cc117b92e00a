use serde::{Deserialize, Serialize};

use crate::{Color, Image, Position, Rectangle, Size};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushType {
    #[default]
    Circle,
    Square,
    Line,
    Image,
}

/// How image brush pixels line up with the canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushPattern {
    /// The brush image is centered on each stamp.
    #[default]
    Normal,
    /// The image tiles from the pattern origin, fixed in the source.
    ///
    /// Source and destination images both use sprite coordinates, so this
    /// tiles exactly like `AlignedToDst`.
    AlignedToSrc,
    /// The image tiles from the pattern origin, fixed in the destination.
    AlignedToDst,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Brush {
    brush_type: BrushType,
    size: i32,
    angle: i32,
    image: Option<Image>,
    pattern: BrushPattern,
    pattern_origin: Position,
    bounds: Rectangle,
    mask: Vec<bool>,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(BrushType::Circle, 1, 0)
    }
}

impl Brush {
    pub fn new(brush_type: BrushType, size: i32, angle: i32) -> Self {
        let size = size.max(1);
        let bounds = Rectangle::from(-size / 2, -size / 2, size, size);
        let mask = match brush_type {
            BrushType::Circle => circle_mask(size),
            BrushType::Line => line_mask(size, angle),
            BrushType::Square | BrushType::Image => vec![true; (size * size) as usize],
        };
        Self {
            brush_type: if brush_type == BrushType::Image { BrushType::Square } else { brush_type },
            size,
            angle,
            image: None,
            pattern: BrushPattern::Normal,
            pattern_origin: Position::default(),
            bounds,
            mask,
        }
    }

    /// Custom brush whose opaque pixels define the stamp.
    pub fn from_image(image: Image) -> Self {
        let size = Size::new(image.width().max(1), image.height().max(1));
        let bounds = Rectangle::new(Position::new(-size.width / 2, -size.height / 2), size);
        let mut mask = Vec::with_capacity(size.area() as usize);
        for y in 0..size.height {
            for x in 0..size.width {
                mask.push(!image.get_pixel(x, y).is_transparent());
            }
        }
        Self {
            brush_type: BrushType::Image,
            size: size.width.max(size.height),
            angle: 0,
            image: Some(image),
            pattern: BrushPattern::Normal,
            pattern_origin: Position::default(),
            bounds,
            mask,
        }
    }

    pub fn with_pattern(mut self, pattern: BrushPattern, origin: Position) -> Self {
        self.pattern = pattern;
        self.pattern_origin = origin;
        self
    }

    pub fn brush_type(&self) -> BrushType {
        self.brush_type
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    pub fn pattern(&self) -> BrushPattern {
        self.pattern
    }

    pub fn pattern_origin(&self) -> Position {
        self.pattern_origin
    }

    /// Stamp area relative to the point the brush is centered on.
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Whether the stamp covers (x, y), given relative to `bounds().start`.
    pub fn mask_contains(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.bounds.width() || y >= self.bounds.height() {
            return false;
        }
        self.mask[(y * self.bounds.width() + x) as usize]
    }

    /// Color of the image brush for a canvas pixel, given the point the
    /// current stamp is centered on.
    pub fn pattern_color(&self, stamp_center: Position, x: i32, y: i32) -> Option<Color> {
        let image = self.image.as_ref()?;
        let (w, h) = (image.width(), image.height());
        let (px, py) = match self.pattern {
            BrushPattern::Normal => {
                let origin = stamp_center + self.bounds.start;
                (x - origin.x, y - origin.y)
            }
            // same origin: source and destination share sprite coordinates
            BrushPattern::AlignedToSrc | BrushPattern::AlignedToDst => {
                ((x - self.pattern_origin.x).rem_euclid(w), (y - self.pattern_origin.y).rem_euclid(h))
            }
        };
        Some(image.get_pixel(px, py))
    }
}

fn circle_mask(size: i32) -> Vec<bool> {
    let r = size as f32 / 2.0;
    let mut mask = Vec::with_capacity((size * size) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - r;
            let dy = y as f32 + 0.5 - r;
            mask.push(dx * dx + dy * dy <= r * r);
        }
    }
    mask
}

fn line_mask(size: i32, angle: i32) -> Vec<bool> {
    let mut mask = vec![false; (size * size) as usize];
    let rad = (angle as f32).to_radians();
    let c = (size - 1) as f32 / 2.0;
    let steps = size * 2;
    for i in 0..=steps {
        let t = i as f32 / steps as f32 - 0.5;
        let x = (c + t * (size - 1) as f32 * rad.cos()).round() as i32;
        let y = (c - t * (size - 1) as f32 * rad.sin()).round() as i32;
        if x >= 0 && y >= 0 && x < size && y < size {
            mask[(y * size + x) as usize] = true;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_centered() {
        let brush = Brush::new(BrushType::Square, 3, 0);
        assert_eq!(brush.bounds(), Rectangle::from(-1, -1, 3, 3));
        let brush = Brush::new(BrushType::Square, 2, 0);
        assert_eq!(brush.bounds(), Rectangle::from(-1, -1, 2, 2));
        assert!(Brush::default().mask_contains(0, 0));
    }

    #[test]
    fn test_circle_mask_is_round() {
        let brush = Brush::new(BrushType::Circle, 7, 0);
        assert!(brush.mask_contains(3, 3));
        assert!(brush.mask_contains(3, 0));
        assert!(!brush.mask_contains(0, 0));
    }

    #[test]
    fn test_horizontal_line_brush() {
        let brush = Brush::new(BrushType::Line, 5, 0);
        for x in 0..5 {
            assert!(brush.mask_contains(x, 2));
        }
        assert!(!brush.mask_contains(2, 0));
    }

    #[test]
    fn test_image_brush_pattern() {
        let mut img = Image::new(2, 2);
        img.put_pixel(0, 0, Color::WHITE);
        img.put_pixel(1, 1, Color::BLACK);
        let brush = Brush::from_image(img).with_pattern(BrushPattern::AlignedToDst, Position::new(0, 0));
        assert_eq!(brush.brush_type(), BrushType::Image);
        assert!(brush.mask_contains(0, 0));
        assert!(!brush.mask_contains(1, 0));
        assert_eq!(brush.pattern_color(Position::new(9, 9), 4, 4), Some(Color::WHITE));
        assert_eq!(brush.pattern_color(Position::new(9, 9), 5, 5), Some(Color::BLACK));
    }

    #[test]
    fn test_aligned_patterns_share_the_origin() {
        let mut img = Image::new(3, 2);
        img.put_pixel(1, 0, Color::WHITE);
        img.put_pixel(2, 1, Color::BLACK);
        let origin = Position::new(5, -3);
        let src = Brush::from_image(img.clone()).with_pattern(BrushPattern::AlignedToSrc, origin);
        let dst = Brush::from_image(img).with_pattern(BrushPattern::AlignedToDst, origin);
        for (x, y) in [(6, -3), (7, -2), (-4, 1), (12, 8)] {
            let center = Position::new(x + 1, y);
            assert_eq!(src.pattern_color(center, x, y), dst.pattern_color(center, x, y), "pixel {x},{y}");
        }
        assert_eq!(src.pattern_color(Position::default(), 6, -3), Some(Color::WHITE));
        assert_eq!(src.pattern_color(Position::default(), 4, -4), Some(Color::BLACK));
    }
}
