use crate::{BlendFormula, Color, Position, Rectangle, Region, Size};

/// RGBA pixel buffer. Reads outside the buffer return transparent,
/// writes outside the buffer are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl Image {
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: i32, height: i32, color: Color) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::from(0, 0, self.width, self.height)
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        if self.is_valid(x, y) {
            self.pixels[self.index(x, y)]
        } else {
            Color::TRANSPARENT
        }
    }

    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.is_valid(x, y) {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    pub fn draw_hline(&mut self, x1: i32, y: i32, x2: i32, color: Color) {
        if y < 0 || y >= self.height {
            return;
        }
        let lo = x1.min(x2).max(0);
        let hi = x1.max(x2).min(self.width - 1);
        if lo > hi {
            return;
        }
        let start = self.index(lo, y);
        let end = self.index(hi, y);
        self.pixels[start..=end].fill(color);
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        let rect = rect.intersect(&self.bounds());
        for y in rect.y_range() {
            self.draw_hline(rect.left(), y, rect.right(), color);
        }
    }

    /// Copies `rect` from `other` into the same coordinates of `self`.
    pub fn copy_rect_from(&mut self, other: &Image, rect: Rectangle) {
        let rect = rect.intersect(&self.bounds()).intersect(&other.bounds());
        for y in rect.y_range() {
            let src = other.index(rect.left(), y);
            let dst = self.index(rect.left(), y);
            let len = rect.width() as usize;
            self.pixels[dst..dst + len].copy_from_slice(&other.pixels[src..src + len]);
        }
    }

    pub fn copy_region_from(&mut self, other: &Image, region: &Region) {
        for rect in region.rects() {
            self.copy_rect_from(other, *rect);
        }
    }

    /// Returns the pixels inside `rect`; parts outside the image are transparent.
    pub fn crop(&self, rect: Rectangle) -> Image {
        let mut result = Image::new(rect.width(), rect.height());
        result.blit(self, -rect.start);
        result
    }

    /// Replaces the pixels of `self` with `other` placed at `at`.
    pub fn blit(&mut self, other: &Image, at: Position) {
        let target = other.bounds().offset(at).intersect(&self.bounds());
        for y in target.y_range() {
            let src = other.index(target.left() - at.x, y - at.y);
            let dst = self.index(target.left(), y);
            let len = target.width() as usize;
            self.pixels[dst..dst + len].copy_from_slice(&other.pixels[src..src + len]);
        }
    }

    /// Draws `other` at `at` over the existing pixels with the normal blend.
    pub fn composite(&mut self, other: &Image, at: Position, opacity: u8) {
        let target = other.bounds().offset(at).intersect(&self.bounds());
        for y in target.y_range() {
            for x in target.x_range() {
                let src = other.get_pixel(x - at.x, y - at.y);
                let dst = self.get_pixel(x, y);
                self.put_pixel(x, y, BlendFormula::Normal.blend(dst, src, opacity));
            }
        }
    }

    /// Bounding box of the pixels that differ from `color`.
    pub fn shrink_bounds(&self, color: Color) -> Rectangle {
        let mut bounds = Rectangle::default();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get_pixel(x, y) != color {
                    bounds = bounds.include(x, y);
                }
            }
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut img = Image::new(4, 4);
        img.put_pixel(-1, 0, Color::WHITE);
        img.put_pixel(4, 4, Color::WHITE);
        img.draw_hline(-10, 1, 10, Color::WHITE);
        assert_eq!(img.get_pixel(-1, 0), Color::TRANSPARENT);
        for x in 0..4 {
            assert_eq!(img.get_pixel(x, 1), Color::WHITE);
        }
        assert_eq!(img.get_pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn test_crop_and_blit() {
        let mut img = Image::new(5, 5);
        img.put_pixel(2, 2, Color::WHITE);
        let part = img.crop(Rectangle::from(1, 1, 3, 3));
        assert_eq!(part.get_pixel(1, 1), Color::WHITE);

        let mut target = Image::new(5, 5);
        target.blit(&part, Position::new(2, 2));
        assert_eq!(target.get_pixel(3, 3), Color::WHITE);
        assert_eq!(target.shrink_bounds(Color::TRANSPARENT), Rectangle::from(3, 3, 1, 1));
    }
}
