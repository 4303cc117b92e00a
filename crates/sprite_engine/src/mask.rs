use crate::{Position, Rectangle, Size};

/// Selection bitmap covering the whole sprite. Storage is allocated on
/// the first added pixel.
#[derive(Clone, Debug, Default)]
pub struct Mask {
    size: Size,
    bits: Vec<bool>,
}

impl PartialEq for Mask {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && (self.bits == other.bits || (self.is_empty() && other.is_empty()))
    }
}

impl Eq for Mask {}

/// One unit edge of the selection outline, in pixel-corner coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundarySegment {
    pub from: Position,
    pub to: Position,
}

impl Mask {
    pub fn new(width: i32, height: i32) -> Self {
        let size = Size::new(width.max(0), height.max(0));
        Self { size, bits: Vec::new() }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|b| *b)
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.size.width && y < self.size.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.is_valid(x, y) && !self.bits.is_empty() && self.bits[(y * self.size.width + x) as usize]
    }

    fn set_hline(&mut self, x1: i32, y: i32, x2: i32, value: bool) {
        if y < 0 || y >= self.size.height {
            return;
        }
        let lo = x1.min(x2).max(0);
        let hi = x1.max(x2).min(self.size.width - 1);
        if lo > hi {
            return;
        }
        if self.bits.is_empty() {
            if !value {
                return;
            }
            self.bits = vec![false; self.size.area() as usize];
        }
        let row = (y * self.size.width) as usize;
        self.bits[row + lo as usize..=row + hi as usize].fill(value);
    }

    pub fn add_hline(&mut self, x1: i32, y: i32, x2: i32) {
        self.set_hline(x1, y, x2, true);
    }

    pub fn subtract_hline(&mut self, x1: i32, y: i32, x2: i32) {
        self.set_hline(x1, y, x2, false);
    }

    pub fn add_rect(&mut self, rect: Rectangle) {
        for y in rect.y_range() {
            self.add_hline(rect.left(), y, rect.right());
        }
    }

    pub fn bounds(&self) -> Rectangle {
        let mut bounds = Rectangle::default();
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                if self.contains(x, y) {
                    bounds = bounds.include(x, y);
                }
            }
        }
        bounds
    }

    /// Outline of the selected pixels: every pixel side that borders an
    /// unselected pixel.
    pub fn boundaries(&self) -> Vec<BoundarySegment> {
        let mut segments = Vec::new();
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                if !self.contains(x, y) {
                    continue;
                }
                if !self.contains(x, y - 1) {
                    segments.push(BoundarySegment {
                        from: Position::new(x, y),
                        to: Position::new(x + 1, y),
                    });
                }
                if !self.contains(x, y + 1) {
                    segments.push(BoundarySegment {
                        from: Position::new(x, y + 1),
                        to: Position::new(x + 1, y + 1),
                    });
                }
                if !self.contains(x - 1, y) {
                    segments.push(BoundarySegment {
                        from: Position::new(x, y),
                        to: Position::new(x, y + 1),
                    });
                }
                if !self.contains(x + 1, y) {
                    segments.push(BoundarySegment {
                        from: Position::new(x + 1, y),
                        to: Position::new(x + 1, y + 1),
                    });
                }
            }
        }
        segments
    }
}
