use crate::{Position, Rectangle};

/// A set of pixels described as a list of rectangles.
///
/// Rectangles may overlap; adding a rectangle already covered by the
/// region is a no-op and covered rectangles are dropped when a larger one
/// arrives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    rects: Vec<Rectangle>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rect(rect: Rectangle) -> Self {
        let mut region = Self::new();
        region.add_rect(rect);
        region
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn rects(&self) -> &[Rectangle] {
        &self.rects
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn add_rect(&mut self, rect: Rectangle) {
        if rect.is_empty() || self.rects.iter().any(|r| r.contains_rect(&rect)) {
            return;
        }
        self.rects.retain(|r| !rect.contains_rect(r));
        self.rects.push(rect);
    }

    pub fn union(&mut self, other: &Region) {
        for r in &other.rects {
            self.add_rect(*r);
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.rects.iter().fold(Rectangle::default(), |acc, r| acc.union(r))
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rects.iter().any(|r| r.contains(x, y))
    }

    pub fn intersect_rect(&self, clip: &Rectangle) -> Region {
        let mut result = Region::new();
        for r in &self.rects {
            result.add_rect(r.intersect(clip));
        }
        result
    }

    pub fn offset(&mut self, delta: Position) {
        for r in &mut self.rects {
            *r = r.offset(delta);
        }
    }
}

impl From<Rectangle> for Region {
    fn from(rect: Rectangle) -> Self {
        Region::from_rect(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_rect_drops_covered() {
        let mut region = Region::new();
        region.add_rect(Rectangle::from(2, 2, 2, 2));
        region.add_rect(Rectangle::from(0, 0, 10, 10));
        region.add_rect(Rectangle::from(5, 5, 1, 1));
        assert_eq!(region.rects(), &[Rectangle::from(0, 0, 10, 10)]);
    }

    #[test]
    fn test_bounds_and_clip() {
        let mut region = Region::from_rect(Rectangle::from(-5, 0, 10, 1));
        region.add_rect(Rectangle::from(20, 20, 2, 2));
        assert_eq!(region.bounds(), Rectangle::from(-5, 0, 27, 22));
        let clipped = region.intersect_rect(&Rectangle::from(0, 0, 8, 8));
        assert_eq!(clipped.rects(), &[Rectangle::from(0, 0, 5, 1)]);
        assert!(region.contains(21, 21));
        assert!(!region.contains(10, 10));
    }
}
