use std::ops::{Index, IndexMut};

use sprite_engine::{Position, Rectangle};

/// A recorded input sample in sprite coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrokePoint {
    pub pos: Position,
    /// 0.0..=1.0
    pub pressure: f32,
}

impl StrokePoint {
    pub fn new(x: i32, y: i32, pressure: f32) -> Self {
        Self {
            pos: Position::new(x, y),
            pressure: pressure.clamp(0.0, 1.0),
        }
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn y(&self) -> i32 {
        self.pos.y
    }
}

impl From<Position> for StrokePoint {
    fn from(pos: Position) -> Self {
        Self { pos, pressure: 1.0 }
    }
}

impl From<(i32, i32)> for StrokePoint {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1, 1.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    points: Vec<StrokePoint>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = impl Into<StrokePoint>>) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StrokePoint> {
        self.points.iter()
    }

    pub fn first_point(&self) -> Option<StrokePoint> {
        self.points.first().copied()
    }

    pub fn last_point(&self) -> Option<StrokePoint> {
        self.points.last().copied()
    }

    pub fn add_point(&mut self, point: impl Into<StrokePoint>) {
        self.points.push(point.into());
    }

    pub fn pop(&mut self) -> Option<StrokePoint> {
        self.points.pop()
    }

    pub fn reset(&mut self) {
        self.points.clear();
    }

    /// Replaces the stroke with `n` copies of `point`.
    pub fn reset_with(&mut self, n: usize, point: impl Into<StrokePoint>) {
        let point = point.into();
        self.points.clear();
        self.points.resize(n, point);
    }

    pub fn offset(&mut self, delta: Position) {
        for pt in &mut self.points {
            pt.pos += delta;
        }
    }

    /// Smallest rectangle containing every point.
    pub fn bounds(&self) -> Rectangle {
        let mut iter = self.points.iter();
        let Some(first) = iter.next() else {
            return Rectangle::default();
        };
        let (min, max) = iter.fold((first.pos, first.pos), |(min, max), pt| (min.min(pt.pos), max.max(pt.pos)));
        Rectangle::from_pt(min, max)
    }
}

impl Index<usize> for Stroke {
    type Output = StrokePoint;

    fn index(&self, index: usize) -> &StrokePoint {
        &self.points[index]
    }
}

impl IndexMut<usize> for Stroke {
    fn index_mut(&mut self, index: usize) -> &mut StrokePoint {
        &mut self.points[index]
    }
}

impl<'a> IntoIterator for &'a Stroke {
    type Item = &'a StrokePoint;
    type IntoIter = std::slice::Iter<'a, StrokePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_with_repeats_point() {
        let mut stroke = Stroke::from_points([(1, 1), (2, 2)]);
        stroke.reset_with(4, (5, 6));
        assert_eq!(stroke.len(), 4);
        assert!(stroke.iter().all(|p| p.pos == Position::new(5, 6)));
    }

    #[test]
    fn test_bounds_and_offset() {
        let mut stroke = Stroke::from_points([(10, 10), (20, 5)]);
        assert_eq!(stroke.bounds(), Rectangle::from(10, 5, 11, 6));
        stroke.offset(Position::new(-10, 0));
        assert_eq!(stroke.first_point().map(|p| p.pos), Some(Position::new(0, 10)));
        assert_eq!(Stroke::new().bounds(), Rectangle::default());
    }
}
