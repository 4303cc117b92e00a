#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::too_many_lines,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions
)]
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

mod position;
pub use position::*;

mod region;
pub use region::*;

mod color;
pub use color::*;

mod image;
pub use image::*;

mod mask;
pub use mask::*;

mod brush;
pub use brush::*;

mod document;
pub use document::*;

mod undo;
pub use undo::*;

mod canvas;
pub use canvas::*;

pub mod error;
pub use error::{EngineError, Result};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(width: {}, height: {})", self.width, self.height)
    }
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }
}

impl From<(i32, i32)> for Size {
    fn from(value: (i32, i32)) -> Self {
        Size::new(value.0, value.1)
    }
}

impl From<Position> for Size {
    fn from(value: Position) -> Self {
        Size::new(value.x, value.y)
    }
}

impl Add<Size> for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub<Size> for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.width - rhs.width, self.height - rhs.height)
    }
}

/// Pixel rectangle. `size` counts pixels, so `bottom_right()` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub start: Position,
    pub size: Size,
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(x:{}, y:{}, width: {}, height: {})",
            self.start.x, self.start.y, self.size.width, self.size.height
        )
    }
}

impl Rectangle {
    pub fn new(start: Position, size: Size) -> Self {
        Self { start, size }
    }

    pub fn from(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            start: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Rectangle spanning two inclusive corners given in any order.
    pub fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Rectangle {
            start: Position::new(x1.min(x2), y1.min(y2)),
            size: Size::new((x2 - x1).abs() + 1, (y2 - y1).abs() + 1),
        }
    }

    pub fn from_pt(p1: Position, p2: Position) -> Self {
        Self::from_coords(p1.x, p1.y, p2.x, p2.y)
    }

    pub fn top_left(&self) -> Position {
        self.start
    }

    /// One past the last pixel on both axes.
    pub fn bottom_right(&self) -> Position {
        Position {
            x: self.start.x + self.size.width,
            y: self.start.y + self.size.height,
        }
    }

    pub fn left(&self) -> i32 {
        self.start.x
    }

    pub fn top(&self) -> i32 {
        self.start.y
    }

    /// Last pixel column (inclusive).
    pub fn right(&self) -> i32 {
        self.start.x + self.size.width - 1
    }

    /// Last pixel row (inclusive).
    pub fn bottom(&self) -> i32 {
        self.start.y + self.size.height - 1
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.start.x <= x && x < self.start.x + self.size.width && self.start.y <= y && y < self.start.y + self.size.height
    }

    pub fn contains_pt(&self, point: Position) -> bool {
        self.contains(point.x, point.y)
    }

    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        if other.is_empty() {
            return true;
        }
        self.start.x <= other.start.x
            && self.start.y <= other.start.y
            && other.bottom_right().x <= self.bottom_right().x
            && other.bottom_right().y <= self.bottom_right().y
    }

    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        let min = self.start.max(other.start);
        let max = self.bottom_right().min(other.bottom_right());
        if max.x <= min.x || max.y <= min.y {
            return Rectangle::default();
        }
        Rectangle {
            start: min,
            size: (max - min).into(),
        }
    }

    pub fn union(&self, other: &Rectangle) -> Rectangle {
        if self.is_empty() {
            return *other;
        }

        if other.is_empty() {
            return *self;
        }

        let min = self.start.min(other.start);
        let max = self.bottom_right().max(other.bottom_right());
        Rectangle {
            start: min,
            size: (max - min).into(),
        }
    }

    /// Grows the rectangle to include the pixel at (x, y).
    pub fn include(&self, x: i32, y: i32) -> Rectangle {
        self.union(&Rectangle::from(x, y, 1, 1))
    }

    pub fn offset(&self, delta: Position) -> Rectangle {
        Rectangle {
            start: self.start + delta,
            size: self.size,
        }
    }

    pub fn y_range(&self) -> std::ops::Range<i32> {
        self.start.y..self.bottom_right().y
    }

    pub fn x_range(&self) -> std::ops::Range<i32> {
        self.start.x..self.bottom_right().x
    }
}
