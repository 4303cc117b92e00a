//! Point shapes decide which pixels a single stroke point covers.

use std::f64::consts::TAU;

use sprite_engine::{Position, Rectangle};

use super::{ToolLoop, algo};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointShape {
    #[default]
    None,
    Pixel,
    /// Stamps the active brush centered on the point
    Brush,
    /// Fills the area of similar color under the point
    FloodFill,
    /// Scatters brush stamps around the point
    Spray,
}

impl PointShape {
    pub const ALL: [PointShape; 5] = [
        PointShape::None,
        PointShape::Pixel,
        PointShape::Brush,
        PointShape::FloodFill,
        PointShape::Spray,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PointShape::None => "none",
            PointShape::Pixel => "pixel",
            PointShape::Brush => "brush",
            PointShape::FloodFill => "floodfill",
            PointShape::Spray => "spray",
        }
    }

    pub fn is_flood_fill(self) -> bool {
        self == PointShape::FloodFill
    }

    pub fn is_spray(self) -> bool {
        self == PointShape::Spray
    }

    /// Cheap shape used while previewing under the cursor.
    pub fn preview_substitute(self) -> PointShape {
        match self {
            PointShape::Spray => PointShape::Brush,
            PointShape::FloodFill => PointShape::Pixel,
            shape => shape,
        }
    }

    /// Whether the stamp size follows the brush.
    pub fn uses_brush(self) -> bool {
        matches!(self, PointShape::Brush | PointShape::Spray)
    }

    pub fn transform_point(self, tool_loop: &mut ToolLoop<'_>, x: i32, y: i32, _pressure: f32) {
        match self {
            PointShape::None => {}
            PointShape::Pixel => tool_loop.ink_hline(x, y, x),
            PointShape::Brush => stamp_brush(tool_loop, x, y),
            PointShape::FloodFill => flood_fill(tool_loop, x, y),
            PointShape::Spray => spray(tool_loop, x, y),
        }
    }

    pub fn transform_hline(self, tool_loop: &mut ToolLoop<'_>, x1: i32, y: i32, x2: i32, pressure: f32) {
        match self {
            PointShape::None => {}
            PointShape::Pixel => tool_loop.ink_hline(x1, y, x2),
            _ => {
                for x in x1..=x2 {
                    self.transform_point(tool_loop, x, y, pressure);
                }
            }
        }
    }

    /// Pixels a point at (x, y) may touch.
    pub fn modified_area(self, tool_loop: &ToolLoop<'_>, x: i32, y: i32) -> Rectangle {
        match self {
            PointShape::None => Rectangle::from(x, y, 0, 0),
            PointShape::Pixel => Rectangle::from(x, y, 1, 1),
            PointShape::Brush => tool_loop.brush().bounds().offset(Position::new(x, y)),
            PointShape::FloodFill => tool_loop.doc_bounds(),
            PointShape::Spray => {
                let reach = tool_loop.preferences().spray_width.max(1) + tool_loop.brush().size() / 2;
                Rectangle::from(x - reach, y - reach, 2 * reach + 1, 2 * reach + 1)
            }
        }
    }
}

fn stamp_brush(tool_loop: &mut ToolLoop<'_>, x: i32, y: i32) {
    let brush = tool_loop.brush();
    let bounds = brush.bounds();
    let origin = Position::new(x, y) + bounds.start;
    tool_loop.set_stamp_center(Position::new(x, y));

    for row in 0..bounds.height() {
        let mut run = None;
        for col in 0..=bounds.width() {
            match (col < bounds.width() && brush.mask_contains(col, row), run) {
                (true, None) => run = Some(col),
                (false, Some(start)) => {
                    tool_loop.ink_hline(origin.x + start, origin.y + row, origin.x + col - 1);
                    run = None;
                }
                _ => {}
            }
        }
    }
}

fn flood_fill(tool_loop: &mut ToolLoop<'_>, x: i32, y: i32) {
    let prefs = tool_loop.preferences().clone();
    let mut bounds = tool_loop.doc_bounds();
    if prefs.stop_at_grid && tool_loop.grid().visible {
        bounds = bounds.intersect(&tool_loop.grid().cell_at(x, y));
    }

    let mut spans = Vec::new();
    {
        let image = tool_loop.flood_reference();
        let bounds = bounds.intersect(&image.bounds());
        if !bounds.contains(x, y) {
            return;
        }
        let seed = image.get_pixel(x, y);
        let is_inside = |px: i32, py: i32| image.get_pixel(px, py).matches(seed, prefs.tolerance);
        let collect = |x1: i32, y: i32, x2: i32| spans.push((x1, y, x2));
        if prefs.contiguous {
            algo::flood_fill(bounds, Position::new(x, y), is_inside, collect);
        } else {
            algo::replace_matching(bounds, is_inside, collect);
        }
    }
    for (x1, y, x2) in spans {
        tool_loop.ink_hline(x1, y, x2);
    }
}

fn spray(tool_loop: &mut ToolLoop<'_>, x: i32, y: i32) {
    let width = tool_loop.preferences().spray_width.max(1) as f64;
    let speed = tool_loop.preferences().spray_speed.max(0);
    for _ in 0..speed {
        let angle = tool_loop.rng().f64() * TAU;
        let radius = tool_loop.rng().f64() * width;
        let px = x + (radius * angle.cos()).round() as i32;
        let py = y + (radius * angle.sin()).round() as i32;
        stamp_brush(tool_loop, px, py);
    }
}
