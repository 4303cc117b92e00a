//! Shared helpers for tool pipeline tests

#![allow(dead_code)]

use sprite_engine_edit::tools::{
    Button, Controller, Fill, Ink, Intertwine, PaintMode, Pointer, PointShape, Tool, ToolButton, ToolLoopManager, TracePolicy,
};
use sprite_engine_edit::{Cel, Color, Document, Image, Layer, Position};

pub const RED: Color = Color::rgb(255, 0, 0);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tool painting single pixels with the simple paint ink.
pub fn pixel_tool(controller: Controller, intertwine: Intertwine, trace_policy: TracePolicy, fill: Fill) -> Tool {
    Tool::with_button(
        "test_tool",
        ToolButton {
            fill,
            ink: Ink::Paint(PaintMode::Simple),
            controller,
            point_shape: PointShape::Pixel,
            intertwine,
            trace_policy,
        },
    )
}

pub fn tool_with(button: ToolButton) -> Tool {
    Tool::with_button("test_tool", button)
}

/// Sprite with one empty layer.
pub fn empty_document(width: i32, height: i32) -> Document {
    let mut doc = Document::new(width, height);
    doc.add_layer(Layer::new("Layer 1"));
    doc
}

/// Sprite with one layer whose cel covers the whole sprite.
pub fn filled_document(width: i32, height: i32, color: Color) -> Document {
    let mut doc = Document::new(width, height);
    doc.add_layer(Layer::new("Layer 1").with_cel(0, Cel::new(Position::new(0, 0), Image::filled(width, height, color))));
    doc
}

pub fn left(x: i32, y: i32) -> Pointer {
    Pointer::new(x, y, Button::Left)
}

/// Press at the first point, move through the rest and release at the last.
pub fn drag(manager: &mut ToolLoopManager<'_>, points: &[(i32, i32)]) -> bool {
    let Some(&(x, y)) = points.first() else {
        return false;
    };
    manager.prepare_loop(&left(x, y));
    manager.press_button(&left(x, y));
    for &(x, y) in &points[1..] {
        manager.movement(&left(x, y));
    }
    let (x, y) = points[points.len() - 1];
    manager.release_button(&left(x, y))
}

/// Coordinates of every pixel equal to `color`, in row order.
pub fn pixels_of(image: &Image, color: Color) -> Vec<(i32, i32)> {
    let mut result = Vec::new();
    for y in 0..image.height() {
        for x in 0..image.width() {
            if image.get_pixel(x, y) == color {
                result.push((x, y));
            }
        }
    }
    result
}
