use sprite_engine::Position;

use super::StrokePoint;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Button {
    #[default]
    None,
    Left,
    Middle,
    Right,
}

/// A pointer sample already converted to sprite coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pointer {
    pub pos: Position,
    pub button: Button,
    pub pressure: f32,
}

impl Pointer {
    pub fn new(x: i32, y: i32, button: Button) -> Self {
        Self {
            pos: Position::new(x, y),
            button,
            pressure: 1.0,
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = pressure.clamp(0.0, 1.0);
        self
    }

    pub fn point(&self) -> StrokePoint {
        StrokePoint {
            pos: self.pos,
            pressure: self.pressure,
        }
    }
}
