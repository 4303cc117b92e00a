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
pub mod tools;

mod error;
pub use error::{Result, ToolError};

// Re-export the engine types the pipeline works on
pub use sprite_engine::{
    BlendFormula, Brush, BrushPattern, BrushType, Cel, Color, Document, EditCanvas, EngineError, ExpandCelCanvas, Image, Layer, Mask, Position,
    PreviewCanvas, Rectangle, Region, Size, UndoState,
};
