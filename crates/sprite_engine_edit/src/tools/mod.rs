//! Drawing tool pipeline
//!
//! Turns pointer input into pixel edits. A tool is a combination of
//! independent strategies, one per role:
//! - [`Controller`]: pointer events to stroke points
//! - [`Intertwine`]: stroke points to point shape calls
//! - [`PointShape`]: a point to the pixels it covers
//! - [`Ink`]: the color written to each pixel
//! - [`TracePolicy`]: how successive samples of a gesture combine
//!
//! A [`ToolLoop`] holds the strategies and state of one gesture and a
//! [`ToolLoopManager`] drives it from pointer events.
//!
//! # Example
//! ```ignore
//! use sprite_engine_edit::tools::*;
//!
//! let tool_box = ToolBox::new()?;
//! let ctx = EditorContext::new(tool_box.get_tool("pencil")?, &brush);
//! let mut manager = ToolLoopManager::new(create_tool_loop(&ctx, &mut doc)?);
//! let pointer = Pointer::new(0, 0, Button::Left);
//! manager.prepare_loop(&pointer);
//! manager.press_button(&pointer);
//! manager.movement(&Pointer::new(5, 3, Button::Left));
//! manager.release_button(&Pointer::new(5, 3, Button::Left));
//! let result = manager.dispose();
//! ```

pub mod algo;
mod controller;
mod ink;
mod intertwine;
mod point_shape;
mod pointer;
mod preferences;
mod stroke;
mod symmetry;
mod tool;
mod tool_box;
mod tool_loop;
mod tool_loop_manager;
mod trace_policy;

pub use controller::{Controller, ControllerState};
pub use ink::{EraserMode, Ink, InkColors, PaintMode, PickTarget, blur_pixel, shade_remap};
pub use intertwine::{Intertwine, IntertwineState, StrokeSink, line_with_pressure};
pub use point_shape::PointShape;
pub use pointer::{Button, Pointer};
pub use preferences::{FloodFillReferTo, FreehandAlgorithm, GridSettings, InkType, SymmetryMode, SymmetryPreferences, ToolLoopModifiers, ToolPreferences};
pub use stroke::{Stroke, StrokePoint};
pub use symmetry::Symmetry;
pub use tool::{Fill, Tool, ToolButton, ToolGroup};
pub use tool_box::{ToolBox, well_known};
pub use tool_loop::{DisposeResult, EditorContext, GestureOutcome, ToolLoop, create_tool_loop, create_tool_loop_preview};
pub use tool_loop_manager::ToolLoopManager;
pub use trace_policy::{TracePolicy, resolve_freehand};
