//! User preferences read by the tool pipeline at gesture start.
//!
//! All structs can be stored in TOML; missing keys take their defaults so
//! older preference files keep loading.

use serde::{Deserialize, Serialize};
use sprite_engine::{BlendFormula, Rectangle};

use crate::Result;

/// How freehand tools connect the samples of a stroke.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreehandAlgorithm {
    #[default]
    Regular,
    PixelPerfect,
    Dots,
}

/// Paint ink variant selected in the context bar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InkType {
    #[default]
    Simple,
    AlphaCompositing,
    CopyColor,
    LockAlpha,
    Shading,
}

impl InkType {
    /// Ink types that honor the opacity setting.
    pub fn has_opacity(self) -> bool {
        matches!(self, InkType::AlphaCompositing | InkType::LockAlpha)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloodFillReferTo {
    #[default]
    ActiveLayer,
    AllLayers,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymmetryMode {
    #[default]
    None,
    /// Mirror across a vertical line at `x_axis`
    Horizontal,
    /// Mirror across a horizontal line at `y_axis`
    Vertical,
    Both,
}

/// Per-tool settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPreferences {
    pub opacity: u8,
    pub tolerance: u8,
    pub contiguous: bool,
    pub filled: bool,
    pub filled_preview: bool,
    pub spray_width: i32,
    pub spray_speed: i32,
    pub freehand_algorithm: FreehandAlgorithm,
    pub ink_type: InkType,
    pub blend_formula: BlendFormula,
    pub flood_fill_refer_to: FloodFillReferTo,
    pub stop_at_grid: bool,
}

impl Default for ToolPreferences {
    fn default() -> Self {
        Self {
            opacity: 255,
            tolerance: 0,
            contiguous: true,
            filled: false,
            filled_preview: false,
            spray_width: 16,
            spray_speed: 32,
            freehand_algorithm: FreehandAlgorithm::Regular,
            ink_type: InkType::Simple,
            blend_formula: BlendFormula::Normal,
            flood_fill_refer_to: FloodFillReferTo::ActiveLayer,
            stop_at_grid: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymmetryPreferences {
    pub mode: SymmetryMode,
    pub x_axis: i32,
    pub y_axis: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Origin and cell size of the grid
    pub bounds: Rectangle,
    pub snap: bool,
    pub visible: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            bounds: Rectangle::from(0, 0, 16, 16),
            snap: false,
            visible: false,
        }
    }
}

impl GridSettings {
    /// Grid cell containing (x, y).
    pub fn cell_at(&self, x: i32, y: i32) -> Rectangle {
        let w = self.bounds.width().max(1);
        let h = self.bounds.height().max(1);
        let cx = (x - self.bounds.left()).div_euclid(w);
        let cy = (y - self.bounds.top()).div_euclid(h);
        Rectangle::from(self.bounds.left() + cx * w, self.bounds.top() + cy * h, w, h)
    }

    /// Closest grid vertex to (x, y).
    pub fn snap_point(&self, x: i32, y: i32) -> (i32, i32) {
        let w = self.bounds.width().max(1);
        let h = self.bounds.height().max(1);
        let snap = |v: i32, origin: i32, step: i32| {
            let rel = v - origin;
            let lower = rel.div_euclid(step) * step;
            if rel - lower >= step - (rel - lower) {
                origin + lower + step
            } else {
                origin + lower
            }
        };
        (snap(x, self.bounds.left(), w), snap(y, self.bounds.top(), h))
    }
}

macro_rules! impl_from_toml {
    ($($t:ty),*) => {
        $(impl $t {
            /// # Errors
            ///
            /// Returns `ToolError::Parse` when the text is not valid TOML for this type.
            pub fn from_toml(text: &str) -> Result<Self> {
                Ok(toml::from_str(text)?)
            }
        })*
    };
}

impl_from_toml!(ToolPreferences, SymmetryPreferences, GridSettings);

bitflags::bitflags! {
    /// Keyboard modifiers that change how a gesture is interpreted.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ToolLoopModifiers: u32 {
        const REPLACE_SELECTION  = 1 << 0;
        const ADD_SELECTION      = 1 << 1;
        const SUBTRACT_SELECTION = 1 << 2;
        /// Lines snap to 0/45/90 degrees, boxes become squares
        const SQUARE_ASPECT      = 1 << 3;
        /// Two-point shapes grow from the first point
        const FROM_CENTER        = 1 << 4;
    }
}
