//! Registry of strategies and the tools composed from them.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::{Controller, Fill, Ink, Intertwine, PointShape, Tool, ToolButton, ToolGroup, TracePolicy};
use crate::{Result, ToolError};

static INKS: Lazy<HashMap<&'static str, Ink>> = Lazy::new(|| Ink::ALL.iter().map(|i| (i.id(), *i)).collect());
static CONTROLLERS: Lazy<HashMap<&'static str, Controller>> = Lazy::new(|| Controller::ALL.iter().map(|c| (c.id(), *c)).collect());
static POINT_SHAPES: Lazy<HashMap<&'static str, PointShape>> = Lazy::new(|| PointShape::ALL.iter().map(|p| (p.id(), *p)).collect());
static INTERTWINERS: Lazy<HashMap<&'static str, Intertwine>> = Lazy::new(|| Intertwine::ALL.iter().map(|i| (i.id(), *i)).collect());

const DEFAULT_TOOLS: &str = include_str!("../../data/tools.toml");

pub mod well_known {
    pub const RECTANGULAR_MARQUEE: &str = "rectangular_marquee";
    pub const PENCIL: &str = "pencil";
    pub const ERASER: &str = "eraser";
    pub const EYEDROPPER: &str = "eyedropper";
    pub const HAND: &str = "hand";
}

#[derive(Deserialize)]
struct ToolsFile {
    #[serde(default)]
    group: Vec<GroupDef>,
}

#[derive(Deserialize)]
struct GroupDef {
    id: String,
    text: String,
    #[serde(default)]
    tool: Vec<ToolDef>,
}

#[derive(Deserialize)]
struct ToolDef {
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    tooltip: String,
    default_brush_size: Option<i32>,
    #[serde(flatten)]
    shared: ButtonDef,
    left: Option<ButtonDef>,
    right: Option<ButtonDef>,
}

#[derive(Clone, Default, Deserialize)]
struct ButtonDef {
    fill: Option<String>,
    ink: Option<String>,
    controller: Option<String>,
    pointshape: Option<String>,
    intertwine: Option<String>,
    tracepolicy: Option<String>,
}

impl ButtonDef {
    /// Keys of `self` with the missing ones taken from `shared`.
    fn or(&self, shared: &ButtonDef) -> ButtonDef {
        ButtonDef {
            fill: self.fill.clone().or_else(|| shared.fill.clone()),
            ink: self.ink.clone().or_else(|| shared.ink.clone()),
            controller: self.controller.clone().or_else(|| shared.controller.clone()),
            pointshape: self.pointshape.clone().or_else(|| shared.pointshape.clone()),
            intertwine: self.intertwine.clone().or_else(|| shared.intertwine.clone()),
            tracepolicy: self.tracepolicy.clone().or_else(|| shared.tracepolicy.clone()),
        }
    }

    fn resolve(&self, tool: &str) -> Result<ToolButton> {
        let invalid = |id: &str| (tool.to_string(), id.to_string());

        let fill = match &self.fill {
            Some(id) => Fill::from_id(id).ok_or_else(|| {
                let (tool, id) = invalid(id);
                ToolError::InvalidFill { tool, id }
            })?,
            None => Fill::None,
        };
        let ink_id = self.ink.as_deref().ok_or_else(|| ToolError::MissingAttribute {
            tool: tool.to_string(),
            attribute: "ink",
        })?;
        let ink = ToolBox::ink_by_id(ink_id).ok_or_else(|| {
            let (tool, id) = invalid(ink_id);
            ToolError::InvalidInk { tool, id }
        })?;
        let controller_id = self.controller.as_deref().ok_or_else(|| ToolError::MissingAttribute {
            tool: tool.to_string(),
            attribute: "controller",
        })?;
        let controller = ToolBox::controller_by_id(controller_id).ok_or_else(|| {
            let (tool, id) = invalid(controller_id);
            ToolError::InvalidController { tool, id }
        })?;
        let point_shape_id = self.pointshape.as_deref().unwrap_or("none");
        let point_shape = ToolBox::point_shape_by_id(point_shape_id).ok_or_else(|| {
            let (tool, id) = invalid(point_shape_id);
            ToolError::InvalidPointShape { tool, id }
        })?;
        let intertwine_id = self.intertwine.as_deref().unwrap_or("none");
        let intertwine = ToolBox::intertwiner_by_id(intertwine_id).ok_or_else(|| {
            let (tool, id) = invalid(intertwine_id);
            ToolError::InvalidIntertwine { tool, id }
        })?;
        let trace_policy = match &self.tracepolicy {
            Some(id) => TracePolicy::from_id(id).ok_or_else(|| {
                let (tool, id) = invalid(id);
                ToolError::InvalidTracePolicy { tool, id }
            })?,
            None => TracePolicy::Last,
        };

        Ok(ToolButton {
            fill,
            ink,
            controller,
            point_shape,
            intertwine,
            trace_policy,
        })
    }
}

/// Tools grouped as they appear in the tool bar.
#[derive(Clone, Debug, Default)]
pub struct ToolBox {
    groups: Vec<ToolGroup>,
    tools: Vec<Tool>,
}

impl ToolBox {
    /// Loads the built-in tool set.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded definitions are broken.
    pub fn new() -> Result<Self> {
        Self::from_toml(DEFAULT_TOOLS)
    }

    /// Loads tool definitions. Any unknown strategy id fails the whole load.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed TOML, `MissingAttribute` when a button has no
    /// ink or controller, one of the `Invalid*` errors for an unknown id and
    /// `DuplicateTool` when two tools share an id.
    pub fn from_toml(text: &str) -> Result<Self> {
        log::info!("Tool box: installing");
        let file: ToolsFile = toml::from_str(text)?;

        let mut tool_box = ToolBox::default();
        for group in file.group {
            log::debug!("New group '{}'", group.id);
            for def in group.tool {
                if tool_box.tool_by_id(&def.id).is_some() {
                    return Err(ToolError::DuplicateTool { id: def.id });
                }
                let left = def.left.as_ref().unwrap_or(&ButtonDef::default()).or(&def.shared).resolve(&def.id)?;
                let right = def.right.as_ref().unwrap_or(&ButtonDef::default()).or(&def.shared).resolve(&def.id)?;
                log::debug!("New tool '{}' in group '{}'", def.id, group.id);
                tool_box.tools.push(Tool {
                    id: def.id,
                    text: def.text,
                    tooltip: def.tooltip,
                    group: group.id.clone(),
                    default_brush_size: def.default_brush_size.unwrap_or(1),
                    buttons: [left, right],
                });
            }
            tool_box.groups.push(ToolGroup { id: group.id, text: group.text });
        }
        log::info!("Tool box: installed {} tools in {} groups", tool_box.tools.len(), tool_box.groups.len());
        Ok(tool_box)
    }

    pub fn groups(&self) -> &[ToolGroup] {
        &self.groups
    }

    pub fn tools(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    pub fn tool_by_id(&self, id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// # Errors
    ///
    /// `UnknownTool` when no tool has this id.
    pub fn get_tool(&self, id: &str) -> Result<&Tool> {
        self.tool_by_id(id).ok_or_else(|| ToolError::UnknownTool { id: id.to_string() })
    }

    pub fn ink_by_id(id: &str) -> Option<Ink> {
        INKS.get(id).copied()
    }

    pub fn controller_by_id(id: &str) -> Option<Controller> {
        CONTROLLERS.get(id).copied()
    }

    pub fn point_shape_by_id(id: &str) -> Option<PointShape> {
        POINT_SHAPES.get(id).copied()
    }

    pub fn intertwiner_by_id(id: &str) -> Option<Intertwine> {
        INTERTWINERS.get(id).copied()
    }
}
