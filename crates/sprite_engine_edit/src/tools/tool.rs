use super::{Button, Controller, Ink, Intertwine, PointShape, TracePolicy};

/// Whether shapes drawn by a tool are filled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Fill {
    #[default]
    None,
    Always,
    /// Follows the `filled` tool preference
    Optional,
}

impl Fill {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "none" => Some(Fill::None),
            "always" => Some(Fill::Always),
            "optional" => Some(Fill::Optional),
            _ => None,
        }
    }

    pub fn is_filled(self, filled_preference: bool) -> bool {
        match self {
            Fill::None => false,
            Fill::Always => true,
            Fill::Optional => filled_preference,
        }
    }
}

/// The strategies a tool runs for one mouse button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ToolButton {
    pub fill: Fill,
    pub ink: Ink,
    pub controller: Controller,
    pub point_shape: PointShape,
    pub intertwine: Intertwine,
    pub trace_policy: TracePolicy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tool {
    pub(crate) id: String,
    pub(crate) text: String,
    pub(crate) tooltip: String,
    pub(crate) group: String,
    pub(crate) default_brush_size: i32,
    /// [left, right]
    pub(crate) buttons: [ToolButton; 2],
}

impl Tool {
    pub fn new(id: impl Into<String>, group: impl Into<String>, left: ToolButton, right: ToolButton) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            tooltip: String::new(),
            group: group.into(),
            default_brush_size: 1,
            buttons: [left, right],
        }
    }

    /// Tool running the same strategies for both buttons.
    pub fn with_button(id: impl Into<String>, button: ToolButton) -> Self {
        Self::new(id, "", button, button)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn default_brush_size(&self) -> i32 {
        self.default_brush_size
    }

    /// Strategies for `button`; everything but the right button uses the left set.
    pub fn button(&self, button: Button) -> &ToolButton {
        match button {
            Button::Right => &self.buttons[1],
            _ => &self.buttons[0],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolGroup {
    pub id: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_resolution() {
        assert_eq!(Fill::from_id("optional"), Some(Fill::Optional));
        assert_eq!(Fill::from_id("sometimes"), None);
        assert!(Fill::Optional.is_filled(true));
        assert!(!Fill::Optional.is_filled(false));
        assert!(Fill::Always.is_filled(false));
    }

    #[test]
    fn test_middle_button_uses_left_strategies() {
        let left = ToolButton {
            ink: Ink::Eraser(super::super::EraserMode::Eraser),
            ..Default::default()
        };
        let tool = Tool::new("eraser", "painting", left, ToolButton::default());
        assert_eq!(tool.button(Button::Middle), &left);
        assert_eq!(tool.button(Button::Right), &ToolButton::default());
    }
}
