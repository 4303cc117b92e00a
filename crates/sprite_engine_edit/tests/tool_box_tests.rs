use pretty_assertions::assert_eq;
use sprite_engine_edit::ToolError;
use sprite_engine_edit::tools::{Button, Controller, EraserMode, Fill, Ink, Intertwine, PointShape, ToolBox, TracePolicy};

const MINIMAL: &str = r#"
[[group]]
id = "painting"
text = "Painting Tools"

[[group.tool]]
id = "brush"
text = "Brush"
ink = "paint"
controller = "freehand"
pointshape = "brush"
intertwine = "as_lines"
tracepolicy = "accumulate"
default_brush_size = 3

[group.tool.right]
ink = "eraser"
"#;

#[test]
fn test_right_button_overrides_shared_keys() {
    let tool_box = ToolBox::from_toml(MINIMAL).unwrap();
    let tool = tool_box.get_tool("brush").unwrap();
    assert_eq!(tool.text(), "Brush");
    assert_eq!(tool.group(), "painting");
    assert_eq!(tool.default_brush_size(), 3);

    let left = tool.button(Button::Left);
    assert_eq!(left.ink, Ink::Paint(Default::default()));
    assert_eq!(left.point_shape, PointShape::Brush);

    let right = tool.button(Button::Right);
    assert_eq!(right.ink, Ink::Eraser(EraserMode::Eraser));
    assert_eq!(right.controller, Controller::Freehand);
    assert_eq!(right.intertwine, Intertwine::AsLines);
    assert_eq!(right.trace_policy, TracePolicy::Accumulate);
}

#[test]
fn test_optional_keys_use_defaults() {
    let text = r#"
[[group]]
id = "navigation"
text = "Navigation"

[[group.tool]]
id = "hand"
ink = "scroll"
controller = "freehand"
"#;
    let tool_box = ToolBox::from_toml(text).unwrap();
    let button = *tool_box.get_tool("hand").unwrap().button(Button::Left);
    assert_eq!(button.fill, Fill::None);
    assert_eq!(button.point_shape, PointShape::None);
    assert_eq!(button.intertwine, Intertwine::None);
    assert_eq!(button.trace_policy, TracePolicy::Last);
    assert_eq!(tool_box.groups().len(), 1);
    assert_eq!(tool_box.groups()[0].text, "Navigation");
}

#[test]
fn test_missing_ink_fails() {
    let text = r#"
[[group]]
id = "g"
text = "G"

[[group.tool]]
id = "broken"
controller = "freehand"
"#;
    match ToolBox::from_toml(text) {
        Err(ToolError::MissingAttribute { tool, attribute }) => {
            assert_eq!(tool, "broken");
            assert_eq!(attribute, "ink");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_unknown_ids_fail_the_load() {
    let with = |key: &str, value: &str| {
        let mut text = String::from("[[group]]\nid = \"g\"\ntext = \"G\"\n\n[[group.tool]]\nid = \"t\"\n");
        for (k, v) in [("ink", "paint"), ("controller", "freehand"), ("tracepolicy", "last")] {
            let v = if k == key { value } else { v };
            text.push_str(&format!("{k} = \"{v}\"\n"));
        }
        if key == "pointshape" {
            text.push_str(&format!("pointshape = \"{value}\"\n"));
        }
        ToolBox::from_toml(&text)
    };

    assert!(matches!(with("ink", "crayon"), Err(ToolError::InvalidInk { id, .. }) if id == "crayon"));
    assert!(matches!(with("controller", "three_points"), Err(ToolError::InvalidController { .. })));
    assert!(matches!(with("tracepolicy", "sometimes"), Err(ToolError::InvalidTracePolicy { .. })));
    assert!(matches!(with("pointshape", "star"), Err(ToolError::InvalidPointShape { tool, .. }) if tool == "t"));
}

#[test]
fn test_duplicate_tool_fails() {
    let text = r#"
[[group]]
id = "a"
text = "A"

[[group.tool]]
id = "pencil"
ink = "paint"
controller = "freehand"

[[group]]
id = "b"
text = "B"

[[group.tool]]
id = "pencil"
ink = "paint"
controller = "one_point"
"#;
    assert!(matches!(ToolBox::from_toml(text), Err(ToolError::DuplicateTool { id }) if id == "pencil"));
}

#[test]
fn test_malformed_toml_fails() {
    assert!(matches!(ToolBox::from_toml("[[group]\nid ="), Err(ToolError::Parse(_))));
}

#[test]
fn test_unknown_tool_lookup() {
    let tool_box = ToolBox::new().unwrap();
    assert!(tool_box.tool_by_id("airbrush").is_none());
    assert!(matches!(tool_box.get_tool("airbrush"), Err(ToolError::UnknownTool { .. })));
}

#[test]
fn test_default_tools_are_complete() {
    let tool_box = ToolBox::new().unwrap();
    for tool in tool_box.tools() {
        assert!(!tool.text().is_empty(), "tool '{}' has no text", tool.id());
        assert!(tool_box.groups().iter().any(|g| g.id == tool.group()));
    }

    let eyedropper = tool_box.get_tool("eyedropper").unwrap();
    assert_ne!(eyedropper.button(Button::Left).ink, eyedropper.button(Button::Right).ink);
    assert_eq!(tool_box.get_tool("rectangle").unwrap().button(Button::Left).fill, Fill::Optional);
}
