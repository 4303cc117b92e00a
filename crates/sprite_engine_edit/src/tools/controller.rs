//! Controllers turn pointer events into the points of a stroke.

use sprite_engine::{Position, Rectangle};

use super::{Pointer, Stroke, StrokePoint, ToolLoopModifiers};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Controller {
    /// Every movement sample is appended
    #[default]
    Freehand,
    /// Each click adds a vertex, a click without drag ends the gesture
    PointByPoint,
    /// A single point, taken on press
    OnePoint,
    /// Rubber band from the press position to the pointer
    TwoPoints,
    /// Four control points placed with successive clicks
    FourPoints,
}

/// Mutable controller data of one gesture.
#[derive(Clone, Debug, Default)]
pub struct ControllerState {
    first: Option<StrokePoint>,
    click_counter: u32,
}

impl ControllerState {
    pub fn click_counter(&self) -> u32 {
        self.click_counter
    }
}

impl Controller {
    pub const ALL: [Controller; 5] = [
        Controller::Freehand,
        Controller::PointByPoint,
        Controller::OnePoint,
        Controller::TwoPoints,
        Controller::FourPoints,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Controller::Freehand => "freehand",
            Controller::PointByPoint => "point_by_point",
            Controller::OnePoint => "one_point",
            Controller::TwoPoints => "two_points",
            Controller::FourPoints => "four_points",
        }
    }

    pub fn is_freehand(self) -> bool {
        self == Controller::Freehand
    }

    pub fn is_one_point(self) -> bool {
        self == Controller::OnePoint
    }

    pub fn can_snap_to_grid(self) -> bool {
        !self.is_freehand()
    }

    /// Leaves `stroke` non-empty.
    pub fn press_button(self, state: &mut ControllerState, stroke: &mut Stroke, pointer: &Pointer) {
        let pt = pointer.point();
        match self {
            Controller::Freehand => stroke.add_point(pt),
            Controller::OnePoint => {
                if stroke.is_empty() {
                    stroke.add_point(pt);
                }
            }
            Controller::TwoPoints => {
                stroke.reset_with(2, pt);
                state.first = Some(pt);
            }
            Controller::FourPoints => {
                if stroke.is_empty() {
                    stroke.reset_with(4, pt);
                    state.click_counter = 0;
                } else {
                    state.click_counter += 1;
                }
            }
            Controller::PointByPoint => {
                if stroke.is_empty() {
                    stroke.add_point(pt);
                }
                stroke.add_point(pt);
            }
        }
    }

    /// Returns true when the gesture is complete.
    pub fn release_button(self, state: &mut ControllerState, stroke: &mut Stroke, pointer: &Pointer) -> bool {
        match self {
            Controller::Freehand | Controller::OnePoint | Controller::TwoPoints => true,
            Controller::FourPoints => {
                state.click_counter += 1;
                state.click_counter >= 4
            }
            Controller::PointByPoint => {
                let len = stroke.len();
                if len >= 2 && stroke[len - 2].pos == pointer.pos && stroke[len - 1].pos == pointer.pos {
                    // click without drag on the last vertex
                    stroke.pop();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// `snap_by_angle` comes from the intertwiner and picks between angle
    /// snapping and square boxes for the square-aspect modifier.
    pub fn movement(
        self,
        state: &mut ControllerState,
        stroke: &mut Stroke,
        pointer: &Pointer,
        modifiers: ToolLoopModifiers,
        snap_by_angle: bool,
    ) {
        let pt = pointer.point();
        match self {
            Controller::Freehand => stroke.add_point(pt),
            Controller::OnePoint => {}
            Controller::TwoPoints => {
                if stroke.len() < 2 {
                    return;
                }
                let first = state.first.unwrap_or(stroke[0]);
                let mut end = pt;
                if modifiers.contains(ToolLoopModifiers::SQUARE_ASPECT) {
                    end.pos = if snap_by_angle {
                        snap_to_angle(first.pos, end.pos)
                    } else {
                        snap_to_square(first.pos, end.pos)
                    };
                }
                stroke[1] = end;
                stroke[0] = if modifiers.contains(ToolLoopModifiers::FROM_CENTER) {
                    StrokePoint {
                        pos: first.pos - (end.pos - first.pos),
                        pressure: first.pressure,
                    }
                } else {
                    first
                };
            }
            Controller::FourPoints => {
                if stroke.len() < 4 {
                    return;
                }
                match state.click_counter {
                    0 => {
                        for i in 1..stroke.len() {
                            stroke[i] = pt;
                        }
                    }
                    1 | 2 => {
                        stroke[1] = pt;
                        stroke[2] = pt;
                    }
                    3 => stroke[2] = pt,
                    _ => {}
                }
            }
            Controller::PointByPoint => {
                let last = stroke.len().saturating_sub(1);
                if !stroke.is_empty() {
                    stroke[last] = pt;
                }
            }
        }
    }

    /// Points the intertwiner should draw for the current sample.
    ///
    /// Freehand strokes only hand over the newest segment; the rest was
    /// drawn by earlier samples.
    pub fn stroke_to_intertwine(self, input: &Stroke) -> Stroke {
        if self.is_freehand() && input.len() > 2 {
            return Stroke::from_points(input.points()[input.len() - 2..].iter().copied());
        }
        input.clone()
    }

    pub fn status_text(self, stroke: &Stroke) -> String {
        match (stroke.first_point(), stroke.last_point()) {
            (Some(first), Some(last)) if stroke.len() >= 2 && !self.is_freehand() => {
                let size = Rectangle::from_pt(first.pos, last.pos).size;
                format!(
                    "Start {} {} End {} {} (Size {} {})",
                    first.x(),
                    first.y(),
                    last.x(),
                    last.y(),
                    size.width,
                    size.height
                )
            }
            (_, Some(last)) => format!("Pos {} {}", last.x(), last.y()),
            _ => String::new(),
        }
    }
}

fn snap_to_angle(start: Position, end: Position) -> Position {
    let d = end - start;
    if d.x == 0 && d.y == 0 {
        return end;
    }
    let angle = (-(d.y as f64)).atan2(d.x as f64).to_degrees().abs();
    let angle = if angle > 90.0 { 180.0 - angle } else { angle };
    if angle < 22.5 {
        end.with_y(start.y)
    } else if angle > 67.5 {
        end.with_x(start.x)
    } else {
        snap_to_square(start, end)
    }
}

fn snap_to_square(start: Position, end: Position) -> Position {
    let d = end - start;
    let size = d.x.abs().max(d.y.abs());
    let sx = if d.x < 0 { -1 } else { 1 };
    let sy = if d.y < 0 { -1 } else { 1 };
    Position::new(start.x + sx * size, start.y + sy * size)
}

#[cfg(test)]
mod tests {
    use super::super::Button;
    use super::*;

    fn ptr(x: i32, y: i32) -> Pointer {
        Pointer::new(x, y, Button::Left)
    }

    #[test]
    fn test_two_points_rubber_band() {
        let mut state = ControllerState::default();
        let mut stroke = Stroke::new();
        let c = Controller::TwoPoints;
        c.press_button(&mut state, &mut stroke, &ptr(10, 10));
        c.movement(&mut state, &mut stroke, &ptr(15, 15), ToolLoopModifiers::empty(), false);
        c.movement(&mut state, &mut stroke, &ptr(20, 5), ToolLoopModifiers::empty(), false);
        assert_eq!(stroke, Stroke::from_points([(10, 10), (20, 5)]));
        assert_eq!(c.status_text(&stroke), "Start 10 10 End 20 5 (Size 11 6)");
        assert!(c.release_button(&mut state, &mut stroke, &ptr(20, 5)));
    }

    #[test]
    fn test_two_points_modifiers() {
        let mut state = ControllerState::default();
        let mut stroke = Stroke::new();
        let c = Controller::TwoPoints;
        c.press_button(&mut state, &mut stroke, &ptr(10, 10));

        c.movement(&mut state, &mut stroke, &ptr(20, 12), ToolLoopModifiers::SQUARE_ASPECT, true);
        assert_eq!(stroke[1].pos, Position::new(20, 10));

        c.movement(&mut state, &mut stroke, &ptr(20, 14), ToolLoopModifiers::SQUARE_ASPECT, false);
        assert_eq!(stroke[1].pos, Position::new(20, 20));

        c.movement(&mut state, &mut stroke, &ptr(14, 13), ToolLoopModifiers::FROM_CENTER, false);
        assert_eq!(stroke[0].pos, Position::new(6, 7));
        assert_eq!(stroke[1].pos, Position::new(14, 13));
    }

    #[test]
    fn test_four_points_click_sequence() {
        let mut state = ControllerState::default();
        let mut stroke = Stroke::new();
        let c = Controller::FourPoints;
        let none = ToolLoopModifiers::empty();

        c.press_button(&mut state, &mut stroke, &ptr(0, 0));
        c.movement(&mut state, &mut stroke, &ptr(10, 0), none, false);
        assert!(!c.release_button(&mut state, &mut stroke, &ptr(10, 0)));
        assert_eq!(stroke, Stroke::from_points([(0, 0), (10, 0), (10, 0), (10, 0)]));

        c.movement(&mut state, &mut stroke, &ptr(3, 5), none, false);
        c.press_button(&mut state, &mut stroke, &ptr(3, 5));
        assert!(!c.release_button(&mut state, &mut stroke, &ptr(3, 5)));
        c.movement(&mut state, &mut stroke, &ptr(7, 5), none, false);
        assert_eq!(stroke, Stroke::from_points([(0, 0), (3, 5), (7, 5), (10, 0)]));

        c.press_button(&mut state, &mut stroke, &ptr(7, 5));
        assert!(c.release_button(&mut state, &mut stroke, &ptr(7, 5)));
    }

    #[test]
    fn test_point_by_point_ends_on_click_without_drag() {
        let mut state = ControllerState::default();
        let mut stroke = Stroke::new();
        let c = Controller::PointByPoint;
        let none = ToolLoopModifiers::empty();

        c.press_button(&mut state, &mut stroke, &ptr(0, 0));
        c.movement(&mut state, &mut stroke, &ptr(5, 0), none, false);
        assert!(!c.release_button(&mut state, &mut stroke, &ptr(5, 0)));

        c.press_button(&mut state, &mut stroke, &ptr(5, 5));
        c.movement(&mut state, &mut stroke, &ptr(5, 5), none, false);
        assert!(!c.release_button(&mut state, &mut stroke, &ptr(5, 6)));
        c.movement(&mut state, &mut stroke, &ptr(5, 6), none, false);

        c.press_button(&mut state, &mut stroke, &ptr(5, 6));
        assert!(c.release_button(&mut state, &mut stroke, &ptr(5, 6)));
        assert_eq!(stroke, Stroke::from_points([(0, 0), (5, 0), (5, 6)]));
    }

    #[test]
    fn test_freehand_hands_over_last_segment() {
        let stroke = Stroke::from_points([(0, 0), (1, 0), (2, 1)]);
        assert_eq!(
            Controller::Freehand.stroke_to_intertwine(&stroke),
            Stroke::from_points([(1, 0), (2, 1)])
        );
        assert_eq!(Controller::TwoPoints.stroke_to_intertwine(&stroke), stroke);
    }
}
