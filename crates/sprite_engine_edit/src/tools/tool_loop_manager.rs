use sprite_engine::Region;

use super::{Button, ControllerState, DisposeResult, Pointer, Stroke, ToolLoop, ToolLoopModifiers};

/// Feeds pointer events of one gesture into its [`ToolLoop`].
///
/// Every event is ignored once the loop has been canceled.
pub struct ToolLoopManager<'a> {
    tool_loop: ToolLoop<'a>,
    stroke: Stroke,
    controller_state: ControllerState,
    last_pointer: Pointer,
}

impl<'a> ToolLoopManager<'a> {
    pub fn new(tool_loop: ToolLoop<'a>) -> Self {
        Self {
            tool_loop,
            stroke: Stroke::new(),
            controller_state: ControllerState::default(),
            last_pointer: Pointer::new(0, 0, Button::None),
        }
    }

    pub fn tool_loop(&self) -> &ToolLoop<'a> {
        &self.tool_loop
    }

    pub fn tool_loop_mut(&mut self) -> &mut ToolLoop<'a> {
        &mut self.tool_loop
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn is_canceled(&self) -> bool {
        self.tool_loop.is_canceled()
    }

    pub fn cancel(&mut self) {
        self.tool_loop.cancel();
    }

    pub fn dirty_area(&self) -> &Region {
        self.tool_loop.dirty_area()
    }

    /// Called on the first button press of the gesture.
    pub fn prepare_loop(&mut self, pointer: &Pointer) {
        if self.is_canceled() {
            return;
        }
        self.stroke.reset();
        self.controller_state = ControllerState::default();
        self.last_pointer = *pointer;
    }

    /// Called on every button press, including the first one.
    pub fn press_button(&mut self, pointer: &Pointer) {
        if self.is_canceled() {
            return;
        }
        self.last_pointer = *pointer;
        let pointer = self.snap_to_grid(pointer);
        let controller = self.tool_loop.controller();
        controller.press_button(&mut self.controller_state, &mut self.stroke, &pointer);
        self.update_status();
        self.do_loop_step(false);
    }

    /// Returns true when the gesture is over and the editor can release
    /// the pointer capture.
    pub fn release_button(&mut self, pointer: &Pointer) -> bool {
        if self.is_canceled() {
            return true;
        }
        let pointer = self.snap_to_grid(pointer);
        let controller = self.tool_loop.controller();
        let finished = controller.release_button(&mut self.controller_state, &mut self.stroke, &pointer);

        let ink = self.tool_loop.ink();
        if finished && (ink.is_selection() || ink.is_slice() || self.tool_loop.trace_policy() == super::TracePolicy::Last) {
            self.do_loop_step(true);
        }
        finished
    }

    pub fn movement(&mut self, pointer: &Pointer) {
        if self.is_canceled() {
            return;
        }
        self.last_pointer = *pointer;
        let pointer = self.snap_to_grid(pointer);
        let controller = self.tool_loop.controller();
        let snap_by_angle = self.tool_loop.intertwine().snap_by_angle();
        let modifiers = self.tool_loop.modifiers();
        controller.movement(&mut self.controller_state, &mut self.stroke, &pointer, modifiers, snap_by_angle);
        self.update_status();
        self.do_loop_step(false);
    }

    /// Replays the last pointer sample so the shape follows the new modifiers.
    pub fn set_modifiers(&mut self, modifiers: ToolLoopModifiers) {
        if self.is_canceled() {
            return;
        }
        self.tool_loop.set_modifiers(modifiers);
        if self.last_pointer.button != Button::None {
            let pointer = self.last_pointer;
            self.movement(&pointer);
        }
    }

    pub fn dispose(self) -> DisposeResult {
        self.tool_loop.dispose()
    }

    fn do_loop_step(&mut self, last_step: bool) {
        if self.stroke.is_empty() {
            return;
        }
        self.tool_loop.do_loop_step(&self.stroke, last_step);
    }

    fn snap_to_grid(&self, pointer: &Pointer) -> Pointer {
        let grid = self.tool_loop.grid();
        if !grid.snap || !self.tool_loop.controller().can_snap_to_grid() {
            return *pointer;
        }
        let (x, y) = grid.snap_point(pointer.pos.x, pointer.pos.y);
        Pointer {
            pos: (x, y).into(),
            ..*pointer
        }
    }

    fn update_status(&mut self) {
        let text = self.tool_loop.controller().status_text(&self.stroke);
        self.tool_loop.set_status(text);
    }
}
