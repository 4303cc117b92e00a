//! One drawing gesture: the strategies picked at button press, the canvas
//! being edited and everything the gesture accumulates until it ends.

use std::collections::HashMap;

use sprite_engine::{Brush, BrushType, Color, Document, EditCanvas, ExpandCelCanvas, Image, Mask, Position, PreviewCanvas, Rectangle, Region};

use super::{
    Button, Controller, FloodFillReferTo, GridSettings, Ink, InkColors, Intertwine, IntertwineState, PickTarget, PointShape, Stroke, StrokeSink, Symmetry,
    SymmetryPreferences, Tool, ToolLoopModifiers, ToolPreferences, TracePolicy, ink, resolve_freehand,
};
use crate::{Result, ToolError};

/// What the editor knows when a gesture starts.
#[derive(Clone, Debug)]
pub struct EditorContext<'a> {
    pub tool: &'a Tool,
    pub brush: &'a Brush,
    pub button: Button,
    pub fg: Color,
    pub bg: Color,
    pub layer: Option<usize>,
    pub frame: usize,
    pub preferences: ToolPreferences,
    pub symmetry: SymmetryPreferences,
    pub grid: GridSettings,
    /// Colors the shading ink walks through, darkest first
    pub shade_ramp: Vec<Color>,
    pub modifiers: ToolLoopModifiers,
    /// Seed for the random effects (spray, jumble)
    pub seed: Option<u64>,
}

impl<'a> EditorContext<'a> {
    pub fn new(tool: &'a Tool, brush: &'a Brush) -> Self {
        Self {
            tool,
            brush,
            button: Button::Left,
            fg: Color::BLACK,
            bg: Color::WHITE,
            layer: Some(0),
            frame: 0,
            preferences: ToolPreferences::default(),
            symmetry: SymmetryPreferences::default(),
            grid: GridSettings::default(),
            shade_ramp: Vec::new(),
            modifiers: ToolLoopModifiers::empty(),
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Pixels were written to the layer as one undoable step
    Committed { bounds: Rectangle },
    /// The document selection was replaced
    SelectionChanged,
    /// Nothing was kept
    RolledBack,
    Canceled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisposeResult {
    pub outcome: GestureOutcome,
    /// Color picked by an eyedropper ink and the slot it goes to
    pub picked: Option<(PickTarget, Color)>,
}

/// Document data a gesture reads once at start.
struct DocSnapshot {
    bounds: Rectangle,
    selection: Option<Mask>,
    background: bool,
    flood_reference: Option<Image>,
    selection_base: Mask,
}

impl DocSnapshot {
    fn take(doc: &Document, ctx: &EditorContext<'_>, ink: Ink, point_shape: PointShape) -> Result<Self> {
        let background = match ctx.layer {
            Some(index) => doc.layer(index)?.is_background(),
            None => false,
        };
        let flood_reference = if point_shape.is_flood_fill() && ctx.preferences.flood_fill_refer_to == FloodFillReferTo::AllLayers {
            Some(doc.render_frame(ctx.frame)?)
        } else {
            None
        };
        let selection = doc.selection().cloned();
        let selection_base = if ink.is_selection() && selection.is_some() && !ctx.modifiers.contains(ToolLoopModifiers::REPLACE_SELECTION) {
            doc.mask().clone()
        } else {
            Mask::new(doc.size().width, doc.size().height)
        };
        Ok(Self {
            bounds: doc.bounds(),
            selection,
            background,
            flood_reference,
            selection_base,
        })
    }
}

pub struct ToolLoop<'a> {
    canvas: Box<dyn EditCanvas + 'a>,
    brush: &'a Brush,
    button: Button,

    ink: Ink,
    controller: Controller,
    point_shape: PointShape,
    intertwine: Intertwine,
    trace_policy: TracePolicy,
    filled: bool,
    filled_preview: bool,

    colors: InkColors,
    shade: HashMap<Color, Color>,
    preferences: ToolPreferences,
    grid: GridSettings,
    symmetry: Symmetry,
    modifiers: ToolLoopModifiers,
    rng: fastrand::Rng,

    doc_bounds: Rectangle,
    selection: Option<Mask>,
    selection_mask: Mask,
    flood_reference: Option<Image>,

    intertwine_state: IntertwineState,
    stamp_center: Position,
    step_bounds: Rectangle,
    last_step: bool,
    previous_step: Region,
    dirty_area: Region,
    modified: Region,
    picked: Option<(PickTarget, Color)>,
    status: String,

    canceled: bool,
    preview: bool,
}

/// Starts a gesture that edits `doc`.
///
/// # Errors
///
/// Fails without touching the document when the target layer can't be
/// edited or the working canvas can't be created.
pub fn create_tool_loop<'a>(ctx: &EditorContext<'a>, doc: &'a mut Document) -> Result<ToolLoop<'a>> {
    let button = ctx.tool.button(ctx.button);
    let ink = button.ink.with_ink_type(ctx.preferences.ink_type);

    if doc.is_locked() {
        return Err(sprite_engine::EngineError::DocumentLocked.into());
    }
    if ink.modifies_pixels() || (ink.is_selection() && button.point_shape.is_flood_fill()) {
        doc.check_editable(ctx.layer, ctx.frame)?;
    }

    let snapshot = DocSnapshot::take(doc, ctx, ink, button.point_shape)?;
    let canvas = ExpandCelCanvas::new(doc, ctx.layer, ctx.frame)?;
    log::debug!("Starting '{}' gesture with {} ink", ctx.tool.id(), ink.id());
    Ok(ToolLoop::new(ctx, Box::new(canvas), ink, button.point_shape, snapshot, false))
}

/// Starts a gesture drawing into `preview` only.
///
/// Spray and flood fill are replaced by their cheap substitutes and the
/// result is never committed.
///
/// # Errors
///
/// Fails when the layer or frame of `ctx` does not exist.
pub fn create_tool_loop_preview<'a>(ctx: &EditorContext<'a>, doc: &Document, preview: &'a mut Image) -> Result<ToolLoop<'a>> {
    let button = ctx.tool.button(ctx.button);
    let ink = button.ink.with_ink_type(ctx.preferences.ink_type);
    let point_shape = button.point_shape.preview_substitute();
    let snapshot = DocSnapshot::take(doc, ctx, ink, point_shape)?;
    Ok(ToolLoop::new(ctx, Box::new(PreviewCanvas::new(preview)), ink, point_shape, snapshot, true))
}

impl<'a> ToolLoop<'a> {
    fn new(ctx: &EditorContext<'a>, canvas: Box<dyn EditCanvas + 'a>, ink: Ink, point_shape: PointShape, snapshot: DocSnapshot, preview: bool) -> Self {
        let button = ctx.tool.button(ctx.button);
        let prefs = &ctx.preferences;

        let (intertwine, trace_policy) = resolve_freehand(button.intertwine, button.trace_policy, prefs.freehand_algorithm);
        if (intertwine, trace_policy) != (button.intertwine, button.trace_policy) {
            log::debug!(
                "Freehand algorithm {:?} uses {} / {}",
                prefs.freehand_algorithm,
                intertwine.id(),
                trace_policy.id()
            );
        }

        let mut colors = InkColors::new(ctx.fg, ctx.bg, ctx.button);
        colors.opacity = if prefs.ink_type.has_opacity() || ctx.brush.brush_type() == BrushType::Image || ink.is_effect() {
            prefs.opacity
        } else {
            255
        };
        colors.tolerance = prefs.tolerance;
        colors.blend = prefs.blend_formula;
        if snapshot.background {
            colors.transparent = ctx.bg;
        }

        let shade = if ink.is_shading() {
            ink::shade_remap(&ctx.shade_ramp, ctx.button)
        } else {
            HashMap::new()
        };

        let (stamp_w, stamp_h) = if point_shape.uses_brush() {
            (ctx.brush.bounds().width(), ctx.brush.bounds().height())
        } else {
            (1, 1)
        };

        let mut intertwine_state = IntertwineState::default();
        intertwine.prepare(&mut intertwine_state);

        Self {
            canvas,
            brush: ctx.brush,
            button: ctx.button,
            ink,
            controller: button.controller,
            point_shape,
            intertwine,
            trace_policy,
            filled: button.fill.is_filled(prefs.filled),
            filled_preview: prefs.filled_preview,
            colors,
            shade,
            preferences: prefs.clone(),
            grid: ctx.grid,
            symmetry: Symmetry::new(&ctx.symmetry, stamp_w, stamp_h),
            modifiers: ctx.modifiers,
            rng: ctx.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed),
            doc_bounds: snapshot.bounds,
            selection: snapshot.selection,
            selection_mask: snapshot.selection_base,
            flood_reference: snapshot.flood_reference,
            intertwine_state,
            stamp_center: Position::default(),
            step_bounds: Rectangle::default(),
            last_step: false,
            previous_step: Region::new(),
            dirty_area: Region::new(),
            modified: Region::new(),
            picked: None,
            status: String::new(),
            canceled: false,
            preview,
        }
    }

    pub fn ink(&self) -> Ink {
        self.ink
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    pub fn point_shape(&self) -> PointShape {
        self.point_shape
    }

    pub fn intertwine(&self) -> Intertwine {
        self.intertwine
    }

    pub fn trace_policy(&self) -> TracePolicy {
        self.trace_policy
    }

    pub fn button(&self) -> Button {
        self.button
    }

    pub fn brush(&self) -> &'a Brush {
        self.brush
    }

    pub fn colors(&self) -> &InkColors {
        &self.colors
    }

    pub fn preferences(&self) -> &ToolPreferences {
        &self.preferences
    }

    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    pub fn symmetry(&self) -> &Symmetry {
        &self.symmetry
    }

    pub fn modifiers(&self) -> ToolLoopModifiers {
        self.modifiers
    }

    pub fn set_modifiers(&mut self, modifiers: ToolLoopModifiers) {
        self.modifiers = modifiers;
    }

    pub fn doc_bounds(&self) -> Rectangle {
        self.doc_bounds
    }

    pub fn canvas(&self) -> &dyn EditCanvas {
        self.canvas.as_ref()
    }

    /// Selection being built by a selection ink.
    pub fn selection_mask(&self) -> &Mask {
        &self.selection_mask
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    pub fn cancel(&mut self) {
        if !self.canceled {
            log::debug!("Gesture canceled");
        }
        self.canceled = true;
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Area that changed in the last step, for screen refresh.
    pub fn dirty_area(&self) -> &Region {
        &self.dirty_area
    }

    /// Everything written during the gesture.
    pub fn modified_region(&self) -> &Region {
        &self.modified
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub(crate) fn set_status(&mut self, status: String) {
        self.status = status;
    }

    pub fn picked(&self) -> Option<(PickTarget, Color)> {
        self.picked
    }

    pub(crate) fn rng(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }

    pub(crate) fn set_stamp_center(&mut self, center: Position) {
        self.stamp_center = center;
    }

    /// Image flood fills compare colors against.
    pub(crate) fn flood_reference(&self) -> &Image {
        self.flood_reference.as_ref().unwrap_or_else(|| self.canvas.source())
    }

    /// Redraws the gesture for the current stroke under the trace policy.
    pub(crate) fn do_loop_step(&mut self, stroke: &Stroke, last_step: bool) {
        let stroke = if self.trace_policy == TracePolicy::Last || last_step {
            stroke.clone()
        } else {
            self.controller.stroke_to_intertwine(stroke)
        };
        self.last_step = last_step;

        let area = self.step_area(&stroke);
        let mut dirty = Region::from_rect(area);
        match self.trace_policy {
            TracePolicy::Accumulate | TracePolicy::Overlap => {}
            TracePolicy::AccumulateUpdateLast => {
                let previous = std::mem::take(&mut self.previous_step);
                self.canvas.invalidate_dest(&previous);
                dirty.union(&previous);
            }
            TracePolicy::Last => {
                self.canvas.invalidate_dest_all();
                dirty.union(&self.previous_step);
            }
        }

        self.step_bounds = Rectangle::default();
        let mut state = std::mem::take(&mut self.intertwine_state);
        if self.filled && (last_step || self.filled_preview) {
            self.intertwine.fill_stroke(self, &stroke, &mut state);
        } else {
            self.intertwine.join_stroke(self, &stroke, &mut state);
        }
        self.intertwine_state = state;

        let written = Region::from_rect(self.step_bounds.union(&area).intersect(&self.doc_bounds));
        if self.trace_policy == TracePolicy::Overlap {
            self.canvas.copy_dest_to_source(&written);
        }
        self.modified.union(&Region::from_rect(self.step_bounds));
        dirty.union(&written);
        self.dirty_area = dirty.intersect_rect(&self.doc_bounds);
        self.previous_step = written;
    }

    /// Stroke bounds grown by the point shape at both corners. With symmetry
    /// on, the corners' images on the configured axes are included too.
    fn step_area(&self, stroke: &Stroke) -> Rectangle {
        if stroke.is_empty() {
            return Rectangle::default();
        }
        let bounds = stroke.bounds();
        let mut area = bounds;
        for (x, y) in [(bounds.left(), bounds.top()), (bounds.right(), bounds.bottom())] {
            for p in self.symmetry.points(x, y) {
                area = area.union(&Rectangle::from(p.x, p.y, 1, 1));
                area = area.union(&self.point_shape.modified_area(self, p.x, p.y));
            }
        }
        area
    }

    /// Applies the ink to the row `x1..=x2`, clipped to the sprite and, for
    /// painting inks, to the document selection.
    pub(crate) fn ink_hline(&mut self, x1: i32, y: i32, x2: i32) {
        let (x1, x2) = (x1.min(x2), x1.max(x2));
        if y < self.doc_bounds.top() || y > self.doc_bounds.bottom() {
            return;
        }
        let x1 = x1.max(self.doc_bounds.left());
        let x2 = x2.min(self.doc_bounds.right());
        if x1 > x2 {
            return;
        }
        self.step_bounds = self.step_bounds.union(&Rectangle::from_coords(x1, y, x2, y));

        match self.ink {
            Ink::Selection => {
                if self.last_step {
                    if self.modifiers.contains(ToolLoopModifiers::SUBTRACT_SELECTION) {
                        self.selection_mask.subtract_hline(x1, y, x2);
                    } else {
                        self.selection_mask.add_hline(x1, y, x2);
                    }
                }
            }
            Ink::Pick(target) => {
                self.picked = Some((target, self.canvas.source().get_pixel(x2, y)));
            }
            ink if ink.is_navigation() || ink.is_slice() => {}
            ink if ink.is_effect() => self.effect_hline(x1, y, x2),
            _ => self.paint_hline(x1, y, x2),
        }
    }

    fn clipped_by_selection(&self, x: i32, y: i32) -> bool {
        self.selection.as_ref().is_some_and(|mask| !mask.contains(x, y))
    }

    fn paint_hline(&mut self, x1: i32, y: i32, x2: i32) {
        let image_brush = self.brush.brush_type() == BrushType::Image && self.point_shape.uses_brush();
        for x in x1..=x2 {
            if self.clipped_by_selection(x, y) {
                continue;
            }
            let paint = if image_brush {
                match self.brush.pattern_color(self.stamp_center, x, y) {
                    Some(color) if !color.is_transparent() => color,
                    _ => continue,
                }
            } else {
                self.colors.primary
            };
            let src = self.canvas.source().get_pixel(x, y);
            if let Some(color) = self.ink.pixel(src, paint, &self.colors, &self.shade) {
                self.canvas.dest_mut().put_pixel(x, y, color);
            }
        }
    }

    fn effect_hline(&mut self, x1: i32, y: i32, x2: i32) {
        let opacity = self.colors.opacity;
        for x in x1..=x2 {
            if self.clipped_by_selection(x, y) {
                continue;
            }
            let source = self.canvas.source();
            let src = source.get_pixel(x, y);
            let neighbor = |dx: i32, dy: i32| source.is_valid(x + dx, y + dy).then(|| source.get_pixel(x + dx, y + dy));
            let color = if self.ink == Ink::Blur {
                ink::blur_pixel(src, opacity, neighbor)
            } else {
                let (dx, dy) = (self.rng.i32(-1..=1), self.rng.i32(-1..=1));
                let picked = neighbor(dx, dy).unwrap_or(src);
                sprite_engine::BlendFormula::Merge.blend(src, picked, opacity)
            };
            self.canvas.dest_mut().put_pixel(x, y, color);
        }
    }

    /// Ends the gesture and hands the result to the document.
    pub fn dispose(mut self) -> DisposeResult {
        if self.preview {
            return DisposeResult {
                outcome: GestureOutcome::Canceled,
                picked: None,
            };
        }
        if self.canceled {
            self.canvas.rollback();
            return DisposeResult {
                outcome: GestureOutcome::Canceled,
                picked: None,
            };
        }

        let outcome = if self.ink.modifies_pixels() {
            match self.canvas.commit(&self.modified) {
                Ok(bounds) => {
                    log::debug!("Committed {} ink stroke at {bounds}", self.ink.id());
                    GestureOutcome::Committed { bounds }
                }
                Err(err) => self.roll_back_after(&ToolError::from(err)),
            }
        } else if self.ink.is_selection() {
            let mask = std::mem::take(&mut self.selection_mask);
            match self.canvas.replace_mask(mask) {
                Ok(()) => GestureOutcome::SelectionChanged,
                Err(err) => self.roll_back_after(&ToolError::from(err)),
            }
        } else {
            self.canvas.rollback();
            GestureOutcome::RolledBack
        };

        DisposeResult {
            outcome,
            picked: self.picked,
        }
    }

    fn roll_back_after(&mut self, err: &ToolError) -> GestureOutcome {
        log::warn!("Drawing with {} ink failed: {err}", self.ink.id());
        self.canvas.rollback();
        GestureOutcome::RolledBack
    }
}

impl StrokeSink for ToolLoop<'_> {
    fn is_filled(&self) -> bool {
        self.filled
    }

    fn point(&mut self, x: i32, y: i32, pressure: f32) {
        for p in self.symmetry.points(x, y) {
            self.point_shape.transform_point(self, p.x, p.y, pressure);
        }
    }

    fn hline(&mut self, x1: i32, y: i32, x2: i32, pressure: f32) {
        for (a, row, b) in self.symmetry.hlines(x1, y, x2) {
            self.point_shape.transform_hline(self, a, row, b, pressure);
        }
    }
}
