use std::collections::HashMap;

use crate::{BoundarySegment, EngineError, Image, Mask, Position, Rectangle, Result, Size, UndoOperation, UndoState};

/// Image of one layer in one frame, placed at `position` in sprite coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cel {
    pub position: Position,
    pub image: Image,
    pub opacity: u8,
}

impl Cel {
    pub fn new(position: Position, image: Image) -> Self {
        Self {
            position,
            image,
            opacity: 255,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.image.bounds().offset(self.position)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Layer {
    name: String,
    visible: bool,
    editable: bool,
    background: bool,
    cels: HashMap<usize, Cel>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            editable: true,
            background: false,
            cels: HashMap::new(),
        }
    }

    /// Opaque bottom layer; erasing it paints the background color.
    pub fn new_background(name: impl Into<String>) -> Self {
        Self {
            background: true,
            ..Self::new(name)
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_cel(mut self, frame: usize, cel: Cel) -> Self {
        self.cels.insert(frame, cel);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_background(&self) -> bool {
        self.background
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn cel(&self, frame: usize) -> Option<&Cel> {
        self.cels.get(&frame)
    }

    pub fn cel_mut(&mut self, frame: usize) -> Option<&mut Cel> {
        self.cels.get_mut(&frame)
    }

    /// Replaces (or removes with `None`) the cel of `frame`, returning the old one.
    pub fn set_cel(&mut self, frame: usize, cel: Option<Cel>) -> Option<Cel> {
        match cel {
            Some(cel) => self.cels.insert(frame, cel),
            None => self.cels.remove(&frame),
        }
    }
}

/// The sprite being edited: layers, frames, the selection and the undo history.
pub struct Document {
    size: Size,
    frames: usize,
    layers: Vec<Layer>,
    mask: Mask,
    mask_visible: bool,
    mask_boundaries: Vec<BoundarySegment>,
    locked: bool,
    undo_stack: Vec<Box<dyn UndoOperation>>,
    redo_stack: Vec<Box<dyn UndoOperation>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("size", &self.size)
            .field("frames", &self.frames)
            .field("layers", &self.layers)
            .field("mask_visible", &self.mask_visible)
            .field("locked", &self.locked)
            .field("undo_len", &self.undo_stack.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            frames: 1,
            layers: Vec::new(),
            mask: Mask::new(width, height),
            mask_visible: false,
            mask_boundaries: Vec::new(),
            locked: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn with_frames(mut self, frames: usize) -> Self {
        self.frames = frames.max(1);
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Position::default(), self.size)
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn add_layer(&mut self, layer: Layer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// # Errors
    ///
    /// Returns `InvalidLayer` for an index past the layer stack.
    pub fn layer(&self, index: usize) -> Result<&Layer> {
        self.layers.get(index).ok_or(EngineError::InvalidLayer { index })
    }

    /// # Errors
    ///
    /// Returns `InvalidLayer` for an index past the layer stack.
    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer> {
        self.layers.get_mut(index).ok_or(EngineError::InvalidLayer { index })
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Marks the document as checked out by another view.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Verifies that pixels of `layer` in `frame` may be modified.
    ///
    /// # Errors
    ///
    /// Returns the first failing resource check.
    pub fn check_editable(&self, layer: Option<usize>, frame: usize) -> Result<()> {
        if self.locked {
            return Err(EngineError::DocumentLocked);
        }
        if frame >= self.frames {
            return Err(EngineError::InvalidFrame { frame });
        }
        let Some(index) = layer else {
            return Err(EngineError::NoActiveLayer);
        };
        let layer = self.layer(index)?;
        if !layer.is_visible() {
            return Err(EngineError::LayerHidden { name: layer.name().to_string() });
        }
        if !layer.is_editable() {
            return Err(EngineError::LayerLocked { name: layer.name().to_string() });
        }
        Ok(())
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn is_mask_visible(&self) -> bool {
        self.mask_visible
    }

    /// The active selection, if there is one on screen.
    pub fn selection(&self) -> Option<&Mask> {
        if self.mask_visible { Some(&self.mask) } else { None }
    }

    pub fn mask_boundaries(&self) -> &[BoundarySegment] {
        &self.mask_boundaries
    }

    /// Replaces the selection without recording an undo step.
    pub fn set_mask(&mut self, mask: Mask) {
        self.mask_visible = !mask.is_empty();
        self.mask = mask;
        self.generate_mask_boundaries();
    }

    /// Replaces the selection as an undoable step.
    ///
    /// # Errors
    ///
    /// Propagates errors from applying the operation.
    pub fn replace_mask(&mut self, mask: Mask) -> Result<()> {
        let old = self.mask.clone();
        self.execute(Box::new(crate::SetMask::new(old, mask)))
    }

    pub fn generate_mask_boundaries(&mut self) {
        self.mask_boundaries = if self.mask_visible { self.mask.boundaries() } else { Vec::new() };
    }

    /// Flattens the visible layers of `frame` into one sprite-sized image.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrame` for a frame past the end of the sprite.
    pub fn render_frame(&self, frame: usize) -> Result<Image> {
        if frame >= self.frames {
            return Err(EngineError::InvalidFrame { frame });
        }
        let mut image = Image::new(self.size.width, self.size.height);
        for layer in self.layers.iter().filter(|l| l.is_visible()) {
            if let Some(cel) = layer.cel(frame) {
                image.composite(&cel.image, cel.position, cel.opacity);
            }
        }
        Ok(image)
    }

    /// Applies `op` and records it in the undo history.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation; nothing is recorded then.
    pub fn execute(&mut self, mut op: Box<dyn UndoOperation>) -> Result<()> {
        op.redo(self)?;
        log::debug!("executed '{}'", op.get_description());
        self.undo_stack.push(op);
        self.redo_stack.clear();
        Ok(())
    }
}

impl UndoState for Document {
    fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(|op| op.get_description())
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn undo(&mut self) -> Result<()> {
        let Some(mut op) = self.undo_stack.pop() else {
            return Err(EngineError::NothingTo { action: "undo" });
        };
        let res = op.undo(self);
        self.redo_stack.push(op);
        res
    }

    fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|op| op.get_description())
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn redo(&mut self) -> Result<()> {
        let Some(mut op) = self.redo_stack.pop() else {
            return Err(EngineError::NothingTo { action: "redo" });
        };
        let res = op.redo(self);
        self.undo_stack.push(op);
        res
    }
}
