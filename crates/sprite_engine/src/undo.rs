use crate::{Cel, Document, EngineError, Image, Mask, Rectangle, Result};

pub trait UndoState {
    fn undo_description(&self) -> Option<String>;
    fn can_undo(&self) -> bool;
    /// Reverts the most recent operation.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to undo or the operation no
    /// longer matches the document.
    fn undo(&mut self) -> Result<()>;

    fn redo_description(&self) -> Option<String>;
    fn can_redo(&self) -> bool;
    /// Reapplies the most recently undone operation.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to redo or the operation no
    /// longer matches the document.
    fn redo(&mut self) -> Result<()>;
}

pub trait UndoOperation: Send + Sync {
    fn get_description(&self) -> String;

    /// # Errors
    ///
    /// Returns an error if the layer or cel touched by the operation is gone.
    fn undo(&mut self, doc: &mut Document) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the layer or cel touched by the operation is gone.
    fn redo(&mut self, doc: &mut Document) -> Result<()>;
}

/// Swaps a rectangle of an existing cel image.
pub struct PatchCel {
    layer: usize,
    frame: usize,
    rect: Rectangle,
    old_pixels: Image,
    new_pixels: Image,
}

impl PatchCel {
    /// `rect` is in cel image coordinates.
    pub fn new(layer: usize, frame: usize, rect: Rectangle, old_pixels: Image, new_pixels: Image) -> Self {
        Self {
            layer,
            frame,
            rect,
            old_pixels,
            new_pixels,
        }
    }

    fn apply(&self, doc: &mut Document, pixels: &Image) -> Result<()> {
        let cel = doc
            .layer_mut(self.layer)?
            .cel_mut(self.frame)
            .ok_or(EngineError::InvalidFrame { frame: self.frame })?;
        cel.image.blit(pixels, self.rect.start);
        Ok(())
    }
}

impl UndoOperation for PatchCel {
    fn get_description(&self) -> String {
        "Draw".to_string()
    }

    fn undo(&mut self, doc: &mut Document) -> Result<()> {
        self.apply(doc, &self.old_pixels)
    }

    fn redo(&mut self, doc: &mut Document) -> Result<()> {
        self.apply(doc, &self.new_pixels)
    }
}

/// Replaces a whole cel, used when a stroke grows the cel.
pub struct ReplaceCel {
    layer: usize,
    frame: usize,
    old_cel: Option<Cel>,
    new_cel: Option<Cel>,
}

impl ReplaceCel {
    pub fn new(layer: usize, frame: usize, old_cel: Option<Cel>, new_cel: Option<Cel>) -> Self {
        Self {
            layer,
            frame,
            old_cel,
            new_cel,
        }
    }
}

impl UndoOperation for ReplaceCel {
    fn get_description(&self) -> String {
        "Draw".to_string()
    }

    fn undo(&mut self, doc: &mut Document) -> Result<()> {
        doc.layer_mut(self.layer)?.set_cel(self.frame, self.old_cel.clone());
        Ok(())
    }

    fn redo(&mut self, doc: &mut Document) -> Result<()> {
        doc.layer_mut(self.layer)?.set_cel(self.frame, self.new_cel.clone());
        Ok(())
    }
}

pub struct SetMask {
    old_mask: Mask,
    new_mask: Mask,
}

impl SetMask {
    pub fn new(old_mask: Mask, new_mask: Mask) -> Self {
        Self { old_mask, new_mask }
    }
}

impl UndoOperation for SetMask {
    fn get_description(&self) -> String {
        "Change selection".to_string()
    }

    fn undo(&mut self, doc: &mut Document) -> Result<()> {
        doc.set_mask(self.old_mask.clone());
        Ok(())
    }

    fn redo(&mut self, doc: &mut Document) -> Result<()> {
        doc.set_mask(self.new_mask.clone());
        Ok(())
    }
}
