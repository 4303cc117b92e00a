use crate::{Cel, Document, EngineError, Image, Mask, PatchCel, Rectangle, Region, ReplaceCel, Result};

/// Largest canvas (in pixels) that can be checked out for editing.
pub const MAX_CANVAS_AREA: i64 = 16384 * 16384;

/// A checked-out pair of pixel buffers for one gesture.
///
/// `source` holds the pixels as they were before the gesture, `dest` is
/// the working buffer every write goes to. Both cover the whole sprite.
pub trait EditCanvas {
    fn source(&self) -> &Image;
    fn dest(&self) -> &Image;
    fn dest_mut(&mut self) -> &mut Image;

    fn bounds(&self) -> Rectangle {
        self.dest().bounds()
    }

    /// Restores `dest` from `source` inside `region`.
    fn invalidate_dest(&mut self, region: &Region);

    /// Restores all of `dest` from `source`.
    fn invalidate_dest_all(&mut self);

    /// Makes the current `dest` pixels inside `region` the new `source`.
    fn copy_dest_to_source(&mut self, region: &Region);

    /// Hands the pixels inside `dirty` to the undo history.
    ///
    /// # Errors
    ///
    /// Returns an error if the edited layer or cel cannot be updated; the
    /// document is left untouched then.
    fn commit(&mut self, dirty: &Region) -> Result<Rectangle>;

    /// Discards every write made to `dest`.
    fn rollback(&mut self);

    /// Replaces the document selection and regenerates its boundaries.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas has no document to update.
    fn replace_mask(&mut self, mask: Mask) -> Result<()>;
}

/// Working canvas for a layer/frame of a document, expanded to the sprite size.
pub struct ExpandCelCanvas<'a> {
    doc: &'a mut Document,
    layer: Option<usize>,
    frame: usize,
    source: Image,
    dest: Image,
}

impl<'a> ExpandCelCanvas<'a> {
    /// Checks out `layer` at `frame`. A missing layer gives a blank canvas
    /// that can only edit the selection.
    ///
    /// # Errors
    ///
    /// Returns `CanvasTooLarge` when the sprite exceeds [`MAX_CANVAS_AREA`]
    /// and lookup errors for unknown layers or frames.
    pub fn new(doc: &'a mut Document, layer: Option<usize>, frame: usize) -> Result<Self> {
        let size = doc.size();
        if size.is_empty() || size.area() > MAX_CANVAS_AREA {
            return Err(EngineError::CanvasTooLarge {
                width: size.width,
                height: size.height,
            });
        }
        if frame >= doc.frame_count() {
            return Err(EngineError::InvalidFrame { frame });
        }

        let mut source = Image::new(size.width, size.height);
        if let Some(index) = layer {
            if let Some(cel) = doc.layer(index)?.cel(frame) {
                source.blit(&cel.image, cel.position);
            }
        }
        let dest = source.clone();
        Ok(Self {
            doc,
            layer,
            frame,
            source,
            dest,
        })
    }

    pub fn layer(&self) -> Option<usize> {
        self.layer
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}

impl EditCanvas for ExpandCelCanvas<'_> {
    fn source(&self) -> &Image {
        &self.source
    }

    fn dest(&self) -> &Image {
        &self.dest
    }

    fn dest_mut(&mut self) -> &mut Image {
        &mut self.dest
    }

    fn invalidate_dest(&mut self, region: &Region) {
        self.dest.copy_region_from(&self.source, region);
    }

    fn invalidate_dest_all(&mut self) {
        self.dest.clone_from(&self.source);
    }

    fn copy_dest_to_source(&mut self, region: &Region) {
        self.source.copy_region_from(&self.dest, region);
    }

    fn commit(&mut self, dirty: &Region) -> Result<Rectangle> {
        let Some(layer) = self.layer else {
            return Err(EngineError::NoActiveLayer);
        };
        let bounds = dirty.bounds().intersect(&self.dest.bounds());
        if bounds.is_empty() {
            return Ok(bounds);
        }

        let old_cel = self.doc.layer(layer)?.cel(self.frame).cloned();
        match old_cel {
            Some(cel) if cel.bounds().contains_rect(&bounds) => {
                let local = bounds.offset(-cel.position);
                let old_pixels = cel.image.crop(local);
                let new_pixels = self.dest.crop(bounds);
                self.doc
                    .execute(Box::new(PatchCel::new(layer, self.frame, local, old_pixels, new_pixels)))?;
            }
            old_cel => {
                let cel_bounds = old_cel.as_ref().map(Cel::bounds).unwrap_or_default().union(&bounds);
                let mut image = Image::new(cel_bounds.width(), cel_bounds.height());
                if let Some(old) = &old_cel {
                    image.blit(&old.image, old.position - cel_bounds.start);
                }
                image.blit(&self.dest.crop(bounds), bounds.start - cel_bounds.start);
                let mut new_cel = Cel::new(cel_bounds.start, image);
                if let Some(old) = &old_cel {
                    new_cel.opacity = old.opacity;
                }
                self.doc
                    .execute(Box::new(ReplaceCel::new(layer, self.frame, old_cel, Some(new_cel))))?;
            }
        }
        self.source.copy_rect_from(&self.dest, bounds);
        Ok(bounds)
    }

    fn rollback(&mut self) {
        self.invalidate_dest_all();
    }

    fn replace_mask(&mut self, mask: Mask) -> Result<()> {
        self.doc.replace_mask(mask)
    }
}

/// Canvas drawing straight into a caller-owned preview buffer.
///
/// Nothing reaches a document: `commit` is a no-op and selection changes
/// are ignored.
pub struct PreviewCanvas<'a> {
    source: Image,
    dest: &'a mut Image,
}

impl<'a> PreviewCanvas<'a> {
    pub fn new(dest: &'a mut Image) -> Self {
        Self { source: dest.clone(), dest }
    }
}

impl EditCanvas for PreviewCanvas<'_> {
    fn source(&self) -> &Image {
        &self.source
    }

    fn dest(&self) -> &Image {
        self.dest
    }

    fn dest_mut(&mut self) -> &mut Image {
        self.dest
    }

    fn invalidate_dest(&mut self, region: &Region) {
        self.dest.copy_region_from(&self.source, region);
    }

    fn invalidate_dest_all(&mut self) {
        self.dest.clone_from(&self.source);
    }

    fn copy_dest_to_source(&mut self, region: &Region) {
        self.source.copy_region_from(self.dest, region);
    }

    fn commit(&mut self, dirty: &Region) -> Result<Rectangle> {
        Ok(dirty.bounds().intersect(&self.dest.bounds()))
    }

    fn rollback(&mut self) {
        self.invalidate_dest_all();
    }

    fn replace_mask(&mut self, _mask: Mask) -> Result<()> {
        Ok(())
    }
}
