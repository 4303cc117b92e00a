use pretty_assertions::assert_eq;
use sprite_engine::{Cel, Color, Document, EditCanvas, EngineError, ExpandCelCanvas, Image, Layer, Mask, Position, PreviewCanvas, Rectangle, Region, UndoState};

fn document_with_cel() -> Document {
    let mut doc = Document::new(16, 16);
    let mut image = Image::new(4, 4);
    image.fill(Color::rgb(1, 2, 3));
    doc.add_layer(Layer::new("Layer 1").with_cel(0, Cel::new(Position::new(2, 2), image)));
    doc
}

#[test]
fn test_source_covers_whole_sprite() {
    let mut doc = document_with_cel();
    let canvas = ExpandCelCanvas::new(&mut doc, Some(0), 0).unwrap();
    assert_eq!(canvas.source().size(), sprite_engine::Size::new(16, 16));
    assert_eq!(canvas.source().get_pixel(2, 2), Color::rgb(1, 2, 3));
    assert_eq!(canvas.source().get_pixel(0, 0), Color::TRANSPARENT);
    assert_eq!(canvas.source(), canvas.dest());
}

#[test]
fn test_commit_inside_cel_is_undoable() {
    let mut doc = document_with_cel();
    {
        let mut canvas = ExpandCelCanvas::new(&mut doc, Some(0), 0).unwrap();
        canvas.dest_mut().put_pixel(3, 3, Color::WHITE);
        let bounds = canvas.commit(&Region::from_rect(Rectangle::from(3, 3, 1, 1))).unwrap();
        assert_eq!(bounds, Rectangle::from(3, 3, 1, 1));
    }
    let cel = doc.layer(0).unwrap().cel(0).unwrap();
    assert_eq!(cel.image.get_pixel(1, 1), Color::WHITE);
    assert_eq!(cel.position, Position::new(2, 2));

    doc.undo().unwrap();
    assert_eq!(doc.layer(0).unwrap().cel(0).unwrap().image.get_pixel(1, 1), Color::rgb(1, 2, 3));
    doc.redo().unwrap();
    assert_eq!(doc.layer(0).unwrap().cel(0).unwrap().image.get_pixel(1, 1), Color::WHITE);
}

#[test]
fn test_commit_outside_cel_expands_it() {
    let mut doc = document_with_cel();
    {
        let mut canvas = ExpandCelCanvas::new(&mut doc, Some(0), 0).unwrap();
        canvas.dest_mut().put_pixel(10, 12, Color::WHITE);
        canvas.commit(&Region::from_rect(Rectangle::from(10, 12, 1, 1))).unwrap();
    }
    let cel = doc.layer(0).unwrap().cel(0).unwrap();
    assert_eq!(cel.bounds(), Rectangle::from(2, 2, 9, 11));
    assert_eq!(cel.image.get_pixel(0, 0), Color::rgb(1, 2, 3));
    assert_eq!(cel.image.get_pixel(8, 10), Color::WHITE);

    doc.undo().unwrap();
    assert_eq!(doc.layer(0).unwrap().cel(0).unwrap().bounds(), Rectangle::from(2, 2, 4, 4));
}

#[test]
fn test_rollback_restores_dest() {
    let mut doc = document_with_cel();
    let mut canvas = ExpandCelCanvas::new(&mut doc, Some(0), 0).unwrap();
    let before = canvas.dest().clone();
    canvas.dest_mut().fill(Color::WHITE);
    canvas.rollback();
    assert_eq!(canvas.dest(), &before);
}

#[test]
fn test_resource_checks() {
    let mut doc = document_with_cel();
    doc.add_layer(Layer::new("hidden").with_visible(false));
    doc.add_layer(Layer::new("locked").with_editable(false));

    assert!(doc.check_editable(Some(0), 0).is_ok());
    assert!(matches!(doc.check_editable(None, 0), Err(EngineError::NoActiveLayer)));
    assert!(matches!(doc.check_editable(Some(1), 0), Err(EngineError::LayerHidden { .. })));
    assert!(matches!(doc.check_editable(Some(2), 0), Err(EngineError::LayerLocked { .. })));
    assert!(matches!(doc.check_editable(Some(0), 3), Err(EngineError::InvalidFrame { frame: 3 })));

    doc.set_locked(true);
    assert!(matches!(doc.check_editable(Some(0), 0), Err(EngineError::DocumentLocked)));
}

#[test]
fn test_canvas_too_large() {
    let mut doc = Document::new(100_000, 100_000);
    doc.add_layer(Layer::new("Layer 1"));
    assert!(matches!(
        ExpandCelCanvas::new(&mut doc, Some(0), 0),
        Err(EngineError::CanvasTooLarge { .. })
    ));
}

#[test]
fn test_replace_mask_regenerates_boundaries() {
    let mut doc = document_with_cel();
    let mut mask = Mask::new(16, 16);
    mask.add_rect(Rectangle::from(1, 1, 2, 2));
    {
        let mut canvas = ExpandCelCanvas::new(&mut doc, None, 0).unwrap();
        canvas.replace_mask(mask).unwrap();
    }
    assert!(doc.is_mask_visible());
    assert_eq!(doc.mask_boundaries().len(), 8);
    doc.undo().unwrap();
    assert!(!doc.is_mask_visible());
    assert!(doc.mask_boundaries().is_empty());
}

#[test]
fn test_preview_canvas_writes_through() {
    let mut buffer = Image::new(8, 8);
    {
        let mut canvas = PreviewCanvas::new(&mut buffer);
        canvas.dest_mut().put_pixel(1, 1, Color::WHITE);
        canvas.commit(&Region::from_rect(Rectangle::from(1, 1, 1, 1))).unwrap();
    }
    assert_eq!(buffer.get_pixel(1, 1), Color::WHITE);
}
