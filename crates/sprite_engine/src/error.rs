//! Error types for sprite_engine

use thiserror::Error;

/// Errors raised while checking out or committing an editable canvas
#[derive(Debug, Error)]
pub enum EngineError {
    // === Resource Errors ===
    #[error("There is no active layer")]
    NoActiveLayer,

    #[error("Layer '{name}' is hidden")]
    LayerHidden { name: String },

    #[error("Layer '{name}' is locked")]
    LayerLocked { name: String },

    #[error("The sprite is locked by another editor")]
    DocumentLocked,

    #[error("Canvas too large to edit: {width}x{height}")]
    CanvasTooLarge { width: i32, height: i32 },

    // === Lookup Errors ===
    #[error("Invalid frame: {frame}")]
    InvalidFrame { frame: usize },

    #[error("Invalid layer index: {index}")]
    InvalidLayer { index: usize },

    // === Undo Errors ===
    #[error("Nothing to {action}")]
    NothingTo { action: &'static str },
}

/// Result type alias for sprite_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
