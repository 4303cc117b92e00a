//! Error types for the tool pipeline

use sprite_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    // === Tool definition errors ===
    #[error("Failed to parse tool definitions: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Tool '{tool}' has no '{attribute}' attribute")]
    MissingAttribute { tool: String, attribute: &'static str },

    #[error("Invalid fill '{id}' in tool '{tool}'")]
    InvalidFill { tool: String, id: String },

    #[error("Invalid ink '{id}' in tool '{tool}'")]
    InvalidInk { tool: String, id: String },

    #[error("Invalid controller '{id}' in tool '{tool}'")]
    InvalidController { tool: String, id: String },

    #[error("Invalid point shape '{id}' in tool '{tool}'")]
    InvalidPointShape { tool: String, id: String },

    #[error("Invalid intertwiner '{id}' in tool '{tool}'")]
    InvalidIntertwine { tool: String, id: String },

    #[error("Invalid trace policy '{id}' in tool '{tool}'")]
    InvalidTracePolicy { tool: String, id: String },

    #[error("Tool '{id}' is defined twice")]
    DuplicateTool { id: String },

    #[error("Unknown tool '{id}'")]
    UnknownTool { id: String },

    // === Gesture start errors ===
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, ToolError>;
