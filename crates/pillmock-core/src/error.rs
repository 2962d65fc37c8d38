use std::io;

use thiserror::Error;

/// Errors raised by the mock layout model and the procedures built on it.
#[derive(Error, Debug)]
pub enum MockError {
    #[error("Malformed layer map line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Cell '{0}' not found")]
    CellNotFound(String),

    #[error("Parameter '{parameter}' expects {expected}, got {found}")]
    TypeMismatch {
        parameter: String,
        expected: &'static str,
        found: String,
    },

    #[error("Layer '{0}' is not defined in the layer map")]
    UnknownLayer(String),

    #[error("Unknown procedure '{0}'")]
    UnknownProcedure(String),

    #[error("Procedure '{procedure}' is missing argument {index}")]
    MissingArgument { procedure: String, index: usize },

    #[error("Format error: {0}")]
    Format(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
