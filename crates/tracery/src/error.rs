//! Error types for Tracery operations.
//!
//! This module provides the main error type [`TraceryError`] which wraps
//! the failures that can occur while registering a graph, running the layout
//! engine, or reading its output back.

use std::{io, ops::Range};

use thiserror::Error;

use tracery_core::identifier::IdentifierError;

/// The main error type for Tracery operations.
///
/// Any failure aborts the whole operation; no partial layout is ever returned.
#[derive(Debug, Error)]
pub enum TraceryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{message}")]
    Input {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Unknown node identifier `{0}`")]
    UnknownNode(String),

    #[error("Duplicate node identifier `{0}`")]
    DuplicateNode(String),

    #[error("Invalid node size {width}x{height}: dimensions must be positive")]
    InvalidSize { width: f64, height: f64 },

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Malformed plain output at line {line}: {message}")]
    Plain { line: usize, message: String },

    #[error("Layout error: {0}")]
    Layout(String),
}

impl TraceryError {
    /// Create a new `Input` error pointing into the given source text.
    pub fn new_input_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Input {
            message: message.into(),
            span,
            src: src.into(),
        }
    }

    pub(crate) fn plain(line: usize, message: impl Into<String>) -> Self {
        Self::Plain {
            line,
            message: message.into(),
        }
    }
}

impl From<IdentifierError> for TraceryError {
    fn from(err: IdentifierError) -> Self {
        match err {
            IdentifierError::Duplicate(id) => Self::DuplicateNode(id),
            IdentifierError::Unknown(id) => Self::UnknownNode(id),
            IdentifierError::InvalidIndex(index) => {
                Self::Layout(format!("invalid node index `{index}`"))
            }
        }
    }
}
