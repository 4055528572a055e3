//! Error types for cuegraph operations.
//!
//! This module provides the main error type [`CueGraphError`] which wraps
//! the error conditions that can occur while converting a SoundCue export.

use std::io;

use thiserror::Error;

use cuegraph_parser::error::ParseError;

/// The main error type for cuegraph operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the parser's diagnostics together with the
/// source text they point into, so callers can render labeled reports.
#[derive(Debug, Error)]
pub enum CueGraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for CueGraphError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl CueGraphError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
