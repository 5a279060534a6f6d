//! Error types for Wiresketch operations.

use std::io;

use thiserror::Error;

use wiresketch_parser::error::ParseError;

use crate::router::PaletteError;

/// The main error type for Wiresketch operations.
///
/// The `Parse` variant keeps the description source next to the diagnostics
/// so callers can render them with source snippets.
#[derive(Debug, Error)]
pub enum WiresketchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl WiresketchError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

impl From<PaletteError> for WiresketchError {
    fn from(err: PaletteError) -> Self {
        Self::Config(err.to_string())
    }
}
