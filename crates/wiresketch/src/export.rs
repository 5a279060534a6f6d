//! Export of compiled diagrams.
//!
//! The [`Exporter`] trait is the last step of the pipeline:
//!
//! ```text
//! Description text
//!     ↓ parse
//! Description
//!     ↓ compile (catalogue lookup, placement, routing)
//! Diagram
//!     ↓ export (this module)
//! Output file
//! ```
//!
//! [`svg`] is the only backend.

pub mod svg;

use crate::compile::Diagram;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports a compiled diagram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing the output fails.
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}
