//! Error codes for the diagnostic system.
//!
//! Codes are grouped by phase:
//! - `E1xx` - Parse errors (a line matched no grammar)
//! - `E2xx` - Compile errors (the diagram could not use part of the description)

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Parse Errors (E1xx)
    // =========================================================================
    /// Invalid component declaration.
    ///
    /// A line without `->` is neither `<type> <id>` nor
    /// `<type> <id> at (<x>, <y>)`.
    E100,

    /// Invalid connection.
    ///
    /// A line containing `->` is not `<component>.<pin> -> <component>.<pin>`.
    E101,

    // =========================================================================
    // Compile Errors (E2xx)
    // =========================================================================
    /// Unknown component type.
    ///
    /// The declared type has no entry in the component catalogue.
    E200,

    /// Unknown component.
    ///
    /// A connection references a component id that was never placed.
    E201,

    /// Unknown pin.
    ///
    /// A connection references a pin the component type does not have.
    E202,

    /// Component artwork could not be loaded.
    E203,

    /// Duplicate component id.
    ///
    /// A later declaration reuses an id and replaces the earlier placement.
    E204,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "invalid component declaration",
            ErrorCode::E101 => "invalid connection",
            ErrorCode::E200 => "unknown component type",
            ErrorCode::E201 => "unknown component",
            ErrorCode::E202 => "unknown pin",
            ErrorCode::E203 => "artwork load failure",
            ErrorCode::E204 => "duplicate component id",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
