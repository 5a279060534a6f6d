//! The core diagnostic type.
//!
//! A [`Diagnostic`] is a single error or warning with an optional error code,
//! the description line it came from, labeled source spans and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A description line a diagnostic refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    number: usize,
    text: String,
}

impl SourceLine {
    /// The 1-based line number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// The raw, untrimmed text of the line.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E101]: invalid connection
///   --> circuit.txt:4:1
///    |
///  4 | l1.ANODE => r1.PIN1
///    | ^^^^^^^^^^^^^^^^^^^ expected `<component>.<pin> -> <component>.<pin>`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    line: Option<SourceLine>,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use wiresketch_parser::error::{Diagnostic, ErrorCode};
    /// # use wiresketch_parser::Span;
    ///
    /// let diag = Diagnostic::error("unknown component type `relay`")
    ///     .with_code(ErrorCode::E200)
    ///     .with_label(Span::new(0..8), "not in the component catalogue");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the 1-based number of the offending line, if known.
    pub fn line(&self) -> Option<usize> {
        self.line.as_ref().map(SourceLine::number)
    }

    /// Get the raw text of the offending line, if known.
    pub fn line_text(&self) -> Option<&str> {
        self.line.as_ref().map(SourceLine::text)
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Record the description line this diagnostic refers to.
    pub fn with_line(mut self, number: usize, text: impl Into<String>) -> Self {
        self.line = Some(SourceLine {
            number,
            text: text.into(),
        });
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            line: None,
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E100]: message (line 3)"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(line) = &self.line {
            write!(f, " (line {})", line.number)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
