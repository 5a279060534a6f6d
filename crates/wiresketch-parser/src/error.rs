//! Diagnostics for circuit descriptions.
//!
//! Problems found while parsing or compiling a description are reported as
//! [`Diagnostic`]s: a severity, an [`ErrorCode`], a message, labeled source
//! spans and optional help text. Parsing never stops at the first problem;
//! diagnostics are accumulated and can be wrapped in a [`ParseError`] by
//! callers that want to fail on them.
//!
//! # Example
//!
//! ```
//! # use wiresketch_parser::error::{Diagnostic, ErrorCode};
//! # use wiresketch_parser::Span;
//!
//! let diag = Diagnostic::error("invalid component declaration")
//!     .with_code(ErrorCode::E100)
//!     .with_line(3, "led l1 at (10)")
//!     .with_label(Span::new(20..34), "expected `<type> <id>` or `<type> <id> at (<x>, <y>)`");
//!
//! assert_eq!(diag.line(), Some(3));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::{Diagnostic, SourceLine};
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
