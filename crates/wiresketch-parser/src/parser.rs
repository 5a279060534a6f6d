//! Line-oriented description parsing.
//!
//! Each line is trimmed and classified: blank lines and `#` comments are
//! skipped, a line containing `->` is a connection, anything else is a
//! declaration. Lines that match no grammar become diagnostics and parsing
//! carries on with the next line.

use log::{debug, trace};

use crate::{
    ast::{Connection, Declaration, Description, Endpoint},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    grammar,
    span::Span,
};

const DECLARATION_FORMS: &str = "expected `<type> <id>` or `<type> <id> at (<x>, <y>)`";
const CONNECTION_FORM: &str = "expected `<component>.<pin> -> <component>.<pin>`";

/// The kind of a trimmed description line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Comment,
    Connection,
    Declaration,
}

impl LineKind {
    fn classify(trimmed: &str) -> Self {
        if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with('#') {
            LineKind::Comment
        } else if trimmed.contains("->") {
            LineKind::Connection
        } else {
            LineKind::Declaration
        }
    }
}

/// One source line with its position in the text.
struct SourceLine<'s> {
    number: usize,
    raw: &'s str,
    trimmed: &'s str,
    span: Span,
}

/// Split `text` on `\n`, tracking 1-based line numbers and the byte span of
/// each trimmed line.
fn source_lines(text: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    text.split('\n').enumerate().map(move |(index, raw)| {
        let start = offset;
        offset += raw.len() + 1;

        let leading = raw.len() - raw.trim_start().len();
        let trimmed = raw.trim();
        let span_start = start + leading;
        SourceLine {
            number: index + 1,
            raw,
            trimmed,
            span: Span::new(span_start..span_start + trimmed.len()),
        }
    })
}

fn parse_declaration(line: &SourceLine<'_>) -> Result<Declaration, Diagnostic> {
    let raw = grammar::declaration(line.trimmed).ok_or_else(|| {
        Diagnostic::error("invalid component declaration")
            .with_code(ErrorCode::E100)
            .with_line(line.number, line.raw)
            .with_label(line.span, DECLARATION_FORMS)
            .with_help("coordinates are non-negative integers, e.g. `led l1 at (100, 50)`")
    })?;

    Ok(Declaration::new(raw.type_name, raw.id, raw.position).with_location(line.number, line.span))
}

fn parse_connection(line: &SourceLine<'_>) -> Result<Connection, Diagnostic> {
    let raw = grammar::connection(line.trimmed).ok_or_else(|| {
        Diagnostic::error("invalid connection")
            .with_code(ErrorCode::E101)
            .with_line(line.number, line.raw)
            .with_label(line.span, CONNECTION_FORM)
    })?;

    let from = Endpoint::new(raw.from.0, raw.from.1);
    let to = Endpoint::new(raw.to.0, raw.to.1);
    Ok(Connection::new(from, to).with_location(line.number, line.span))
}

fn parse_lines(text: &str) -> (Description, DiagnosticCollector) {
    let mut description = Description::default();
    let mut collector = DiagnosticCollector::new();

    for line in source_lines(text) {
        let kind = LineKind::classify(line.trimmed);
        trace!(line = line.number, kind:? = kind; "Classified line");

        let result = match kind {
            LineKind::Blank | LineKind::Comment => continue,
            LineKind::Connection => parse_connection(&line).map(|c| description.push_connection(c)),
            LineKind::Declaration => {
                parse_declaration(&line).map(|d| description.push_component(d))
            }
        };
        if let Err(diagnostic) = result {
            debug!(line = line.number, text = line.trimmed; "Skipping malformed line");
            collector.emit(diagnostic);
        }
    }

    debug!(
        components = description.components().len(),
        connections = description.connections().len(),
        has_errors = collector.has_errors();
        "Parsed description"
    );
    (description, collector)
}

/// A reusable description parser.
///
/// The parser keeps the diagnostics of the most recent [`parse`](Self::parse)
/// call; each call replaces them.
///
/// # Example
///
/// ```
/// # use wiresketch_parser::Parser;
///
/// let mut parser = Parser::new();
/// let description = parser.parse("led l1\nled l2 at (10)\n");
///
/// assert_eq!(description.components().len(), 1);
/// assert!(parser.has_errors());
/// assert_eq!(parser.errors()[0].line(), Some(2));
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    errors: Vec<Diagnostic>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a description, keeping every well-formed line.
    ///
    /// Never fails; malformed lines are recorded in [`errors`](Self::errors).
    pub fn parse(&mut self, text: &str) -> Description {
        let (description, collector) = parse_lines(text);
        self.errors = collector.into_diagnostics();
        description
    }

    /// Diagnostics from the most recent parse, in line order.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Whether the most recent parse hit any malformed line.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|d| d.severity().is_error())
    }

    /// Take the diagnostics of the most recent parse, leaving none behind.
    pub fn take_errors(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.errors)
    }
}

/// Parse a description, failing if any line is malformed.
pub(crate) fn parse_strict(text: &str) -> Result<Description, ParseError> {
    let (description, collector) = parse_lines(text);
    collector.finish()?;
    Ok(description)
}
