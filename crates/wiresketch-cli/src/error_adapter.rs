//! Converts wiresketch errors and diagram issues into miette reports.
//!
//! Every message the CLI prints goes through [`Reportable`]: a parse failure
//! becomes one report per malformed line, a diagram issue becomes one report
//! with its own severity, and any other error becomes a single plain report.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use wiresketch::WiresketchError;
use wiresketch_parser::error::{Diagnostic, Severity};

/// A message ready for miette's graphical handler.
///
/// Diagnostics keep their labels and borrow the description text so the
/// offending line is shown; plain errors carry only a message and a code.
#[derive(Debug)]
pub struct Reportable<'a> {
    message: String,
    code: Option<String>,
    severity: MietteSeverity,
    help: Option<&'a str>,
    labels: Vec<LabeledSpan>,
    src: Option<&'a str>,
}

impl<'a> Reportable<'a> {
    fn from_diagnostic(diag: &'a Diagnostic, src: &'a str) -> Self {
        let labels = diag
            .labels()
            .iter()
            .map(|label| {
                let span = SourceSpan::new(label.span().start().into(), label.span().len());
                let message = Some(label.message().to_string());
                if label.is_primary() {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                }
            })
            .collect();

        Self {
            message: diag.message().to_string(),
            code: diag.code().map(|code| code.to_string()),
            severity: severity(diag.severity()),
            help: diag.help(),
            labels,
            src: Some(src),
        }
    }

    fn from_error(err: &WiresketchError) -> Self {
        let code = match err {
            WiresketchError::Io(_) => "wiresketch::io",
            WiresketchError::Parse { .. } => "wiresketch::parse",
            WiresketchError::Config(_) => "wiresketch::config",
            WiresketchError::Export(_) => "wiresketch::export",
        };

        Self {
            message: err.to_string(),
            code: Some(code.to_string()),
            severity: MietteSeverity::Error,
            help: None,
            labels: Vec::new(),
            src: None,
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Reportable<'_> {}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(self.severity)
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.help.map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

fn severity(severity: Severity) -> MietteSeverity {
    match severity {
        Severity::Error => MietteSeverity::Error,
        Severity::Warning => MietteSeverity::Warning,
    }
}

/// One report per diagnostic for a parse failure, a single report otherwise.
pub fn to_reportables(err: &WiresketchError) -> Vec<Reportable<'_>> {
    match err {
        WiresketchError::Parse {
            err: parse_err,
            src,
        } => issue_reportables(parse_err.diagnostics(), src),
        _ => vec![Reportable::from_error(err)],
    }
}

/// Wraps diagnostics that did not stop the run, such as lines skipped in
/// lenient mode or connections the diagram could not draw.
pub fn issue_reportables<'a>(issues: &'a [Diagnostic], src: &'a str) -> Vec<Reportable<'a>> {
    issues
        .iter()
        .map(|diag| Reportable::from_diagnostic(diag, src))
        .collect()
}

/// Renders a reportable with miette's graphical handler.
pub fn render(reportable: &Reportable<'_>) -> String {
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    if reporter.render_report(&mut writer, reportable).is_err() {
        writer = reportable.to_string();
    }
    writer
}
