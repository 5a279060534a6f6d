//! CLI logic for the Wiresketch circuit diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use wiresketch::{DiagramBuilder, WiresketchError};

use error_adapter::{issue_reportables, render};

/// Run the Wiresketch CLI application
///
/// This function processes the input file through the Wiresketch pipeline
/// and writes the resulting SVG to the output file. Connections and
/// components the diagram could not use are reported as warnings.
///
/// # Errors
///
/// Returns `WiresketchError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors (unless `--lenient` is set)
/// - Export errors
pub fn run(args: &Args) -> Result<(), WiresketchError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(directory) = &args.components {
        app_config = app_config.with_catalog_directory(directory);
    }

    let mut builder = DiagramBuilder::new(app_config)?;

    if args.list_types {
        for key in builder.catalog().list_types() {
            let Some(component) = builder.catalog().get_type(key) else {
                continue;
            };
            println!(
                "{key:<16} {:<24} {} pins",
                component.name().unwrap_or(component.id()),
                component.pins().len()
            );
        }
        return Ok(());
    }

    let Some(input) = &args.input else {
        return Err(WiresketchError::Config(
            "an input file is required".to_string(),
        ));
    };

    info!(
        input_path = input,
        output_path = args.output;
        "Processing circuit description"
    );

    if let Some(routing) = &args.routing {
        builder
            .router_mut()
            .set_routing_mode_str(routing)
            .map_err(|err| WiresketchError::Config(err.to_string()))?;
    }

    let source = fs::read_to_string(input)?;

    let description = if args.lenient {
        let (description, errors) = builder.parse_lenient(&source);
        report_issues(&errors, &source);
        description
    } else {
        builder.parse(&source)?
    };

    let diagram = builder.render_to_file(&description, &args.output)?;
    report_issues(diagram.issues(), &source);

    info!(
        output_file = args.output,
        components = diagram.component_count(),
        wires = diagram.wires().len();
        "SVG exported successfully"
    );

    Ok(())
}

fn report_issues(issues: &[wiresketch::Diagnostic], source: &str) {
    for reportable in issue_reportables(issues, source) {
        warn!("{}", render(&reportable));
    }
}
