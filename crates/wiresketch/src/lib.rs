//! Wiresketch - compile textual circuit descriptions into wiring diagrams
//!
//! A description names components by catalogue type, optionally places them,
//! and connects their pins:
//!
//! ```text
//! led l1
//! resistor r1 at (200, 50)
//! l1.ANODE -> r1.PIN1
//! ```
//!
//! [`DiagramBuilder`] runs the whole pipeline: parse, look up component
//! metadata in the [`catalog`], place components, route colored wires with the
//! [`router`], and export SVG.

pub mod catalog;
pub mod compile;
pub mod config;
pub mod export;
pub mod router;

mod error;

pub use wiresketch_core::{color, draw, geometry, identifier};
pub use wiresketch_parser::{Connection, Declaration, Description, Endpoint, Position, error::Diagnostic};

pub use error::WiresketchError;

use std::{path::Path, sync::Arc};

use log::{debug, info, trace, warn};

use catalog::{Catalog, DirectorySource};
use compile::{Diagram, DiagramCompiler, DiagramStyle, LayoutSettings};
use config::AppConfig;
use export::Exporter;
use router::WireRouter;

/// Builder for parsing and rendering circuit diagrams.
///
/// The builder owns one catalogue and one wire router. Rendering several
/// descriptions through the same builder keeps wire colors stable for
/// connections it has already seen.
///
/// # Examples
///
/// ```rust
/// use wiresketch::DiagramBuilder;
///
/// let mut builder = DiagramBuilder::default();
///
/// let description = builder
///     .parse("led l1\nresistor r1 at (200, 50)\nl1.ANODE -> r1.PIN1")
///     .expect("Failed to parse");
///
/// let diagram = builder.render(&description);
/// assert_eq!(diagram.component_count(), 2);
/// assert_eq!(diagram.wires().len(), 1);
///
/// let svg = diagram.to_svg_string();
/// assert!(svg.contains(r#"data-id="l1""#));
/// ```
#[derive(Debug)]
pub struct DiagramBuilder {
    config: AppConfig,
    compiler: DiagramCompiler,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// Component types come from `config.catalog().directory()` when set and
    /// from the bundled definitions otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`WiresketchError::Config`] for an invalid palette or style
    /// color.
    pub fn new(config: AppConfig) -> Result<Self, WiresketchError> {
        let manifest = config.catalog().manifest();
        let mut catalog = match config.catalog().directory() {
            Some(directory) => {
                info!(directory:% = directory.display(); "Loading component catalogue");
                Catalog::new(DirectorySource::new(directory))
            }
            None => {
                info!("Loading bundled component catalogue");
                Catalog::new(catalog::BundledSource)
            }
        };
        let registered = catalog.load(&manifest);
        if registered == 0 && !manifest.is_empty() {
            warn!("No component types could be loaded");
        }
        debug!(registered = registered; "Catalogue ready");

        let router = WireRouter::new(config.router().palette()?, config.router().routing());
        let style = DiagramStyle::from_config(&config).map_err(WiresketchError::Config)?;

        let compiler = DiagramCompiler::new(Arc::new(catalog), router)
            .with_layout(LayoutSettings::from(config.layout()))
            .with_style(style)
            .with_reset_assignments(config.router().reset_assignments());

        Ok(Self { config, compiler })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        self.compiler.catalog()
    }

    pub fn router(&self) -> &WireRouter {
        self.compiler.router()
    }

    /// Mutable access to the router, for example to switch the routing mode
    /// between renders.
    pub fn router_mut(&mut self) -> &mut WireRouter {
        self.compiler.router_mut()
    }

    /// Parse a description, failing on any malformed line.
    ///
    /// # Errors
    ///
    /// Returns [`WiresketchError::Parse`] carrying every diagnostic and the
    /// source text.
    pub fn parse(&self, source: &str) -> Result<Description, WiresketchError> {
        info!("Parsing circuit description");
        let description = wiresketch_parser::parse(source)
            .map_err(|err| WiresketchError::new_parse_error(err, source))?;
        debug!(
            components = description.components().len(),
            connections = description.connections().len();
            "Description parsed"
        );
        trace!(description:?; "Parsed description");
        Ok(description)
    }

    /// Parse a description, keeping the well-formed lines and returning
    /// diagnostics for the rest.
    pub fn parse_lenient(&self, source: &str) -> (Description, Vec<Diagnostic>) {
        let mut parser = wiresketch_parser::Parser::new();
        let description = parser.parse(source);
        let errors = parser.take_errors();
        if !errors.is_empty() {
            warn!(errors = errors.len(); "Skipped malformed lines");
        }
        (description, errors)
    }

    /// Compile a description into a diagram.
    pub fn render(&mut self, description: &Description) -> Diagram {
        self.compiler.render(description)
    }

    /// Compile a description and render it to an SVG string.
    pub fn render_svg(&mut self, description: &Description) -> String {
        let svg = self.render(description).to_svg_string();
        info!(bytes = svg.len(); "SVG rendered");
        svg
    }

    /// Compile a description and write it as an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`WiresketchError::Export`] if the file cannot be written.
    pub fn render_to_file(
        &mut self,
        description: &Description,
        path: impl AsRef<Path>,
    ) -> Result<Diagram, WiresketchError> {
        let diagram = self.render(description);
        export::svg::Svg::new(path.as_ref()).export_diagram(&diagram)?;
        Ok(diagram)
    }
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default()).expect("default configuration is valid")
    }
}
