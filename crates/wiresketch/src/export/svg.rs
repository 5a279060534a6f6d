//! SVG backend.
//!
//! The document always spans `100%` of its container; the canvas size only
//! sets the `viewBox`. Content is written bottom to top: background, then
//! component groups, then wires.

use std::{fs::File, io::Write, path::PathBuf};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use wiresketch_core::draw::{LayeredOutput, RenderLayer};

use super::{Error, Exporter};
use crate::compile::Diagram;

/// Builds the SVG document for a compiled diagram.
pub fn render_document(diagram: &Diagram) -> Document {
    let canvas = diagram.canvas();

    let mut output = LayeredOutput::new();
    let background = svg_element::Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", canvas.width())
        .set("height", canvas.height())
        .set("fill", diagram.style().background());
    output.add_to_layer(RenderLayer::Background, Box::new(background));
    output.merge(diagram.render_to_layers());

    debug!(nodes = output.len(); "Rendering SVG layers");

    output.render().into_iter().fold(
        Document::new()
            .set("width", "100%")
            .set("height", "100%")
            .set(
                "viewBox",
                format!("0 0 {} {}", canvas.width(), canvas.height()),
            ),
        |doc, node| doc.add(node),
    )
}

/// Writes diagrams as SVG files.
#[derive(Debug)]
pub struct Svg {
    file_name: PathBuf,
}

impl Svg {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &std::path::Path {
        &self.file_name
    }

    /// Writes an SVG document to the output file.
    pub fn write_document(&self, doc: &Document) -> Result<(), Error> {
        let file_name = self.file_name.display();
        info!(file_name:% = file_name; "Creating SVG file");

        let mut f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name:% = file_name, err:% = err; "Failed to create SVG file");
                return Err(Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name:% = file_name, err:% = err; "Failed to write SVG content");
            return Err(Error::Io(err));
        }

        info!(file_name:% = file_name; "SVG file written");
        Ok(())
    }
}

impl Exporter for Svg {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), Error> {
        self.write_document(&render_document(diagram))
    }
}
