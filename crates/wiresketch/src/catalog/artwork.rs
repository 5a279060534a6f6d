//! Component artwork: inline SVG markup bundled with the catalogue, and the
//! inspection of SVG documents into embeddable content.

use super::CatalogError;

/// Inline artwork keyed by definition id.
const INLINE_ARTWORK: &[(&str, &str)] = &[
    ("breadboard", include_str!("../../components/artwork/breadboard.svg")),
    ("dht11", include_str!("../../components/artwork/dht11.svg")),
    ("led", include_str!("../../components/artwork/led.svg")),
    ("resistor", include_str!("../../components/artwork/resistor.svg")),
];

/// Returns the inline markup registered for a definition id.
pub(super) fn inline_artwork(definition_id: &str) -> Option<&'static str> {
    INLINE_ARTWORK
        .iter()
        .find(|(id, _)| *id == definition_id)
        .map(|(_, markup)| *markup)
}

/// The drawable content of an SVG document.
///
/// `content` is the raw markup of the root element's children, ready to be
/// placed inside another `<svg>` element. Prefixed namespaces declared on the
/// root travel with it so the children stay well-formed once embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    view_box: Option<String>,
    namespaces: Vec<(String, String)>,
    content: String,
}

impl Artwork {
    /// Parses an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Artwork`] if the text is not well-formed XML
    /// or its root element is not `<svg>`.
    pub fn parse(locator: &str, text: &str) -> Result<Self, CatalogError> {
        let artwork_error = |message: String| CatalogError::Artwork {
            locator: locator.to_string(),
            message,
        };

        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)
            .map_err(|err| artwork_error(err.to_string()))?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(artwork_error(format!(
                "expected an <svg> root element, found <{}>",
                root.tag_name().name()
            )));
        }

        let view_box = root.attribute("viewBox").map(str::to_string);
        let namespaces = root
            .namespaces()
            .filter_map(|ns| match ns.name() {
                Some("xml") | None => None,
                Some(prefix) => Some((prefix.to_string(), ns.uri().to_string())),
            })
            .collect();
        let content = match (root.first_child(), root.last_child()) {
            (Some(first), Some(last)) => text[first.range().start..last.range().end].to_string(),
            _ => String::new(),
        };

        Ok(Self {
            view_box,
            namespaces,
            content,
        })
    }

    /// The root element's `viewBox`, if it has one.
    pub fn view_box(&self) -> Option<&str> {
        self.view_box.as_deref()
    }

    /// `(prefix, uri)` pairs of the root's prefixed namespace declarations.
    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
