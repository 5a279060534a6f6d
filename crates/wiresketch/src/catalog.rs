//! The component catalogue.
//!
//! A [`Catalog`] maps type keys (`led`, `rpi`, ...) to shared, immutable
//! [`ComponentType`] metadata. It starts empty and is filled by
//! [`Catalog::load`], which walks a [`Manifest`] and reads each definition
//! through a [`CatalogSource`]. A definition that cannot be read, decoded or
//! validated is logged and skipped; the rest of the manifest still loads.
//!
//! # Example
//!
//! ```
//! # use wiresketch::catalog::{BundledSource, Catalog, Manifest};
//! let mut catalog = Catalog::new(BundledSource);
//! assert!(!catalog.is_ready());
//!
//! catalog.load(&Manifest::builtin());
//! assert!(catalog.is_ready());
//! assert_eq!(catalog.get_pin("led", "ANODE").unwrap().number(), Some(1));
//! assert_eq!(catalog.get_pin("rpi", "11").unwrap().name(), "GPIO17");
//! ```

mod artwork;
mod component;
mod manifest;
mod source;

pub use artwork::Artwork;
pub use component::{ComponentType, Drawing, Pin};
pub use manifest::{Manifest, ManifestEntry};
pub use source::{BundledSource, CatalogSource, DirectorySource};

use std::{collections::HashMap, io, sync::Arc};

use indexmap::IndexMap;
use log::{debug, info, warn};
use thiserror::Error;

use wiresketch_core::geometry::Size;

use component::Definition;

/// Directory, relative to the source root, that external artwork lives in.
const ASSET_DIR: &str = "assets";

/// Errors raised while loading catalogue definitions or artwork.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("`{0}` not found")]
    NotFound(String),

    #[error("failed to read `{locator}`: {source}")]
    Io {
        locator: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode `{locator}`: {source}")]
    Decode {
        locator: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid component definition `{id}`: {message}")]
    InvalidDefinition { id: String, message: String },

    #[error("invalid artwork `{locator}`: {message}")]
    Artwork { locator: String, message: String },
}

impl CatalogError {
    fn invalid(id: &str, message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            id: id.to_string(),
            message: message.into(),
        }
    }
}

/// Component metadata registry.
#[derive(Debug)]
pub struct Catalog {
    source: Box<dyn CatalogSource>,
    types: IndexMap<String, Arc<ComponentType>>,
    ready: bool,
}

impl Catalog {
    /// Creates an empty catalogue reading from `source`.
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            types: IndexMap::new(),
            ready: false,
        }
    }

    /// A catalogue with the built-in manifest loaded from the bundled files.
    pub fn builtin() -> Self {
        let mut catalog = Self::new(BundledSource);
        catalog.load(&Manifest::builtin());
        catalog
    }

    /// Loads every manifest entry in order and marks the catalogue ready.
    ///
    /// Returns the number of keys registered by this call. Entries whose
    /// definition fails are logged and skipped. Loading again adds to (and
    /// may replace keys in) the existing registry.
    pub fn load(&mut self, manifest: &Manifest) -> usize {
        let mut decoded: HashMap<&str, Option<Arc<ComponentType>>> = HashMap::new();
        let mut registered = 0;

        for entry in manifest.entries() {
            let component = decoded
                .entry(entry.file())
                .or_insert_with(|| match self.load_definition(entry.file()) {
                    Ok(component) => Some(Arc::new(component)),
                    Err(err) => {
                        warn!(file = entry.file(), err:% = err; "Skipping component definition");
                        None
                    }
                })
                .clone();

            match component {
                Some(component) => {
                    debug!(
                        component_type = entry.key(),
                        definition = component.id();
                        "Registered component type"
                    );
                    self.types.insert(entry.key().to_string(), component);
                    registered += 1;
                }
                None => warn!(component_type = entry.key(); "Component type unavailable"),
            }
        }

        self.ready = true;
        info!(
            registered = registered,
            total = self.types.len(),
            failed = manifest.entries().len() - registered;
            "Component catalogue loaded"
        );
        registered
    }

    fn load_definition(&self, file: &str) -> Result<ComponentType, CatalogError> {
        let text = self.source.read(file)?;
        let definition = Definition::decode(file, &text)?;
        let inline = self.source.inline_artwork(definition.id());
        definition.into_component_type(inline)
    }

    /// Registers an already-built component type under `key`.
    pub fn insert(&mut self, key: impl Into<String>, component: ComponentType) {
        self.types.insert(key.into(), Arc::new(component));
    }

    /// Whether [`load`](Self::load) has completed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn get_type(&self, key: &str) -> Option<Arc<ComponentType>> {
        self.types.get(key).cloned()
    }

    /// Looks up a pin of a type by name, or by number when `token` is an
    /// unsigned integer.
    pub fn get_pin(&self, key: &str, token: &str) -> Option<&Pin> {
        self.types.get(key)?.pin(token)
    }

    /// Native size of a type.
    pub fn get_size(&self, key: &str) -> Option<Size> {
        self.types.get(key).map(|component| component.size())
    }

    /// Registered keys in load order.
    pub fn list_types(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// Reads and parses the artwork of a component type.
    ///
    /// # Errors
    ///
    /// Returns the source error when an external asset cannot be read, or
    /// [`CatalogError::Artwork`] when the markup is not a usable SVG.
    pub fn load_artwork(&self, component: &ComponentType) -> Result<Artwork, CatalogError> {
        match component.drawing() {
            Drawing::Inline(markup) => Artwork::parse(component.id(), markup),
            Drawing::External(locator) => {
                let locator = format!("{ASSET_DIR}/{locator}");
                let text = self.source.read(&locator)?;
                Artwork::parse(&locator, &text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use wiresketch_core::geometry::Point;

    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();

        assert!(catalog.is_ready());
        assert_eq!(
            catalog.list_types(),
            vec![
                "raspberrypi",
                "raspberry-pi-3",
                "rpi",
                "breadboard",
                "bb",
                "dht11",
                "led",
                "resistor"
            ]
        );
    }

    #[test]
    fn test_aliases_share_definition() {
        let catalog = Catalog::builtin();

        let rpi = catalog.get_type("rpi").unwrap();
        let raspberrypi = catalog.get_type("raspberrypi").unwrap();
        assert!(Arc::ptr_eq(&rpi, &raspberrypi));
        assert_eq!(rpi.id(), "raspberry-pi-3");
    }

    #[test]
    fn test_lookups() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.get_size("led"), Some(Size::new(60.0, 100.0)));
        assert_eq!(catalog.get_size("relay"), None);
        assert_eq!(
            catalog.get_pin("led", "CATHODE").unwrap().position(),
            Point::new(38.5, 90.0)
        );
        assert_eq!(catalog.get_pin("dht11", "2").unwrap().name(), "DATA");
        assert!(catalog.get_pin("led", "GATE").is_none());
        assert!(catalog.get_pin("relay", "1").is_none());
    }

    #[test]
    fn test_raspberry_pi_header() {
        let catalog = Catalog::builtin();
        let rpi = catalog.get_type("rpi").unwrap();

        assert_eq!(rpi.pins().len(), 40);
        assert_eq!(catalog.get_pin("rpi", "GPIO17").unwrap().number(), Some(11));
        // First pin carrying a repeated name wins
        assert_eq!(catalog.get_pin("rpi", "GND").unwrap().number(), Some(6));
        assert_eq!(catalog.get_pin("rpi", "39").unwrap().name(), "GND");
    }

    #[test]
    fn test_breadboard_footprint() {
        let catalog = Catalog::builtin();
        let breadboard = catalog.get_type("bb").unwrap();

        assert_eq!(breadboard.footprint(), Size::new(600.0, 400.0));
        assert!(breadboard.pin("L+").is_some());
        assert!(breadboard.pin("30j").is_some());
    }

    #[test]
    fn test_load_artwork() {
        let catalog = Catalog::builtin();

        let led = catalog.get_type("led").unwrap();
        assert!(matches!(led.drawing(), Drawing::Inline(_)));
        let artwork = catalog.load_artwork(&led).unwrap();
        assert_eq!(artwork.view_box(), Some("0 0 60 100"));

        let rpi = catalog.get_type("rpi").unwrap();
        assert_eq!(rpi.drawing(), &Drawing::External("raspberry-pi-3.svg".to_string()));
        let artwork = catalog.load_artwork(&rpi).unwrap();
        assert_eq!(artwork.view_box(), Some("0 0 340 220"));
        assert!(artwork.content().contains("id=\"pin-40\""));
    }

    #[test]
    fn test_partial_failure_keeps_loading() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("relay.json"),
            r#"{ "id": "relay", "width": 40, "height": 30, "image": "relay.svg",
                 "pins": [{ "name": "COIL", "number": 1, "x": 0, "y": 15 }] }"#,
        )
        .unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();

        let manifest = Manifest::new(vec![
            ManifestEntry::new("broken", "broken.json"),
            ManifestEntry::new("missing", "missing.json"),
            ManifestEntry::new("relay", "relay.json"),
        ]);

        let mut catalog = Catalog::new(DirectorySource::new(dir.path()));
        assert_eq!(catalog.load(&manifest), 1);
        assert!(catalog.is_ready());
        assert_eq!(catalog.list_types(), vec!["relay"]);

        let relay = catalog.get_type("relay").unwrap();
        assert!(matches!(
            catalog.load_artwork(&relay),
            Err(CatalogError::NotFound(locator)) if locator == "assets/relay.svg"
        ));
    }

    #[test]
    fn test_total_failure_is_empty_but_ready() {
        let mut catalog = Catalog::new(DirectorySource::new("/nonexistent/wiresketch"));
        assert_eq!(catalog.load(&Manifest::builtin()), 0);
        assert!(catalog.is_ready());
        assert!(catalog.list_types().is_empty());
    }
}
