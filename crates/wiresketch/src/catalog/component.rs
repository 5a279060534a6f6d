//! Component type metadata and its JSON definition format.
//!
//! A definition file looks like:
//!
//! ```json
//! {
//!   "id": "led",
//!   "name": "LED (5 mm)",
//!   "width": 60,
//!   "height": 100,
//!   "image": "led.svg",
//!   "pins": [
//!     { "name": "ANODE", "number": 1, "x": 21.5, "y": 95, "type": "anode" }
//!   ]
//! }
//! ```
//!
//! An optional `footprint` (`{ "width": .., "height": .. }`) sets the on-canvas
//! size for definitions drawn in a larger native coordinate space.

use std::collections::HashSet;

use serde::Deserialize;

use wiresketch_core::geometry::{Point, Size};

use super::CatalogError;

/// A connection point on a component, in the component's native coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    name: String,
    number: Option<u32>,
    position: Point,
    kind: Option<String>,
}

impl Pin {
    pub fn new(name: impl Into<String>, number: Option<u32>, position: Point) -> Self {
        Self {
            name: name.into(),
            number,
            position,
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical pin number, usable as an alias for the name.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Free-form classification such as `power`, `ground` or `gpio`.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

/// Where a component type's artwork comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drawing {
    /// SVG markup compiled into the catalogue.
    Inline(&'static str),
    /// An asset locator, fetched from the catalogue source on demand.
    External(String),
}

/// Static metadata for one kind of component.
#[derive(Debug, Clone)]
pub struct ComponentType {
    id: String,
    name: Option<String>,
    size: Size,
    footprint: Option<Size>,
    pins: Vec<Pin>,
    drawing: Drawing,
}

impl ComponentType {
    /// Creates a component type, validating its size and pins.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidDefinition`] when the size or footprint
    /// is not positive, or when two pins share a `(name, number)` pair.
    pub fn new(
        id: impl Into<String>,
        size: Size,
        pins: Vec<Pin>,
        drawing: Drawing,
    ) -> Result<Self, CatalogError> {
        let id = id.into();
        if !size.is_positive() {
            return Err(CatalogError::invalid(&id, "width and height must be positive"));
        }

        let mut seen = HashSet::new();
        for pin in &pins {
            if !seen.insert((pin.name.as_str(), pin.number)) {
                return Err(CatalogError::invalid(
                    &id,
                    format!("pin `{}` is defined more than once", pin.name),
                ));
            }
        }

        Ok(Self {
            id,
            name: None,
            size,
            footprint: None,
            pins,
            drawing,
        })
    }

    /// Sets a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the on-canvas size.
    pub fn with_footprint(mut self, footprint: Size) -> Result<Self, CatalogError> {
        if !footprint.is_positive() {
            return Err(CatalogError::invalid(&self.id, "footprint must be positive"));
        }
        self.footprint = Some(footprint);
        Ok(self)
    }

    /// The definition id, shared by every key the type is registered under.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Native size, the coordinate space of the pins.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Size on the canvas. Defaults to the native size.
    pub fn footprint(&self) -> Size {
        self.footprint.unwrap_or(self.size)
    }

    /// Horizontal and vertical factors mapping native coordinates to the
    /// footprint.
    pub fn scale(&self) -> (f32, f32) {
        let footprint = self.footprint();
        (
            footprint.width() / self.size.width(),
            footprint.height() / self.size.height(),
        )
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Looks up a pin by exact name, then by number when `token` is the
    /// number written in plain decimal (`5`, not `05` or `+5`).
    pub fn pin(&self, token: &str) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.name == token).or_else(|| {
            self.pins
                .iter()
                .find(|pin| pin.number.is_some_and(|number| number.to_string() == token))
        })
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }
}

#[derive(Debug, Deserialize)]
struct SizeDefinition {
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
struct PinDefinition {
    name: String,
    #[serde(default)]
    number: Option<u32>,
    x: f32,
    y: f32,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// The on-disk JSON form of a component type.
#[derive(Debug, Deserialize)]
pub(super) struct Definition {
    id: String,
    #[serde(default)]
    name: Option<String>,
    width: f32,
    height: f32,
    #[serde(default)]
    footprint: Option<SizeDefinition>,
    image: String,
    #[serde(default)]
    pins: Vec<PinDefinition>,
}

impl Definition {
    pub(super) fn decode(locator: &str, text: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(text).map_err(|source| CatalogError::Decode {
            locator: locator.to_string(),
            source,
        })
    }

    pub(super) fn id(&self) -> &str {
        &self.id
    }

    /// Builds the component type, using `inline` artwork when there is some
    /// and the definition's `image` asset otherwise.
    pub(super) fn into_component_type(
        self,
        inline: Option<&'static str>,
    ) -> Result<ComponentType, CatalogError> {
        let drawing = match inline {
            Some(markup) => Drawing::Inline(markup),
            None => Drawing::External(self.image),
        };

        let pins = self
            .pins
            .into_iter()
            .map(|pin| {
                let mut built = Pin::new(pin.name, pin.number, Point::new(pin.x, pin.y));
                built.kind = pin.kind;
                built
            })
            .collect();

        let mut component =
            ComponentType::new(self.id, Size::new(self.width, self.height), pins, drawing)?;
        component.name = self.name;
        if let Some(footprint) = self.footprint {
            component = component.with_footprint(Size::new(footprint.width, footprint.height))?;
        }
        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    fn two_pin(drawing: Drawing) -> ComponentType {
        ComponentType::new(
            "resistor",
            Size::new(100.0, 40.0),
            vec![
                Pin::new("PIN1", Some(1), Point::new(5.0, 20.0)),
                Pin::new("PIN2", Some(2), Point::new(95.0, 20.0)),
            ],
            drawing,
        )
        .unwrap()
    }

    #[test]
    fn test_pin_lookup_by_name_and_number() {
        let component = two_pin(Drawing::External("resistor.svg".to_string()));

        assert_eq!(component.pin("PIN2").unwrap().number(), Some(2));
        assert_eq!(component.pin("1").unwrap().name(), "PIN1");
        assert!(component.pin("PIN3").is_none());
        assert!(component.pin("3").is_none());
        assert!(component.pin("pin1").is_none());
        assert!(component.pin("01").is_none());
        assert!(component.pin("+1").is_none());
    }

    #[test]
    fn test_pin_lookup_prefers_name() {
        let component = ComponentType::new(
            "odd",
            Size::new(10.0, 10.0),
            vec![
                Pin::new("A", Some(2), Point::new(1.0, 1.0)),
                Pin::new("2", None, Point::new(9.0, 9.0)),
            ],
            Drawing::Inline("<svg/>"),
        )
        .unwrap();

        assert_eq!(component.pin("2").unwrap().position(), Point::new(9.0, 9.0));
    }

    #[test]
    fn test_duplicate_pins_rejected() {
        let result = ComponentType::new(
            "bad",
            Size::new(10.0, 10.0),
            vec![
                Pin::new("GND", Some(6), Point::default()),
                Pin::new("GND", Some(6), Point::default()),
            ],
            Drawing::Inline("<svg/>"),
        );
        assert!(matches!(result, Err(CatalogError::InvalidDefinition { .. })));

        // Same name, different number is fine
        let result = ComponentType::new(
            "header",
            Size::new(10.0, 10.0),
            vec![
                Pin::new("GND", Some(6), Point::default()),
                Pin::new("GND", Some(9), Point::default()),
            ],
            Drawing::Inline("<svg/>"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_non_positive_size_rejected() {
        let result = ComponentType::new("flat", Size::new(10.0, 0.0), vec![], Drawing::Inline(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_scale_defaults_to_one() {
        let component = two_pin(Drawing::Inline("<svg/>"));
        assert_eq!(component.scale(), (1.0, 1.0));
        assert_eq!(component.footprint(), component.size());
    }

    #[test]
    fn test_decode_with_footprint() {
        let json = r#"{
            "id": "board",
            "width": 5000,
            "height": 3500,
            "footprint": { "width": 600, "height": 400 },
            "image": "board.svg",
            "pins": [{ "name": "L+", "x": 200, "y": 400, "type": "power" }]
        }"#;

        let component = Definition::decode("board.json", json)
            .unwrap()
            .into_component_type(None)
            .unwrap();

        let (sx, sy) = component.scale();
        assert!(approx_eq!(f32, sx, 0.12, ulps = 4));
        assert!(approx_eq!(f32, sy, 400.0 / 3500.0, ulps = 4));
        assert_eq!(component.drawing(), &Drawing::External("board.svg".to_string()));
        assert_eq!(component.pins()[0].kind(), Some("power"));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            Definition::decode("x.json", "{ not json"),
            Err(CatalogError::Decode { .. })
        ));
        assert!(matches!(
            Definition::decode("x.json", r#"{ "id": "x", "width": 1, "height": 1 }"#),
            Err(CatalogError::Decode { .. })
        ));
    }
}
