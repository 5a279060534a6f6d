//! Wire color assignment and path routing.
//!
//! A [`WireRouter`] gives every connection a stable color and turns a pair of
//! absolute points into a [`Wire`]. Connections touching a power pin are red,
//! connections touching a ground pin are black, and every other connection
//! takes the next color of the signal [`Palette`]. Once a connection identity
//! has a color it keeps it, even across renders and routing mode changes.

use std::collections::HashMap;

use log::{debug, trace};
use thiserror::Error;

use wiresketch_core::{
    color::Color,
    draw::{ParseRoutingModeError, RoutingMode, Wire, WireDefinition, WirePath},
    geometry::Point,
};
use wiresketch_parser::Connection;

pub const POWER_COLOR: &str = "#ff0000";
pub const GROUND_COLOR: &str = "#000000";

/// Signal wire colors, in assignment order.
pub const DEFAULT_PALETTE: [&str; 12] = [
    "#4ecdc4", "#45b7d1", "#feca57", "#ff9ff3", "#54a0ff", "#48dbfb", "#1dd1a1", "#ffa502",
    "#ff6348", "#5f27cd", "#00d2d3", "#2ed573",
];

const POWER_MARKERS: [&str; 4] = ["+", "VCC", "3V3", "5V"];
const GROUND_MARKERS: [&str; 3] = ["-", "GND", "GROUND"];

fn power_color() -> Color {
    Color::new(POWER_COLOR).expect("power color is a valid hex color")
}

fn ground_color() -> Color {
    Color::new(GROUND_COLOR).expect("ground color is a valid hex color")
}

/// Errors building a custom [`Palette`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,

    #[error("invalid palette color `{color}`: {message}")]
    InvalidColor { color: String, message: String },

    #[error("palette color `{0}` is reserved for power or ground wires")]
    Reserved(String),
}

/// The electrical role of a connection, decided by its pin names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetKind {
    Power,
    Ground,
    Signal,
}

impl NetKind {
    /// Classifies a connection from its two pin tokens.
    ///
    /// Matching is a case-insensitive substring test; power markers win over
    /// ground markers.
    pub fn classify(from_pin: &str, to_pin: &str) -> Self {
        let pins = [from_pin.to_ascii_uppercase(), to_pin.to_ascii_uppercase()];
        let mentions = |markers: &[&str]| {
            pins.iter()
                .any(|pin| markers.iter().any(|marker| pin.contains(marker)))
        };

        if mentions(&POWER_MARKERS) {
            NetKind::Power
        } else if mentions(&GROUND_MARKERS) {
            NetKind::Ground
        } else {
            NetKind::Signal
        }
    }
}

/// An ordered, non-empty list of signal colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette from CSS color strings.
    ///
    /// # Errors
    ///
    /// Fails if the list is empty, a color does not parse, or a color equals
    /// the power or ground color.
    pub fn new<S: AsRef<str>>(colors: &[S]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }

        let reserved = [power_color().to_rgba8(), ground_color().to_rgba8()];
        let colors = colors
            .iter()
            .map(|color| {
                let color = color.as_ref();
                let parsed = Color::new(color).map_err(|message| PaletteError::InvalidColor {
                    color: color.to_string(),
                    message,
                })?;
                if reserved.contains(&parsed.to_rgba8()) {
                    return Err(PaletteError::Reserved(color.to_string()));
                }
                Ok(parsed)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color at `index`, wrapping around the palette.
    pub fn get(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(&DEFAULT_PALETTE).expect("default palette is valid")
    }
}

/// Assigns wire colors and builds wire drawables.
#[derive(Debug, Clone)]
pub struct WireRouter {
    palette: Palette,
    index: usize,
    mode: RoutingMode,
    assignments: HashMap<String, Color>,
    definition: WireDefinition,
    power: Color,
    ground: Color,
}

impl WireRouter {
    pub fn new(palette: Palette, mode: RoutingMode) -> Self {
        Self {
            palette,
            index: 0,
            mode,
            assignments: HashMap::new(),
            definition: WireDefinition::default(),
            power: power_color(),
            ground: ground_color(),
        }
    }

    /// Replaces the wire stroke and marker settings.
    pub fn with_definition(mut self, definition: WireDefinition) -> Self {
        self.definition = definition;
        self
    }

    pub fn routing_mode(&self) -> RoutingMode {
        self.mode
    }

    pub fn set_routing_mode(&mut self, mode: RoutingMode) {
        debug!(mode:% = mode; "Routing mode changed");
        self.mode = mode;
    }

    /// Sets the routing mode by name. An unknown name leaves the current mode
    /// in place.
    pub fn set_routing_mode_str(&mut self, name: &str) -> Result<(), ParseRoutingModeError> {
        let mode = name.parse()?;
        self.set_routing_mode(mode);
        Ok(())
    }

    /// Returns the color for a connection, assigning one on first sight.
    pub fn color_for(&mut self, connection: &Connection) -> Color {
        let key = connection.to_string();
        if let Some(color) = self.assignments.get(&key) {
            return *color;
        }

        let to = connection.to().pin().as_string();
        let kind = connection
            .from()
            .pin()
            .with_str(|from| NetKind::classify(from, &to));
        let color = match kind {
            NetKind::Power => self.power,
            NetKind::Ground => self.ground,
            NetKind::Signal => {
                let color = self.palette.get(self.index);
                self.index += 1;
                color
            }
        };

        trace!(connection = key.as_str(), kind:? = kind, color:% = color; "Assigned wire color");
        self.assignments.insert(key, color);
        color
    }

    /// The color already assigned to a connection identity, if any.
    pub fn assigned_color(&self, identity: &str) -> Option<Color> {
        self.assignments.get(identity).copied()
    }

    /// Computes the path between two points in the current routing mode.
    pub fn route(&self, from: Point, to: Point) -> WirePath {
        WirePath::route(self.mode, from, to)
    }

    /// Builds a wire between two points. Without a color the default wire
    /// color is used.
    pub fn create_wire(&self, from: Point, to: Point, color: Option<Color>) -> Wire {
        Wire::new(self.definition.clone(), self.route(from, to), color)
    }

    /// Rewinds the signal palette to its first color.
    pub fn reset_palette(&mut self) {
        self.index = 0;
    }

    /// Forgets every assigned color.
    pub fn clear_assignments(&mut self) {
        self.assignments.clear();
    }
}

impl Default for WireRouter {
    fn default() -> Self {
        Self::new(Palette::default(), RoutingMode::default())
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use wiresketch_parser::Endpoint;

    use super::*;

    fn pin_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9+-]{1,8}"
    }

    fn connection_strategy() -> impl Strategy<Value = Connection> {
        ("[a-z][a-z0-9]{0,4}", pin_strategy(), "[a-z][a-z0-9]{0,4}", pin_strategy()).prop_map(
            |(from, from_pin, to, to_pin)| {
                Connection::new(
                    Endpoint::new(from.as_str(), from_pin.as_str()),
                    Endpoint::new(to.as_str(), to_pin.as_str()),
                )
            },
        )
    }

    /// A connection keeps its first color no matter what is routed after it.
    fn check_color_is_stable(
        first: &Connection,
        others: &[Connection],
    ) -> Result<(), TestCaseError> {
        let mut router = WireRouter::default();
        let color = router.color_for(first);
        for other in others {
            router.color_for(other);
        }
        prop_assert_eq!(router.color_for(first), color);
        Ok(())
    }

    /// Power nets are red, ground nets black, signal nets neither.
    fn check_color_matches_net_kind(connection: &Connection) -> Result<(), TestCaseError> {
        let mut router = WireRouter::default();
        let color = router.color_for(connection).to_rgba8();
        let kind = NetKind::classify(
            &connection.from().pin().as_string(),
            &connection.to().pin().as_string(),
        );

        match kind {
            NetKind::Power => {
                prop_assert_eq!(color, power_color().to_rgba8());
            }
            NetKind::Ground => {
                prop_assert_eq!(color, ground_color().to_rgba8());
            }
            NetKind::Signal => {
                prop_assert_ne!(color, power_color().to_rgba8());
                prop_assert_ne!(color, ground_color().to_rgba8());
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn color_is_stable(
            first in connection_strategy(),
            others in prop::collection::vec(connection_strategy(), 0..30),
        ) {
            check_color_is_stable(&first, &others)?;
        }

        #[test]
        fn color_matches_net_kind(connection in connection_strategy()) {
            check_color_matches_net_kind(&connection)?;
        }
    }
}
