//! Wire geometry and the wire drawable.
//!
//! A wire connects two absolute pin positions. Its path is computed by one of
//! three [`RoutingMode`]s and it is drawn as a stroked path with a filled
//! marker on each endpoint.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use svg::node::element as svg_element;
use thiserror::Error;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeCap, StrokeDefinition, StrokeJoin},
    geometry::Point,
};

/// Color used for wires that were not given one explicitly.
pub const DEFAULT_WIRE_COLOR: &str = "#fbbf24";

/// Path strategy used to connect two endpoints.
///
/// - `Straight`: a single segment from start to end
/// - `Orthogonal`: horizontal, vertical, horizontal through the horizontal midpoint
/// - `Curved`: a cubic Bezier whose control points sit on the horizontal midpoint
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    Straight,
    #[default]
    Orthogonal,
    Curved,
}

impl RoutingMode {
    /// All modes, in the order they are documented.
    pub const ALL: [RoutingMode; 3] = [Self::Straight, Self::Orthogonal, Self::Curved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Orthogonal => "orthogonal",
            Self::Curved => "curved",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a routing mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid routing mode `{0}`, valid values: straight, orthogonal, curved")]
pub struct ParseRoutingModeError(String);

impl FromStr for RoutingMode {
    type Err = ParseRoutingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight" => Ok(Self::Straight),
            "orthogonal" => Ok(Self::Orthogonal),
            "curved" => Ok(Self::Curved),
            _ => Err(ParseRoutingModeError(s.to_string())),
        }
    }
}

/// Geometry of a routed wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WirePath {
    Straight {
        start: Point,
        end: Point,
    },
    /// Start → `(mid_x, start.y)` → `(mid_x, end.y)` → end.
    Orthogonal {
        start: Point,
        mid_x: f32,
        end: Point,
    },
    Curved {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl WirePath {
    /// Compute the path between `start` and `end` for the given mode.
    ///
    /// ```
    /// # use wiresketch_core::draw::{RoutingMode, WirePath};
    /// # use wiresketch_core::geometry::Point;
    /// let path = WirePath::route(RoutingMode::Orthogonal, Point::new(0.0, 0.0), Point::new(100.0, 40.0));
    /// assert_eq!(path.to_svg_data(), "M 0 0 L 50 0 L 50 40 L 100 40");
    /// ```
    pub fn route(mode: RoutingMode, start: Point, end: Point) -> Self {
        let mid_x = start.x() + (end.x() - start.x()) * 0.5;
        match mode {
            RoutingMode::Straight => Self::Straight { start, end },
            RoutingMode::Orthogonal => Self::Orthogonal { start, mid_x, end },
            RoutingMode::Curved => Self::Curved {
                start,
                control1: Point::new(mid_x, start.y()),
                control2: Point::new(mid_x, end.y()),
                end,
            },
        }
    }

    pub fn start(&self) -> Point {
        match *self {
            Self::Straight { start, .. }
            | Self::Orthogonal { start, .. }
            | Self::Curved { start, .. } => start,
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            Self::Straight { end, .. } | Self::Orthogonal { end, .. } | Self::Curved { end, .. } => {
                end
            }
        }
    }

    /// The mode this path was routed with.
    pub fn mode(&self) -> RoutingMode {
        match self {
            Self::Straight { .. } => RoutingMode::Straight,
            Self::Orthogonal { .. } => RoutingMode::Orthogonal,
            Self::Curved { .. } => RoutingMode::Curved,
        }
    }

    /// SVG path data (`d` attribute) for this geometry.
    pub fn to_svg_data(&self) -> String {
        match *self {
            Self::Straight { start, end } => {
                format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
            }
            Self::Orthogonal { start, mid_x, end } => format!(
                "M {} {} L {} {} L {} {} L {} {}",
                start.x(),
                start.y(),
                mid_x,
                start.y(),
                mid_x,
                end.y(),
                end.x(),
                end.y()
            ),
            Self::Curved {
                start,
                control1,
                control2,
                end,
            } => format!(
                "M {} {} C {} {}, {} {}, {} {}",
                start.x(),
                start.y(),
                control1.x(),
                control1.y(),
                control2.x(),
                control2.y(),
                end.x(),
                end.y()
            ),
        }
    }
}

/// Visual properties shared by all wires of a diagram.
#[derive(Debug, Clone)]
pub struct WireDefinition {
    stroke_width: f32,
    marker_radius: f32,
    marker_outline: StrokeDefinition,
    default_color: Color,
}

impl WireDefinition {
    pub fn new(stroke_width: f32, marker_radius: f32) -> Self {
        Self {
            stroke_width,
            marker_radius,
            ..Self::default()
        }
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn marker_radius(&self) -> f32 {
        self.marker_radius
    }

    /// Color used when a wire is created without one.
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Stroke for a wire body of the given color.
    fn stroke(&self, color: Color) -> StrokeDefinition {
        let mut stroke = StrokeDefinition::solid(color, self.stroke_width);
        stroke.set_cap(StrokeCap::Round);
        stroke.set_join(StrokeJoin::Round);
        stroke
    }
}

impl Default for WireDefinition {
    fn default() -> Self {
        Self {
            stroke_width: 3.0,
            marker_radius: 4.0,
            marker_outline: StrokeDefinition::solid(
                Color::new("#ffffff").expect("'#ffffff' is a valid CSS color"),
                1.0,
            ),
            default_color: Color::new(DEFAULT_WIRE_COLOR).expect("default wire color is valid"),
        }
    }
}

/// A drawable wire: a colored path plus an endpoint marker on each end.
#[derive(Debug, Clone)]
pub struct Wire {
    definition: WireDefinition,
    path: WirePath,
    color: Color,
    tag: Option<String>,
}

impl Wire {
    /// Creates a wire along `path`. Without a color the definition's default
    /// wire color is used.
    pub fn new(definition: WireDefinition, path: WirePath, color: Option<Color>) -> Self {
        let color = color.unwrap_or(definition.default_color);
        Self {
            definition,
            path,
            color,
            tag: None,
        }
    }

    /// Attaches an identifying tag, emitted as `data-connection`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn path(&self) -> &WirePath {
        &self.path
    }

    pub fn color(&self) -> Color {
        self.color
    }

    fn marker(&self, center: Point) -> svg_element::Circle {
        let circle = svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", self.definition.marker_radius)
            .set("fill", self.color);
        crate::apply_stroke!(circle, &self.definition.marker_outline)
    }
}

impl Drawable for Wire {
    fn render_to_layers(&self) -> LayeredOutput {
        let body = svg_element::Path::new()
            .set("d", self.path.to_svg_data())
            .set("fill", "none");
        let body = crate::apply_stroke!(body, &self.definition.stroke(self.color));

        let mut group = svg_element::Group::new().set("class", "wire");
        if let Some(tag) = &self.tag {
            group = group.set("data-connection", tag.as_str());
        }
        let group = group
            .add(body)
            .add(self.marker(self.path.start()))
            .add(self.marker(self.path.end()));

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Wire, Box::new(group));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Point {
        Point::new(10.0, 20.0)
    }

    fn b() -> Point {
        Point::new(110.0, 80.0)
    }

    #[test]
    fn test_routing_mode_from_str() {
        for mode in RoutingMode::ALL {
            assert_eq!(mode.as_str().parse::<RoutingMode>().unwrap(), mode);
        }
        assert!("zigzag".parse::<RoutingMode>().is_err());
    }

    #[test]
    fn test_routing_mode_default_is_orthogonal() {
        assert_eq!(RoutingMode::default(), RoutingMode::Orthogonal);
    }

    #[test]
    fn test_straight_path() {
        let path = WirePath::route(RoutingMode::Straight, a(), b());
        assert_eq!(path.to_svg_data(), "M 10 20 L 110 80");
    }

    #[test]
    fn test_orthogonal_path_goes_through_horizontal_midpoint() {
        let path = WirePath::route(RoutingMode::Orthogonal, a(), b());
        assert_eq!(path.to_svg_data(), "M 10 20 L 60 20 L 60 80 L 110 80");
    }

    #[test]
    fn test_orthogonal_path_right_to_left() {
        let path = WirePath::route(RoutingMode::Orthogonal, b(), a());
        assert_eq!(path.to_svg_data(), "M 110 80 L 60 80 L 60 20 L 10 20");
    }

    #[test]
    fn test_curved_path_control_points() {
        let path = WirePath::route(RoutingMode::Curved, a(), b());
        assert_eq!(path.to_svg_data(), "M 10 20 C 60 20, 60 80, 110 80");
    }

    #[test]
    fn test_path_endpoints_and_mode() {
        for mode in RoutingMode::ALL {
            let path = WirePath::route(mode, a(), b());
            assert_eq!(path.start(), a());
            assert_eq!(path.end(), b());
            assert_eq!(path.mode(), mode);
        }
    }

    #[test]
    fn test_wire_uses_default_color_without_explicit_color() {
        let path = WirePath::route(RoutingMode::Straight, a(), b());
        let wire = Wire::new(WireDefinition::default(), path, None);
        assert_eq!(wire.color(), Color::new(DEFAULT_WIRE_COLOR).unwrap());
    }

    #[test]
    fn test_wire_renders_path_and_two_markers() {
        let path = WirePath::route(RoutingMode::Straight, a(), b());
        let color = Color::new("#ff0000").unwrap();
        let wire =
            Wire::new(WireDefinition::default(), path, Some(color)).with_tag("l1.ANODE->r1.PIN1");

        let svg: String = wire
            .render_to_layers()
            .render()
            .iter()
            .map(|n| n.to_string())
            .collect();

        assert!(svg.contains("class=\"wire\""));
        assert!(svg.contains("data-connection="));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("stroke-width=\"3\""));
        assert!(svg.contains("stroke-linecap=\"round\""));
        assert!(svg.contains("r=\"4\""));
    }
}
