//! Stroke and line-style definitions.
//!
//! - [`StrokeDefinition`]: color, width, dash style, cap and join of a line
//! - [`StrokeStyle`]: dash pattern (solid or dashed)
//! - [`StrokeCap`]: how line endpoints are drawn
//! - [`StrokeJoin`]: how corners are drawn
//! - [`apply_stroke!`](crate::apply_stroke!): applies a definition to an SVG element
//!
//! Wires use a solid, round-capped stroke; placeholders for components whose
//! artwork failed to load use a dashed one.
//!
//! ```
//! use wiresketch_core::draw::{StrokeCap, StrokeDefinition};
//! use wiresketch_core::color::Color;
//! use svg::node::element::Path;
//!
//! let mut stroke = StrokeDefinition::solid(Color::new("#4ecdc4").unwrap(), 3.0);
//! stroke.set_cap(StrokeCap::Round);
//!
//! let path = wiresketch_core::apply_stroke!(Path::new().set("d", "M 0 0 L 10 10"), &stroke);
//! assert!(path.to_string().contains("stroke-linecap=\"round\""));
//! ```

use crate::color::Color;

/// Dash pattern of a stroke. `Dashed` maps to `stroke-dasharray="6,4"`.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
        }
    }
}

/// Line endpoint rendering, mapped to `stroke-linecap`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// Corner rendering, mapped to `stroke-linejoin`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
        }
    }
}

/// A complete stroke description.
///
/// The default is a black, 1-unit, solid line with butt caps and miter joins.
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width and default
    /// style, cap and join.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Creates a solid stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke.
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            style: StrokeStyle::Dashed,
            ..Self::new(color, width)
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Returns the stroke cap style.
    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    /// Returns the stroke join style.
    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    pub fn set_join(&mut self, join: StrokeJoin) {
        self.join = join;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets `stroke`, `stroke-opacity`, `stroke-width`, `stroke-linecap`,
/// `stroke-linejoin` and, for non-solid styles, `stroke-dasharray`.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element::Rectangle;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "#000000");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Miter);
    }

    #[test]
    fn test_stroke_constructors() {
        let color = Color::new("red").unwrap();

        let solid = StrokeDefinition::solid(color, 3.0);
        assert_eq!(solid.width(), 3.0);
        assert_eq!(*solid.style(), StrokeStyle::Solid);

        let dashed = StrokeDefinition::dashed(color, 1.5);
        assert_eq!(*dashed.style(), StrokeStyle::Dashed);
    }

    #[test]
    fn test_round_cap_and_join() {
        let mut stroke = StrokeDefinition::solid(Color::default(), 2.0);
        stroke.set_cap(StrokeCap::Round);
        stroke.set_join(StrokeJoin::Round);
        let rect = crate::apply_stroke!(Rectangle::new(), &stroke).to_string();

        assert!(rect.contains("stroke-linecap=\"round\""));
        assert!(rect.contains("stroke-linejoin=\"round\""));
    }

    #[test]
    fn test_apply_stroke_omits_dasharray_for_solid() {
        let stroke = StrokeDefinition::solid(Color::default(), 2.0);
        let rect = crate::apply_stroke!(Rectangle::new(), &stroke).to_string();

        assert!(rect.contains("stroke-width=\"2\""));
        assert!(!rect.contains("stroke-dasharray"));
    }

    #[test]
    fn test_apply_stroke_sets_dasharray_for_dashed() {
        let stroke = StrokeDefinition::dashed(Color::default(), 1.0);
        let rect = crate::apply_stroke!(Rectangle::new(), &stroke).to_string();

        assert!(rect.contains("stroke-dasharray=\"6,4\""));
    }
}
