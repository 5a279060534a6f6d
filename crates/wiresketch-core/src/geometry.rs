//! Geometric primitives for diagram placement.
//!
//! - [`Point`] - A 2D coordinate in drawing space
//! - [`Size`] - Width and height dimensions
//!
//! # Coordinate System
//!
//! Wiresketch uses the SVG coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Component positions are the top-left corner of the component's footprint,
//! and pin coordinates are offsets from that corner in the component's own
//! (possibly scaled) coordinate space.

/// A 2D point in drawing space.
///
/// # Examples
///
/// ```
/// # use wiresketch_core::geometry::Point;
/// let origin = Point::new(200.0, 50.0);
/// let pin = Point::new(5.0, 20.0);
///
/// let absolute = origin.add_point(pin);
/// assert_eq!(absolute, Point::new(205.0, 70.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Multiplies each coordinate by its own factor.
    ///
    /// Used to map a pin from a component's native coordinate space onto the
    /// canvas when the component is drawn at a different size.
    ///
    /// ```
    /// # use wiresketch_core::geometry::Point;
    /// let pin = Point::new(1000.0, 500.0);
    /// assert_eq!(pin.scale_xy(0.2, 0.5), Point::new(200.0, 250.0));
    /// ```
    pub fn scale_xy(self, factor_x: f32, factor_y: f32) -> Self {
        Self {
            x: self.x * factor_x,
            y: self.y * factor_y,
        }
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both dimensions are strictly positive and finite.
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(4.0, 6.0);

        assert_eq!(a.add_point(b), Point::new(14.0, 26.0));
    }

    #[test]
    fn test_point_scale_xy_identity() {
        let p = Point::new(21.5, 95.0);
        assert_eq!(p.scale_xy(1.0, 1.0), p);
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(60.0, 100.0).is_positive());
        assert!(!Size::new(0.0, 100.0).is_positive());
        assert!(!Size::new(60.0, -1.0).is_positive());
        assert!(!Size::new(f32::NAN, 1.0).is_positive());
    }
}
