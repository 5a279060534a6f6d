//! Color handling for Wiresketch diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Wire colors, marker fills and the canvas background
//! all go through it so that CSS strings are validated once, up front.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wiresketch_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert_ne!(red, blue);
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha component, between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the color as 8-bit sRGB channels `[r, g, b, a]`.
    ///
    /// Colors written differently (`"black"`, `"#000"`) compare equal here
    /// even though they are not `==`.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Opaque colors print as `#rrggbb`, translucent ones as `rgba(...)`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "rgba({r}, {g}, {b}, {})", f32::from(a) / 255.0)
        }
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#4ecdc4").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_string(), "#000000");
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::new("red").unwrap().to_string(), "#ff0000");
        assert_eq!(Color::new("#4ECDC4").unwrap().to_string(), "#4ecdc4");
        assert_eq!(
            Color::new("rgba(0, 0, 0, 0)").unwrap().to_string(),
            "rgba(0, 0, 0, 0)"
        );
    }

    #[test]
    fn test_color_from_str() {
        let parsed: Color = "#ff0000".parse().unwrap();
        assert_eq!(parsed, Color::new("#ff0000").unwrap());
    }

    #[test]
    fn test_color_alpha() {
        assert!((Color::new("red").unwrap().alpha() - 1.0).abs() < 0.001);
        let faded = Color::new("rgba(255, 0, 0, 0.5)").unwrap();
        assert!((faded.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_to_rgba8() {
        let named = Color::new("black").unwrap();
        let hex = Color::new("#000").unwrap();
        assert_eq!(named.to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(named.to_rgba8(), hex.to_rgba8());
        assert_eq!(Color::new("#4ecdc4").unwrap().to_rgba8(), [0x4e, 0xcd, 0xc4, 255]);
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let a = Color::new("#000000").unwrap();
        let b = Color::new("#000000").unwrap();
        let c = Color::new("#ff0000").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }
}
