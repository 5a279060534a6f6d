//! Drawable primitives for circuit diagrams.
//!
//! Everything that ends up in the output implements [`Drawable`] and renders
//! into a [`LayeredOutput`], which orders SVG nodes by [`RenderLayer`] so that
//! wires always sit above the components they connect.

mod layer;
mod stroke;
mod wire;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use wire::{
    DEFAULT_WIRE_COLOR, ParseRoutingModeError, RoutingMode, Wire, WireDefinition, WirePath,
};

/// Trait for diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// Drawables carry their own absolute placement, so no position is
    /// passed in.
    fn render_to_layers(&self) -> LayeredOutput;
}
