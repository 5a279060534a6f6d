//! Wiresketch Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Wiresketch
//! circuit-diagram pipeline. It includes:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points and sizes in drawing space ([`geometry`] module)
//! - **Draw**: Strokes, wire geometry and layered SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
