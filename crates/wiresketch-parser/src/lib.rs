//! # Wiresketch Parser
//!
//! Parser for the Wiresketch circuit description language. A description is
//! a list of lines, each a comment, a component declaration or a connection
//! between two component pins:
//!
//! ```text
//! # blinking LED
//! raspberrypi rpi at (700, 100)
//! led l1
//! resistor r1 at (200, 50)
//! rpi.GPIO17 -> r1.PIN1
//! r1.PIN2 -> l1.ANODE
//! l1.CATHODE -> rpi.GND
//! ```
//!
//! ## Usage
//!
//! ```
//! # use wiresketch_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let description = parse("led l1\nresistor r1 at (200, 50)\nl1.ANODE -> r1.PIN1")?;
//!
//!     assert_eq!(description.components().len(), 2);
//!     assert_eq!(description.connections()[0].to_string(), "l1.ANODE->r1.PIN1");
//!     Ok(())
//! }
//! ```
//!
//! Use [`Parser`] instead to keep the well-formed lines of a description
//! that also contains malformed ones.

pub mod ast;
pub mod error;
mod grammar;
mod parser;
mod span;

pub use ast::{Connection, Declaration, Description, Endpoint, Position};
pub use parser::Parser;
pub use span::Span;

use error::ParseError;

/// Parse a description, failing with every diagnostic if any line is
/// malformed.
pub fn parse(text: &str) -> Result<Description, ParseError> {
    parser::parse_strict(text)
}
