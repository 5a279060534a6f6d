//! The description AST.
//!
//! A [`Description`] is the ordered list of component declarations and the
//! ordered list of connections found in one description text. Nothing here
//! is validated against the component catalogue; a declaration may name an
//! unknown type and a connection may reference an id that was never declared.

use std::fmt;

use wiresketch_core::identifier::Id;

use crate::span::Span;

/// An explicit canvas position in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// `<type> <id>` or `<type> <id> at (<x>, <y>)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    type_name: Id,
    id: Id,
    position: Option<Position>,
    line: usize,
    span: Span,
}

impl Declaration {
    /// Create a declaration with no source location.
    pub fn new(type_name: impl Into<Id>, id: impl Into<Id>, position: Option<Position>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
            position,
            line: 0,
            span: Span::default(),
        }
    }

    /// Attach the 1-based line number and the span of the trimmed line.
    pub fn with_location(mut self, line: usize, span: Span) -> Self {
        self.line = line;
        self.span = span;
        self
    }

    /// The component type key as written.
    pub fn type_name(&self) -> Id {
        self.type_name
    }

    /// The declared component id.
    pub fn id(&self) -> Id {
        self.id
    }

    /// The explicit position, or `None` for auto-placement.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// One side of a connection: `<component>.<pin>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    component: Id,
    pin: Id,
}

impl Endpoint {
    pub fn new(component: impl Into<Id>, pin: impl Into<Id>) -> Self {
        Self {
            component: component.into(),
            pin: pin.into(),
        }
    }

    /// The referenced component id.
    pub fn component(&self) -> Id {
        self.component
    }

    /// The pin token, either a pin name or a pin number.
    pub fn pin(&self) -> Id {
        self.pin
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.pin)
    }
}

/// `<component>.<pin> -> <component>.<pin>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    from: Endpoint,
    to: Endpoint,
    line: usize,
    span: Span,
}

impl Connection {
    /// Create a connection with no source location.
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self {
            from,
            to,
            line: 0,
            span: Span::default(),
        }
    }

    /// Attach the 1-based line number and the span of the trimmed line.
    pub fn with_location(mut self, line: usize, span: Span) -> Self {
        self.line = line;
        self.span = span;
        self
    }

    pub fn from(&self) -> Endpoint {
        self.from
    }

    pub fn to(&self) -> Endpoint {
        self.to
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// Displays the canonical identity `from.pin->to.pin`.
impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// The parsed form of one description text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    components: Vec<Declaration>,
    connections: Vec<Connection>,
}

impl Description {
    pub fn new(components: Vec<Declaration>, connections: Vec<Connection>) -> Self {
        Self {
            components,
            connections,
        }
    }

    /// Declarations in source order.
    pub fn components(&self) -> &[Declaration] {
        &self.components
    }

    /// Connections in source order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.connections.is_empty()
    }

    pub(crate) fn push_component(&mut self, declaration: Declaration) {
        self.components.push(declaration);
    }

    pub(crate) fn push_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_identity() {
        let connection = Connection::new(Endpoint::new("l1", "ANODE"), Endpoint::new("r1", "PIN1"));
        assert_eq!(connection.to_string(), "l1.ANODE->r1.PIN1");
    }

    #[test]
    fn test_declaration_defaults() {
        let declaration = Declaration::new("led", "l1", Some(Position::new(10, 20)));

        assert_eq!(declaration.type_name(), "led");
        assert_eq!(declaration.id(), "l1");
        assert_eq!(declaration.position(), Some(Position::new(10, 20)));
        assert_eq!(declaration.line(), 0);
        assert!(declaration.span().is_empty());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(200, 50).to_string(), "(200, 50)");
    }
}
