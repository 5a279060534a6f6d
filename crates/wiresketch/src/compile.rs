//! Diagram compilation: placement, pin resolution and wire routing.
//!
//! [`DiagramCompiler::render`] turns a parsed [`Description`] into a
//! [`Diagram`] in two passes. The first pass places every declared component
//! whose type is in the catalogue, either at its explicit position or at the
//! next automatic slot. The second pass resolves both endpoints of every
//! connection to absolute pin positions and asks the [`WireRouter`] for a
//! colored wire between them. Problems along the way never abort the render;
//! they are logged and collected as diagnostics on the diagram.

use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, info, warn};

use wiresketch_core::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Wire},
    geometry::{Point, Size},
    identifier::Id,
};
use wiresketch_parser::{
    Connection, Declaration, Description, Endpoint, Span,
    error::{Diagnostic, ErrorCode},
};

use crate::{
    catalog::{Artwork, Catalog, ComponentType, Pin},
    config::{AppConfig, LayoutConfig},
    router::WireRouter,
};

const DEFAULT_BACKGROUND: &str = "#1e293b";
const DEFAULT_LABEL_COLOR: &str = "#cbd5e1";
const LABEL_FONT_SIZE: f32 = 12.0;
const LABEL_OFFSET: f32 = 14.0;

/// Canvas size and auto-placement parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    canvas: Size,
    origin: Point,
    spacing: f32,
    row_height: f32,
    wrap_x: f32,
}

impl LayoutSettings {
    pub fn new(canvas: Size, origin: Point, spacing: f32, row_height: f32, wrap_x: f32) -> Self {
        Self {
            canvas,
            origin,
            spacing,
            row_height,
            wrap_x,
        }
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for LayoutSettings {
    fn from(config: &LayoutConfig) -> Self {
        Self::new(
            Size::new(config.canvas_width(), config.canvas_height()),
            Point::new(config.origin_x(), config.origin_y()),
            config.spacing(),
            config.row_height(),
            config.wrap_x(),
        )
    }
}

/// Next free slot for a component without an explicit position.
#[derive(Debug)]
struct AutoCursor {
    settings: LayoutSettings,
    next: Point,
}

impl AutoCursor {
    fn new(settings: LayoutSettings) -> Self {
        Self {
            settings,
            next: settings.origin,
        }
    }

    /// Returns the current slot and moves past a component `width` wide.
    fn place(&mut self, width: f32) -> Point {
        let slot = self.next;
        let mut x = slot.x() + width + self.settings.spacing;
        let mut y = slot.y();
        if x > self.settings.wrap_x {
            x = self.settings.origin.x();
            y += self.settings.row_height;
        }
        self.next = Point::new(x, y);
        slot
    }
}

/// Visual settings for the finished diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramStyle {
    background: Color,
    label_color: Color,
    show_labels: bool,
}

impl DiagramStyle {
    pub fn new(background: Color, label_color: Color, show_labels: bool) -> Self {
        Self {
            background,
            label_color,
            show_labels,
        }
    }

    /// Reads the style section of a config, filling unset colors with
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured color is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        let style = config.style();
        let background = match style.background_color()? {
            Some(color) => color,
            None => Color::new(DEFAULT_BACKGROUND)?,
        };
        let label_color = match style.label_color()? {
            Some(color) => color,
            None => Color::new(DEFAULT_LABEL_COLOR)?,
        };
        Ok(Self::new(background, label_color, style.show_labels()))
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self::from_config(&AppConfig::default()).expect("default style colors are valid")
    }
}

/// A declared component that made it onto the canvas.
#[derive(Debug, Clone)]
pub struct PlacedComponent {
    id: Id,
    type_key: Id,
    metadata: Arc<ComponentType>,
    position: Point,
    scale_x: f32,
    scale_y: f32,
    span: Span,
}

impl PlacedComponent {
    pub fn id(&self) -> Id {
        self.id
    }

    /// The catalogue key the component was declared with.
    pub fn type_key(&self) -> Id {
        self.type_key
    }

    pub fn metadata(&self) -> &Arc<ComponentType> {
        &self.metadata
    }

    /// Top-left corner on the canvas.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn scale(&self) -> (f32, f32) {
        (self.scale_x, self.scale_y)
    }

    /// Absolute canvas position of one of this component's pins.
    pub fn pin_position(&self, pin: &Pin) -> Point {
        self.position
            .add_point(pin.position().scale_xy(self.scale_x, self.scale_y))
    }
}

/// The drawable for one placed component: its artwork (or a dashed
/// placeholder when the artwork is unavailable) and an optional label.
#[derive(Debug, Clone)]
pub struct ComponentGroup {
    id: Id,
    type_key: Id,
    position: Point,
    native: Size,
    footprint: Size,
    artwork: Option<Artwork>,
    label: Option<Color>,
}

impl ComponentGroup {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn footprint(&self) -> Size {
        self.footprint
    }

    /// The loaded artwork, `None` when a placeholder is drawn instead.
    pub fn artwork(&self) -> Option<&Artwork> {
        self.artwork.as_ref()
    }

    fn render_artwork(&self, artwork: &Artwork) -> svg::node::element::SVG {
        let view_box = artwork.view_box().map(str::to_string).unwrap_or_else(|| {
            format!("0 0 {} {}", self.native.width(), self.native.height())
        });

        let mut nested = svg::node::element::SVG::new()
            .set("width", self.footprint.width())
            .set("height", self.footprint.height())
            .set("viewBox", view_box)
            .set("preserveAspectRatio", "none")
            .set("overflow", "visible");
        for (prefix, uri) in artwork.namespaces() {
            nested = nested.set(format!("xmlns:{prefix}"), uri.as_str());
        }
        nested.add(svg::node::Blob::new(artwork.content()))
    }

    fn render_placeholder(&self) -> svg::node::element::Rectangle {
        let outline = StrokeDefinition::dashed(
            Color::new("#94a3b8").expect("placeholder color is valid"),
            2.0,
        );
        let rect = svg::node::element::Rectangle::new()
            .set("width", self.footprint.width())
            .set("height", self.footprint.height())
            .set("fill", "none")
            .set("class", "placeholder");
        wiresketch_core::apply_stroke!(rect, &outline)
    }
}

impl Drawable for ComponentGroup {
    fn render_to_layers(&self) -> LayeredOutput {
        let mut group = svg::node::element::Group::new()
            .set("class", "component")
            .set(
                "transform",
                format!("translate({}, {})", self.position.x(), self.position.y()),
            )
            .set("data-id", self.id.to_string())
            .set("data-type", self.type_key.to_string());

        group = match &self.artwork {
            Some(artwork) => group.add(self.render_artwork(artwork)),
            None => group.add(self.render_placeholder()),
        };

        if let Some(color) = self.label {
            let label = svg::node::element::Text::new(self.id.to_string())
                .set("x", self.footprint.width() / 2.0)
                .set("y", self.footprint.height() + LABEL_OFFSET)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", LABEL_FONT_SIZE)
                .set("fill", color);
            group = group.add(label);
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Component, Box::new(group));
        output
    }
}

/// A connection that resolved to two pin positions.
#[derive(Debug, Clone)]
pub struct RoutedWire {
    connection: Connection,
    from: Point,
    to: Point,
    wire: Wire,
}

impl RoutedWire {
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn color(&self) -> Color {
        self.wire.color()
    }

    pub fn wire(&self) -> &Wire {
        &self.wire
    }
}

/// The result of one render.
#[derive(Debug, Clone)]
pub struct Diagram {
    canvas: Size,
    style: DiagramStyle,
    placements: IndexMap<Id, PlacedComponent>,
    groups: Vec<ComponentGroup>,
    wires: Vec<RoutedWire>,
    issues: Vec<Diagnostic>,
}

impl Diagram {
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn style(&self) -> &DiagramStyle {
        &self.style
    }

    /// Placed components by id, in placement order. A redeclared id keeps its
    /// first slot in the order but holds the last placement.
    pub fn placements(&self) -> &IndexMap<Id, PlacedComponent> {
        &self.placements
    }

    pub fn placement(&self, id: &str) -> Option<&PlacedComponent> {
        self.placements.get(&Id::new(id))
    }

    /// Every component drawn, including ones later replaced by a duplicate id.
    pub fn groups(&self) -> &[ComponentGroup] {
        &self.groups
    }

    pub fn wires(&self) -> &[RoutedWire] {
        &self.wires
    }

    /// Problems found while compiling, in the order they were found.
    pub fn issues(&self) -> &[Diagnostic] {
        &self.issues
    }

    pub fn component_count(&self) -> usize {
        self.placements.len()
    }

    pub fn component_ids(&self) -> Vec<Id> {
        self.placements.keys().copied().collect()
    }

    /// Collects every drawable of the diagram into layers.
    pub fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for group in &self.groups {
            output.merge(group.render_to_layers());
        }
        for wire in &self.wires {
            output.merge(wire.wire.render_to_layers());
        }
        output
    }

    pub fn to_svg(&self) -> svg::Document {
        crate::export::svg::render_document(self)
    }

    pub fn to_svg_string(&self) -> String {
        self.to_svg().to_string()
    }
}

/// Compiles descriptions into diagrams against a catalogue.
#[derive(Debug)]
pub struct DiagramCompiler {
    catalog: Arc<Catalog>,
    router: WireRouter,
    layout: LayoutSettings,
    style: DiagramStyle,
    reset_assignments: bool,
}

impl DiagramCompiler {
    pub fn new(catalog: Arc<Catalog>, router: WireRouter) -> Self {
        Self {
            catalog,
            router,
            layout: LayoutSettings::default(),
            style: DiagramStyle::default(),
            reset_assignments: false,
        }
    }

    pub fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_style(mut self, style: DiagramStyle) -> Self {
        self.style = style;
        self
    }

    /// Forget all wire color assignments at the start of each render.
    pub fn with_reset_assignments(mut self, reset: bool) -> Self {
        self.reset_assignments = reset;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn router(&self) -> &WireRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut WireRouter {
        &mut self.router
    }

    /// Renders a description into a fresh diagram.
    pub fn render(&mut self, description: &Description) -> Diagram {
        info!(
            components = description.components().len(),
            connections = description.connections().len();
            "Compiling diagram"
        );

        self.router.reset_palette();
        if self.reset_assignments {
            self.router.clear_assignments();
        }

        let mut diagram = Diagram {
            canvas: self.layout.canvas(),
            style: self.style,
            placements: IndexMap::new(),
            groups: Vec::new(),
            wires: Vec::new(),
            issues: Vec::new(),
        };

        self.place_components(description.components(), &mut diagram);
        self.route_connections(description.connections(), &mut diagram);

        info!(
            placed = diagram.component_count(),
            wires = diagram.wires.len(),
            issues = diagram.issues.len();
            "Diagram compiled"
        );
        diagram
    }

    fn place_components(&self, declarations: &[Declaration], diagram: &mut Diagram) {
        let mut cursor = AutoCursor::new(self.layout);

        for declaration in declarations {
            let type_key = declaration.type_name();
            let Some(metadata) = type_key.with_str(|key| self.catalog.get_type(key)) else {
                warn!(component_type:% = type_key, id:% = declaration.id(); "Unknown component type");
                diagram.issues.push(
                    Diagnostic::error(format!("unknown component type `{type_key}`"))
                        .with_code(ErrorCode::E200)
                        .with_line(declaration.line(), declaration_text(declaration))
                        .with_label(declaration.span(), "not in the component catalogue")
                        .with_help(format!(
                            "available types: {}",
                            self.catalog.list_types().join(", ")
                        )),
                );
                continue;
            };

            let footprint = metadata.footprint();
            let position = match declaration.position() {
                Some(position) => Point::new(position.x() as f32, position.y() as f32),
                None => cursor.place(footprint.width()),
            };
            let (scale_x, scale_y) = metadata.scale();

            let artwork = match self.catalog.load_artwork(&metadata) {
                Ok(artwork) => Some(artwork),
                Err(err) => {
                    warn!(component_type:% = type_key, err:% = err; "Drawing placeholder");
                    diagram.issues.push(
                        Diagnostic::error(format!("artwork for `{type_key}` could not be loaded"))
                            .with_code(ErrorCode::E203)
                            .with_line(declaration.line(), declaration_text(declaration))
                            .with_label(declaration.span(), err.to_string()),
                    );
                    None
                }
            };

            diagram.groups.push(ComponentGroup {
                id: declaration.id(),
                type_key,
                position,
                native: metadata.size(),
                footprint,
                artwork,
                label: self.style.show_labels.then_some(self.style.label_color),
            });

            let placed = PlacedComponent {
                id: declaration.id(),
                type_key,
                metadata,
                position,
                scale_x,
                scale_y,
                span: declaration.span(),
            };
            debug!(
                id:% = placed.id,
                x = position.x(),
                y = position.y();
                "Placed component"
            );

            if let Some(previous) = diagram.placements.insert(placed.id, placed) {
                warn!(id:% = previous.id; "Duplicate component id replaces earlier placement");
                diagram.issues.push(
                    Diagnostic::warning(format!("component `{}` is declared more than once", previous.id))
                        .with_code(ErrorCode::E204)
                        .with_line(declaration.line(), declaration_text(declaration))
                        .with_label(declaration.span(), "this declaration replaces the earlier one")
                        .with_secondary_label(previous.span, "first declared here"),
                );
            }
        }
    }

    fn route_connections(&mut self, connections: &[Connection], diagram: &mut Diagram) {
        for connection in connections {
            let endpoints = self
                .resolve(connection, connection.from(), diagram)
                .and_then(|from| Ok((from, self.resolve(connection, connection.to(), diagram)?)));

            let (from, to) = match endpoints {
                Ok(points) => points,
                Err(issue) => {
                    warn!(connection:% = connection, issue:% = issue; "Skipping connection");
                    diagram.issues.push(issue);
                    continue;
                }
            };

            let color = self.router.color_for(connection);
            let wire = self
                .router
                .create_wire(from, to, Some(color))
                .with_tag(connection.to_string());
            debug!(connection:% = connection, color:% = color; "Routed wire");

            diagram.wires.push(RoutedWire {
                connection: connection.clone(),
                from,
                to,
                wire,
            });
        }
    }

    /// Absolute position of one endpoint, or the issue explaining why it has
    /// none.
    fn resolve(
        &self,
        connection: &Connection,
        endpoint: Endpoint,
        diagram: &Diagram,
    ) -> Result<Point, Diagnostic> {
        let Some(placed) = diagram.placements.get(&endpoint.component()) else {
            return Err(Diagnostic::error(format!(
                "unknown component `{}`",
                endpoint.component()
            ))
            .with_code(ErrorCode::E201)
            .with_line(connection.line(), connection_text(connection))
            .with_label(connection.span(), format!("`{endpoint}` references no placed component")));
        };

        let pin = endpoint.pin().with_str(|token| placed.metadata.pin(token).cloned());
        match pin {
            Some(pin) => Ok(placed.pin_position(&pin)),
            None => Err(Diagnostic::error(format!(
                "unknown pin `{}` on `{}`",
                endpoint.pin(),
                placed.type_key
            ))
            .with_code(ErrorCode::E202)
            .with_line(connection.line(), connection_text(connection))
            .with_label(connection.span(), format!("`{endpoint}` does not exist"))
            .with_help(format!(
                "`{}` pins: {}",
                placed.type_key,
                pin_names(&placed.metadata)
            ))),
        }
    }
}

fn declaration_text(declaration: &Declaration) -> String {
    match declaration.position() {
        Some(position) => format!(
            "{} {} at {position}",
            declaration.type_name(),
            declaration.id()
        ),
        None => format!("{} {}", declaration.type_name(), declaration.id()),
    }
}

fn connection_text(connection: &Connection) -> String {
    format!("{} -> {}", connection.from(), connection.to())
}

fn pin_names(component: &ComponentType) -> String {
    const SHOWN: usize = 12;

    let mut names: Vec<&str> = component.pins().iter().take(SHOWN).map(Pin::name).collect();
    if component.pins().len() > SHOWN {
        names.push("...");
    }
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use wiresketch_core::draw::RoutingMode;

    use super::*;
    use crate::catalog::{BundledSource, Drawing};

    fn compiler() -> DiagramCompiler {
        DiagramCompiler::new(Arc::new(Catalog::builtin()), WireRouter::default())
    }

    fn description(source: &str) -> Description {
        wiresketch_parser::parse(source).expect("description parses")
    }

    fn codes(diagram: &Diagram) -> Vec<ErrorCode> {
        diagram.issues().iter().filter_map(Diagnostic::code).collect()
    }

    #[test]
    fn test_auto_cursor_advances_and_wraps() {
        let mut cursor = AutoCursor::new(LayoutSettings::default());

        assert_eq!(cursor.place(340.0), Point::new(50.0, 50.0));
        assert_eq!(cursor.place(340.0), Point::new(490.0, 50.0));
        // 490 + 340 + 100 = 930 still fits, the next step would not
        assert_eq!(cursor.place(340.0), Point::new(930.0, 50.0));
        assert_eq!(cursor.place(60.0), Point::new(50.0, 300.0));
    }

    #[test]
    fn test_explicit_position_does_not_move_cursor() {
        let diagram = compiler().render(&description("led a at (500, 500)\nled b"));

        assert_eq!(diagram.placement("a").unwrap().position(), Point::new(500.0, 500.0));
        assert_eq!(diagram.placement("b").unwrap().position(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_pin_position_uses_scale() {
        let diagram = compiler().render(&description("breadboard bb at (100, 100)"));
        let placed = diagram.placement("bb").unwrap();
        let pin = placed.metadata().pin("L+").unwrap().clone();

        let point = placed.pin_position(&pin);
        assert!(approx_eq!(f32, point.x(), 100.0 + 200.0 * 0.12, epsilon = 0.001));
        assert!(approx_eq!(f32, point.y(), 100.0 + 400.0 * 400.0 / 3500.0, epsilon = 0.001));
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let diagram = compiler().render(&description("servo s1\nled l1"));

        assert_eq!(diagram.component_ids(), vec![Id::new("l1")]);
        assert_eq!(codes(&diagram), vec![ErrorCode::E200]);
        // Unknown types do not consume an auto slot
        assert_eq!(diagram.placement("l1").unwrap().position(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_unresolved_endpoints_skip_only_their_connection() {
        let diagram = compiler().render(&description(
            "led l1\nresistor r1\nl1.ANODE -> ghost.X\nl1.NOPE -> r1.PIN1\nl1.ANODE -> r1.PIN1",
        ));

        assert_eq!(diagram.wires().len(), 1);
        assert_eq!(codes(&diagram), vec![ErrorCode::E201, ErrorCode::E202]);
        assert_eq!(diagram.wires()[0].connection().to_string(), "l1.ANODE->r1.PIN1");
    }

    #[test]
    fn test_numeric_pin_alias() {
        let diagram = compiler().render(&description("led l1\nresistor r1\nl1.1 -> r1.PIN1"));

        assert_eq!(diagram.wires().len(), 1);
        let wire = &diagram.wires()[0];
        assert!(approx_eq!(f32, wire.from().x(), 71.5, epsilon = 0.001));
        assert!(approx_eq!(f32, wire.from().y(), 145.0, epsilon = 0.001));
    }

    #[test]
    fn test_duplicate_id_keeps_both_groups() {
        let diagram = compiler().render(&description("led x at (10, 10)\nresistor x at (300, 10)"));

        assert_eq!(diagram.groups().len(), 2);
        assert_eq!(diagram.component_count(), 1);
        assert_eq!(diagram.placement("x").unwrap().type_key(), Id::new("resistor"));

        let issue = &diagram.issues()[0];
        assert_eq!(issue.code(), Some(ErrorCode::E204));
        assert_eq!(issue.labels().len(), 2);
    }

    #[test]
    fn test_missing_artwork_draws_placeholder() {
        let mut catalog = Catalog::new(BundledSource);
        let widget = ComponentType::new(
            "widget",
            Size::new(40.0, 40.0),
            vec![Pin::new("IN", Some(1), Point::new(0.0, 20.0))],
            Drawing::External("widget.svg".to_string()),
        )
        .unwrap();
        catalog.insert("widget", widget);

        let mut compiler = DiagramCompiler::new(Arc::new(catalog), WireRouter::default());
        let diagram = compiler.render(&description("widget w1"));

        assert_eq!(diagram.component_count(), 1);
        assert!(diagram.groups()[0].artwork().is_none());
        assert_eq!(codes(&diagram), vec![ErrorCode::E203]);

        let svg = diagram.to_svg_string();
        assert!(svg.contains(r#"class="placeholder""#));
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_render_rewinds_palette() {
        let mut compiler = compiler();
        let first = compiler.render(&description("led a\nled b\na.ANODE -> b.ANODE"));
        let second = compiler.render(&description("led c\nled d\nc.ANODE -> d.ANODE"));

        // The palette index restarts, so a new net reuses the first color
        assert_eq!(first.wires()[0].color(), second.wires()[0].color());
    }

    #[test]
    fn test_reset_assignments() {
        let source = description("led a\nled b\na.ANODE -> b.ANODE\nb.CATHODE -> a.CATHODE");
        let swapped = description("led a\nled b\nb.CATHODE -> a.CATHODE\na.ANODE -> b.ANODE");

        let mut keep = compiler();
        keep.render(&source);
        let kept = keep.render(&swapped);
        assert_eq!(
            kept.wires()[0].color(),
            keep.router().assigned_color("b.CATHODE->a.CATHODE").unwrap()
        );
        assert_ne!(kept.wires()[0].color(), kept.wires()[1].color());

        let mut reset = compiler().with_reset_assignments(true);
        reset.render(&source);
        let fresh = reset.render(&swapped);
        assert_eq!(fresh.wires()[0].color(), reset.router().assigned_color("b.CATHODE->a.CATHODE").unwrap());
        assert_eq!(fresh.wires()[0].color(), crate::router::Palette::default().get(0));
    }

    #[test]
    fn test_routing_mode_applies_to_wires() {
        let mut compiler = compiler();
        compiler.router_mut().set_routing_mode(RoutingMode::Straight);
        let diagram = compiler.render(&description("led a\nled b\na.ANODE -> b.ANODE"));

        assert_eq!(diagram.wires()[0].wire().path().mode(), RoutingMode::Straight);
    }

    #[test]
    fn test_labels_follow_style() {
        let source = description("led l1");
        let labelled = compiler().render(&source).to_svg_string();
        assert!(labelled.contains("<text"));

        let style = DiagramStyle::new(Color::default(), Color::default(), false);
        let plain = compiler().with_style(style).render(&source).to_svg_string();
        assert!(!plain.contains("<text"));
    }
}
