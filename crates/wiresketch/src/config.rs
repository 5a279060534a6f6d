//! Configuration types for Wiresketch diagram compilation.
//!
//! Every type implements [`serde::Deserialize`], and every field has a
//! default, so a config file only needs the values it changes:
//!
//! ```toml
//! [layout]
//! canvas_width = 1600
//!
//! [style]
//! background_color = "#0f172a"
//! show_labels = false
//!
//! [router]
//! routing = "curved"
//! palette = ["#4ecdc4", "#feca57", "#ff9ff3"]
//! reset_assignments = true
//!
//! [catalog]
//! directory = "./parts"
//! ```
//!
//! # Example
//!
//! ```
//! # use wiresketch::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert!(config.router().palette().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use wiresketch_core::{color::Color, draw::RoutingMode};

use crate::{
    catalog::Manifest,
    router::{DEFAULT_PALETTE, Palette, PaletteError},
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    router: RouterConfig,

    #[serde(default)]
    catalog: CatalogConfig,
}

impl AppConfig {
    pub fn new(
        layout: LayoutConfig,
        style: StyleConfig,
        router: RouterConfig,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            layout,
            style,
            router,
            catalog,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn router(&self) -> &RouterConfig {
        &self.router
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    /// Overrides the configured routing mode.
    pub fn with_routing_mode(mut self, mode: RoutingMode) -> Self {
        self.router.routing = mode;
        self
    }

    /// Overrides the configured component directory.
    pub fn with_catalog_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.catalog.directory = Some(directory.into());
        self
    }
}

/// Canvas size and automatic placement.
///
/// Components without an explicit position are placed left to right from
/// `(origin_x, origin_y)`, `spacing` apart; once the cursor passes `wrap_x`
/// it returns to `origin_x` one `row_height` further down.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    canvas_width: f32,
    canvas_height: f32,
    origin_x: f32,
    origin_y: f32,
    spacing: f32,
    row_height: f32,
    wrap_x: f32,
}

impl LayoutConfig {
    pub fn canvas_width(&self) -> f32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f32 {
        self.canvas_height
    }

    pub fn origin_x(&self) -> f32 {
        self.origin_x
    }

    pub fn origin_y(&self) -> f32 {
        self.origin_y
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn wrap_x(&self) -> f32 {
        self.wrap_x
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200.0,
            canvas_height: 800.0,
            origin_x: 50.0,
            origin_y: 50.0,
            spacing: 100.0,
            row_height: 250.0,
            wrap_x: 1000.0,
        }
    }
}

/// Visual styling of the rendered diagram.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    label_color: Option<String>,
    show_labels: bool,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color_option(self.background_color.as_deref(), "background color")
    }

    /// Returns the parsed label [`Color`], or `None` if none is configured.
    pub fn label_color(&self) -> Result<Option<Color>, String> {
        parse_color_option(self.label_color.as_deref(), "label color")
    }

    /// Whether each component is labeled with its id.
    pub fn show_labels(&self) -> bool {
        self.show_labels
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            label_color: None,
            show_labels: true,
        }
    }
}

fn parse_color_option(value: Option<&str>, what: &str) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {what} in config: {err}"))
}

/// Wire routing and coloring.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    routing: RoutingMode,
    palette: Option<Vec<String>>,
    reset_assignments: bool,
}

impl RouterConfig {
    pub fn routing(&self) -> RoutingMode {
        self.routing
    }

    /// Builds the signal palette, falling back to the built-in one.
    ///
    /// # Errors
    ///
    /// Returns a [`PaletteError`] if a configured palette is empty, contains
    /// an invalid color, or reuses the power or ground color.
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        match &self.palette {
            Some(colors) => Palette::new(colors.as_slice()),
            None => Palette::new(&DEFAULT_PALETTE),
        }
    }

    /// Whether color assignments are forgotten at the start of every render.
    pub fn reset_assignments(&self) -> bool {
        self.reset_assignments
    }
}

/// Where component definitions come from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    directory: Option<PathBuf>,
    manifest: Option<Manifest>,
}

impl CatalogConfig {
    /// Directory to read definitions from instead of the bundled set.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// The manifest to load, the built-in one unless configured.
    pub fn manifest(&self) -> Manifest {
        self.manifest.clone().unwrap_or_default()
    }
}
