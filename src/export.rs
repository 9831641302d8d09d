//! Export variants: board-only, stones-only and combined documents
//!
//! Each requested variant becomes one named SVG document. The grid and stone
//! layers are rendered once and shared; only the background differs.

use std::fmt;

use log::{info, warn};

use crate::board::{BoardGeometry, BoardSize, OccupancyGrid};
use crate::renderer::{
    render_background, render_grid, render_stones, StyleConfig, SvgBuilder, SvgConfig,
};

/// Which layers an exported document contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Grid and star points only
    Board,
    /// Stones and labels only
    Stones,
    /// Grid, star points, stones and labels
    Both,
}

impl Variant {
    pub const NAMES: [&'static str; 3] = ["board", "stones", "both"];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "board" => Some(Variant::Board),
            "stones" => Some(Variant::Stones),
            "both" => Some(Variant::Both),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Board => "board",
            Variant::Stones => "stones",
            Variant::Both => "both",
        }
    }

    fn includes_grid(self) -> bool {
        matches!(self, Variant::Board | Variant::Both)
    }

    fn includes_stones(self) -> bool {
        matches!(self, Variant::Stones | Variant::Both)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Background policy of one variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    /// No background rectangle
    Transparent,
    /// The top-level `background_color`
    UseConfig,
    /// Any CSS color, used verbatim
    Color(String),
}

impl Background {
    /// Interpret a background specifier; anything unrecognized is a CSS color
    pub fn parse(spec: &str) -> Self {
        let trimmed = spec.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "transparent" => Background::Transparent,
            "use_config_background" => Background::UseConfig,
            _ => Background::Color(trimmed.to_string()),
        }
    }

    /// Color of the background rectangle, or None to omit it
    pub fn resolve<'a>(&'a self, config_background: &'a str) -> Option<&'a str> {
        match self {
            Background::Transparent => None,
            Background::UseConfig => Some(config_background),
            Background::Color(c) => Some(c.as_str()),
        }
    }
}

/// Which documents to produce and how
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub variants: Vec<Variant>,
    pub board_background: Background,
    pub stones_background: Background,
    pub both_background: Background,
    pub name_suffix: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            variants: vec![Variant::Both],
            board_background: Background::UseConfig,
            stones_background: Background::Transparent,
            both_background: Background::UseConfig,
            name_suffix: String::new(),
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variants(mut self, variants: impl Into<Vec<Variant>>) -> Self {
        self.variants = variants.into();
        self
    }

    pub fn with_background(mut self, variant: Variant, background: Background) -> Self {
        match variant {
            Variant::Board => self.board_background = background,
            Variant::Stones => self.stones_background = background,
            Variant::Both => self.both_background = background,
        }
        self
    }

    pub fn with_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffix = suffix.into();
        self
    }

    pub fn background(&self, variant: Variant) -> &Background {
        match variant {
            Variant::Board => &self.board_background,
            Variant::Stones => &self.stones_background,
            Variant::Both => &self.both_background,
        }
    }

    /// `go_{N}x{N}_{variant}{suffix}.svg`
    pub fn file_name(&self, size: BoardSize, variant: Variant) -> String {
        let suffix = match self.name_suffix.trim() {
            "" => String::new(),
            s if s.starts_with('_') => s.to_string(),
            s => format!("_{}", s),
        };
        format!("go_{}_{}{}.svg", size, variant, suffix)
    }
}

/// One finished document
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedSvg {
    pub file_name: String,
    pub svg: String,
}

/// Everything the layers are rendered from
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub geometry: BoardGeometry,
    pub style: &'a StyleConfig,
    pub occupancy: &'a OccupancyGrid,
}

/// Render every requested variant, in request order, once each
pub fn export_variants(scene: &Scene<'_>, options: &ExportOptions, config: &SvgConfig) -> Vec<ExportedSvg> {
    let grid = render_grid(&scene.geometry, scene.style, config);
    let stones = render_stones(&scene.geometry, scene.occupancy, scene.style, config);

    let mut seen = Vec::new();
    let mut documents = Vec::new();
    for &variant in &options.variants {
        if seen.contains(&variant) {
            warn!("export variant '{}' requested more than once", variant);
            continue;
        }
        seen.push(variant);

        let color = options
            .background(variant)
            .resolve(&scene.style.background_color);
        let background = render_background(&scene.geometry, color, config);

        let mut builder = SvgBuilder::new(config.clone());
        builder.add_fragment(&background);
        if variant.includes_grid() {
            builder.add_fragment(&grid);
        }
        if variant.includes_stones() {
            builder.add_fragment(&stones);
        }

        let file_name = options.file_name(scene.geometry.size(), variant);
        info!("rendered {}", file_name);
        documents.push(ExportedSvg {
            file_name,
            svg: builder.build(&scene.geometry),
        });
    }
    documents
}
