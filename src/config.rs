//! Configuration file loading
//!
//! The TOML document is deserialized into a loose raw structure where every
//! key is optional, then checked and converted into the typed [`Config`].
//! Missing keys take the values of [`DEFAULT_CONFIG`].

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::board::{BoardSize, Layout, NumberingMode, RenderMode, ReplayOptions};
use crate::export::{Background, ExportOptions, Variant};
use crate::renderer::{StyleConfig, SvgConfig};

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for '{key}': {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Default configuration, also the reference for every accepted key
pub const DEFAULT_CONFIG: &str = r##"
grid_size = 19
line_spacing = 22.0
margin = 18.0
line_thickness = 1.0
star_diameter = 2.2
grid_color = "black"
background_color = "white"
font_family = "sans-serif"

[sgf]
enabled = false

[sgf.render]
# "position" or "moves"
mode = "position"
# moves to replay in "moves" mode, 0 = all
moves_limit = 0
# "none", "moves" or "all"
numbering = "none"
number_color = "#ffffff"
white_number_color = "#000000"
outline_color = "#000000"
stone_radius_scale = 0.42
move_number_font_scale = 0.44

[export]
# any of "board", "stones", "both"
variants = ["both"]
# "transparent", "use_config_background" or a CSS color
board_background = "use_config_background"
stones_background = "transparent"
both_background = "use_config_background"
name_suffix = ""

[output]
xml_declaration = true
pretty_print = true
class_prefix = "go-"
"##;

#[derive(Deserialize, Default)]
struct RawConfig {
    grid_size: Option<i64>,
    line_spacing: Option<f64>,
    margin: Option<f64>,
    line_thickness: Option<f64>,
    star_diameter: Option<f64>,
    grid_color: Option<String>,
    background_color: Option<String>,
    font_family: Option<String>,
    sgf: Option<RawSgf>,
    export: Option<RawExport>,
    output: Option<RawOutput>,
}

#[derive(Deserialize, Default)]
struct RawSgf {
    enabled: Option<bool>,
    path: Option<PathBuf>,
    render: Option<RawRender>,
}

#[derive(Deserialize, Default)]
struct RawRender {
    mode: Option<String>,
    moves_limit: Option<i64>,
    numbering: Option<String>,
    number_color: Option<String>,
    white_number_color: Option<String>,
    outline_color: Option<String>,
    stone_radius_scale: Option<f64>,
    move_number_font_scale: Option<f64>,
}

#[derive(Deserialize, Default)]
struct RawExport {
    variants: Option<Vec<String>>,
    board_background: Option<String>,
    stones_background: Option<String>,
    both_background: Option<String>,
    name_suffix: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawOutput {
    xml_declaration: Option<bool>,
    pretty_print: Option<bool>,
    class_prefix: Option<String>,
}

/// Where the SGF overlay comes from and how it is replayed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SgfOptions {
    pub enabled: bool,
    pub path: Option<PathBuf>,
    pub render: ReplayOptions,
}

/// Fully validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Board size used when the SGF has no `SZ`, or when there is no SGF
    pub grid_size: BoardSize,
    pub layout: Layout,
    pub style: StyleConfig,
    pub sgf: SgfOptions,
    pub export: ExportOptions,
    pub svg: SvgConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config::from_str(DEFAULT_CONFIG).expect("default config is valid")
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Use this SGF file and enable the overlay
    pub fn with_sgf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sgf.enabled = true;
        self.sgf.path = Some(path.into());
        self
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let sgf = raw.sgf.unwrap_or_default();
        let render = sgf.render.unwrap_or_default();
        let export = raw.export.unwrap_or_default();
        let output = raw.output.unwrap_or_default();

        let grid_size = match raw.grid_size {
            None => BoardSize::Nineteen,
            Some(n) => BoardSize::from_lines(n).ok_or_else(|| {
                ConfigError::invalid("grid_size", format!("{} is not one of 9, 13, 19", n))
            })?,
        };

        let mut layout = Layout::default();
        if let Some(spacing) = raw.line_spacing {
            layout.line_spacing = spacing;
        }
        if let Some(margin) = raw.margin {
            layout.margin = margin;
        }

        let mut style = StyleConfig::default();
        if let Some(v) = raw.line_thickness {
            style.line_thickness = v;
        }
        if let Some(v) = raw.star_diameter {
            style.star_diameter = v;
        }
        if let Some(v) = render.stone_radius_scale {
            style.stone_radius_scale = v;
        }
        if let Some(v) = render.move_number_font_scale {
            style.move_number_font_scale = v;
        }
        set_text(&mut style.grid_color, raw.grid_color, "grid_color")?;
        set_text(&mut style.background_color, raw.background_color, "background_color")?;
        set_text(&mut style.font_family, raw.font_family, "font_family")?;
        set_text(&mut style.number_color, render.number_color, "sgf.render.number_color")?;
        set_text(
            &mut style.white_number_color,
            render.white_number_color,
            "sgf.render.white_number_color",
        )?;
        set_text(&mut style.outline_color, render.outline_color, "sgf.render.outline_color")?;

        let mut replay = ReplayOptions::default();
        if let Some(mode) = render.mode {
            replay.mode = parse_mode(&mode)?;
        }
        if let Some(limit) = render.moves_limit {
            replay.moves_limit = u32::try_from(limit).map_err(|_| {
                ConfigError::invalid(
                    "sgf.render.moves_limit",
                    format!("{} is not a non-negative move count", limit),
                )
            })?;
        }
        if let Some(numbering) = render.numbering {
            replay.numbering = parse_numbering(&numbering)?;
        }

        let mut options = ExportOptions::default();
        if let Some(names) = export.variants {
            options.variants = names
                .iter()
                .map(|name| {
                    Variant::parse(name).ok_or_else(|| {
                        ConfigError::invalid(
                            "export.variants",
                            format!("'{}' is not one of {}", name, Variant::NAMES.join(", ")),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
        }
        for (key, spec, slot) in [
            ("export.board_background", export.board_background, &mut options.board_background),
            ("export.stones_background", export.stones_background, &mut options.stones_background),
            ("export.both_background", export.both_background, &mut options.both_background),
        ] {
            if let Some(spec) = spec {
                *slot = parse_background(key, &spec)?;
            }
        }
        if let Some(suffix) = export.name_suffix {
            options.name_suffix = suffix;
        }

        let mut svg = SvgConfig::default();
        if let Some(v) = output.xml_declaration {
            svg.standalone = v;
        }
        if let Some(v) = output.pretty_print {
            svg.pretty_print = v;
        }
        if let Some(prefix) = output.class_prefix {
            svg.class_prefix = (!prefix.is_empty()).then_some(prefix);
        }

        Ok(Config {
            grid_size,
            layout,
            style,
            sgf: SgfOptions {
                enabled: sgf.enabled.unwrap_or(false),
                path: sgf.path,
                render: replay,
            },
            export: options,
            svg,
        })
    }
}

fn set_text(slot: &mut String, value: Option<String>, key: &str) -> Result<(), ConfigError> {
    if let Some(value) = value {
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::invalid(key, "must not be empty"));
        }
        *slot = value.to_string();
    }
    Ok(())
}

fn parse_mode(value: &str) -> Result<RenderMode, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "position" => Ok(RenderMode::Position),
        "moves" => Ok(RenderMode::Moves),
        _ => Err(ConfigError::invalid(
            "sgf.render.mode",
            format!("'{}' is not one of position, moves", value),
        )),
    }
}

fn parse_numbering(value: &str) -> Result<NumberingMode, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" => Ok(NumberingMode::None),
        "moves" | "moves_only" => Ok(NumberingMode::MovesOnly),
        "all" => Ok(NumberingMode::All),
        _ => Err(ConfigError::invalid(
            "sgf.render.numbering",
            format!("'{}' is not one of none, moves, all", value),
        )),
    }
}

fn parse_background(key: &str, spec: &str) -> Result<Background, ConfigError> {
    if spec.trim().is_empty() {
        return Err(ConfigError::invalid(
            key,
            "expected 'transparent', 'use_config_background' or a color",
        ));
    }
    Ok(Background::parse(spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.grid_size, BoardSize::Nineteen);
        assert_eq!(config.layout, Layout::default());
        assert_eq!(config.style, StyleConfig::default());
        assert_eq!(config.sgf, SgfOptions::default());
        assert_eq!(config.export, ExportOptions::default());
        assert!(config.svg.standalone);
    }

    #[test]
    fn test_empty_document_matches_default() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.grid_size, BoardSize::Nineteen);
        assert_eq!(config.style, StyleConfig::default());
        assert_eq!(config.export, ExportOptions::default());
    }

    #[test]
    fn test_full_document() {
        let config = Config::from_str(
            r##"
grid_size = 9
background_color = "#dcb35c"

[sgf]
enabled = true
path = "game.sgf"

[sgf.render]
mode = "Moves"
moves_limit = 20
numbering = "ALL"
stone_radius_scale = 0.45

[export]
variants = ["board", "stones"]
stones_background = "#ffffff"
name_suffix = "print"

[output]
class_prefix = ""
"##,
        )
        .unwrap();

        assert_eq!(config.grid_size, BoardSize::Nine);
        assert_eq!(config.style.background_color, "#dcb35c");
        assert_eq!(config.style.stone_radius_scale, 0.45);
        assert_eq!(
            config.sgf,
            SgfOptions {
                enabled: true,
                path: Some(PathBuf::from("game.sgf")),
                render: ReplayOptions::new()
                    .with_mode(RenderMode::Moves)
                    .with_moves_limit(20)
                    .with_numbering(NumberingMode::All),
            }
        );
        assert_eq!(config.export.variants, vec![Variant::Board, Variant::Stones]);
        assert_eq!(
            config.export.stones_background,
            Background::Color("#ffffff".to_string())
        );
        assert_eq!(config.export.name_suffix, "print");
        assert_eq!(config.svg.class_prefix, None);
    }

    #[test]
    fn test_numbering_aliases() {
        for value in ["moves", "moves_only", " Moves "] {
            let config =
                Config::from_str(&format!("[sgf.render]\nnumbering = \"{}\"", value)).unwrap();
            assert_eq!(config.sgf.render.numbering, NumberingMode::MovesOnly);
        }
    }

    #[test]
    fn test_invalid_grid_size() {
        let err = Config::from_str("grid_size = 15").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "grid_size"));
    }

    #[test]
    fn test_negative_moves_limit() {
        let err = Config::from_str("[sgf.render]\nmoves_limit = -1").unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { ref key, .. } if key == "sgf.render.moves_limit")
        );
    }

    #[test]
    fn test_unknown_variant() {
        let err = Config::from_str("[export]\nvariants = [\"poster\"]").unwrap_err();
        assert!(err.to_string().contains("poster"));
    }

    #[test]
    fn test_empty_color_rejected() {
        let err = Config::from_str("grid_color = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "grid_color"));
    }

    #[test]
    fn test_empty_background_rejected() {
        let err = Config::from_str("[export]\nboth_background = \"\"").unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { ref key, .. } if key == "export.both_background")
        );
    }

    #[test]
    fn test_toml_syntax_error() {
        assert!(matches!(
            Config::from_str("grid_size = ").unwrap_err(),
            ConfigError::Toml(_)
        ));
    }

    #[test]
    fn test_with_sgf_path() {
        let config = Config::default().with_sgf_path("demo.sgf");
        assert!(config.sgf.enabled);
        assert_eq!(config.sgf.path, Some(PathBuf::from("demo.sgf")));
    }
}
