//! goban-svg - Go board diagrams as SVG, optionally overlaid with an SGF game
//!
//! This library provides an SGF parser, a board state accumulator and an SVG
//! renderer producing printable (millimeter-sized) board diagrams.
//!
//! # Example
//!
//! ```rust
//! use goban_svg::{generate, Config};
//!
//! let docs = generate(&Config::default(), Some("(;SZ[9];B[ee];W[cc])")).unwrap();
//! assert_eq!(docs[0].file_name, "go_9x9_both.svg");
//! assert!(docs[0].svg.contains("<svg"));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod export;
pub mod renderer;
pub mod sgf;

pub use board::{BoardGeometry, BoardSize, GridPoint, Layout, OccupancyGrid, ReplayOptions, StoneColor};
pub use config::{Config, ConfigError};
pub use error::ParseError;
pub use export::{export_variants, Background, ExportOptions, ExportedSvg, Scene, Variant};
pub use renderer::{PreconditionError, StyleConfig, SvgConfig};
pub use sgf::{parse_game, GameRecord, Placement};

use log::info;
use thiserror::Error;

/// Errors that can occur during the generate pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Error in the SGF text
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error in the configuration file
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Unusable geometry or scale value
    #[error("{0}")]
    Precondition(#[from] PreconditionError),
}

impl From<Vec<ParseError>> for Error {
    fn from(errors: Vec<ParseError>) -> Self {
        Error::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render every configured export variant
///
/// `sgf` is the text of the game to overlay, or None for empty boards. The
/// board size comes from the game's `SZ` property when present, otherwise from
/// `config.grid_size`. Nothing is rendered unless every check passes.
///
/// # Example
///
/// ```rust
/// use goban_svg::{generate, Config, ExportOptions, Variant};
///
/// let mut config = Config::default();
/// config.export = ExportOptions::new()
///     .with_variants(vec![Variant::Board, Variant::Stones])
///     .with_name_suffix("a4");
///
/// let docs = generate(&config, None).unwrap();
/// let names: Vec<_> = docs.iter().map(|d| d.file_name.as_str()).collect();
/// assert_eq!(names, ["go_19x19_board_a4.svg", "go_19x19_stones_a4.svg"]);
/// ```
pub fn generate(config: &Config, sgf: Option<&str>) -> Result<Vec<ExportedSvg>, Error> {
    config.style.validate()?;
    renderer::validate_layout(&config.layout)?;

    let (size, occupancy) = match sgf {
        Some(source) => {
            let record = parse_game(source, config.grid_size)?;
            let occupancy =
                OccupancyGrid::accumulate(record.board_size, &record.placements, &config.sgf.render);
            info!(
                "{} stones on the board after {} records",
                occupancy.len(),
                record.placements.len()
            );
            (record.board_size, occupancy)
        }
        None => (config.grid_size, OccupancyGrid::empty(config.grid_size)),
    };

    let scene = Scene {
        geometry: BoardGeometry::new(size, &config.layout),
        style: &config.style,
        occupancy: &occupancy,
    };
    Ok(export_variants(&scene, &config.export, &config.svg))
}
