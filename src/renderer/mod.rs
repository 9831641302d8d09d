//! SVG renderer for boards, stones and backgrounds
//!
//! Every layer is produced independently on the same canvas so that the
//! export step can combine them freely.

pub mod config;
pub mod style;
pub mod svg;

pub use config::SvgConfig;
pub use style::{validate_layout, PreconditionError, StyleConfig};
pub use svg::{render_background, render_grid, render_stones, Fragment, SvgBuilder};
