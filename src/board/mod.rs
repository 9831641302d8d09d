//! Board model: sizes and points, physical geometry, and the accumulated position
//!
//! The position is derived from the parsed SGF record list and never mutated
//! after it has been built.

pub mod geometry;
pub mod position;
pub mod types;

pub use geometry::{BoardGeometry, Layout};
pub use position::{NumberingMode, OccupancyGrid, Occupant, RenderMode, ReplayOptions};
pub use types::*;
