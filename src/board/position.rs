//! Board state accumulation
//!
//! Replays the placement records of a game onto an empty board. No Go rules
//! are applied: later records simply overwrite earlier occupants, and nothing
//! is ever captured.

use std::collections::BTreeMap;

use log::debug;

use super::types::{BoardSize, GridPoint, StoneColor};
use crate::sgf::Placement;

/// Which records are replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Every record is applied
    #[default]
    Position,
    /// Only the first `moves_limit` moves are applied (setup always is)
    Moves,
}

/// Which stones carry a visible number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberingMode {
    #[default]
    None,
    /// Moves are labelled with their sequence number
    MovesOnly,
    /// Every placed stone is labelled with its ordinal in application order
    All,
}

/// Options controlling how a record list is replayed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplayOptions {
    pub mode: RenderMode,
    /// Number of moves to apply in `Moves` mode; 0 means all
    pub moves_limit: u32,
    pub numbering: NumberingMode,
}

impl ReplayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_moves_limit(mut self, limit: u32) -> Self {
        self.moves_limit = limit;
        self
    }

    pub fn with_numbering(mut self, numbering: NumberingMode) -> Self {
        self.numbering = numbering;
        self
    }

    fn move_allowed(&self, applied_moves: u32) -> bool {
        match self.mode {
            RenderMode::Position => true,
            RenderMode::Moves => self.moves_limit == 0 || applied_moves < self.moves_limit,
        }
    }
}

/// The stone occupying a point, with its label if it has one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub color: StoneColor,
    pub label: Option<u32>,
}

/// Final board state after replaying a record list
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    size: BoardSize,
    points: BTreeMap<GridPoint, Occupant>,
}

impl OccupancyGrid {
    /// An empty board
    pub fn empty(size: BoardSize) -> Self {
        Self {
            size,
            points: BTreeMap::new(),
        }
    }

    /// Replay `placements` in order according to `options`
    ///
    /// Setup records are always applied. Moves are applied while the count of
    /// applied moves (passes included) is below the limit; once it is reached,
    /// further moves are skipped while later setup records still apply.
    pub fn accumulate(size: BoardSize, placements: &[Placement], options: &ReplayOptions) -> Self {
        let mut grid = Self::empty(size);
        let mut applied_moves = 0u32;
        let mut ordinal = 0u32;

        for placement in placements {
            match *placement {
                Placement::Setup {
                    point,
                    stone: Some(color),
                } => {
                    ordinal += 1;
                    let label = match options.numbering {
                        NumberingMode::All => Some(ordinal),
                        _ => None,
                    };
                    grid.points.insert(point, Occupant { color, label });
                }
                Placement::Setup { point, stone: None } => {
                    grid.points.remove(&point);
                }
                Placement::Move {
                    number,
                    color,
                    point,
                } => {
                    if !options.move_allowed(applied_moves) {
                        debug!("skipping move {} beyond limit {}", number, options.moves_limit);
                        continue;
                    }
                    applied_moves += 1;

                    let Some(point) = point else {
                        continue;
                    };
                    ordinal += 1;
                    let label = match options.numbering {
                        NumberingMode::None => None,
                        NumberingMode::MovesOnly => Some(number),
                        NumberingMode::All => Some(ordinal),
                    };
                    grid.points.insert(point, Occupant { color, label });
                }
            }
        }

        grid
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn get(&self, point: GridPoint) -> Option<&Occupant> {
        self.points.get(&point)
    }

    /// Occupied points in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (GridPoint, &Occupant)> + '_ {
        self.points.iter().map(|(p, o)| (*p, o))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
