//! SGF game record parsing
//!
//! Text is tokenized with logos, parsed into a tree with chumsky, and the
//! main line is then interpreted into an ordered list of placements.

pub mod ast;
mod grammar;
pub mod lexer;
pub mod record;

pub use ast::*;
pub use grammar::parse;
pub use record::{interpret, parse_game, GameRecord, Placement};
