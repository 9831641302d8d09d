//! Interpretation of a parsed SGF collection as a flat list of placements
//!
//! Only the main line of the first game tree is followed. The result is an
//! ordered record list that the board accumulator replays.

use log::{debug, info, warn};

use crate::board::{BoardSize, GridPoint, StoneColor};
use crate::error::{ParseError, Span};
use crate::sgf::ast::{Collection, Node, Property, Spanned};

/// One board mutation taken from the game record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Initial position: `AB`/`AW` place a stone, `AE` (stone = None) clears the point
    Setup {
        point: GridPoint,
        stone: Option<StoneColor>,
    },
    /// A played move, numbered from 1 in play order; `point` is None for a pass
    Move {
        number: u32,
        color: StoneColor,
        point: Option<GridPoint>,
    },
}

/// The board size and placements of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub board_size: BoardSize,
    /// Whether the size came from an `SZ` property rather than the fallback
    pub size_declared: bool,
    pub placements: Vec<Placement>,
}

impl GameRecord {
    /// Number of move records (passes included)
    pub fn move_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| matches!(p, Placement::Move { .. }))
            .count()
    }
}

/// Parse SGF text into a game record
///
/// `fallback_size` is used when the main line carries no `SZ` property.
pub fn parse_game(source: &str, fallback_size: BoardSize) -> Result<GameRecord, Vec<ParseError>> {
    let collection = super::parse(source)?;
    interpret(&collection, fallback_size)
}

/// Interpret the main line of the first game tree
pub fn interpret(collection: &Collection, fallback_size: BoardSize) -> Result<GameRecord, Vec<ParseError>> {
    let Some(tree) = collection.trees.first() else {
        return Err(vec![ParseError::syntax(0..0, "no game tree found")]);
    };
    if collection.trees.len() > 1 {
        debug!(
            "collection holds {} game trees; only the first is used",
            collection.trees.len()
        );
    }

    let main_line = tree.main_line();
    let declared = find_board_size(&main_line).map_err(|e| vec![e])?;
    let board_size = declared.unwrap_or(fallback_size);
    info!(
        "board size {} ({})",
        board_size,
        if declared.is_some() { "from SZ" } else { "default" }
    );

    let mut interpreter = Interpreter::new(board_size);
    for node in &main_line {
        for property in &node.properties {
            interpreter.apply(property);
        }
    }

    if !interpreter.errors.is_empty() {
        return Err(interpreter.errors);
    }

    Ok(GameRecord {
        board_size,
        size_declared: declared.is_some(),
        placements: interpreter.placements,
    })
}

/// First `SZ` on the main line, validated
fn find_board_size(main_line: &[&Node]) -> Result<Option<BoardSize>, ParseError> {
    let Some(value) = main_line
        .iter()
        .find_map(|n| n.get("SZ"))
        .and_then(|p| p.values.first())
    else {
        return Ok(None);
    };

    parse_board_size(&value.node)
        .map(Some)
        .ok_or_else(|| ParseError::UnsupportedBoardSize {
            value: value.node.clone(),
            span: value.span.clone(),
        })
}

/// `N` or the square form `N:N`
fn parse_board_size(value: &str) -> Option<BoardSize> {
    let value = value.trim();
    let lines = match value.split_once(':') {
        Some((cols, rows)) => {
            let cols: i64 = cols.trim().parse().ok()?;
            let rows: i64 = rows.trim().parse().ok()?;
            if cols != rows {
                return None;
            }
            cols
        }
        None => value.parse().ok()?,
    };
    BoardSize::from_lines(lines)
}

struct Interpreter {
    size: BoardSize,
    next_move: u32,
    placements: Vec<Placement>,
    errors: Vec<ParseError>,
}

impl Interpreter {
    fn new(size: BoardSize) -> Self {
        Self {
            size,
            next_move: 1,
            placements: vec![],
            errors: vec![],
        }
    }

    fn apply(&mut self, property: &Property) {
        let ident = property.ident.node.as_str();
        match ident {
            "B" => self.apply_move(property, StoneColor::Black),
            "W" => self.apply_move(property, StoneColor::White),
            "AB" => self.apply_setup(property, Some(StoneColor::Black)),
            "AW" => self.apply_setup(property, Some(StoneColor::White)),
            "AE" => self.apply_setup(property, None),
            "SZ" => {}
            other => debug!("ignoring property {}", other),
        }
    }

    fn apply_move(&mut self, property: &Property, color: StoneColor) {
        let ident = &property.ident.node;
        if property.values.len() > 1 {
            warn!(
                "property {} has {} values; using the first",
                ident,
                property.values.len()
            );
        }
        let Some(value) = property.values.first() else {
            return;
        };

        let point = match value.node.trim() {
            // FF[3] encodes a pass as `tt` on boards up to 19x19
            "" | "tt" => None,
            coord => match self.point(ident, coord, &value.span) {
                Ok(p) => Some(p),
                Err(e) => {
                    self.errors.push(e);
                    return;
                }
            },
        };

        let number = self.next_move;
        self.next_move += 1;
        self.placements.push(Placement::Move {
            number,
            color,
            point,
        });
    }

    fn apply_setup(&mut self, property: &Property, stone: Option<StoneColor>) {
        let ident = &property.ident.node;
        for value in &property.values {
            match self.point_list(ident, value) {
                Ok(points) => {
                    self.placements
                        .extend(points.into_iter().map(|point| Placement::Setup { point, stone }));
                }
                Err(e) => self.errors.push(e),
            }
        }
    }

    /// A single point or a compressed `xy:zw` rectangle
    fn point_list(&self, ident: &str, value: &Spanned<String>) -> Result<Vec<GridPoint>, ParseError> {
        let text = value.node.trim();
        if text.is_empty() {
            warn!("ignoring empty value in property {}", ident);
            return Ok(vec![]);
        }

        let Some((from, to)) = text.split_once(':') else {
            return Ok(vec![self.point(ident, text, &value.span)?]);
        };
        let a = self.point(ident, from, &value.span)?;
        let b = self.point(ident, to, &value.span)?;

        let points = (a.row.min(b.row)..=a.row.max(b.row))
            .flat_map(|row| (a.col.min(b.col)..=a.col.max(b.col)).map(move |col| GridPoint::new(row, col)))
            .collect();
        Ok(points)
    }

    /// Two lowercase letters, column first
    fn point(&self, ident: &str, coord: &str, span: &Span) -> Result<GridPoint, ParseError> {
        let invalid = || ParseError::InvalidPoint {
            property: ident.to_string(),
            value: coord.to_string(),
            span: span.clone(),
        };

        let bytes = coord.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_lowercase) {
            return Err(invalid());
        }
        let col = bytes[0] - b'a';
        let row = bytes[1] - b'a';

        if !self.size.contains_index(col) || !self.size.contains_index(row) {
            return Err(ParseError::PointOutOfRange {
                property: ident.to_string(),
                value: coord.to_string(),
                size: self.size,
                span: span.clone(),
            });
        }
        Ok(GridPoint::new(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(row: u8, col: u8, stone: Option<StoneColor>) -> Placement {
        Placement::Setup {
            point: GridPoint::new(row, col),
            stone,
        }
    }

    #[test]
    fn test_board_size_forms() {
        assert_eq!(parse_board_size("19"), Some(BoardSize::Nineteen));
        assert_eq!(parse_board_size(" 13 "), Some(BoardSize::Thirteen));
        assert_eq!(parse_board_size("9:9"), Some(BoardSize::Nine));
        assert_eq!(parse_board_size("9:13"), None);
        assert_eq!(parse_board_size("7"), None);
        assert_eq!(parse_board_size("abc"), None);
    }

    #[test]
    fn test_fallback_size_without_sz() {
        let record = parse_game("(;B[aa])", BoardSize::Thirteen).expect("Should parse");
        assert_eq!(record.board_size, BoardSize::Thirteen);
        assert!(!record.size_declared);
    }

    #[test]
    fn test_sz_overrides_fallback() {
        let record = parse_game("(;SZ[9])", BoardSize::Nineteen).expect("Should parse");
        assert_eq!(record.board_size, BoardSize::Nine);
        assert!(record.size_declared);
    }

    #[test]
    fn test_column_row_convention() {
        let record = parse_game("(;SZ[19];B[db])", BoardSize::Nineteen).expect("Should parse");
        assert_eq!(
            record.placements,
            vec![Placement::Move {
                number: 1,
                color: StoneColor::Black,
                point: Some(GridPoint::new(1, 3)),
            }]
        );
    }

    #[test]
    fn test_setup_does_not_consume_move_numbers() {
        let record =
            parse_game("(;AB[aa];W[bb];AW[cc];B[dd])", BoardSize::Nine).expect("Should parse");
        let numbers: Vec<_> = record
            .placements
            .iter()
            .filter_map(|p| match p {
                Placement::Move { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_pass_moves() {
        let record = parse_game("(;SZ[19];B[];W[tt];B[aa])", BoardSize::Nineteen).expect("Should parse");
        assert_eq!(record.move_count(), 3);
        assert!(matches!(
            record.placements[0],
            Placement::Move { number: 1, point: None, .. }
        ));
        assert!(matches!(
            record.placements[1],
            Placement::Move { number: 2, point: None, .. }
        ));
    }

    #[test]
    fn test_add_empty() {
        let record = parse_game("(;AB[aa];AE[aa])", BoardSize::Nine).expect("Should parse");
        assert_eq!(
            record.placements,
            vec![
                setup(0, 0, Some(StoneColor::Black)),
                setup(0, 0, None),
            ]
        );
    }

    #[test]
    fn test_compressed_point_list() {
        let record = parse_game("(;AW[bb:ca])", BoardSize::Nine).expect("Should parse");
        assert_eq!(
            record.placements,
            vec![
                setup(0, 1, Some(StoneColor::White)),
                setup(0, 2, Some(StoneColor::White)),
                setup(1, 1, Some(StoneColor::White)),
                setup(1, 2, Some(StoneColor::White)),
            ]
        );
    }

    #[test]
    fn test_unknown_properties_ignored() {
        let record = parse_game(
            "(;GM[1]FF[4]PB[Black \\] player]C[comment];B[aa]LB[aa:A])",
            BoardSize::Nine,
        )
        .expect("Should parse");
        assert_eq!(record.placements.len(), 1);
    }

    #[test]
    fn test_variations_ignored() {
        let record = parse_game("(;SZ[9];B[aa](;W[bb])(;W[cc];B[dd]))", BoardSize::Nine)
            .expect("Should parse");
        assert_eq!(record.move_count(), 2);
        assert!(matches!(
            record.placements[1],
            Placement::Move { point: Some(p), .. } if p == GridPoint::new(1, 1)
        ));
    }

    #[test]
    fn test_unsupported_size_error() {
        let errs = parse_game("(;SZ[7])", BoardSize::Nineteen).unwrap_err();
        assert_eq!(
            errs,
            vec![ParseError::UnsupportedBoardSize {
                value: "7".to_string(),
                span: 4..7,
            }]
        );
    }

    #[test]
    fn test_out_of_range_point_error() {
        let errs = parse_game("(;SZ[9];B[jj])", BoardSize::Nineteen).unwrap_err();
        assert!(matches!(
            &errs[0],
            ParseError::PointOutOfRange { property, value, size: BoardSize::Nine, .. }
                if property == "B" && value == "jj"
        ));
    }

    #[test]
    fn test_invalid_point_error() {
        let errs = parse_game("(;AB[A1])", BoardSize::Nineteen).unwrap_err();
        assert!(matches!(&errs[0], ParseError::InvalidPoint { .. }));
    }

    #[test]
    fn test_collects_every_bad_point() {
        let errs = parse_game("(;SZ[9];AB[zz][yy];B[xx])", BoardSize::Nine).unwrap_err();
        assert_eq!(errs.len(), 3);
    }

    #[test]
    fn test_empty_setup_value_skipped() {
        let record = parse_game("(;AB[][aa])", BoardSize::Nine).expect("Should parse");
        assert_eq!(record.placements, vec![setup(0, 0, Some(StoneColor::Black))]);
    }
}
