//! Core board types shared by the parser, the accumulator and the renderer

use std::fmt;

/// Supported board sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoardSize {
    Nine,
    Thirteen,
    Nineteen,
}

impl BoardSize {
    /// All supported sizes, smallest first
    pub const ALL: [BoardSize; 3] = [BoardSize::Nine, BoardSize::Thirteen, BoardSize::Nineteen];

    /// Convert a line count into a board size
    ///
    /// Returns None for anything other than 9, 13 or 19.
    pub fn from_lines(lines: i64) -> Option<Self> {
        match lines {
            9 => Some(BoardSize::Nine),
            13 => Some(BoardSize::Thirteen),
            19 => Some(BoardSize::Nineteen),
            _ => None,
        }
    }

    /// Number of lines in each direction
    pub fn lines(self) -> u8 {
        match self {
            BoardSize::Nine => 9,
            BoardSize::Thirteen => 13,
            BoardSize::Nineteen => 19,
        }
    }

    /// Whether a 0-based line index lies on this board
    pub fn contains_index(self, index: u8) -> bool {
        index < self.lines()
    }

    /// Conventional star points, sorted row-major
    pub fn hoshi_points(self) -> Vec<GridPoint> {
        let lines: &[u8] = match self {
            BoardSize::Nine => &[2, 6],
            BoardSize::Thirteen => &[3, 9],
            BoardSize::Nineteen => &[3, 9, 15],
        };

        let mut points: Vec<GridPoint> = lines
            .iter()
            .flat_map(|&row| lines.iter().map(move |&col| GridPoint::new(row, col)))
            .collect();

        // 13x13 adds tengen to the four corner points
        if self == BoardSize::Thirteen {
            let mid = self.lines() / 2;
            points.push(GridPoint::new(mid, mid));
        }

        points.sort();
        points
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.lines();
        write!(f, "{}x{}", n, n)
    }
}

/// An intersection on the board, 0-indexed from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    pub row: u8,
    pub col: u8,
}

impl GridPoint {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoneColor {
    Black,
    White,
}

impl StoneColor {
    /// Fill color used when drawing the stone
    pub fn fill(self) -> &'static str {
        match self {
            StoneColor::Black => "#000000",
            StoneColor::White => "#ffffff",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StoneColor::Black => "black",
            StoneColor::White => "white",
        }
    }
}

/// A physical position in SVG user units (millimeters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines() {
        assert_eq!(BoardSize::from_lines(9), Some(BoardSize::Nine));
        assert_eq!(BoardSize::from_lines(13), Some(BoardSize::Thirteen));
        assert_eq!(BoardSize::from_lines(19), Some(BoardSize::Nineteen));
        assert_eq!(BoardSize::from_lines(7), None);
        assert_eq!(BoardSize::from_lines(-19), None);
    }

    #[test]
    fn test_hoshi_counts() {
        assert_eq!(BoardSize::Nine.hoshi_points().len(), 4);
        assert_eq!(BoardSize::Thirteen.hoshi_points().len(), 5);
        assert_eq!(BoardSize::Nineteen.hoshi_points().len(), 9);
    }

    #[test]
    fn test_hoshi_19_positions() {
        let points = BoardSize::Nineteen.hoshi_points();
        for p in &points {
            assert!([3, 9, 15].contains(&p.row));
            assert!([3, 9, 15].contains(&p.col));
        }
        assert!(points.contains(&GridPoint::new(9, 9)));
    }

    #[test]
    fn test_hoshi_13_positions() {
        let points = BoardSize::Thirteen.hoshi_points();
        assert_eq!(
            points,
            vec![
                GridPoint::new(3, 3),
                GridPoint::new(3, 9),
                GridPoint::new(6, 6),
                GridPoint::new(9, 3),
                GridPoint::new(9, 9),
            ]
        );
    }

    #[test]
    fn test_hoshi_9_positions() {
        let points = BoardSize::Nine.hoshi_points();
        assert_eq!(
            points,
            vec![
                GridPoint::new(2, 2),
                GridPoint::new(2, 6),
                GridPoint::new(6, 2),
                GridPoint::new(6, 6),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(BoardSize::Thirteen.to_string(), "13x13");
        assert_eq!(GridPoint::new(2, 5).to_string(), "(2, 5)");
    }
}
