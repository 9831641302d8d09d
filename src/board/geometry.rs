//! Mapping between grid intersections and physical SVG coordinates
//!
//! All distances are millimeters. The first line sits `margin` away from the
//! canvas edge and lines are `line_spacing` apart, so every supported board
//! size is laid out with the same constants.

use super::types::{BoardSize, GridPoint, Point};

/// Physical layout constants
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Distance between adjacent grid lines
    pub line_spacing: f64,

    /// Distance from the canvas edge to the outermost lines
    pub margin: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            line_spacing: 22.0,
            margin: 18.0,
        }
    }
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid line spacing
    pub fn with_line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the margin around the grid
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

/// Geometry of one board size under a fixed layout
#[derive(Debug, Clone, PartialEq)]
pub struct BoardGeometry {
    size: BoardSize,
    spacing: f64,
    margin: f64,
}

impl BoardGeometry {
    pub fn new(size: BoardSize, layout: &Layout) -> Self {
        Self {
            size,
            spacing: layout.line_spacing,
            margin: layout.margin,
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Width and height of the square canvas
    pub fn extent(&self) -> f64 {
        self.margin * 2.0 + self.spacing * f64::from(self.size.lines() - 1)
    }

    /// Physical offset of a 0-based line index along either axis
    pub fn line_offset(&self, index: u8) -> f64 {
        self.margin + f64::from(index) * self.spacing
    }

    /// Offset of the first line
    pub fn first_line(&self) -> f64 {
        self.line_offset(0)
    }

    /// Offset of the last line
    pub fn last_line(&self) -> f64 {
        self.line_offset(self.size.lines() - 1)
    }

    /// Center of an intersection (column along x, row along y)
    pub fn center(&self, point: GridPoint) -> Point {
        Point::new(self.line_offset(point.col), self.line_offset(point.row))
    }

    /// Inverse of [`BoardGeometry::center`]
    ///
    /// Snaps to the nearest intersection; returns None when that intersection
    /// is off the board.
    pub fn grid_point_at(&self, point: Point) -> Option<GridPoint> {
        let col = self.index_at(point.x)?;
        let row = self.index_at(point.y)?;
        Some(GridPoint::new(row, col))
    }

    fn index_at(&self, offset: f64) -> Option<u8> {
        let index = ((offset - self.margin) / self.spacing).round();
        if index < 0.0 || index >= f64::from(self.size.lines()) {
            return None;
        }
        Some(index as u8)
    }

    /// Physical centers of the star points
    pub fn hoshi(&self) -> Vec<Point> {
        self.size
            .hoshi_points()
            .into_iter()
            .map(|p| self.center(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = Layout::default();
        assert_eq!(layout.line_spacing, 22.0);
        assert_eq!(layout.margin, 18.0);
    }

    #[test]
    fn test_builder_pattern() {
        let layout = Layout::new().with_line_spacing(10.0).with_margin(5.0);
        assert_eq!(layout.line_spacing, 10.0);
        assert_eq!(layout.margin, 5.0);
    }

    #[test]
    fn test_extent_per_size() {
        let layout = Layout::default();
        assert_eq!(BoardGeometry::new(BoardSize::Nine, &layout).extent(), 212.0);
        assert_eq!(BoardGeometry::new(BoardSize::Thirteen, &layout).extent(), 300.0);
        assert_eq!(BoardGeometry::new(BoardSize::Nineteen, &layout).extent(), 432.0);
    }

    #[test]
    fn test_margins_are_symmetric() {
        let layout = Layout::default();
        for size in BoardSize::ALL {
            let geometry = BoardGeometry::new(size, &layout);
            assert_eq!(geometry.first_line(), layout.margin);
            assert_eq!(geometry.extent() - geometry.last_line(), layout.margin);
        }
    }

    #[test]
    fn test_center_uses_column_for_x() {
        let geometry = BoardGeometry::new(BoardSize::Nine, &Layout::default());
        let p = geometry.center(GridPoint::new(0, 2));
        assert_eq!(p, Point::new(62.0, 18.0));
    }

    #[test]
    fn test_round_trip_every_point() {
        let layout = Layout::new().with_line_spacing(7.3).with_margin(4.1);
        for size in BoardSize::ALL {
            let geometry = BoardGeometry::new(size, &layout);
            for row in 0..size.lines() {
                for col in 0..size.lines() {
                    let gp = GridPoint::new(row, col);
                    assert_eq!(geometry.grid_point_at(geometry.center(gp)), Some(gp));
                }
            }
        }
    }

    #[test]
    fn test_grid_point_at_off_board() {
        let geometry = BoardGeometry::new(BoardSize::Nine, &Layout::default());
        assert_eq!(geometry.grid_point_at(Point::new(0.0, 0.0)), None);
        assert_eq!(geometry.grid_point_at(Point::new(500.0, 18.0)), None);
    }

    #[test]
    fn test_hoshi_physical_positions() {
        let geometry = BoardGeometry::new(BoardSize::Nineteen, &Layout::default());
        let hoshi = geometry.hoshi();
        assert_eq!(hoshi.len(), 9);
        // Tengen sits at the center of the canvas
        let mid = geometry.extent() / 2.0;
        assert!(hoshi.contains(&Point::new(mid, mid)));
    }
}
