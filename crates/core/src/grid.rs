//! Grid module - owns the cell state of the playfield
//!
//! The grid is `width x height` cells stored in a flat row-major vector.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Row -1 and above are valid spawn rows: they classify as `Above` and every
//! write to them is a no-op.

use crate::error::CoreError;
use crate::types::{Cell, Classification, Color, Position};

/// The playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. Both dimensions must be non-zero.
    pub fn new(width: u16, height: u16) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        })
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.x >= self.width as i32 || pos.y < 0 || pos.y >= self.height as i32 {
            return None;
        }
        Some((pos.y as usize) * (self.width as usize) + (pos.x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Point new pieces are centered on: middle column, one row above the grid.
    pub fn spawn_point(&self) -> Position {
        Position::new(self.width as i32 / 2, -1)
    }

    /// Get cell at `pos`, `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Bounds-and-occupancy query.
    ///
    /// Horizontal bounds are checked first, then vertical, then occupancy, so a
    /// cell left of the wall is `Left` even when it is also above the grid.
    pub fn classify(&self, pos: Position) -> Classification {
        if pos.x < 0 {
            return Classification::Left;
        }
        if pos.x >= self.width as i32 {
            return Classification::Right;
        }
        if pos.y < 0 {
            return Classification::Above;
        }
        if pos.y >= self.height as i32 {
            return Classification::Below;
        }
        match self.get(pos) {
            Some(cell) if cell.is_occupied() => Classification::Occupied,
            _ => Classification::Unoccupied,
        }
    }

    /// Mark the cell unoccupied. Out of bounds is a no-op.
    pub fn clear(&mut self, pos: Position) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = Cell::Empty;
        }
    }

    /// Write color and occupancy. Out of bounds is a no-op.
    pub fn set(&mut self, pos: Position, color: Color, occupied: bool) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = Cell::new(color, occupied);
        }
    }

    /// Whether every cell in row `y` is occupied. False when `y` is out of bounds.
    pub fn is_row_complete(&self, y: i32) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_occupied()))
    }

    /// Clear every cell of row `y`.
    pub fn remove_row(&mut self, y: i32) {
        for x in 0..self.width as i32 {
            self.clear(Position::new(x, y));
        }
    }

    /// Move rows `from_y` down to `to_y_exclusive + 1` down by `amount`.
    ///
    /// Rows are visited bottom-up so a row is always read before anything is
    /// written over it. Occupied cells are copied to `y + amount`; the source
    /// row is cleared. Rows outside the grid are skipped.
    pub fn shift_rows_down(&mut self, from_y: i32, to_y_exclusive: i32, amount: i32) {
        let mut y = from_y;
        while y > to_y_exclusive {
            if y >= 0 && y < self.height as i32 {
                for x in 0..self.width as i32 {
                    let pos = Position::new(x, y);
                    if let Some(Cell::Settled(color)) = self.get(pos) {
                        self.set(Position::new(x, y + amount), color, true);
                    }
                    self.clear(pos);
                }
            }
            y -= 1;
        }
    }

    /// Cells of row `y`, or `None` outside the grid.
    pub fn row(&self, y: i32) -> Option<&[Cell]> {
        let start = self.index(Position::new(0, y))?;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells in the whole grid.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Clear the entire grid
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Build a grid from text rows for tests: `#` is a settled cell, anything
    /// else is empty. Rows are bottom-aligned; missing top rows are empty.
    #[cfg(test)]
    pub(crate) fn from_rows(width: u16, height: u16, rows: &[&str]) -> Self {
        let mut grid = Self::new(width, height).unwrap();
        let top = height as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.set(Position::new(x as i32, (top + i) as i32), Color::RED, true);
                }
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: crate::types::DEFAULT_WIDTH,
            height: crate::types::DEFAULT_HEIGHT,
            cells: vec![
                Cell::Empty;
                crate::types::DEFAULT_WIDTH as usize * crate::types::DEFAULT_HEIGHT as usize
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::default();
        assert_eq!(grid.index(Position::new(0, 0)), Some(0));
        assert_eq!(grid.index(Position::new(9, 0)), Some(9));
        assert_eq!(grid.index(Position::new(0, 1)), Some(10));
        assert_eq!(grid.index(Position::new(9, 19)), Some(199));
        assert_eq!(grid.index(Position::new(-1, 0)), None);
        assert_eq!(grid.index(Position::new(10, 0)), None);
        assert_eq!(grid.index(Position::new(0, 20)), None);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 20),
            Err(CoreError::InvalidDimensions {
                width: 0,
                height: 20
            })
        );
        assert!(Grid::new(10, 0).is_err());
    }

    #[test]
    fn test_classify_prefers_horizontal_bounds() {
        let grid = Grid::default();
        assert_eq!(grid.classify(Position::new(-1, -1)), Classification::Left);
        assert_eq!(grid.classify(Position::new(10, 25)), Classification::Right);
        assert_eq!(grid.classify(Position::new(4, -3)), Classification::Above);
        assert_eq!(grid.classify(Position::new(4, 20)), Classification::Below);
    }

    #[test]
    fn test_row_out_of_bounds_is_none() {
        let grid = Grid::from_rows(3, 2, &["#..", "###"]);
        assert_eq!(grid.row(0).map(<[Cell]>::len), Some(3));
        assert_eq!(grid.row(0).unwrap()[0], Cell::Settled(Color::RED));
        assert!(grid.row(-1).is_none());
        assert!(grid.row(2).is_none());
        assert!(grid.is_row_complete(1));
        assert!(!grid.is_row_complete(2));
    }

    #[test]
    fn test_falling_cells_are_unoccupied() {
        let mut grid = Grid::default();
        grid.set(Position::new(2, 2), Color::GREEN, false);
        assert_eq!(grid.classify(Position::new(2, 2)), Classification::Unoccupied);
        assert_eq!(grid.get(Position::new(2, 2)), Some(Cell::Falling(Color::GREEN)));
    }

    #[test]
    fn test_shift_skips_unoccupied_cells() {
        let mut grid = Grid::from_rows(4, 4, &["#...", ".#..", "....", "...."]);
        grid.set(Position::new(3, 0), Color::BLUE, false);
        grid.shift_rows_down(1, -1, 2);

        assert!(grid.get(Position::new(0, 2)).unwrap().is_occupied());
        assert!(grid.get(Position::new(1, 3)).unwrap().is_occupied());
        // Falling paint is not carried along.
        assert_eq!(grid.get(Position::new(3, 2)), Some(Cell::Empty));
        assert_eq!(grid.get(Position::new(3, 0)), Some(Cell::Empty));
        assert_eq!(grid.occupied_count(), 2);
    }
}
