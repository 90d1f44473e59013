//! Clear-and-collapse: remove completed rows and compact the grid in one pass.
//!
//! Rows are visited bottom-most first. A completed row is emptied; any other
//! row is shifted down by the number of rows cleared below it, and finally
//! everything above the span is shifted down by the total count. Shifting the
//! whole stack once by the total from the topmost cleared row would move the
//! rows between two cleared rows twice.

use std::ops::Range;

use crate::grid::Grid;

/// Clear every completed row inside `span` and collapse the grid.
///
/// Only the rows a piece just locked into can have become complete, so the
/// caller passes that piece's row span instead of the whole grid. The span is
/// clamped to the grid; any height works.
///
/// Returns the number of rows cleared.
pub fn clear_completed_rows(grid: &mut Grid, span: Range<i32>) -> usize {
    let top = span.start.max(0);
    let bottom = span.end.min(grid.height() as i32);

    let mut cleared = 0;
    for y in (top..bottom).rev() {
        if grid.is_row_complete(y) {
            grid.remove_row(y);
            cleared += 1;
        } else if cleared > 0 {
            // Rows below are already final, so `y + cleared` is free.
            grid.shift_rows_down(y, y - 1, cleared);
        }
    }
    if cleared == 0 {
        return 0;
    }

    grid.shift_rows_down(top - 1, -1, cleared);

    log::debug!("cleared {} row(s) in {}..{}", cleared, top, bottom);
    cleared as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn occupied(grid: &Grid, x: i32, y: i32) -> bool {
        grid.get(Position::new(x, y)).unwrap().is_occupied()
    }

    #[test]
    fn no_completed_rows_is_a_noop() {
        let mut grid = Grid::from_rows(4, 4, &["#...", "###."]);
        let before = grid.clone();
        assert_eq!(clear_completed_rows(&mut grid, 0..4), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn single_row_drops_everything_above() {
        let mut grid = Grid::from_rows(4, 5, &["#...", ".#..", "####", "..#."]);
        // Rows: 1 "#...", 2 ".#..", 3 "####", 4 "..#."
        assert_eq!(clear_completed_rows(&mut grid, 2..4), 1);

        assert!(occupied(&grid, 0, 2));
        assert!(occupied(&grid, 1, 3));
        assert!(occupied(&grid, 2, 4));
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn adjacent_rows_collapse_together() {
        let mut grid = Grid::from_rows(3, 4, &["#..", "###", "###", ".#."]);
        assert_eq!(clear_completed_rows(&mut grid, 1..3), 2);

        assert!(occupied(&grid, 0, 2));
        assert!(occupied(&grid, 1, 3));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn gap_rows_drop_by_rows_cleared_below_them() {
        // y=0 "..#", y=1 "###", y=2 "#..", y=3 "###", y=4 ".#."
        let mut grid = Grid::from_rows(3, 5, &["..#", "###", "#..", "###", ".#."]);
        assert_eq!(clear_completed_rows(&mut grid, 0..4), 2);

        // Row between the cleared rows drops by one.
        assert!(occupied(&grid, 0, 3));
        // Row above both drops by two.
        assert!(occupied(&grid, 2, 2));
        // Row below both is untouched.
        assert!(occupied(&grid, 1, 4));
        assert_eq!(grid.occupied_count(), 3);
        for x in 0..3 {
            assert!(!occupied(&grid, x, 0));
            assert!(!occupied(&grid, x, 1));
        }
    }

    #[test]
    fn tall_span_clears_every_completed_row() {
        // Six complete rows, more than any piece spans, plus two markers.
        let mut grid =
            Grid::from_rows(3, 9, &["#..", "###", "###", "###", ".#.", "###", "###", "###", "..#"]);
        assert_eq!(clear_completed_rows(&mut grid, -4..30), 6);

        assert!(occupied(&grid, 2, 8));
        assert!(occupied(&grid, 1, 7));
        assert!(occupied(&grid, 0, 6));
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn span_above_grid_is_ignored() {
        let mut grid = Grid::from_rows(2, 2, &["##", "##"]);
        assert_eq!(clear_completed_rows(&mut grid, -2..0), 0);
        assert_eq!(grid.occupied_count(), 4);
    }
}
