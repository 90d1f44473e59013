//! Active piece - the falling piece state machine
//!
//! A piece is created by [`ActivePiece::spawn`], moves and rotates while it
//! falls, and is consumed by [`ActivePiece::lock`].
//!
//! While falling its cells are painted into the grid as unoccupied-but-colored
//! (`Cell::Falling`), so collision queries never see the piece itself.
//!
//! Collision checks for moves use edge caches built once per spawn: the cells
//! just outside the piece footprint in each direction, stored in absolute grid
//! coordinates as of the spawn. A move checks `edge + offset`, where `offset`
//! is the total movement since the spawn. Rotation always respawns, which
//! rebuilds the caches for the new orientation.

use arrayvec::ArrayVec;

use crate::collapse::clear_completed_rows;
use crate::grid::Grid;
use crate::mask::Mask;
use crate::types::{Color, Direction, Position, RotationKind, MAX_PIECE_EXTENT};

const MAX_EDGES: usize = MAX_PIECE_EXTENT * MAX_PIECE_EXTENT;

type Edges = ArrayVec<Position, MAX_EDGES>;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivePiece {
    mask: Mask,
    color: Color,
    /// Top-left anchor of the mask in grid coordinates
    position: Position,
    /// Movement since the last spawn
    offset: Position,
    down_edges: Edges,
    left_edges: Edges,
    right_edges: Edges,
}

impl ActivePiece {
    /// Place `mask` with its top-left corner at `anchor`.
    ///
    /// Fails with `None`, leaving the grid untouched, if any solid cell lands on
    /// an occupied cell or outside the left, right or bottom walls. Cells above
    /// the grid are accepted. On success the piece is painted as falling.
    pub fn spawn(grid: &mut Grid, mask: Mask, color: Color, anchor: Position) -> Option<Self> {
        let mut down_edges = Edges::new();
        let mut left_edges = Edges::new();
        let mut right_edges = Edges::new();

        for cell in mask.solid_cells() {
            let pos = anchor + cell;
            if grid.classify(pos).is_blocking() {
                log::debug!("spawn blocked at {:?} ({:?})", pos, grid.classify(pos));
                return None;
            }

            let (x, y) = (cell.x as usize, cell.y as usize);
            // Lowest solid cell of a vertical run.
            if !mask.get(x, y + 1) {
                down_edges.push(pos + Direction::Down.delta());
            }
            // Leftmost / rightmost solid cell of a horizontal run.
            if x == 0 || !mask.get(x - 1, y) {
                left_edges.push(pos + Direction::Left.delta());
            }
            if !mask.get(x + 1, y) {
                right_edges.push(pos + Direction::Right.delta());
            }
        }

        let piece = Self {
            mask,
            color,
            position: anchor,
            offset: Position::ZERO,
            down_edges,
            left_edges,
            right_edges,
        };
        piece.paint(grid, false);
        Some(piece)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn size(&self) -> Position {
        self.mask.size()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Absolute grid positions of every solid cell.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.mask.solid_cells().map(move |cell| self.position + cell)
    }

    /// Whether any solid cell is above row 0.
    pub fn extends_above(&self) -> bool {
        self.cells().any(|pos| pos.y < 0)
    }

    /// Edge cache for a direction, relative to the last spawn.
    pub fn edges(&self, direction: Direction) -> &[Position] {
        match direction {
            Direction::Down => &self.down_edges,
            Direction::Left => &self.left_edges,
            Direction::Right => &self.right_edges,
            Direction::Up => &[],
        }
    }

    /// Move one row down. Returns `true` if the move was blocked, which means
    /// the piece has landed and should be locked.
    pub fn move_down(&mut self, grid: &mut Grid) -> bool {
        !self.step(grid, Direction::Down)
    }

    /// Move one column left. Returns whether the piece moved.
    pub fn move_left(&mut self, grid: &mut Grid) -> bool {
        self.step(grid, Direction::Left)
    }

    /// Move one column right. Returns whether the piece moved.
    pub fn move_right(&mut self, grid: &mut Grid) -> bool {
        self.step(grid, Direction::Right)
    }

    fn step(&mut self, grid: &mut Grid, direction: Direction) -> bool {
        if direction == Direction::Up {
            return false;
        }
        let blocked = self
            .edges(direction)
            .iter()
            .any(|&edge| grid.classify(edge + self.offset).is_blocking());
        if blocked {
            return false;
        }

        self.erase(grid);
        let delta = direction.delta();
        self.position += delta;
        self.offset += delta;
        self.paint(grid, false);
        true
    }

    /// Rotate in place. Returns whether the rotation was applied.
    ///
    /// The rotated box is pushed left just far enough to stay inside the right
    /// wall. There is no push away from the left wall or the floor and no kick
    /// search: if the candidate overlaps anything the piece stays as it was.
    pub fn rotate(&mut self, grid: &mut Grid, kind: RotationKind) -> bool {
        let mask = self.mask.rotated(kind);

        let mut anchor = self.position;
        let overflow = anchor.x + mask.width() as i32 - grid.width() as i32;
        if overflow > 0 {
            anchor.x -= overflow;
        }

        if mask
            .solid_cells()
            .any(|cell| grid.classify(anchor + cell).is_blocking())
        {
            log::trace!("rotation {:?} rejected at {:?}", kind, anchor);
            return false;
        }

        self.erase(grid);
        match Self::spawn(grid, mask, self.color, anchor) {
            Some(rotated) => {
                *self = rotated;
                true
            }
            None => {
                self.paint(grid, false);
                false
            }
        }
    }

    /// Settle the piece into the grid and clear any rows it completed.
    ///
    /// Returns the number of rows cleared.
    pub fn lock(self, grid: &mut Grid) -> usize {
        self.paint(grid, true);
        let top = self.position.y;
        clear_completed_rows(grid, top..top + self.mask.height() as i32)
    }

    fn paint(&self, grid: &mut Grid, occupied: bool) {
        for pos in self.cells() {
            grid.set(pos, self.color, occupied);
        }
    }

    fn erase(&self, grid: &mut Grid) {
        for pos in self.cells() {
            grid.clear(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Classification};

    fn spawn(grid: &mut Grid, rows: &[&str], at: Position) -> ActivePiece {
        ActivePiece::spawn(grid, Mask::parse(rows).unwrap(), Color::PURPLE, at).unwrap()
    }

    #[test]
    fn edge_caches_for_t_piece() {
        let mut grid = Grid::default();
        let piece = spawn(&mut grid, &[".X.", "XXX"], Position::new(3, 5));

        let mut down = piece.edges(Direction::Down).to_vec();
        down.sort_by_key(|p| (p.x, p.y));
        assert_eq!(
            down,
            vec![Position::new(3, 7), Position::new(4, 7), Position::new(5, 7)]
        );

        let mut left = piece.edges(Direction::Left).to_vec();
        left.sort_by_key(|p| p.y);
        assert_eq!(left, vec![Position::new(3, 5), Position::new(2, 6)]);

        let mut right = piece.edges(Direction::Right).to_vec();
        right.sort_by_key(|p| p.y);
        assert_eq!(right, vec![Position::new(5, 5), Position::new(6, 6)]);
    }

    #[test]
    fn spawn_paints_falling_cells() {
        let mut grid = Grid::default();
        spawn(&mut grid, &["XX", "XX"], Position::new(0, 0));
        assert_eq!(grid.get(Position::new(1, 1)), Some(Cell::Falling(Color::PURPLE)));
        assert_eq!(grid.classify(Position::new(1, 1)), Classification::Unoccupied);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn move_tracks_offset_and_repaints() {
        let mut grid = Grid::default();
        let mut piece = spawn(&mut grid, &["XX"], Position::new(4, 0));

        assert!(!piece.move_down(&mut grid));
        assert!(piece.move_left(&mut grid));
        assert_eq!(piece.position(), Position::new(3, 1));
        assert_eq!(piece.offset(), Position::new(-1, 1));

        assert_eq!(grid.get(Position::new(5, 0)), Some(Cell::Empty));
        assert_eq!(grid.get(Position::new(3, 1)), Some(Cell::Falling(Color::PURPLE)));
        assert_eq!(grid.get(Position::new(4, 1)), Some(Cell::Falling(Color::PURPLE)));
    }

    #[test]
    fn walls_block_sideways_moves() {
        let mut grid = Grid::default();
        let mut piece = spawn(&mut grid, &["X"], Position::new(0, 3));
        assert!(!piece.move_left(&mut grid));
        assert_eq!(piece.position(), Position::new(0, 3));

        for _ in 0..9 {
            assert!(piece.move_right(&mut grid));
        }
        assert!(!piece.move_right(&mut grid));
        assert_eq!(piece.position(), Position::new(9, 3));
    }

    #[test]
    fn floor_blocks_move_down() {
        let mut grid = Grid::default();
        let mut piece = spawn(&mut grid, &["X"], Position::new(0, 18));
        assert!(!piece.move_down(&mut grid));
        assert!(piece.move_down(&mut grid));
        assert_eq!(piece.position(), Position::new(0, 19));
    }

    #[test]
    fn gap_inside_a_row_is_checked() {
        let mut grid = Grid::default();
        let mut piece = spawn(&mut grid, &["X.X", "XXX"], Position::new(3, 2));
        // Settled block sitting in the notch.
        grid.set(Position::new(4, 2), Color::RED, true);
        assert!(!piece.move_right(&mut grid));
        assert_eq!(piece.position(), Position::new(3, 2));
    }

    #[test]
    fn rotation_pushes_only_away_from_right_wall() {
        let mut grid = Grid::default();
        let mut piece = spawn(&mut grid, &["X", "X", "X", "X"], Position::new(8, 2));
        assert!(piece.rotate(&mut grid, RotationKind::Right));
        assert_eq!(piece.position(), Position::new(6, 2));
        assert_eq!(piece.size(), Position::new(4, 1));
        assert_eq!(piece.offset(), Position::ZERO);
    }

    #[test]
    fn rotation_rejected_leaves_piece_painted() {
        let mut grid = Grid::default();
        let mut piece = spawn(&mut grid, &["XXX"], Position::new(3, 5));
        grid.set(Position::new(3, 6), Color::RED, true);

        let before = piece.clone();
        assert!(!piece.rotate(&mut grid, RotationKind::Right));
        assert_eq!(piece, before);
        for x in 3..6 {
            assert_eq!(grid.get(Position::new(x, 5)), Some(Cell::Falling(Color::PURPLE)));
        }
    }

    #[test]
    fn lock_settles_cells() {
        let mut grid = Grid::default();
        let piece = spawn(&mut grid, &["XX"], Position::new(0, 19));
        assert_eq!(piece.lock(&mut grid), 0);
        assert!(grid.get(Position::new(0, 19)).unwrap().is_occupied());
        assert!(grid.get(Position::new(1, 19)).unwrap().is_occupied());
    }
}
