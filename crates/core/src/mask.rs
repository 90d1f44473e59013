//! Mask module - boolean shape matrices and their rotations
//!
//! A [`Mask`] is a `width x height` grid of solid/empty flags stored row-major.
//! All access goes through `(x, y)` so the rotation transforms never depend on
//! how the storage is laid out.
//!
//! Rotations are pure: they build a new mask and leave the input untouched.

use crate::error::CoreError;
use crate::types::{Position, Rotation, RotationKind, MAX_PIECE_EXTENT};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Mask {
    /// Build a mask from row-major cells.
    ///
    /// Rejects a cell count that does not match `width * height`, zero or
    /// oversized dimensions, and masks without any solid cell.
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, CoreError> {
        if cells.len() != width * height {
            return Err(CoreError::MaskSizeMismatch {
                width,
                height,
                cells: cells.len(),
            });
        }
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidMask(format!(
                "zero-sized mask {}x{}",
                width, height
            )));
        }
        if width > MAX_PIECE_EXTENT || height > MAX_PIECE_EXTENT {
            return Err(CoreError::PieceTooLarge { width, height });
        }
        if !cells.iter().any(|&solid| solid) {
            return Err(CoreError::InvalidMask("mask has no solid cell".into()));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse rows of text: `X` or `#` is solid, `.`, `_` or space is empty.
    ///
    /// All rows must have the same length.
    pub fn parse(rows: &[&str]) -> Result<Self, CoreError> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            if row.chars().count() != width {
                return Err(CoreError::InvalidMask(format!(
                    "row {:?} is not {} cells wide",
                    row, width
                )));
            }
            for ch in row.chars() {
                cells.push(parse_cell(ch)?);
            }
        }
        Self::new(width, rows.len(), cells)
    }

    /// Parse a flat row-major string of `width * height` cells.
    pub fn parse_flat(width: usize, height: usize, flat: &str) -> Result<Self, CoreError> {
        let cells = flat.chars().map(parse_cell).collect::<Result<Vec<_>, _>>()?;
        Self::new(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` as a position-like vector.
    pub fn size(&self) -> Position {
        Position::new(self.width as i32, self.height as i32)
    }

    /// Whether the cell at column `x`, row `y` is solid.
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Local offsets of every solid cell, row by row, top to bottom.
    pub fn solid_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.get(x, y))
                .map(move |x| Position::new(x as i32, y as i32))
        })
    }

    fn build(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// 90° clockwise. The left column becomes the top row.
    pub fn rotated_right(&self) -> Self {
        let h = self.height;
        Self::build(self.height, self.width, |x, y| self.get(y, h - 1 - x))
    }

    /// 90° counter-clockwise. The right column becomes the top row.
    pub fn rotated_left(&self) -> Self {
        let w = self.width;
        Self::build(self.height, self.width, |x, y| self.get(w - 1 - y, x))
    }

    /// 180°. Dimensions are kept.
    pub fn rotated_twice(&self) -> Self {
        let (w, h) = (self.width, self.height);
        Self::build(w, h, |x, y| self.get(w - 1 - x, h - 1 - y))
    }

    pub fn rotated(&self, kind: RotationKind) -> Self {
        match kind {
            RotationKind::Left => self.rotated_left(),
            RotationKind::Right => self.rotated_right(),
            RotationKind::Twice => self.rotated_twice(),
        }
    }

    /// The mask turned from its template orientation to `rotation`.
    pub fn oriented(&self, rotation: Rotation) -> Self {
        match rotation.as_kind() {
            Some(kind) => self.rotated(kind),
            None => self.clone(),
        }
    }
}

fn parse_cell(ch: char) -> Result<bool, CoreError> {
    match ch {
        'X' | 'x' | '#' => Ok(true),
        '.' | '_' | ' ' => Ok(false),
        other => Err(CoreError::InvalidMask(format!(
            "unexpected mask character {:?}",
            other
        ))),
    }
}
