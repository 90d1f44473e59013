//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! shared by the engine, the terminal view and the input mapping alike.
//!
//! # Grid Coordinates
//!
//! - `x` grows to the right, `y` grows downward
//! - Row 0 is the top of the visible playfield
//! - Negative rows are "above" the playfield: pieces may spawn there
//!
//! # Default Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 10 | Grid columns |
//! | `DEFAULT_HEIGHT` | 20 | Grid rows |
//! | `DEFAULT_LOW_WATER_MARK` | 3 | Queue length that triggers a refill |
//! | `MAX_PIECE_EXTENT` | 5 | Largest template width or height |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Direction, Position, Rotation, RotationKind};
//!
//! let p = Position::new(3, -1) + Direction::Down.delta();
//! assert_eq!(p, Position::new(3, 0));
//!
//! assert_eq!(Rotation::East.as_kind(), Some(RotationKind::Right));
//! assert!(!RotationKind::Twice.swaps_axes());
//! ```

use std::ops::{Add, AddAssign, Sub};

/// Default grid width in cells (10 columns)
pub const DEFAULT_WIDTH: u16 = 10;

/// Default grid height in cells (20 rows)
pub const DEFAULT_HEIGHT: u16 = 20;

/// Default piece-queue low-water mark.
pub const DEFAULT_LOW_WATER_MARK: usize = 3;

/// Largest width or height a piece template may have.
pub const MAX_PIECE_EXTENT: usize = 5;

/// Points per cleared row, before the exponent is applied.
pub const SCORE_PER_ROW: u32 = 100;

/// Exponent applied to the number of rows cleared by a single lock.
pub const SCORE_ROW_EXPONENT: u32 = 2;

/// Points awarded per tick while the player is accelerating.
pub const SCORE_PER_ACCELERATED_TICK: u32 = 1;

/// Tick interval at score 0, before the minimum is added (milliseconds).
pub const INITIAL_TICK_MS: f64 = 800.0;

/// How quickly the tick interval shrinks as the score grows.
pub const TICK_DECAY: f64 = 0.25;

/// Tick interval floor, also used while accelerating (milliseconds).
pub const MINIMUM_TICK_MS: u32 = 60;

/// Time without a down key event before a terminal host stops accelerating.
pub const ACCELERATE_GRACE_MS: u32 = 150;

/// A grid coordinate. May lie outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Unit movement directions.
///
/// `Up` exists for completeness of the direction table; the engine never
/// moves a piece upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unit vector for this direction (y grows downward).
    pub const fn delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Right => Position::new(1, 0),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
        }
    }
}

/// Rotation requests accepted by the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationKind {
    /// 90° counter-clockwise
    Left,
    /// 90° clockwise
    Right,
    /// 180°
    Twice,
}

impl RotationKind {
    /// Whether the rotation swaps width and height.
    pub fn swaps_axes(self) -> bool {
        !matches!(self, RotationKind::Twice)
    }
}

/// Absolute orientation of a queued piece relative to its template.
///
/// The cycle goes North → East → South → West → North (clockwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Orientation for an index in `0..4` (wraps for larger values).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_index(0), Rotation::North);
    /// assert_eq!(Rotation::from_index(3), Rotation::West);
    /// assert_eq!(Rotation::from_index(5), Rotation::East);
    /// ```
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// The single transform that takes the template mask to this orientation.
    pub fn as_kind(self) -> Option<RotationKind> {
        match self {
            Rotation::North => None,
            Rotation::East => Some(RotationKind::Right),
            Rotation::South => Some(RotationKind::Twice),
            Rotation::West => Some(RotationKind::Left),
        }
    }
}

/// 24-bit RGB color of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const CYAN: Color = Color::new(0, 240, 240);
    pub const YELLOW: Color = Color::new(240, 220, 0);
    pub const PURPLE: Color = Color::new(170, 0, 240);
    pub const GREEN: Color = Color::new(0, 220, 60);
    pub const RED: Color = Color::new(240, 20, 20);
    pub const BLUE: Color = Color::new(30, 80, 240);
    pub const ORANGE: Color = Color::new(240, 150, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell of the grid.
///
/// A `Falling` cell is painted by the active piece but still reports
/// unoccupied, so the piece can move through the cells it paints itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Falling(Color),
    Settled(Color),
}

impl Cell {
    pub fn new(color: Color, occupied: bool) -> Self {
        if occupied {
            Cell::Settled(color)
        } else {
            Cell::Falling(color)
        }
    }

    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Settled(_))
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Falling(color) | Cell::Settled(color) => Some(color),
        }
    }
}

/// Result of a bounds-and-occupancy query on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Occupied,
    Unoccupied,
    /// Above the top row. Always passable.
    Above,
    /// Below the bottom row.
    Below,
    /// Left of column 0.
    Left,
    /// Right of the last column.
    Right,
}

impl Classification {
    /// Whether a piece cell may not be placed here.
    ///
    /// `Above` is the only out-of-bounds class that does not block.
    pub fn is_blocking(self) -> bool {
        !matches!(self, Classification::Unoccupied | Classification::Above)
    }
}

/// Game actions a host can apply to a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° counter-clockwise
    RotateLeft,
    /// Rotate piece 90° clockwise
    RotateRight,
    /// Rotate piece 180°
    RotateTwice,
    /// Tick immediately and keep falling at the minimum interval
    Accelerate,
    /// Return to the score-based tick interval
    Decelerate,
    /// Toggle pause state
    Pause,
    /// Restart the game
    Restart,
}

/// Outcome of a piece locking into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub rows_cleared: u32,
    pub points: u32,
    /// The lock ended the game (lock-out or blocked spawn of the next piece).
    pub game_over: bool,
}
