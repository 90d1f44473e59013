//! Core game logic - pure, deterministic and host-driven
//!
//! Everything a falling-block game needs short of a screen: the grid, piece
//! masks and their rotations, the shuffle-bag queue, the falling piece with its
//! collision caches, row collapse, scoring and the session that ties them
//! together. There is no I/O here and no clock; a host calls
//! [`GameState::tick`] on its own schedule.
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell grid, classification and row shifting
//! - [`mask`]: rectangular boolean piece masks and their rotations
//! - [`pieces`]: piece templates, oriented instances and the catalog
//! - [`rng`]: seeded LCG and the shuffle-bag [`PieceQueue`]
//! - [`active`]: the falling piece: spawn, move, rotate, lock
//! - [`collapse`]: completed-row removal
//! - [`scoring`]: row points and the score-driven tick interval
//! - [`game_state`]: the session a host drives
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(GameConfig::default().with_seed(12345)).unwrap();
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateRight);
//! game.tick();
//!
//! assert!(game.active().is_some());
//! assert_eq!(game.score(), 0);
//! ```

pub mod active;
pub mod collapse;
pub mod config;
pub mod error;
pub mod game_state;
pub mod grid;
pub mod mask;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use blockfall_types as types;

pub use active::ActivePiece;
pub use collapse::clear_completed_rows;
pub use config::GameConfig;
pub use error::CoreError;
pub use game_state::GameState;
pub use grid::Grid;
pub use mask::Mask;
pub use pieces::{Catalog, PieceInstance, PieceTemplate};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_accelerated_tick_score, calculate_rows_score, get_tick_interval_ms};
