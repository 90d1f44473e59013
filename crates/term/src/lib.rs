//! Terminal rendering for blockfall.
//!
//! A small, game-oriented layer: [`GameView`] draws a [`core::GameState`] into
//! a [`FrameBuffer`] with no I/O, and [`TerminalRenderer`] flushes that buffer
//! to the terminal. Each grid cell is two columns wide so cells look square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb, Weight};
pub use game_view::{FrameRect, GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
