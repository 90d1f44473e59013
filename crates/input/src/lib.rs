//! Terminal input module.
//!
//! Maps `crossterm` key events to [`crate::types::GameAction`] and tracks the
//! accelerate key, which needs a release timeout on terminals that never
//! report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::AccelerateHold;
pub use map::{handle_key_event, handle_key_release, is_accelerate_key, should_quit};
