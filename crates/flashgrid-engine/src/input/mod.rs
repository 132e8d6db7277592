//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into [`InputEvent`]s and folds them
//! into a per-window [`KeyboardState`] that applications sample once per frame.

mod state;
mod types;

pub use state::KeyboardState;
pub use types::{InputEvent, Key, KeyState};
