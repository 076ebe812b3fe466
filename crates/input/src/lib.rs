//! Terminal input module (engine-facing).
//!
//! Turns raw pointer gestures and `crossterm` events into session
//! [`Command`](crate::types::Command)s. Swipes shorter than the minimum
//! distance are dropped here and never reach the session.

pub mod gesture;
pub mod map;

pub use grid_merge_types as types;

pub use gesture::{resolve_swipe, Swipe, SwipeTracker};
pub use map::{handle_key_event, handle_mouse_event, should_quit};
