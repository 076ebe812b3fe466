//! Terminal rendering for the game shell.
//!
//! A session snapshot is drawn into a plain framebuffer by [`GameView`]
//! (pure, testable), and [`TerminalRenderer`] flushes framebuffers to the
//! terminal with crossterm, rewriting only rows that changed.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use grid_merge_core as core;
pub use grid_merge_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_colors, GameView, Viewport};
pub use renderer::{dirty_rows, encode_rows_into, TerminalRenderer};
