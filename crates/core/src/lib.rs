//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the merge-tile game and the session
//! state machine that drives a timed round. It has no dependencies on a
//! terminal, a window system or the network, so the same code runs in the
//! interactive shell, in tests and in benchmarks.
//!
//! - **Deterministic**: the same seed and the same command/clock sequence
//!   produce identical games.
//! - **Injected time**: all timers go through a [`Scheduler`], so tests
//!   drive the clock by hand with [`ManualScheduler`].
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 cell grid holding identity-carrying tiles
//! - [`tile`]: tiles, id allocation and random spawning
//! - [`rng`]: small seeded LCG used for spawn placement and values
//! - [`grid`]: directional move resolution and merge events
//! - [`scoring`]: merge points and the time-windowed combo streak
//! - [`scheduler`]: timer service trait plus manual and wall-clock implementations
//! - [`session`]: lifecycle phases, countdown, play clock, pause and reset
//! - [`snapshot`]: plain copy of the session for renderers and observers
//!
//! # Game Rules
//!
//! - A move slides every tile as far as it goes; equal neighbours merge
//!   pairwise, once per tile per move, with the leading tile surviving.
//! - A move that changes the board spawns one tile (2, or 4 with 10% chance).
//! - A round lasts 90 seconds after a 3 second countdown, or ends early
//!   once no move can change the board.
//!
//! # Example
//!
//! ```
//! use grid_merge_core::{GameSession, ManualScheduler};
//! use grid_merge_types::{Direction, Phase};
//!
//! let mut game = GameSession::new(12345, ManualScheduler::new());
//! game.start_countdown();
//! game.tick(3);
//! assert_eq!(game.phase(), Phase::Playing);
//! assert_eq!(game.board().tile_count(), 2);
//!
//! // A report comes back for every accepted move.
//! let report = game.request_move(Direction::Left);
//! assert!(report.is_some());
//! ```

pub mod board;
pub mod grid;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod tile;

pub use grid_merge_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, PlacementError};
pub use grid::{apply_move, available_directions, can_move, MergeEvent, MoveOutcome};
pub use rng::SimpleRng;
pub use scheduler::{ManualScheduler, Scheduler, SystemScheduler, TimerFire, TimerKind, TimerToken};
pub use scoring::{merge_points, register_merges, ScoreResult};
pub use session::{GameSession, MoveReport, Session, SessionEvent};
pub use snapshot::GameSnapshot;
pub use tile::{SpawnPlan, Tile, TileFactory};
