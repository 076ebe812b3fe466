//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond parsing and naming, so
//! they can be shared by the engine, the input layer and the renderer.
//!
//! # Board Dimensions
//!
//! The board is a fixed 4x4 grid addressed as `(row, col)`, both 0-based,
//! with row 0 at the top and column 0 on the left.
//!
//! # Session Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `COUNTDOWN_SECONDS` | 3 | Pre-game countdown length |
//! | `PLAY_SECONDS` | 90 | Play-clock length |
//! | `TIMER_PERIOD_MS` | 1000 | Period of both session timers |
//! | `STREAK_WINDOW_MS` | 2000 | Max gap between merges that keeps a streak alive |
//!
//! # Scoring
//!
//! Each merge awards `floor(BASE_SCORE_PER_MERGE * value * COMBO_MULTIPLIER^streak)`.
//!
//! # Examples
//!
//! ```
//! use grid_merge_types::{Command, Direction, GRID_SIZE};
//!
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.as_str(), "left");
//!
//! let cmd = Command::from_str("up").unwrap();
//! assert_eq!(cmd, Command::Move(Direction::Up));
//!
//! assert_eq!(GRID_SIZE, 4);
//! ```

use serde::{Deserialize, Serialize};

/// Board side length in cells.
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Tiles placed on a freshly initialized board.
pub const INITIAL_TILES: usize = 2;

/// Upper bound on merges a single move can produce (two per row).
pub const MAX_MERGES_PER_MOVE: usize = CELL_COUNT / 2;

/// Pre-game countdown length in seconds.
pub const COUNTDOWN_SECONDS: u32 = 3;

/// Play-clock length in seconds.
pub const PLAY_SECONDS: u32 = 90;

/// Period of the countdown and play-clock timers.
pub const TIMER_PERIOD_MS: u64 = 1000;

/// A merge less than this many milliseconds after the previous one extends the streak.
pub const STREAK_WINDOW_MS: u64 = 2000;

/// Points per merged value unit before the combo multiplier.
pub const BASE_SCORE_PER_MERGE: u64 = 10;

/// Multiplier applied once per streak step.
pub const COMBO_MULTIPLIER: f64 = 1.5;

/// Value of a regular spawned tile.
pub const SPAWN_VALUE: u32 = 2;

/// Value of a rare spawned tile.
pub const SPAWN_RARE_VALUE: u32 = 4;

/// A spawn picks `SPAWN_RARE_VALUE` with probability `SPAWN_RARE_NUMERATOR / SPAWN_RARE_DENOMINATOR`.
pub const SPAWN_RARE_NUMERATOR: u32 = 1;
pub const SPAWN_RARE_DENOMINATOR: u32 = 10;

/// Minimum swipe length (in host points) before a gesture counts as a move.
pub const DEFAULT_MIN_SWIPE_DISTANCE: f32 = 10.0;

/// Process-unique tile identity.
pub type TileId = u64;

/// Move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Whether the move runs along columns (and so needs a transpose to become a row pass).
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Whether the move compacts toward the high end of a line.
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Countdown,
    Playing,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Countdown => "countdown",
            Phase::Playing => "playing",
            Phase::GameOver => "game_over",
        }
    }
}

/// Host application lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleEvent {
    Backgrounded,
    Foregrounded,
}

impl LifecycleEvent {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "backgrounded" | "background" => Some(LifecycleEvent::Backgrounded),
            "foregrounded" | "foreground" => Some(LifecycleEvent::Foregrounded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::Backgrounded => "backgrounded",
            LifecycleEvent::Foregrounded => "foregrounded",
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    TimeExpired,
    NoMovesLeft,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::TimeExpired => "time_expired",
            GameOverReason::NoMovesLeft => "no_moves_left",
        }
    }
}

/// Inbound commands from the host shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Command {
    Move(Direction),
    StartCountdown,
    TogglePause,
    Reset,
    Lifecycle(LifecycleEvent),
}

impl Command {
    /// Parse a command from string (case-insensitive).
    ///
    /// Directions parse to `Move`, lifecycle names to `Lifecycle`.
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some(dir) = Direction::from_str(s) {
            return Some(Command::Move(dir));
        }
        if let Some(event) = LifecycleEvent::from_str(s) {
            return Some(Command::Lifecycle(event));
        }
        match s.to_lowercase().as_str() {
            "start" | "startcountdown" => Some(Command::StartCountdown),
            "pause" | "togglepause" => Some(Command::TogglePause),
            "reset" => Some(Command::Reset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_short_and_long_names() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
            assert_eq!(Direction::from_str(&dir.as_str().to_uppercase()), Some(dir));
        }
        assert_eq!(Direction::from_str("l"), Some(Direction::Left));
        assert_eq!(Direction::from_str("sideways"), None);
    }

    #[test]
    fn direction_normalization_flags() {
        assert!(!Direction::Left.is_vertical() && !Direction::Left.is_reversed());
        assert!(!Direction::Right.is_vertical() && Direction::Right.is_reversed());
        assert!(Direction::Up.is_vertical() && !Direction::Up.is_reversed());
        assert!(Direction::Down.is_vertical() && Direction::Down.is_reversed());
    }

    #[test]
    fn command_parsing() {
        assert_eq!(Command::from_str("Right"), Some(Command::Move(Direction::Right)));
        assert_eq!(Command::from_str("start"), Some(Command::StartCountdown));
        assert_eq!(Command::from_str("pause"), Some(Command::TogglePause));
        assert_eq!(Command::from_str("reset"), Some(Command::Reset));
        assert_eq!(
            Command::from_str("background"),
            Some(Command::Lifecycle(LifecycleEvent::Backgrounded))
        );
        assert_eq!(Command::from_str("hold"), None);
    }

    #[test]
    fn merge_bound_covers_two_per_row() {
        assert_eq!(MAX_MERGES_PER_MOVE, GRID_SIZE * 2);
    }
}
