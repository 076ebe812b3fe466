use serde::Serialize;

use crate::types::{GameOverReason, Phase, TileId, GRID_SIZE};

/// Plain copy of everything a renderer or observer needs from a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct GameSnapshot {
    /// Tile values, 0 for empty cells.
    pub board: [[u32; GRID_SIZE]; GRID_SIZE],
    /// Tile ids, 0 for empty cells.
    pub tile_ids: [[TileId; GRID_SIZE]; GRID_SIZE],
    pub phase: Phase,
    pub paused: bool,
    pub score: u64,
    pub high_score: u64,
    pub time_left: u32,
    pub countdown: u32,
    pub merge_streak: u32,
    pub game_over_reason: Option<GameOverReason>,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Moves would be accepted.
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing && !self.paused
    }

    pub fn tile_count(&self) -> usize {
        self.board.iter().flatten().filter(|&&v| v != 0).count()
    }

    pub fn max_value(&self) -> u32 {
        self.board.iter().flatten().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_idle_and_empty() {
        let s = GameSnapshot::default();
        assert_eq!(s.phase, Phase::Idle);
        assert!(!s.playable());
        assert_eq!(s.tile_count(), 0);
        assert_eq!(s.max_value(), 0);
    }

    #[test]
    fn clear_resets_fields() {
        let mut s = GameSnapshot {
            phase: Phase::Playing,
            score: 120,
            ..GameSnapshot::default()
        };
        s.board[1][2] = 8;
        assert!(s.playable());
        assert_eq!(s.max_value(), 8);

        s.clear();
        assert_eq!(s, GameSnapshot::default());
    }
}
