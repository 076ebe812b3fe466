//! Tiles and the factory that creates and spawns them.
//!
//! A tile's id is assigned once by [`TileFactory::create_tile`] and never
//! reused. Relocating a tile keeps its id; a merge keeps the absorbing tile's
//! id and ends the absorbed one.

use serde::Serialize;
use tracing::{debug, warn};

use crate::board::{Board, PlacementError};
use crate::rng::SimpleRng;
use crate::types::{
    TileId, SPAWN_RARE_DENOMINATOR, SPAWN_RARE_NUMERATOR, SPAWN_RARE_VALUE, SPAWN_VALUE,
};

/// A numbered board piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    id: TileId,
    value: u32,
}

impl Tile {
    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Same identity, doubled value. Used only by the merge step.
    pub(crate) fn doubled(self) -> Self {
        Self {
            id: self.id,
            value: self.value.saturating_mul(2),
        }
    }
}

/// A spawn decision computed from a board snapshot, not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPlan {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Allocates tile ids and spawns tiles into empty cells.
#[derive(Debug, Clone)]
pub struct TileFactory {
    next_id: TileId,
    rng: SimpleRng,
    seed: u32,
}

impl TileFactory {
    pub fn new(seed: u32) -> Self {
        Self {
            // 0 is reserved for "no tile" in snapshots.
            next_id: 1,
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Create a tile with a fresh id.
    pub fn create_tile(&mut self, value: u32) -> Tile {
        let id = self.next_id;
        self.next_id += 1;
        Tile { id, value }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next_id - 1
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Pick an empty cell uniformly and a value (2 at 90%, 4 at 10%).
    ///
    /// Returns `None` when the board is full.
    pub fn plan_spawn(&mut self, board: &Board) -> Option<SpawnPlan> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let (row, col) = empty[self.rng.next_range(empty.len() as u32) as usize];
        let value = if self.rng.chance(SPAWN_RARE_NUMERATOR, SPAWN_RARE_DENOMINATOR) {
            SPAWN_RARE_VALUE
        } else {
            SPAWN_VALUE
        };

        Some(SpawnPlan { row, col, value })
    }

    /// Apply a plan, re-checking that its cell is still empty.
    ///
    /// The id is only allocated once the cell is confirmed free.
    pub fn place_planned(&mut self, board: &mut Board, plan: SpawnPlan) -> Result<Tile, PlacementError> {
        board.check_vacant(plan.row, plan.col)?;
        let tile = self.create_tile(plan.value);
        board.place(plan.row, plan.col, tile)?;
        Ok(tile)
    }

    /// Plan and place one tile. A rejected placement is logged and skipped.
    pub fn spawn(&mut self, board: &mut Board) -> Option<Tile> {
        let Some(plan) = self.plan_spawn(board) else {
            debug!("spawn skipped: board is full");
            return None;
        };
        self.commit(board, plan)
    }

    /// Place a previously computed plan, logging and skipping on failure.
    pub fn commit(&mut self, board: &mut Board, plan: SpawnPlan) -> Option<Tile> {
        match self.place_planned(board, plan) {
            Ok(tile) => {
                debug!(id = tile.id, value = tile.value, row = plan.row, col = plan.col, "tile spawned");
                Some(tile)
            }
            Err(err) => {
                warn!(%err, "spawn placement rejected");
                None
            }
        }
    }
}

impl Default for TileFactory {
    fn default() -> Self {
        Self::new(1)
    }
}
