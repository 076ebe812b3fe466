//! Grid engine - directional move resolution
//!
//! All four directions share one row algorithm. The board is first
//! normalized so that the requested move becomes "compact toward column 0"
//! (transpose for vertical moves, mirror for moves toward the high end), each
//! row is compacted and merged, and the normalization is undone.
//!
//! The engine never mutates its input. It returns a new board together with
//! the merges that happened, so callers can animate from the event list.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::board::{Board, Line};
use crate::types::{Direction, TileId, GRID_SIZE, MAX_MERGES_PER_MOVE};

/// One pairwise merge produced by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MergeEvent {
    /// Tile that kept its identity and doubled.
    pub survivor: TileId,
    /// Tile whose identity ended.
    pub absorbed: TileId,
    /// Value of the survivor after the merge.
    pub result_value: u32,
    /// Final cell of the survivor.
    pub row: usize,
    pub col: usize,
    pub streak_eligible: bool,
}

pub type Merges = ArrayVec<MergeEvent, MAX_MERGES_PER_MOVE>;

/// Result of [`apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub merges: Merges,
    /// Any tile changed cell, or any merge occurred.
    pub changed: bool,
}

impl MoveOutcome {
    /// Sum of the values created by merges in this move.
    pub fn merged_value(&self) -> u64 {
        self.merges.iter().map(|m| m.result_value as u64).sum()
    }
}

/// Survivor/absorbed pair produced while compacting one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineMerge {
    survivor: TileId,
    absorbed: TileId,
    result_value: u32,
}

/// Compact a line toward index 0, merging equal neighbours pairwise.
///
/// A slot that already merged this pass is not eligible again, so
/// `[2, 2, 2, 2]` becomes `[4, 4, _, _]` and `[4, 2, 2]` never chains into 8.
fn compact_line(line: Line) -> (Line, ArrayVec<LineMerge, { GRID_SIZE / 2 }>) {
    let mut out: Line = [None; GRID_SIZE];
    let mut just_merged = [false; GRID_SIZE];
    let mut merges = ArrayVec::new();
    let mut write = 0usize;

    for tile in line.into_iter().flatten() {
        if write > 0 && !just_merged[write - 1] {
            if let Some(prev) = out[write - 1] {
                if prev.value() == tile.value() {
                    let merged = prev.doubled();
                    out[write - 1] = Some(merged);
                    just_merged[write - 1] = true;
                    merges.push(LineMerge {
                        survivor: merged.id(),
                        absorbed: tile.id(),
                        result_value: merged.value(),
                    });
                    continue;
                }
            }
        }
        out[write] = Some(tile);
        write += 1;
    }

    (out, merges)
}

/// Rotate/mirror the board so that `direction` becomes a left move.
fn normalize(board: &Board, direction: Direction) -> Board {
    let oriented = if direction.is_vertical() {
        board.transpose()
    } else {
        board.clone()
    };
    if direction.is_reversed() {
        oriented.reverse_rows()
    } else {
        oriented
    }
}

/// Inverse of [`normalize`].
fn denormalize(board: &Board, direction: Direction) -> Board {
    let unmirrored = if direction.is_reversed() {
        board.reverse_rows()
    } else {
        board.clone()
    };
    if direction.is_vertical() {
        unmirrored.transpose()
    } else {
        unmirrored
    }
}

/// Resolve a move. A move that changes nothing returns an identical board.
pub fn apply_move(board: &Board, direction: Direction) -> MoveOutcome {
    let mut work = normalize(board, direction);
    let mut pending: ArrayVec<LineMerge, MAX_MERGES_PER_MOVE> = ArrayVec::new();

    for row in 0..GRID_SIZE {
        let (line, line_merges) = compact_line(work.row(row));
        work.set_row(row, line);
        pending.extend(line_merges);
    }

    let next = denormalize(&work, direction);
    let changed = !pending.is_empty() || next != *board;
    if !changed {
        return MoveOutcome {
            board: board.clone(),
            merges: ArrayVec::new(),
            changed: false,
        };
    }

    let merges = pending
        .into_iter()
        .filter_map(|m| {
            let (row, col) = next.position_of(m.survivor)?;
            Some(MergeEvent {
                survivor: m.survivor,
                absorbed: m.absorbed,
                result_value: m.result_value,
                row,
                col,
                streak_eligible: true,
            })
        })
        .collect();

    MoveOutcome {
        board: next,
        merges,
        changed,
    }
}

/// Whether moving in `direction` would change the board.
pub fn can_move(board: &Board, direction: Direction) -> bool {
    apply_move(board, direction).changed
}

/// Directions that would change the board.
pub fn available_directions(board: &Board) -> ArrayVec<Direction, 4> {
    Direction::ALL
        .into_iter()
        .filter(|&d| can_move(board, d))
        .collect()
}
