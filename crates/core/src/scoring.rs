//! Scoring module - merge points with a time-windowed combo streak
//!
//! Rules:
//! - The streak is computed once per move. A merge less than
//!   `STREAK_WINDOW_MS` after the previous merging move extends it by one,
//!   anything slower resets it to 0.
//! - Each merge is worth `floor(BASE_SCORE_PER_MERGE * value * COMBO_MULTIPLIER^streak)`.
//! - Moves without merges leave the streak and the merge clock untouched.

use crate::grid::MergeEvent;
use crate::session::Session;
use crate::types::{BASE_SCORE_PER_MERGE, COMBO_MULTIPLIER, STREAK_WINDOW_MS};

/// Score calculation result for one move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points added to the score by this move.
    pub points: u64,
    /// Streak value the merges were scored with.
    pub streak: u32,
    /// Number of merges scored.
    pub merges: u32,
}

/// Streak for a merging move at `now_ms`.
pub fn next_streak(now_ms: u64, last_merge_at: Option<u64>, streak: u32) -> u32 {
    match last_merge_at {
        Some(last) if now_ms.saturating_sub(last) < STREAK_WINDOW_MS => streak.saturating_add(1),
        _ => 0,
    }
}

/// Combo multiplier for a streak (`1.5^streak`).
pub fn combo_multiplier(streak: u32) -> f64 {
    COMBO_MULTIPLIER.powi(streak.min(i32::MAX as u32) as i32)
}

/// Points for one merge producing `merged_value`.
pub fn merge_points(merged_value: u32, streak: u32) -> u64 {
    let raw = BASE_SCORE_PER_MERGE as f64 * merged_value as f64 * combo_multiplier(streak);
    // `as` saturates on overflow and infinity.
    raw.floor() as u64
}

/// Apply one move's merges to the session score and streak.
pub fn register_merges(session: &mut Session, merges: &[MergeEvent], now_ms: u64) -> ScoreResult {
    if merges.is_empty() {
        return ScoreResult {
            points: 0,
            streak: session.merge_streak,
            merges: 0,
        };
    }

    let streak = next_streak(now_ms, session.last_merge_at, session.merge_streak);
    let points = merges
        .iter()
        .map(|m| merge_points(m.result_value, streak))
        .fold(0u64, u64::saturating_add);

    session.score = session.score.saturating_add(points);
    session.merge_streak = streak;
    session.last_merge_at = Some(now_ms);

    ScoreResult {
        points,
        streak,
        merges: merges.len() as u32,
    }
}
