//! Session state machine - lifecycle, timers and move resolution
//!
//! ```text
//!   Idle --start_countdown--> Countdown --3 ticks--> Playing --time/no moves--> GameOver
//!    ^                            |                                               |
//!    +------- backgrounded -------+                 start_countdown --------------+
//!   reset_game returns to Idle from anywhere.
//! ```
//!
//! Only one timer runs at a time: the countdown timer in `Countdown`, the
//! play clock in `Playing` (unless paused). Every transition cancels the
//! current timer before arming the next one.
//!
//! A move runs to completion in a fixed order: board update, scoring, spawn,
//! game-over check. The game-over check therefore sees the post-spawn board.

use arrayvec::ArrayVec;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::Board;
use crate::grid::{apply_move, Merges};
use crate::scheduler::{Scheduler, TimerFire, TimerKind, TimerToken};
use crate::scoring::{register_merges, ScoreResult};
use crate::snapshot::GameSnapshot;
use crate::tile::{Tile, TileFactory};
use crate::types::{
    Command, Direction, GameOverReason, LifecycleEvent, Phase, COUNTDOWN_SECONDS, INITIAL_TILES,
    PLAY_SECONDS, TIMER_PERIOD_MS,
};

/// Score and timer record for one game instance.
///
/// `high_score` is the only field that survives a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub phase: Phase,
    pub score: u64,
    pub high_score: u64,
    /// Seconds left on the play clock. Meaningful in `Playing`.
    pub time_left: u32,
    /// Seconds left before play starts. Meaningful in `Countdown`.
    pub countdown: u32,
    pub merge_streak: u32,
    /// Scheduler time of the last move that merged, `None` for never.
    pub last_merge_at: Option<u64>,
    pub game_over_reason: Option<GameOverReason>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            score: 0,
            high_score: 0,
            time_left: PLAY_SECONDS,
            countdown: COUNTDOWN_SECONDS,
            merge_streak: 0,
            last_merge_at: None,
            game_over_reason: None,
        }
    }

    /// Zero everything except the high score. Leaves `phase` alone.
    pub fn reset_scores(&mut self) {
        self.score = 0;
        self.merge_streak = 0;
        self.last_merge_at = None;
        self.time_left = PLAY_SECONDS;
        self.countdown = COUNTDOWN_SECONDS;
        self.game_over_reason = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// What one accepted move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub direction: Direction,
    pub changed: bool,
    pub merges: Merges,
    pub score: ScoreResult,
    pub spawned: Option<Tile>,
    /// The move ended the game.
    pub game_over: bool,
}

/// Last notable transition, for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    CountdownStarted,
    CountdownTick { remaining: u32 },
    /// The countdown was interrupted by the host going to the background.
    CountdownCancelled,
    GameStarted,
    Moved { points: u64, merges: u32 },
    Paused,
    Resumed,
    GameOver { reason: GameOverReason },
    Reset,
}

/// The game session: board, tile factory, session record and timers.
#[derive(Debug, Clone)]
pub struct GameSession<S: Scheduler> {
    board: Board,
    factory: TileFactory,
    session: Session,
    scheduler: S,
    /// The single running timer, if any.
    timer: Option<TimerToken>,
    paused: bool,
    /// The current pause came from the host going to the background.
    background_paused: bool,
    last_event: Option<SessionEvent>,
}

impl<S: Scheduler> GameSession<S> {
    /// Create an idle session. `seed` drives tile spawning.
    pub fn new(seed: u32, scheduler: S) -> Self {
        Self {
            board: Board::new(),
            factory: TileFactory::new(seed),
            session: Session::new(),
            scheduler,
            timer: None,
            paused: false,
            background_paused: false,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn high_score(&self) -> u64 {
        self.session.high_score
    }

    pub fn time_left(&self) -> u32 {
        self.session.time_left
    }

    pub fn countdown(&self) -> u32 {
        self.session.countdown
    }

    pub fn merge_streak(&self) -> u32 {
        self.session.merge_streak
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.session.game_over_reason
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn seed(&self) -> u32 {
        self.factory.seed()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Token of the running timer.
    pub fn active_timer(&self) -> Option<TimerToken> {
        self.timer
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Take and clear the last transition event.
    pub fn take_last_event(&mut self) -> Option<SessionEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board.values();
        out.tile_ids = self.board.ids();
        out.phase = self.session.phase;
        out.paused = self.paused;
        out.score = self.session.score;
        out.high_score = self.session.high_score;
        out.time_left = self.session.time_left;
        out.countdown = self.session.countdown;
        out.merge_streak = self.session.merge_streak;
        out.game_over_reason = self.session.game_over_reason;
        out.seed = self.factory.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn arm_timer(&mut self, kind: TimerKind) {
        self.disarm_timer();
        self.timer = Some(self.scheduler.start_timer(kind, TIMER_PERIOD_MS));
    }

    fn disarm_timer(&mut self) {
        if let Some(token) = self.timer.take() {
            self.scheduler.cancel_timer(token);
        }
    }

    /// Begin the pre-game countdown from `Idle` or `GameOver`.
    ///
    /// Ignored in `Countdown` and `Playing`.
    pub fn start_countdown(&mut self) -> bool {
        match self.session.phase {
            Phase::Countdown | Phase::Playing => {
                debug!(phase = self.session.phase.as_str(), "start_countdown ignored");
                return false;
            }
            Phase::Idle | Phase::GameOver => {}
        }

        self.session.phase = Phase::Countdown;
        self.session.countdown = COUNTDOWN_SECONDS;
        self.session.game_over_reason = None;
        self.paused = false;
        self.background_paused = false;
        self.arm_timer(TimerKind::Countdown);
        self.last_event = Some(SessionEvent::CountdownStarted);
        debug!(seconds = COUNTDOWN_SECONDS, "countdown started");
        true
    }

    /// Fresh board with two tiles, zeroed score, full play clock.
    fn start_game(&mut self) {
        self.disarm_timer();
        self.board.clear();
        self.session.reset_scores();
        self.session.countdown = 0;
        for _ in 0..INITIAL_TILES {
            self.factory.spawn(&mut self.board);
        }
        self.session.phase = Phase::Playing;
        self.paused = false;
        self.background_paused = false;
        self.arm_timer(TimerKind::PlayClock);
        self.last_event = Some(SessionEvent::GameStarted);
        info!(seconds = PLAY_SECONDS, seed = self.factory.seed(), "game started");
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.disarm_timer();
        self.session.phase = Phase::GameOver;
        self.session.game_over_reason = Some(reason);
        self.paused = false;
        self.background_paused = false;
        if self.session.score > self.session.high_score {
            self.session.high_score = self.session.score;
        }
        self.last_event = Some(SessionEvent::GameOver { reason });
        info!(
            reason = reason.as_str(),
            score = self.session.score,
            high_score = self.session.high_score,
            "game over"
        );
    }

    /// Advance the active timer by `delta_seconds` whole seconds.
    ///
    /// Returns true if the session changed.
    pub fn tick(&mut self, delta_seconds: u32) -> bool {
        if delta_seconds == 0 {
            return false;
        }
        match self.session.phase {
            Phase::Countdown => {
                for _ in 0..delta_seconds {
                    self.session.countdown = self.session.countdown.saturating_sub(1);
                    if self.session.countdown == 0 {
                        // Leftover seconds belong to the countdown and are dropped.
                        self.start_game();
                        return true;
                    }
                }
                self.last_event = Some(SessionEvent::CountdownTick {
                    remaining: self.session.countdown,
                });
                true
            }
            Phase::Playing if !self.paused => {
                self.session.time_left = self.session.time_left.saturating_sub(delta_seconds);
                if self.session.time_left == 0 {
                    self.end_game(GameOverReason::TimeExpired);
                }
                true
            }
            _ => false,
        }
    }

    /// Handle a scheduler fire. Fires from timers this session no longer
    /// owns are dropped.
    pub fn on_timer(&mut self, fire: TimerFire) -> bool {
        if self.timer != Some(fire.token) {
            debug!(token = ?fire.token, "stale timer fire dropped");
            return false;
        }
        self.tick(fire.periods)
    }

    /// Drain due fires from the scheduler.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Some(fire) = self.scheduler.poll_due() {
            changed |= self.on_timer(fire);
        }
        changed
    }

    /// Resolve a move.
    ///
    /// Returns `None` when the move is ignored (not playing, or paused).
    /// A move that changes nothing is reported with `changed == false` and
    /// has no other effect.
    pub fn request_move(&mut self, direction: Direction) -> Option<MoveReport> {
        if self.session.phase != Phase::Playing || self.paused {
            debug!(
                direction = direction.as_str(),
                phase = self.session.phase.as_str(),
                paused = self.paused,
                "move ignored"
            );
            return None;
        }

        let outcome = apply_move(&self.board, direction);
        if !outcome.changed {
            return Some(MoveReport {
                direction,
                changed: false,
                merges: ArrayVec::new(),
                score: ScoreResult {
                    points: 0,
                    streak: self.session.merge_streak,
                    merges: 0,
                },
                spawned: None,
                game_over: false,
            });
        }

        let now = self.scheduler.now_ms();
        self.board = outcome.board;
        let score = register_merges(&mut self.session, &outcome.merges, now);
        let spawned = self.factory.spawn(&mut self.board);

        let game_over = !self.board.has_available_moves();
        self.last_event = Some(SessionEvent::Moved {
            points: score.points,
            merges: score.merges,
        });
        if game_over {
            self.end_game(GameOverReason::NoMovesLeft);
        }

        debug!(
            direction = direction.as_str(),
            merges = score.merges,
            points = score.points,
            streak = score.streak,
            "move applied"
        );

        Some(MoveReport {
            direction,
            changed: true,
            merges: outcome.merges,
            score,
            spawned,
            game_over,
        })
    }

    /// Suspend the play clock. Only meaningful while playing.
    pub fn pause(&mut self) -> bool {
        if self.session.phase != Phase::Playing || self.paused {
            return false;
        }
        self.disarm_timer();
        self.paused = true;
        self.last_event = Some(SessionEvent::Paused);
        debug!(time_left = self.session.time_left, "paused");
        true
    }

    /// Restart the play clock with the time that was left.
    pub fn resume(&mut self) -> bool {
        if self.session.phase != Phase::Playing || !self.paused {
            return false;
        }
        self.paused = false;
        self.background_paused = false;
        self.arm_timer(TimerKind::PlayClock);
        self.last_event = Some(SessionEvent::Resumed);
        debug!(time_left = self.session.time_left, "resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// React to the host going to the background or coming back.
    ///
    /// A countdown is discarded on backgrounding. A running game is paused,
    /// and resumed on foregrounding only if the pause came from backgrounding.
    pub fn lifecycle_event(&mut self, event: LifecycleEvent) -> bool {
        match (event, self.session.phase) {
            (LifecycleEvent::Backgrounded, Phase::Countdown) => {
                self.disarm_timer();
                self.session.phase = Phase::Idle;
                self.session.countdown = COUNTDOWN_SECONDS;
                self.last_event = Some(SessionEvent::CountdownCancelled);
                debug!("countdown cancelled by backgrounding");
                true
            }
            (LifecycleEvent::Backgrounded, Phase::Playing) => {
                if self.pause() {
                    self.background_paused = true;
                    true
                } else {
                    false
                }
            }
            (LifecycleEvent::Foregrounded, Phase::Playing) if self.background_paused => {
                self.resume()
            }
            _ => false,
        }
    }

    /// Return to `Idle` with an empty board. Keeps the high score.
    pub fn reset_game(&mut self) {
        self.disarm_timer();
        self.board.clear();
        self.session.reset_scores();
        self.session.phase = Phase::Idle;
        self.paused = false;
        self.background_paused = false;
        self.last_event = Some(SessionEvent::Reset);
        debug!(high_score = self.session.high_score, "session reset");
    }

    /// Dispatch a host command. Returns true if anything changed.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::Move(direction) => self
                .request_move(direction)
                .is_some_and(|report| report.changed),
            Command::StartCountdown => self.start_countdown(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => {
                self.reset_game();
                true
            }
            Command::Lifecycle(event) => self.lifecycle_event(event),
        }
    }
}
