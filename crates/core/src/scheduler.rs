//! Timer service injected into the session.
//!
//! The session never holds raw timer handles. It asks a [`Scheduler`] to
//! start a periodic timer and keeps the returned [`TimerToken`]; cancelling
//! goes through the same token. Fires are pulled with [`Scheduler::poll_due`]
//! and carry the token, so a fire for a cancelled timer can be recognised and
//! dropped.
//!
//! Two implementations are provided:
//! - [`ManualScheduler`]: clock advanced explicitly, for tests and replays.
//! - [`SystemScheduler`]: monotonic wall clock, for interactive hosts.

use std::time::Instant;

use arrayvec::ArrayVec;
use serde::Serialize;
use tracing::{trace, warn};

/// Identifies one started timer. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerToken(u64);

/// What a timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimerKind {
    Countdown,
    PlayClock,
}

/// A due timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFire {
    pub token: TimerToken,
    pub kind: TimerKind,
    /// Whole periods elapsed since the previous fire (normally 1).
    pub periods: u32,
}

/// Clock plus periodic timers.
pub trait Scheduler {
    /// Milliseconds on this scheduler's monotonic clock.
    fn now_ms(&self) -> u64;

    /// Start a periodic timer whose first fire is one period from now.
    fn start_timer(&mut self, kind: TimerKind, period_ms: u64) -> TimerToken;

    /// Stop a timer. Unknown or already cancelled tokens are ignored.
    fn cancel_timer(&mut self, token: TimerToken);

    /// Next due fire, if any.
    fn poll_due(&mut self) -> Option<TimerFire>;
}

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    token: TimerToken,
    kind: TimerKind,
    period_ms: u64,
    next_due_ms: u64,
}

/// Shared bookkeeping for both schedulers.
#[derive(Debug, Clone, Default)]
struct TimerTable {
    next_token: u64,
    timers: ArrayVec<ActiveTimer, 4>,
}

impl TimerTable {
    fn start(&mut self, now_ms: u64, kind: TimerKind, period_ms: u64) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        if self.timers.is_full() {
            let dropped = self.timers.remove(0);
            warn!(token = ?dropped.token, "timer table full, dropping oldest timer");
        }
        let period_ms = period_ms.max(1);
        self.timers.push(ActiveTimer {
            token,
            kind,
            period_ms,
            next_due_ms: now_ms.saturating_add(period_ms),
        });
        trace!(?token, ?kind, period_ms, "timer started");
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.timers.retain(|t| t.token != token);
        trace!(?token, "timer cancelled");
    }

    fn poll(&mut self, now_ms: u64) -> Option<TimerFire> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_due_ms <= now_ms)
            .min_by_key(|t| t.next_due_ms)?;

        let periods = 1 + (now_ms - timer.next_due_ms) / timer.period_ms;
        timer.next_due_ms += periods * timer.period_ms;
        Some(TimerFire {
            token: timer.token,
            kind: timer.kind,
            periods: periods.min(u32::MAX as u64) as u32,
        })
    }

    fn len(&self) -> usize {
        self.timers.len()
    }

    fn kinds(&self) -> ArrayVec<TimerKind, 4> {
        self.timers.iter().map(|t| t.kind).collect()
    }
}

/// Scheduler with an explicitly advanced clock.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    table: TimerTable,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at `now_ms`.
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            table: TimerTable::default(),
        }
    }

    /// Move the clock forward.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    /// Number of running timers.
    pub fn active_timers(&self) -> usize {
        self.table.len()
    }

    pub fn active_kinds(&self) -> ArrayVec<TimerKind, 4> {
        self.table.kinds()
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn start_timer(&mut self, kind: TimerKind, period_ms: u64) -> TimerToken {
        self.table.start(self.now_ms, kind, period_ms)
    }

    fn cancel_timer(&mut self, token: TimerToken) {
        self.table.cancel(token);
    }

    fn poll_due(&mut self) -> Option<TimerFire> {
        self.table.poll(self.now_ms)
    }
}

/// Scheduler backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemScheduler {
    origin: Instant,
    table: TimerTable,
}

impl SystemScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            table: TimerTable::default(),
        }
    }

    pub fn active_timers(&self) -> usize {
        self.table.len()
    }
}

impl Default for SystemScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SystemScheduler {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis().min(u64::MAX as u128) as u64
    }

    fn start_timer(&mut self, kind: TimerKind, period_ms: u64) -> TimerToken {
        let now = self.now_ms();
        self.table.start(now, kind, period_ms)
    }

    fn cancel_timer(&mut self, token: TimerToken) {
        self.table.cancel(token);
    }

    fn poll_due(&mut self) -> Option<TimerFire> {
        let now = self.now_ms();
        self.table.poll(now)
    }
}
