//! The interval engine: a work/rest state machine with elapsed-time
//! accounting and cycle bookkeeping.
//!
//! The engine owns no threads and no timers. It operates on wall-clock
//! deltas: the host calls `tick(now_ms)` once per scheduling interval while
//! the engine is running, and passes an explicit `now_ms` into every
//! command, so tests can drive a virtual clock.
//!
//! ## State transitions
//!
//! ```text
//! Stopped -> Running -> Stopped
//!                    \-> Finished   (terminal until reset)
//! ```
//!
//! Mode changes are deferred: `toggle_mode` arms a pending flip that the
//! first `tick` at or after the deadline executes. While the flip is
//! pending the engine keeps accumulating into the current mode.
//!
//! All commands are total: outside their valid states they are silent
//! no-ops rather than errors.

use chrono::Utc;
use uuid::Uuid;

use crate::events::EngineEvent;
use crate::history::HistoryLog;
use crate::types::{CycleRecord, Mode, RunState, Snapshot, MAX_CYCLES, TOGGLE_DELAY_MS};

/// A requested mode change that has not yet taken effect.
#[derive(Clone, Copy, Debug)]
struct PendingToggle {
    /// Earliest tick timestamp at which the flip executes.
    due_ms: u64,
}

/// Core interval engine.
///
/// Tracks elapsed time in two mutually exclusive modes, accumulates
/// per-cycle and session totals, advances a bounded cycle counter, and
/// appends completed cycles to an append-only history log.
#[derive(Clone, Debug)]
pub struct IntervalEngine {
    /// Identifies one engine lifetime; regenerated on reset.
    session_id: Uuid,
    mode: Mode,
    run_state: RunState,
    /// Timestamp (ms) up to which elapsed time has been folded into the
    /// accumulators. `None` whenever the engine is not running.
    last_tick_ms: Option<u64>,
    work_elapsed_ms: u64,
    rest_elapsed_ms: u64,
    total_work_ms: u64,
    total_rest_ms: u64,
    /// 0 = not yet started; 1 on first start; capped at `MAX_CYCLES`.
    cycle_count: u32,
    history: HistoryLog,
    pending_toggle: Option<PendingToggle>,
}

impl Default for IntervalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalEngine {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            mode: Mode::Work,
            run_state: RunState::Stopped,
            last_tick_ms: None,
            work_elapsed_ms: 0,
            rest_elapsed_ms: 0,
            total_work_ms: 0,
            total_rest_ms: 0,
            cycle_count: 0,
            history: HistoryLog::new(),
            pending_toggle: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    /// Work time accumulated in the current cycle, in milliseconds
    pub fn work_elapsed_ms(&self) -> u64 {
        self.work_elapsed_ms
    }

    /// Rest time accumulated in the current cycle, in milliseconds
    pub fn rest_elapsed_ms(&self) -> u64 {
        self.rest_elapsed_ms
    }

    /// Work time accumulated over the whole session, in milliseconds
    pub fn total_work_ms(&self) -> u64 {
        self.total_work_ms
    }

    /// Rest time accumulated over the whole session, in milliseconds
    pub fn total_rest_ms(&self) -> u64 {
        self.total_rest_ms
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.run_state == RunState::Finished
    }

    /// False only in the terminal state; hosts disable controls on false
    pub fn is_actionable(&self) -> bool {
        self.run_state != RunState::Finished
    }

    /// True while a requested mode change has not yet taken effect
    pub fn is_transitioning(&self) -> bool {
        self.pending_toggle.is_some()
    }

    /// Build a full read-model snapshot.
    ///
    /// Call `flush_elapsed` first when the snapshot feeds a live display,
    /// otherwise the elapsed values are stale up to one tick interval.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            session_id: self.session_id,
            mode: self.mode,
            run_state: self.run_state,
            transitioning: self.is_transitioning(),
            cycle_count: self.cycle_count,
            work_elapsed_ms: self.work_elapsed_ms,
            rest_elapsed_ms: self.rest_elapsed_ms,
            total_work_ms: self.total_work_ms,
            total_rest_ms: self.total_rest_ms,
            cycles_completed: self.history.len(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin accumulating time. No-op when already running or finished.
    ///
    /// The first start of a session bootstraps cycle 1; no history entry
    /// is created for that transition.
    pub fn start(&mut self, now_ms: u64) -> Option<EngineEvent> {
        match self.run_state {
            RunState::Running | RunState::Finished => None,
            RunState::Stopped => {
                self.last_tick_ms = Some(now_ms);
                self.run_state = RunState::Running;
                if self.cycle_count == 0 {
                    self.cycle_count = 1;
                }
                tracing::debug!(cycle = self.cycle_count, mode = ?self.mode, "engine started");
                Some(EngineEvent::Started { at: Utc::now() })
            }
        }
    }

    /// Halt accumulation. No-op unless running.
    ///
    /// Flushes elapsed time up to `now_ms` first, and cancels any pending
    /// mode change.
    pub fn stop(&mut self, now_ms: u64) -> Option<EngineEvent> {
        if self.run_state != RunState::Running {
            return None;
        }
        self.fold_elapsed(now_ms);
        self.run_state = RunState::Stopped;
        self.last_tick_ms = None;
        if self.pending_toggle.take().is_some() {
            tracing::debug!("pending mode change cancelled by stop");
        }
        Some(EngineEvent::Stopped { at: Utc::now() })
    }

    /// Fold elapsed time and execute a due mode change.
    ///
    /// The host calls this once per scheduling interval while running.
    /// Returns the flip's event when one fires.
    pub fn tick(&mut self, now_ms: u64) -> Option<EngineEvent> {
        if self.run_state != RunState::Running {
            return None;
        }
        self.fold_elapsed(now_ms);
        match self.pending_toggle {
            Some(pending) if now_ms >= pending.due_ms => {
                self.pending_toggle = None;
                Some(self.complete_toggle())
            }
            _ => None,
        }
    }

    /// Pre-read synchronization: fold elapsed time up to `now_ms` without
    /// executing a pending mode change. Call immediately before reading
    /// elapsed values for display.
    pub fn flush_elapsed(&mut self, now_ms: u64) {
        if self.run_state == RunState::Running {
            self.fold_elapsed(now_ms);
        }
    }

    /// Request a mode change, effective `TOGGLE_DELAY_MS` later.
    ///
    /// No-op when finished, before the first start (cycle 0), or while a
    /// change is already pending (rapid double-toggles are ignored).
    /// Implicitly restarts the engine when stopped, mirroring `start`.
    pub fn toggle_mode(&mut self, now_ms: u64) -> Option<EngineEvent> {
        if self.run_state == RunState::Finished
            || self.cycle_count == 0
            || self.pending_toggle.is_some()
        {
            return None;
        }
        if self.run_state == RunState::Stopped {
            self.start(now_ms);
        }
        let due_ms = now_ms + TOGGLE_DELAY_MS;
        self.pending_toggle = Some(PendingToggle { due_ms });
        tracing::debug!(due_ms, from = ?self.mode, "mode change pending");
        Some(EngineEvent::TogglePending {
            due_ms,
            at: Utc::now(),
        })
    }

    /// Restore the exact initial state. Safe from any state; the only
    /// command that leaves `Finished`. Draws a fresh session id.
    pub fn reset(&mut self) -> Option<EngineEvent> {
        tracing::info!(session = %self.session_id, "engine reset");
        *self = Self::new();
        Some(EngineEvent::Reset { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Fold `now - last_tick` into the active accumulator. Sole mutator of
    /// the accumulators. A backwards-moving clock yields zero, not a
    /// negative delta.
    fn fold_elapsed(&mut self, now_ms: u64) {
        let Some(last) = self.last_tick_ms else {
            return;
        };
        let elapsed = now_ms.saturating_sub(last);
        match self.mode {
            Mode::Work => {
                self.work_elapsed_ms += elapsed;
                self.total_work_ms += elapsed;
            }
            Mode::Rest => {
                self.rest_elapsed_ms += elapsed;
                self.total_rest_ms += elapsed;
            }
        }
        self.last_tick_ms = Some(now_ms);
    }

    /// Execute a due mode change. Elapsed time has already been folded up
    /// to the triggering tick.
    fn complete_toggle(&mut self) -> EngineEvent {
        match self.mode {
            // Leaving the final work period ends the session instead of
            // flipping. Accumulators and history are left untouched.
            Mode::Work if self.cycle_count == MAX_CYCLES => {
                self.run_state = RunState::Finished;
                self.last_tick_ms = None;
                tracing::info!(
                    total_work_ms = self.total_work_ms,
                    total_rest_ms = self.total_rest_ms,
                    "session finished"
                );
                EngineEvent::Finished {
                    total_work_ms: self.total_work_ms,
                    total_rest_ms: self.total_rest_ms,
                    cycles: self.history.len(),
                    at: Utc::now(),
                }
            }
            // Work -> Rest: no bookkeeping yet; the cycle is recorded on
            // the return to Work.
            Mode::Work => {
                self.mode = Mode::Rest;
                tracing::debug!("mode changed to rest");
                EngineEvent::ModeChanged {
                    mode: Mode::Rest,
                    at: Utc::now(),
                }
            }
            // Rest -> Work closes the cycle. The arming gate plus the
            // terminality of Finished guarantee cycle_count < MAX_CYCLES
            // here.
            Mode::Rest => {
                let record = CycleRecord {
                    work_ms: self.work_elapsed_ms,
                    rest_ms: self.rest_elapsed_ms,
                    cycle: self.cycle_count,
                };
                self.history.push(record.clone());
                self.work_elapsed_ms = 0;
                self.rest_elapsed_ms = 0;
                self.cycle_count += 1;
                self.mode = Mode::Work;
                EngineEvent::CycleRecorded {
                    record,
                    at: Utc::now(),
                }
            }
        }
    }
}
