//! Core domain types for the Pomo interval tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Timer modes and run states
//! - Cycle records for completed work/rest cycles
//! - Read-model snapshots for host adapters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on completed work periods in a single session.
pub const MAX_CYCLES: u32 = 10;

/// Nominal scheduling interval for the host's tick source, in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Visible delay between requesting a mode change and the actual flip,
/// in milliseconds.
pub const TOGGLE_DELAY_MS: u64 = 1_000;

/// Which accumulator receives elapsed time while the engine runs
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Work,
    Rest,
}

impl Mode {
    /// The opposite mode
    pub fn flipped(self) -> Self {
        match self {
            Mode::Work => Mode::Rest,
            Mode::Rest => Mode::Work,
        }
    }
}

/// Lifecycle state of the engine
///
/// `Finished` is terminal: no command other than `reset` has any effect
/// once it is reached.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Stopped,
    Running,
    Finished,
}

/// One completed work/rest cycle
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleRecord {
    /// Work time accumulated over the cycle, in milliseconds
    pub work_ms: u64,
    /// Rest time accumulated over the cycle, in milliseconds
    pub rest_ms: u64,
    /// The cycle number this record closes (1-based)
    pub cycle: u32,
}

/// Full read model of the engine at one observation point
///
/// Durations are raw milliseconds; display formatting is an adapter
/// concern.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Identifies one engine lifetime; regenerated on reset
    pub session_id: Uuid,
    pub mode: Mode,
    pub run_state: RunState,
    /// True while a requested mode change has not yet taken effect
    pub transitioning: bool,
    pub cycle_count: u32,
    pub work_elapsed_ms: u64,
    pub rest_elapsed_ms: u64,
    pub total_work_ms: u64,
    pub total_rest_ms: u64,
    /// Number of completed cycles in the history log
    pub cycles_completed: usize,
    pub at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flipped() {
        assert_eq!(Mode::Work.flipped(), Mode::Rest);
        assert_eq!(Mode::Rest.flipped(), Mode::Work);
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Work).unwrap(), "\"work\"");
        assert_eq!(
            serde_json::to_string(&RunState::Finished).unwrap(),
            "\"finished\""
        );
    }

    #[test]
    fn test_cycle_record_roundtrip() {
        let record = CycleRecord {
            work_ms: 5000,
            rest_ms: 3000,
            cycle: 1,
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: CycleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }
}
