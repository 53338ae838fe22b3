//! Engine events for host adapters.
//!
//! Every mutating engine command that changes state returns an event; the
//! host re-renders when it sees one. `Finished` is emitted exactly once per
//! session, when the engine enters its terminal state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CycleRecord, Mode};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The engine began (or resumed) accumulating time.
    Started { at: DateTime<Utc> },
    /// Accumulation halted; elapsed time was flushed first.
    Stopped { at: DateTime<Utc> },
    /// A mode change was requested and will take effect at `due_ms`.
    TogglePending { due_ms: u64, at: DateTime<Utc> },
    /// The pending mode change took effect.
    ModeChanged { mode: Mode, at: DateTime<Utc> },
    /// A full work/rest cycle completed and was appended to the history.
    CycleRecorded {
        record: CycleRecord,
        at: DateTime<Utc>,
    },
    /// The session reached its cycle bound and entered the terminal state.
    Finished {
        total_work_ms: u64,
        total_rest_ms: u64,
        cycles: usize,
        at: DateTime<Utc>,
    },
    /// The engine was restored to its initial state.
    Reset { at: DateTime<Utc> },
}

impl EngineEvent {
    /// True for the one-shot terminal event
    pub fn is_finished(&self) -> bool {
        matches!(self, EngineEvent::Finished { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_type_tagged() {
        let event = EngineEvent::ModeChanged {
            mode: Mode::Rest,
            at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"mode_changed\""));
        assert!(json.contains("\"mode\":\"rest\""));
    }

    #[test]
    fn test_is_finished() {
        let finished = EngineEvent::Finished {
            total_work_ms: 0,
            total_rest_ms: 0,
            cycles: 0,
            at: Utc::now(),
        };
        assert!(finished.is_finished());
        assert!(!EngineEvent::Reset { at: Utc::now() }.is_finished());
    }
}
