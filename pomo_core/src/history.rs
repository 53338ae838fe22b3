//! Append-only history of completed work/rest cycles.
//!
//! Records are appended when a cycle completes (the return to Work) and are
//! never mutated or removed. Insertion order is chronological; hosts that
//! want newest-first display use the reversed view.

use serde::{Deserialize, Serialize};

use crate::types::CycleRecord;

/// Ordered log of completed cycles
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    records: Vec<CycleRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in chronological (insertion) order
    pub fn records(&self) -> &[CycleRecord] {
        &self.records
    }

    /// Records newest-first, for display
    pub fn newest_first(&self) -> impl Iterator<Item = &CycleRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of recorded work time, in milliseconds
    pub fn total_work_ms(&self) -> u64 {
        self.records.iter().map(|r| r.work_ms).sum()
    }

    /// Sum of recorded rest time, in milliseconds
    pub fn total_rest_ms(&self) -> u64 {
        self.records.iter().map(|r| r.rest_ms).sum()
    }

    pub(crate) fn push(&mut self, record: CycleRecord) {
        tracing::debug!(
            cycle = record.cycle,
            work_ms = record.work_ms,
            rest_ms = record.rest_ms,
            "cycle recorded"
        );
        self.records.push(record);
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cycle: u32) -> CycleRecord {
        CycleRecord {
            work_ms: 1000 * u64::from(cycle),
            rest_ms: 500 * u64::from(cycle),
            cycle,
        }
    }

    #[test]
    fn test_push_preserves_insertion_order() {
        let mut log = HistoryLog::new();
        log.push(record(1));
        log.push(record(2));
        log.push(record(3));

        let cycles: Vec<u32> = log.records().iter().map(|r| r.cycle).collect();
        assert_eq!(cycles, vec![1, 2, 3]);
    }

    #[test]
    fn test_newest_first_reverses() {
        let mut log = HistoryLog::new();
        log.push(record(1));
        log.push(record(2));

        let cycles: Vec<u32> = log.newest_first().map(|r| r.cycle).collect();
        assert_eq!(cycles, vec![2, 1]);
    }

    #[test]
    fn test_totals_sum_all_records() {
        let mut log = HistoryLog::new();
        log.push(record(1));
        log.push(record(2));

        assert_eq!(log.total_work_ms(), 3000);
        assert_eq!(log.total_rest_ms(), 1500);
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = HistoryLog::new();
        log.push(record(1));
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }
}
