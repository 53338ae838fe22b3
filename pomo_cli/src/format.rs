//! Terminal display formatting.
//!
//! Presentation only: the engine exposes raw millisecond durations and
//! this module turns them into padded clock strings, cycle labels, and
//! the one-line status display. Both members of a displayed pair share
//! one width, chosen by the larger value.

use pomo_core::config::DisplayConfig;
use pomo_core::{Mode, RunState, Snapshot};

/// Digit glyphs for cycle labels 0 through 10
const CYCLE_EMOJIS: [&str; 11] = [
    "0\u{fe0f}\u{20e3}",
    "1\u{fe0f}\u{20e3}",
    "2\u{fe0f}\u{20e3}",
    "3\u{fe0f}\u{20e3}",
    "4\u{fe0f}\u{20e3}",
    "5\u{fe0f}\u{20e3}",
    "6\u{fe0f}\u{20e3}",
    "7\u{fe0f}\u{20e3}",
    "8\u{fe0f}\u{20e3}",
    "9\u{fe0f}\u{20e3}",
    "\u{1f51f}",
];

/// A millisecond duration split into clock fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeParts {
    pub fn from_ms(ms: u64) -> Self {
        let total_seconds = ms / 1000;
        Self {
            hours: total_seconds / 3600,
            minutes: (total_seconds / 60) % 60,
            seconds: total_seconds % 60,
        }
    }
}

/// Display width for a duration pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeFormat {
    /// `HH:MM:SS`, for pairs reaching 10 hours
    HhMmSs,
    /// `H:MM:SS`, for pairs reaching 1 hour
    HMmSs,
    /// `MM:SS`, the default
    MmSs,
}

/// Pick one format wide enough for both members of a pair
pub fn format_for_pair(a_ms: u64, b_ms: u64) -> TimeFormat {
    let max_hours = TimeParts::from_ms(a_ms.max(b_ms)).hours;
    if max_hours >= 10 {
        TimeFormat::HhMmSs
    } else if max_hours >= 1 {
        TimeFormat::HMmSs
    } else {
        TimeFormat::MmSs
    }
}

pub fn format_duration(ms: u64, format: TimeFormat) -> String {
    let t = TimeParts::from_ms(ms);
    match format {
        TimeFormat::HhMmSs => format!("{:02}:{:02}:{:02}", t.hours, t.minutes, t.seconds),
        TimeFormat::HMmSs => format!("{}:{:02}:{:02}", t.hours, t.minutes, t.seconds),
        TimeFormat::MmSs => format!("{:02}:{:02}", t.minutes, t.seconds),
    }
}

/// Label for a cycle number (emoji digit, or `#n` in plain mode)
pub fn cycle_label(cycle: u32, use_emoji: bool) -> String {
    if use_emoji {
        if let Some(glyph) = CYCLE_EMOJIS.get(cycle as usize) {
            return (*glyph).to_string();
        }
    }
    format!("#{}", cycle)
}

pub fn mode_glyph(mode: Mode, use_emoji: bool) -> &'static str {
    match (mode, use_emoji) {
        (Mode::Work, true) => "\u{1f345}",
        (Mode::Rest, true) => "\u{1fae0}",
        (Mode::Work, false) => "work",
        (Mode::Rest, false) => "rest",
    }
}

fn state_glyph(snapshot: &Snapshot, use_emoji: bool) -> &'static str {
    if snapshot.run_state == RunState::Finished {
        return if use_emoji { "\u{23f0}" } else { "done" };
    }
    if snapshot.transitioning {
        return if use_emoji { "\u{1f504}" } else { "..." };
    }
    match (snapshot.run_state, use_emoji) {
        (RunState::Running, true) => "\u{25b6}\u{fe0f}",
        (RunState::Running, false) => ">",
        (_, true) => "\u{23f8}\u{fe0f}",
        (_, false) => "||",
    }
}

/// One-line live status: current pair, cycle label, session totals
pub fn status_line(snapshot: &Snapshot, display: &DisplayConfig) -> String {
    let current = format_for_pair(snapshot.work_elapsed_ms, snapshot.rest_elapsed_ms);
    let totals = format_for_pair(snapshot.total_work_ms, snapshot.total_rest_ms);
    let work = mode_glyph(Mode::Work, display.use_emoji);
    let rest = mode_glyph(Mode::Rest, display.use_emoji);
    format!(
        "{} {} {} {} {} | cycle {} | total {} {} {} {}",
        state_glyph(snapshot, display.use_emoji),
        work,
        format_duration(snapshot.work_elapsed_ms, current),
        rest,
        format_duration(snapshot.rest_elapsed_ms, current),
        cycle_label(snapshot.cycle_count, display.use_emoji),
        work,
        format_duration(snapshot.total_work_ms, totals),
        rest,
        format_duration(snapshot.total_rest_ms, totals),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo_core::IntervalEngine;

    #[test]
    fn test_format_width_boundaries() {
        // Just under an hour stays MM:SS.
        assert_eq!(format_for_pair(3_599_999, 0), TimeFormat::MmSs);
        // One hour widens to H:MM:SS.
        assert_eq!(format_for_pair(3_600_000, 0), TimeFormat::HMmSs);
        // Ten hours widens to HH:MM:SS.
        assert_eq!(format_for_pair(36_000_000, 0), TimeFormat::HhMmSs);
        // Either member of the pair can force the width.
        assert_eq!(format_for_pair(0, 3_600_000), TimeFormat::HMmSs);
    }

    #[test]
    fn test_format_duration_padding() {
        assert_eq!(format_duration(5000, TimeFormat::MmSs), "00:05");
        assert_eq!(format_duration(65_000, TimeFormat::MmSs), "01:05");
        assert_eq!(format_duration(3_665_000, TimeFormat::HMmSs), "1:01:05");
        assert_eq!(format_duration(36_065_000, TimeFormat::HhMmSs), "10:01:05");
        // Narrow format simply drops the hour field.
        assert_eq!(format_duration(3_665_000, TimeFormat::MmSs), "01:05");
    }

    #[test]
    fn test_cycle_labels() {
        assert_eq!(cycle_label(0, true), "0\u{fe0f}\u{20e3}");
        assert_eq!(cycle_label(10, true), "\u{1f51f}");
        assert_eq!(cycle_label(3, false), "#3");
        // Out of glyph range falls back to plain.
        assert_eq!(cycle_label(11, true), "#11");
    }

    #[test]
    fn test_status_line_plain() {
        let mut engine = IntervalEngine::new();
        engine.start(0);
        engine.tick(65_000);

        let display = DisplayConfig {
            history_newest_first: true,
            use_emoji: false,
        };
        let line = status_line(&engine.snapshot(), &display);
        assert_eq!(
            line,
            "> work 01:05 rest 00:00 | cycle #1 | total work 01:05 rest 00:00"
        );
    }
}
