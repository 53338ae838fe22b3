//! Deterministic script mode.
//!
//! Drives the engine from a newline-separated command script against a
//! virtual clock that starts at zero: `wait N` advances it in one-second
//! ticks, exactly like the interactive tick source. Events are printed as
//! JSON lines; `status` flushes elapsed time and prints a pretty-printed
//! snapshot. Primarily a testing affordance, also handy for scripted
//! inspection of engine behavior.

use std::io::Write;

use pomo_core::types::TICK_INTERVAL_MS;
use pomo_core::{Error, IntervalEngine, Result, RunState};

/// Run `input` against a fresh engine, writing output to `out`.
pub fn run(input: &str, out: &mut impl Write) -> Result<()> {
    let mut engine = IntervalEngine::new();
    let mut now: u64 = 0;

    for (line_no, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        match command {
            "start" => {
                emit(out, engine.start(now))?;
            }
            "stop" => {
                emit(out, engine.stop(now))?;
            }
            "toggle" => {
                emit(out, engine.toggle_mode(now))?;
            }
            "reset" => {
                emit(out, engine.reset())?;
            }
            "flush" => {
                engine.flush_elapsed(now);
            }
            "wait" => {
                let seconds: u64 = parts
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| bad_line(line_no, raw, "expected `wait <seconds>`"))?;
                for _ in 0..seconds {
                    now += TICK_INTERVAL_MS;
                    emit(out, engine.tick(now))?;
                }
            }
            "status" => {
                engine.flush_elapsed(now);
                let snapshot = engine.snapshot();
                writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
            }
            _ => {
                return Err(bad_line(line_no, raw, "unknown command"));
            }
        }
    }

    if engine.run_state() == RunState::Running {
        tracing::debug!("script ended with the engine still running");
    }
    Ok(())
}

fn emit(out: &mut impl Write, event: Option<pomo_core::EngineEvent>) -> Result<()> {
    let Some(event) = event else {
        return Ok(());
    };
    writeln!(out, "{}", serde_json::to_string(&event)?)?;
    if event.is_finished() {
        // The single terminal completion notice.
        writeln!(out, "Well done.")?;
    }
    Ok(())
}

fn bad_line(line_no: usize, raw: &str, reason: &str) -> Error {
    Error::Script(format!("line {}: {:?}: {}", line_no + 1, raw.trim(), reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(input: &str) -> String {
        let mut out = Vec::new();
        run(input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_five_seconds_of_work() {
        let output = run_to_string("start\nwait 5\nstatus\n");
        assert!(output.contains("\"work_elapsed_ms\": 5000"));
        assert!(output.contains("\"total_work_ms\": 5000"));
        assert!(output.contains("\"cycle_count\": 1"));
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let output = run_to_string("# warmup\n\nstart\nwait 1\nstatus\n");
        assert!(output.contains("\"work_elapsed_ms\": 1000"));
    }

    #[test]
    fn test_toggle_emits_cycle_record() {
        let output = run_to_string(
            "start\nwait 5\ntoggle\nwait 4\ntoggle\nwait 1\nstatus\n",
        );
        assert!(output.contains("\"type\":\"cycle_recorded\""));
        assert!(output.contains("\"cycle_count\": 2"));
    }

    #[test]
    fn test_unknown_command_errors() {
        let mut out = Vec::new();
        let result = run("start\nfrobnicate\n", &mut out);
        assert!(matches!(result, Err(Error::Script(_))));
    }

    #[test]
    fn test_malformed_wait_errors() {
        let mut out = Vec::new();
        let result = run("wait lots\n", &mut out);
        assert!(matches!(result, Err(Error::Script(_))));
    }

    #[test]
    fn test_full_session_prints_completion_notice() {
        let mut script = String::from("start\nwait 2\n");
        // Nine completed cycles bring the counter to its bound.
        for _ in 0..9 {
            script.push_str("toggle\nwait 3\ntoggle\nwait 3\n");
        }
        // Leaving the final work period ends the session.
        script.push_str("toggle\nwait 2\nstatus\n");

        let output = run_to_string(&script);
        assert!(output.contains("\"type\":\"finished\""));
        assert!(output.contains("Well done."));
        assert!(output.contains("\"run_state\": \"finished\""));
        assert!(output.contains("\"cycles_completed\": 9"));
    }
}
