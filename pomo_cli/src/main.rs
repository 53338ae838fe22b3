use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use crossbeam::channel;
use pomo_core::{Config, EngineEvent, IntervalEngine, Result, RunState};

mod format;
mod script;

#[derive(Parser)]
#[command(name = "pomo")]
#[command(about = "Work/rest interval tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive timer (default)
    Run,

    /// Drive the engine from a command script with a virtual clock
    Script {
        /// Script file; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    pomo_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Script { file }) => cmd_script(file),
        Some(Commands::Run) | None => cmd_run(&config),
    }
}

/// Wall clock in epoch milliseconds
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn cmd_script(file: Option<PathBuf>) -> Result<()> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let stdout = io::stdout();
    script::run(&input, &mut stdout.lock())
}

fn cmd_run(config: &Config) -> Result<()> {
    let mut engine = IntervalEngine::new();

    // Stdin reader thread; the select loop below owns all engine state.
    let (tx, commands) = channel::unbounded::<String>();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let ticker = channel::tick(Duration::from_millis(config.timer.tick_interval_ms));

    println!("pomo: s = start/stop, m = switch work/rest, h = history, r = reset, q = quit");
    render(&mut engine, config)?;

    loop {
        channel::select! {
            recv(ticker) -> _ => {
                if let Some(event) = engine.tick(now_ms()) {
                    announce(&event)?;
                }
                render(&mut engine, config)?;
            }
            recv(commands) -> line => {
                let Ok(line) = line else { break };
                match line.trim() {
                    "s" => {
                        let now = now_ms();
                        if engine.run_state() == RunState::Running {
                            engine.stop(now);
                        } else {
                            engine.start(now);
                        }
                    }
                    "m" => {
                        engine.toggle_mode(now_ms());
                    }
                    "h" => print_history(&engine, config)?,
                    "r" => {
                        engine.reset();
                    }
                    "q" => break,
                    "" => {}
                    other => {
                        tracing::warn!("unknown command: {other}");
                    }
                }
                render(&mut engine, config)?;
            }
        }
    }

    println!();
    Ok(())
}

/// Flush elapsed time, then redraw the status line in place.
fn render(engine: &mut IntervalEngine, config: &Config) -> Result<()> {
    engine.flush_elapsed(now_ms());
    let line = format::status_line(&engine.snapshot(), &config.display);
    let mut stdout = io::stdout();
    // Clear to end of line so a narrowing line leaves no residue.
    write!(stdout, "\r{}\x1b[K", line)?;
    stdout.flush()?;
    Ok(())
}

fn announce(event: &EngineEvent) -> Result<()> {
    if event.is_finished() {
        // Non-blocking replacement for the completion alert.
        println!("\nWell done.");
    }
    Ok(())
}

fn print_history(engine: &IntervalEngine, config: &Config) -> Result<()> {
    let history = engine.history();
    if history.is_empty() {
        println!("\nno completed cycles yet");
        return Ok(());
    }

    println!();
    let records: Vec<_> = if config.display.history_newest_first {
        history.newest_first().collect()
    } else {
        history.records().iter().collect()
    };
    for record in records {
        let width = format::format_for_pair(record.work_ms, record.rest_ms);
        println!(
            "  work {}  {}  rest {}",
            format::format_duration(record.work_ms, width),
            format::cycle_label(record.cycle, config.display.use_emoji),
            format::format_duration(record.rest_ms, width),
        );
    }
    Ok(())
}
