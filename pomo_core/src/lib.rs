#![forbid(unsafe_code)]

//! Core state machine and bookkeeping for the Pomo interval tracker.
//!
//! This crate provides:
//! - Domain types (modes, run states, cycle records, snapshots)
//! - The interval engine (work/rest state machine with elapsed-time accounting)
//! - Append-only cycle history
//! - Engine events for host adapters

pub mod types;
pub mod error;
pub mod events;
pub mod history;
pub mod engine;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use events::EngineEvent;
pub use history::HistoryLog;
pub use engine::IntervalEngine;
pub use config::Config;
