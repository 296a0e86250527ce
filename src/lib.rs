//! Stage Timer Library
//!
//! This library provides the core functionality for the Stage Timer CLI.
//! It includes:
//! - Countdown engine with threshold bands and a once-per-second event stream
//! - Grouped multi-timer document with structured addressing
//! - Session context tying the document to the live engine
//! - JSON document persistence for the CLI host
//! - CLI command parsing and display utilities
//! - Type definitions for thresholds, modes, and snapshots

pub mod cli;
pub mod collection;
pub mod engine;
pub mod session;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    format_clock, CountdownState, EngineSnapshot, RunningMode, Thresholds, TimerMode,
};

// Re-export engine types
pub use engine::{CountdownEngine, TimerEvent};

// Re-export collection types
pub use collection::{
    CollectionError, Timer, TimerAddress, TimerGroup, TimerId, TimerModel, MAX_TIMERS_PER_GROUP,
};

// Re-export host-side types
pub use session::{ActiveEngine, TimerSession};
pub use store::{DocumentStore, StoreError};
