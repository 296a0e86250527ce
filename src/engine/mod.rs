//! Countdown engine module.
//!
//! This module contains the live side of the timer core:
//! - `countdown`: countdown engine with the one-second cadence and event stream

pub mod countdown;

pub use countdown::{CountdownEngine, TimerEvent};
