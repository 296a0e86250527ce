//! Display utilities for the stage timer CLI.
//!
//! This module provides formatted output for:
//! - Live countdown ticks and band changes
//! - Document listings
//! - Error messages

use crate::collection::{Timer, TimerAddress, TimerModel};
use crate::engine::TimerEvent;
use crate::types::{format_clock, EngineSnapshot, Thresholds, TimerMode};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the header line for a foreground run.
    pub fn show_run_header(thresholds: Thresholds) {
        println!(
            "* countdown {}  (warning at {}, final at {})",
            format_clock(thresholds.starting_seconds),
            format_clock(thresholds.warning_seconds),
            format_clock(thresholds.final_seconds),
        );
    }

    /// Shows a timer event in human-readable form.
    pub fn show_event(event: &TimerEvent) {
        match event {
            TimerEvent::Started { .. } => {}
            TimerEvent::Tick { snapshot } => Self::show_tick(snapshot),
            TimerEvent::Transition { to, .. } => Self::show_transition(*to),
            TimerEvent::Paused { snapshot } => {
                println!("|| paused at {}", snapshot.display_string());
            }
            TimerEvent::Resumed { snapshot } => {
                println!("> resumed at {}", snapshot.display_string());
            }
            TimerEvent::Stopped { snapshot } => {
                println!("[] stopped at {}", snapshot.display_string());
            }
        }
    }

    /// Shows one tick line.
    fn show_tick(snapshot: &EngineSnapshot) {
        match snapshot.mode {
            TimerMode::Countdown => println!("  {}", snapshot.display_string()),
            _ => println!("  {}  {}", snapshot.display_string(), snapshot.mode.as_str()),
        }
    }

    /// Shows a band change.
    fn show_transition(to: TimerMode) {
        match to {
            TimerMode::Alarm => println!("!! time is up"),
            _ => println!(">> entering {} band", to.as_str()),
        }
    }

    /// Shows the timer document.
    pub fn show_document(model: &TimerModel) {
        if model.is_empty() {
            println!("document is empty");
            return;
        }

        println!(
            "{} timers in {} groups",
            model.timer_count(),
            model.group_count()
        );
        for (group_index, group) in model.groups().iter().enumerate() {
            let marker = if model.current_index() == Some(group_index) {
                " *"
            } else {
                ""
            };
            println!("group {}{}", group_index, marker);
            for (item, timer) in group.timers().enumerate() {
                println!(
                    "  ({}, {})  {}  {}  warning {} / final {}{}",
                    group_index,
                    item,
                    timer.id(),
                    format_clock(timer.thresholds.starting_seconds),
                    format_clock(timer.thresholds.warning_seconds),
                    format_clock(timer.thresholds.final_seconds),
                    if timer.is_selected { "  [selected]" } else { "" },
                );
            }
        }
    }

    /// Shows a success message for a created timer.
    pub fn show_added(timer: &Timer, address: TimerAddress) {
        println!("* added timer {} at {}", timer.id(), address);
        println!(
            "  {}  warning {} / final {}",
            format_clock(timer.thresholds.starting_seconds),
            format_clock(timer.thresholds.warning_seconds),
            format_clock(timer.thresholds.final_seconds),
        );
    }

    /// Shows a success message for a removed timer.
    pub fn show_removed(id: &str) {
        println!("* removed timer {}", id);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}
