//! Core data types for the stage timer.
//!
//! This module defines the data structures used for:
//! - Timer mode management (countdown bands, pause wrapper, alarm)
//! - Threshold configuration with validation
//! - The pure countdown state machine driven by the engine cadence

use serde::{Deserialize, Serialize};

// ============================================================================
// RunningMode
// ============================================================================

/// The band a running timer is in, derived from the current time and the
/// configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningMode {
    /// Above the warning threshold
    Countdown,
    /// At or below the warning threshold
    Warning,
    /// At or below the final threshold
    Final,
}

impl RunningMode {
    /// Returns the string representation of the band.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunningMode::Countdown => "countdown",
            RunningMode::Warning => "warning",
            RunningMode::Final => "final",
        }
    }
}

// ============================================================================
// TimerMode
// ============================================================================

/// Represents the current mode of a countdown timer.
///
/// `Paused` carries the band that was active when the timer was paused so
/// that `resume` restores exactly the mode the host last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Timer is stopped (initial state, and the state after a manual reset)
    Stopped,
    /// Counting down above the warning threshold
    Countdown,
    /// Counting down within the warning band
    Warning,
    /// Counting down within the final band
    Final,
    /// Reached zero; terminal until the host stops or restarts the timer
    Alarm,
    /// Paused while in the carried band
    Paused(RunningMode),
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Stopped => "stopped",
            TimerMode::Countdown => "countdown",
            TimerMode::Warning => "warning",
            TimerMode::Final => "final",
            TimerMode::Alarm => "alarm",
            TimerMode::Paused(_) => "paused",
        }
    }

    /// Returns true if the timer is actively counting down.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            TimerMode::Countdown | TimerMode::Warning | TimerMode::Final
        )
    }

    /// Returns true if the timer is paused.
    pub fn is_paused(&self) -> bool {
        matches!(self, TimerMode::Paused(_))
    }

    /// Returns the active band, if the timer is counting down.
    pub fn running(&self) -> Option<RunningMode> {
        match self {
            TimerMode::Countdown => Some(RunningMode::Countdown),
            TimerMode::Warning => Some(RunningMode::Warning),
            TimerMode::Final => Some(RunningMode::Final),
            _ => None,
        }
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Stopped
    }
}

impl From<RunningMode> for TimerMode {
    fn from(band: RunningMode) -> Self {
        match band {
            RunningMode::Countdown => TimerMode::Countdown,
            RunningMode::Warning => TimerMode::Warning,
            RunningMode::Final => TimerMode::Final,
        }
    }
}

// ============================================================================
// Thresholds
// ============================================================================

/// Threshold configuration for a countdown timer, in whole seconds.
///
/// The thresholds partition `[0, starting_seconds]` into up to three bands,
/// evaluated high-to-low. A zero threshold makes its band empty, and the
/// scan simply skips it; the ordering `final <= warning <= starting` is
/// expected but never force-corrected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Full countdown duration in seconds
    pub starting_seconds: u32,
    /// Entry point of the warning band in seconds
    pub warning_seconds: u32,
    /// Entry point of the final band in seconds
    pub final_seconds: u32,
}

impl Thresholds {
    /// Creates a threshold set from starting, warning, and final seconds.
    pub fn new(starting_seconds: u32, warning_seconds: u32, final_seconds: u32) -> Self {
        Self {
            starting_seconds,
            warning_seconds,
            final_seconds,
        }
    }

    /// Validates the threshold ordering.
    ///
    /// Returns an error message if `final <= warning <= starting` does not
    /// hold. The engine itself never calls this; it is offered to hosts
    /// that want to reject inverted configurations up front.
    pub fn validate(&self) -> Result<(), String> {
        if self.final_seconds > self.warning_seconds {
            return Err(format!(
                "final threshold ({}s) exceeds warning threshold ({}s)",
                self.final_seconds, self.warning_seconds
            ));
        }
        if self.warning_seconds > self.starting_seconds {
            return Err(format!(
                "warning threshold ({}s) exceeds starting time ({}s)",
                self.warning_seconds, self.starting_seconds
            ));
        }
        Ok(())
    }

    /// Resolves the mode for a current-time value.
    ///
    /// Zero forces `Alarm` regardless of the bands; otherwise the bands are
    /// scanned high-to-low and empty bands fall through.
    pub fn mode_for(&self, current_seconds: u32) -> TimerMode {
        if current_seconds == 0 {
            TimerMode::Alarm
        } else if current_seconds <= self.final_seconds {
            TimerMode::Final
        } else if current_seconds <= self.warning_seconds {
            TimerMode::Warning
        } else {
            TimerMode::Countdown
        }
    }
}

// ============================================================================
// CountdownState
// ============================================================================

/// The pure countdown state machine.
///
/// Holds thresholds, the current time, and the mode, and applies commands
/// and one-second ticks. It has no knowledge of the cadence that drives it;
/// [`crate::engine::CountdownEngine`] owns that. Out-of-state commands are
/// no-ops that return `false` rather than errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    /// Threshold configuration; mutable only between runs
    pub thresholds: Thresholds,
    /// Remaining seconds, non-increasing while running
    pub current_seconds: u32,
    /// Current mode
    pub mode: TimerMode,
}

impl CountdownState {
    /// Creates a stopped state showing the full starting time.
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            current_seconds: thresholds.starting_seconds,
            mode: TimerMode::Stopped,
        }
    }

    /// Starts the countdown from the full starting time.
    ///
    /// Only valid from `Stopped`; returns false (and changes nothing)
    /// otherwise.
    pub fn start(&mut self) -> bool {
        if self.mode != TimerMode::Stopped {
            return false;
        }
        self.current_seconds = self.thresholds.starting_seconds;
        self.mode = self.thresholds.mode_for(self.current_seconds);
        true
    }

    /// Stops the countdown from any state.
    ///
    /// Leaves `current_seconds` and the thresholds untouched; resetting
    /// fields is the host's business. Returns false when already stopped.
    pub fn stop(&mut self) -> bool {
        if self.mode == TimerMode::Stopped {
            return false;
        }
        self.mode = TimerMode::Stopped;
        true
    }

    /// Pauses the countdown, recording the active band.
    ///
    /// Only valid while counting down; returns false from `Stopped`,
    /// `Alarm`, or when already paused.
    pub fn pause(&mut self) -> bool {
        match self.mode.running() {
            Some(band) => {
                self.mode = TimerMode::Paused(band);
                true
            }
            None => false,
        }
    }

    /// Resumes a paused countdown in the recorded band.
    pub fn resume(&mut self) -> bool {
        match self.mode {
            TimerMode::Paused(band) => {
                self.mode = band.into();
                true
            }
            _ => false,
        }
    }

    /// Fast-forwards to the alarm: current time to zero, mode to `Alarm`.
    ///
    /// Valid from any state; returns the mode transition for the jump, or
    /// `None` when the timer is already at the alarm.
    pub fn end(&mut self) -> Option<(TimerMode, TimerMode)> {
        if self.mode == TimerMode::Alarm && self.current_seconds == 0 {
            return None;
        }
        let from = self.mode;
        self.current_seconds = 0;
        self.mode = TimerMode::Alarm;
        Some((from, TimerMode::Alarm))
    }

    /// Applies one second of countdown.
    ///
    /// Must only be called while the state is active; the cadence checks
    /// [`Self::is_running`] first. Returns the band crossing caused by this
    /// decrement, if any.
    pub fn tick(&mut self) -> Option<(TimerMode, TimerMode)> {
        let from = self.mode;
        self.current_seconds = self.current_seconds.saturating_sub(1);
        let to = self.thresholds.mode_for(self.current_seconds);
        self.mode = to;
        if to != from {
            Some((from, to))
        } else {
            None
        }
    }

    /// Returns true if the timer is actively counting down.
    pub fn is_running(&self) -> bool {
        self.mode.is_active()
    }

    /// Returns true if the timer is paused.
    pub fn is_paused(&self) -> bool {
        self.mode.is_paused()
    }

    /// Formats the current time as `HH:MM:SS`.
    pub fn display_string(&self) -> String {
        format_clock(self.current_seconds)
    }

    /// Builds a snapshot of the observable state.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode,
            current_seconds: self.current_seconds,
            is_ticking: self.mode.is_active(),
        }
    }
}

// ============================================================================
// EngineSnapshot
// ============================================================================

/// Immutable view of an engine's state, carried by every timer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Mode at the time of the event
    pub mode: TimerMode,
    /// Remaining seconds at the time of the event
    pub current_seconds: u32,
    /// Whether the cadence was active
    pub is_ticking: bool,
}

impl EngineSnapshot {
    /// Formats the snapshot's time as `HH:MM:SS`.
    pub fn display_string(&self) -> String {
        format_clock(self.current_seconds)
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats a second count as `HH:MM:SS`.
pub fn format_clock(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

// ============================================================================
// Tests
// ============================================================================
