//! An ordered, capacity-bounded group of timers.

use serde::{Deserialize, Serialize};

use super::timer::{Timer, TimerId};

/// Fixed maximum number of timers a single group can hold.
pub const MAX_TIMERS_PER_GROUP: usize = 8;

// ============================================================================
// TimerGroup
// ============================================================================

/// An ordered sequence of timers with exclusive ownership.
///
/// Structural mutation goes through [`super::model::TimerModel`], which
/// enforces the capacity bound and keeps the cursor consistent; the group
/// itself only exposes reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerGroup {
    timers: Vec<Timer>,
}

impl TimerGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self { timers: Vec::new() }
    }

    /// Number of timers in the group.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns true if the group holds no timers.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Returns true if the group is at capacity.
    pub fn is_full(&self) -> bool {
        self.timers.len() >= MAX_TIMERS_PER_GROUP
    }

    /// The timer at an item index.
    pub fn timer(&self, item: usize) -> Option<&Timer> {
        self.timers.get(item)
    }

    /// The timers in order.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter()
    }

    /// Item index of the timer with the given identifier.
    pub fn position_of(&self, id: TimerId) -> Option<usize> {
        self.timers.iter().position(|t| t.id() == id)
    }

    pub(super) fn timer_mut(&mut self, item: usize) -> Option<&mut Timer> {
        self.timers.get_mut(item)
    }

    pub(super) fn insert(&mut self, item: usize, timer: Timer) -> &mut Timer {
        self.timers.insert(item, timer);
        &mut self.timers[item]
    }

    pub(super) fn push(&mut self, timer: Timer) -> &mut Timer {
        self.timers.push(timer);
        let last = self.timers.len() - 1;
        &mut self.timers[last]
    }

    pub(super) fn remove(&mut self, item: usize) -> Timer {
        self.timers.remove(item)
    }
}

// ============================================================================
// Tests
// ============================================================================
