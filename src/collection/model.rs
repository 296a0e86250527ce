//! The ordered group collection with structured addressing.

use serde::{Deserialize, Serialize};

use super::error::CollectionError;
use super::group::{TimerGroup, MAX_TIMERS_PER_GROUP};
use super::timer::{Timer, TimerId};

// ============================================================================
// TimerAddress
// ============================================================================

/// Structured (group, item) address of a timer's position.
///
/// Transient by design: it shifts with ordinary splice semantics on every
/// insert or removal, while [`TimerId`] stays stable. Addresses are always
/// recomputed from the current structure, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerAddress {
    /// Index of the group within the model
    pub group: usize,
    /// Index of the timer within the group
    pub item: usize,
}

impl TimerAddress {
    /// Creates an address from group and item indices.
    pub fn new(group: usize, item: usize) -> Self {
        Self { group, item }
    }
}

impl std::fmt::Display for TimerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.group, self.item)
    }
}

// ============================================================================
// TimerModel
// ============================================================================

/// The multi-timer document: an ordered sequence of timer groups.
///
/// Owns its groups exclusively and maintains a current-index cursor that
/// tracks the last touched group, clamped into bounds after every
/// structural change. Single-writer; hosts that need concurrent access add
/// their own mutual exclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerModel {
    groups: Vec<TimerGroup>,
    current_index: usize,
}

impl TimerModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Creation ─────────────────────────────────────────────────────

    /// Creates a zero-valued timer at a structured address.
    ///
    /// Groups are created up through `address.group` as needed, and slots
    /// below `address.item` in the target group are filled with fresh
    /// zero-valued timers. An existing timer at the slot is shifted right,
    /// never overwritten. Fails when the placement would exceed the
    /// group's fixed capacity, which indicates a host bug.
    pub fn create_timer_at(
        &mut self,
        address: TimerAddress,
    ) -> Result<&mut Timer, CollectionError> {
        if address.item >= MAX_TIMERS_PER_GROUP {
            return Err(CollectionError::GroupCapacityExceeded {
                group: address.group,
                item: address.item,
                capacity: MAX_TIMERS_PER_GROUP,
            });
        }
        self.ensure_group(address.group);
        let group = &mut self.groups[address.group];
        while group.len() < address.item {
            group.push(Timer::new());
        }
        if group.is_full() {
            return Err(CollectionError::GroupCapacityExceeded {
                group: address.group,
                item: address.item,
                capacity: MAX_TIMERS_PER_GROUP,
            });
        }
        Ok(group.insert(address.item, Timer::new()))
    }

    /// Appends a zero-valued timer to the named group, creating the group
    /// (and any empty groups before it) when the index is beyond the
    /// current bounds.
    pub fn create_timer_at_end(
        &mut self,
        group_index: usize,
    ) -> Result<&mut Timer, CollectionError> {
        self.ensure_group(group_index);
        let group = &mut self.groups[group_index];
        if group.is_full() {
            return Err(CollectionError::GroupCapacityExceeded {
                group: group_index,
                item: group.len(),
                capacity: MAX_TIMERS_PER_GROUP,
            });
        }
        Ok(group.push(Timer::new()))
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// Resolves a structured address to its timer.
    ///
    /// A hit moves the cursor to the containing group; hosts rely on this
    /// as last-touched tracking.
    pub fn timer_at(&mut self, address: TimerAddress) -> Option<&Timer> {
        self.touch(address)?;
        self.groups[address.group].timer(address.item)
    }

    /// Mutable variant of [`Self::timer_at`], with the same cursor side
    /// effect.
    pub fn timer_at_mut(&mut self, address: TimerAddress) -> Option<&mut Timer> {
        self.touch(address)?;
        self.groups[address.group].timer_mut(address.item)
    }

    /// Finds a timer by its permanent identifier, scanning groups in
    /// order. A hit moves the cursor to the containing group.
    pub fn timer_by_id(&mut self, id: TimerId) -> Option<&Timer> {
        let address = self.address_of(id)?;
        self.timer_at(address)
    }

    /// Mutable variant of [`Self::timer_by_id`], with the same cursor
    /// side effect.
    pub fn timer_by_id_mut(&mut self, id: TimerId) -> Option<&mut Timer> {
        let address = self.address_of(id)?;
        self.timer_at_mut(address)
    }

    /// Computes the current structured address of a timer by scanning its
    /// owning group. Always reflects the present position.
    pub fn address_of(&self, id: TimerId) -> Option<TimerAddress> {
        self.groups.iter().enumerate().find_map(|(group, g)| {
            g.position_of(id)
                .map(|item| TimerAddress::new(group, item))
        })
    }

    // ── Removal ──────────────────────────────────────────────────────

    /// Removes a timer by identifier, preserving the order of the rest.
    ///
    /// The owning group is kept even when it becomes empty; groups are
    /// explicit containers the host manages. The cursor is re-clamped.
    pub fn remove_timer(&mut self, id: TimerId) -> Option<Timer> {
        let address = self.address_of(id)?;
        self.remove_timer_at(address)
    }

    /// Removes the timer at a structured address.
    pub fn remove_timer_at(&mut self, address: TimerAddress) -> Option<Timer> {
        let group = self.groups.get_mut(address.group)?;
        if address.item >= group.len() {
            return None;
        }
        let removed = group.remove(address.item);
        self.clamp_cursor();
        Some(removed)
    }

    /// Removes an entire group, shifting later groups left.
    pub fn remove_group(&mut self, group_index: usize) -> Option<TimerGroup> {
        if group_index >= self.groups.len() {
            return None;
        }
        let removed = self.groups.remove(group_index);
        self.clamp_cursor();
        Some(removed)
    }

    // ── Iteration & queries ──────────────────────────────────────────

    /// Every timer across all groups, group-major then item-minor.
    pub fn all_timers(&self) -> impl Iterator<Item = &Timer> {
        self.groups.iter().flat_map(|g| g.timers())
    }

    /// The groups in order.
    pub fn groups(&self) -> &[TimerGroup] {
        &self.groups
    }

    /// The group at an index.
    pub fn group(&self, group_index: usize) -> Option<&TimerGroup> {
        self.groups.get(group_index)
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of timers across all groups.
    pub fn timer_count(&self) -> usize {
        self.groups.iter().map(TimerGroup::len).sum()
    }

    /// Returns true if the model holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The current-index cursor: the last touched group, or `None` while
    /// the model is empty.
    pub fn current_index(&self) -> Option<usize> {
        if self.groups.is_empty() {
            None
        } else {
            Some(self.current_index)
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Creates empty trailing groups so that `group_index` exists.
    fn ensure_group(&mut self, group_index: usize) {
        while self.groups.len() <= group_index {
            self.groups.push(TimerGroup::new());
        }
    }

    /// Moves the cursor to the address's group if the address resolves.
    fn touch(&mut self, address: TimerAddress) -> Option<()> {
        let exists = self
            .groups
            .get(address.group)
            .is_some_and(|g| g.timer(address.item).is_some());
        if !exists {
            return None;
        }
        self.current_index = address.group;
        Some(())
    }

    /// Re-clamps the cursor into `0 <= cursor < group_count`.
    fn clamp_cursor(&mut self) {
        if self.groups.is_empty() {
            self.current_index = 0;
        } else if self.current_index >= self.groups.len() {
            self.current_index = self.groups.len() - 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
