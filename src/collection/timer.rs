//! The timer entity stored in the document model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Thresholds;

// ============================================================================
// TimerId
// ============================================================================

/// Permanent, position-independent identifier of a timer entity.
///
/// Stable for the entity's lifetime; the structured address, by contrast,
/// shifts with every insert or removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(Uuid);

impl TimerId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for TimerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Timer
// ============================================================================

/// A timer entity in the document: identity, thresholds, selection flag.
///
/// Carries no parent pointer; the owning group and model are found by
/// scanning, which keeps ownership flowing strictly downward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Permanent identity
    id: TimerId,
    /// Threshold configuration; defaults to all zeros
    pub thresholds: Thresholds,
    /// Host-managed selection flag; not consulted by any core logic
    pub is_selected: bool,
}

impl Timer {
    /// Creates a zero-valued timer with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: TimerId::new(),
            thresholds: Thresholds::default(),
            is_selected: false,
        }
    }

    /// The timer's permanent identifier.
    pub fn id(&self) -> TimerId {
        self.id
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
