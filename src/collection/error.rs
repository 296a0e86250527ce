//! Collection error types.
//!
//! Lookups that find nothing return `Option` and never error; the one hard
//! fault in the document model is placing a timer beyond a group's fixed
//! capacity, which indicates a host bug rather than a user action.

use thiserror::Error;

/// Errors that can occur while mutating the timer document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A timer placement would exceed the group's maximum capacity.
    #[error("group {group} cannot hold a timer at item {item}: capacity is {capacity}")]
    GroupCapacityExceeded {
        /// Index of the group that rejected the placement
        group: usize,
        /// Item index that was requested
        item: usize,
        /// The fixed per-group capacity
        capacity: usize,
    },
}
