//! Timer collection: the grouped multi-timer document.
//!
//! This module provides the in-memory document model:
//! - `timer`: the timer entity with its permanent identity
//! - `group`: an ordered, capacity-bounded group of timers
//! - `model`: the ordered group collection with structured addressing
//!   and the current-index cursor
//! - `error`: collection error types
//!
//! The collection owns its timers exclusively (model owns groups, groups
//! own timers); addresses are recomputed from position on demand and never
//! cached on an entity. It is an in-memory document with single-writer
//! semantics; no internal locking.

pub mod error;
pub mod group;
pub mod model;
pub mod timer;

pub use error::CollectionError;
pub use group::{TimerGroup, MAX_TIMERS_PER_GROUP};
pub use model::{TimerAddress, TimerModel};
pub use timer::{Timer, TimerId};
