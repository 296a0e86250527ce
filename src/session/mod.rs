//! Timer session: the host-side coordination context.
//!
//! A `TimerSession` is the explicitly constructed object a host passes
//! around instead of an ambient global: it owns the multi-timer document
//! and hands out live countdown engines for whichever timer the user
//! activates. The engine reads its thresholds from the document once, at
//! activation; it never touches the document afterwards.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::collection::{TimerAddress, TimerId, TimerModel};
use crate::engine::{CountdownEngine, TimerEvent};

// ============================================================================
// TimerSession
// ============================================================================

/// Shared handle to a live engine plus the receiving end of its events.
pub type ActiveEngine = (
    Arc<Mutex<CountdownEngine>>,
    mpsc::UnboundedReceiver<TimerEvent>,
);

/// Owns the timer document and the currently live countdown engine.
///
/// Only one timer is live at a time in this design; activating another
/// timer replaces the previous handle. Stopping the old engine first is
/// the caller's business.
pub struct TimerSession {
    model: TimerModel,
    active: Option<(TimerId, Arc<Mutex<CountdownEngine>>)>,
}

impl TimerSession {
    /// Creates a session over an empty document.
    pub fn new() -> Self {
        Self::with_model(TimerModel::new())
    }

    /// Creates a session over an existing document (e.g. one loaded from
    /// storage).
    pub fn with_model(model: TimerModel) -> Self {
        Self {
            model,
            active: None,
        }
    }

    /// The timer document.
    pub fn model(&self) -> &TimerModel {
        &self.model
    }

    /// Mutable access to the timer document.
    pub fn model_mut(&mut self) -> &mut TimerModel {
        &mut self.model
    }

    /// Consumes the session, returning the document for persistence.
    pub fn into_model(self) -> TimerModel {
        self.model
    }

    /// Builds a live engine for the timer at a structured address.
    ///
    /// Reads the timer's thresholds from the document, wires a fresh event
    /// channel, and remembers the timer as the live one. Returns `None`
    /// when the address does not resolve. The lookup moves the document
    /// cursor like any other address resolution.
    pub fn activate(&mut self, address: TimerAddress) -> Option<ActiveEngine> {
        let timer = self.model.timer_at(address)?;
        let id = timer.id();
        let thresholds = timer.thresholds;

        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Arc::new(Mutex::new(CountdownEngine::new(thresholds, tx)));
        debug!(timer = %id, %address, "timer activated");
        self.active = Some((id, engine.clone()));
        Some((engine, rx))
    }

    /// Builds a live engine for the timer with the given identifier.
    pub fn activate_by_id(&mut self, id: TimerId) -> Option<ActiveEngine> {
        let address = self.model.address_of(id)?;
        self.activate(address)
    }

    /// Identifier of the live timer, if any.
    pub fn active_timer_id(&self) -> Option<TimerId> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    /// Shared handle to the live engine, if any.
    pub fn active_engine(&self) -> Option<Arc<Mutex<CountdownEngine>>> {
        self.active.as_ref().map(|(_, engine)| engine.clone())
    }

    /// Drops the live handle and returns it so the caller can stop the
    /// engine. The document is untouched.
    pub fn deactivate(&mut self) -> Option<Arc<Mutex<CountdownEngine>>> {
        let (id, engine) = self.active.take()?;
        debug!(timer = %id, "timer deactivated");
        Some(engine)
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
