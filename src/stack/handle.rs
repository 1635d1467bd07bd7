use log::debug;

use crate::stack::{Gate, LevelId, LevelIdGenerator, PopOutcome, StackStore};

/// Per-node participant in the stack
///
/// A UI node that can present deeper content owns one handle. The handle gets
/// its id once, registers it the first time the node is shown, and turns the
/// node's "presented" indicator going from open to closed into a pop.
pub struct LevelHandle {
    id: LevelId,
    gate: Option<Gate>,
    registered: bool,
    is_active: bool,
}

impl LevelHandle {
    /// Create a handle with a fresh id from `ids`
    pub fn new(ids: &LevelIdGenerator, gate: Option<Gate>) -> Self {
        Self::with_id(ids.next_id(), gate)
    }

    pub fn with_id(id: LevelId, gate: Option<Gate>) -> Self {
        Self {
            id,
            gate,
            registered: false,
            is_active: true,
        }
    }

    pub fn id(&self) -> LevelId {
        self.id
    }

    pub fn gate(&self) -> Option<&Gate> {
        self.gate.as_ref()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// The presented indicator; only false for the duration of a close
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Register with `store`. Safe to call on every render.
    ///
    /// Registration happens at most once. A handle whose level was later
    /// truncated by an ancestor's pop stays retired and does not bring the
    /// level back.
    pub fn appear<T>(&mut self, store: &mut StackStore<T>) {
        if self.registered {
            return;
        }

        if store.register(self.id, self.gate.clone()) {
            debug!("Handle {} registered", self.id);
            self.registered = true;
        } else if store.contains(self.id) {
            self.registered = true;
        }
    }

    /// Feed the indicator's new value
    ///
    /// Going from open to closed pops this level and flips the indicator back
    /// to open so the handle is ready for the next push. Every other transition
    /// is ignored.
    pub fn set_active<T>(&mut self, active: bool, store: &mut StackStore<T>) -> Option<PopOutcome> {
        let was_active = std::mem::replace(&mut self.is_active, active);
        if active || !was_active {
            return None;
        }

        if !self.registered {
            // Never shown, so it cannot have presented anything
            self.is_active = true;
            return None;
        }

        let outcome = store.pop(self.id);
        self.is_active = true;
        Some(outcome)
    }

    /// Shorthand for `set_active(false, store)`
    pub fn close<T>(&mut self, store: &mut StackStore<T>) -> Option<PopOutcome> {
        self.set_active(false, store)
    }

    /// Content the store currently holds for this handle
    pub fn content<'a, T>(&self, store: &'a StackStore<T>) -> Option<&'a T> {
        store.content(self.id)
    }

    pub fn is_presenting<T>(&self, store: &StackStore<T>) -> bool {
        self.content(store).is_some()
    }
}

impl std::fmt::Debug for LevelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelHandle")
            .field("id", &self.id)
            .field("gated", &self.gate.is_some())
            .field("registered", &self.registered)
            .field("is_active", &self.is_active)
            .finish()
    }
}
