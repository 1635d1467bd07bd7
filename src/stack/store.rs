use log::{debug, trace, warn};
use std::collections::BTreeMap;
use std::fmt;

use crate::stack::{Context, Gate, Level, LevelId, LevelIdGenerator, Payload};

/// Result of a push request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Content was stored in the active level
    Pushed(LevelId),

    /// The active level's gate refused the context; nothing changed
    RejectedByGate(LevelId),

    /// No level is registered, so there was nothing to push into
    NoActiveLevel,
}

impl PushOutcome {
    pub fn is_pushed(&self) -> bool {
        matches!(self, PushOutcome::Pushed(_))
    }

}

/// Result of a pop request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome {
    /// The level exists and is now empty
    Popped {
        id: LevelId,
        /// False when the level was already empty
        cleared: bool,
        /// Deeper levels that were discarded
        truncated: Vec<LevelId>,
    },

    /// Nothing was registered at `id`
    Unregistered {
        id: LevelId,
        truncated: Vec<LevelId>,
    },
}

impl PopOutcome {
    pub fn id(&self) -> LevelId {
        match self {
            PopOutcome::Popped { id, .. } | PopOutcome::Unregistered { id, .. } => *id,
        }
    }

    pub fn truncated(&self) -> &[LevelId] {
        match self {
            PopOutcome::Popped { truncated, .. } | PopOutcome::Unregistered { truncated, .. } => truncated,
        }
    }

    /// Whether the pop modified the store at all
    pub fn changed(&self) -> bool {
        match self {
            PopOutcome::Popped { cleared, truncated, .. } => *cleared || !truncated.is_empty(),
            PopOutcome::Unregistered { truncated, .. } => !truncated.is_empty(),
        }
    }
}

/// Notification sent to observers after the store changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEvent {
    Registered(LevelId),
    Pushed(LevelId),
    Popped { id: LevelId, truncated: Vec<LevelId> },
}

/// Handle returned by [`StackStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&StackEvent) + Send>;

/// Registry of navigation levels
///
/// The active level is always the deepest registered one (largest id). Pushes
/// go there, pops clear a level and drop everything opened after it.
pub struct StackStore<T> {
    levels: BTreeMap<LevelId, Level<T>>,
    ids: LevelIdGenerator,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    version: u64,
}

impl<T> Default for StackStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StackStore<T> {
    pub fn new() -> Self {
        Self::with_id_generator(LevelIdGenerator::new())
    }

    /// Create a store that shares an existing id counter
    pub fn with_id_generator(ids: LevelIdGenerator) -> Self {
        Self {
            levels: BTreeMap::new(),
            ids,
            observers: Vec::new(),
            next_subscription: 0,
            version: 0,
        }
    }

    /// The store's id counter (clones share state)
    pub fn id_generator(&self) -> LevelIdGenerator {
        self.ids.clone()
    }

    /// Allocate a fresh id that sorts after every id seen so far
    pub fn next_id(&self) -> LevelId {
        self.ids.next_id()
    }

    /// Register a level. Returns false (and changes nothing) if `id` is already known.
    ///
    /// [`LevelId::EXHAUSTED`] is never registered.
    pub fn register(&mut self, id: LevelId, gate: Option<Gate>) -> bool {
        if id.is_exhausted() {
            warn!("Refusing to register {}, the id space is exhausted", id);
            return false;
        }
        if self.levels.contains_key(&id) {
            return false;
        }

        debug!("Registering {} (gated: {})", id, gate.is_some());
        self.ids.observe(id);
        self.levels.insert(id, Level::new(gate));
        self.notify(StackEvent::Registered(id));
        true
    }

    /// Deepest registered level
    pub fn active_level(&self) -> Option<LevelId> {
        self.levels.last_key_value().map(|(id, _)| *id)
    }

    /// Shallowest registered level
    pub fn root_level(&self) -> Option<LevelId> {
        self.levels.first_key_value().map(|(id, _)| *id)
    }

    /// Would a push with `context` be accepted right now?
    ///
    /// False without an active level, true when the active level has no gate,
    /// otherwise whatever the gate says. Never mutates the store.
    pub fn evaluate(&self, context: &Context) -> bool {
        let Some((id, level)) = self.levels.last_key_value() else {
            trace!("Evaluate with no active level");
            return false;
        };

        let admitted = level.admits(context);
        trace!("Evaluate against {}: {}", id, admitted);
        admitted
    }

    /// Store `value` in the active level if its gate admits `context`
    pub fn push(&mut self, value: T, context: &Context) -> PushOutcome {
        let Some(id) = self.active_level() else {
            debug!("Push ignored, no active level");
            return PushOutcome::NoActiveLevel;
        };

        if !self.evaluate(context) {
            debug!("Push into {} rejected by gate", id);
            return PushOutcome::RejectedByGate(id);
        }

        if let Some(level) = self.levels.get_mut(&id) {
            level.set_payload(Payload::Set(value));
        }
        debug!("Pushed into {}", id);
        self.notify(StackEvent::Pushed(id));
        PushOutcome::Pushed(id)
    }

    /// Clear `id` and discard every deeper level
    pub fn pop(&mut self, id: LevelId) -> PopOutcome {
        let cleared = self.levels.get_mut(&id).map(|level| level.take_payload().is_set());

        let truncated = self.truncate_above(id);

        let outcome = match cleared {
            Some(cleared) => PopOutcome::Popped { id, cleared, truncated },
            None => PopOutcome::Unregistered { id, truncated },
        };

        if outcome.changed() {
            debug!("Popped {} (discarded {} deeper levels)", id, outcome.truncated().len());
            self.notify(StackEvent::Popped {
                id,
                truncated: outcome.truncated().to_vec(),
            });
        } else {
            trace!("Pop of {} changed nothing", id);
        }

        outcome
    }

    fn truncate_above(&mut self, id: LevelId) -> Vec<LevelId> {
        let Some(first_deeper) = id.get().checked_add(1) else {
            return Vec::new();
        };

        let deeper = self.levels.split_off(&LevelId(first_deeper));
        deeper.into_keys().collect()
    }

    pub fn level(&self, id: LevelId) -> Option<&Level<T>> {
        self.levels.get(&id)
    }

    pub fn payload(&self, id: LevelId) -> Option<&Payload<T>> {
        self.levels.get(&id).map(Level::payload)
    }

    /// Content currently presented from `id`
    pub fn content(&self, id: LevelId) -> Option<&T> {
        self.payload(id).and_then(Payload::value)
    }

    /// All levels, shallowest first
    pub fn levels(&self) -> impl Iterator<Item = (LevelId, &Level<T>)> {
        self.levels.iter().map(|(id, level)| (*id, level))
    }

    pub fn ids(&self) -> Vec<LevelId> {
        self.levels().map(|(id, _)| id).collect()
    }

    pub fn contains(&self, id: LevelId) -> bool {
        self.levels.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Bumped on every state change
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Call `observer` synchronously after every state change
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&StackEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self, event: StackEvent) {
        self.version += 1;
        for (_, observer) in &self.observers {
            observer(&event);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StackStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackStore")
            .field("levels", &self.levels)
            .field("version", &self.version)
            .field("observers", &self.observers.len())
            .finish()
    }
}
