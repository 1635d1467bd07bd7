use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::stack::{
    Context, Gate, LevelId, LevelIdGenerator, PopOutcome, PushOutcome, StackEvent, StackStore,
    SubscriptionId,
};

/// Cloneable handle to one [`StackStore`], passed down the UI tree
///
/// Every call takes the same lock, so the evaluate-then-write inside `push`
/// cannot interleave with a registration or pop from another thread.
pub struct SharedStack<T> {
    inner: Arc<Mutex<StackStore<T>>>,
}

impl<T> Clone for SharedStack<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SharedStack<T> {
    pub fn new() -> Self {
        Self::from_store(StackStore::new())
    }

    pub fn from_store(store: StackStore<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StackStore<T>> {
        // Every store operation leaves the map consistent, so a panic elsewhere
        // while holding the lock does not invalidate it
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with read access to the store
    pub fn with<R>(&self, f: impl FnOnce(&StackStore<T>) -> R) -> R {
        f(&self.lock())
    }

    /// Run `f` with write access; the whole closure runs under one lock
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut StackStore<T>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn register(&self, id: LevelId, gate: Option<Gate>) -> bool {
        self.lock().register(id, gate)
    }

    pub fn active_level(&self) -> Option<LevelId> {
        self.lock().active_level()
    }

    pub fn evaluate(&self, context: &Context) -> bool {
        self.lock().evaluate(context)
    }

    pub fn push(&self, value: T, context: &Context) -> PushOutcome {
        self.lock().push(value, context)
    }

    pub fn pop(&self, id: LevelId) -> PopOutcome {
        self.lock().pop(id)
    }

    pub fn contains(&self, id: LevelId) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn version(&self) -> u64 {
        self.lock().version()
    }

    pub fn next_id(&self) -> LevelId {
        self.lock().next_id()
    }

    pub fn id_generator(&self) -> LevelIdGenerator {
        self.lock().id_generator()
    }

    /// Observers run while the lock is held and must not call back into the stack
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&StackEvent) + Send + 'static,
    {
        self.lock().subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().unsubscribe(id)
    }

    /// Both handles point at the same store
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> SharedStack<T> {
    /// Clone out the content presented from `id`
    pub fn content(&self, id: LevelId) -> Option<T> {
        self.lock().content(id).cloned()
    }
}
