use std::fmt;
use std::sync::Arc;

use crate::stack::Context;

/// Content held by a level
///
/// A level is `Empty` until something is pushed into it, and goes back to
/// `Empty` when the user navigates back past it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload<T> {
    /// Nothing presented from this level
    Empty,

    /// Content presented from this level
    Set(T),
}

impl<T> Default for Payload<T> {
    fn default() -> Self {
        Payload::Empty
    }
}

impl<T> Payload<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Payload::Set(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }

    /// Get the content if set, None otherwise
    pub fn value(&self) -> Option<&T> {
        match self {
            Payload::Set(value) => Some(value),
            Payload::Empty => None,
        }
    }

    /// Replace with `Empty`, returning what was there
    pub fn take(&mut self) -> Payload<T> {
        std::mem::take(self)
    }
}

impl<T> From<Option<T>> for Payload<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => Payload::Set(value),
            None => Payload::Empty,
        }
    }
}

/// Predicate deciding whether a push into a level may proceed
///
/// Gates run while a [`SharedStack`](crate::stack::SharedStack) holds its lock
/// and must not call back into the stack.
pub type Gate = Arc<dyn Fn(&Context) -> bool + Send + Sync>;

/// Wrap a closure as a [`Gate`]
pub fn gate<F>(predicate: F) -> Gate
where
    F: Fn(&Context) -> bool + Send + Sync + 'static,
{
    Arc::new(predicate)
}

/// Gate that only admits contexts where `key` holds boolean `true`
pub fn require_flag(key: impl Into<String>) -> Gate {
    let key = key.into();
    gate(move |ctx| ctx.get_bool(&key).unwrap_or(false))
}

/// One registered navigation level
#[derive(Clone)]
pub struct Level<T> {
    payload: Payload<T>,
    gate: Option<Gate>,
}

impl<T> Level<T> {
    pub fn new(gate: Option<Gate>) -> Self {
        Self {
            payload: Payload::Empty,
            gate,
        }
    }

    pub fn payload(&self) -> &Payload<T> {
        &self.payload
    }

    pub(crate) fn set_payload(&mut self, payload: Payload<T>) {
        self.payload = payload;
    }

    pub(crate) fn take_payload(&mut self) -> Payload<T> {
        self.payload.take()
    }

    pub fn gate(&self) -> Option<&Gate> {
        self.gate.as_ref()
    }

    pub fn has_gate(&self) -> bool {
        self.gate.is_some()
    }

    /// Run the gate against `context`; levels without a gate admit everything
    pub fn admits(&self, context: &Context) -> bool {
        match &self.gate {
            Some(gate) => gate(context),
            None => true,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Level<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("payload", &self.payload)
            .field("gated", &self.gate.is_some())
            .finish()
    }
}
