use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a navigation level.
///
/// Ordering follows stack depth: a smaller id sits closer to the root, a larger
/// one was opened more recently. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LevelId(pub u64);

impl LevelId {
    /// Never registered; handed out by a generator that has run out of ids
    pub const EXHAUSTED: LevelId = LevelId(u64::MAX);

    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn is_exhausted(self) -> bool {
        self == Self::EXHAUSTED
    }
}

impl From<u64> for LevelId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level#{}", self.0)
    }
}

/// Monotonic counter handing out fresh level ids
///
/// Clones share the same counter, so a generator can be passed down the UI tree
/// while the store keeps its own copy.
#[derive(Debug, Clone, Default)]
pub struct LevelIdGenerator {
    next: Arc<AtomicU64>,
}

impl LevelIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting at `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    /// Take the next id; every call returns a strictly larger id than the last
    ///
    /// Once the counter reaches [`LevelId::EXHAUSTED`] it stays there, and every
    /// further call returns that id, which the store refuses to register.
    pub fn next_id(&self) -> LevelId {
        match self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
        {
            Ok(id) => LevelId(id),
            Err(_) => LevelId::EXHAUSTED,
        }
    }

    /// Make sure ids handed out from now on sort after `seen`
    pub fn observe(&self, seen: LevelId) {
        self.next.fetch_max(seen.0.saturating_add(1), Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase() {
        let ids = LevelIdGenerator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert!(a < b && b < c);
        assert_eq!(a, LevelId(0));
    }

    #[test]
    fn test_clones_share_counter() {
        let ids = LevelIdGenerator::new();
        let other = ids.clone();
        let a = ids.next_id();
        let b = other.next_id();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_observe_skips_past_foreign_ids() {
        let ids = LevelIdGenerator::new();
        ids.observe(LevelId(41));
        assert_eq!(ids.next_id(), LevelId(42));

        // Observing something older must not move the counter backwards
        ids.observe(LevelId(3));
        assert_eq!(ids.next_id(), LevelId(43));
    }

    #[test]
    fn test_counter_stops_at_exhausted() {
        let ids = LevelIdGenerator::starting_at(u64::MAX - 2);
        assert_eq!(ids.next_id(), LevelId(u64::MAX - 2));
        assert_eq!(ids.next_id(), LevelId(u64::MAX - 1));
        assert!(ids.next_id().is_exhausted());
        // never wraps back to the root end
        assert!(ids.next_id().is_exhausted());
    }

    #[test]
    fn test_observe_near_top_never_wraps() {
        let ids = LevelIdGenerator::new();
        ids.observe(LevelId(u64::MAX - 1));
        let fresh = ids.next_id();
        assert!(fresh > LevelId(u64::MAX - 1));
        assert!(fresh.is_exhausted());
        assert!(ids.next_id() >= fresh);
    }

    #[test]
    fn test_display() {
        assert_eq!(LevelId(7).to_string(), "level#7");
    }
}
