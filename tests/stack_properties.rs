//! Store-level properties: registration, push targeting, truncation, gating,
//! notifications and concurrent use through `SharedStack`.

use stapel::stack::{
    Context, LevelHandle, LevelId, Payload, PopOutcome, PushOutcome, SharedStack, StackEvent,
    StackStore, gate, require_flag,
};
use std::sync::{Arc, Mutex};
use std::thread;

fn id(n: u64) -> LevelId {
    LevelId(n)
}

fn ctx() -> Context {
    Context::new()
}

#[test]
fn test_empty_store() {
    let store: StackStore<&str> = StackStore::new();
    assert!(store.is_empty());
    assert_eq!(store.active_level(), None);
    assert_eq!(store.root_level(), None);
    assert!(!store.evaluate(&ctx()));
}

#[test]
fn test_register_is_idempotent_and_keeps_gate() {
    let mut store: StackStore<&str> = StackStore::new();
    assert!(store.register(id(3), Some(require_flag("ok"))));
    store.push("kept", &Context::new().with("ok", true));

    assert!(!store.register(id(3), None));
    assert_eq!(store.len(), 1);
    assert_eq!(store.content(id(3)), Some(&"kept"));
    assert!(store.level(id(3)).unwrap().has_gate());
    assert!(!store.evaluate(&ctx()));
}

#[test]
fn test_push_targets_deepest_level() {
    let mut store = StackStore::new();
    store.register(id(2), None);
    store.register(id(7), None);
    store.register(id(5), None);

    assert_eq!(store.push("x", &ctx()), PushOutcome::Pushed(id(7)));
    assert_eq!(store.content(id(7)), Some(&"x"));
    assert!(store.payload(id(5)).unwrap().is_empty());
    assert!(store.payload(id(2)).unwrap().is_empty());
}

#[test]
fn test_push_without_levels() {
    let mut store = StackStore::new();
    assert_eq!(store.push("x", &ctx()), PushOutcome::NoActiveLevel);
    assert!(store.is_empty());
}

#[test]
fn test_pop_truncates_deeper_levels() {
    let mut store = StackStore::new();
    for n in 0..4 {
        store.register(id(n), None);
        store.push(n, &ctx());
    }

    let outcome = store.pop(id(1));
    assert_eq!(
        outcome,
        PopOutcome::Popped {
            id: id(1),
            cleared: true,
            truncated: vec![id(2), id(3)],
        }
    );
    assert_eq!(store.ids(), vec![id(0), id(1)]);
    assert!(store.payload(id(1)).unwrap().is_empty());
    assert_eq!(store.content(id(0)), Some(&0));
}

#[test]
fn test_pop_twice_changes_nothing_more() {
    let mut store = StackStore::new();
    store.register(id(0), None);
    store.register(id(1), None);
    store.push("x", &ctx());

    assert!(store.pop(id(0)).changed());
    let version = store.version();
    let again = store.pop(id(0));
    assert!(!again.changed());
    assert_eq!(store.version(), version);
    assert_eq!(store.ids(), vec![id(0)]);
}

#[test]
fn test_pop_of_unknown_id_still_truncates() {
    let mut store: StackStore<&str> = StackStore::new();
    store.register(id(1), None);
    store.register(id(4), None);

    let outcome = store.pop(id(2));
    assert_eq!(
        outcome,
        PopOutcome::Unregistered {
            id: id(2),
            truncated: vec![id(4)],
        }
    );
    assert_eq!(store.ids(), vec![id(1)]);
}

#[test]
fn test_ungated_level_admits_anything() {
    let mut store = StackStore::new();
    store.register(id(0), None);
    assert!(store.evaluate(&ctx()));
    assert!(store.evaluate(&Context::new().with("expected", false)));
    assert!(store.push("x", &Context::new().with("anything", 1)).is_pushed());
}

#[test]
fn test_gate_rejection_leaves_payload() {
    let mut store = StackStore::new();
    store.register(
        id(0),
        Some(gate(|c: &Context| c.get_bool("expected") == Some(true))),
    );
    assert!(store.push("first", &Context::new().with("expected", true)).is_pushed());

    let outcome = store.push("second", &Context::new().with("expected", false));
    assert_eq!(outcome, PushOutcome::RejectedByGate(id(0)));
    assert_eq!(store.content(id(0)), Some(&"first"));
}

#[test]
fn test_list_detail_adhoc_sequence() {
    let mut store = StackStore::new();

    store.register(id(0), None);
    assert_eq!(store.len(), 1);
    store.push("list", &ctx());
    assert_eq!(store.len(), 1);

    store.register(id(1), None);
    assert_eq!(store.len(), 2);
    store.push("detail", &ctx());
    assert_eq!(store.len(), 2);

    store.register(id(2), None);
    assert_eq!(store.len(), 3);
    store.push("adhoc", &ctx());
    assert_eq!(store.len(), 3);

    assert_eq!(store.content(id(0)), Some(&"list"));
    assert_eq!(store.content(id(1)), Some(&"detail"));
    assert_eq!(store.content(id(2)), Some(&"adhoc"));

    store.pop(id(2));
    assert_eq!(store.len(), 3);
    assert!(store.payload(id(2)).unwrap().is_empty());

    store.pop(id(1));
    assert_eq!(store.len(), 2);
    assert!(!store.contains(id(2)));
    assert!(store.payload(id(1)).unwrap().is_empty());

    assert_eq!(store.push("another", &ctx()), PushOutcome::Pushed(id(1)));
    assert_eq!(store.content(id(1)), Some(&"another"));
    assert_eq!(store.content(id(0)), Some(&"list"));
}

#[test]
fn test_observers_follow_mutation_order() {
    let mut store = StackStore::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |event: &StackEvent| sink.lock().unwrap().push(event.clone()));

    store.register(id(0), Some(require_flag("go")));
    store.register(id(0), None);
    store.push("no", &ctx());
    store.push("yes", &Context::new().with("go", true));
    store.register(id(1), None);
    store.pop(id(0));
    store.pop(id(0));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            StackEvent::Registered(id(0)),
            StackEvent::Pushed(id(0)),
            StackEvent::Registered(id(1)),
            StackEvent::Popped {
                id: id(0),
                truncated: vec![id(1)],
            },
        ]
    );
    assert_eq!(store.version(), 4);
}

#[test]
fn test_generated_ids_sort_after_external_ones() {
    let mut store: StackStore<&str> = StackStore::new();
    store.register(id(41), None);

    let fresh = store.next_id();
    assert!(fresh > id(41));
    assert!(store.next_id() > fresh);
}

#[test]
fn test_handles_drive_a_two_level_stack() {
    let mut store = StackStore::new();
    let ids = store.id_generator();
    let mut root = LevelHandle::new(&ids, None);
    root.appear(&mut store);
    root.appear(&mut store);
    assert_eq!(store.len(), 1);

    store.push("detail", &ctx());
    assert_eq!(root.content(&store), Some(&"detail"));

    let mut detail = LevelHandle::new(&ids, None);
    detail.appear(&mut store);
    assert!(detail.id() > root.id());
    store.push("adhoc", &ctx());
    assert_eq!(detail.content(&store), Some(&"adhoc"));

    let outcome = root.close(&mut store).unwrap();
    assert_eq!(outcome.truncated(), &[detail.id()]);
    assert!(root.is_active());
    assert!(!root.is_presenting(&store));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_shared_stack_concurrent_pushes() {
    let stack: SharedStack<u32> = SharedStack::new();
    stack.register(id(0), None);

    let workers: Vec<_> = (0..8)
        .map(|n| {
            let stack = stack.clone();
            thread::spawn(move || {
                let level = stack.next_id();
                stack.register(level, None);
                stack.push(n, &Context::new())
            })
        })
        .collect();

    for worker in workers {
        assert!(worker.join().unwrap().is_pushed());
    }

    assert_eq!(stack.len(), 9);
    stack.with(|store| {
        let ids = store.ids();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    });

    let root_pop = stack.pop(id(0));
    assert_eq!(root_pop.truncated().len(), 8);
    assert_eq!(stack.len(), 1);
}
