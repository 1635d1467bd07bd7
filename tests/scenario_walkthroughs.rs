//! Scenario walk-throughs driven through the navigator, the way a user taps
//! through the screens.

use stapel::stack::{PopOutcome, PushOutcome};
use stapel::tui::{
    Navigator, PageStack, RuntimeConfig, Scenario, StackRuntime, Step, StepResult, run_script,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

fn navigator(scenario: Scenario) -> Navigator {
    scenario.navigator(PageStack::new())
}

fn tap(nav: &mut Navigator, label: &str) -> PushOutcome {
    nav.tap(label)
        .unwrap_or_else(|| panic!("no link labelled {:?}", label))
}

#[test]
fn test_simple_push_pop_push() {
    let mut nav = navigator(Scenario::Simple);
    assert!(nav.is_visible("Hello world!"));
    assert!(!nav.can_go_back());

    assert!(tap(&mut nav, "Push").is_pushed());
    assert!(nav.is_visible("Pushed view"));
    assert!(!nav.is_visible("Hello world!"));
    assert_eq!(nav.back_label(), Some("Back"));

    assert!(matches!(nav.back(), Some(PopOutcome::Popped { cleared: true, .. })));
    assert!(nav.is_visible("Hello world!"));

    assert!(tap(&mut nav, "Push").is_pushed());
    assert!(nav.is_visible("Pushed view"));
    assert_eq!(nav.stack().len(), 1);
}

#[test]
fn test_nested_forward_and_back() {
    let mut nav = navigator(Scenario::Nested);
    assert!(nav.is_visible("Root View"));
    assert_eq!(nav.title(), Some("Root view"));

    tap(&mut nav, "Push another view");
    assert!(nav.is_visible("Second view"));
    assert_eq!(nav.back_label(), Some("Root view"));

    tap(&mut nav, "Push yet another view");
    assert!(nav.is_visible("Third view"));

    tap(&mut nav, "And another view");
    assert!(nav.is_visible("Fourth view"));
    assert_eq!(nav.depth(), 4);
    assert_eq!(nav.stack().len(), 4);

    nav.back();
    assert!(nav.is_visible("Third view"));
    nav.back();
    assert!(nav.is_visible("Second view"));
    assert_eq!(nav.stack().len(), 2);

    tap(&mut nav, "Push yet another view");
    tap(&mut nav, "And another view");
    assert!(nav.is_visible("Fourth view"));

    nav.back();
    nav.back();
    nav.back();
    assert!(nav.is_visible("Root View"));
    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.stack().len(), 1);
    assert!(nav.back().is_none());
}

#[test]
fn test_nested_levels_get_increasing_ids() {
    let mut nav = navigator(Scenario::Nested);
    tap(&mut nav, "Push another view");
    tap(&mut nav, "Push yet another view");

    let first = nav.stack().with(|store| store.ids());
    nav.back();
    tap(&mut nav, "Push yet another view");
    let second = nav.stack().with(|store| store.ids());

    assert_eq!(first[..2], second[..2]);
    assert!(second[2] > first[2]);
}

#[test]
fn test_evaluate_root() {
    let mut nav = navigator(Scenario::EvaluateRoot);
    assert!(nav.is_visible("Root view"));

    assert!(tap(&mut nav, "Push truthy").is_pushed());
    assert!(nav.is_visible("Pushed with evaluation"));

    nav.back();
    assert!(nav.is_visible("Root view"));

    assert!(matches!(tap(&mut nav, "Push falsy"), PushOutcome::RejectedByGate(_)));
    assert!(nav.is_visible("Root view"));
    assert!(!nav.is_visible("No-op"));
}

#[test]
fn test_evaluate_nested() {
    let mut nav = navigator(Scenario::EvaluateNested);
    tap(&mut nav, "Push");
    assert!(nav.is_visible("Second view"));

    let links = nav.links();
    assert!(links.iter().any(|link| link.label == "Push truthy" && link.enabled));
    assert!(links.iter().any(|link| link.label == "Push falsy" && !link.enabled));

    assert!(tap(&mut nav, "Push truthy").is_pushed());
    assert!(nav.is_visible("Pushed with evaluation"));

    nav.back();
    assert!(nav.is_visible("Second view"));
    assert!(matches!(tap(&mut nav, "Push falsy"), PushOutcome::RejectedByGate(_)));
    assert!(nav.is_visible("Second view"));
}

#[test]
fn test_without_vstack() {
    let mut nav = navigator(Scenario::WithoutVstack);
    assert!(nav.is_visible("Should be visible"));
    assert!(nav.is_visible("This too"));
    assert!(nav.links().is_empty());
    assert!(nav.tap("Push").is_none());
}

#[test]
fn test_script_over_nested() {
    let mut nav = navigator(Scenario::Nested);
    let steps: Vec<Step> = ["tap:Push another view", "tap:Push yet another view", "back", "back", "back"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();

    let reports = run_script(&mut nav, &steps).unwrap();
    assert!(reports[1].page.contains("Third view"));
    assert!(reports[3].page.contains("Root View"));
    assert_eq!(reports[4].result, StepResult::AtRoot);
}

#[test]
fn test_runtime_renders_nested_back_label() {
    let mut runtime = StackRuntime::new(navigator(Scenario::Nested), RuntimeConfig::default());
    for code in [KeyCode::Tab, KeyCode::Enter] {
        runtime
            .handle_key(KeyEvent::new(code, KeyModifiers::empty()))
            .unwrap();
    }

    let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
    terminal.draw(|frame| runtime.render(frame)).unwrap();
    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();

    assert!(screen.contains("Root view"));
    assert!(screen.contains("Second view"));
    assert!(screen.contains("[ Push yet another view ]"));
}
