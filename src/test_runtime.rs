// Tests for the root coordinator: environment message interception, global
// quit, effect scheduling, and render idempotence.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::command::{Command, NavRequest};
use crate::msg::Msg;
use crate::runtime::Runtime;
use crate::test_stack::{EventLog, Probe};

/// Runtime with a probe root, construction events discarded.
fn runtime_with_root(log: &EventLog) -> Runtime {
    let runtime = Runtime::new(Probe::new("root", log).boxed());
    log.clear();
    runtime
}

#[test]
fn quit_message_stops_the_loop() {
    let log = EventLog::default();
    let mut runtime = runtime_with_root(&log);

    assert!(!runtime.dispatch(Msg::Quit));
    assert!(log.events().is_empty());
}

#[test]
fn quit_key_bypasses_the_stack() {
    let log = EventLog::default();
    let mut runtime = runtime_with_root(&log);

    let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(!runtime.dispatch(Msg::Key(key)));
    // The active screen never saw the key; it cannot veto.
    assert!(log.events().is_empty());
}

#[test]
fn other_keys_are_forwarded_to_the_active_screen() {
    let log = EventLog::default();
    let mut runtime = runtime_with_root(&log);

    let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::empty());
    assert!(runtime.dispatch(Msg::Key(key)));
    assert_eq!(log.events(), vec!["root.update.Key"]);
}

#[test]
fn resize_is_stored_and_forwarded() {
    let log = EventLog::default();
    let mut runtime = runtime_with_root(&log);

    assert!(runtime.dispatch(Msg::Resize {
        width: 80,
        height: 24
    }));

    assert_eq!(runtime.size(), (80, 24));
    assert_eq!(log.events(), vec!["root.update.Resize"]);
}

#[test]
fn theme_detection_broadcasts_to_covered_screens() {
    let log = EventLog::default();
    let mut runtime = runtime_with_root(&log);
    runtime.dispatch(Msg::Nav(NavRequest::Push(Probe::new("b", &log).boxed())));
    log.clear();

    assert!(runtime.dispatch(Msg::ThemeDetected(true)));

    assert!(runtime.is_dark());
    assert_eq!(log.count("root.theme.true"), 1);
    assert_eq!(log.count("b.theme.true"), 1);
    // Delivered through the capability probe, not as a forwarded message.
    assert!(log.events().iter().all(|e| !e.contains("update")));
}

#[test]
fn effect_results_reenter_as_ordinary_messages() {
    let log = EventLog::default();
    let mut runtime = runtime_with_root(&log);

    let effect = Command::perform(async { 42u32 }, Msg::custom);
    let b = Probe::new("b", &log).on_appear_cmd(effect);
    runtime.dispatch(Msg::Nav(NavRequest::Push(b.boxed())));
    log.clear();

    assert!(runtime.poll_effects());
    assert_eq!(log.events(), vec!["b.update.Custom"]);
}

#[test]
fn effect_can_request_shutdown() {
    let log = EventLog::default();
    let mut runtime = runtime_with_root(&log);

    let effect = Command::perform(async {}, |_| Msg::Quit);
    let b = Probe::new("b", &log).on_appear_cmd(effect);
    runtime.dispatch(Msg::Nav(NavRequest::Push(b.boxed())));

    assert!(!runtime.poll_effects());
}

#[test]
fn effect_can_navigate() {
    let log = EventLog::default();
    let mut runtime = runtime_with_root(&log);

    let effect = Command::perform(async {}, |_| Msg::Nav(NavRequest::Pop));
    let b = Probe::new("b", &log).on_appear_cmd(effect);
    runtime.dispatch(Msg::Nav(NavRequest::Push(b.boxed())));
    assert_eq!(runtime.stack().len(), 2);

    assert!(runtime.poll_effects());
    assert_eq!(runtime.stack().len(), 1);
    assert_eq!(log.count("b.disappear"), 1);
}

#[test]
fn render_is_idempotent() {
    let log = EventLog::default();
    let runtime = runtime_with_root(&log);

    let backend = TestBackend::new(40, 10);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal.draw(|frame| runtime.render(frame)).unwrap();
    let first = terminal.backend().buffer().clone();
    terminal.draw(|frame| runtime.render(frame)).unwrap();
    let second = terminal.backend().buffer().clone();

    assert_eq!(first, second);
}
