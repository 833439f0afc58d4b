// Tests for the navigation stack: transition scenarios, lifecycle ordering,
// and the deferred-request replay rules.
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::command::Command;
use crate::msg::Msg;
use crate::screen::{Lifecycle, Screen, ThemeAware};
use crate::state::Theme;

/// Shared, append-only event log. Event indices double as logical timestamps
/// for ordering assertions.
#[derive(Clone, Default)]
pub(crate) struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub(crate) fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }

    /// Logical timestamp of the first occurrence; panics if it never happened.
    pub(crate) fn timestamp(&self, event: &str) -> usize {
        self.events()
            .iter()
            .position(|e| e == event)
            .unwrap_or_else(|| panic!("event '{}' was never recorded", event))
    }

    pub(crate) fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

/// A screen that records every call it receives and can be scripted to return
/// commands from its appearance hook or its update function.
pub(crate) struct Probe {
    name: &'static str,
    log: EventLog,
    appear_cmds: VecDeque<Command>,
    update_cmds: VecDeque<Command>,
}

impl Probe {
    pub(crate) fn new(name: &'static str, log: &EventLog) -> Self {
        Self {
            name,
            log: log.clone(),
            appear_cmds: VecDeque::new(),
            update_cmds: VecDeque::new(),
        }
    }

    /// Script the command returned by the next `on_appear`.
    pub(crate) fn on_appear_cmd(mut self, cmd: Command) -> Self {
        self.appear_cmds.push_back(cmd);
        self
    }

    /// Script the command returned by the next `update`.
    pub(crate) fn on_update_cmd(mut self, cmd: Command) -> Self {
        self.update_cmds.push_back(cmd);
        self
    }

    pub(crate) fn boxed(self) -> Box<dyn Screen> {
        Box::new(self)
    }
}

impl Screen for Probe {
    fn init(&mut self) -> Command {
        self.log.record(format!("{}.init", self.name));
        Command::None
    }

    fn update(&mut self, msg: Msg) -> Command {
        self.log.record(format!("{}.update.{}", self.name, msg.kind()));
        self.update_cmds.pop_front().unwrap_or(Command::None)
    }

    fn view(&self, frame: &mut Frame, area: Rect, _theme: &Theme) {
        frame.render_widget(Paragraph::new(Line::from(self.name)), area);
    }

    fn lifecycle(&mut self) -> Option<&mut dyn Lifecycle> {
        Some(self)
    }

    fn themed(&mut self) -> Option<&mut dyn ThemeAware> {
        Some(self)
    }

    fn title(&self) -> &'static str {
        self.name
    }
}

impl Lifecycle for Probe {
    fn on_appear(&mut self) -> Command {
        self.log.record(format!("{}.appear", self.name));
        self.appear_cmds.pop_front().unwrap_or(Command::None)
    }

    fn on_disappear(&mut self) {
        self.log.record(format!("{}.disappear", self.name));
    }
}

impl ThemeAware for Probe {
    fn theme_changed(&mut self, dark: bool) {
        self.log.record(format!("{}.theme.{}", self.name, dark));
    }
}

/// A screen with no optional capabilities at all.
pub(crate) struct Plain;

impl Screen for Plain {
    fn update(&mut self, _msg: Msg) -> Command {
        Command::None
    }

    fn view(&self, frame: &mut Frame, area: Rect, _theme: &Theme) {
        frame.render_widget(Paragraph::new(Line::from("plain")), area);
    }

    fn title(&self) -> &'static str {
        "plain"
    }
}

mod tests {
    use super::*;
    use crate::command::NavRequest;
    use crate::stack::NavStack;

    /// Fresh stack with a probe root, construction events discarded.
    fn stack_with_root(log: &EventLog) -> NavStack {
        let (stack, _effects) = NavStack::new(Probe::new("root", log).boxed());
        log.clear();
        stack
    }

    #[test]
    fn root_receives_appearance_and_init_on_construction() {
        let log = EventLog::default();
        let (stack, _effects) = NavStack::new(Probe::new("root", &log).boxed());

        assert_eq!(log.events(), vec!["root.appear", "root.init"]);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn push_dispatches_disappear_appear_init() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);

        stack.update(Msg::Nav(NavRequest::Push(Probe::new("b", &log).boxed())));

        assert_eq!(log.count("root.disappear"), 1);
        assert_eq!(log.count("b.appear"), 1);
        assert_eq!(log.count("b.init"), 1);
        assert!(log.timestamp("root.disappear") < log.timestamp("b.appear"));
        assert!(log.timestamp("b.appear") < log.timestamp("b.init"));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn pop_reveals_screen_beneath() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);
        stack.update(Msg::Nav(NavRequest::Push(Probe::new("b", &log).boxed())));
        log.clear();

        stack.update(Msg::Nav(NavRequest::Pop));

        assert_eq!(log.count("b.disappear"), 1);
        assert_eq!(log.count("root.appear"), 1);
        assert!(log.timestamp("b.disappear") < log.timestamp("root.appear"));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn pop_at_root_is_inert() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);

        stack.update(Msg::Nav(NavRequest::Pop));

        assert!(log.events().is_empty());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn stack_never_empties_under_repeated_pops() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);

        for _ in 0..10 {
            stack.update(Msg::Nav(NavRequest::Pop));
            assert_eq!(stack.len(), 1);
        }
    }

    #[test]
    fn replace_swaps_active_screen_in_place() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);

        stack.update(Msg::Nav(NavRequest::Replace(Probe::new("c", &log).boxed())));

        assert_eq!(log.count("root.disappear"), 1);
        assert_eq!(log.count("c.appear"), 1);
        assert_eq!(log.count("c.init"), 1);
        assert!(log.timestamp("root.disappear") < log.timestamp("c.appear"));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.active_title(), "c");
    }

    #[test]
    fn nested_push_from_appearance_hook_is_deferred() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);

        let c = Probe::new("c", &log);
        let b = Probe::new("b", &log).on_appear_cmd(Command::push(c));
        stack.update(Msg::Nav(NavRequest::Push(b.boxed())));

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.active_title(), "c");
        // The outer transition's bookkeeping (b's appearance and init) fully
        // resolves before the replayed push runs.
        assert!(log.timestamp("b.appear") < log.timestamp("c.appear"));
        assert!(log.timestamp("b.init") < log.timestamp("c.appear"));
    }

    #[test]
    fn deferred_requests_replay_in_submission_order() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);

        let e = Probe::new("e", &log);
        let c = Probe::new("c", &log).on_appear_cmd(Command::push(e));
        let d = Probe::new("d", &log);
        let b = Probe::new("b", &log)
            .on_appear_cmd(Command::batch(vec![Command::push(c), Command::push(d)]));
        stack.update(Msg::Nav(NavRequest::Push(b.boxed())));

        // c and d were queued by b, in that order; e was queued by c during
        // the replay and therefore lands behind d.
        assert!(log.timestamp("c.appear") < log.timestamp("d.appear"));
        assert!(log.timestamp("d.appear") < log.timestamp("e.appear"));
        assert_eq!(stack.len(), 5);
    }

    #[test]
    fn nested_pop_from_appearance_hook_is_deferred() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);

        let b = Probe::new("b", &log).on_appear_cmd(Command::pop());
        stack.update(Msg::Nav(NavRequest::Push(b.boxed())));

        // b's push completes, then the deferred pop removes it again.
        assert_eq!(stack.len(), 1);
        assert_eq!(log.count("b.appear"), 1);
        assert_eq!(log.count("b.disappear"), 1);
        assert!(log.timestamp("b.init") < log.timestamp("b.disappear"));
    }

    #[test]
    fn appearance_and_disappearance_counts_stay_balanced() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);

        stack.update(Msg::Nav(NavRequest::Push(Probe::new("b", &log).boxed())));
        stack.update(Msg::Nav(NavRequest::Push(Probe::new("c", &log).boxed())));
        stack.update(Msg::Nav(NavRequest::Pop));
        stack.update(Msg::Nav(NavRequest::Replace(Probe::new("d", &log).boxed())));
        stack.update(Msg::Nav(NavRequest::Pop));
        stack.update(Msg::Nav(NavRequest::Pop));

        for name in ["root", "b", "c", "d"] {
            let appears = log.count(&format!("{}.appear", name)) as i64;
            let disappears = log.count(&format!("{}.disappear", name)) as i64;
            assert!(
                (appears - disappears).abs() <= 1,
                "{}: {} appears vs {} disappears",
                name,
                appears,
                disappears
            );
        }
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn plain_messages_reach_only_the_active_screen() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);
        stack.update(Msg::Nav(NavRequest::Push(Probe::new("b", &log).boxed())));
        log.clear();

        stack.update(Msg::custom("payload"));

        assert_eq!(log.events(), vec!["b.update.Custom"]);
    }

    #[test]
    fn navigation_command_from_update_applies_immediately() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);
        let b = Probe::new("b", &log).on_update_cmd(Command::pop());
        stack.update(Msg::Nav(NavRequest::Push(b.boxed())));
        log.clear();

        stack.update(Msg::custom(()));

        assert_eq!(stack.len(), 1);
        assert_eq!(log.count("b.disappear"), 1);
        assert_eq!(log.count("root.appear"), 1);
    }

    #[test]
    fn hook_effects_are_surfaced_to_the_caller() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);

        let b = Probe::new("b", &log).on_appear_cmd(Command::Quit);
        let effects = stack.update(Msg::Nav(NavRequest::Push(b.boxed())));

        assert!(matches!(effects, Command::Quit));
    }

    #[test]
    fn theme_broadcast_reaches_every_screen() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);
        stack.update(Msg::Nav(NavRequest::Push(Box::new(Plain))));
        stack.update(Msg::Nav(NavRequest::Push(Probe::new("c", &log).boxed())));
        log.clear();

        stack.broadcast_theme(true);

        // Covered probe screens are themed too; the capability-less screen
        // is skipped silently.
        assert_eq!(log.count("root.theme.true"), 1);
        assert_eq!(log.count("c.theme.true"), 1);
    }

    #[test]
    fn screens_without_lifecycle_transition_silently() {
        let log = EventLog::default();
        let mut stack = stack_with_root(&log);
        log.clear();

        stack.update(Msg::Nav(NavRequest::Push(Box::new(Plain))));
        stack.update(Msg::Nav(NavRequest::Pop));

        // Only the root's own notifications show up.
        assert_eq!(log.count("root.disappear"), 1);
        assert_eq!(log.count("root.appear"), 1);
        assert_eq!(stack.len(), 1);
    }
}
