use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::command::{Command, NavRequest};
use crate::msg::Msg;
use crate::screen::Screen;
use crate::state::Theme;

/// The ordered collection of screens. The last element is the active one and
/// receives every forwarded message; the element at index 0 is the root and
/// can never be removed by a pop.
///
/// Lifecycle ordering within a single transition is fixed: the outgoing
/// screen's `on_disappear` runs strictly before the incoming screen's
/// `on_appear`, so appearance handlers may assume the outgoing screen has
/// finalized whatever state it publishes on the way out.
///
/// Navigation requests raised from inside a lifecycle hook are never applied
/// immediately. They land in a FIFO queue and replay once the outermost
/// transition has fully settled, so a single generating event can never
/// observe a half-applied stack.
pub struct NavStack {
    screens: Vec<Box<dyn Screen>>,
    /// Set while lifecycle notifications for a transition are dispatching.
    transitioning: bool,
    /// Navigation requests deferred while `transitioning`.
    deferred: VecDeque<NavRequest>,
}

impl NavStack {
    /// Create a stack with its mandatory root screen. The root receives its
    /// appearance notification and `init` exactly like any pushed screen.
    pub fn new(root: Box<dyn Screen>) -> (Self, Command) {
        let mut stack = Self {
            screens: Vec::new(),
            transitioning: false,
            deferred: VecDeque::new(),
        };
        // Installing the root is an ordinary push onto the empty sequence;
        // from here on the stack is never empty again.
        let effects = stack.apply(NavRequest::Push(root));
        (stack, effects)
    }

    /// Number of screens currently on the stack (always >= 1).
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Title of the active screen, for log lines and headers.
    pub fn active_title(&self) -> &'static str {
        self.screens
            .last()
            .map(|screen| screen.title())
            .unwrap_or("")
    }

    /// Process one message. Navigation requests mutate the stack itself;
    /// everything else is forwarded verbatim to the active screen, with no
    /// lifecycle notifications. Returns the effects to schedule.
    pub fn update(&mut self, msg: Msg) -> Command {
        match msg {
            Msg::Nav(request) => self.apply(request),
            other => {
                let last = self.screens.len() - 1;
                let command = self.screens[last].update(other);
                self.dispatch(command)
            }
        }
    }

    /// Execute a navigation request, or defer it if a transition is already
    /// dispatching lifecycle notifications. After the triggering transition
    /// completes, deferred requests replay in submission order until the
    /// queue is empty. Returns the batched non-navigation effects collected
    /// from lifecycle hooks and `init` calls.
    pub fn apply(&mut self, request: NavRequest) -> Command {
        if self.transitioning {
            log::debug!(
                "deferring {} request raised mid-transition ({} queued)",
                request.kind(),
                self.deferred.len() + 1
            );
            self.deferred.push_back(request);
            return Command::None;
        }

        self.transitioning = true;
        let mut effects = Vec::new();
        self.transition(request, &mut effects);
        while let Some(next) = self.deferred.pop_front() {
            self.transition(next, &mut effects);
        }
        self.transitioning = false;

        Command::batch(effects)
    }

    /// Broadcast a theme change to every screen in the stack, bottom to top.
    /// This is the one deliberate exception to "only the active screen
    /// receives messages": covered screens must already be themed correctly
    /// by the time a pop reveals them.
    pub fn broadcast_theme(&mut self, dark: bool) {
        for screen in &mut self.screens {
            if let Some(themed) = screen.themed() {
                themed.theme_changed(dark);
            }
        }
    }

    /// Render the active screen.
    pub fn view(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(screen) = self.screens.last() {
            screen.view(frame, area, theme);
        }
    }

    /// Apply a single transition and dispatch its lifecycle notifications.
    /// Only ever called with `transitioning` set.
    fn transition(&mut self, request: NavRequest, effects: &mut Vec<Command>) {
        match request {
            NavRequest::Push(screen) => {
                log::info!("push: {} onto {} screens", screen.title(), self.screens.len());
                self.screens.push(screen);
                let len = self.screens.len();
                if len >= 2 {
                    self.notify_disappear(len - 2);
                }
                self.notify_appear(len - 1, effects);
                self.run_init(len - 1, effects);
            }
            NavRequest::Pop => {
                if self.screens.len() <= 1 {
                    // Popping the root is inert, not an error.
                    log::debug!("pop ignored: only the root remains");
                    return;
                }
                let mut removed = self.screens.pop().expect("stack is never empty");
                log::info!("pop: {} ({} screens remain)", removed.title(), self.screens.len());
                if let Some(hooks) = removed.lifecycle() {
                    hooks.on_disappear();
                }
                self.notify_appear(self.screens.len() - 1, effects);
            }
            NavRequest::Replace(screen) => {
                let last = self.screens.len() - 1;
                log::info!("replace: {} -> {}", self.screens[last].title(), screen.title());
                let mut old = std::mem::replace(&mut self.screens[last], screen);
                if let Some(hooks) = old.lifecycle() {
                    hooks.on_disappear();
                }
                self.notify_appear(last, effects);
                self.run_init(last, effects);
            }
        }
    }

    fn notify_disappear(&mut self, index: usize) {
        if let Some(hooks) = self.screens[index].lifecycle() {
            hooks.on_disappear();
        }
    }

    fn notify_appear(&mut self, index: usize, effects: &mut Vec<Command>) {
        let command = match self.screens[index].lifecycle() {
            Some(hooks) => hooks.on_appear(),
            None => return,
        };
        self.absorb(command, effects);
    }

    fn run_init(&mut self, index: usize, effects: &mut Vec<Command>) {
        let command = self.screens[index].init();
        self.absorb(command, effects);
    }

    /// Split a command returned by a hook: navigation requests go to the
    /// deferred queue (the stack is mid-transition here), everything else is
    /// collected for the runtime to schedule.
    fn absorb(&mut self, command: Command, effects: &mut Vec<Command>) {
        match command {
            Command::None => {}
            Command::Batch(commands) => {
                for cmd in commands {
                    self.absorb(cmd, effects);
                }
            }
            Command::Navigate(request) => self.deferred.push_back(request),
            other => effects.push(other),
        }
    }

    /// Route a command returned by the active screen's `update`. The stack is
    /// idle at this point, so embedded navigation requests are applied
    /// immediately; their hook effects join the returned batch.
    fn dispatch(&mut self, command: Command) -> Command {
        match command {
            Command::Navigate(request) => self.apply(request),
            Command::Batch(commands) => {
                let mut out = Vec::new();
                for cmd in commands {
                    match self.dispatch(cmd) {
                        Command::None => {}
                        effect => out.push(effect),
                    }
                }
                Command::batch(out)
            }
            other => other,
        }
    }
}
