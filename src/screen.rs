use ratatui::Frame;
use ratatui::layout::Rect;

use crate::command::Command;
use crate::msg::Msg;
use crate::state::Theme;

/// The capability contract every navigable view must satisfy.
///
/// A screen is owned exclusively by the stack from the moment it is pushed
/// until it is popped or replaced. It has no identity beyond its position;
/// `title()` exists only so log lines stay readable.
///
/// `update` and the lifecycle hooks are non-failing by design: any error
/// condition local to a screen is the screen's own responsibility to encode
/// in its state and surface through `view`.
pub trait Screen: Send {
    /// Called exactly once, at the moment the screen is installed into the
    /// stack (on stack construction for the root, immediately upon
    /// push/replace for others).
    fn init(&mut self) -> Command {
        Command::None
    }

    /// Handle a message forwarded while this screen is active.
    fn update(&mut self, msg: Msg) -> Command;

    /// Render the current state. Pure projection: must be callable any number
    /// of times without altering state.
    fn view(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Capability probe for appear/disappear notifications. Screens that
    /// return `None` simply receive no notifications.
    fn lifecycle(&mut self) -> Option<&mut dyn Lifecycle> {
        None
    }

    /// Capability probe for theme broadcasts. Only needed by screens that
    /// cache theme-derived state between frames.
    fn themed(&mut self) -> Option<&mut dyn ThemeAware> {
        None
    }

    /// Name used in log lines.
    fn title(&self) -> &'static str {
        "screen"
    }
}

/// Optional capability: react to becoming active or inactive, for
/// setup/teardown that should not happen on every message (e.g. re-requesting
/// live data only while visible).
pub trait Lifecycle {
    /// Invoked once per activation. May return an effect (e.g. kick off an
    /// asynchronous refresh).
    fn on_appear(&mut self) -> Command {
        Command::None
    }

    /// Invoked once per deactivation. Synchronous, no effect channel: the
    /// disappearing screen's output is no longer observable, so cleanup must
    /// be immediate.
    fn on_disappear(&mut self) {}
}

/// Optional capability: receive theme broadcasts. Unlike ordinary messages,
/// these reach every screen in the stack so that covered screens are already
/// correctly themed when a later pop reveals them.
pub trait ThemeAware {
    fn theme_changed(&mut self, dark: bool);
}
