use std::any::Any;

use crossterm::event::KeyEvent;

use crate::command::NavRequest;

/// Messages delivered through the coordinator → stack → screen chain.
///
/// The coordinator recognizes and consumes `Quit`, bookkeeps `Resize` and
/// `ThemeDetected`, and lets the stack intercept `Nav`. Everything else is
/// opaque payload forwarded untouched to the active screen.
pub enum Msg {
    /// Keyboard input from the terminal.
    Key(KeyEvent),

    /// Terminal was resized to the given dimensions.
    Resize { width: u16, height: u16 },

    /// Terminal background was probed; `true` means a dark background.
    ThemeDetected(bool),

    /// Unconditional application shutdown.
    Quit,

    /// Navigation request for the screen stack.
    Nav(NavRequest),

    /// Screen-defined payload. Screens downcast to their own message type and
    /// must silently ignore payloads they do not recognize, since an effect
    /// started by a since-removed screen may still deliver its result here.
    Custom(Box<dyn Any + Send>),
}

impl Msg {
    /// Wrap a screen-defined message for delivery through the runtime.
    pub fn custom<T: Any + Send>(payload: T) -> Self {
        Msg::Custom(Box::new(payload))
    }

    /// Variant name for log lines (payloads are not `Debug`).
    pub fn kind(&self) -> &'static str {
        match self {
            Msg::Key(_) => "Key",
            Msg::Resize { .. } => "Resize",
            Msg::ThemeDetected(_) => "ThemeDetected",
            Msg::Quit => "Quit",
            Msg::Nav(_) => "Nav",
            Msg::Custom(_) => "Custom",
        }
    }
}
