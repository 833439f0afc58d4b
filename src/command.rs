use std::future::Future;
use std::pin::Pin;

use crate::msg::Msg;
use crate::screen::Screen;

/// A navigation request against the screen stack.
///
/// Requests arriving while a transition is already dispatching lifecycle
/// notifications are queued and replayed in FIFO order once the outermost
/// transition settles.
pub enum NavRequest {
    /// Append a screen; it becomes the active one.
    Push(Box<dyn Screen>),

    /// Remove the active screen, revealing the one beneath it. Popping with
    /// only the root present is an inert no-op.
    Pop,

    /// Substitute the active screen in place (stack depth unchanged).
    Replace(Box<dyn Screen>),
}

impl NavRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            NavRequest::Push(_) => "Push",
            NavRequest::Pop => "Pop",
            NavRequest::Replace(_) => "Replace",
        }
    }
}

/// Commands represent side effects that screens want to perform.
/// They are returned from `update()` and lifecycle hooks and executed by the
/// runtime; the one exception is `Navigate`, which the stack itself consumes.
pub enum Command {
    /// Do nothing.
    None,

    /// Execute multiple commands in sequence.
    Batch(Vec<Command>),

    /// Mutate the screen stack.
    Navigate(NavRequest),

    /// Perform an async operation and deliver the result as a later message.
    Perform(Pin<Box<dyn Future<Output = Msg> + Send>>),

    /// Quit the application.
    Quit,
}

impl Command {
    /// Helper to push a screen onto the stack.
    pub fn push(screen: impl Screen + 'static) -> Self {
        Command::Navigate(NavRequest::Push(Box::new(screen)))
    }

    /// Helper to pop the active screen.
    pub fn pop() -> Self {
        Command::Navigate(NavRequest::Pop)
    }

    /// Helper to replace the active screen.
    pub fn replace(screen: impl Screen + 'static) -> Self {
        Command::Navigate(NavRequest::Replace(Box::new(screen)))
    }

    /// Helper to create a command that performs an async operation.
    pub fn perform<F, T>(future: F, to_msg: impl Fn(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Command::Perform(Box::pin(async move {
            let result = future.await;
            to_msg(result)
        }))
    }

    /// Helper to batch multiple commands, collapsing the trivial cases.
    pub fn batch(mut commands: Vec<Command>) -> Self {
        commands.retain(|cmd| !matches!(cmd, Command::None));
        match commands.len() {
            0 => Command::None,
            1 => commands.remove(0),
            _ => Command::Batch(commands),
        }
    }
}

impl Default for Command {
    fn default() -> Self {
        Command::None
    }
}
