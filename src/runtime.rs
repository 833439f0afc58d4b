use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::{Frame, Terminal};

use crate::command::Command;
use crate::msg::Msg;
use crate::screen::Screen;
use crate::stack::NavStack;
use crate::{global_runtime_config, store_runtime_config};

/// The outermost control structure: owns one `NavStack`, intercepts
/// environment-level messages (resize, theme detection, global quit) and
/// forwards everything else down the stack. Effects returned by screens are
/// scheduled here and re-enter as ordinary messages when they complete.
pub struct Runtime {
    stack: NavStack,

    /// Current terminal dimensions
    width: u16,
    height: u16,

    /// Whether the terminal background was detected as dark
    dark: bool,

    /// In-flight effect futures
    pending_effects: Vec<Pin<Box<dyn Future<Output = Msg> + Send>>>,
}

impl Runtime {
    pub fn new(root: Box<dyn Screen>) -> Self {
        let (stack, effects) = NavStack::new(root);
        let mut runtime = Self {
            stack,
            width: 0,
            height: 0,
            dark: global_runtime_config().variant.is_dark(),
            pending_effects: Vec::new(),
        };
        // Root init effects; a root that immediately quits is ignored here
        // and caught on the first loop iteration instead.
        runtime.execute(effects);
        runtime
    }

    pub fn stack(&self) -> &NavStack {
        &self.stack
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Process one message to completion. Returns false when the run loop
    /// should stop.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        log::debug!("dispatch {} (active: {})", msg.kind(), self.stack.active_title());
        match msg {
            Msg::Quit => false,

            // A screen cannot veto global quit.
            Msg::Key(key) if self.is_quit_key(&key) => false,

            Msg::Resize { width, height } => {
                self.width = width;
                self.height = height;
                // Forward so the active screen can resize its own sub-widgets.
                let effects = self.stack.update(Msg::Resize { width, height });
                self.execute(effects)
            }

            Msg::ThemeDetected(dark) => {
                self.dark = dark;
                store_runtime_config(global_runtime_config().with_detected_background(dark));
                self.stack.broadcast_theme(dark);
                true
            }

            other => {
                let effects = self.stack.update(other);
                self.execute(effects)
            }
        }
    }

    fn is_quit_key(&self, key: &crossterm::event::KeyEvent) -> bool {
        global_runtime_config()
            .get_keybind("quit")
            .is_some_and(|binding| binding.matches(key))
    }

    /// Schedule or run the effects a dispatch produced. Navigation commands
    /// can surface here from completed async effects; they go back through
    /// the stack.
    fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::None => true,
            Command::Quit => false,
            Command::Batch(commands) => {
                for cmd in commands {
                    if !self.execute(cmd) {
                        return false;
                    }
                }
                true
            }
            Command::Navigate(request) => {
                let effects = self.stack.apply(request);
                self.execute(effects)
            }
            Command::Perform(future) => {
                self.pending_effects.push(future);
                true
            }
        }
    }

    /// Poll in-flight effects and deliver completed results as ordinary
    /// messages. Returns false when a result requested shutdown.
    pub fn poll_effects(&mut self) -> bool {
        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);

        let mut completed = Vec::new();
        for (i, future) in self.pending_effects.iter_mut().enumerate() {
            if let Poll::Ready(msg) = future.as_mut().poll(&mut cx) {
                completed.push((i, msg));
            }
        }

        // Remove in reverse order to keep indices valid.
        completed.sort_by(|a, b| b.0.cmp(&a.0));
        for (i, msg) in completed {
            self.pending_effects.remove(i);
            if !self.dispatch(msg) {
                return false;
            }
        }
        true
    }

    /// Render the active screen's view. Pure with respect to runtime state.
    pub fn render(&self, frame: &mut Frame) {
        let config = global_runtime_config();
        self.stack.view(frame, frame.area(), &config.theme);
    }
}

/// Set up the terminal, run the cooperative event loop to completion, and
/// restore the terminal even when the loop errors.
pub async fn run(root: Box<dyn Screen>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runtime = Runtime::new(root);

    // Seed environment state before the first frame. Background detection is
    // the loop's concern; the config variant stands in for a terminal probe.
    let size = terminal.size()?;
    runtime.dispatch(Msg::Resize {
        width: size.width,
        height: size.height,
    });
    runtime.dispatch(Msg::ThemeDetected(global_runtime_config().variant.is_dark()));

    let result = run_loop(&mut terminal, &mut runtime).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, runtime: &mut Runtime) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Drain all pending input first for minimal latency.
        let mut should_quit = false;
        while event::poll(Duration::from_millis(0))? {
            let msg = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => Msg::Key(key),
                Event::Resize(width, height) => Msg::Resize { width, height },
                _ => continue,
            };
            if !runtime.dispatch(msg) {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break;
        }

        if !runtime.poll_effects() {
            break;
        }

        terminal.draw(|frame| runtime.render(frame))?;

        // Sleep for the remainder of a 16ms frame (60 FPS).
        let elapsed = frame_start.elapsed();
        if let Some(remaining) = Duration::from_millis(16).checked_sub(elapsed) {
            tokio::time::sleep(remaining).await;
        }
    }

    Ok(())
}
