use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::command::Command;
use crate::msg::Msg;
use crate::screen::{Lifecycle, Screen, ThemeAware};
use crate::screens::AboutScreen;
use crate::state::Theme;

/// Screen-private message carried through `Msg::Custom`. Each tick carries
/// the activation it was scheduled under, so a tick left over from before a
/// cover/reveal cycle cannot be mistaken for the current chain.
enum CounterMsg {
    Tick { activation: u32 },
}

/// Demo screen for the optional capabilities: ticks once a second, but only
/// while it is the active screen. `on_appear` starts the tick chain and
/// `on_disappear` breaks it; a tick that lands after the screen was covered
/// or removed is delivered to whichever screen is active then and ignored.
pub struct CounterScreen {
    count: u64,
    ticking: bool,
    activations: u32,
    dark: bool,
}

impl CounterScreen {
    pub fn new() -> Self {
        Self {
            count: 0,
            ticking: false,
            activations: 0,
            dark: crate::global_runtime_config().variant.is_dark(),
        }
    }

    fn schedule_tick(&self) -> Command {
        let activation = self.activations;
        Command::perform(tokio::time::sleep(Duration::from_secs(1)), move |_| {
            Msg::custom(CounterMsg::Tick { activation })
        })
    }
}

impl Default for CounterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for CounterScreen {
    fn init(&mut self) -> Command {
        log::info!("counter installed");
        Command::None
    }

    fn update(&mut self, msg: Msg) -> Command {
        match msg {
            Msg::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => Command::pop(),
                KeyCode::Char('r') => {
                    self.count = 0;
                    Command::None
                }
                KeyCode::Char('a') => Command::replace(AboutScreen::new()),
                _ => Command::None,
            },
            Msg::Custom(payload) => match payload.downcast::<CounterMsg>() {
                Ok(counter_msg) => match *counter_msg {
                    CounterMsg::Tick { activation }
                        if self.ticking && activation == self.activations =>
                    {
                        self.count += 1;
                        self.schedule_tick()
                    }
                    // Stale tick from a deactivation or an earlier chain.
                    CounterMsg::Tick { .. } => Command::None,
                },
                // Some other screen's payload; not ours to interpret.
                Err(_) => Command::None,
            },
            _ => Command::None,
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines = vec![
            Line::from(Span::styled(
                format!("count: {}", self.count),
                Style::default()
                    .fg(theme.accent_success)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("activations: {}", self.activations),
                Style::default().fg(theme.text_secondary),
            )),
            Line::from(Span::styled(
                format!("theme: {}", if self.dark { "dark" } else { "light" }),
                Style::default().fg(theme.text_secondary),
            )),
            Line::from(""),
            Line::from(Span::styled(
                " r reset · a replace with About · Esc back ",
                Style::default().fg(theme.accent_muted),
            )),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_primary))
                .title(" counter "),
        );
        frame.render_widget(paragraph, area);
    }

    fn lifecycle(&mut self) -> Option<&mut dyn Lifecycle> {
        Some(self)
    }

    fn themed(&mut self) -> Option<&mut dyn ThemeAware> {
        Some(self)
    }

    fn title(&self) -> &'static str {
        "counter"
    }
}

impl Lifecycle for CounterScreen {
    fn on_appear(&mut self) -> Command {
        self.ticking = true;
        self.activations += 1;
        log::debug!("counter appeared (activation {})", self.activations);
        self.schedule_tick()
    }

    fn on_disappear(&mut self) {
        self.ticking = false;
        log::debug!("counter disappeared at count {}", self.count);
    }
}

impl ThemeAware for CounterScreen {
    fn theme_changed(&mut self, dark: bool) {
        self.dark = dark;
    }
}
