use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::command::Command;
use crate::msg::Msg;
use crate::screen::Screen;
use crate::state::Theme;

/// A plain informational screen. Deliberately implements neither `Lifecycle`
/// nor `ThemeAware`: it exercises the silent no-op path for both probes.
pub struct AboutScreen;

impl AboutScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AboutScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for AboutScreen {
    fn update(&mut self, msg: Msg) -> Command {
        match msg {
            Msg::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => Command::pop(),
                _ => Command::None,
            },
            _ => Command::None,
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines = vec![
            Line::from(Span::styled(
                "navstack",
                Style::default().fg(theme.accent_secondary),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "An ordered stack of screens with push/pop/replace transitions, \
                 appear/disappear lifecycle notifications, and re-entrancy-safe \
                 deferred navigation.",
                Style::default().fg(theme.text_primary),
            )),
            Line::from(""),
            Line::from(Span::styled(
                " Esc back ",
                Style::default().fg(theme.accent_muted),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_primary))
                .title(" about "),
        );
        frame.render_widget(paragraph, area);
    }

    fn title(&self) -> &'static str {
        "about"
    }
}
