use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::command::Command;
use crate::msg::Msg;
use crate::screen::Screen;
use crate::screens::{AboutScreen, CounterScreen};
use crate::state::Theme;

struct Entry {
    name: &'static str,
    description: &'static str,
}

/// Root screen of the demo scaffold: a list of the other screens. Implements
/// no optional capability, so lifecycle notifications and theme broadcasts
/// pass it by silently.
pub struct MenuScreen {
    entries: Vec<Entry>,
    selected: usize,
}

impl MenuScreen {
    pub fn new() -> Self {
        Self {
            entries: vec![
                Entry {
                    name: "Counter",
                    description: "lifecycle hooks and async tick effects",
                },
                Entry {
                    name: "About",
                    description: "a plain screen with no optional capabilities",
                },
            ],
            selected: 0,
        }
    }

    fn launch(&self) -> Command {
        match self.selected {
            0 => Command::push(CounterScreen::new()),
            _ => Command::push(AboutScreen::new()),
        }
    }
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MenuScreen {
    fn update(&mut self, msg: Msg) -> Command {
        match msg {
            Msg::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected = self.selected.saturating_sub(1);
                    Command::None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                    Command::None
                }
                KeyCode::Enter => self.launch(),
                // Back at the root is inert by design; issue it anyway.
                KeyCode::Esc | KeyCode::Char('q') => Command::pop(),
                _ => Command::None,
            },
            _ => Command::None,
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(theme.accent_primary)
                        .bg(theme.bg_surface)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_primary)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("  {}", entry.name), style),
                    Span::styled(
                        format!("  {}", entry.description),
                        Style::default().fg(theme.text_secondary),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_primary))
                .title(" navstack "),
        );
        frame.render_widget(list, area);

        if area.height > 2 {
            let hint_area = Rect {
                x: area.x + 2,
                y: area.y + area.height - 1,
                width: area.width.saturating_sub(4),
                height: 1,
            };
            let hint = Paragraph::new(Line::from(Span::styled(
                " ↑↓ select · Enter open · Ctrl+C quit ",
                Style::default().fg(theme.accent_muted),
            )));
            frame.render_widget(hint, hint_area);
        }
    }

    fn title(&self) -> &'static str {
        "menu"
    }
}
