use ratatui::{
    widgets::{Block, Borders, List, ListItem, Paragraph},
    layout::{Layout, Constraint, Direction},
    style::{Style, Color, Modifier},
    Frame,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;
use anyhow::Result;

use crate::games::AppInfo;

#[derive(Debug, PartialEq, Eq)]
pub enum MenuResult {
    Launch(&'static str),
    Quit,
}

pub struct Menu {
    pub selected: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal, apps: &[AppInfo]) -> Result<MenuResult> {
        loop {
            terminal.draw(|f| self.render(f, apps))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(result) = self.handle_key(key.code, apps) {
                        return Ok(result);
                    }
                }
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode, apps: &[AppInfo]) -> Option<MenuResult> {
        match code {
            KeyCode::Enter => apps.get(self.selected).map(|a| MenuResult::Launch(a.id)),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(apps.len().saturating_sub(1));
                None
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(MenuResult::Quit),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, apps: &[AppInfo]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        f.render_widget(
            Paragraph::new(" TERMTOYS ")
                .block(Block::default().borders(Borders::ALL))
                .alignment(ratatui::layout::Alignment::Center),
            chunks[0]
        );

        let items: Vec<ListItem> = apps.iter().enumerate().map(|(i, a)| {
            let style = if i == self.selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(" » {} : {}", a.name, a.description)).style(style)
        }).collect();

        f.render_widget(
            List::new(items).block(Block::default().title(" AVAILABLE APPS ").borders(Borders::ALL)),
            chunks[1]
        );

        f.render_widget(
            Paragraph::new("[↑/↓] Navigate  [Enter] Launch  [Q] Quit")
                .alignment(ratatui::layout::Alignment::Center),
            chunks[2]
        );
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}
