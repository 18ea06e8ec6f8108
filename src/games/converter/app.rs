use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{info, warn};

use crate::config::Config;
use crate::core::app::{App, Context};
use crate::games::converter::conversion::{parse_amount, Conversion};
use crate::games::converter::rates::RateClient;
use crate::games::converter::{flags, history, ConvertError};

const DEFAULT_BASE: &str = "USD";
const DEFAULT_TARGET: &str = "INR";

#[derive(Debug)]
pub enum ConvertMsg {
    CodesLoaded(Vec<String>),
    RateFetched {
        amount: f64,
        base: String,
        target: String,
        result: Result<f64, ConvertError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    From,
    To,
    Amount,
    Filename,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::From => Field::To,
            Field::To => Field::Amount,
            Field::Amount => Field::Filename,
            Field::Filename => Field::From,
        }
    }

    fn previous(self) -> Self {
        match self {
            Field::From => Field::Filename,
            Field::To => Field::From,
            Field::Amount => Field::To,
            Field::Filename => Field::Amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Info(String),
    Error(String),
}

pub struct CurrencyConverter {
    client: RateClient,
    codes: Vec<String>,
    base: usize,
    target: usize,
    amount: String,
    filename: String,
    focus: Field,
    result: Option<String>,
    status: Option<Status>,
    pending: bool,
}

impl CurrencyConverter {
    pub fn new(config: &Config) -> Self {
        let mut converter = Self {
            client: RateClient::new(config.rates_url.as_str()),
            codes: Vec::new(),
            base: 0,
            target: 0,
            amount: String::new(),
            filename: config.history_file.clone(),
            focus: Field::Amount,
            result: None,
            status: None,
            pending: false,
        };
        converter.set_codes(flags::known_codes());
        converter
    }

    /// Swaps the code list, keeping the current picks when they still exist.
    fn set_codes(&mut self, codes: Vec<String>) {
        let base = self.codes.get(self.base).cloned().unwrap_or_else(|| DEFAULT_BASE.to_string());
        let target = self.codes.get(self.target).cloned().unwrap_or_else(|| DEFAULT_TARGET.to_string());
        self.codes = codes;
        self.base = self.position(&base);
        self.target = self.position(&target);
    }

    fn position(&self, code: &str) -> usize {
        self.codes.iter().position(|c| c == code).unwrap_or(0)
    }

    fn base_code(&self) -> &str {
        self.codes.get(self.base).map(String::as_str).unwrap_or(DEFAULT_BASE)
    }

    fn target_code(&self) -> &str {
        self.codes.get(self.target).map(String::as_str).unwrap_or(DEFAULT_TARGET)
    }

    fn cycle(&self, index: usize, forward: bool) -> usize {
        let len = self.codes.len().max(1);
        if forward { (index + 1) % len } else { (index + len - 1) % len }
    }

    fn convert(&mut self, ctx: &Context<ConvertMsg>) {
        if self.pending {
            return;
        }
        let amount = match parse_amount(&self.amount) {
            Ok(amount) => amount,
            Err(err) => {
                self.status = Some(Status::Error(format!("Conversion Error: {err}")));
                return;
            }
        };

        let base = self.base_code().to_string();
        let target = self.target_code().to_string();
        info!(%base, %target, amount, "converting");
        self.pending = true;
        self.status = Some(Status::Info(format!("Fetching {base} rates...")));

        let client = self.client.clone();
        ctx.spawn(async move {
            let result = client.rate(&base, &target).await;
            ConvertMsg::RateFetched { amount, base, target, result }
        });
    }

    fn finish_conversion(&mut self, conversion: Conversion) {
        let summary = conversion.to_string();
        self.result = Some(summary.clone());

        let path = history::resolve_path(&self.filename);
        self.status = Some(match history::append(&path, &summary) {
            Ok(()) => Status::Info(format!("Saved to {} successfully!", path.display())),
            Err(err) => {
                warn!(%err, "history append failed");
                Status::Error(format!("Failed to save file. {err}"))
            }
        });
    }

    fn edit(&mut self, code: KeyCode) {
        let buffer = match self.focus {
            Field::Amount => &mut self.amount,
            Field::Filename => &mut self.filename,
            Field::From | Field::To => return,
        };
        match code {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            _ => {}
        }
    }

    fn field_line(&self, field: Field, label: &str, value: String) -> Line<'static> {
        let focused = self.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(format!("{marker}{label:<16}")),
            Span::styled(value, style),
        ])
    }
}

impl App for CurrencyConverter {
    type Message = ConvertMsg;

    fn on_start(&mut self, ctx: &Context<Self::Message>) {
        self.status = Some(Status::Info("Loading currencies...".to_string()));
        let client = self.client.clone();
        ctx.spawn(async move { ConvertMsg::CodesLoaded(client.currency_codes().await) });
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &Context<Self::Message>) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Enter => self.convert(ctx),
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match self.focus {
                    Field::From => self.base = self.cycle(self.base, forward),
                    Field::To => self.target = self.cycle(self.target, forward),
                    Field::Amount | Field::Filename => {}
                }
            }
            code => self.edit(code),
        }
    }

    fn handle_message(&mut self, msg: Self::Message, _ctx: &Context<Self::Message>) {
        match msg {
            ConvertMsg::CodesLoaded(codes) => {
                info!(count = codes.len(), "currency list loaded");
                self.set_codes(codes);
                self.status = None;
            }
            ConvertMsg::RateFetched { amount, base, target, result } => {
                self.pending = false;
                match result {
                    Ok(rate) => self.finish_conversion(Conversion { amount, base, target, rate }),
                    Err(err @ ConvertError::UnknownCurrency { .. }) => {
                        self.status = Some(Status::Error(format!("Conversion Error: {err}")));
                    }
                    Err(err) => {
                        warn!(%err, "rate lookup failed");
                        self.status = Some(Status::Error(format!("Error: Something went wrong. {err}")));
                    }
                }
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new("Currency Converter")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );

        let form = vec![
            self.field_line(Field::From, "From Currency:", format!("◀ {} ▶", flags::label(self.base_code()))),
            self.field_line(Field::To, "To Currency:", format!("◀ {} ▶", flags::label(self.target_code()))),
            self.field_line(Field::Amount, "Amount:", self.amount.clone()),
            self.field_line(Field::Filename, "Save filename:", self.filename.clone()),
        ];
        frame.render_widget(Paragraph::new(form).block(Block::default().borders(Borders::ALL)), chunks[1]);

        let result = match &self.result {
            Some(summary) => format!("Result: {summary}"),
            None => "Result:".to_string(),
        };
        frame.render_widget(
            Paragraph::new(result)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL)),
            chunks[2],
        );

        let status = match &self.status {
            Some(Status::Info(text)) => Paragraph::new(text.as_str()).style(Style::default().fg(Color::Green)),
            Some(Status::Error(text)) => Paragraph::new(text.as_str()).style(Style::default().fg(Color::Red)),
            None => Paragraph::new(""),
        };
        frame.render_widget(status.alignment(Alignment::Center), chunks[3]);

        frame.render_widget(
            Paragraph::new("[Tab] Next field  [←/→] Currency  [Enter] Convert  [Esc] Quit")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            chunks[4],
        );
    }
}
