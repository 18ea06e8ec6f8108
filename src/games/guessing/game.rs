use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{info, warn};

use crate::config::Config;
use crate::core::app::{App, Context};
use crate::games::guessing::engine::{Difficulty, Outcome, RoundError, Session, Turn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessMsg {
    AiTurn,
}

pub struct GuessingGame {
    session: Session,
    difficulty: Difficulty,
    ai_delay: Duration,
    input: String,
    status: String,
    feedback: String,
    banner: Option<String>,
}

impl GuessingGame {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::new(),
            difficulty: config.difficulty,
            ai_delay: config.ai_delay,
            input: String::new(),
            status: String::new(),
            feedback: String::new(),
            banner: None,
        }
    }

    fn playing(&self) -> bool {
        self.session.round().is_some()
    }

    fn players_turn(&self) -> bool {
        self.session.round().is_some_and(|r| r.turn() == Turn::Player)
    }

    fn start_round(&mut self) {
        let round = self.session.start_round(self.difficulty, &mut rand::rng());
        let (min, max) = round.range();
        info!(difficulty = %self.difficulty, min, max, "new round");
        self.banner = None;
        self.feedback.clear();
        self.input.clear();
        self.prompt_player();
    }

    fn prompt_player(&mut self) {
        if let Some(round) = self.session.round() {
            let (min, max) = round.range();
            self.status = format!("Player's Turn – Guess a number between {min} and {max}");
        }
    }

    fn submit_guess(&mut self, ctx: &Context<GuessMsg>) {
        let input = std::mem::take(&mut self.input);
        match self.session.player_guess(&input) {
            Ok(Outcome::Win { attempts, .. }) => {
                info!(attempts, "player won");
                self.finish(format!("🎉 Correct! You guessed it right in {attempts} attempts!"));
            }
            Ok(Outcome::Hint { hint, .. }) => {
                self.feedback = format!("Player: {hint}");
                self.status = "AI's Turn...".to_string();
                ctx.schedule(self.ai_delay, GuessMsg::AiTurn);
            }
            Err(err @ RoundError::InvalidInput(_)) => {
                self.feedback = format!("⚠️ Invalid Input: {err}");
            }
            Err(err) => {
                warn!(%err, "guess rejected");
                self.feedback = err.to_string();
            }
        }
    }

    fn finish(&mut self, message: String) {
        self.banner = Some(message);
        self.status.clear();
        self.feedback.clear();
        self.input.clear();
    }

    fn score_line(&self) -> String {
        format!("Score - {}", self.session.scores())
    }
}

impl App for GuessingGame {
    type Message = GuessMsg;

    fn handle_key(&mut self, key: KeyEvent, ctx: &Context<Self::Message>) {
        if !self.playing() {
            match key.code {
                KeyCode::Up | KeyCode::Left => self.difficulty = self.difficulty.previous(),
                KeyCode::Down | KeyCode::Right => self.difficulty = self.difficulty.next(),
                KeyCode::Char('1') => self.difficulty = Difficulty::Easy,
                KeyCode::Char('2') => self.difficulty = Difficulty::Medium,
                KeyCode::Char('3') => self.difficulty = Difficulty::Hard,
                KeyCode::Enter | KeyCode::Char('s') => self.start_round(),
                _ => {}
            }
            return;
        }

        // The AI is thinking; keys wait for the player's turn.
        if !self.players_turn() {
            return;
        }

        match key.code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit_guess(ctx),
            _ => {}
        }
    }

    fn handle_message(&mut self, msg: Self::Message, _ctx: &Context<Self::Message>) {
        match msg {
            GuessMsg::AiTurn => match self.session.ai_turn() {
                Ok(Outcome::Win { attempts, .. }) => {
                    info!(attempts, "AI won");
                    self.finish(format!("❌ AI Wins! AI guessed it correctly in {attempts} attempts!"));
                }
                Ok(Outcome::Hint { guess, hint, .. }) => {
                    self.feedback = format!("🤖 AI guessed {guess}: {hint}");
                    self.prompt_player();
                }
                Err(err @ RoundError::ExhaustedRange { .. }) => {
                    warn!(%err, "round ended without a winner");
                    self.finish(format!("Game Over: {err}"));
                }
                Err(err) => warn!(%err, "stale AI turn ignored"),
            },
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new("🎮 Number Guessing Game")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );

        let picker = Difficulty::ALL
            .iter()
            .map(|d| if *d == self.difficulty { format!("[{d}]") } else { format!(" {d} ") })
            .collect::<Vec<_>>()
            .join("  ");
        frame.render_widget(
            Paragraph::new(picker)
                .alignment(Alignment::Center)
                .block(Block::default().title(" Select Difficulty ").borders(Borders::ALL)),
            chunks[1],
        );

        frame.render_widget(
            Paragraph::new(self.status.as_str()).alignment(Alignment::Center),
            chunks[2],
        );

        let input_style = if self.players_turn() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(self.input.as_str())
                .alignment(Alignment::Center)
                .style(input_style)
                .block(Block::default().title(" Guess ").borders(Borders::ALL)),
            chunks[3],
        );

        let body = self.banner.as_deref().unwrap_or(&self.feedback);
        frame.render_widget(Paragraph::new(body).alignment(Alignment::Center), chunks[4]);

        frame.render_widget(
            Paragraph::new(self.score_line())
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL)),
            chunks[5],
        );

        let help = if self.playing() {
            "[0-9] Type  [Enter] Guess  [Esc] Quit"
        } else {
            "[↑/↓ or 1-3] Difficulty  [Enter] Start Game  [Esc] Quit"
        };
        frame.render_widget(
            Paragraph::new(help).alignment(Alignment::Center).style(Style::default().fg(Color::Gray)),
            chunks[6],
        );
    }
}
