use crate::core::app::{App, Context};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::debug;

const FRAME: Duration = Duration::from_millis(16);

pub struct Engine<A: App> {
    app: A,
}

impl<A: App> Engine<A> {
    pub fn new(app: A) -> Self {
        Self { app }
    }

    /// Drives the app until it asks to quit or Esc is pressed.
    ///
    /// Meant for a current-thread runtime: timers and background tasks
    /// spawned through the `Context` report back over the inbox and are
    /// handled here, one at a time.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let (ctx, mut inbox) = Context::channel();
        self.app.on_start(&ctx);

        loop {
            terminal.draw(|f| self.app.render(f))?;
            if self.app.should_quit() {
                break;
            }

            // INPUT (Non-blocking)
            if event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if key.code == KeyCode::Esc {
                            debug!("escape pressed, leaving app");
                            break;
                        }
                        self.app.handle_key(key, &ctx);
                    }
                }
            }

            // Wake at least once a frame so input keeps getting polled.
            tokio::select! {
                Some(msg) = inbox.recv() => {
                    self.app.handle_message(msg, &ctx);
                }
                _ = tokio::time::sleep(FRAME) => {}
            }
        }

        Ok(())
    }
}
