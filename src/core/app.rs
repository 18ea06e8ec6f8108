/// Core interface every launchable program implements
use std::future::Future;
use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Handle an app uses to feed messages back into its own event loop.
///
/// Everything sent through it is delivered to `App::handle_message` on the
/// loop, so app state is only ever touched from one place.
pub struct Context<M> {
    tx: UnboundedSender<M>,
}

impl<M> Clone for Context<M> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<M: Send + 'static> Context<M> {
    /// Creates a context together with the inbox the engine drains.
    pub fn channel() -> (Self, UnboundedReceiver<M>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, msg: M) {
        // The inbox only closes once the loop has exited.
        let _ = self.tx.send(msg);
    }

    /// Delivers `msg` after `delay`, like a UI timer callback.
    pub fn schedule(&self, delay: Duration, msg: M) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(msg);
        });
    }

    /// Runs background work and delivers its result as a message.
    pub fn spawn<F>(&self, work: F)
    where
        F: Future<Output = M> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(work.await);
        });
    }
}

/// Main trait that all apps must implement
pub trait App {
    type Message: Send + 'static;

    /// Called once before the first frame.
    fn on_start(&mut self, _ctx: &Context<Self::Message>) {}

    fn handle_key(&mut self, key: KeyEvent, ctx: &Context<Self::Message>);

    fn handle_message(&mut self, msg: Self::Message, ctx: &Context<Self::Message>);

    fn render(&self, frame: &mut Frame);

    fn should_quit(&self) -> bool {
        false
    }
}
