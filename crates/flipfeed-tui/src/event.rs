use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use flipfeed_core::FeedUpdate;
use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver};

/// Merges terminal input with finished background loads
pub struct EventHandler {
    tick_rate: Duration,
    updates: UnboundedReceiver<FeedUpdate>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, updates: UnboundedReceiver<FeedUpdate>) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            updates,
        }
    }

    /// Next event; finished loads are delivered before terminal input
    pub fn next(&mut self) -> Result<Option<AppEvent>> {
        match self.updates.try_recv() {
            Ok(update) => return Ok(Some(AppEvent::Feed(update))),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("Feed update channel closed");
            }
        }

        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Ignore release events (crossterm 0.27+ sends them on some systems)
                Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// A background load finished
    Feed(FeedUpdate),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for the loading spinner
    Tick,
}
