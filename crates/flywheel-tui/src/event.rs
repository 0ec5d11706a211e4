use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick_rate: Duration::from_millis(16),
        }
    }

    /// Create a handler that polls faster while animations are running
    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u16) -> Self {
        let frame_ms = if animation_fps == 0 {
            16
        } else {
            (1000 / animation_fps as u64).max(1)
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick_rate: Duration::from_millis(frame_ms),
        }
    }

    /// Poll for the next event at the normal tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll_with(self.tick_rate)
    }

    /// Poll for the next event at the animation tick rate
    ///
    /// Used while a wheel is in flight so redraws keep pace with
    /// trajectory sampling.
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll_with(self.animation_tick_rate)
    }

    fn poll_with(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
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
    /// Mouse press, drag, release, or wheel movement
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
