//! Per-frame terminal event draining.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use tracing::{debug, trace};

use crate::action::ActionMap;
use crate::keyboard::KeyboardState;
use crate::modifiers::Modifiers;

/// Keyboard state, action map and pending resize for one terminal.
///
/// Call [`poll`](Self::poll) and [`update`](Self::update) at the start of a
/// frame and [`end_frame`](Self::end_frame) at its end.
#[derive(Debug, Default)]
pub struct InputManager {
    keyboard: KeyboardState,
    actions: ActionMap,
    resized: Option<(u16, u16)>,
}

impl InputManager {
    /// Create a new input manager without actions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input manager with pre-configured actions.
    #[must_use]
    pub fn with_actions(actions: ActionMap) -> Self {
        Self {
            actions,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn actions_mut(&mut self) -> &mut ActionMap {
        &mut self.actions
    }

    /// Drain every pending terminal event.
    ///
    /// Waits at most `timeout` for the first event, then takes whatever else
    /// is queued without blocking. A failed read ends the drain; whatever
    /// was read so far still counts.
    pub fn poll(&mut self, timeout: Duration) {
        let mut wait = timeout;
        loop {
            match event::poll(wait) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    debug!(%err, "terminal poll failed");
                    break;
                }
            }
            match event::read() {
                Ok(ev) => {
                    self.process_event(&ev);
                }
                Err(err) => {
                    debug!(%err, "terminal read failed");
                    break;
                }
            }
            wait = Duration::ZERO;
        }
    }

    /// Feed one terminal event.
    ///
    /// Returns `true` if the event was consumed.
    pub fn process_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => {
                trace!(?key, "key event");
                self.keyboard.process_key_event(key);
                true
            }
            Event::Resize(width, height) => {
                self.resized = Some((*width, *height));
                true
            }
            Event::FocusLost => {
                self.keyboard.clear();
                true
            }
            _ => false,
        }
    }

    /// Size reported by the latest resize event, consumed on read.
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }

    /// Recompute action states. Call after polling, before querying.
    pub fn update(&mut self) {
        self.actions.update(&self.keyboard);
    }

    /// Settle this frame's edges. Must run once at the end of every frame.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.actions.end_frame();
    }

    // ===== Keyboard shortcuts =====

    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.is_pressed(key)
    }

    #[must_use]
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keyboard.is_held(key)
    }

    #[must_use]
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.is_just_pressed(key)
    }

    #[must_use]
    pub const fn any_key_just_pressed(&self) -> bool {
        self.keyboard.any_just_pressed()
    }

    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.keyboard.modifiers()
    }

    // ===== Actions =====

    #[must_use]
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.actions.is_pressed(action)
    }

    /// Down since an earlier frame; continuous controls read this.
    #[must_use]
    pub fn is_action_held(&self, action: &str) -> bool {
        self.actions.is_held(action)
    }

    #[must_use]
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.actions.is_just_pressed(action)
    }

    #[must_use]
    pub fn is_action_just_released(&self, action: &str) -> bool {
        self.actions.is_just_released(action)
    }
}
