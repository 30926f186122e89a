//! Keyboard state latched from terminal key events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use hashbrown::HashMap;
use tracing::debug;

use crate::button_state::ButtonState;
use crate::modifiers::Modifiers;

/// Frames a key stays held without a repeat event before it is released.
///
/// Only applies until the terminal has reported a real release event.
pub const HOLD_TIMEOUT_FRAMES: u32 = 15;

#[derive(Debug, Default, Clone, Copy)]
struct KeySlot {
    state: ButtonState,
    idle_frames: u32,
}

/// State of every key seen so far.
///
/// Letter keys are folded to lowercase so controls work with caps lock on.
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys: HashMap<KeyCode, KeySlot>,
    modifiers: Modifiers,
    reports_release: bool,
    any_just_pressed: bool,
}

/// Fold letters to lowercase; every other key is kept as is.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl KeyboardState {
    /// Create a new keyboard state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch one key event.
    pub fn process_key_event(&mut self, event: &KeyEvent) {
        let code = normalize(event.code);
        self.modifiers = Modifiers::from(event.modifiers);
        let slot = self.keys.entry(code).or_default();

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if !slot.state.is_pressed() {
                    self.any_just_pressed = true;
                }
                slot.state.press();
                slot.idle_frames = 0;
            }
            KeyEventKind::Release => {
                slot.state.release();
                if !self.reports_release {
                    debug!("terminal reports key releases");
                    self.reports_release = true;
                }
            }
        }
    }

    /// True while the key is down, including the frame it went down.
    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys
            .get(&normalize(key))
            .is_some_and(|s| s.state.is_pressed())
    }

    /// True while the key is down, but not on the frame it went down.
    #[must_use]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.keys
            .get(&normalize(key))
            .is_some_and(|s| s.state.is_held())
    }

    /// True only during the frame the key went down.
    #[must_use]
    pub fn is_just_pressed(&self, key: KeyCode) -> bool {
        self.keys
            .get(&normalize(key))
            .is_some_and(|s| s.state.is_just_pressed())
    }

    #[must_use]
    pub fn is_just_released(&self, key: KeyCode) -> bool {
        self.keys
            .get(&normalize(key))
            .is_some_and(|s| s.state.is_just_released())
    }

    /// True if any key went down this frame.
    #[must_use]
    pub const fn any_just_pressed(&self) -> bool {
        self.any_just_pressed
    }

    /// Modifiers of the most recent key event.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Settle edge states and expire keys whose repeats stopped.
    pub fn end_frame(&mut self) {
        let expire = !self.reports_release;
        for slot in self.keys.values_mut() {
            slot.state.end_frame();
            if expire && slot.state.is_pressed() {
                slot.idle_frames += 1;
                if slot.idle_frames > HOLD_TIMEOUT_FRAMES {
                    slot.state.release();
                }
            }
        }
        self.any_just_pressed = false;
    }

    /// Forget every key, e.g. after focus loss.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.modifiers = Modifiers::empty();
        self.any_just_pressed = false;
    }
}
