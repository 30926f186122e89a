//! Keyboard input for terminal games.
//!
//! Terminals deliver key events, not key states. This crate latches those
//! events into per-frame states so game code can ask both "was this pressed
//! this frame" and "is this held".
//!
//! # Core Types
//!
//! - [`InputManager`]: Drains crossterm events once per frame
//! - [`KeyboardState`]: Tracks key states, with a hold timeout for
//!   terminals that never report releases
//! - [`ActionMap`]: Maps named actions to key bindings
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use voxterm_input::{ActionMap, InputManager, KeyCode};
//!
//! let actions = ActionMap::builder()
//!     .bind("forward", KeyCode::Char('i'))
//!     .bind("jump", KeyCode::Char(' '))
//!     .build();
//! let mut input = InputManager::with_actions(actions);
//!
//! loop {
//!     input.poll(Duration::ZERO);
//!     input.update();
//!     if input.is_action_pressed("forward") {
//!         // walk
//!     }
//!     input.end_frame();
//! }
//! ```

mod action;
mod button_state;
mod input;
mod keyboard;
mod modifiers;

pub use action::{ActionMap, ActionMapBuilder, InputBinding};
pub use button_state::ButtonState;
pub use input::InputManager;
pub use keyboard::{KeyboardState, HOLD_TIMEOUT_FRAMES};
pub use modifiers::Modifiers;

pub use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
