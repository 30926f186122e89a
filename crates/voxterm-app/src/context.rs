//! Application context.

use voxterm_input::InputManager;

use crate::frame::FrameTimer;

/// State the runner shares with the application every frame.
#[derive(Debug)]
pub struct AppContext {
    /// Keyboard state and actions, already polled for this frame.
    pub input: InputManager,
    /// Terminal width in cells.
    pub width: u16,
    /// Terminal height in cells.
    pub height: u16,
    /// Frames completed so far.
    pub frame_count: u64,
    pub(crate) timer: FrameTimer,
}

impl AppContext {
    /// Create a new context for a `width x height` terminal.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            input: InputManager::new(),
            width,
            height,
            frame_count: 0,
            timer: FrameTimer::new(),
        }
    }

    /// Frames per second, refreshed once a second.
    pub const fn fps(&self) -> f32 {
        self.timer.fps()
    }

    pub const fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}
