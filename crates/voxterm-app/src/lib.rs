//! Application framework for terminal games built on the voxterm engine.
//!
//! This crate handles the boilerplate every terminal game needs:
//! - Logging to a file while the screen is taken over
//! - Raw mode, alternate screen and cursor, restored on exit or error
//! - Input polling and resize plumbing
//! - Fixed frame pacing and FPS measurement
//!
//! # Example
//!
//! ```no_run
//! use voxterm_app::{run_app, AppConfig, AppContext, TerminalApp};
//! use ratatui::Frame;
//!
//! struct MyApp {
//!     done: bool,
//! }
//!
//! impl TerminalApp for MyApp {
//!     fn init(_ctx: &mut AppContext) -> anyhow::Result<Self> {
//!         Ok(MyApp { done: false })
//!     }
//!
//!     fn update(&mut self, ctx: &mut AppContext, _dt: f32) {
//!         self.done = ctx.input.any_key_just_pressed();
//!     }
//!
//!     fn render(&mut self, _ctx: &AppContext, _frame: &mut Frame) {}
//!
//!     fn should_exit(&self) -> bool {
//!         self.done
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     run_app::<MyApp>(AppConfig::new("demo"))
//! }
//! ```

mod app;
mod context;
mod frame;
mod runner;

pub use app::TerminalApp;
pub use context::AppContext;
pub use frame::FrameTimer;
pub use runner::{run_app, AppConfig};

// Re-export commonly used types for convenience
pub use ratatui::Frame;
pub use voxterm_input::{ActionMap, InputBinding, InputManager, KeyCode, Modifiers};
