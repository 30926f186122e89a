//! `TerminalApp` trait definition.

use ratatui::Frame;

use crate::context::AppContext;

/// A game or tool driven by [`run_app`](crate::run_app).
///
/// Each frame the runner polls input, calls [`update`](Self::update), stops
/// if [`should_exit`](Self::should_exit) says so, and otherwise draws with
/// [`render`](Self::render).
pub trait TerminalApp: Sized {
    /// Build the application once the terminal is ready.
    ///
    /// Bind actions on `ctx.input` here.
    fn init(ctx: &mut AppContext) -> anyhow::Result<Self>;

    /// Advance the application by `dt` seconds.
    fn update(&mut self, ctx: &mut AppContext, dt: f32);

    /// Draw the current state into the terminal frame.
    fn render(&mut self, ctx: &AppContext, frame: &mut Frame);

    /// React to a new terminal size. The context already holds it.
    ///
    /// Default implementation does nothing.
    #[allow(unused_variables)]
    fn on_resize(&mut self, ctx: &mut AppContext, width: u16, height: u16) -> anyhow::Result<()> {
        Ok(())
    }

    /// Checked after every update; `true` ends the loop.
    fn should_exit(&self) -> bool;

    /// Called once before the terminal is restored.
    ///
    /// Default implementation does nothing.
    #[allow(unused_variables)]
    fn cleanup(&mut self, ctx: &mut AppContext) {}
}
