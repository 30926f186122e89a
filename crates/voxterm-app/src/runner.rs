//! Terminal setup, main loop and frame pacing.

use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use voxterm_core::Error;
use voxterm_input::InputManager;

use crate::app::TerminalApp;
use crate::context::AppContext;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name used in log messages.
    pub title: String,
    /// Target frames per second (None for unlimited).
    pub target_fps: Option<u32>,
    /// File receiving log output; `None` disables logging.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "voxterm".to_string(),
            target_fps: Some(30),
            log_file: Some(PathBuf::from("voxterm.log")),
        }
    }
}

impl AppConfig {
    /// Create a new config with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the target FPS; zero means unlimited.
    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = (fps > 0).then_some(fps);
        self
    }

    /// Set or clear the log file.
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Time budget of one frame, if paced.
    pub fn frame_time(&self) -> Option<Duration> {
        self.target_fps
            .map(|fps| Duration::from_nanos(1_000_000_000 / u64::from(fps)))
    }
}

/// Send `tracing` output to the configured file.
///
/// The terminal belongs to the application, so nothing is logged to it. A
/// log file that cannot be created only disables logging.
fn init_logging(config: &AppConfig) {
    let Some(path) = &config.log_file else {
        return;
    };
    let file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("logging disabled: cannot create {}: {e}", path.display());
            return;
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

/// Wrap a failed terminal call as [`Error::Terminal`] prefixed with `what`.
fn terminal_error(what: &'static str) -> impl FnOnce(io::Error) -> Error {
    move |e| Error::Terminal(format!("{what}: {e}"))
}

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> voxterm_core::Result<Self> {
        enable_raw_mode().map_err(terminal_error("failed to enable raw mode"))?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .map_err(terminal_error("failed to enter the alternate screen"))?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
            warn!("failed to leave the alternate screen: {e}");
        }
        if let Err(e) = disable_raw_mode() {
            warn!("failed to disable raw mode: {e}");
        }
    }
}

/// Run a [`TerminalApp`] until it asks to exit.
///
/// The terminal is restored before returning, including on error.
pub fn run_app<A: TerminalApp>(config: AppConfig) -> anyhow::Result<()> {
    init_logging(&config);
    info!("{} starting...", config.title);

    let result = {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .map_err(terminal_error("failed to create terminal"))?;
        run_terminal::<A, CrosstermBackend<Stdout>>(&mut terminal, &config, |input| {
            input.poll(Duration::ZERO);
        })
    };

    match &result {
        Ok(()) => info!("{} exited", config.title),
        Err(e) => error!("{} failed: {e:#}", config.title),
    }
    result
}

/// Build the app on `terminal` and drive it.
///
/// `poll` feeds terminal events into the input manager once per frame.
pub(crate) fn run_terminal<A, B>(
    terminal: &mut Terminal<B>,
    config: &AppConfig,
    poll: impl FnMut(&mut InputManager),
) -> anyhow::Result<()>
where
    A: TerminalApp,
    B: Backend,
{
    let size = terminal
        .size()
        .map_err(terminal_error("failed to query terminal size"))?;
    let mut ctx = AppContext::new(size.width, size.height);
    let mut app = A::init(&mut ctx)?;
    info!(width = size.width, height = size.height, "Application initialized");

    let result = main_loop(terminal, &mut app, &mut ctx, config.frame_time(), poll);
    app.cleanup(&mut ctx);

    if let Some((min, max, avg)) = ctx.timer.stats() {
        info!("FPS Statistics:");
        info!("  Min: {min:.1}");
        info!("  Max: {max:.1}");
        info!("  Avg: {avg:.1}");
    }
    info!("  Total frames: {}", ctx.frame_count);
    result
}

fn main_loop<A, B>(
    terminal: &mut Terminal<B>,
    app: &mut A,
    ctx: &mut AppContext,
    frame_time: Option<Duration>,
    mut poll: impl FnMut(&mut InputManager),
) -> anyhow::Result<()>
where
    A: TerminalApp,
    B: Backend,
{
    loop {
        let frame_start = Instant::now();

        poll(&mut ctx.input);
        if let Some((width, height)) = ctx.input.take_resize() {
            handle_resize(terminal, app, ctx, width, height)?;
        }
        ctx.input.update();

        let dt = ctx.timer.tick();
        app.update(ctx, dt);
        if app.should_exit() {
            return Ok(());
        }

        terminal
            .draw(|frame| app.render(ctx, frame))
            .map_err(terminal_error("failed to draw frame"))?;
        ctx.input.end_frame();
        ctx.frame_count += 1;

        if let Some(target) = frame_time {
            let elapsed = frame_start.elapsed();
            if elapsed < target {
                thread::sleep(target - elapsed);
            }
        }
    }
}

fn handle_resize<A, B>(
    terminal: &mut Terminal<B>,
    app: &mut A,
    ctx: &mut AppContext,
    width: u16,
    height: u16,
) -> anyhow::Result<()>
where
    A: TerminalApp,
    B: Backend,
{
    terminal
        .autoresize()
        .map_err(terminal_error("failed to resize terminal"))?;
    ctx.width = width;
    ctx.height = height;
    app.on_resize(ctx, width, height)?;
    info!("Resized to {}x{}", width, height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::widgets::Paragraph;

    /// Counts frames, shows the count and quits on `q`.
    struct Counter {
        frames: u32,
        resized: Option<(u16, u16)>,
        quit: bool,
    }

    impl TerminalApp for Counter {
        fn init(ctx: &mut AppContext) -> anyhow::Result<Self> {
            ctx.input.actions_mut().bind("quit", 'q');
            Ok(Self {
                frames: 0,
                resized: None,
                quit: false,
            })
        }

        fn update(&mut self, ctx: &mut AppContext, _dt: f32) {
            self.frames += 1;
            self.quit = ctx.input.is_action_just_pressed("quit");
        }

        fn render(&mut self, _ctx: &AppContext, frame: &mut ratatui::Frame) {
            frame.render_widget(Paragraph::new(format!("frame {}", self.frames)), frame.area());
        }

        fn on_resize(
            &mut self,
            _ctx: &mut AppContext,
            width: u16,
            height: u16,
        ) -> anyhow::Result<()> {
            self.resized = Some((width, height));
            Ok(())
        }

        fn should_exit(&self) -> bool {
            self.quit
        }
    }

    fn unpaced() -> AppConfig {
        AppConfig::new("test").with_target_fps(0).with_log_file(None)
    }

    #[test]
    fn config_builder() {
        let config = AppConfig::new("game").with_target_fps(30);
        assert_eq!(config.title, "game");
        assert_eq!(config.frame_time(), Some(Duration::from_nanos(33_333_333)));
        assert_eq!(unpaced().frame_time(), None);
        assert_eq!(unpaced().log_file, None);
    }

    #[test]
    fn terminal_failures_carry_their_step() {
        let err = terminal_error("failed to draw frame")(io::Error::other("broken pipe"));
        assert!(matches!(&err, Error::Terminal(msg) if msg == "failed to draw frame: broken pipe"));

        let err = anyhow::Error::from(err);
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Terminal(_))));
        assert_eq!(
            err.to_string(),
            "Terminal error: failed to draw frame: broken pipe"
        );
    }

    #[test]
    fn loop_runs_until_exit() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let mut frame = 0;
        run_terminal::<Counter, _>(&mut terminal, &unpaced(), |input| {
            frame += 1;
            if frame == 4 {
                input.process_event(&Event::Key(KeyEvent::new(
                    KeyCode::Char('q'),
                    KeyModifiers::NONE,
                )));
            }
        })
        .unwrap();

        assert_eq!(frame, 4);
        let buffer = terminal.backend().buffer();
        let first_row: String = (0..8).map(|x| buffer[(x, 0)].symbol()).collect();
        assert_eq!(first_row, "frame 3 ");
    }
}
