//! Frame timing.

use std::time::{Duration, Instant};

/// Interval over which frames are counted for the FPS figure.
const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Measures frame deltas and a once-a-second frame rate.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last: Instant,
    window_start: Instant,
    window_frames: u32,
    fps: f32,
    min_fps: f32,
    max_fps: f32,
    fps_sum: f64,
    samples: u32,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer starting now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a timer whose first frame began at `start`.
    pub const fn starting_at(start: Instant) -> Self {
        Self {
            last: start,
            window_start: start,
            window_frames: 0,
            fps: 0.0,
            min_fps: f32::MAX,
            max_fps: 0.0,
            fps_sum: 0.0,
            samples: 0,
        }
    }

    /// Mark a frame boundary now and return seconds since the previous one.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Mark a frame boundary at `now`.
    ///
    /// The FPS figure is refreshed once a full window has elapsed.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        self.window_frames += 1;

        let window = now.saturating_duration_since(self.window_start);
        if window >= FPS_WINDOW {
            self.fps = self.window_frames as f32 / window.as_secs_f32();
            self.min_fps = self.min_fps.min(self.fps);
            self.max_fps = self.max_fps.max(self.fps);
            self.fps_sum += f64::from(self.fps);
            self.samples += 1;
            self.window_start = now;
            self.window_frames = 0;
        }
        dt
    }

    /// Frame rate over the last complete window; zero before the first.
    pub const fn fps(&self) -> f32 {
        self.fps
    }

    /// `(min, max, average)` of all FPS samples so far.
    pub fn stats(&self) -> Option<(f32, f32, f32)> {
        (self.samples > 0).then(|| {
            (
                self.min_fps,
                self.max_fps,
                (self.fps_sum / f64::from(self.samples)) as f32,
            )
        })
    }
}
