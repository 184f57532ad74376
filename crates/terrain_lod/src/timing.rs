//! Frame clock producing the `dt` fed to the hysteresis.
//!
//! Uses `web_time::Instant` so the same code runs on wasm.

use std::time::Duration;

use web_time::Instant;

/// Measures time between frames.
#[derive(Clone, Debug)]
pub struct FrameClock {
  start: Instant,
  last: Instant,
  frames: u64,
  /// Upper bound on a single `dt`, so a stall (debugger, window drag) does
  /// not burn through a whole cooldown in one frame.
  pub max_dt: f32,
}

impl FrameClock {
  pub const DEFAULT_MAX_DT: f32 = 0.25;

  pub fn new() -> Self {
    let now = Instant::now();
    Self {
      start: now,
      last: now,
      frames: 0,
      max_dt: Self::DEFAULT_MAX_DT,
    }
  }

  /// Seconds since the previous tick (or since creation), clamped to `max_dt`.
  pub fn tick(&mut self) -> f32 {
    let now = Instant::now();
    let dt = now.duration_since(self.last).as_secs_f32();
    self.last = now;
    self.frames += 1;
    dt.min(self.max_dt)
  }

  /// Time since the clock was created.
  pub fn elapsed(&self) -> Duration {
    self.start.elapsed()
  }

  /// Number of ticks so far.
  pub fn frame_count(&self) -> u64 {
    self.frames
  }
}

impl Default for FrameClock {
  fn default() -> Self {
    Self::new()
  }
}

/// Microseconds elapsed since `start`, saturating.
#[inline]
pub fn micros_since(start: Instant) -> u64 {
  start.elapsed().as_micros().min(u64::MAX as u128) as u64
}
