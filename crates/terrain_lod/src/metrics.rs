//! Selection statistics over time.
//!
//! Compiled in with the `metrics` feature and toggled at runtime through
//! [`COLLECT_METRICS`]. Without the feature every `record_*` call is a no-op.
//!
//! ```ignore
//! use terrain_lod::metrics::SelectionMetrics;
//!
//! let start = web_time::Instant::now();
//! let selection = selector.select(&view, dt);
//! metrics.record(&selection.stats, terrain_lod::timing::micros_since(start));
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::constants::LEVEL_COUNT;
use crate::lod::SelectionStats;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Compile-time feature and runtime toggle both on.
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-size history, oldest evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  pub fn push(&mut self, value: T) {
    if self.capacity == 0 {
      return;
    }
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Oldest to newest.
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl RollingWindow<u64> {
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.buffer.iter().sum::<u64>() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    // ~2 seconds at 60fps
    Self::new(128)
  }
}

/// Aggregated selection statistics.
#[derive(Debug, Clone, Default)]
pub struct SelectionMetrics {
  /// Tiles per level in the last recorded frame.
  pub tiles_per_level: [u32; LEVEL_COUNT],
  /// Culled regions in the last recorded frame.
  pub culled: u32,
  /// Tiles drawn per frame.
  pub tile_counts: RollingWindow<u64>,
  /// Selection time per frame in microseconds.
  pub select_timings: RollingWindow<u64>,
  /// Global level switches since the last reset.
  pub level_switches: u64,
  /// Frames recorded since the last reset.
  pub frames: u64,
}

impl SelectionMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record one frame.
  pub fn record(&mut self, stats: &SelectionStats, select_us: u64) {
    if !is_enabled() {
      return;
    }
    self.tiles_per_level = stats.tiles_per_level;
    self.culled = stats.culled;
    self.tile_counts.push(stats.total_tiles() as u64);
    self.select_timings.push(select_us);
    self.level_switches += stats.level_switched as u64;
    self.frames += 1;
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }

  /// Average selection time in microseconds.
  pub fn average_select_us(&self) -> f64 {
    self.select_timings.average()
  }
}
