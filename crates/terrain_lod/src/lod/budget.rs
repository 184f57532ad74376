//! Instance buffer budget and per-frame selection statistics.

use crate::constants::{DEFAULT_INSTANCE_CAPACITY, LEVEL_COUNT};
use crate::error::LodError;

/// Which tiles survive when the list exceeds the instance capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TruncationPolicy {
  /// Keep the first `capacity` tiles in selection order.
  #[default]
  ListOrder,
  /// Keep the `capacity` tiles whose centers are nearest the camera.
  NearestFirst,
}

/// Capacity of the per-frame instance buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InstanceBudget {
  /// Maximum instances per frame.
  pub capacity: usize,
  pub policy: TruncationPolicy,
}

impl InstanceBudget {
  pub const DEFAULT: Self = Self {
    capacity: DEFAULT_INSTANCE_CAPACITY,
    policy: TruncationPolicy::ListOrder,
  };

  /// Number of tiles that would be dropped from a list of `tile_count`.
  #[inline]
  pub fn overflow(&self, tile_count: usize) -> usize {
    tile_count.saturating_sub(self.capacity)
  }

  pub fn validate(&self) -> Result<(), LodError> {
    if self.capacity == 0 {
      return Err(LodError::ZeroInstanceCapacity);
    }
    Ok(())
  }
}

impl Default for InstanceBudget {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Statistics from one selection pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionStats {
  /// Emitted tiles per level (index = level).
  pub tiles_per_level: [u32; LEVEL_COUNT],
  /// Regions or cells rejected by the frustum.
  pub culled: u32,
  /// Regions or cells examined.
  pub nodes_visited: u32,
  /// Global level changed this frame (hysteresis only).
  pub level_switched: bool,
}

impl SelectionStats {
  /// Total emitted tiles.
  #[inline]
  pub fn total_tiles(&self) -> u32 {
    self.tiles_per_level.iter().sum()
  }

  #[inline]
  pub(crate) fn record_tile(&mut self, level: u8) {
    self.tiles_per_level[level as usize] += 1;
  }
}
