//! RegionKey - immutable value type identifying a cell of the terrain tree.
//!
//! Keys are grid coordinates at their own level.
//! Level 0 = coarsest (single cell), higher level = finer.

use crate::atlas::texture_index;
use crate::constants::{FINEST_LEVEL, GRID_DIM, LEVEL_COUNT};

/// Terrain tree cell - immutable value type.
///
/// Grid coordinates are at the key's own level, so level 1 spans 0..2 and
/// level 2 spans 0..4 on each axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct RegionKey {
  /// Detail level (0 = coarsest)
  pub level: u8,
  /// Grid X position at this level
  pub x: u32,
  /// Grid Z position at this level
  pub z: u32,
}

impl RegionKey {
  /// Create a key at the given level and grid position.
  pub fn new(level: u8, x: u32, z: u32) -> Self {
    debug_assert!((level as usize) < LEVEL_COUNT, "level {} out of range", level);
    debug_assert!(
      x < GRID_DIM[level as usize] && z < GRID_DIM[level as usize],
      "cell ({}, {}) outside level {} grid",
      x,
      z,
      level
    );
    Self { level, x, z }
  }

  /// The root key covering the whole terrain.
  pub const ROOT: Self = Self { level: 0, x: 0, z: 0 };

  /// Get child key (finer detail: level + 1).
  ///
  /// Quadrant: 0-3 where bits represent +X, +Z offsets:
  /// - bit 0: X offset (0 or 1)
  /// - bit 1: Z offset (0 or 1)
  ///
  /// which gives SW, SE, NW, NE.
  ///
  /// Returns None at the finest level.
  pub fn get_child(&self, quadrant: u8) -> Option<Self> {
    if self.level >= FINEST_LEVEL {
      return None;
    }
    let cx = (quadrant & 1) as u32;
    let cz = ((quadrant >> 1) & 1) as u32;
    Some(Self {
      level: self.level + 1,
      x: self.x * 2 + cx,
      z: self.z * 2 + cz,
    })
  }

  /// Get parent key (coarser: level - 1).
  ///
  /// Returns None for the root.
  pub fn get_parent(&self) -> Option<Self> {
    if self.level == 0 {
      return None;
    }
    Some(Self {
      level: self.level - 1,
      x: self.x / 2,
      z: self.z / 2,
    })
  }

  /// Ancestor (or self) at a coarser or equal `level`.
  pub fn ancestor_at(&self, level: u8) -> Self {
    debug_assert!(level <= self.level, "ancestor must not be finer");
    let shift = self.level - level;
    Self {
      level,
      x: self.x >> shift,
      z: self.z >> shift,
    }
  }

  /// Texture index owned by this cell.
  #[inline]
  pub fn texture_index(&self) -> u32 {
    texture_index(self.level, self.x, self.z)
  }

  /// Iterate every key of a level in z-major, then x order.
  pub fn level_keys(level: u8) -> impl Iterator<Item = Self> {
    let dim = GRID_DIM[level as usize];
    (0..dim).flat_map(move |z| (0..dim).map(move |x| Self { level, x, z }))
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
