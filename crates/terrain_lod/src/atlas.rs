//! Texture atlas addressing.
//!
//! Every cell of the tree owns one texture per channel (height, diffuse,
//! normal). The three channel arrays are parallel: entry `i` of each array
//! belongs to the same cell. This layout is shared with the shader and the
//! texture loader, so [`texture_index`] must never change.
//!
//! When a fine cell is drawn at a coarser level it samples the coarse
//! texture through a UV sub-rectangle:
//!
//! ```text
//!   level-1 texture (covers 2x2 fine cells)   level-0 texture (covers 4x4)
//!   ┌─────────┬─────────┐                    ┌────┬────┬────┬────┐
//!   │ (0,.5)  │ (.5,.5) │  scale 0.5         │    │    │    │    │ scale 0.25
//!   ├─────────┼─────────┤                    ├────┼────┼────┼────┤
//!   │ (0,0)   │ (.5,0)  │                    │ offset = cell * .25 │
//!   └─────────┴─────────┘                    └────┴────┴────┴────┘
//! ```

use glam::Vec2;

use crate::constants::{FINEST_LEVEL, FINE_GRID_DIM, GRID_DIM, LEVEL_COUNT, LEVEL_TEXTURE_BASE};

/// Texture index of cell `(x, z)` at `level`.
///
/// ```text
/// index(0, _, _) = 0
/// index(1, x, z) = 1 + z * 2 + x
/// index(2, x, z) = 5 + z * 4 + x
/// ```
///
/// Coordinates outside the level grid are a caller bug (debug-asserted).
#[inline]
pub fn texture_index(level: u8, x: u32, z: u32) -> u32 {
  debug_assert!((level as usize) < LEVEL_COUNT, "level {} out of range", level);
  let dim = GRID_DIM[level as usize];
  debug_assert!(
    x < dim && z < dim,
    "cell ({}, {}) outside {}x{} grid of level {}",
    x,
    z,
    dim,
    dim,
    level
  );
  LEVEL_TEXTURE_BASE[level as usize] + z * dim + x
}

/// Per-channel texture indices of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureIndices {
  pub height: u32,
  pub diffuse: u32,
  pub normal: u32,
}

impl TextureIndices {
  /// All channels share one index (parallel arrays).
  #[inline]
  pub fn uniform(index: u32) -> Self {
    Self {
      height: index,
      diffuse: index,
      normal: index,
    }
  }

  /// Indices of cell `(x, z)` at `level`.
  #[inline]
  pub fn for_cell(level: u8, x: u32, z: u32) -> Self {
    Self::uniform(texture_index(level, x, z))
  }
}

/// Sub-rectangle of a texture in UV space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UvRect {
  pub offset: Vec2,
  pub scale: Vec2,
}

impl UvRect {
  /// The whole texture.
  pub const FULL: Self = Self {
    offset: Vec2::ZERO,
    scale: Vec2::ONE,
  };

  /// UV rectangle a finest-level cell `(cell_x, cell_z)` samples when drawn
  /// with the texture of its ancestor at `level`.
  ///
  /// Level 2 uses its own texture; level 1 uses one quadrant of the 2x2
  /// parent; level 0 uses a 1/16 tile of the single root texture.
  pub fn for_fine_cell(level: u8, cell_x: u32, cell_z: u32) -> Self {
    debug_assert!(
      cell_x < FINE_GRID_DIM && cell_z < FINE_GRID_DIM,
      "fine cell ({}, {}) out of range",
      cell_x,
      cell_z
    );
    // Fine cells covered by one texture at `level`, per axis.
    let span = 1u32 << (FINEST_LEVEL - level);
    let scale = 1.0 / span as f32;
    let local = Vec2::new((cell_x % span) as f32, (cell_z % span) as f32);
    Self {
      offset: local * scale,
      scale: Vec2::splat(scale),
    }
  }

  /// Maximum UV corner.
  #[inline]
  pub fn max(&self) -> Vec2 {
    self.offset + self.scale
  }

  /// Area covered in UV space.
  #[inline]
  pub fn area(&self) -> f32 {
    self.scale.x * self.scale.y
  }
}

impl Default for UvRect {
  fn default() -> Self {
    Self::FULL
  }
}

/// Map channel of the terrain texture set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureChannel {
  Height,
  Diffuse,
  Normal,
}

impl TextureChannel {
  pub const ALL: [Self; 3] = [Self::Height, Self::Diffuse, Self::Normal];

  /// Export name used for both the subfolder and the file prefix.
  pub fn export_name(&self) -> &'static str {
    match self {
      Self::Height => "Height",
      Self::Diffuse => "Weathering",
      Self::Normal => "Normals",
    }
  }
}

/// Folder holding a level's exports. Exports are numbered finest first.
fn level_folder(level: u8) -> &'static str {
  match level {
    0 => "003",
    1 => "002",
    _ => "001",
  }
}

/// Relative path of the exported texture for a cell.
///
/// Level 0 is a single file; tiled levels are split per channel folder and
/// named by row (`y` = grid z) then column (`x`):
///
/// ```text
/// 003/Height_Out.dds
/// 002/Height/Height_Out_y1_x0.dds
/// 001/Normals/Normals_Out_y3_x2.dds
/// ```
pub fn texture_path(channel: TextureChannel, level: u8, x: u32, z: u32) -> String {
  debug_assert!((level as usize) < LEVEL_COUNT, "level {} out of range", level);
  let name = channel.export_name();
  if level == 0 {
    format!("{}/{}_Out.dds", level_folder(level), name)
  } else {
    format!(
      "{}/{}/{}_Out_y{}_x{}.dds",
      level_folder(level),
      name,
      name,
      z,
      x
    )
  }
}

/// Paths of every texture of a channel, ordered by texture index.
pub fn channel_manifest(channel: TextureChannel) -> Vec<String> {
  let mut paths = Vec::with_capacity(crate::constants::TEXTURE_COUNT);
  for level in 0..LEVEL_COUNT as u8 {
    let dim = GRID_DIM[level as usize];
    for z in 0..dim {
      for x in 0..dim {
        paths.push(texture_path(channel, level, x, z));
      }
    }
  }
  paths
}

#[cfg(test)]
#[path = "atlas_test.rs"]
mod atlas_test;
