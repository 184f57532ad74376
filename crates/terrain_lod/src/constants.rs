//! Layout and reference constants for the 3-level terrain quadtree.
//!
//! # Level Layout
//!
//! ```text
//! ┌───────┬──────────┬───────────┬─────────────────┐
//! │ Level │ Grid     │ Cell size │ Texture indices │
//! ├───────┼──────────┼───────────┼─────────────────┤
//! │   0   │ 1 x 1    │ S         │ 0               │
//! │   1   │ 2 x 2    │ S / 2     │ 1 ..= 4         │
//! │   2   │ 4 x 4    │ S / 4     │ 5 ..= 20        │
//! └───────┴──────────┴───────────┴─────────────────┘
//! ```
//!
//! Level 0 is the coarsest level. The texture index of a cell is its level's
//! base offset plus its z-major position inside the level grid.

/// Number of detail levels in the tree.
pub const LEVEL_COUNT: usize = 3;

/// Coarsest level (one tile covering the whole terrain).
pub const COARSEST_LEVEL: u8 = 0;

/// Finest level (leaf level, never subdivided).
pub const FINEST_LEVEL: u8 = (LEVEL_COUNT - 1) as u8;

/// Tiles per axis for each level: 1, 2, 4.
pub const GRID_DIM: [u32; LEVEL_COUNT] = [1, 2, 4];

/// First texture index used by each level.
pub const LEVEL_TEXTURE_BASE: [u32; LEVEL_COUNT] = [0, 1, 5];

/// Distinct textures per map channel (1 + 4 + 16).
pub const TEXTURE_COUNT: usize = 21;

/// Cells per axis of the finest grid used by distance-ring selection.
pub const FINE_GRID_DIM: u32 = GRID_DIM[FINEST_LEVEL as usize];

/// Number of finest cells.
pub const FINE_CELL_COUNT: usize = (FINE_GRID_DIM * FINE_GRID_DIM) as usize;

// =============================================================================
// Reference configuration
// =============================================================================

/// Terrain edge length in world units.
pub const DEFAULT_WORLD_SIZE: f32 = 512.0;

/// Maximum terrain height in world units.
pub const DEFAULT_MAX_HEIGHT: f32 = 150.0;

/// Vertical padding added above and below the terrain's height range when
/// culling. Displacement happens in the vertex shader after selection.
pub const DEFAULT_CULL_PADDING: f32 = 50.0;

/// Seconds between two global level switches.
pub const DEFAULT_SWITCH_DELAY: f32 = 0.3;

/// Vertices per side of the instanced patch.
pub const DEFAULT_PATCH_GRID_SIZE: u32 = 65;

/// Instance slots available per frame.
pub const DEFAULT_INSTANCE_CAPACITY: usize = 64;

/// Y value marking a skirt vertex. The vertex shader drops these below the
/// displaced surface instead of sampling the heightmap.
pub const SKIRT_SENTINEL_Y: f32 = -1.0;

/// Lower bound for the camera distance used by the screen-space error metric.
pub const MIN_ERROR_DISTANCE: f32 = 1.0;

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
