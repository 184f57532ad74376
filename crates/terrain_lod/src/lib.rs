//! terrain_lod - Framework/engine independent terrain tile LOD selection
//!
//! This crate decides, every frame, which tiles of a square heightmap terrain
//! are drawn, at which detail level, and which slice of the texture atlas each
//! tile samples. The terrain is split into a fixed 3-level quadtree:
//!
//! ```text
//!   level 0 (coarsest)     level 1               level 2 (finest)
//!   ┌───────────────┐      ┌───────┬───────┐     ┌───┬───┬───┬───┐
//!   │               │      │ (0,1) │ (1,1) │     │   │   │   │   │
//!   │      (0,0)    │      ├───────┼───────┤     ├───┼───┼───┼───┤
//!   │               │      │ (0,0) │ (1,0) │     │  4 x 4 cells  │
//!   └───────────────┘      └───────┴───────┘     └───┴───┴───┴───┘
//!   texture 0              textures 1..=4        textures 5..=20
//! ```
//!
//! # Features
//!
//! - **Global hysteresis**: one level for the whole terrain, switched with
//!   asymmetric thresholds and a cooldown so it never flickers
//! - **Distance rings**: per-cell level from point-to-box distance; coarse
//!   cells share their parent's texture through UV sub-rectangles
//! - **Screen-space error**: quadtree refinement driven by projected pixel
//!   error
//! - **Skirted patch mesh**: one instanced unit patch that hides cracks between
//!   neighbouring tiles of different detail
//!
//! # Example
//!
//! ```ignore
//! use terrain_lod::{Frustum, LodConfig, LodStrategy, TerrainConfig, TerrainLodSelector, ViewState};
//!
//! let mut selector = TerrainLodSelector::new(TerrainConfig::default(), LodConfig::default())?;
//! let view = ViewState::new(camera_pos, Frustum::from_view_projection(proj * view));
//!
//! let selection = selector.select(&view, dt);
//! let instances = selector.instances(&selection, view.camera_position);
//! // upload `instances`, draw `terrain_lod::mesh::build_patch_with_skirts(65)?`
//! ```

pub mod atlas;
pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use atlas::{texture_index, TextureChannel, TextureIndices, UvRect};
pub use constants::{FINEST_LEVEL, LEVEL_COUNT, TEXTURE_COUNT};
pub use error::LodError;
pub use types::{TerrainConfig, ViewState};

// Static spatial decomposition
pub mod region;
pub use region::{QuadTree, RegionKey, TerrainRegion, TileBounds};

// Frustum culling
pub mod visibility;
pub use visibility::{Aabb, Containment, Frustum};

// Tile descriptors and GPU instance records
pub mod tile;
pub use tile::{SelectedTile, TileInstance};

// LOD selection strategies
pub mod lod;
pub use lod::{
  HysteresisState, InstanceBudget, LodConfig, LodStrategy, Selection, SelectionStats,
  TerrainLodSelector, TruncationPolicy,
};

// Skirted patch geometry
pub mod mesh;
pub use mesh::{PatchMesh, TerrainVertex};

// Frame timing and statistics
pub mod metrics;
pub mod timing;
pub use timing::FrameClock;
