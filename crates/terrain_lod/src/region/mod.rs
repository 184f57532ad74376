//! Static spatial decomposition of the terrain footprint.
//!
//! The footprint is split into a fixed 3-level quadtree. Nodes live in an
//! arena ([`QuadTree`]) whose ids coincide with texture indices, so a node id
//! can be handed straight to the texture arrays.
//!
//! # Level Convention
//!
//! Level 0 = coarsest (one tile), level 2 = finest (4x4 tiles).
//!
//! ```text
//! Cell Size = world_size / 2^level
//! ```
//!
//! # Module Structure
//!
//! - [`bounds`]: `TileBounds` - XZ footprint rectangles
//! - [`node`]: `RegionKey` - immutable (level, x, z) value type
//! - [`tree`]: `QuadTree` - arena of `TerrainRegion`s with child links

pub mod bounds;
pub mod node;
pub mod tree;

// Re-exports
pub use bounds::TileBounds;
pub use node::RegionKey;
pub use tree::{NodeId, QuadTree, TerrainRegion};
