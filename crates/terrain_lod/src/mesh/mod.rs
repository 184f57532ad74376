//! Unit patch mesh shared by every terrain tile.
//!
//! The patch spans `[0, 1]` on X and Z at `y = 0`; each tile's world matrix
//! scales and moves it into place and the vertex shader displaces Y from the
//! height texture. UV equals the XZ position, so the per-tile UV rectangle
//! selects which part of a texture the patch samples.
//!
//! ```text
//!   z=0  tl ── tr        vertex (x, z) = z * N + x
//!        │  ╲  │         triangles: (tl, bl, tr), (tr, bl, br)
//!   z=1  bl ── br
//! ```
//!
//! # Module Structure
//!
//! - [`skirt`]: vertical skirts hiding cracks between tiles of different detail

pub mod skirt;

pub use skirt::{build_patch_with_skirts, is_skirt, PatchEdge};

use bytemuck::{Pod, Zeroable};

use crate::error::LodError;

/// Patch vertex: position and texture coordinate.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
  pub position: [f32; 3],
  pub uv: [f32; 2],
}

impl TerrainVertex {
  #[inline]
  pub fn new(x: f32, y: f32, z: f32) -> Self {
    Self {
      position: [x, y, z],
      uv: [x, z],
    }
  }
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatchMesh {
  pub vertices: Vec<TerrainVertex>,
  pub indices: Vec<u32>,
  /// Vertices per patch side.
  pub grid_size: u32,
}

impl PatchMesh {
  /// Number of vertices in the main grid (skirt vertices follow).
  #[inline]
  pub fn grid_vertex_count(&self) -> usize {
    (self.grid_size * self.grid_size) as usize
  }

  #[inline]
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Vertices appended after the main grid.
  pub fn skirt_vertices(&self) -> &[TerrainVertex] {
    &self.vertices[self.grid_vertex_count().min(self.vertices.len())..]
  }

  pub fn has_skirts(&self) -> bool {
    !self.skirt_vertices().is_empty()
  }

  /// Index buffer as bytes for upload.
  pub fn index_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.indices)
  }

  /// Vertex buffer as bytes for upload.
  pub fn vertex_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.vertices)
  }
}

pub(crate) fn check_grid_size(grid_size: u32) -> Result<(), LodError> {
  if grid_size < 2 {
    return Err(LodError::InvalidGridSize(grid_size));
  }
  Ok(())
}

/// Build an `N x N` unit patch without skirts.
pub fn build_patch(grid_size: u32) -> Result<PatchMesh, LodError> {
  check_grid_size(grid_size)?;

  let n = grid_size;
  let step = 1.0 / (n - 1) as f32;

  let mut vertices = Vec::with_capacity((n * n) as usize);
  for z in 0..n {
    for x in 0..n {
      vertices.push(TerrainVertex::new(x as f32 * step, 0.0, z as f32 * step));
    }
  }

  let quads = (n - 1) * (n - 1);
  let mut indices = Vec::with_capacity((quads * 6) as usize);
  for z in 0..n - 1 {
    for x in 0..n - 1 {
      let tl = z * n + x;
      let tr = tl + 1;
      let bl = tl + n;
      let br = bl + 1;
      indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
    }
  }

  Ok(PatchMesh {
    vertices,
    indices,
    grid_size,
  })
}

/// Indices of the grid vertices along `edge`, in increasing coordinate order.
pub fn boundary_vertices(grid_size: u32, edge: PatchEdge) -> impl Iterator<Item = u32> {
  let n = grid_size;
  (0..n).map(move |i| match edge {
    PatchEdge::North => i,
    PatchEdge::South => (n - 1) * n + i,
    PatchEdge::West => i * n,
    PatchEdge::East => i * n + (n - 1),
  })
}
