//! Skirts: a vertical strip hanging below every patch edge.
//!
//! Two neighbouring tiles at different detail sample the height texture at
//! different spacings, so their shared edge does not match exactly. Each
//! skirt vertex copies an edge vertex but carries `y = SKIRT_SENTINEL_Y`; the
//! vertex shader drops those vertices below the terrain, and the resulting
//! curtain fills any crack.

use glam::Vec2;

use crate::constants::SKIRT_SENTINEL_Y;
use crate::error::LodError;

use super::{boundary_vertices, build_patch, PatchMesh, TerrainVertex};

/// Side of the unit patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatchEdge {
  /// z = 0
  North,
  /// z = 1
  South,
  /// x = 0
  West,
  /// x = 1
  East,
}

impl PatchEdge {
  /// Skirt strip order in the vertex buffer.
  pub const ALL: [Self; 4] = [Self::North, Self::South, Self::West, Self::East];

  /// Unit XZ direction pointing away from the patch interior.
  pub fn outward(&self) -> Vec2 {
    match self {
      Self::North => Vec2::NEG_Y,
      Self::South => Vec2::Y,
      Self::West => Vec2::NEG_X,
      Self::East => Vec2::X,
    }
  }

  /// Walking the edge in increasing coordinate order, the plain winding
  /// faces -Z on the north/south edges and +X on the west/east edges.
  /// South and west need the opposite winding to face outward.
  #[inline]
  fn flip_winding(&self) -> bool {
    matches!(self, Self::South | Self::West)
  }
}

/// True for vertices that belong to a skirt.
#[inline]
pub fn is_skirt(vertex: &TerrainVertex) -> bool {
  vertex.position[1] == SKIRT_SENTINEL_Y
}

/// Build an `N x N` unit patch plus four skirt strips of `N` vertices each.
///
/// Skirt strips follow the grid in [`PatchEdge::ALL`] order, and every strip
/// faces away from the patch.
pub fn build_patch_with_skirts(grid_size: u32) -> Result<PatchMesh, LodError> {
  let mut mesh = build_patch(grid_size)?;
  let n = grid_size;
  mesh.vertices.reserve(4 * n as usize);
  mesh.indices.reserve(4 * (n as usize - 1) * 6);

  for edge in PatchEdge::ALL {
    let strip_start = mesh.vertices.len() as u32;
    let edge_indices: Vec<u32> = boundary_vertices(n, edge).collect();

    for &top in &edge_indices {
      let source = mesh.vertices[top as usize];
      mesh.vertices.push(TerrainVertex {
        position: [source.position[0], SKIRT_SENTINEL_Y, source.position[2]],
        uv: source.uv,
      });
    }

    for i in 0..n - 1 {
      let a = edge_indices[i as usize];
      let b = edge_indices[i as usize + 1];
      let a_low = strip_start + i;
      let b_low = a_low + 1;
      if edge.flip_winding() {
        mesh.indices.extend_from_slice(&[a, a_low, b, b, a_low, b_low]);
      } else {
        mesh.indices.extend_from_slice(&[a, b, a_low, b, b_low, a_low]);
      }
    }
  }

  Ok(mesh)
}
