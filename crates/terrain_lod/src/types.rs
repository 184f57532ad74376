//! Core input types: static terrain description and per-frame view.

use glam::{Vec2, Vec3};

use crate::constants::{
  DEFAULT_CULL_PADDING, DEFAULT_MAX_HEIGHT, DEFAULT_WORLD_SIZE, GRID_DIM, LEVEL_COUNT,
};
use crate::error::LodError;
use crate::region::{RegionKey, TileBounds};
use crate::visibility::{Aabb, Frustum};

/// Static terrain description.
///
/// The footprint is a square of edge `world_size` centred on `center` (XZ),
/// with heights in `0..=max_height`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainConfig {
  /// Edge length of the terrain footprint in world units.
  pub world_size: f32,
  /// Maximum displaced height in world units.
  pub max_height: f32,
  /// XZ center of the footprint.
  pub center: Vec2,
  /// Extra vertical margin (above and below) for culling boxes.
  pub cull_padding: f32,
}

impl TerrainConfig {
  /// Edge length of one cell at `level`.
  #[inline]
  pub fn get_cell_size(&self, level: u8) -> f32 {
    debug_assert!((level as usize) < LEVEL_COUNT, "level {} out of range", level);
    self.world_size / GRID_DIM[level as usize] as f32
  }

  /// Minimum XZ corner of the whole terrain.
  #[inline]
  pub fn get_origin(&self) -> Vec2 {
    self.center - Vec2::splat(self.world_size * 0.5)
  }

  /// World-space XZ minimum corner of a cell.
  #[inline]
  pub fn get_cell_min(&self, key: &RegionKey) -> Vec2 {
    let cell_size = self.get_cell_size(key.level);
    self.get_origin() + Vec2::new(key.x as f32, key.z as f32) * cell_size
  }

  /// World-space XZ bounds of a cell.
  pub fn get_cell_bounds(&self, key: &RegionKey) -> TileBounds {
    let min = self.get_cell_min(key);
    TileBounds::new(min, min + Vec2::splat(self.get_cell_size(key.level)))
  }

  /// XZ bounds of the whole terrain.
  pub fn terrain_bounds(&self) -> TileBounds {
    let origin = self.get_origin();
    TileBounds::new(origin, origin + Vec2::splat(self.world_size))
  }

  /// Culling box for a footprint: full height range plus padding.
  #[inline]
  pub fn cull_box(&self, bounds: &TileBounds) -> Aabb {
    bounds.extrude(-self.cull_padding, self.max_height + self.cull_padding)
  }

  /// Check sizes are positive and finite.
  pub fn validate(&self) -> Result<(), LodError> {
    let positive = |field: &'static str, value: f32| {
      if value.is_finite() && value > 0.0 {
        Ok(())
      } else {
        Err(LodError::InvalidTerrain { field, value })
      }
    };
    positive("world_size", self.world_size)?;
    positive("max_height", self.max_height)?;
    if !self.cull_padding.is_finite() || self.cull_padding < 0.0 {
      return Err(LodError::InvalidTerrain {
        field: "cull_padding",
        value: self.cull_padding,
      });
    }
    Ok(())
  }
}

impl Default for TerrainConfig {
  fn default() -> Self {
    Self {
      world_size: DEFAULT_WORLD_SIZE,
      max_height: DEFAULT_MAX_HEIGHT,
      center: Vec2::ZERO,
      cull_padding: DEFAULT_CULL_PADDING,
    }
  }
}

/// Camera state fed to the selector each frame.
#[derive(Clone, Debug)]
pub struct ViewState {
  /// Camera position in world space.
  pub camera_position: Vec3,
  /// View frustum in world space.
  pub frustum: Frustum,
}

impl ViewState {
  pub fn new(camera_position: Vec3, frustum: Frustum) -> Self {
    Self {
      camera_position,
      frustum,
    }
  }

  /// Camera position projected onto the XZ plane.
  #[inline]
  pub fn camera_xz(&self) -> Vec2 {
    Vec2::new(self.camera_position.x, self.camera_position.z)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_matches_reference_terrain() {
    let config = TerrainConfig::default();
    assert_eq!(config.world_size, 512.0);
    assert_eq!(config.max_height, 150.0);
    assert_eq!(config.get_origin(), Vec2::splat(-256.0));
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_cell_size_halves_per_level() {
    let config = TerrainConfig::default();
    assert_eq!(config.get_cell_size(0), 512.0);
    assert_eq!(config.get_cell_size(1), 256.0);
    assert_eq!(config.get_cell_size(2), 128.0);
  }

  #[test]
  fn test_cell_bounds_follow_center() {
    let config = TerrainConfig {
      center: Vec2::new(1000.0, -1000.0),
      ..Default::default()
    };
    let bounds = config.get_cell_bounds(&RegionKey::new(2, 3, 0));
    assert_eq!(bounds.min, Vec2::new(1000.0 - 256.0 + 384.0, -1000.0 - 256.0));
    assert_eq!(bounds.max, bounds.min + Vec2::splat(128.0));
  }

  #[test]
  fn test_cull_box_spans_height_and_padding() {
    let config = TerrainConfig::default();
    let aabb = config.cull_box(&config.terrain_bounds());
    assert_eq!(aabb.min.y, -50.0);
    assert_eq!(aabb.max.y, 200.0);
    assert_eq!(aabb.min.x, -256.0);
    assert_eq!(aabb.max.z, 256.0);
  }

  #[test]
  fn test_validate_rejects_bad_sizes() {
    let config = TerrainConfig {
      world_size: 0.0,
      ..Default::default()
    };
    assert!(matches!(
      config.validate(),
      Err(LodError::InvalidTerrain { field: "world_size", .. })
    ));

    let config = TerrainConfig {
      max_height: f32::NAN,
      ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = TerrainConfig {
      cull_padding: -1.0,
      ..Default::default()
    };
    assert!(config.validate().is_err());
  }
}
