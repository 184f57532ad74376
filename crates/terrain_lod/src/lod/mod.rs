//! Per-frame level-of-detail selection.
//!
//! [`TerrainLodSelector`] owns the static region tree and the only state that
//! survives between frames (the global hysteresis). Each call to
//! [`TerrainLodSelector::select`] rebuilds the tile list from scratch.
//!
//! # Strategies
//!
//! - [`LodStrategy::GlobalHysteresis`]: one level for the whole terrain from
//!   the planar camera distance to the terrain center
//! - [`LodStrategy::DistanceRings`]: per finest-cell level from point-to-box
//!   distance
//! - [`LodStrategy::ScreenSpaceError`]: quadtree refinement on projected error
//!
//! # Module Structure
//!
//! - [`config`]: `LodConfig` and per-strategy parameters
//! - [`hysteresis`]: `HysteresisState` and the pure `step` transition
//! - [`global`], [`rings`], [`screen_space`]: the three selection passes
//! - [`budget`]: instance capacity, truncation policy and statistics

pub mod budget;
pub mod config;
pub mod global;
pub mod hysteresis;
pub mod rings;
pub mod screen_space;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports
pub use budget::{InstanceBudget, SelectionStats, TruncationPolicy};
pub use config::{HysteresisConfig, LodConfig, LodStrategy, RingConfig, ScreenSpaceConfig};
pub use hysteresis::{step, HysteresisState};
pub use screen_space::screen_space_error;

use glam::{Vec2, Vec3};

use crate::error::LodError;
use crate::region::QuadTree;
use crate::tile::{fill_instances, SelectedTile, TileInstance};
use crate::types::{TerrainConfig, ViewState};

/// Output of one selection pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
  /// Tiles to draw, in strategy order.
  pub tiles: Vec<SelectedTile>,
  pub stats: SelectionStats,
}

impl Selection {
  #[inline]
  pub fn len(&self) -> usize {
    self.tiles.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.tiles.is_empty()
  }
}

/// Terrain LOD selector: static tree plus frame-to-frame state.
#[derive(Clone, Debug)]
pub struct TerrainLodSelector {
  terrain: TerrainConfig,
  config: LodConfig,
  tree: QuadTree,
  hysteresis: HysteresisState,
}

impl TerrainLodSelector {
  /// Validate both configurations and build the region tree.
  pub fn new(terrain: TerrainConfig, config: LodConfig) -> Result<Self, LodError> {
    terrain.validate()?;
    config.validate()?;
    let tree = QuadTree::build(&terrain);
    Ok(Self {
      terrain,
      config,
      tree,
      hysteresis: HysteresisState::INITIAL,
    })
  }

  pub fn terrain(&self) -> &TerrainConfig {
    &self.terrain
  }

  pub fn config(&self) -> &LodConfig {
    &self.config
  }

  pub fn tree(&self) -> &QuadTree {
    &self.tree
  }

  /// Current global level state (only advanced by the hysteresis strategy).
  pub fn hysteresis_state(&self) -> HysteresisState {
    self.hysteresis
  }

  /// Switch strategy without rebuilding. Hysteresis restarts from its
  /// initial state.
  pub fn set_strategy(&mut self, strategy: LodStrategy) {
    self.config.strategy = strategy;
    self.hysteresis = HysteresisState::INITIAL;
  }

  /// Select the tiles to draw this frame.
  ///
  /// `dt` is the frame time in seconds; only the hysteresis strategy uses it.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "lod::select"))]
  pub fn select(&mut self, view: &ViewState, dt: f32) -> Selection {
    let mut selection = Selection::default();
    let tiles = &mut selection.tiles;
    let stats = &mut selection.stats;

    match self.config.strategy {
      LodStrategy::GlobalHysteresis => {
        let distance = global::planar_distance(&self.terrain, view.camera_xz());
        let previous = self.hysteresis.level;
        let (next, level) = step(self.hysteresis, distance, dt, &self.config.hysteresis);
        self.hysteresis = next;
        stats.level_switched = level != previous;

        global::select_level(&self.tree, &self.terrain, level, &view.frustum, tiles, stats);
      }
      LodStrategy::DistanceRings => {
        let radii = self.config.rings.radii(self.terrain.world_size);
        rings::select_rings(&self.terrain, &radii, view.camera_xz(), &view.frustum, tiles, stats);
      }
      LodStrategy::ScreenSpaceError => {
        screen_space::select_screen_space(
          &self.tree,
          &self.terrain,
          &self.config.screen_space,
          view.camera_position,
          &view.frustum,
          tiles,
          stats,
        );
      }
    }

    selection
  }

  /// Instance records for a selection, cut to the configured capacity.
  pub fn instances(&self, selection: &Selection, camera_position: Vec3) -> Vec<TileInstance> {
    let camera_xz = Vec2::new(camera_position.x, camera_position.z);
    fill_instances(&selection.tiles, &self.config.budget, camera_xz)
  }
}
