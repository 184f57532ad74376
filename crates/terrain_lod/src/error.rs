//! Configuration errors.
//!
//! Selection itself never fails. Everything that can go wrong is caught once,
//! when a selector or mesh is built from configuration.

use thiserror::Error;

/// Error raised while validating terrain or LOD configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LodError {
  /// Terrain edge length or height is zero, negative or not finite.
  #[error("terrain {field} must be positive and finite, got {value}")]
  InvalidTerrain { field: &'static str, value: f32 },

  /// Hysteresis thresholds are not strictly ordered.
  #[error(
    "hysteresis thresholds must satisfy mid_to_fine ({mid_to_fine}) < fine_to_mid ({fine_to_mid}) \
     < coarse_to_mid ({coarse_to_mid}) < mid_to_coarse ({mid_to_coarse})"
  )]
  ThresholdOrder {
    mid_to_fine: f32,
    fine_to_mid: f32,
    coarse_to_mid: f32,
    mid_to_coarse: f32,
  },

  /// Switch delay is negative or not finite.
  #[error("switch delay must be >= 0, got {0}")]
  InvalidSwitchDelay(f32),

  /// Ring radii are not strictly ascending from fine to coarse.
  #[error("ring radii must satisfy fine < mid < coarse, got {0:?}")]
  RingOrder([f32; 3]),

  /// Geometric error does not strictly decrease towards finer levels.
  #[error("geometric error must strictly decrease with level, got {0:?}")]
  GeometricErrorOrder([f32; 3]),

  /// A screen-space error parameter is out of range.
  #[error("screen-space error {field} out of range: {value}")]
  InvalidScreenSpace { field: &'static str, value: f32 },

  /// Instance budget cannot hold a single tile.
  #[error("instance capacity must be at least 1")]
  ZeroInstanceCapacity,

  /// Patch mesh needs at least two vertices per side.
  #[error("patch grid size must be >= 2, got {0}")]
  InvalidGridSize(u32),
}
