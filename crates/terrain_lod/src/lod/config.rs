//! LodConfig - thresholds and budgets for every selection strategy.
//!
//! Defaults are tuned for a 512 unit terrain with heights up to 150.

use std::f32::consts::PI;

use crate::constants::{DEFAULT_SWITCH_DELAY, MIN_ERROR_DISTANCE};
use crate::error::LodError;

use super::budget::InstanceBudget;

/// Which selection algorithm runs each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LodStrategy {
  /// One level for the whole terrain, switched with hysteresis.
  #[default]
  GlobalHysteresis,
  /// Per finest-cell level from concentric distance rings.
  DistanceRings,
  /// Quadtree refinement on projected pixel error.
  ScreenSpaceError,
}

/// Distance thresholds of the global level state machine.
///
/// ```text
///   coarse (0) ──d < 550──> mid (1) ──d < 250──> fine (2)
///   coarse (0) <──d > 650── mid (1) <──d > 350── fine (2)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HysteresisConfig {
  /// Level 0 -> 1 when closer than this.
  pub coarse_to_mid: f32,
  /// Level 1 -> 0 when farther than this.
  pub mid_to_coarse: f32,
  /// Level 1 -> 2 when closer than this.
  pub mid_to_fine: f32,
  /// Level 2 -> 1 when farther than this.
  pub fine_to_mid: f32,
  /// Seconds to hold a level after switching.
  pub switch_delay: f32,
}

impl HysteresisConfig {
  pub fn validate(&self) -> Result<(), LodError> {
    let ordered = self.mid_to_fine < self.fine_to_mid
      && self.fine_to_mid < self.coarse_to_mid
      && self.coarse_to_mid < self.mid_to_coarse;
    if !ordered {
      return Err(LodError::ThresholdOrder {
        mid_to_fine: self.mid_to_fine,
        fine_to_mid: self.fine_to_mid,
        coarse_to_mid: self.coarse_to_mid,
        mid_to_coarse: self.mid_to_coarse,
      });
    }
    if !self.switch_delay.is_finite() || self.switch_delay < 0.0 {
      return Err(LodError::InvalidSwitchDelay(self.switch_delay));
    }
    Ok(())
  }
}

impl Default for HysteresisConfig {
  fn default() -> Self {
    Self {
      coarse_to_mid: 550.0,
      mid_to_coarse: 650.0,
      mid_to_fine: 250.0,
      fine_to_mid: 350.0,
      switch_delay: DEFAULT_SWITCH_DELAY,
    }
  }
}

/// Ring radii as fractions of the terrain edge length, indexed by level.
///
/// A cell closer than `radius_scale[2] * world_size` is drawn at level 2,
/// closer than `radius_scale[1] * world_size` at level 1, otherwise at level 0.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RingConfig {
  pub radius_scale: [f32; 3],
}

impl RingConfig {
  /// World-space radii `[R0, R1, R2]` for a terrain edge length.
  #[inline]
  pub fn radii(&self, world_size: f32) -> [f32; 3] {
    self.radius_scale.map(|scale| scale * world_size)
  }

  pub fn validate(&self) -> Result<(), LodError> {
    let [coarse, mid, fine] = self.radius_scale;
    let positive = self.radius_scale.iter().all(|r| r.is_finite() && *r > 0.0);
    if !positive || !(fine < mid && mid < coarse) {
      return Err(LodError::RingOrder(self.radius_scale));
    }
    Ok(())
  }
}

impl Default for RingConfig {
  fn default() -> Self {
    Self {
      radius_scale: [2.0, 0.25, 0.10],
    }
  }
}

/// Screen-space error refinement parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScreenSpaceConfig {
  /// World-space error of each level (index = level), strictly decreasing.
  pub geometric_error: [f32; 3],
  /// Refine while the projected error exceeds this many pixels.
  pub max_pixel_error: f32,
  /// Viewport height in pixels.
  pub screen_height: f32,
  /// Vertical field of view in radians.
  pub fov_y: f32,
  /// Distances below this are clamped before dividing. At least 1.
  pub min_distance: f32,
}

impl ScreenSpaceConfig {
  pub fn validate(&self) -> Result<(), LodError> {
    let [coarse, mid, fine] = self.geometric_error;
    let positive = self.geometric_error.iter().all(|e| e.is_finite() && *e > 0.0);
    if !positive || !(coarse > mid && mid > fine) {
      return Err(LodError::GeometricErrorOrder(self.geometric_error));
    }

    let check = |field: &'static str, value: f32, ok: bool| {
      if value.is_finite() && ok {
        Ok(())
      } else {
        Err(LodError::InvalidScreenSpace { field, value })
      }
    };
    check("max_pixel_error", self.max_pixel_error, self.max_pixel_error > 0.0)?;
    check("screen_height", self.screen_height, self.screen_height > 0.0)?;
    check("fov_y", self.fov_y, self.fov_y > 0.0 && self.fov_y < PI)?;
    check("min_distance", self.min_distance, self.min_distance >= MIN_ERROR_DISTANCE)?;
    Ok(())
  }
}

impl Default for ScreenSpaceConfig {
  fn default() -> Self {
    Self {
      geometric_error: [50.0, 25.0, 12.5],
      max_pixel_error: 4.0,
      screen_height: 720.0,
      fov_y: PI * 0.25,
      min_distance: MIN_ERROR_DISTANCE,
    }
  }
}

/// Complete selector configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LodConfig {
  pub strategy: LodStrategy,
  pub hysteresis: HysteresisConfig,
  pub rings: RingConfig,
  pub screen_space: ScreenSpaceConfig,
  pub budget: InstanceBudget,
}

impl LodConfig {
  /// Default configuration running `strategy`.
  pub fn with_strategy(strategy: LodStrategy) -> Self {
    Self {
      strategy,
      ..Default::default()
    }
  }

  /// Validate every section, including those of inactive strategies.
  pub fn validate(&self) -> Result<(), LodError> {
    self.hysteresis.validate()?;
    self.rings.validate()?;
    self.screen_space.validate()?;
    self.budget.validate()?;
    Ok(())
  }
}

impl Default for LodConfig {
  fn default() -> Self {
    Self {
      strategy: LodStrategy::default(),
      hysteresis: HysteresisConfig::default(),
      rings: RingConfig::default(),
      screen_space: ScreenSpaceConfig::default(),
      budget: InstanceBudget::default(),
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
