//! Global level state machine with asymmetric thresholds and a cooldown.
//!
//! Each level has a band of distances where it holds. Bands of neighbouring
//! levels overlap (250..350 and 550..650 by default), so a camera hovering on
//! one threshold cannot bounce between two levels. After every switch the
//! level is frozen for `switch_delay` seconds.

use crate::constants::FINEST_LEVEL;

use super::config::HysteresisConfig;

/// Current global level and remaining cooldown in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HysteresisState {
  pub level: u8,
  pub cooldown: f32,
}

impl HysteresisState {
  /// Finest level, no cooldown.
  pub const INITIAL: Self = Self {
    level: FINEST_LEVEL,
    cooldown: 0.0,
  };
}

impl Default for HysteresisState {
  fn default() -> Self {
    Self::INITIAL
  }
}

/// Advance the state machine by `dt` seconds at planar `distance`.
///
/// Returns the next state and the level to draw. At most one level step is
/// taken per call.
pub fn step(
  state: HysteresisState,
  distance: f32,
  dt: f32,
  config: &HysteresisConfig,
) -> (HysteresisState, u8) {
  let cooldown = (state.cooldown - dt.max(0.0)).max(0.0);
  if cooldown > 0.0 {
    return (
      HysteresisState {
        level: state.level,
        cooldown,
      },
      state.level,
    );
  }

  let target = match state.level {
    0 if distance < config.coarse_to_mid => 1,
    1 if distance > config.mid_to_coarse => 0,
    1 if distance < config.mid_to_fine => 2,
    2 if distance > config.fine_to_mid => 1,
    level => level,
  };

  let cooldown = if target != state.level {
    #[cfg(feature = "tracing")]
    tracing::debug!(from = state.level, to = target, distance, "global level switch");
    config.switch_delay
  } else {
    0.0
  };

  (
    HysteresisState {
      level: target,
      cooldown,
    },
    target,
  )
}

#[cfg(test)]
#[path = "hysteresis_test.rs"]
mod hysteresis_test;
