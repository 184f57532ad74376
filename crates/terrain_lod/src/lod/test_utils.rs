//! Shared camera fixtures for selection tests.

use glam::{Mat4, Vec3};

use crate::types::ViewState;
use crate::visibility::Frustum;

/// Top-down orthographic frustum enclosing the default terrain.
pub fn open_frustum() -> Frustum {
  let projection = Mat4::orthographic_rh(-1000.0, 1000.0, -1000.0, 1000.0, -1000.0, 1000.0);
  let view = Mat4::look_at_rh(Vec3::new(0.0, 500.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
  Frustum::from_view_projection(projection * view)
}

/// View with an open frustum, so only distance drives selection.
pub fn unculled_view(camera_position: Vec3) -> ViewState {
  ViewState::new(camera_position, open_frustum())
}

/// Perspective camera at `eye` looking at `target` (45 degree fov, 16:9).
pub fn look_at(eye: Vec3, target: Vec3) -> ViewState {
  let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.5, 5000.0);
  let view = Mat4::look_at_rh(eye, target, Vec3::Y);
  ViewState::new(eye, Frustum::from_view_projection(projection * view))
}
