//! View frustum and bounding boxes for visibility culling.
//!
//! Planes are stored as `Vec4(nx, ny, nz, d)` with normals pointing into the
//! frustum and unit length, so `dot(n, p) + d` is a signed distance that is
//! positive inside.
//!
//! Extraction assumes a `[0, 1]` clip depth range (glam's `perspective_*`
//! and `orthographic_*` conventions).

use glam::{Mat4, Vec3, Vec4};

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  pub min: Vec3,
  pub max: Vec3,
}

impl Aabb {
  /// # Panics
  /// Debug-asserts that min <= max on every axis.
  pub fn new(min: Vec3, max: Vec3) -> Self {
    debug_assert!(min.cmple(max).all(), "aabb min must be <= max");
    Self { min, max }
  }

  #[inline]
  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  #[inline]
  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }

  /// Boundary included.
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }
}

/// Result of testing a box against the frustum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
  /// Fully behind at least one plane.
  Outside,
  /// Straddles one or more planes.
  Intersects,
  /// In front of every plane.
  Inside,
}

/// Six-plane view frustum: left, right, bottom, top, near, far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
  pub planes: [Vec4; 6],
}

impl Frustum {
  /// Extract world-space planes from a combined `projection * view` matrix.
  pub fn from_view_projection(view_projection: Mat4) -> Self {
    let r0 = view_projection.row(0);
    let r1 = view_projection.row(1);
    let r2 = view_projection.row(2);
    let r3 = view_projection.row(3);

    Self {
      planes: [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r2, r3 - r2].map(normalize_plane),
    }
  }

  /// View-space planes of a projection matrix.
  ///
  /// Combine with [`Frustum::transformed`] to move them into world space.
  pub fn from_projection(projection: Mat4) -> Self {
    Self::from_view_projection(projection)
  }

  /// Planes mapped through `transform` (e.g. world-from-view).
  ///
  /// Planes are covectors, so they go through the inverse transpose.
  pub fn transformed(&self, transform: Mat4) -> Self {
    let plane_matrix = transform.inverse().transpose();
    Self {
      planes: self.planes.map(|plane| normalize_plane(plane_matrix * plane)),
    }
  }

  /// Classify a box against all six planes.
  ///
  /// Uses the positive/negative vertex of the box along each plane normal, so
  /// each plane costs two dot products.
  pub fn classify(&self, aabb: &Aabb) -> Containment {
    let mut result = Containment::Inside;

    for plane in &self.planes {
      let normal = plane.truncate();
      let facing = normal.cmpge(Vec3::ZERO);

      let positive = Vec3::select(facing, aabb.max, aabb.min);
      if normal.dot(positive) + plane.w < 0.0 {
        return Containment::Outside;
      }

      let negative = Vec3::select(facing, aabb.min, aabb.max);
      if normal.dot(negative) + plane.w < 0.0 {
        result = Containment::Intersects;
      }
    }

    result
  }

  /// True unless the box is fully outside.
  #[inline]
  pub fn intersects(&self, aabb: &Aabb) -> bool {
    self.classify(aabb) != Containment::Outside
  }

  /// True if the point is on the inner side of every plane.
  pub fn contains_point(&self, point: Vec3) -> bool {
    self
      .planes
      .iter()
      .all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
  }
}

#[inline]
fn normalize_plane(plane: Vec4) -> Vec4 {
  let length = plane.truncate().length();
  if length > f32::EPSILON {
    plane / length
  } else {
    plane
  }
}

#[cfg(test)]
mod tests {
  use std::f32::consts::FRAC_PI_2;

  use super::*;

  /// Camera at the origin looking down -Z.
  fn forward_frustum() -> Frustum {
    let projection = Mat4::perspective_rh(FRAC_PI_2, 1.0, 0.1, 100.0);
    Frustum::from_view_projection(projection)
  }

  fn unit_box_at(center: Vec3) -> Aabb {
    Aabb::new(center - Vec3::splat(0.5), center + Vec3::splat(0.5))
  }

  #[test]
  fn test_planes_are_normalized() {
    for plane in forward_frustum().planes {
      assert!((plane.truncate().length() - 1.0).abs() < 1e-5);
    }
  }

  #[test]
  fn test_box_in_front_is_inside() {
    let frustum = forward_frustum();
    assert_eq!(frustum.classify(&unit_box_at(Vec3::new(0.0, 0.0, -10.0))), Containment::Inside);
    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -10.0)));
  }

  #[test]
  fn test_box_behind_is_culled() {
    let frustum = forward_frustum();
    assert_eq!(frustum.classify(&unit_box_at(Vec3::new(0.0, 0.0, 10.0))), Containment::Outside);
    assert!(!frustum.intersects(&unit_box_at(Vec3::new(0.0, 0.0, 10.0))));
  }

  #[test]
  fn test_box_beyond_far_or_beside_is_culled() {
    let frustum = forward_frustum();
    assert!(!frustum.intersects(&unit_box_at(Vec3::new(0.0, 0.0, -200.0))));
    // 90 degree fov: at depth 10 the half width is 10
    assert!(!frustum.intersects(&unit_box_at(Vec3::new(20.0, 0.0, -10.0))));
  }

  #[test]
  fn test_box_across_side_plane_intersects() {
    let frustum = forward_frustum();
    let aabb = unit_box_at(Vec3::new(10.0, 0.0, -10.0));
    assert_eq!(frustum.classify(&aabb), Containment::Intersects);
  }

  /// No corner of the box is inside, yet it encloses the whole frustum.
  #[test]
  fn test_box_enclosing_frustum_is_visible() {
    let frustum = forward_frustum();
    let aabb = Aabb::new(Vec3::splat(-500.0), Vec3::splat(500.0));
    assert!(frustum.intersects(&aabb));
  }

  /// View-space extraction moved to world space agrees with extracting from
  /// the combined matrix.
  #[test]
  fn test_transformed_matches_combined_extraction() {
    let projection = Mat4::perspective_rh(0.8, 16.0 / 9.0, 0.5, 2000.0);
    let view = Mat4::look_at_rh(Vec3::new(40.0, 250.0, -200.0), Vec3::new(0.0, 0.0, 50.0), Vec3::Y);

    let combined = Frustum::from_view_projection(projection * view);
    let moved = Frustum::from_projection(projection).transformed(view.inverse());

    // Far plane offsets are in the thousands, so d gets a relative tolerance
    for (a, b) in combined.planes.iter().zip(moved.planes.iter()) {
      assert!(a.truncate().abs_diff_eq(b.truncate(), 1e-3), "{:?} vs {:?}", a, b);
      assert!((a.w - b.w).abs() <= 1e-4 * a.w.abs().max(1.0), "{:?} vs {:?}", a, b);
    }
  }

  #[test]
  fn test_aabb_helpers() {
    let aabb = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 4.0, 6.0));
    assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 4.0));
    assert_eq!(aabb.size(), Vec3::splat(4.0));
    assert!(aabb.contains_point(Vec3::new(3.0, 4.0, 6.0)));
    assert!(!aabb.contains_point(Vec3::new(3.1, 4.0, 6.0)));
  }
}
