//! Axis-aligned XZ rectangle describing a tile footprint.

use glam::{Vec2, Vec3};

use crate::visibility::Aabb;

/// Axis-aligned footprint on the XZ plane.
///
/// `min.y` / `max.y` hold world Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileBounds {
	/// Minimum corner (inclusive).
	pub min: Vec2,
	/// Maximum corner (inclusive).
	pub max: Vec2,
}

impl TileBounds {
	/// Create bounds from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on both axes.
	pub fn new(min: Vec2, max: Vec2) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y,
			"bounds min must be <= max on both axes"
		);
		Self { min, max }
	}

	/// Get the size of the bounds (max - min).
	#[inline]
	pub fn size(&self) -> Vec2 {
		self.max - self.min
	}

	/// Get the center of the bounds.
	#[inline]
	pub fn center(&self) -> Vec2 {
		(self.min + self.max) * 0.5
	}

	/// Check if the bounds contain an XZ point (boundary included).
	#[inline]
	pub fn contains_point(&self, point: Vec2) -> bool {
		point.cmpge(self.min).all() && point.cmple(self.max).all()
	}

	/// Distance from an XZ point to the closest point of the rectangle.
	///
	/// Zero when the point lies inside; otherwise the distance to the nearest
	/// edge or corner.
	#[inline]
	pub fn distance_to_point(&self, point: Vec2) -> f32 {
		let below = (self.min - point).max(Vec2::ZERO);
		let above = (point - self.max).max(Vec2::ZERO);
		(below + above).length()
	}

	/// Extrude the footprint into a 3D box spanning `min_y..=max_y`.
	#[inline]
	pub fn extrude(&self, min_y: f32, max_y: f32) -> Aabb {
		Aabb::new(
			Vec3::new(self.min.x, min_y, self.min.y),
			Vec3::new(self.max.x, max_y, self.max.y),
		)
	}

	/// Split into 4 equal quadrants in SW, SE, NW, NE order.
	pub fn quadrants(&self) -> [TileBounds; 4] {
		let mid = self.center();
		[
			TileBounds::new(self.min, mid),
			TileBounds::new(Vec2::new(mid.x, self.min.y), Vec2::new(self.max.x, mid.y)),
			TileBounds::new(Vec2::new(self.min.x, mid.y), Vec2::new(mid.x, self.max.y)),
			TileBounds::new(mid, self.max),
		]
	}
}
