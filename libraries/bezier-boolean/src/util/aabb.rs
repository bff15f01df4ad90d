use crate::consts::BOUNDS_CLOSE;
use crate::util::math::is_value_greater_than_with_threshold;

use glam::{BVec2, DVec2};

/// An axis-aligned bounding box. The default box is empty: its minimum is positive infinity and its maximum negative infinity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
	min: DVec2,
	max: DVec2,
}

impl Default for Aabb {
	fn default() -> Self {
		Self {
			min: DVec2::INFINITY,
			max: DVec2::NEG_INFINITY,
		}
	}
}

impl Aabb {
	pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
		Aabb {
			min: DVec2::new(left, top),
			max: DVec2::new(right, bottom),
		}
	}

	/// Smallest box containing every point in `points`.
	pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Self {
		points.into_iter().fold(Self::default(), |bounds, point| bounds.extended_to(point))
	}

	#[inline]
	pub fn min(&self) -> DVec2 {
		self.min
	}
	#[inline]
	pub fn max(&self) -> DVec2 {
		self.max
	}
	#[inline]
	pub fn top(&self) -> f64 {
		self.min.y
	}
	#[inline]
	pub fn left(&self) -> f64 {
		self.min.x
	}
	#[inline]
	pub fn right(&self) -> f64 {
		self.max.x
	}
	#[inline]
	pub fn bottom(&self) -> f64 {
		self.max.y
	}
	#[inline]
	pub fn width(&self) -> f64 {
		self.max.x - self.min.x
	}
	#[inline]
	pub fn height(&self) -> f64 {
		self.max.y - self.min.y
	}

	pub fn center(&self) -> DVec2 {
		(self.min + self.max) / 2.
	}

	/// True for the default box that no point has been added to.
	pub fn is_empty(&self) -> bool {
		self.min.cmpgt(self.max).any()
	}

	#[must_use]
	pub fn union(&self, other: &Aabb) -> Aabb {
		Aabb {
			min: self.min.min(other.min),
			max: self.max.max(other.max),
		}
	}

	#[must_use]
	pub fn extended_to(&self, point: DVec2) -> Aabb {
		Aabb {
			min: self.min.min(point),
			max: self.max.max(point),
		}
	}

	#[must_use]
	pub fn expanded(&self, padding: f64) -> Aabb {
		Aabb {
			min: self.min - DVec2::splat(padding),
			max: self.max + DVec2::splat(padding),
		}
	}

	pub fn contains_point(&self, point: DVec2) -> bool {
		(self.min.cmple(point) & point.cmple(self.max)) == BVec2::TRUE
	}

	/// Whether the two boxes overlap once a small tolerance is allowed for, so that boxes which touch or nearly touch still count.
	pub fn might_overlap(&self, other: &Aabb) -> bool {
		let left = self.min.x.max(other.min.x);
		let right = self.max.x.min(other.max.x);
		if is_value_greater_than_with_threshold(left, right, BOUNDS_CLOSE) {
			return false;
		}

		let top = self.min.y.max(other.min.y);
		let bottom = self.max.y.min(other.max.y);
		!is_value_greater_than_with_threshold(top, bottom, BOUNDS_CLOSE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_is_empty() {
		let bounds = Aabb::default();
		assert!(bounds.is_empty());
		assert!(!bounds.contains_point(DVec2::ZERO));
		assert!(!bounds.extended_to(DVec2::ONE).is_empty());
	}

	#[test]
	fn test_from_points() {
		let bounds = Aabb::from_points([DVec2::new(3., -1.), DVec2::new(-2., 4.), DVec2::new(0., 0.)]);
		assert_eq!(bounds, Aabb::new(-2., -1., 3., 4.));
		assert_eq!(bounds.width(), 5.);
		assert_eq!(bounds.height(), 5.);
		assert_eq!(bounds.center(), DVec2::new(0.5, 1.5));
	}

	#[test]
	fn test_might_overlap_allows_touching_boxes() {
		let a = Aabb::new(0., 0., 10., 10.);
		let touching = Aabb::new(10., 0., 20., 10.);
		let nearly_touching = Aabb::new(10. + 1e-10, 0., 20., 10.);
		let apart = Aabb::new(10.1, 0., 20., 10.);

		assert!(a.might_overlap(&touching));
		assert!(a.might_overlap(&nearly_touching));
		assert!(!a.might_overlap(&apart));
		assert!(!a.might_overlap(&Aabb::new(0., 11., 10., 20.)));
	}

	#[test]
	fn test_union_and_expand() {
		let a = Aabb::new(0., 0., 1., 1.);
		let b = Aabb::new(2., -1., 3., 0.5);
		assert_eq!(a.union(&b), Aabb::new(0., -1., 3., 1.));
		assert_eq!(a.expanded(1.), Aabb::new(-1., -1., 2., 2.));
		assert_eq!(Aabb::default().union(&a), a);
	}
}
