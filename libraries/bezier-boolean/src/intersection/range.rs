use super::Intersection;
use crate::consts::PARAMETER_CLOSE;
use crate::curve::{Curve, SplitSubcurves};
use crate::util::math::are_values_close;
use crate::util::range::ParameterRange;

use std::cell::OnceCell;

/// A stretch where two curves run along each other, recorded as a parameter range on each.
/// `reversed` is set when the second curve runs through the overlap in the opposite direction.
#[derive(Clone, Debug)]
pub struct IntersectRange {
	curve1: Curve,
	range1: ParameterRange,
	curve2: Curve,
	range2: ParameterRange,
	reversed: bool,
	split1: OnceCell<SplitSubcurves>,
	split2: OnceCell<SplitSubcurves>,
}

impl IntersectRange {
	pub fn new(curve1: Curve, range1: ParameterRange, curve2: Curve, range2: ParameterRange, reversed: bool) -> Self {
		Self {
			curve1,
			range1,
			curve2,
			range2,
			reversed,
			split1: OnceCell::new(),
			split2: OnceCell::new(),
		}
	}

	pub fn curve1(&self) -> &Curve {
		&self.curve1
	}

	pub fn range1(&self) -> ParameterRange {
		self.range1
	}

	pub fn curve2(&self) -> &Curve {
		&self.curve2
	}

	pub fn range2(&self) -> ParameterRange {
		self.range2
	}

	pub fn is_reversed(&self) -> bool {
		self.reversed
	}

	fn split1(&self) -> &SplitSubcurves {
		self.split1.get_or_init(|| self.curve1.split_subcurves(self.range1))
	}

	fn split2(&self) -> &SplitSubcurves {
		self.split2.get_or_init(|| self.curve2.split_subcurves(self.range2))
	}

	/// Part of the first curve before the overlap.
	pub fn curve1_left(&self) -> &Curve {
		&self.split1().left
	}

	/// Part of the first curve covered by the overlap.
	pub fn curve1_overlapping(&self) -> &Curve {
		&self.split1().middle
	}

	/// Part of the first curve after the overlap.
	pub fn curve1_right(&self) -> &Curve {
		&self.split1().right
	}

	pub fn curve2_left(&self) -> &Curve {
		&self.split2().left
	}

	pub fn curve2_overlapping(&self) -> &Curve {
		&self.split2().middle
	}

	pub fn curve2_right(&self) -> &Curve {
		&self.split2().right
	}

	pub fn is_at_start_of_curve1(&self) -> bool {
		are_values_close(self.range1.min, 0., PARAMETER_CLOSE)
	}

	pub fn is_at_stop_of_curve1(&self) -> bool {
		are_values_close(self.range1.max, 1., PARAMETER_CLOSE)
	}

	pub fn is_at_start_of_curve2(&self) -> bool {
		are_values_close(self.range2.min, 0., PARAMETER_CLOSE)
	}

	pub fn is_at_stop_of_curve2(&self) -> bool {
		are_values_close(self.range2.max, 1., PARAMETER_CLOSE)
	}

	/// The intersection halfway through the overlap on both curves.
	pub fn middle_intersection(&self) -> Intersection {
		Intersection::new(self.curve1.clone(), self.range1.average(), self.curve2.clone(), self.range2.average())
	}

	/// Grows both ranges to also cover `other`.
	pub fn merge(&mut self, other: &IntersectRange) {
		self.range1 = self.range1.union(&other.range1);
		self.range2 = self.range2.union(&other.range2);
		self.split1 = OnceCell::new();
		self.split2 = OnceCell::new();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::{compare_f64s, compare_points};
	use glam::DVec2;

	fn overlap() -> IntersectRange {
		let curve1 = Curve::line(DVec2::new(0., 0.), DVec2::new(10., 0.));
		let curve2 = Curve::line(DVec2::new(5., 0.), DVec2::new(15., 0.));
		IntersectRange::new(curve1, ParameterRange::new(0.5, 1.), curve2, ParameterRange::new(0., 0.5), false)
	}

	#[test]
	fn test_pieces() {
		let range = overlap();
		assert!(compare_points(range.curve1_left().end(), DVec2::new(5., 0.)));
		assert!(compare_points(range.curve1_overlapping().start(), DVec2::new(5., 0.)));
		assert!(compare_points(range.curve2_overlapping().end(), DVec2::new(10., 0.)));
		assert!(compare_points(range.curve2_right().start(), DVec2::new(10., 0.)));
		assert!(range.is_at_stop_of_curve1());
		assert!(range.is_at_start_of_curve2());
		assert!(!range.is_at_start_of_curve1());
	}

	#[test]
	fn test_middle_intersection() {
		let middle = overlap().middle_intersection();
		assert!(compare_f64s(middle.parameter1(), 0.75));
		assert!(compare_f64s(middle.parameter2(), 0.25));
		assert!(compare_points(middle.location(), DVec2::new(7.5, 0.)));
	}

	#[test]
	fn test_merge_resets_pieces() {
		let mut range = overlap();
		assert!(compare_points(range.curve1_left().end(), DVec2::new(5., 0.)));

		let other = IntersectRange::new(range.curve1().clone(), ParameterRange::new(0.3, 0.6), range.curve2().clone(), ParameterRange::new(0., 0.1), false);
		range.merge(&other);
		assert_eq!(range.range1(), ParameterRange::new(0.3, 1.));
		assert!(compare_points(range.curve1_left().end(), DVec2::new(3., 0.)));
	}
}
