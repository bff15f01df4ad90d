mod engine;
mod range;

pub use range::IntersectRange;

use crate::consts::{PARAMETER_CLOSE, POINT_NEAR};
use crate::curve::Curve;
use crate::util::math::{are_points_close, are_values_close};

use glam::DVec2;
use std::cell::OnceCell;

/// A point where two curves meet, recorded as a parameter on each.
///
/// The split point and the halves of each curve on either side of it are computed on first use.
#[derive(Clone, Debug)]
pub struct Intersection {
	curve1: Curve,
	parameter1: f64,
	curve2: Curve,
	parameter2: f64,
	split1: OnceCell<(DVec2, Curve, Curve)>,
	split2: OnceCell<(DVec2, Curve, Curve)>,
}

impl Intersection {
	pub fn new(curve1: Curve, parameter1: f64, curve2: Curve, parameter2: f64) -> Self {
		Self {
			curve1,
			parameter1,
			curve2,
			parameter2,
			split1: OnceCell::new(),
			split2: OnceCell::new(),
		}
	}

	pub fn curve1(&self) -> &Curve {
		&self.curve1
	}

	pub fn parameter1(&self) -> f64 {
		self.parameter1
	}

	pub fn curve2(&self) -> &Curve {
		&self.curve2
	}

	pub fn parameter2(&self) -> f64 {
		self.parameter2
	}

	fn split1(&self) -> &(DVec2, Curve, Curve) {
		self.split1.get_or_init(|| self.curve1.split(self.parameter1))
	}

	fn split2(&self) -> &(DVec2, Curve, Curve) {
		self.split2.get_or_init(|| self.curve2.split(self.parameter2))
	}

	/// The intersection point, evaluated on the first curve.
	pub fn location(&self) -> DVec2 {
		self.split1().0
	}

	/// Part of the first curve before the intersection.
	pub fn curve1_left(&self) -> &Curve {
		&self.split1().1
	}

	/// Part of the first curve after the intersection.
	pub fn curve1_right(&self) -> &Curve {
		&self.split1().2
	}

	pub fn curve2_left(&self) -> &Curve {
		&self.split2().1
	}

	pub fn curve2_right(&self) -> &Curve {
		&self.split2().2
	}

	pub fn is_at_start_of_curve1(&self) -> bool {
		are_values_close(self.parameter1, 0., PARAMETER_CLOSE) || self.curve1.is_point()
	}

	pub fn is_at_stop_of_curve1(&self) -> bool {
		are_values_close(self.parameter1, 1., PARAMETER_CLOSE) || self.curve1.is_point()
	}

	pub fn is_at_endpoint_of_curve1(&self) -> bool {
		self.is_at_start_of_curve1() || self.is_at_stop_of_curve1()
	}

	pub fn is_at_start_of_curve2(&self) -> bool {
		are_values_close(self.parameter2, 0., PARAMETER_CLOSE) || self.curve2.is_point()
	}

	pub fn is_at_stop_of_curve2(&self) -> bool {
		are_values_close(self.parameter2, 1., PARAMETER_CLOSE) || self.curve2.is_point()
	}

	pub fn is_at_endpoint_of_curve2(&self) -> bool {
		self.is_at_start_of_curve2() || self.is_at_stop_of_curve2()
	}

	pub fn is_at_endpoint(&self) -> bool {
		self.is_at_endpoint_of_curve1() || self.is_at_endpoint_of_curve2()
	}

	/// Whether the curves touch here rather than cross: some tangent of one curve points the same way as a tangent of the other.
	/// Intersections at an endpoint of either curve are never reported as tangent.
	pub fn is_tangent(&self) -> bool {
		if self.is_at_endpoint() {
			return false;
		}

		let curve1_left = (self.curve1_left().handle_end() - self.curve1_left().end()).normalize_or_zero();
		let curve1_right = (self.curve1_right().handle_start() - self.curve1_right().start()).normalize_or_zero();
		let curve2_left = (self.curve2_left().handle_end() - self.curve2_left().end()).normalize_or_zero();
		let curve2_right = (self.curve2_right().handle_start() - self.curve2_right().start()).normalize_or_zero();

		[curve1_left, curve1_right]
			.into_iter()
			.any(|tangent1| are_points_close(tangent1, curve2_left, POINT_NEAR) || are_points_close(tangent1, curve2_right, POINT_NEAR))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::compare_points;

	#[test]
	fn test_location_and_halves() {
		let horizontal = Curve::line(DVec2::new(0., 5.), DVec2::new(10., 5.));
		let vertical = Curve::line(DVec2::new(4., 0.), DVec2::new(4., 10.));
		let intersection = Intersection::new(horizontal, 0.4, vertical, 0.5);

		assert!(compare_points(intersection.location(), DVec2::new(4., 5.)));
		assert!(compare_points(intersection.curve1_left().end(), DVec2::new(4., 5.)));
		assert!(compare_points(intersection.curve2_right().start(), DVec2::new(4., 5.)));
		assert!(!intersection.is_at_endpoint());
		assert!(!intersection.is_tangent());
	}

	#[test]
	fn test_endpoint_flags() {
		let a = Curve::line(DVec2::new(0., 0.), DVec2::new(10., 0.));
		let b = Curve::line(DVec2::new(10., 0.), DVec2::new(10., 10.));
		let intersection = Intersection::new(a, 1. - 1e-6, b, 0.);
		assert!(intersection.is_at_stop_of_curve1());
		assert!(!intersection.is_at_start_of_curve1());
		assert!(intersection.is_at_start_of_curve2());
		assert!(intersection.is_at_endpoint());
	}

	#[test]
	fn test_tangent_touch() {
		// A circle-like arch touching a line from below at its peak
		let arch = Curve::new(DVec2::new(0., 0.), DVec2::new(0., 10.), DVec2::new(10., 10.), DVec2::new(10., 0.));
		let line = Curve::line(DVec2::new(-5., 7.5), DVec2::new(15., 7.5));
		let intersection = Intersection::new(arch, 0.5, line, 0.5);
		assert!(intersection.is_tangent());
	}
}
