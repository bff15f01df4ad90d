use crate::consts::{POINT_CLOSE, TANGENT_CLOSE};

use glam::DVec2;
use smallvec::{SmallVec, smallvec};
use std::f64::consts::TAU;

pub fn are_values_close(value1: f64, value2: f64, threshold: f64) -> bool {
	let delta = value1 - value2;
	delta <= threshold && delta >= -threshold
}

pub fn are_points_close(point1: DVec2, point2: DVec2, threshold: f64) -> bool {
	are_values_close(point1.x, point2.x, threshold) && are_values_close(point1.y, point2.y, threshold)
}

pub fn is_value_greater_than_with_threshold(value: f64, minimum: f64, threshold: f64) -> bool {
	!are_values_close(value, minimum, threshold) && value > minimum
}

/// Strictly greater, where values within the tangent tolerance of each other never compare as greater.
pub fn is_value_greater_than(value: f64, minimum: f64) -> bool {
	is_value_greater_than_with_threshold(value, minimum, TANGENT_CLOSE)
}

pub fn is_value_less_than(value: f64, maximum: f64) -> bool {
	!are_values_close(value, maximum, TANGENT_CLOSE) && value < maximum
}

pub fn is_value_greater_than_equal(value: f64, minimum: f64) -> bool {
	are_values_close(value, minimum, TANGENT_CLOSE) || value >= minimum
}

pub fn is_value_less_than_equal(value: f64, maximum: f64) -> bool {
	are_values_close(value, maximum, TANGENT_CLOSE) || value <= maximum
}

/// Linear interpolation written as `(1 - t) * a + t * b` so that `t == 1` lands exactly on `b`.
#[inline]
pub fn lerp(a: DVec2, b: DVec2, t: f64) -> DVec2 {
	a * (1. - t) + b * t
}

/// Twice the signed area of the triangle, positive when the points turn counter-clockwise.
pub fn counter_clockwise_turn(point1: DVec2, point2: DVec2, point3: DVec2) -> f64 {
	(point2 - point1).perp_dot(point3 - point1)
}

/// Unit normal of the line, or zero for a degenerate line.
pub fn line_normal(start: DVec2, end: DVec2) -> DVec2 {
	DVec2::new(start.y - end.y, end.x - start.x).normalize_or_zero()
}

/// Signed position of `point` along the line, measured in line lengths from `start`. Points behind `start` come out negative.
pub fn parameter_of_point_on_line(start: DVec2, end: DVec2, point: DVec2) -> f64 {
	let line_length = start.distance(end);
	let length_from_start = point.distance(start);
	let parameter = length_from_start / line_length;

	let length_from_end = point.distance(end);
	if are_values_close(line_length + length_from_start, length_from_end, POINT_CLOSE) { -parameter } else { parameter }
}

pub fn normalize_angle(mut value: f64) -> f64 {
	while value < 0. {
		value += TAU;
	}
	while value >= TAU {
		value -= TAU;
	}
	value
}

/// Angle of the vector in `[0, 2π)`. The zero vector has angle zero.
pub fn polar_angle(vector: DVec2) -> f64 {
	if vector.x == 0. && vector.y == 0. {
		return 0.;
	}
	normalize_angle(vector.y.atan2(vector.x))
}

/// Counter-clockwise sweep from `minimum` to `maximum`, wrapping through zero when `minimum > maximum`. Both ends are exclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleRange {
	pub minimum: f64,
	pub maximum: f64,
}

impl AngleRange {
	pub fn contains(&self, angle: f64) -> bool {
		if self.minimum <= self.maximum {
			return is_value_greater_than(angle, self.minimum) && is_value_less_than(angle, self.maximum);
		}
		if is_value_greater_than(angle, self.minimum) && angle <= TAU {
			return true;
		}
		angle >= 0. && is_value_less_than(angle, self.maximum)
	}
}

/// Tangent directions leaving a point along the incoming (`left`) and outgoing (`right`) side of a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentPair {
	pub left: DVec2,
	pub right: DVec2,
}

impl TangentPair {
	/// True when any tangent of one pair points the same way as any tangent of the other.
	pub fn is_ambiguous_with(&self, other: &TangentPair) -> bool {
		let [left1, right1, left2, right2] = [self.left, self.right, other.left, other.right].map(DVec2::normalize_or_zero);
		are_points_close(left1, left2, TANGENT_CLOSE) || are_points_close(left1, right2, TANGENT_CLOSE) || are_points_close(right1, left2, TANGENT_CLOSE) || are_points_close(right1, right2, TANGENT_CLOSE)
	}

	/// The paths cross when exactly one tangent of `other` lies in each of the two angular sectors that these tangents split the plane into.
	pub fn crosses(&self, other: &TangentPair) -> bool {
		let (angle1_a, angle1_b) = (polar_angle(self.left), polar_angle(self.right));
		let (angle2_a, angle2_b) = (polar_angle(other.left), polar_angle(other.right));

		let count_in = |range: AngleRange| [angle2_a, angle2_b].into_iter().filter(|&angle| range.contains(angle)).count();
		let range1 = AngleRange { minimum: angle1_a, maximum: angle1_b };
		let range2 = AngleRange { minimum: angle1_b, maximum: angle1_a };

		count_in(range1) == 1 && count_in(range2) == 1
	}
}

/// Parameters where the derivative of a one-dimensional cubic with the given coefficients vanishes. Values may fall outside `[0, 1]` or be NaN.
pub fn cubic_first_derivative_roots(a: f64, b: f64, c: f64, d: f64) -> SmallVec<[f64; 2]> {
	let denominator = -a + 3. * b - 3. * c + d;

	if are_values_close(denominator, 0., POINT_CLOSE) {
		let t = (a - b) / (2. * (a - 2. * b + c));
		return smallvec![t];
	}

	let numerator_left = -a + 2. * b - c;
	let numerator_right = -(-a * (c - d) + b * b - b * (c + d) + c * c).sqrt();

	smallvec![(numerator_left + numerator_right) / denominator, (numerator_left - numerator_right) / denominator]
}
