use crate::consts::POINT_CLOSE;
use crate::util::math::are_values_close;

use glam::DVec2;

/// A line in the implicit form `a·x + b·y + c = 0`, scaled so that `(a, b)` is a unit vector. `distance_from_point` is then the signed distance to the line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedLine {
	pub a: f64,
	pub b: f64,
	pub c: f64,
}

impl NormalizedLine {
	pub const fn new(a: f64, b: f64, c: f64) -> Self {
		Self { a, b, c }
	}

	/// Line through both points. Coincident points produce the all-zero line.
	pub fn through(point1: DVec2, point2: DVec2) -> Self {
		let a = point1.y - point2.y;
		let b = point2.x - point1.x;
		let c = point1.x * point2.y - point2.x * point1.y;

		let distance = (a * a + b * b).sqrt();
		if distance == 0. {
			return Self::new(0., 0., 0.);
		}
		Self::new(a / distance, b / distance, c / distance)
	}

	#[must_use]
	pub fn with_offset(&self, offset: f64) -> Self {
		Self::new(self.a, self.b, self.c + offset)
	}

	pub fn distance_from_point(&self, point: DVec2) -> f64 {
		self.a * point.x + self.b * point.y + self.c
	}

	/// Point where the two lines meet. Parallel lines produce non-finite coordinates.
	pub fn intersection_with(&self, other: &NormalizedLine) -> DVec2 {
		let denominator = self.a * other.b - other.a * self.b;
		DVec2::new((self.b * other.c - other.b * self.c) / denominator, (other.a * self.c - self.a * other.c) / denominator)
	}
}

/// Intersection of the infinite lines through the two segments, if they are not parallel.
pub fn lines_intersect(line1_start: DVec2, line1_end: DVec2, line2_start: DVec2, line2_end: DVec2) -> Option<DVec2> {
	let line1 = NormalizedLine::through(line1_start, line1_end);
	let line2 = NormalizedLine::through(line2_start, line2_end);
	let intersection = line1.intersection_with(&line2);
	intersection.is_finite().then_some(intersection)
}

/// Where the segment meets the horizontal line at `y`, if the line falls within the segment's vertical span.
pub fn line_intersects_horizontal_line(start: DVec2, end: DVec2, y: f64) -> Option<DVec2> {
	let min_y = start.y.min(end.y);
	let max_y = start.y.max(end.y);
	if (y < min_y && !are_values_close(y, min_y, POINT_CLOSE)) || (y > max_y && !are_values_close(y, max_y, POINT_CLOSE)) {
		return None;
	}

	if start.x == end.x {
		return Some(DVec2::new(start.x, y));
	}
	let slope = (end.y - start.y) / (end.x - start.x);
	Some(DVec2::new((y - start.y) / slope + start.x, y))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::{compare_f64s, compare_points};

	#[test]
	fn test_signed_distance() {
		let line = NormalizedLine::through(DVec2::new(0., 0.), DVec2::new(10., 0.));
		assert!(compare_f64s(line.distance_from_point(DVec2::new(5., 3.)).abs(), 3.));
		assert!(compare_f64s(line.distance_from_point(DVec2::new(5., -3.)), -line.distance_from_point(DVec2::new(5., 3.))));
		assert_eq!(NormalizedLine::through(DVec2::ONE, DVec2::ONE), NormalizedLine::new(0., 0., 0.));
	}

	#[test]
	fn test_lines_intersect() {
		let point = lines_intersect(DVec2::new(0., 0.), DVec2::new(10., 10.), DVec2::new(0., 10.), DVec2::new(10., 0.));
		assert!(point.is_some_and(|point| compare_points(point, DVec2::new(5., 5.))));

		let offset = lines_intersect(DVec2::new(0., 2.), DVec2::new(4., 6.), DVec2::new(0., 10.), DVec2::new(10., 0.));
		assert!(offset.is_some_and(|point| compare_points(point, DVec2::new(4., 6.))));

		assert!(lines_intersect(DVec2::new(0., 0.), DVec2::new(10., 0.), DVec2::new(0., 1.), DVec2::new(10., 1.)).is_none());
	}

	#[test]
	fn test_line_intersects_horizontal_line() {
		let point = line_intersects_horizontal_line(DVec2::new(0., 0.), DVec2::new(4., 8.), 4.);
		assert!(point.is_some_and(|point| compare_points(point, DVec2::new(2., 4.))));
		assert_eq!(line_intersects_horizontal_line(DVec2::new(3., 0.), DVec2::new(3., 8.), 1.), Some(DVec2::new(3., 1.)));
		assert!(line_intersects_horizontal_line(DVec2::new(0., 0.), DVec2::new(4., 8.), 9.).is_none());
	}
}
