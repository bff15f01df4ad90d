use super::*;
use crate::util::math::lerp;
use crate::util::roots::find_bezier_roots;

// Products of the binomial coefficients of the degree 5 distance polynomial, indexed by the derivative and curve control point
const DISTANCE_POLYNOMIAL_WEIGHTS: [[f64; 4]; 3] = [[1., 0.6, 0.3, 0.1], [0.4, 0.6, 0.6, 0.4], [0.1, 0.3, 0.6, 1.]];

/// Functionality that solves for information about points on the curve, such as closest locations and tangents.
impl Curve {
	/// The degree 5 Bézier function, in `(parameter, value)` form, whose roots are where `(B(t) - point) · B'(t) = 0`.
	fn distance_polynomial(&self, point: DVec2) -> [DVec2; 6] {
		let points = self.points();
		let distances = points.map(|control| control - point);
		let weighted_deltas = [0, 1, 2].map(|i| (points[i + 1] - points[i]) * 3.);

		let mut polynomial: [DVec2; 6] = std::array::from_fn(|i| DVec2::new(i as f64 / 5., 0.));
		for k in 0..=5_usize {
			for i in k.saturating_sub(2)..=k.min(3) {
				let j = k - i;
				polynomial[i + j].y += weighted_deltas[j].dot(distances[i]) * DISTANCE_POLYNOMIAL_WEIGHTS[j][i];
			}
		}
		polynomial
	}

	/// Finds the parameter of the point on the curve nearest to `point`, along with the distance to it.
	pub fn closest_location_to(&self, point: DVec2) -> CurveLocation {
		let mut closest = CurveLocation {
			parameter: 0.,
			distance: self.start.distance(point),
		};

		find_bezier_roots(&self.distance_polynomial(point), |root| {
			let distance = self.evaluate(root).distance(point);
			if distance < closest.distance {
				closest = CurveLocation { parameter: root, distance };
			}
		});

		let end_distance = self.end.distance(point);
		if end_distance < closest.distance {
			closest = CurveLocation { parameter: 1., distance: end_distance };
		}
		closest
	}

	/// One Newton-Raphson step moving `t` towards the parameter whose point is closest to `point`.
	pub fn refine_parameter(&self, t: f64, point: DVec2) -> f64 {
		let [p0, p1, p2, p3] = self.points();
		let first = [(p1 - p0) * 3., (p2 - p1) * 3., (p3 - p2) * 3.];
		let second = [(first[1] - first[0]) * 2., (first[2] - first[1]) * 2.];

		let position = self.evaluate(t);
		let derivative = {
			let (a, b) = (lerp(first[0], first[1], t), lerp(first[1], first[2], t));
			lerp(a, b, t)
		};
		let second_derivative = lerp(second[0], second[1], t);

		let offset = position - point;
		let f = offset.dot(derivative);
		let f_prime = offset.dot(second_derivative) + derivative.dot(derivative);
		t - f / f_prime
	}

	/// The point `offset` units of arc length back from the end of the curve, clamped to the curve.
	pub fn point_from_right_offset(&self, offset: f64) -> DVec2 {
		let length = self.length();
		if length == 0. {
			return self.end;
		}
		self.evaluate(1. - offset.min(length) / length)
	}

	/// The point `offset` units of arc length forward from the start of the curve, clamped to the curve.
	pub fn point_from_left_offset(&self, offset: f64) -> DVec2 {
		let length = self.length();
		if length == 0. {
			return self.start;
		}
		self.evaluate(offset.min(length) / length)
	}

	/// Direction leaving the end of the curve backwards along it, measured `offset` units of arc length before the end.
	/// An offset of zero uses the end handle when it is distinct from the end point, and otherwise looks back one unit of length.
	pub fn tangent_from_right_offset(&self, offset: f64) -> DVec2 {
		if self.is_line && !self.is_point() {
			return self.start - self.end;
		}
		if offset == 0. && self.handle_end != self.end {
			return self.handle_end - self.end;
		}

		let length = self.length();
		if length == 0. {
			return DVec2::ZERO;
		}
		let offset = if offset == 0. { length.min(1.) } else { offset };
		let (_, left, _) = self.split(1. - offset / length);
		left.handle_end - left.end
	}

	/// Direction leaving the start of the curve forwards along it, measured `offset` units of arc length after the start.
	/// An offset of zero uses the start handle when it is distinct from the start point, and otherwise looks ahead one unit of length.
	pub fn tangent_from_left_offset(&self, offset: f64) -> DVec2 {
		if self.is_line && !self.is_point() {
			return self.end - self.start;
		}
		if offset == 0. && self.handle_start != self.start {
			return self.handle_start - self.start;
		}

		let length = self.length();
		if length == 0. {
			return DVec2::ZERO;
		}
		let offset = if offset == 0. { length.min(1.) } else { offset };
		let (_, _, right) = self.split(offset / length);
		right.handle_start - right.start
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::{compare_f64s, compare_points};

	fn arch() -> Curve {
		Curve::new(DVec2::new(0., 0.), DVec2::new(0., 10.), DVec2::new(10., 10.), DVec2::new(10., 0.))
	}

	#[test]
	fn test_closest_location_on_curve() {
		let curve = arch();
		for t in [0.1, 0.3, 0.5, 0.8] {
			let location = curve.closest_location_to(curve.evaluate(t));
			assert!(compare_f64s(location.parameter, t));
			assert!(location.distance < 1e-3);
		}
	}

	#[test]
	fn test_closest_location_off_curve() {
		let curve = arch();
		let location = curve.closest_location_to(DVec2::new(5., 20.));
		assert!(compare_f64s(location.parameter, 0.5));
		assert!(compare_f64s(location.distance, 12.5));

		let before_start = curve.closest_location_to(DVec2::new(-1., -5.));
		assert_eq!(before_start.parameter, 0.);
		let past_end = curve.closest_location_to(DVec2::new(12., -5.));
		assert_eq!(past_end.parameter, 1.);
	}

	#[test]
	fn test_refine_parameter_converges() {
		let curve = arch();
		let target = curve.evaluate(0.4);
		let mut t = 0.45;
		for _ in 0..4 {
			t = curve.refine_parameter(t, target);
		}
		assert!(compare_f64s(t, 0.4));
	}

	#[test]
	fn test_tangents_at_endpoints() {
		let curve = arch();
		assert!(compare_points(curve.tangent_from_left_offset(0.), DVec2::new(0., 10.)));
		assert!(compare_points(curve.tangent_from_right_offset(0.), DVec2::new(0., 10.)));

		let line = Curve::line(DVec2::new(0., 0.), DVec2::new(4., 0.));
		assert_eq!(line.tangent_from_left_offset(1.), DVec2::new(4., 0.));
		assert_eq!(line.tangent_from_right_offset(1.), DVec2::new(-4., 0.));
	}

	#[test]
	fn test_tangents_with_offset_follow_the_curve() {
		let curve = arch();
		let length = curve.length();

		// Halfway along the arch the curve runs horizontally
		let forward = curve.tangent_from_left_offset(length / 2.).normalize();
		let backward = curve.tangent_from_right_offset(length / 2.).normalize();
		assert!(compare_points(forward, DVec2::new(1., 0.)));
		assert!(compare_points(backward, DVec2::new(-1., 0.)));
	}

	#[test]
	fn test_points_from_offsets() {
		let line = Curve::line(DVec2::new(0., 0.), DVec2::new(10., 0.));
		assert!(compare_points(line.point_from_left_offset(2.), DVec2::new(2., 0.)));
		assert!(compare_points(line.point_from_right_offset(2.), DVec2::new(8., 0.)));
		assert!(compare_points(line.point_from_left_offset(20.), DVec2::new(10., 0.)));
	}
}
