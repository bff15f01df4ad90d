use super::*;
use crate::util::hull::convex_hull;
use crate::util::line::{NormalizedLine, line_intersects_horizontal_line};
use crate::util::math::line_normal;
use crate::util::range::ParameterRange;

/// Fat line construction and clipping used by the Bézier clipping intersection algorithm.
impl Curve {
	/// The chord from start to end, widened to cover both handles.
	pub(crate) fn regular_fat_line(&self) -> (NormalizedLine, ParameterRange) {
		let line = NormalizedLine::through(self.start, self.end);
		let distance1 = line.distance_from_point(self.handle_start);
		let distance2 = line.distance_from_point(self.handle_end);

		(line, ParameterRange::new(distance1.min(distance2).min(0.), distance1.max(distance2).max(0.)))
	}

	/// The line perpendicular to the chord through its midpoint, widened to cover all four control points.
	pub(crate) fn perpendicular_fat_line(&self) -> (NormalizedLine, ParameterRange) {
		let normal = line_normal(self.start, self.end);
		let midpoint = (self.start + self.end) / 2.;
		let line = NormalizedLine::through(midpoint, midpoint + normal);

		let distances = self.points().map(|point| line.distance_from_point(point));
		let min = distances.into_iter().fold(f64::INFINITY, f64::min);
		let max = distances.into_iter().fold(f64::NEG_INFINITY, f64::max);
		(line, ParameterRange::new(min, max))
	}

	/// Parameter range of this curve that can lie within `bounds` of `fat_line`, found from the convex hull of the curve's distance function.
	/// Returns [ParameterRange::NO_INTERSECTION] when no part of the hull falls inside, and the unit range when the computation breaks down.
	pub(crate) fn clip_with_fat_line(&self, fat_line: &NormalizedLine, bounds: ParameterRange) -> ParameterRange {
		// The distance to the line is itself a cubic Bézier function with control values at x = 0, 1/3, 2/3, 1
		let points = self.points();
		let hull = convex_hull(std::array::from_fn(|i| DVec2::new(i as f64 / 3., fat_line.distance_from_point(points[i]))));

		let mut range = ParameterRange::NO_INTERSECTION;
		let mut include = |x: f64| {
			range.min = range.min.min(x);
			range.max = range.max.max(x);
		};

		for (i, &start) in hull.iter().enumerate() {
			let end = hull[(i + 1) % hull.len()];

			if let Some(intersection) = line_intersects_horizontal_line(start, end, bounds.min) {
				include(intersection.x);
			}
			if let Some(intersection) = line_intersects_horizontal_line(start, end, bounds.max) {
				include(intersection.x);
			}
			if start.y < bounds.max && start.y > bounds.min {
				include(start.x);
			}
		}

		if !range.min.is_finite() || !range.max.is_finite() {
			return ParameterRange::UNIT;
		}
		range
	}
}

/// Clips `me` against the fat lines of `curve` and maps the surviving part into `original_range`, the parameters of `me` on `original`.
/// Returns the corresponding piece of `original` with `original_range` narrowed to it, or `None` when the curves cannot meet.
pub(crate) fn bezier_clip(me: &Curve, curve: &Curve, original: &Curve, original_range: &mut ParameterRange) -> Option<Curve> {
	let (fat_line, fat_line_bounds) = curve.regular_fat_line();
	let regular = me.clip_with_fat_line(&fat_line, fat_line_bounds);
	if regular.is_no_intersection() {
		return None;
	}

	let (perpendicular_line, perpendicular_bounds) = curve.perpendicular_fat_line();
	let perpendicular = me.clip_with_fat_line(&perpendicular_line, perpendicular_bounds);
	if perpendicular.is_no_intersection() {
		return None;
	}

	let clipped = ParameterRange::new(regular.min.max(perpendicular.min), regular.max.min(perpendicular.max));
	*original_range = ParameterRange::new(original_range.scale_normalized(clipped.min), original_range.scale_normalized(clipped.max));

	Some(original.subcurve(*original_range))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::compare_f64s;

	#[test]
	fn test_regular_fat_line() {
		let curve = Curve::new(DVec2::new(0., 0.), DVec2::new(0., 10.), DVec2::new(10., 10.), DVec2::new(10., 0.));
		let (line, bounds) = curve.regular_fat_line();
		assert!(compare_f64s(line.distance_from_point(DVec2::new(5., 0.)), 0.));
		assert!(compare_f64s(bounds.size(), 10.));
		assert!(bounds.min == 0. || bounds.max == 0.);
	}

	#[test]
	fn test_perpendicular_fat_line() {
		let line = Curve::line(DVec2::new(0., 0.), DVec2::new(10., 0.));
		let (fat_line, bounds) = line.perpendicular_fat_line();
		assert!(compare_f64s(fat_line.distance_from_point(DVec2::new(5., 3.)), 0.));
		assert!(compare_f64s(bounds.size(), 10.));
	}

	#[test]
	fn test_clip_narrows_the_range() {
		let horizontal = Curve::line(DVec2::new(0., 5.), DVec2::new(10., 5.));
		let vertical = Curve::line(DVec2::new(2., 0.), DVec2::new(2., 10.));

		let (fat_line, bounds) = vertical.regular_fat_line();
		let range = horizontal.clip_with_fat_line(&fat_line, bounds);
		assert!(compare_f64s(range.min, 0.2));
		assert!(compare_f64s(range.max, 0.2));
	}

	#[test]
	fn test_clip_rejects_distant_curves() {
		let a = Curve::line(DVec2::new(0., 0.), DVec2::new(10., 0.));
		let b = Curve::line(DVec2::new(0., 5.), DVec2::new(10., 5.));
		let (fat_line, bounds) = b.regular_fat_line();
		assert!(a.clip_with_fat_line(&fat_line, bounds).is_no_intersection());

		let mut range = ParameterRange::UNIT;
		assert!(bezier_clip(&a, &b, &a, &mut range).is_none());
	}
}
