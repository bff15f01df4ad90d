use super::{IntersectRange, Intersection};
use crate::consts::*;
use crate::curve::{Curve, bezier_clip};
use crate::util::line::lines_intersect;
use crate::util::math::{are_points_close, are_values_close, counter_clockwise_turn, is_value_greater_than, is_value_less_than, parameter_of_point_on_line};
use crate::util::range::ParameterRange;

use std::ops::ControlFlow;

fn converged(range: &ParameterRange) -> bool {
	range.has_converged(CLIP_DECIMAL_PLACES)
}

/// Whether two curves trace the same segment, allowing the looser control point tolerance since distinct handles can describe nearly the same shape.
fn curves_are_equal(a: &Curve, b: &Curve) -> bool {
	if a.is_point() || b.is_point() || a.is_line() != b.is_line() {
		return false;
	}

	let endpoints = are_points_close(a.start(), b.start(), CURVE_ENDPOINTS_EQUAL) && are_points_close(a.end(), b.end(), CURVE_ENDPOINTS_EQUAL);
	if a.is_line() {
		return endpoints;
	}
	endpoints && are_points_close(a.handle_start(), b.handle_start(), CURVE_CONTROLS_EQUAL) && are_points_close(a.handle_end(), b.handle_end(), CURVE_CONTROLS_EQUAL)
}

fn merge_intersect_range(intersect_range: &mut Option<IntersectRange>, other: Option<IntersectRange>) {
	let Some(other) = other else { return };
	match intersect_range {
		Some(existing) => existing.merge(&other),
		None => *intersect_range = Some(other),
	}
}

/// The part of `original` between the closest points to the ends of `them`.
fn find_possible_overlap(original: &Curve, them: &Curve) -> (ParameterRange, Curve) {
	let start = original.closest_location_to(them.start()).parameter;
	let end = original.closest_location_to(them.end()).parameter;
	let range = ParameterRange::new(start.min(end), start.max(end));
	(range, original.subcurve(range))
}

/// Clips the line `curve` (which lies on `original` over `original_range`) to the span covered by the colinear line `other`.
fn clip_line_original_curve(original: &Curve, curve: &Curve, original_range: &mut ParameterRange, other: &Curve) -> Option<Curve> {
	let other_start = parameter_of_point_on_line(curve.start(), curve.end(), other.start());
	let other_end = parameter_of_point_on_line(curve.start(), curve.end(), other.end());
	let clipped = ParameterRange::new(other_start.min(other_end).max(0.), other_start.max(other_end).min(1.));
	if clipped.min > clipped.max {
		return None;
	}

	*original_range = ParameterRange::new(original_range.scale_normalized(clipped.min), original_range.scale_normalized(clipped.max));
	Some(original.subcurve(*original_range))
}

/// State shared by every level of the recursive clipping of one pair of curves.
struct Clipper<'a, F> {
	original_us: &'a Curve,
	original_them: &'a Curve,
	output: F,
	stopped: bool,
}

impl<F: FnMut(Intersection) -> ControlFlow<()>> Clipper<'_, F> {
	fn emit(&mut self, intersection: Intersection) {
		if (self.output)(intersection).is_break() {
			self.stopped = true;
		}
	}

	/// Records an overlap if `us` and `them` are the same segment in either direction.
	fn check_for_overlap_range(&self, intersect_range: &mut Option<IntersectRange>, us_range: ParameterRange, them_range: ParameterRange, us: &Curve, them: &Curve) -> bool {
		let reversed = if curves_are_equal(us, them) {
			false
		} else if curves_are_equal(us, &them.reversed()) {
			true
		} else {
			return false;
		};

		*intersect_range = Some(IntersectRange::new(self.original_us.clone(), us_range, self.original_them.clone(), them_range, reversed));
		true
	}

	/// Like [Self::check_for_overlap_range], but also tries the pieces of each original curve spanned by the other curve's endpoints.
	fn check_curves_for_overlap_range(&self, intersect_range: &mut Option<IntersectRange>, us_range: &mut ParameterRange, them_range: &mut ParameterRange, us: &Curve, them: &Curve) -> bool {
		if self.check_for_overlap_range(intersect_range, *us_range, *them_range, us, them) {
			return true;
		}

		let (us_subcurve_range, us_subcurve) = find_possible_overlap(self.original_us, them);
		let (them_subcurve_range, them_subcurve) = find_possible_overlap(self.original_them, us);
		if us_subcurve.is_equal_with_tolerance(&them_subcurve, OVERLAP_CANDIDATE_EQUAL) || us_subcurve.is_equal_with_tolerance(&them_subcurve.reversed(), OVERLAP_CANDIDATE_EQUAL) {
			*us_range = us_subcurve_range;
			*them_range = them_subcurve_range;
			return self.check_for_overlap_range(intersect_range, *us_range, *them_range, &us_subcurve, &them_subcurve);
		}
		false
	}

	/// For two colinear lines, narrows both to the span they share. Returns false if they are not colinear or do not share any span.
	fn check_lines_for_overlap(&self, us_range: &mut ParameterRange, them_range: &mut ParameterRange, us: &mut Curve, them: &mut Curve) -> bool {
		if !us.bounds().might_overlap(&them.bounds()) {
			return false;
		}

		let is_colinear = are_values_close(counter_clockwise_turn(us.start(), us.end(), them.start()), 0., LINE_COLINEAR) && are_values_close(counter_clockwise_turn(us.start(), us.end(), them.end()), 0., LINE_COLINEAR);
		if !is_colinear {
			return false;
		}

		let Some(clipped_us) = clip_line_original_curve(self.original_us, us, us_range, them) else { return false };
		*us = clipped_us;
		let Some(clipped_them) = clip_line_original_curve(self.original_them, them, them_range, us) else { return false };
		*them = clipped_them;
		true
	}

	fn check_no_intersections_for_overlap_range(&self, intersect_range: &mut Option<IntersectRange>, us_range: &mut ParameterRange, them_range: &mut ParameterRange, us: &mut Curve, them: &mut Curve) {
		if us.is_line() && them.is_line() {
			self.check_lines_for_overlap(us_range, them_range, us, them);
		}
		self.check_for_overlap_range(intersect_range, *us_range, *them_range, us, them);
	}

	fn straight_line_overlap(&self, intersect_range: &mut Option<IntersectRange>, us_range: &mut ParameterRange, them_range: &mut ParameterRange, us: &mut Curve, them: &mut Curve) -> bool {
		if !us.is_line() || !them.is_line() {
			return false;
		}
		self.check_lines_for_overlap(us_range, them_range, us, them) && self.check_for_overlap_range(intersect_range, *us_range, *them_range, us, them)
	}

	/// Two straight lines meet in at most one point, found directly.
	fn intersections_with_straight_lines(&mut self, me: &Curve, curve: &Curve) {
		let Some(point) = lines_intersect(me.start(), me.end(), curve.start(), curve.end()) else { return };

		let me_parameter = parameter_of_point_on_line(me.start(), me.end(), point);
		if is_value_less_than(me_parameter, 0.) || is_value_greater_than(me_parameter, 1.) {
			return;
		}
		let curve_parameter = parameter_of_point_on_line(curve.start(), curve.end(), point);
		if is_value_less_than(curve_parameter, 0.) || is_value_greater_than(curve_parameter, 1.) {
			return;
		}

		self.emit(Intersection::new(self.original_us.clone(), me_parameter, self.original_them.clone(), curve_parameter));
	}

	/// A few extra rounds of clipping for ranges that have not quite converged. Falls back to the last non-degenerate curves when a clip fails.
	#[allow(clippy::too_many_arguments)]
	fn refine_over_iterations(&self, iterations: usize, us_range: &mut ParameterRange, them_range: &mut ParameterRange, us: &mut Curve, them: &mut Curve, nonpoint_us: &mut Curve, nonpoint_them: &mut Curve) {
		for _ in 0..iterations {
			*us = bezier_clip(us, them, self.original_us, us_range)
				.or_else(|| bezier_clip(nonpoint_us, nonpoint_them, self.original_us, us_range))
				.unwrap_or_else(|| nonpoint_us.clone());
			*them = bezier_clip(them, us, self.original_them, them_range)
				.or_else(|| bezier_clip(nonpoint_them, nonpoint_us, self.original_them, them_range))
				.unwrap_or_else(|| nonpoint_them.clone());

			if !them.is_point() {
				*nonpoint_them = them.clone();
			}
			if !us.is_point() {
				*nonpoint_us = us.clone();
			}
		}
	}

	/// Bisects whichever range is larger and intersects each half separately, merging any overlap found.
	/// Returns false without recursing when either half has already converged or the depth limit is reached.
	fn split_and_intersect(&mut self, us: &Curve, them: &Curve, us_range: ParameterRange, them_range: ParameterRange, intersect_range: &mut Option<IntersectRange>, depth: usize) -> bool {
		let split_us = us_range.size() > them_range.size();
		let (split_range, other_range) = if split_us { (us_range, them_range) } else { (them_range, us_range) };

		let middle = split_range.average();
		let halves = [ParameterRange::new(split_range.min, middle), ParameterRange::new(middle, split_range.max)];
		if depth >= CLIP_MAX_DEPTH || halves.iter().any(|half| converged(half) && converged(&other_range)) {
			return false;
		}

		for half in halves {
			let mut half_range = half;
			let mut other_range = other_range;
			let mut half_intersect_range = None;

			if split_us {
				let us_half = self.original_us.subcurve(half);
				self.intersect(&us_half, them, &mut half_range, &mut other_range, &mut half_intersect_range, depth + 1);
			} else {
				let them_half = self.original_them.subcurve(half);
				self.intersect(us, &them_half, &mut other_range, &mut half_range, &mut half_intersect_range, depth + 1);
			}

			merge_intersect_range(intersect_range, half_intersect_range);
			if self.stopped {
				break;
			}
		}
		true
	}

	/// Intersects `me` and `curve`, which are the parts of the two original curves over `us_range` and `them_range`.
	fn intersect(&mut self, me: &Curve, curve: &Curve, us_range: &mut ParameterRange, them_range: &mut ParameterRange, intersect_range: &mut Option<IntersectRange>, depth: usize) {
		let original_us = self.original_us;
		let original_them = self.original_them;

		let mut us = me.clone();
		let mut them = curve.clone();
		let mut nonpoint_us = us.clone();
		let mut nonpoint_them = them.clone();

		if self.straight_line_overlap(intersect_range, us_range, them_range, &mut us, &mut them) {
			return;
		}
		if us.is_line() && them.is_line() {
			self.intersections_with_straight_lines(me, curve);
			return;
		}

		let mut iterations = 0;
		let mut had_converged = true;

		while iterations < CLIP_MAX_ITERATIONS && (iterations == 0 || !converged(us_range) || !converged(them_range)) {
			let previous_us_range = *us_range;
			let previous_them_range = *them_range;

			if !them.is_point() {
				nonpoint_them = them.clone();
			}

			match bezier_clip(&nonpoint_us, &nonpoint_them, original_us, us_range) {
				Some(clipped) => us = clipped,
				None => {
					us = nonpoint_us.clone();
					self.check_no_intersections_for_overlap_range(intersect_range, us_range, them_range, &mut us, &mut them);
					return;
				}
			}
			if iterations > 0 && (us.is_point() || them.is_point()) {
				break;
			}

			if !us.is_point() {
				nonpoint_us = us.clone();
			} else if iterations == 0 {
				had_converged = false;
			}

			match bezier_clip(&nonpoint_them, &nonpoint_us, original_them, them_range) {
				Some(clipped) => them = clipped,
				None => {
					them = nonpoint_them.clone();
					self.check_no_intersections_for_overlap_range(intersect_range, us_range, them_range, &mut us, &mut them);
					return;
				}
			}
			if iterations > 0 && (us.is_point() || them.is_point()) {
				break;
			}

			let us_change = (previous_us_range.size() - us_range.size()) / previous_us_range.size();
			let them_change = (previous_them_range.size() - them_range.size()) / previous_them_range.size();

			// Clipping has stalled, so either the curves overlap or there are several intersections to separate
			if us_change < CLIP_MINIMUM_CHANGE && them_change < CLIP_MINIMUM_CHANGE {
				if self.check_curves_for_overlap_range(intersect_range, us_range, them_range, &us, &them) {
					return;
				}

				if self.split_and_intersect(&us, &them, *us_range, *them_range, intersect_range, depth) {
					return;
				}

				if previous_us_range.size() - us_range.size() == 0. && previous_them_range.size() - them_range.size() == 0. {
					return;
				}
			}

			iterations += 1;
		}

		if !converged(us_range) || !converged(them_range) {
			if self.check_curves_for_overlap_range(intersect_range, us_range, them_range, original_us, original_them) {
				return;
			}

			self.refine_over_iterations(3, us_range, them_range, &mut us, &mut them, &mut nonpoint_us, &mut nonpoint_them);
			if !converged(us_range) || !converged(them_range) {
				self.refine_over_iterations(4, us_range, them_range, &mut us, &mut them, &mut nonpoint_us, &mut nonpoint_them);
			}
		}

		// When only one side converged, pull the other onto the closest point with a few Newton steps
		if converged(us_range) && !converged(them_range) {
			let point = original_us.evaluate(us_range.average());
			let mut refined = them_range.average();
			for _ in 0..3 {
				refined = original_them.refine_parameter(refined, point).max(them_range.min).min(them_range.max);
			}
			*them_range = ParameterRange::new(refined, refined);
			had_converged = false;
		} else if !converged(us_range) && converged(them_range) {
			let point = original_them.evaluate(them_range.average());
			let mut refined = us_range.average();
			for _ in 0..3 {
				refined = original_us.refine_parameter(refined, point).max(us_range.min).min(us_range.max);
			}
			*us_range = ParameterRange::new(refined, refined);
			had_converged = false;
		}

		if (!converged(us_range) || !converged(them_range)) && iterations >= CLIP_MAX_ITERATIONS {
			log::warn!("Clipping did not converge after {CLIP_MAX_ITERATIONS} iterations (ranges {us_range:?} and {them_range:?})");
			self.check_for_overlap_range(intersect_range, *us_range, *them_range, &us, &them);
			return;
		}

		if !had_converged {
			let point = original_us.evaluate(us_range.average());
			let check_point = original_them.evaluate(them_range.average());
			if !are_points_close(point, check_point, CONVERGENCE_CHECK) {
				log::warn!("Rejected a candidate intersection whose points are {} apart", point.distance(check_point));
				return;
			}
		}

		self.emit(Intersection::new(original_us.clone(), us_range.average(), original_them.clone(), them_range.average()));
	}
}

/// Intersections between curves, found by Bézier clipping.
impl Curve {
	/// Finds where this curve meets `other`, calling `output` with each intersection point until it returns [ControlFlow::Break].
	/// A stretch where the two curves coincide is not reported point by point but stored in `overlap`, merged with any overlap already there.
	pub fn intersections_with(&self, other: &Curve, overlap: &mut Option<IntersectRange>, output: impl FnMut(Intersection) -> ControlFlow<()>) {
		if !self.bounding_box().might_overlap(&other.bounding_box()) || !self.bounds().might_overlap(&other.bounds()) {
			return;
		}

		let mut clipper = Clipper {
			original_us: self,
			original_them: other,
			output,
			stopped: false,
		};
		let mut us_range = ParameterRange::UNIT;
		let mut them_range = ParameterRange::UNIT;
		clipper.intersect(self, other, &mut us_range, &mut them_range, overlap, 0);
	}

	/// Collects every intersection point with `other`, along with any overlapping stretch.
	pub fn intersections(&self, other: &Curve) -> (Vec<Intersection>, Option<IntersectRange>) {
		let mut intersections = Vec::new();
		let mut overlap = None;
		self.intersections_with(other, &mut overlap, |intersection| {
			intersections.push(intersection);
			ControlFlow::Continue(())
		});
		(intersections, overlap)
	}

	/// Whether the curves meet at any point, stopping at the first intersection found.
	pub fn has_intersections_with(&self, other: &Curve) -> bool {
		let mut found = false;
		self.intersections_with(other, &mut None, |_| {
			found = true;
			ControlFlow::Break(())
		});
		found
	}
}
