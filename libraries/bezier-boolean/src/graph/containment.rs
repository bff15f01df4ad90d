use super::operation::Operation;
use crate::consts::RAY_OVERLAP;
use crate::contour::Contour;
use crate::crossing::{ContourId, Operand};
use crate::curve::Curve;
use crate::util::math::{is_value_greater_than, is_value_greater_than_equal, is_value_less_than, is_value_less_than_equal};

use glam::DVec2;
use std::ops::ControlFlow;

/// Contours of the containing graph that a ray passes through before reaching the test contour, and after leaving it.
/// A contour appears once for each time the ray passes through it.
#[derive(Clone, Debug, Default)]
struct RayHits {
	before: Vec<ContourId>,
	after: Vec<ContourId>,
}

fn occurrences(contours: &[ContourId], contour: ContourId) -> usize {
	contours.iter().filter(|&&other| other == contour).count()
}

/// Drops every contour the ray passes through an even number of times on this side of the test contour.
fn remove_contours_that_dont_contain(hits: &mut Vec<ContourId>) {
	let counts: Vec<_> = hits.iter().map(|&contour| occurrences(hits, contour)).collect();
	let mut counts = counts.into_iter();
	hits.retain(|_| counts.next().is_some_and(|count| count % 2 == 1));
}

/// A container has to be passed through on both sides of the test contour.
fn remove_contour_crossings(hits: &mut Vec<ContourId>, other: &[ContourId]) {
	hits.retain(|contour| other.contains(contour));
}

fn unique_contours(hits: &[ContourId]) -> Vec<ContourId> {
	let mut contours = Vec::new();
	for &contour in hits {
		if !contours.contains(&contour) {
			contours.push(contour);
		}
	}
	contours
}

/// The coordinate along a horizontal or vertical ray.
fn along(point: DVec2, horizontal: bool) -> f64 {
	if horizontal { point.x } else { point.y }
}

impl Operation<'_> {
	/// Whether the graph on one side of the operation surrounds a contour from the other side that it does not cross.
	///
	/// Rays are cast across the test contour at ever finer spacings, horizontally and vertically. Each ray that can be read unambiguously narrows down the contours that might surround the test contour, and the first spacing at which that happens gives the answer from how many are left.
	pub(crate) fn graph_contains_contour(&self, operand: Operand, test: ContourId) -> bool {
		let graph_bounds = self.graph(operand).bounds();
		let test_contour = self.contour(test);
		let test_bounds = test_contour.bounds();
		if !graph_bounds.might_overlap(&test_bounds) {
			return false;
		}

		let mut containers: Vec<ContourId> = self.contour_ids(operand).collect();

		let count = test_bounds.width().ceil().max(test_bounds.height().ceil());
		if !(count > 0.) {
			return false;
		}
		let count = count as usize;

		let (min, max) = (graph_bounds.min().min(test_bounds.min()) - RAY_OVERLAP, graph_bounds.max().max(test_bounds.max()) + RAY_OVERLAP);

		for fraction in 2..=count * 2 {
			let mut did_eliminate = false;

			let spacing = test_bounds.height() / fraction as f64;
			let mut y = test_bounds.top() + spacing;
			while y < test_bounds.bottom() {
				let ray = Curve::line(DVec2::new(min.x, y), DVec2::new(max.x, y));
				did_eliminate |= self.eliminate_containers(&mut containers, test_contour, &ray, true);
				y += spacing;
			}

			let spacing = test_bounds.width() / fraction as f64;
			let mut x = test_bounds.left() + spacing;
			while x < test_bounds.right() {
				let ray = Curve::line(DVec2::new(x, min.y), DVec2::new(x, max.y));
				did_eliminate |= self.eliminate_containers(&mut containers, test_contour, &ray, false);
				x += spacing;
			}

			if containers.is_empty() {
				return false;
			}
			if did_eliminate {
				return containers.len() % 2 == 1;
			}
		}

		false
	}

	/// Whether the graph on the other side of the operation from `contour` surrounds it.
	pub(crate) fn other_graph_contains(&self, contour: ContourId) -> bool {
		self.graph_contains_contour(contour.operand.other(), contour)
	}

	/// Narrows `containers` down to the ones the ray shows could surround the test contour. Returns whether the ray could be used at all.
	fn eliminate_containers(&self, containers: &mut Vec<ContourId>, test_contour: &Contour, ray: &Curve, horizontal: bool) -> bool {
		let Some((test_min, test_max)) = find_bounds_of_contour(test_contour, ray, horizontal) else { return false };
		let Some(mut hits) = self.find_crossings_on_containers(containers, ray, test_min, test_max, horizontal) else { return false };

		remove_contours_that_dont_contain(&mut hits.before);
		remove_contours_that_dont_contain(&mut hits.after);

		remove_contour_crossings(&mut hits.before, &hits.after);
		remove_contour_crossings(&mut hits.after, &hits.before);

		*containers = unique_contours(&hits.before);
		true
	}

	/// Sorts the places the ray passes through the candidate containers into those before and after the test contour.
	///
	/// Gives up on the ray if it passes through a vertex of a container, since whether it crosses there is unclear. A crossing exactly where the ray meets a test contour of zero extent goes on whichever side leaves its contour passed through an odd number of times.
	fn find_crossings_on_containers(&self, containers: &[ContourId], ray: &Curve, test_min: DVec2, test_max: DVec2, horizontal: bool) -> Option<RayHits> {
		let mut hits = RayHits::default();
		let mut ambiguous = Vec::new();

		for &container in containers {
			for edge in self.contour(container).edges() {
				let mut at_vertex = false;
				let mut overlap = None;

				ray.intersections_with(edge, &mut overlap, |intersection| {
					if intersection.is_tangent() {
						return ControlFlow::Continue(());
					}
					if intersection.is_at_endpoint_of_curve2() {
						at_vertex = true;
						return ControlFlow::Break(());
					}

					let position = along(intersection.location(), horizontal);
					if is_value_less_than(position, along(test_max, horizontal)) && is_value_greater_than(position, along(test_min, horizontal)) {
						return ControlFlow::Continue(());
					}

					if test_min == test_max && test_max == intersection.location() {
						ambiguous.push(container);
						return ControlFlow::Continue(());
					}

					if is_value_less_than_equal(position, along(test_min, horizontal)) {
						hits.before.push(container);
					}
					if is_value_greater_than_equal(position, along(test_max, horizontal)) {
						hits.after.push(container);
					}
					ControlFlow::Continue(())
				});

				if at_vertex {
					log::trace!("Ray {ray:?} passes through a vertex of {container:?}");
					return None;
				}
			}
		}

		for container in ambiguous {
			let before = occurrences(&hits.before, container);
			let after = occurrences(&hits.after, container);
			let into_before = match (before % 2 == 0, after % 2 == 0) {
				(true, false) => true,
				(false, true) => false,
				_ => before < after,
			};
			if into_before {
				hits.before.push(container);
			} else {
				hits.after.push(container);
			}
		}

		Some(hits)
	}
}

/// The first and last points at which the ray meets the contour, or `None` if it misses.
fn find_bounds_of_contour(contour: &Contour, ray: &Curve, horizontal: bool) -> Option<(DVec2, DVec2)> {
	let mut locations = contour.edges().iter().flat_map(|edge| ray.intersections(edge).0).map(|intersection| intersection.location());

	let first = locations.next()?;
	Some(locations.fold((first, first), |(min, max), location| {
		let min = if along(location, horizontal) < along(min, horizontal) { location } else { min };
		let max = if along(location, horizontal) > along(max, horizontal) { location } else { max };
		(min, max)
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::Graph;

	fn square(min: f64, max: f64) -> Graph {
		Graph::rectangle(DVec2::splat(min), DVec2::splat(max))
	}

	#[test]
	fn test_surrounding_square_contains() {
		let (outer, inner) = (square(0., 10.), square(3., 6.));
		let operation = Operation::new(&outer, &inner);
		assert!(operation.graph_contains_contour(Operand::Subject, ContourId::new(Operand::Clip, 0)));
		assert!(!operation.graph_contains_contour(Operand::Clip, ContourId::new(Operand::Subject, 0)));
	}

	#[test]
	fn test_other_graph_contains() {
		let (outer, inner) = (square(0., 10.), square(3., 6.));
		let operation = Operation::new(&outer, &inner);
		assert!(operation.other_graph_contains(ContourId::new(Operand::Clip, 0)));
		assert!(!operation.other_graph_contains(ContourId::new(Operand::Subject, 0)));
	}

	#[test]
	fn test_separate_squares_do_not_contain() {
		let (first, second) = (square(0., 10.), square(20., 30.));
		let operation = Operation::new(&first, &second);
		assert!(!operation.graph_contains_contour(Operand::Subject, ContourId::new(Operand::Clip, 0)));
		assert!(!operation.graph_contains_contour(Operand::Clip, ContourId::new(Operand::Subject, 0)));
	}

	#[test]
	fn test_hole_between_does_not_contain() {
		let mut ring = square(0., 20.);
		ring.add_contour(square(2., 18.).contours()[0].clone());
		let island = square(5., 15.);
		let operation = Operation::new(&ring, &island);
		assert!(!operation.graph_contains_contour(Operand::Subject, ContourId::new(Operand::Clip, 0)));
	}

	#[test]
	fn test_odd_counts_stay() {
		let first = ContourId::new(Operand::Subject, 0);
		let second = ContourId::new(Operand::Subject, 1);
		let mut hits = vec![first, second, first];
		remove_contours_that_dont_contain(&mut hits);
		assert_eq!(hits, [second]);

		let mut before = vec![first, second];
		remove_contour_crossings(&mut before, &[second]);
		assert_eq!(before, [second]);
	}
}
