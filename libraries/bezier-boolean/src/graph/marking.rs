use super::operation::Operation;
use crate::contour::ContourInside;
use crate::crossing::{ContourId, EdgeId, Operand};

use glam::DVec2;

/// Parameter used when every edge of a contour starts at a shared point, so some point along an edge has to stand in.
const UNSHARED_PARAMETER: f64 = 0.5;
/// Beyond the end of any edge, so a walk to it covers every remaining crossing.
const NO_STOP_PARAMETER: f64 = 2.;

/// Labelling every crossing as an entry into or an exit from the other graph.
impl Operation<'_> {
	/// The first edge, going round from the contour's first edge, whose start is not shared with another contour.
	/// If every start is shared this comes back round to the first edge.
	fn start_edge(&self, contour: ContourId) -> Option<EdgeId> {
		let edge_count = self.contour(contour).edges().len();
		if edge_count == 0 {
			return None;
		}
		let first = contour.edge(0);
		Some((0..edge_count).map(|edge| contour.edge(edge)).find(|&edge| !self.edge_state(edge).start_shared).unwrap_or(first))
	}

	/// A point on the contour known not to lie on another contour, along with the edge and parameter it sits at.
	///
	/// This is the start of an edge whose start is not shared where possible. Otherwise it is the middle of the first edge from there whose middle is not inside an overlap.
	pub(crate) fn starting_edge(&self, contour: ContourId) -> Option<(EdgeId, f64, DVec2)> {
		let start = self.start_edge(contour)?;
		if !self.edge_state(start).start_shared {
			return Some((start, 0., self.curve(start).start()));
		}

		let mut edge = start;
		while self.overlap_contains_parameter(contour, UNSHARED_PARAMETER, edge) {
			edge = self.next_edge(edge);
			if edge == start {
				break;
			}
		}
		Some((edge, UNSHARED_PARAMETER, self.curve(edge).evaluate(UNSHARED_PARAMETER)))
	}

	pub(crate) fn test_point_for_containment(&self, contour: ContourId) -> DVec2 {
		self.starting_edge(contour).map_or(DVec2::ZERO, |(_, _, point)| point)
	}

	/// Even-odd containment across the contour and every contour of its graph that it crosses.
	fn contour_and_self_intersecting_contours_contain_point(&self, contour: ContourId, point: DVec2) -> bool {
		let containers = std::iter::once(contour).chain(self.self_intersecting_contours(contour));
		containers.filter(|&container| self.contour(container).contains_point(point)).count() % 2 == 1
	}

	/// Marks the crossings of every contour of one graph with the contours of the other graph it crosses.
	///
	/// With `mark_inside` the parts of the graph inside the other graph are the ones to keep. The sense is flipped for crossings with holes.
	pub(crate) fn mark_crossings(&mut self, operand: Operand, mark_inside: bool) {
		for contour in self.contour_ids(operand) {
			for other in self.intersecting_contours(contour) {
				let mark_inside = if self.inside(other) == ContourInside::Hole { !mark_inside } else { mark_inside };
				self.mark_contour_crossings(contour, other, mark_inside);
			}
		}
	}

	/// Walks once round the contour from a point whose containment in `other` is known, alternating entries and exits at each crossing with `other` or the contours it crosses.
	fn mark_contour_crossings(&mut self, contour: ContourId, other: ContourId, mark_inside: bool) {
		let Some((start_edge, start_parameter, start_point)) = self.starting_edge(contour) else { return };

		let contains = self.contour_and_self_intersecting_contours_contain_point(other, start_point);
		let mut is_entry = if mark_inside { !contains } else { contains };
		let mut other_contours = self.self_intersecting_contours(other);
		other_contours.push(other);

		is_entry = self.mark_crossings_on_edge(start_edge, start_parameter, NO_STOP_PARAMETER, &other_contours, is_entry);
		let mut edge = self.next_edge(start_edge);
		while edge != start_edge {
			is_entry = self.mark_crossings_on_edge(edge, 0., NO_STOP_PARAMETER, &other_contours, is_entry);
			edge = self.next_edge(edge);
		}
		self.mark_crossings_on_edge(start_edge, 0., start_parameter, &other_contours, is_entry);
	}

	fn mark_crossings_on_edge(&mut self, edge: EdgeId, start_parameter: f64, stop_parameter: f64, other_contours: &[ContourId], mut is_entry: bool) -> bool {
		let crossings: Vec<_> = self.edge_crossings(edge).to_vec();
		for crossing in crossings {
			let counterpart_contour = self.crossing(self.counterpart(crossing)).edge.contour;
			if self.crossing(crossing).is_self || !other_contours.contains(&counterpart_contour) {
				continue;
			}

			let parameter = self.parameter(crossing);
			if parameter < start_parameter || parameter >= stop_parameter {
				continue;
			}

			self.crossing_mut(crossing).entry = is_entry;
			is_entry = !is_entry;
		}
		is_entry
	}
}
