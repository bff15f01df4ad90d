use super::operation::Operation;
use crate::consts::RAY_OVERLAP;
use crate::contour::ContourInside;
use crate::crossing::{ContourId, EdgeId, Operand, crosses_edge};
use crate::curve::Curve;
use crate::intersection::Intersection;
use crate::overlap::ContourOverlap;

use glam::DVec2;

/// Finding and tidying up the crossings between, and within, the two graphs.
impl Operation<'_> {
	/// Records which edge starts are shared because an intersection lies on an edge endpoint.
	/// When `either_end` is false only one endpoint of each curve is flagged, preferring the start.
	fn flag_shared_starts(&mut self, edge1: EdgeId, edge2: EdgeId, intersection: &Intersection, either_end: bool) {
		let at_start1 = intersection.is_at_start_of_curve1();
		if at_start1 {
			self.edge_state_mut(edge1).start_shared = true;
		}
		if intersection.is_at_stop_of_curve1() && (either_end || !at_start1) {
			let next = self.next_edge(edge1);
			self.edge_state_mut(next).start_shared = true;
		}

		let at_start2 = intersection.is_at_start_of_curve2();
		if at_start2 {
			self.edge_state_mut(edge2).start_shared = true;
		}
		if intersection.is_at_stop_of_curve2() && (either_end || !at_start2) {
			let next = self.next_edge(edge2);
			self.edge_state_mut(next).start_shared = true;
		}
	}

	/// Adds a crossing pair for every place an edge of the subject crosses an edge of the clip, and records where their contours overlap.
	///
	/// An overlap run that does not cover the whole of both contours but still takes the subject across the clip gets one crossing pair at its middle.
	pub(crate) fn insert_crossings(&mut self) {
		for contour1 in self.contour_ids(Operand::Subject) {
			for contour2 in self.contour_ids(Operand::Clip) {
				let mut overlap = ContourOverlap::new(contour1, contour2, self.contour(contour1).edges().len());

				for edge1 in self.edge_ids(contour1) {
					for edge2 in self.edge_ids(contour2) {
						let (intersections, range) = self.curve(edge1).intersections(self.curve(edge2));
						if !intersections.is_empty() || range.is_some() {
							log::trace!("{edge1:?} meets {edge2:?} at {} points{}", intersections.len(), if range.is_some() { " and overlaps it" } else { "" });
						}

						let (neighbours1, neighbours2) = (self.neighbours(edge1), self.neighbours(edge2));
						for intersection in intersections {
							self.flag_shared_starts(edge1, edge2, &intersection, true);
							if crosses_edge(&neighbours1, &neighbours2, &intersection) {
								self.add_crossing_pair(intersection, edge1, edge2, false, false);
							}
						}

						if let Some(range) = range {
							overlap.add(range, edge1, edge2);
						}
					}
				}

				if !overlap.is_complete() {
					for run in &overlap.runs {
						if !run.is_crossing(self.contour(contour1), self.contour(contour2)) {
							continue;
						}
						if let Some(middle) = run.middle_overlap() {
							self.add_crossing_pair(middle.range.middle_intersection(), middle.edge1, middle.edge2, false, true);
						}
					}
				}

				if !overlap.is_empty() {
					self.overlaps.push(overlap);
				}
			}
		}
	}

	/// Adds self crossings between distinct contours of one graph, then classifies each of its contours as filled or a hole.
	pub(crate) fn insert_self_crossings(&mut self, operand: Operand) {
		let contours: Vec<_> = self.contour_ids(operand).collect();

		for (index, &contour1) in contours.iter().enumerate().rev() {
			for &contour2 in &contours[..index] {
				let (first, second) = (self.contour(contour1), self.contour(contour2));
				if !first.bounding_box().might_overlap(&second.bounding_box()) || !first.bounds().might_overlap(&second.bounds()) {
					continue;
				}

				for edge1 in self.edge_ids(contour1) {
					for edge2 in self.edge_ids(contour2) {
						let (intersections, _) = self.curve(edge1).intersections(self.curve(edge2));

						let (neighbours1, neighbours2) = (self.neighbours(edge1), self.neighbours(edge2));
						for intersection in intersections {
							self.flag_shared_starts(edge1, edge2, &intersection, false);
							if crosses_edge(&neighbours1, &neighbours2, &intersection) {
								self.add_crossing_pair(intersection, edge1, edge2, true, false);
							}
						}
					}
				}
			}
		}

		for contour in contours {
			if !self.contour(contour).is_empty() {
				let inside = self.contour_inside(contour);
				self.set_inside(contour, inside);
			}
		}
	}

	/// Casts a ray from a point on the contour out of the graph and counts how often it passes through the graph's other contours, ignoring those the contour crosses.
	fn contour_inside(&self, contour: ContourId) -> ContourInside {
		let test_point = self.test_point_for_containment(contour);
		let bounds = self.graph(contour.operand).bounds();
		let beyond_x = if test_point.x > bounds.left() { bounds.left() - RAY_OVERLAP } else { bounds.right() + RAY_OVERLAP };
		let ray = Curve::line(test_point, DVec2::new(beyond_x, test_point.y));

		let count: usize = self
			.contour_ids(contour.operand)
			.filter(|&other| other != contour && !self.contour(other).is_empty() && !self.crosses_own_contour(other, contour))
			.map(|other| self.contour(other).intersections_with_ray(&ray).len())
			.sum();

		if count % 2 == 1 { ContourInside::Hole } else { ContourInside::Filled }
	}

	pub(crate) fn cleanup_crossings(&mut self) {
		for operand in [Operand::Subject, Operand::Clip] {
			self.remove_duplicate_crossings(operand);
		}
		for operand in [Operand::Subject, Operand::Clip] {
			self.remove_crossings_in_overlaps(operand);
		}
	}

	/// An intersection at a vertex shows up on both edges meeting there. Keeps the one at the end of the earlier edge.
	fn remove_duplicate_crossings(&mut self, operand: Operand) {
		for contour in self.contour_ids(operand) {
			for edge in self.edge_ids(contour) {
				let crossings: Vec<_> = self.edge_crossings(edge).to_vec();
				for crossing in crossings {
					if !self.crossing(crossing).attached {
						continue;
					}

					if let Some(last) = self.last_crossing(self.previous_edge(edge)) {
						if self.is_at_start(crossing) && self.is_at_end(last) {
							self.remove_crossing_pair(crossing);
						}
					}

					if let Some(first) = self.first_crossing(self.next_edge(edge)) {
						if self.is_at_end(crossing) && self.is_at_start(first) {
							self.remove_crossing_pair(first);
						}
					}
				}
			}
		}
	}

	/// Point crossings inside an overlapping stretch are replaced by the run's own crossing, if it has one.
	fn remove_crossings_in_overlaps(&mut self, operand: Operand) {
		for contour in self.contour_ids(operand) {
			for edge in self.edge_ids(contour) {
				let crossings: Vec<_> = self.edge_crossings(edge).to_vec();
				for crossing in crossings {
					let state = self.crossing(crossing);
					if state.from_overlap || !state.attached {
						continue;
					}
					if self.overlap_contains_crossing(contour, crossing) {
						self.remove_crossing_pair(crossing);
					}
				}
			}
		}
	}

	/// Everything that has to happen before crossings can be marked, in order.
	pub(crate) fn prepare(&mut self) {
		self.insert_crossings();
		self.insert_self_crossings(Operand::Subject);
		self.insert_self_crossings(Operand::Clip);
		self.cleanup_crossings();
		log::debug!("Inserted {} crossings and {} self crossings", self.crossing_count(), self.self_crossing_count());
	}
}
