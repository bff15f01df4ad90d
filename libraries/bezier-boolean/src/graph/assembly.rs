use super::Graph;
use super::operation::Operation;
use crate::contour::{Contour, ContourInside};
use crate::crossing::{ContourId, CrossingId, EdgeId, Operand};

/// Building the result graph once every crossing has been marked.
impl Operation<'_> {
	fn first_unprocessed_crossing(&self) -> Option<CrossingId> {
		for contour in self.contour_ids(Operand::Subject) {
			for edge in self.edge_ids(contour) {
				let unprocessed = self.edge_crossings(edge).iter().copied().find(|&id| {
					let crossing = self.crossing(id);
					!crossing.is_self && !crossing.processed
				});
				if unprocessed.is_some() {
					return unprocessed;
				}
			}
		}
		None
	}

	/// Adds every whole edge after `edge` up to the next one with a crossing with the other graph, then the part of that edge before its first such crossing.
	fn walk_forward_to_crossing(&self, edge: EdgeId, contour: &mut Contour) -> CrossingId {
		let edge_count = self.contour(edge.contour).edges().len();
		let mut edge = self.next_edge(edge);
		for _ in 0..edge_count {
			if let Some(first) = self.first_nonself_crossing(edge) {
				if let Some(curve) = self.curve_between(None, Some(first)) {
					contour.add_edge(curve);
				}
				return first;
			}
			contour.add_edge(self.curve(edge).clone());
			edge = self.next_edge(edge);
		}
		panic!("Walked forward all the way round {:?} without finding the crossing the walk started from", edge.contour)
	}

	/// Mirror of [`Self::walk_forward_to_crossing`], adding reversed edges going backwards from `edge`.
	fn walk_backward_to_crossing(&self, edge: EdgeId, contour: &mut Contour) -> CrossingId {
		let edge_count = self.contour(edge.contour).edges().len();
		let mut edge = self.previous_edge(edge);
		for _ in 0..edge_count {
			if let Some(last) = self.last_nonself_crossing(edge) {
				if let Some(curve) = self.curve_between(Some(last), None) {
					contour.add_edge(curve.reversed());
				}
				return last;
			}
			contour.add_edge(self.curve(edge).reversed());
			edge = self.previous_edge(edge);
		}
		panic!("Walked backward all the way round {:?} without finding the crossing the walk started from", edge.contour)
	}

	/// Walks from crossing to crossing, forwards from entries and backwards from exits, switching graphs at every crossing, until each contour closes back on itself.
	pub(crate) fn graph_from_intersections(&mut self) -> Graph {
		let mut result = Graph::new();

		while let Some(mut crossing) = self.first_unprocessed_crossing() {
			let mut contour = Contour::new();

			while !self.crossing(crossing).processed {
				self.crossing_mut(crossing).processed = true;
				let edge = self.crossing(crossing).edge;

				crossing = if self.crossing(crossing).entry {
					let next = self.next_nonself_crossing(crossing);
					match next {
						Some(next) => {
							contour.extend(self.curve_between(Some(crossing), Some(next)));
							next
						}
						None => {
							contour.extend(self.curve_between(Some(crossing), None));
							self.walk_forward_to_crossing(edge, &mut contour)
						}
					}
				} else {
					let previous = self.previous_nonself_crossing(crossing);
					match previous {
						Some(previous) => {
							contour.extend(self.curve_between(Some(previous), Some(crossing)).map(|curve| curve.reversed()));
							previous
						}
						None => {
							contour.extend(self.curve_between(None, Some(crossing)).map(|curve| curve.reversed()));
							self.walk_backward_to_crossing(edge, &mut contour)
						}
					}
				};

				self.crossing_mut(crossing).processed = true;
				crossing = self.counterpart(crossing);
			}

			result.add_contour(contour);
		}

		result
	}

	/// Pulls out every pair of contours, one from each list, that run along each other all the way round.
	fn take_equivalent_pairs(&self, ours: &mut Vec<ContourId>, theirs: &mut Vec<ContourId>) -> Vec<(ContourId, ContourId)> {
		let mut pairs = Vec::new();
		ours.retain(|&our| {
			let Some(index) = theirs.iter().position(|&their| self.is_equivalent(our, their)) else { return true };
			pairs.push((our, theirs.remove(index)));
			false
		});
		pairs
	}

	fn nonintersecting_lists(&self) -> (Vec<ContourId>, Vec<ContourId>) {
		(self.nonintersecting_contours(Operand::Subject), self.nonintersecting_contours(Operand::Clip))
	}

	fn add_contours(&self, result: &mut Graph, contours: &[ContourId]) {
		for &contour in contours {
			result.add_contour(self.contour(contour).clone());
		}
	}

	/// Contours that cross nothing survive a union unless the other graph covers them. Equivalent pairs keep one copy, or cancel when one is a hole.
	fn union_nonintersecting_parts(&self, result: &mut Graph) {
		let (mut ours, mut theirs) = self.nonintersecting_lists();
		let mut kept: Vec<_> = ours.iter().chain(&theirs).copied().collect();

		for (our, their) in self.take_equivalent_pairs(&mut ours, &mut theirs) {
			kept.retain(|&contour| contour != their);
			if self.inside(our) != self.inside(their) {
				kept.retain(|&contour| contour != our);
			}
		}

		for &our in &ours {
			if self.other_graph_contains(our) {
				kept.retain(|&contour| contour != our);
			}
		}
		for &their in &theirs {
			if self.other_graph_contains(their) {
				kept.retain(|&contour| contour != their);
			}
		}

		self.add_contours(result, &kept);
	}

	/// Contours that cross nothing survive an intersection only inside the other graph. Equivalent pairs keep one copy, the hole if there is one.
	fn intersect_nonintersecting_parts(&self, result: &mut Graph) {
		let (mut ours, mut theirs) = self.nonintersecting_lists();

		let mut kept: Vec<_> = self
			.take_equivalent_pairs(&mut ours, &mut theirs)
			.into_iter()
			.map(|(our, their)| if self.inside(their) == ContourInside::Hole { their } else { our })
			.collect();

		kept.extend(ours.into_iter().filter(|&our| self.other_graph_contains(our)));
		kept.extend(theirs.into_iter().filter(|&their| self.other_graph_contains(their)));

		self.add_contours(result, &kept);
	}

	/// The subject's contours that cross nothing survive outside the clip, and the clip's inside the subject where they cut holes.
	fn subtract_nonintersecting_parts(&self, result: &mut Graph) {
		let (mut ours, mut theirs) = self.nonintersecting_lists();

		let mut kept: Vec<_> = self
			.take_equivalent_pairs(&mut ours, &mut theirs)
			.into_iter()
			.filter(|&(our, their)| self.inside(our) != self.inside(their) || self.inside(our) == ContourInside::Hole)
			.map(|(our, _)| our)
			.collect();

		kept.extend(ours.into_iter().filter(|&our| !self.other_graph_contains(our)));
		kept.extend(theirs.into_iter().filter(|&their| self.other_graph_contains(their)));

		self.add_contours(result, &kept);
	}

	fn marked(mut self, subject_inside: bool, clip_inside: bool) -> Self {
		self.mark_crossings(Operand::Subject, subject_inside);
		self.mark_crossings(Operand::Clip, clip_inside);
		self
	}
}

fn prepared<'a>(subject: &'a Graph, clip: &'a Graph) -> Operation<'a> {
	let mut operation = Operation::new(subject, clip);
	operation.prepare();
	operation
}

fn finish(mut result: Graph, name: &str) -> Graph {
	result.classify_insides();
	log::debug!("{name} produced {} contours", result.contours().len());
	result
}

pub(super) fn union(subject: &Graph, clip: &Graph) -> Graph {
	let mut operation = prepared(subject, clip).marked(false, false);
	let mut result = operation.graph_from_intersections();
	operation.union_nonintersecting_parts(&mut result);
	finish(result, "Union")
}

pub(super) fn intersect(subject: &Graph, clip: &Graph) -> Graph {
	let mut operation = prepared(subject, clip).marked(true, true);
	let mut result = operation.graph_from_intersections();
	operation.intersect_nonintersecting_parts(&mut result);
	finish(result, "Intersection")
}

pub(super) fn subtract(subject: &Graph, clip: &Graph) -> Graph {
	let mut operation = prepared(subject, clip).marked(false, true);
	let mut result = operation.graph_from_intersections();
	operation.subtract_nonintersecting_parts(&mut result);
	finish(result, "Subtraction")
}

/// Finds the union and the intersection from one set of crossings, re-marking them in between, then subtracts one from the other.
pub(super) fn difference_two_pass(subject: &Graph, clip: &Graph) -> Graph {
	let mut operation = prepared(subject, clip).marked(false, false);
	let mut all_parts = operation.graph_from_intersections();
	operation.union_nonintersecting_parts(&mut all_parts);

	operation.mark_all_unprocessed();
	let mut operation = operation.marked(true, true);
	let mut intersecting_parts = operation.graph_from_intersections();
	operation.intersect_nonintersecting_parts(&mut intersecting_parts);

	let all_parts = finish(all_parts, "Union pass");
	let intersecting_parts = finish(intersecting_parts, "Intersection pass");
	subtract(&all_parts, &intersecting_parts)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::compare_points;
	use glam::DVec2;

	fn overlapping_squares() -> (Graph, Graph) {
		(Graph::rectangle(DVec2::new(0., 0.), DVec2::new(10., 10.)), Graph::rectangle(DVec2::new(5., 5.), DVec2::new(15., 15.)))
	}

	#[test]
	fn test_walk_builds_one_contour_per_loop() {
		let (subject, clip) = overlapping_squares();
		let mut operation = prepared(&subject, &clip).marked(false, false);
		let result = operation.graph_from_intersections();

		assert_eq!(result.contours().len(), 1);
		// Two whole sides and two partial sides from each square
		let contour = &result.contours()[0];
		assert_eq!(contour.edges().len(), 8);
		assert!(compare_points(contour.edges()[7].end(), contour.first_point()));
		assert!(operation.first_unprocessed_crossing().is_none());
	}

	#[test]
	fn test_intersection_walk() {
		let (subject, clip) = overlapping_squares();
		let mut operation = prepared(&subject, &clip).marked(true, true);
		let result = operation.graph_from_intersections();

		assert_eq!(result.contours().len(), 1);
		assert_eq!(result.contours()[0].edges().len(), 4);
		let bounds = result.bounds();
		assert!(compare_points(bounds.min(), DVec2::new(5., 5.)));
		assert!(compare_points(bounds.max(), DVec2::new(10., 10.)));
	}

	#[test]
	fn test_equivalent_pairs_are_taken_out() {
		let subject = Graph::rectangle(DVec2::new(0., 0.), DVec2::new(10., 10.));
		let clip = subject.clone();
		let operation = prepared(&subject, &clip);
		let (mut ours, mut theirs) = operation.nonintersecting_lists();

		let pairs = operation.take_equivalent_pairs(&mut ours, &mut theirs);
		assert_eq!(pairs, [(ContourId::new(Operand::Subject, 0), ContourId::new(Operand::Clip, 0))]);
		assert!(ours.is_empty());
		assert!(theirs.is_empty());
	}
}
