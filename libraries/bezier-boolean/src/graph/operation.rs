use super::Graph;
use crate::contour::{Contour, ContourInside};
use crate::crossing::{ContourId, Crossing, CrossingId, EdgeId, EdgeNeighbours, Operand};
use crate::curve::Curve;
use crate::intersection::Intersection;
use crate::overlap::ContourOverlap;
use crate::util::range::ParameterRange;

use smallvec::SmallVec;

/// Per-edge bookkeeping for the duration of one operation.
#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeState {
	/// The edge's start point is shared with an edge of some other contour.
	pub start_shared: bool,
	/// Crossings on the edge, sorted by parameter.
	pub crossings: SmallVec<[CrossingId; 4]>,
}

/// Workspace for one boolean operation between a subject and a clip graph.
///
/// Crossings, overlaps and the inside classification of each contour only live here, so the graphs themselves are only ever borrowed and come out of an operation unchanged.
pub(crate) struct Operation<'a> {
	graphs: [&'a Graph; 2],
	edges: [Vec<Vec<EdgeState>>; 2],
	insides: [Vec<ContourInside>; 2],
	pub crossings: Vec<Crossing>,
	intersections: Vec<Intersection>,
	pub overlaps: Vec<ContourOverlap>,
}

impl<'a> Operation<'a> {
	pub(crate) fn new(subject: &'a Graph, clip: &'a Graph) -> Self {
		let edges = |graph: &Graph| graph.contours().iter().map(|contour| vec![EdgeState::default(); contour.edges().len()]).collect();
		let insides = |graph: &Graph| graph.contours().iter().map(Contour::inside).collect();

		Self {
			graphs: [subject, clip],
			edges: [edges(subject), edges(clip)],
			insides: [insides(subject), insides(clip)],
			crossings: Vec::new(),
			intersections: Vec::new(),
			overlaps: Vec::new(),
		}
	}

	// Contours and edges

	pub(crate) fn graph(&self, operand: Operand) -> &'a Graph {
		self.graphs[operand.index()]
	}

	pub(crate) fn contour(&self, id: ContourId) -> &'a Contour {
		&self.graph(id.operand).contours()[id.contour]
	}

	pub(crate) fn contour_ids(&self, operand: Operand) -> impl Iterator<Item = ContourId> + use<> {
		(0..self.graph(operand).contours().len()).map(move |contour| ContourId::new(operand, contour))
	}

	pub(crate) fn edge_ids(&self, contour: ContourId) -> impl Iterator<Item = EdgeId> + use<> {
		(0..self.contour(contour).edges().len()).map(move |edge| contour.edge(edge))
	}

	pub(crate) fn curve(&self, edge: EdgeId) -> &'a Curve {
		&self.contour(edge.contour).edges()[edge.edge]
	}

	pub(crate) fn neighbours(&self, edge: EdgeId) -> EdgeNeighbours<'a> {
		self.contour(edge.contour).neighbours(edge.edge)
	}

	pub(crate) fn next_edge(&self, edge: EdgeId) -> EdgeId {
		edge.next(self.contour(edge.contour).edges().len())
	}

	pub(crate) fn previous_edge(&self, edge: EdgeId) -> EdgeId {
		edge.previous(self.contour(edge.contour).edges().len())
	}

	pub(crate) fn edge_state(&self, edge: EdgeId) -> &EdgeState {
		&self.edges[edge.contour.operand.index()][edge.contour.contour][edge.edge]
	}

	pub(crate) fn edge_state_mut(&mut self, edge: EdgeId) -> &mut EdgeState {
		&mut self.edges[edge.contour.operand.index()][edge.contour.contour][edge.edge]
	}

	pub(crate) fn inside(&self, contour: ContourId) -> ContourInside {
		self.insides[contour.operand.index()][contour.contour]
	}

	pub(crate) fn set_inside(&mut self, contour: ContourId, inside: ContourInside) {
		self.insides[contour.operand.index()][contour.contour] = inside;
	}

	// Crossings

	pub(crate) fn crossing(&self, id: CrossingId) -> &Crossing {
		&self.crossings[id.0]
	}

	pub(crate) fn crossing_mut(&mut self, id: CrossingId) -> &mut Crossing {
		&mut self.crossings[id.0]
	}

	pub(crate) fn intersection(&self, id: CrossingId) -> &Intersection {
		&self.intersections[self.crossing(id).intersection]
	}

	pub(crate) fn parameter(&self, id: CrossingId) -> f64 {
		self.crossing(id).parameter(self.intersection(id))
	}

	pub(crate) fn is_at_start(&self, id: CrossingId) -> bool {
		self.crossing(id).is_at_start(self.intersection(id))
	}

	pub(crate) fn is_at_end(&self, id: CrossingId) -> bool {
		self.crossing(id).is_at_end(self.intersection(id))
	}

	pub(crate) fn counterpart(&self, id: CrossingId) -> CrossingId {
		self.crossing(id).counterpart
	}

	/// Records an intersection between two edges as a pair of crossings, one on each edge.
	pub(crate) fn add_crossing_pair(&mut self, intersection: Intersection, edge1: EdgeId, edge2: EdgeId, is_self: bool, from_overlap: bool) {
		let intersection_index = self.intersections.len();
		self.intersections.push(intersection);

		let id1 = CrossingId(self.crossings.len());
		let id2 = CrossingId(id1.0 + 1);
		for (id, edge, on_curve1, counterpart) in [(id1, edge1, true, id2), (id2, edge2, false, id1)] {
			let mut crossing = Crossing::new(intersection_index, on_curve1, edge, counterpart);
			crossing.is_self = is_self;
			crossing.from_overlap = from_overlap;
			self.crossings.push(crossing);
			self.attach(id);
		}
	}

	fn attach(&mut self, id: CrossingId) {
		let edge = self.crossing(id).edge;
		let mut crossings = std::mem::take(&mut self.edge_state_mut(edge).crossings);
		crossings.push(id);
		crossings.sort_by(|&a, &b| self.parameter(a).total_cmp(&self.parameter(b)));
		self.reindex(edge, crossings);
	}

	/// Takes the crossing off its edge. It stays in the arena but is no longer reachable from the edge.
	pub(crate) fn remove_crossing(&mut self, id: CrossingId) {
		if !self.crossing(id).attached {
			return;
		}
		let edge = self.crossing(id).edge;
		let mut crossings = std::mem::take(&mut self.edge_state_mut(edge).crossings);
		crossings.retain(|&mut other| other != id);
		self.crossing_mut(id).attached = false;
		self.reindex(edge, crossings);
	}

	/// Removes a crossing along with its counterpart on the other edge.
	pub(crate) fn remove_crossing_pair(&mut self, id: CrossingId) {
		let counterpart = self.counterpart(id);
		self.remove_crossing(id);
		self.remove_crossing(counterpart);
	}

	fn reindex(&mut self, edge: EdgeId, crossings: SmallVec<[CrossingId; 4]>) {
		for (index, &id) in crossings.iter().enumerate() {
			self.crossing_mut(id).index = index;
		}
		self.edge_state_mut(edge).crossings = crossings;
	}

	pub(crate) fn edge_crossings(&self, edge: EdgeId) -> &[CrossingId] {
		&self.edge_state(edge).crossings
	}

	pub(crate) fn first_crossing(&self, edge: EdgeId) -> Option<CrossingId> {
		self.edge_crossings(edge).first().copied()
	}

	pub(crate) fn last_crossing(&self, edge: EdgeId) -> Option<CrossingId> {
		self.edge_crossings(edge).last().copied()
	}

	pub(crate) fn first_nonself_crossing(&self, edge: EdgeId) -> Option<CrossingId> {
		self.edge_crossings(edge).iter().copied().find(|&id| !self.crossing(id).is_self)
	}

	pub(crate) fn last_nonself_crossing(&self, edge: EdgeId) -> Option<CrossingId> {
		self.edge_crossings(edge).iter().copied().rfind(|&id| !self.crossing(id).is_self)
	}

	/// The next crossing along the same edge that is not a self crossing.
	pub(crate) fn next_nonself_crossing(&self, id: CrossingId) -> Option<CrossingId> {
		let crossing = self.crossing(id);
		self.edge_crossings(crossing.edge).iter().skip(crossing.index + 1).copied().find(|&id| !self.crossing(id).is_self)
	}

	/// The previous crossing along the same edge that is not a self crossing.
	pub(crate) fn previous_nonself_crossing(&self, id: CrossingId) -> Option<CrossingId> {
		let crossing = self.crossing(id);
		self.edge_crossings(crossing.edge)[..crossing.index].iter().copied().rfind(|&id| !self.crossing(id).is_self)
	}

	/// Part of the crossing's edge between two crossings on it. A missing start means the start of the edge and a missing end the end of the edge.
	pub(crate) fn curve_between(&self, start: Option<CrossingId>, end: Option<CrossingId>) -> Option<Curve> {
		match (start, end) {
			(None, Some(end)) => self.crossing(end).left_curve(self.intersection(end)).cloned(),
			(Some(start), None) => self.crossing(start).right_curve(self.intersection(start)).cloned(),
			(Some(start), Some(end)) => Some(self.curve(self.crossing(start).edge).subcurve(ParameterRange::new(self.parameter(start), self.parameter(end)))),
			(None, None) => None,
		}
	}

	pub(crate) fn mark_all_unprocessed(&mut self) {
		self.crossings.iter_mut().for_each(|crossing| crossing.processed = false);
	}

	pub(crate) fn self_crossing_count(&self) -> usize {
		self.crossings.iter().filter(|crossing| crossing.attached && crossing.is_self).count() / 2
	}

	pub(crate) fn crossing_count(&self) -> usize {
		self.crossings.iter().filter(|crossing| crossing.attached && !crossing.is_self).count() / 2
	}

	// Relations between contours

	/// Contours of the other graph that `contour` crosses.
	pub(crate) fn intersecting_contours(&self, contour: ContourId) -> Vec<ContourId> {
		let mut contours = Vec::new();
		for edge in self.edge_ids(contour) {
			for &id in self.edge_crossings(edge) {
				if self.crossing(id).is_self {
					continue;
				}
				let other = self.crossing(self.counterpart(id)).edge.contour;
				if !contours.contains(&other) {
					contours.push(other);
				}
			}
		}
		contours
	}

	/// Every contour of the same graph connected to `contour` through self crossings, directly or through other contours.
	pub(crate) fn self_intersecting_contours(&self, contour: ContourId) -> Vec<ContourId> {
		let mut contours = Vec::new();
		self.collect_self_intersecting_contours(contour, contour, &mut contours);
		contours
	}

	fn collect_self_intersecting_contours(&self, contour: ContourId, original: ContourId, contours: &mut Vec<ContourId>) {
		for edge in self.edge_ids(contour) {
			for &id in self.edge_crossings(edge) {
				if !self.crossing(id).is_self {
					continue;
				}
				let other = self.crossing(self.counterpart(id)).edge.contour;
				if other != original && !contours.contains(&other) {
					contours.push(other);
					self.collect_self_intersecting_contours(other, original, contours);
				}
			}
		}
	}

	/// Whether `contour` has a self crossing with `other`.
	pub(crate) fn crosses_own_contour(&self, contour: ContourId, other: ContourId) -> bool {
		self.edge_ids(contour).any(|edge| {
			self.edge_crossings(edge).iter().any(|&id| self.crossing(id).is_self && self.crossing(self.counterpart(id)).edge.contour == other)
		})
	}

	/// Contours with no crossings with the other graph.
	pub(crate) fn nonintersecting_contours(&self, operand: Operand) -> Vec<ContourId> {
		self.contour_ids(operand).filter(|&contour| self.intersecting_contours(contour).is_empty()).collect()
	}

	// Overlaps

	fn contour_overlaps(&self, contour: ContourId) -> impl Iterator<Item = &ContourOverlap> {
		self.overlaps.iter().filter(move |overlap| overlap.involves(contour))
	}

	pub(crate) fn overlap_contains_parameter(&self, contour: ContourId, parameter: f64, edge: EdgeId) -> bool {
		self.contour_overlaps(contour).any(|overlap| overlap.contains_parameter(parameter, edge))
	}

	pub(crate) fn overlap_contains_crossing(&self, contour: ContourId, id: CrossingId) -> bool {
		self.overlap_contains_parameter(contour, self.parameter(id), self.crossing(id).edge)
	}

	/// The two contours run along each other all the way round.
	pub(crate) fn is_equivalent(&self, contour: ContourId, other: ContourId) -> bool {
		self.contour_overlaps(contour).any(|overlap| overlap.is_between(contour, other) && overlap.is_complete())
	}
}
