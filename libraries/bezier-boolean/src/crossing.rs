use crate::consts::TANGENT_OFFSET_STEP;
use crate::curve::Curve;
use crate::intersection::{IntersectRange, Intersection};
use crate::util::math::TangentPair;

/// Which of the two graphs taking part in an operation something belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Operand {
	Subject,
	Clip,
}

impl Operand {
	pub(crate) fn index(self) -> usize {
		match self {
			Operand::Subject => 0,
			Operand::Clip => 1,
		}
	}

	pub(crate) fn other(self) -> Self {
		match self {
			Operand::Subject => Operand::Clip,
			Operand::Clip => Operand::Subject,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ContourId {
	pub operand: Operand,
	pub contour: usize,
}

impl ContourId {
	pub(crate) fn new(operand: Operand, contour: usize) -> Self {
		Self { operand, contour }
	}

	pub(crate) fn edge(self, edge: usize) -> EdgeId {
		EdgeId { contour: self, edge }
	}
}

/// An edge of a contour, found by its position in that contour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct EdgeId {
	pub contour: ContourId,
	pub edge: usize,
}

impl EdgeId {
	/// The following edge of a contour with `edge_count` edges, wrapping around to the first.
	pub(crate) fn next(self, edge_count: usize) -> Self {
		Self {
			edge: (self.edge + 1) % edge_count.max(1),
			..self
		}
	}

	/// The preceding edge of a contour with `edge_count` edges, wrapping around to the last.
	pub(crate) fn previous(self, edge_count: usize) -> Self {
		Self {
			edge: (self.edge + edge_count.max(1) - 1) % edge_count.max(1),
			..self
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct CrossingId(pub usize);

/// One side of an intersection between two edges, anchored to one of them.
///
/// Crossings always come in pairs, one on each edge, linked through `counterpart`. They share a single [Intersection], with `on_curve1` telling which of its two curves is this crossing's edge.
#[derive(Clone, Debug)]
pub(crate) struct Crossing {
	pub intersection: usize,
	pub on_curve1: bool,
	pub edge: EdgeId,
	pub counterpart: CrossingId,
	/// Position in the edge's list of crossings, which is sorted by parameter.
	pub index: usize,
	/// Both edges belong to the same graph.
	pub is_self: bool,
	/// Stands in for a run of overlapping edges rather than a point where the edges cross.
	pub from_overlap: bool,
	pub entry: bool,
	pub processed: bool,
	/// Cleared once the crossing has been removed from its edge.
	pub attached: bool,
}

impl Crossing {
	pub(crate) fn new(intersection: usize, on_curve1: bool, edge: EdgeId, counterpart: CrossingId) -> Self {
		Self {
			intersection,
			on_curve1,
			edge,
			counterpart,
			index: 0,
			is_self: false,
			from_overlap: false,
			entry: false,
			processed: false,
			attached: true,
		}
	}

	pub(crate) fn parameter(&self, intersection: &Intersection) -> f64 {
		if self.on_curve1 { intersection.parameter1() } else { intersection.parameter2() }
	}

	pub(crate) fn is_at_start(&self, intersection: &Intersection) -> bool {
		if self.on_curve1 { intersection.is_at_start_of_curve1() } else { intersection.is_at_start_of_curve2() }
	}

	pub(crate) fn is_at_end(&self, intersection: &Intersection) -> bool {
		if self.on_curve1 { intersection.is_at_stop_of_curve1() } else { intersection.is_at_stop_of_curve2() }
	}

	/// The part of the edge before this crossing, if the crossing is not at the edge's start.
	pub(crate) fn left_curve<'a>(&self, intersection: &'a Intersection) -> Option<&'a Curve> {
		if self.is_at_start(intersection) {
			return None;
		}
		Some(if self.on_curve1 { intersection.curve1_left() } else { intersection.curve2_left() })
	}

	/// The part of the edge after this crossing, if the crossing is not at the edge's end.
	pub(crate) fn right_curve<'a>(&self, intersection: &'a Intersection) -> Option<&'a Curve> {
		if self.is_at_end(intersection) {
			return None;
		}
		Some(if self.on_curve1 { intersection.curve1_right() } else { intersection.curve2_right() })
	}
}

/// An edge together with the closest non-degenerate edges before and after it in its contour.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EdgeNeighbours<'a> {
	pub curve: &'a Curve,
	pub previous: &'a Curve,
	pub next: &'a Curve,
}

impl<'a> EdgeNeighbours<'a> {
	/// A curve standing alone, such as a test ray, is its own neighbour on both sides.
	pub(crate) fn isolated(curve: &'a Curve) -> Self {
		Self { curve, previous: curve, next: curve }
	}
}

/// Tangents of two paths meeting at a point, sampled further and further away from it until they can be told apart.
fn tangents_cross(left1: &Curve, right1: &Curve, left2: &Curve, right2: &Curve) -> bool {
	let max_offset = left1.length().min(right1.length()).min(left2.length()).min(right2.length());

	let mut offset = 0.;
	loop {
		let tangents1 = TangentPair {
			left: left1.tangent_from_right_offset(offset),
			right: right1.tangent_from_left_offset(offset),
		};
		let tangents2 = TangentPair {
			left: left2.tangent_from_right_offset(offset),
			right: right2.tangent_from_left_offset(offset),
		};

		offset += TANGENT_OFFSET_STEP;
		if !tangents1.is_ambiguous_with(&tangents2) || offset >= max_offset {
			return tangents1.crosses(&tangents2);
		}
	}
}

/// Whether the path through `edge1` passes to the other side of the path through `edge2` at `intersection`, where `edge1` is the intersection's first curve.
///
/// Tangent touches never cross. Away from the edge endpoints any other intersection is a crossing. At an endpoint the neighbouring edges decide.
pub(crate) fn crosses_edge(edge1: &EdgeNeighbours, edge2: &EdgeNeighbours, intersection: &Intersection) -> bool {
	if intersection.is_tangent() {
		return false;
	}
	if !intersection.is_at_endpoint() {
		return true;
	}

	let (left1, right1) = if intersection.is_at_start_of_curve1() {
		(edge1.previous, edge1.curve)
	} else if intersection.is_at_stop_of_curve1() {
		(edge1.curve, edge1.next)
	} else {
		(intersection.curve1_left(), intersection.curve1_right())
	};
	let (left2, right2) = if intersection.is_at_start_of_curve2() {
		(edge2.previous, edge2.curve)
	} else if intersection.is_at_stop_of_curve2() {
		(edge2.curve, edge2.next)
	} else {
		(intersection.curve2_left(), intersection.curve2_right())
	};

	tangents_cross(left1, right1, left2, right2)
}

/// Whether the path through `edge1` passes to the other side of the path through `edge2` across a stretch where they overlap, judged from the curves leading into and out of the overlap.
pub(crate) fn crosses_edge_range(edge1: &EdgeNeighbours, edge2: &EdgeNeighbours, range: &IntersectRange) -> bool {
	let left1 = if range.is_at_start_of_curve1() { edge1.previous } else { range.curve1_left() };
	let right1 = if range.is_at_stop_of_curve1() { edge1.next } else { range.curve1_right() };
	let left2 = if range.is_at_start_of_curve2() { edge2.previous } else { range.curve2_left() };
	let right2 = if range.is_at_stop_of_curve2() { edge2.next } else { range.curve2_right() };

	tangents_cross(left1, right1, left2, right2)
}
