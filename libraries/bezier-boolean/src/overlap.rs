use crate::consts::{OVERLAP_CLOSE, TANGENT_OFFSET_STEP};
use crate::contour::Contour;
use crate::crossing::{ContourId, EdgeId};
use crate::curve::Curve;
use crate::intersection::IntersectRange;
use crate::util::math::{TangentPair, are_values_close};

use glam::DVec2;

/// A stretch where an edge of the subject contour runs along an edge of the clip contour.
#[derive(Clone, Debug)]
pub(crate) struct EdgeOverlap {
	pub range: IntersectRange,
	pub edge1: EdgeId,
	pub edge2: EdgeId,
}

impl EdgeOverlap {
	pub(crate) fn new(range: IntersectRange, edge1: EdgeId, edge2: EdgeId) -> Self {
		Self { range, edge1, edge2 }
	}

	/// Whether `next` continues this overlap along the subject contour, which has `edge_count` edges.
	pub(crate) fn fits_before(&self, next: &EdgeOverlap, edge_count: usize) -> bool {
		if are_values_close(self.range.range1().max, 1., OVERLAP_CLOSE) {
			return next.edge1 == self.edge1.next(edge_count) && are_values_close(next.range.range1().min, 0., OVERLAP_CLOSE);
		}
		next.edge1 == self.edge1 && are_values_close(next.range.range1().min, self.range.range1().max, OVERLAP_CLOSE)
	}

	/// Whether this overlap continues `previous` along the subject contour, which has `edge_count` edges.
	pub(crate) fn fits_after(&self, previous: &EdgeOverlap, edge_count: usize) -> bool {
		if are_values_close(self.range.range1().min, 0., OVERLAP_CLOSE) {
			return previous.edge1 == self.edge1.previous(edge_count) && are_values_close(previous.range.range1().max, 1., OVERLAP_CLOSE);
		}
		previous.edge1 == self.edge1 && are_values_close(previous.range.range1().max, self.range.range1().min, OVERLAP_CLOSE)
	}

	/// Whether `parameter` on `edge` lies inside the overlap. An end of the overlap that continues into a neighbouring overlap of the same run is open.
	fn contains_parameter(&self, parameter: f64, edge: EdgeId, extends_before_start: bool, extends_after_end: bool) -> bool {
		if extends_before_start && extends_after_end {
			return true;
		}

		let range = if edge == self.edge1 { self.range.range1() } else { self.range.range2() };
		let in_left_side = if extends_before_start { parameter >= 0. } else { parameter > range.min };
		let in_right_side = if extends_after_end { parameter <= 1. } else { parameter < range.max };
		in_left_side && in_right_side
	}
}

/// A maximal chain of edge overlaps that follow one another along both contours.
#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeOverlapRun {
	pub overlaps: Vec<EdgeOverlap>,
}

impl EdgeOverlapRun {
	/// Adds the overlap at whichever end of the run it continues, or hands it back if it continues neither.
	pub(crate) fn try_insert(&mut self, overlap: EdgeOverlap, edge_count: usize) -> Result<(), EdgeOverlap> {
		let (Some(first), Some(last)) = (self.overlaps.first(), self.overlaps.last()) else {
			self.overlaps.push(overlap);
			return Ok(());
		};

		if last.fits_before(&overlap, edge_count) {
			self.overlaps.push(overlap);
			Ok(())
		} else if first.fits_after(&overlap, edge_count) {
			self.overlaps.insert(0, overlap);
			Ok(())
		} else {
			Err(overlap)
		}
	}

	/// The run closes on itself, so the two contours coincide completely.
	pub(crate) fn is_complete(&self, edge_count: usize) -> bool {
		match (self.overlaps.first(), self.overlaps.last()) {
			(Some(first), Some(last)) => last.fits_before(first, edge_count),
			_ => false,
		}
	}

	pub(crate) fn contains_parameter(&self, parameter: f64, edge: EdgeId, edge_count: usize) -> bool {
		let (Some(first), Some(last)) = (self.overlaps.first(), self.overlaps.last()) else { return false };
		let Some(position) = self.overlaps.iter().position(|overlap| overlap.edge1 == edge || overlap.edge2 == edge) else { return false };

		let at_the_start = position == 0;
		let extends_before_start = !at_the_start || last.fits_before(first, edge_count);
		let at_the_end = position == self.overlaps.len() - 1;
		let extends_after_end = !at_the_end || first.fits_after(last, edge_count);

		self.overlaps[position].contains_parameter(parameter, edge, extends_before_start, extends_after_end)
	}

	/// The overlap in the middle of the run, where a crossing standing in for the whole run is placed.
	pub(crate) fn middle_overlap(&self) -> Option<&EdgeOverlap> {
		self.overlaps.get(self.overlaps.len() / 2)
	}

	/// Whether the subject contour passes from one side of the clip contour to the other across the run.
	///
	/// When the tangents either side of the run never become distinguishable, a point just beyond each end of the run is tested against `contour2` instead.
	pub(crate) fn is_crossing(&self, contour1: &Contour, contour2: &Contour) -> bool {
		let (Some(first), Some(last)) = (self.overlaps.first(), self.overlaps.last()) else { return false };

		let arms1 = subject_arms(first, last, contour1);
		let arms2 = clip_arms(first, last, contour2);
		let max_offset = arms1.min_length().min(arms2.min_length());

		let mut offset = 0.;
		let tangents = loop {
			let tangents1 = arms1.tangents(offset);
			let tangents2 = arms2.tangents(offset);
			offset += TANGENT_OFFSET_STEP;
			if !tangents1.is_ambiguous_with(&tangents2) || offset >= max_offset {
				break (tangents1, tangents2);
			}
		};
		if tangents.0.crosses(&tangents.1) {
			return true;
		}

		let (left, right) = arms1.test_points(1.);
		contour2.contains_point(left) != contour2.contains_point(right)
	}
}

/// A curve leading away from one end of an overlap run.
#[derive(Clone, Copy)]
struct Arm<'a> {
	curve: &'a Curve,
	/// The run is at the end of `curve`, so the arm leaves backwards from there.
	leaves_from_end: bool,
}

impl Arm<'_> {
	fn tangent(&self, offset: f64) -> DVec2 {
		if self.leaves_from_end { self.curve.tangent_from_right_offset(offset) } else { self.curve.tangent_from_left_offset(offset) }
	}

	fn point(&self, offset: f64) -> DVec2 {
		if self.leaves_from_end { self.curve.point_from_right_offset(offset) } else { self.curve.point_from_left_offset(offset) }
	}
}

struct Arms<'a> {
	left: Arm<'a>,
	right: Arm<'a>,
}

impl Arms<'_> {
	fn tangents(&self, offset: f64) -> TangentPair {
		TangentPair {
			left: self.left.tangent(offset),
			right: self.right.tangent(offset),
		}
	}

	fn test_points(&self, offset: f64) -> (DVec2, DVec2) {
		(self.left.point(offset), self.right.point(offset))
	}

	fn min_length(&self) -> f64 {
		self.left.curve.length().min(self.right.curve.length())
	}
}

fn subject_arms<'a>(first: &'a EdgeOverlap, last: &'a EdgeOverlap, contour1: &'a Contour) -> Arms<'a> {
	let left = if first.range.is_at_start_of_curve1() {
		contour1.neighbours(first.edge1.edge).previous
	} else {
		first.range.curve1_left()
	};
	let right = if last.range.is_at_stop_of_curve1() {
		contour1.neighbours(last.edge1.edge).next
	} else {
		last.range.curve1_right()
	};

	Arms {
		left: Arm { curve: left, leaves_from_end: true },
		right: Arm { curve: right, leaves_from_end: false },
	}
}

/// The clip contour's curves leading away from the run, in the subject contour's direction of travel.
fn clip_arms<'a>(first: &'a EdgeOverlap, last: &'a EdgeOverlap, contour2: &'a Contour) -> Arms<'a> {
	if !first.range.is_reversed() {
		let left = if first.range.is_at_start_of_curve2() {
			contour2.neighbours(first.edge2.edge).previous
		} else {
			first.range.curve2_left()
		};
		let right = if last.range.is_at_stop_of_curve2() {
			contour2.neighbours(last.edge2.edge).next
		} else {
			last.range.curve2_right()
		};
		return Arms {
			left: Arm { curve: left, leaves_from_end: true },
			right: Arm { curve: right, leaves_from_end: false },
		};
	}

	let left = if first.range.is_at_stop_of_curve2() {
		contour2.neighbours(first.edge2.edge).next
	} else {
		first.range.curve2_right()
	};
	let right = if last.range.is_at_start_of_curve2() {
		contour2.neighbours(last.edge2.edge).previous
	} else {
		last.range.curve2_left()
	};
	Arms {
		left: Arm { curve: left, leaves_from_end: false },
		right: Arm { curve: right, leaves_from_end: true },
	}
}

/// Every overlap found between one subject contour and one clip contour, grouped into runs.
#[derive(Clone, Debug)]
pub(crate) struct ContourOverlap {
	pub contour1: ContourId,
	pub contour2: ContourId,
	/// Number of edges in the subject contour, used to follow runs around it.
	edge_count: usize,
	pub runs: Vec<EdgeOverlapRun>,
}

impl ContourOverlap {
	pub(crate) fn new(contour1: ContourId, contour2: ContourId, edge_count: usize) -> Self {
		Self {
			contour1,
			contour2,
			edge_count,
			runs: Vec::new(),
		}
	}

	/// Extends the last run, or failing that the first, or starts a new run.
	pub(crate) fn add(&mut self, range: IntersectRange, edge1: EdgeId, edge2: EdgeId) {
		let mut overlap = EdgeOverlap::new(range, edge1, edge2);

		let run_count = self.runs.len();
		if let Some(last) = self.runs.last_mut() {
			match last.try_insert(overlap, self.edge_count) {
				Ok(()) => return,
				Err(rejected) => overlap = rejected,
			}
		}
		if run_count > 1 {
			match self.runs[0].try_insert(overlap, self.edge_count) {
				Ok(()) => return,
				Err(rejected) => overlap = rejected,
			}
		}

		self.runs.push(EdgeOverlapRun { overlaps: vec![overlap] });
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.runs.is_empty()
	}

	/// A single run closing on itself means the contours are the same shape.
	pub(crate) fn is_complete(&self) -> bool {
		self.runs.len() == 1 && self.runs[0].is_complete(self.edge_count)
	}

	pub(crate) fn contains_parameter(&self, parameter: f64, edge: EdgeId) -> bool {
		self.runs.iter().any(|run| run.contains_parameter(parameter, edge, self.edge_count))
	}

	pub(crate) fn involves(&self, contour: ContourId) -> bool {
		self.contour1 == contour || self.contour2 == contour
	}

	pub(crate) fn is_between(&self, contour1: ContourId, contour2: ContourId) -> bool {
		(self.contour1 == contour1 && self.contour2 == contour2) || (self.contour1 == contour2 && self.contour2 == contour1)
	}
}
