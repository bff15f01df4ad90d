mod assembly;
mod containment;
mod crossings;
mod marking;
mod operation;

use crate::contour::{Contour, ContourInside, EdgeLocation};
use crate::crossing::Operand;
use crate::curve::Curve;
use crate::util::aabb::Aabb;
use operation::Operation;

use glam::DVec2;
use std::cell::OnceCell;

/// Magic number for approximating a quarter of a circle with one cubic.
const ELLIPSE_KAPPA: f64 = 0.5522847498;

/// A region of the plane made up of closed contours, filled with the even-odd rule.
///
/// Boolean operations borrow both graphs and return a new one, leaving the inputs as they were.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	contours: Vec<Contour>,
	bounds: OnceCell<Aabb>,
}

impl PartialEq for Graph {
	fn eq(&self, other: &Self) -> bool {
		self.contours == other.contours
	}
}

impl FromIterator<Contour> for Graph {
	fn from_iter<T: IntoIterator<Item = Contour>>(iter: T) -> Self {
		let mut graph = Graph::new();
		iter.into_iter().for_each(|contour| graph.add_contour(contour));
		graph
	}
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	/// An axis-aligned rectangle going clockwise from `min`.
	pub fn rectangle(min: DVec2, max: DVec2) -> Self {
		let corners = [min, DVec2::new(max.x, min.y), max, DVec2::new(min.x, max.y)];
		let contour: Contour = (0..4).map(|index| Curve::line(corners[index], corners[(index + 1) % 4])).collect();
		Self::from_iter([contour])
	}

	/// An axis-aligned ellipse made of four cubic arcs, going clockwise from its rightmost point.
	pub fn ellipse(center: DVec2, radii: DVec2) -> Self {
		let handle = radii * ELLIPSE_KAPPA;
		let right = center + DVec2::new(radii.x, 0.);
		let bottom = center + DVec2::new(0., radii.y);
		let left = center - DVec2::new(radii.x, 0.);
		let top = center - DVec2::new(0., radii.y);

		let contour: Contour = [
			Curve::new(right, right + DVec2::new(0., handle.y), bottom + DVec2::new(handle.x, 0.), bottom),
			Curve::new(bottom, bottom - DVec2::new(handle.x, 0.), left + DVec2::new(0., handle.y), left),
			Curve::new(left, left - DVec2::new(0., handle.y), top - DVec2::new(handle.x, 0.), top),
			Curve::new(top, top + DVec2::new(handle.x, 0.), right - DVec2::new(0., handle.y), right),
		]
		.into_iter()
		.collect();
		Self::from_iter([contour])
	}

	pub fn circle(center: DVec2, radius: f64) -> Self {
		Self::ellipse(center, DVec2::splat(radius))
	}

	pub fn add_contour(&mut self, contour: Contour) {
		self.contours.push(contour);
		self.bounds.take();
	}

	pub fn contours(&self) -> &[Contour] {
		&self.contours
	}

	pub fn is_empty(&self) -> bool {
		self.contours.is_empty()
	}

	/// Tight bounds of every contour.
	pub fn bounds(&self) -> Aabb {
		*self.bounds.get_or_init(|| self.contours.iter().fold(Aabb::default(), |bounds, contour| bounds.union(&contour.bounds())))
	}

	/// Even-odd containment across all contours.
	pub fn contains_point(&self, point: DVec2) -> bool {
		self.contours.iter().filter(|contour| contour.contains_point(point)).count() % 2 == 1
	}

	/// The closest point on any contour, given by the index of that contour and the location on it.
	pub fn closest_location_to_point(&self, point: DVec2) -> Option<(usize, EdgeLocation)> {
		self.contours
			.iter()
			.enumerate()
			.filter_map(|(index, contour)| contour.closest_location_to_point(point).map(|location| (index, location)))
			.min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
	}

	/// Tags every contour as filled or a hole from how many of the other contours surround it.
	pub fn classify_insides(&mut self) {
		let insides: Vec<ContourInside> = {
			let empty = Graph::new();
			let mut operation = Operation::new(self, &empty);
			operation.insert_self_crossings(Operand::Subject);
			operation.contour_ids(Operand::Subject).map(|contour| operation.inside(contour)).collect()
		};

		for (contour, inside) in self.contours.iter_mut().zip(insides) {
			contour.set_inside(inside);
		}
	}

	/// The area covered by either graph.
	pub fn union(&self, other: &Graph) -> Graph {
		assembly::union(self, other)
	}

	/// The area covered by both graphs.
	pub fn intersect(&self, other: &Graph) -> Graph {
		assembly::intersect(self, other)
	}

	/// The area covered by this graph but not by `other`.
	pub fn subtract(&self, other: &Graph) -> Graph {
		assembly::subtract(self, other)
	}

	/// The area covered by exactly one of the graphs, built as the union of the two subtractions.
	pub fn difference(&self, other: &Graph) -> Graph {
		self.subtract(other).union(&other.subtract(self))
	}

	/// The area covered by exactly one of the graphs, built by subtracting the intersection from the union found in the same pass.
	///
	/// Prefer [`Graph::difference`].
	pub fn difference_two_pass(&self, other: &Graph) -> Graph {
		assembly::difference_two_pass(self, other)
	}
}
