use crate::consts::{POINT_CLOSE, RAY_OVERLAP};
use crate::crossing::{EdgeNeighbours, crosses_edge, crosses_edge_range};
use crate::curve::Curve;
use crate::intersection::Intersection;
use crate::util::aabb::Aabb;
use crate::util::math::are_points_close;

use glam::DVec2;
use std::cell::OnceCell;
use std::ops::ControlFlow;

/// Whether a contour bounds filled area or a hole in the area of the contours around it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContourInside {
	#[default]
	Filled,
	Hole,
}

/// Winding direction of a contour, in a coordinate system whose y axis points down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContourDirection {
	Clockwise,
	AntiClockwise,
}

/// Closest point on a contour, given by the edge it lies on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeLocation {
	/// Index of the edge within the contour.
	pub edge: usize,
	pub parameter: f64,
	pub distance: f64,
}

/// A closed loop of curves, each one starting where the previous one ends.
#[derive(Clone, Debug, Default)]
pub struct Contour {
	edges: Vec<Curve>,
	inside: ContourInside,
	bounds: OnceCell<Aabb>,
	bounding_box: OnceCell<Aabb>,
}

impl PartialEq for Contour {
	fn eq(&self, other: &Self) -> bool {
		self.edges == other.edges && self.inside == other.inside
	}
}

impl FromIterator<Curve> for Contour {
	fn from_iter<T: IntoIterator<Item = Curve>>(iter: T) -> Self {
		let mut contour = Contour::new();
		contour.extend(iter);
		contour
	}
}

impl Extend<Curve> for Contour {
	fn extend<T: IntoIterator<Item = Curve>>(&mut self, iter: T) {
		iter.into_iter().for_each(|edge| self.add_edge(edge));
	}
}

impl Contour {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_edge(&mut self, edge: Curve) {
		self.edges.push(edge);
		self.bounds.take();
		self.bounding_box.take();
	}

	pub fn edges(&self) -> &[Curve] {
		&self.edges
	}

	pub fn is_empty(&self) -> bool {
		self.edges.is_empty()
	}

	pub fn inside(&self) -> ContourInside {
		self.inside
	}

	pub(crate) fn set_inside(&mut self, inside: ContourInside) {
		self.inside = inside;
	}

	/// Tight bounds of all the edges. Empty when the contour has no edges.
	pub fn bounds(&self) -> Aabb {
		*self.bounds.get_or_init(|| self.edges.iter().fold(Aabb::default(), |bounds, edge| bounds.union(&edge.bounds())))
	}

	/// Bounds of all the control points.
	pub fn bounding_box(&self) -> Aabb {
		*self.bounding_box.get_or_init(|| self.edges.iter().fold(Aabb::default(), |bounds, edge| bounds.union(&edge.bounding_box())))
	}

	/// Start of the first edge, or the origin for an empty contour.
	pub fn first_point(&self) -> DVec2 {
		self.edges.first().map_or(DVec2::ZERO, Curve::start)
	}

	/// Adds a straight edge back to the start if the last edge ends elsewhere.
	pub fn close(&mut self) {
		let (Some(first), Some(last)) = (self.edges.first(), self.edges.last()) else { return };
		if !are_points_close(first.start(), last.end(), POINT_CLOSE) {
			let closing = Curve::line(last.end(), first.start());
			self.add_edge(closing);
		}
	}

	/// The same loop traversed the other way.
	pub fn reversed(&self) -> Contour {
		let mut contour: Contour = self.edges.iter().rev().map(Curve::reversed).collect();
		contour.inside = self.inside;
		contour
	}

	/// Direction found from the sign of the area enclosed by the edge endpoints.
	pub fn direction(&self) -> ContourDirection {
		let area: f64 = self.edges.iter().map(|edge| edge.start().perp_dot(edge.end())).sum();
		if area >= 0. { ContourDirection::Clockwise } else { ContourDirection::AntiClockwise }
	}

	pub fn made_clockwise_if_necessary(&self) -> Contour {
		match self.direction() {
			ContourDirection::Clockwise => self.clone(),
			ContourDirection::AntiClockwise => self.reversed(),
		}
	}

	/// The edge at `index` with its nearest non-degenerate neighbours on either side.
	pub(crate) fn neighbours(&self, index: usize) -> EdgeNeighbours<'_> {
		let count = self.edges.len();
		let curve = &self.edges[index];
		let previous = (1..=count).map(|step| &self.edges[(index + count - step) % count]).find(|edge| !edge.is_point()).unwrap_or(curve);
		let next = (1..=count).map(|step| &self.edges[(index + step) % count]).find(|edge| !edge.is_point()).unwrap_or(curve);
		EdgeNeighbours { curve, previous, next }
	}

	/// Even-odd test of a horizontal ray running from `point` to beyond the contour.
	pub fn contains_point(&self, point: DVec2) -> bool {
		if !self.bounding_box().contains_point(point) || !self.bounds().contains_point(point) {
			return false;
		}

		let bounds = self.bounds();
		let outside_x = if point.x > bounds.left() { bounds.left() - RAY_OVERLAP } else { bounds.right() + RAY_OVERLAP };
		let ray = Curve::line(point, DVec2::new(outside_x, point.y));
		self.intersections_with_ray(&ray).len() % 2 == 1
	}

	/// Places where `ray` passes through the contour.
	///
	/// Touches are left out, and a ray through a vertex is counted once rather than once for each edge meeting there.
	/// A stretch where the ray runs along an edge counts once, at its middle, if the ray crosses the contour there.
	pub(crate) fn intersections_with_ray(&self, ray: &Curve) -> Vec<Intersection> {
		let ray_neighbours = EdgeNeighbours::isolated(ray);
		let count = self.edges.len();

		let mut intersections = Vec::new();
		// Edge index and endpoint flags of the first and most recent intersections kept
		let mut first: Option<(usize, bool)> = None;
		let mut previous: Option<(usize, bool)> = None;

		for (index, edge) in self.edges.iter().enumerate() {
			let edge_neighbours = self.neighbours(index);
			let mut overlap = None;

			ray.intersections_with(edge, &mut overlap, |intersection| {
				if edge.is_point() || !crosses_edge(&ray_neighbours, &edge_neighbours, &intersection) {
					return ControlFlow::Continue(());
				}

				let duplicate = match (previous, first) {
					(Some((previous_index, previous_at_endpoint)), _) if intersection.is_at_start_of_curve2() => previous_at_endpoint && previous_index == (index + count - 1) % count,
					(_, Some((first_index, first_at_start))) if !intersection.is_at_start_of_curve2() && intersection.is_at_endpoint_of_curve2() => first_at_start && first_index == (index + 1) % count,
					_ => false,
				};
				if duplicate {
					return ControlFlow::Continue(());
				}

				if first.is_none() {
					first = Some((index, intersection.is_at_start_of_curve2()));
				}
				previous = Some((index, intersection.is_at_endpoint_of_curve2()));
				intersections.push(intersection);
				ControlFlow::Continue(())
			});

			if let Some(overlap) = overlap {
				if crosses_edge_range(&ray_neighbours, &edge_neighbours, &overlap) {
					intersections.push(overlap.middle_intersection());
				}
			}
		}

		intersections
	}

	pub fn closest_location_to_point(&self, point: DVec2) -> Option<EdgeLocation> {
		self.edges
			.iter()
			.enumerate()
			.map(|(edge, curve)| {
				let location = curve.closest_location_to(point);
				EdgeLocation {
					edge,
					parameter: location.parameter,
					distance: location.distance,
				}
			})
			.min_by(|a, b| a.distance.total_cmp(&b.distance))
	}
}
