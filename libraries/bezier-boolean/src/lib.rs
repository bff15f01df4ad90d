//! Bezier-boolean: Boolean operations on regions bounded by cubic Bézier curves
//!
//! Regions are [`Graph`]s of closed [`Contour`]s, filled with the even-odd rule. The curves of the two regions are intersected with fat line clipping, each crossing is marked as an entry into or exit from the other region, and the result is assembled by walking from crossing to crossing.
#[cfg(test)]
pub(crate) mod compare;

pub mod consts;
mod contour;
mod crossing;
mod curve;
mod graph;
mod intersection;
mod overlap;
mod path;
mod util;

pub use contour::{Contour, ContourDirection, ContourInside, EdgeLocation};
pub use curve::{Curve, CurveLocation, SplitSubcurves};
pub use graph::Graph;
pub use intersection::{IntersectRange, Intersection};
#[cfg(feature = "parsing")]
pub use path::{PathDataError, parse_path_data};
pub use path::{PathCommand, PathError};
pub use util::aabb::Aabb;
pub use util::range::ParameterRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanOperation {
	Union,
	Intersect,
	Subtract,
	Difference,
}

/// Combines two regions with the given operation.
pub fn boolean(operation: BooleanOperation, subject: &Graph, clip: &Graph) -> Graph {
	match operation {
		BooleanOperation::Union => subject.union(clip),
		BooleanOperation::Intersect => subject.intersect(clip),
		BooleanOperation::Subtract => subject.subtract(clip),
		BooleanOperation::Difference => subject.difference(clip),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::DVec2;

	fn square(min: f64, max: f64) -> Graph {
		Graph::rectangle(DVec2::splat(min), DVec2::splat(max))
	}

	/// Points on a grid across `bounds`, offset so none of them lands on a grid line of whole numbers.
	fn sample_points(min: f64, max: f64) -> impl Iterator<Item = DVec2> {
		let steps = 24;
		let step = (max - min) / steps as f64;
		(0..steps).flat_map(move |x| (0..steps).map(move |y| DVec2::new(min + (x as f64 + 0.37) * step, min + (y as f64 + 0.61) * step)))
	}

	fn assert_same_region(a: &Graph, b: &Graph, min: f64, max: f64) {
		for point in sample_points(min, max) {
			assert_eq!(a.contains_point(point), b.contains_point(point), "regions differ at {point}");
		}
	}

	#[test]
	fn test_union_with_itself() {
		let _ = env_logger::builder().is_test(true).try_init();
		let shape = square(0., 10.);
		assert_eq!(shape.union(&shape), shape);
		assert_eq!(shape.intersect(&shape), shape);
		assert!(shape.subtract(&shape).is_empty());
	}

	#[test]
	fn test_overlapping_squares() {
		let (a, b) = (square(0., 10.), square(5., 15.));

		let union = a.union(&b);
		assert_eq!(union.contours().len(), 1);
		let intersection = a.intersect(&b);
		assert_eq!(intersection.contours().len(), 1);
		let subtraction = a.subtract(&b);
		assert_eq!(subtraction.contours().len(), 1);

		for point in sample_points(-2., 17.) {
			let (in_a, in_b) = (a.contains_point(point), b.contains_point(point));
			assert_eq!(union.contains_point(point), in_a || in_b, "union at {point}");
			assert_eq!(intersection.contains_point(point), in_a && in_b, "intersection at {point}");
			assert_eq!(subtraction.contains_point(point), in_a && !in_b, "subtraction at {point}");
		}
	}

	#[test]
	fn test_squares_sharing_part_of_two_edges() {
		let a = square(0., 10.);
		let b = Graph::rectangle(DVec2::new(5., 0.), DVec2::new(15., 10.));

		let union = a.union(&b);
		assert_eq!(union.contours().len(), 1);
		let intersection = a.intersect(&b);
		assert_eq!(intersection.contours().len(), 1);
		let subtraction = a.subtract(&b);
		let difference = a.difference(&b);

		for point in sample_points(-2., 17.) {
			let (in_a, in_b) = (a.contains_point(point), b.contains_point(point));
			assert_eq!(union.contains_point(point), in_a || in_b, "union at {point}");
			assert_eq!(intersection.contains_point(point), in_a && in_b, "intersection at {point}");
			assert_eq!(subtraction.contains_point(point), in_a && !in_b, "subtraction at {point}");
			assert_eq!(difference.contains_point(point), in_a != in_b, "difference at {point}");
		}
	}

	#[test]
	fn test_squares_touching_along_an_edge() {
		let a = square(0., 10.);
		let b = Graph::rectangle(DVec2::new(10., 2.), DVec2::new(20., 8.));

		let union = a.union(&b);
		assert_eq!(union.contours().len(), 2);
		assert!(a.intersect(&b).is_empty());
		let subtraction = a.subtract(&b);

		for point in sample_points(-2., 22.) {
			let (in_a, in_b) = (a.contains_point(point), b.contains_point(point));
			assert_eq!(union.contains_point(point), in_a || in_b, "union at {point}");
			assert_eq!(subtraction.contains_point(point), in_a && !in_b, "subtraction at {point}");
		}
	}

	#[test]
	fn test_commutativity() {
		let (a, b) = (square(0., 10.), Graph::circle(DVec2::new(11., 9.), 6.));
		assert_same_region(&a.union(&b), &b.union(&a), -2., 18.);
		assert_same_region(&a.intersect(&b), &b.intersect(&a), -2., 18.);
	}

	#[test]
	fn test_disjoint_shapes() {
		let (a, b) = (square(0., 10.), square(20., 30.));
		assert_eq!(a.union(&b).contours().len(), 2);
		assert!(a.intersect(&b).is_empty());
		assert_eq!(a.subtract(&b), a);
	}

	#[test]
	fn test_identical_squares() {
		let (a, b) = (square(0., 10.), square(0., 10.));
		assert_eq!(a.union(&b), a);
		assert_eq!(a.intersect(&b), a);
		assert!(a.subtract(&b).is_empty());
	}

	#[test]
	fn test_tangent_circles() {
		let a = Graph::circle(DVec2::new(0., 0.), 10.);
		let b = Graph::circle(DVec2::new(20., 0.), 10.);

		let union = a.union(&b);
		assert_eq!(union.contours().len(), 2);
		assert!(union.contours().iter().all(|contour| contour.inside() == ContourInside::Filled));
		assert!(a.intersect(&b).is_empty());
	}

	#[test]
	fn test_subtracting_a_nested_square_makes_a_hole() {
		let (outer, inner) = (square(0., 10.), square(3., 6.));
		let result = outer.subtract(&inner);

		let insides: Vec<_> = result.contours().iter().map(Contour::inside).collect();
		assert_eq!(insides, [ContourInside::Filled, ContourInside::Hole]);
		assert!(result.contains_point(DVec2::new(1., 1.)));
		assert!(!result.contains_point(DVec2::new(4.5, 4.5)));
	}

	#[test]
	fn test_self_crossing_path_keeps_both_lobes() {
		let bowtie = Graph::from_commands([
			PathCommand::MoveTo(DVec2::new(0., 0.)),
			PathCommand::LineTo(DVec2::new(10., 10.)),
			PathCommand::LineTo(DVec2::new(10., 0.)),
			PathCommand::LineTo(DVec2::new(0., 10.)),
			PathCommand::Close,
		]);
		let union = bowtie.union(&square(20., 30.));

		assert_eq!(union.contours().len(), 2);
		assert!(union.contains_point(DVec2::new(2., 4.)));
		assert!(union.contains_point(DVec2::new(8., 4.)));
		assert!(!union.contains_point(DVec2::new(5., 2.)));
		assert!(union.contains_point(DVec2::new(25., 25.)));
	}

	#[test]
	fn test_square_and_circle() {
		let square = square(0., 60.);
		let circle = Graph::circle(DVec2::new(50., 50.), 25.);
		let intersection = boolean(BooleanOperation::Intersect, &square, &circle);

		assert_eq!(intersection.contours().len(), 1);
		let bounds = intersection.bounds();
		assert!(bounds.left() > 24. && bounds.top() > 24.);
		assert!(bounds.right() < 60.001 && bounds.bottom() < 60.001);

		assert!(intersection.contains_point(DVec2::new(50., 50.)));
		assert!(intersection.contains_point(DVec2::new(58., 40.)));
		assert!(!intersection.contains_point(DVec2::new(65., 50.)));
		assert!(!intersection.contains_point(DVec2::new(30., 30.)));
		for point in sample_points(0., 60.) {
			if intersection.contains_point(point) {
				assert!(square.contains_point(point) && circle.contains_point(point), "{point} lies outside an input");
			}
		}
	}

	#[test]
	fn test_difference() {
		let (a, b) = (square(0., 10.), square(5., 15.));
		let difference = boolean(BooleanOperation::Difference, &a, &b);
		let two_pass = a.difference_two_pass(&b);

		for point in sample_points(-2., 17.) {
			let expected = a.contains_point(point) != b.contains_point(point);
			assert_eq!(difference.contains_point(point), expected, "difference at {point}");
			assert_eq!(two_pass.contains_point(point), expected, "two pass difference at {point}");
		}
	}
}
