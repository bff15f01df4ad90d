use crate::consts::ROOT_FINDER_MAX_DEPTH;
use crate::util::line::NormalizedLine;
use crate::util::math::lerp;

use glam::DVec2;
use smallvec::SmallVec;

type ControlPolygon = SmallVec<[DVec2; 6]>;

/// Splits the Bézier curve with the given control points at `t` using de Casteljau's algorithm, returning the point and both halves.
pub fn de_casteljau_split(points: &[DVec2], t: f64) -> (DVec2, ControlPolygon, ControlPolygon) {
	let degree = points.len() - 1;
	let mut working: ControlPolygon = points.iter().copied().collect();
	let mut left: ControlPolygon = SmallVec::from_elem(DVec2::ZERO, points.len());
	let mut right: ControlPolygon = SmallVec::from_elem(DVec2::ZERO, points.len());

	left[0] = working[0];
	right[degree] = working[degree];
	for k in 1..=degree {
		for i in 0..=(degree - k) {
			working[i] = lerp(working[i], working[i + 1], t);
		}
		left[k] = working[0];
		right[degree - k] = working[degree - k];
	}

	(working[0], left, right)
}

fn sign_changes(points: &[DVec2]) -> usize {
	points.windows(2).filter(|pair| (pair[0].y < 0.) != (pair[1].y < 0.)).count()
}

/// If the control polygon is flat enough to be treated as its chord, returns where the chord crosses zero.
fn flat_control_polygon_root(points: &[DVec2]) -> Option<f64> {
	let error_threshold = 2_f64.powi(-(ROOT_FINDER_MAX_DEPTH as i32 - 1));
	let degree = points.len() - 1;
	let line = NormalizedLine::through(points[0], points[degree]);

	let (below, above) = points[1..degree].iter().map(|&point| line.distance_from_point(point)).fold((0_f64, 0_f64), |(below, above), distance| (below.min(distance), above.max(distance)));

	let zero_line = NormalizedLine::new(0., 1., 0.);
	let intersect1 = zero_line.intersection_with(&line.with_offset(-above));
	let intersect2 = zero_line.intersection_with(&line.with_offset(-below));

	let error = intersect1.x.max(intersect2.x) - intersect1.x.min(intersect2.x);
	(error < error_threshold).then(|| zero_line.intersection_with(&line).x)
}

fn find_roots_with_depth(points: &[DVec2], depth: usize, perform: &mut impl FnMut(f64)) {
	match sign_changes(points) {
		0 => return,
		1 => {
			if depth >= ROOT_FINDER_MAX_DEPTH {
				perform((points[0].x + points[points.len() - 1].x) / 2.);
				return;
			}
			if let Some(root) = flat_control_polygon_root(points) {
				perform(root);
				return;
			}
		}
		_ => {}
	}

	let (_, left, right) = de_casteljau_split(points, 0.5);
	find_roots_with_depth(&left, depth + 1, perform);
	find_roots_with_depth(&right, depth + 1, perform);
}

/// Calls `perform` with each root of the Bézier function whose control points are `(parameter, value)` pairs, by recursive subdivision on the control polygon.
pub fn find_bezier_roots(points: &[DVec2], mut perform: impl FnMut(f64)) {
	find_roots_with_depth(points, 0, &mut perform);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::{compare_f64s, compare_points};

	fn explicit_bezier(values: &[f64]) -> Vec<DVec2> {
		let degree = (values.len() - 1) as f64;
		values.iter().enumerate().map(|(i, &value)| DVec2::new(i as f64 / degree, value)).collect()
	}

	#[test]
	fn test_de_casteljau_split() {
		let points = [DVec2::new(0., 0.), DVec2::new(0., 10.), DVec2::new(10., 10.), DVec2::new(10., 0.)];
		let (point, left, right) = de_casteljau_split(&points, 0.5);
		assert!(compare_points(point, DVec2::new(5., 7.5)));
		assert_eq!(left[0], points[0]);
		assert_eq!(right[3], points[3]);
		assert_eq!(left[3], point);
		assert_eq!(right[0], point);
	}

	#[test]
	fn test_single_root() {
		// A line from -1 to 1 crosses zero halfway
		let mut roots = Vec::new();
		find_bezier_roots(&explicit_bezier(&[-1., 1.]), |root| roots.push(root));
		assert_eq!(roots.len(), 1);
		assert!(compare_f64s(roots[0], 0.5));
	}

	#[test]
	fn test_two_roots() {
		// (t - 0.25)(t - 0.75) expressed in the Bernstein basis
		let mut roots = Vec::new();
		find_bezier_roots(&explicit_bezier(&[0.1875, -0.3125, 0.1875]), |root| roots.push(root));
		roots.sort_by(f64::total_cmp);
		assert_eq!(roots.len(), 2);
		assert!(compare_f64s(roots[0], 0.25));
		assert!(compare_f64s(roots[1], 0.75));
	}

	#[test]
	fn test_no_roots() {
		let mut count = 0;
		find_bezier_roots(&explicit_bezier(&[1., 2., 0.5, 3.]), |_| count += 1);
		assert_eq!(count, 0);
	}
}
