use crate::consts::POINT_CLOSE;
use crate::util::math::{are_values_close, counter_clockwise_turn};

use glam::DVec2;
use smallvec::SmallVec;

fn turns_wrong_direction(point1: DVec2, point2: DVec2, point3: DVec2) -> bool {
	let area = counter_clockwise_turn(point1, point2, point3);
	are_values_close(area, 0., POINT_CLOSE) || area < 0.
}

/// Convex hull of four points using the monotone chain algorithm, in counter-clockwise order without repeating the first vertex.
/// Colinear points are dropped from the hull.
pub fn convex_hull(mut points: [DVec2; 4]) -> SmallVec<[DVec2; 8]> {
	// Sort by x, then by y for points sharing an x coordinate
	let mut sort_length = points.len();
	while sort_length > 0 {
		let mut new_sort_length = 0;
		for i in 1..sort_length {
			let (previous, current) = (points[i - 1], points[i]);
			if previous.x > current.x || (are_values_close(previous.x, current.x, POINT_CLOSE) && previous.y > current.y) {
				points.swap(i - 1, i);
				new_sort_length = i;
			}
		}
		sort_length = new_sort_length;
	}

	let mut hull: SmallVec<[DVec2; 8]> = SmallVec::new();

	// Lower hull
	for &point in &points {
		while hull.len() >= 2 && turns_wrong_direction(hull[hull.len() - 2], hull[hull.len() - 1], point) {
			hull.pop();
		}
		hull.push(point);
	}

	// Upper hull
	let threshold = hull.len() + 1;
	for &point in points[..points.len() - 1].iter().rev() {
		while hull.len() >= threshold && turns_wrong_direction(hull[hull.len() - 2], hull[hull.len() - 1], point) {
			hull.pop();
		}
		hull.push(point);
	}

	// The walk ends back on the first point
	hull.pop();
	hull
}
