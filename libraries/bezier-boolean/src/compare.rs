//! Comparison helpers used by the unit tests.

use glam::DVec2;

pub const MAX_ABSOLUTE_DIFFERENCE: f64 = 1e-3;

pub fn compare_f64s(f1: f64, f2: f64) -> bool {
	(f1 - f2).abs() < MAX_ABSOLUTE_DIFFERENCE
}

pub fn compare_points(p1: DVec2, p2: DVec2) -> bool {
	p1.abs_diff_eq(p2, MAX_ABSOLUTE_DIFFERENCE)
}

pub fn compare_vec_of_points(a: &[DVec2], b: &[DVec2]) -> bool {
	a.len() == b.len() && a.iter().zip(b).all(|(p1, p2)| compare_points(*p1, *p2))
}
