use glam::DVec2;

// Twelve point Legendre-Gauss abscissae and weights, listed as `±x` pairs sharing a weight
const ABSCISSAE: [f64; 6] = [0.1252334085114689, 0.3678314989981802, 0.5873179542866175, 0.7699026741943047, 0.9041172563704749, 0.9815606342467192];
const WEIGHTS: [f64; 6] = [0.2491470458134028, 0.2334925365383548, 0.2031674267230659, 0.1600783285433462, 0.1069393259953184, 0.0471753363865118];

fn derivative_component(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
	let t1 = -3. * p0 + 9. * p1 - 9. * p2 + 3. * p3;
	let t2 = t * t1 + 6. * p0 - 12. * p1 + 6. * p2;
	t * t2 - 3. * p0 + 3. * p1
}

fn speed(t: f64, points: &[DVec2; 4]) -> f64 {
	let [p0, p1, p2, p3] = *points;
	let x = derivative_component(t, p0.x, p1.x, p2.x, p3.x);
	let y = derivative_component(t, p0.y, p1.y, p2.y, p3.y);
	(x * x + y * y).sqrt()
}

/// Arc length of the cubic from parameter 0 up to `z`, by Gauss-Legendre quadrature.
pub fn cubic_length(z: f64, points: &[DVec2; 4]) -> f64 {
	let half = z / 2.;
	let sum: f64 = ABSCISSAE
		.iter()
		.zip(WEIGHTS)
		.map(|(&abscissa, weight)| weight * (speed(half * abscissa + half, points) + speed(-half * abscissa + half, points)))
		.sum();
	half * sum
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::compare_f64s;

	#[test]
	fn test_straight_cubic_length() {
		let points = [DVec2::new(0., 0.), DVec2::new(10., 0.), DVec2::new(20., 0.), DVec2::new(30., 0.)];
		assert!(compare_f64s(cubic_length(1., &points), 30.));
		assert!(compare_f64s(cubic_length(0.5, &points), 15.));
		assert_eq!(cubic_length(0., &points), 0.);
	}

	#[test]
	fn test_quarter_circle_length() {
		let kappa = 0.5522847498;
		let points = [DVec2::new(100., 0.), DVec2::new(100., 100. * kappa), DVec2::new(100. * kappa, 100.), DVec2::new(0., 100.)];
		let expected = std::f64::consts::FRAC_PI_2 * 100.;
		assert!((cubic_length(1., &points) - expected).abs() < 0.05);
	}
}
