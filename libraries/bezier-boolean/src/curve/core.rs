use super::*;
use crate::consts::{EQUAL_DATA, IS_POINT};
use crate::util::math::{are_points_close, cubic_first_derivative_roots, lerp};
use crate::util::quadrature::cubic_length;
use crate::util::range::ParameterRange;

/// The three pieces of a curve split at both ends of a parameter range.
#[derive(Clone, Debug)]
pub struct SplitSubcurves {
	/// The piece before the range. Degenerate when the range starts at 0.
	pub left: Curve,
	pub middle: Curve,
	/// The piece after the range. Degenerate when the range ends at 1.
	pub right: Curve,
}

/// Functionality relating to core `Curve` operations, such as constructors, evaluation, and splitting.
impl Curve {
	/// Create a cubic curve from its start point, handles, and end point.
	pub fn new(start: DVec2, handle_start: DVec2, handle_end: DVec2, end: DVec2) -> Self {
		Self::from_points([start, handle_start, handle_end, end], false)
	}

	/// Create a straight line. The handles are placed a third and two thirds of the way along the line.
	pub fn line(start: DVec2, end: DVec2) -> Self {
		Self::from_points([start, lerp(start, end, 1. / 3.), lerp(start, end, 2. / 3.), end], true)
	}

	/// Create the cubic that exactly traces the quadratic with the given start, handle, and end points.
	pub fn from_quadratic(start: DVec2, handle: DVec2, end: DVec2) -> Self {
		let handle_start = start + (handle - start) * (2. / 3.);
		let handle_end = end + (handle - end) * (2. / 3.);
		Self::new(start, handle_start, handle_end, end)
	}

	pub(crate) fn from_points([start, handle_start, handle_end, end]: [DVec2; 4], is_line: bool) -> Self {
		Self {
			start,
			handle_start,
			handle_end,
			end,
			is_line,
			cache: CurveCache::default(),
		}
	}

	pub fn start(&self) -> DVec2 {
		self.start
	}

	pub fn handle_start(&self) -> DVec2 {
		self.handle_start
	}

	pub fn handle_end(&self) -> DVec2 {
		self.handle_end
	}

	pub fn end(&self) -> DVec2 {
		self.end
	}

	/// Whether the curve was created as a straight line.
	pub fn is_line(&self) -> bool {
		self.is_line
	}

	pub fn points(&self) -> [DVec2; 4] {
		[self.start, self.handle_start, self.handle_end, self.end]
	}

	/// Returns the point at parameter `t`.
	pub fn evaluate(&self, t: f64) -> DVec2 {
		self.split(t).0
	}

	/// Splits the curve at parameter `t`, returning the split point and the curves before and after it.
	/// Both halves keep the straight line flag of the original.
	pub fn split(&self, t: f64) -> (DVec2, Curve, Curve) {
		let [p0, p1, p2, p3] = self.points();
		let p01 = lerp(p0, p1, t);
		let p12 = lerp(p1, p2, t);
		let p23 = lerp(p2, p3, t);
		let p012 = lerp(p01, p12, t);
		let p123 = lerp(p12, p23, t);
		let point = lerp(p012, p123, t);

		let left = Curve::from_points([p0, p01, p012, point], self.is_line);
		let right = Curve::from_points([point, p123, p23, p3], self.is_line);
		(point, left, right)
	}

	/// Returns the part of the curve between the two parameters of `range`.
	#[must_use]
	pub fn subcurve(&self, range: ParameterRange) -> Curve {
		let (_, _, upper) = self.split(range.min);
		if range.min == 1. {
			return upper;
		}

		let adjusted_max = (range.max - range.min) / (1. - range.min);
		upper.split(adjusted_max).1
	}

	/// Splits the curve into the pieces before, inside, and after `range`.
	pub fn split_subcurves(&self, range: ParameterRange) -> SplitSubcurves {
		let (_, left, remaining) = self.split(range.min);
		if range.min == 1. {
			return SplitSubcurves {
				left,
				middle: remaining.clone(),
				right: remaining,
			};
		}

		let adjusted_max = (range.max - range.min) / (1. - range.min);
		let (_, middle, right) = remaining.split(adjusted_max);
		SplitSubcurves { left, middle, right }
	}

	/// Returns the same curve traversed from end to start.
	#[must_use]
	pub fn reversed(&self) -> Curve {
		Curve::from_points([self.end, self.handle_end, self.handle_start, self.start], self.is_line)
	}

	/// Whether the whole curve collapses to (nearly) a single point.
	pub fn is_point(&self) -> bool {
		*self
			.cache
			.is_point
			.get_or_init(|| [self.handle_start, self.handle_end, self.end].into_iter().all(|point| are_points_close(self.start, point, IS_POINT)))
	}

	/// Box around the four control points. Cheaper than [Curve::bounds] and always contains it.
	pub fn bounding_box(&self) -> Aabb {
		*self.cache.bounding_box.get_or_init(|| Aabb::from_points(self.points()))
	}

	/// Tight box around the curve, found from its endpoints and the extrema of each coordinate.
	pub fn bounds(&self) -> Aabb {
		*self.cache.bounds.get_or_init(|| {
			let endpoints = Aabb::from_points([self.start, self.end]);
			if self.is_line {
				return endpoints;
			}

			let x_roots = cubic_first_derivative_roots(self.start.x, self.handle_start.x, self.handle_end.x, self.end.x);
			let y_roots = cubic_first_derivative_roots(self.start.y, self.handle_start.y, self.handle_end.y, self.end.y);
			x_roots
				.into_iter()
				.chain(y_roots)
				.filter(|t| (0. ..=1.).contains(t))
				.fold(endpoints, |bounds, t| bounds.extended_to(self.evaluate(t)))
		})
	}

	/// Arc length of the whole curve.
	pub fn length(&self) -> f64 {
		*self.cache.length.get_or_init(|| self.compute_length_at(1.))
	}

	/// Arc length from the start of the curve to parameter `t`.
	pub fn length_at(&self, t: f64) -> f64 {
		if t == 1. { self.length() } else { self.compute_length_at(t) }
	}

	fn compute_length_at(&self, t: f64) -> f64 {
		if self.is_line {
			self.start.distance(self.end) * t
		} else {
			cubic_length(t, &self.points())
		}
	}

	/// Compares two curves point by point within `threshold`. Degenerate curves are never equal to anything, and a line never equals a curve.
	pub fn is_equal_with_tolerance(&self, other: &Curve, threshold: f64) -> bool {
		if self.is_point() || other.is_point() || self.is_line != other.is_line {
			return false;
		}
		if self.is_line {
			return are_points_close(self.start, other.start, threshold) && are_points_close(self.end, other.end, threshold);
		}
		self.points().into_iter().zip(other.points()).all(|(a, b)| are_points_close(a, b, threshold))
	}

	/// Whether the two curves have the same shape up to floating point noise.
	pub fn is_equal(&self, other: &Curve) -> bool {
		self.is_equal_with_tolerance(other, EQUAL_DATA)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::{compare_f64s, compare_points};

	fn arch() -> Curve {
		Curve::new(DVec2::new(0., 0.), DVec2::new(0., 10.), DVec2::new(10., 10.), DVec2::new(10., 0.))
	}

	#[test]
	fn test_line_handles() {
		let line = Curve::line(DVec2::new(0., 0.), DVec2::new(9., 3.));
		assert!(line.is_line());
		assert!(compare_points(line.handle_start(), DVec2::new(3., 1.)));
		assert!(compare_points(line.handle_end(), DVec2::new(6., 2.)));
	}

	#[test]
	fn test_from_quadratic() {
		let curve = Curve::from_quadratic(DVec2::new(0., 0.), DVec2::new(3., 3.), DVec2::new(6., 0.));
		assert!(compare_points(curve.handle_start(), DVec2::new(2., 2.)));
		assert!(compare_points(curve.handle_end(), DVec2::new(4., 2.)));
		assert!(compare_points(curve.evaluate(0.5), DVec2::new(3., 1.5)));
	}

	#[test]
	fn test_split_endpoints_are_exact() {
		let curve = arch();
		let (point, left, right) = curve.split(0.5);
		assert!(compare_points(point, DVec2::new(5., 7.5)));
		assert_eq!(left.start(), curve.start());
		assert_eq!(right.end(), curve.end());

		let (point, left, _) = curve.split(1.);
		assert_eq!(point, curve.end());
		assert_eq!(left, curve);
	}

	#[test]
	fn test_subcurve() {
		let curve = arch();
		let sub = curve.subcurve(ParameterRange::new(0.25, 0.75));
		assert!(compare_points(sub.start(), curve.evaluate(0.25)));
		assert!(compare_points(sub.end(), curve.evaluate(0.75)));
		assert!(compare_points(sub.evaluate(0.5), curve.evaluate(0.5)));
		assert!(curve.subcurve(ParameterRange::UNIT).is_equal(&curve));
	}

	#[test]
	fn test_split_subcurves() {
		let curve = arch();
		let SplitSubcurves { left, middle, right } = curve.split_subcurves(ParameterRange::new(0.2, 0.6));
		assert!(compare_points(left.end(), curve.evaluate(0.2)));
		assert!(compare_points(middle.start(), curve.evaluate(0.2)));
		assert!(compare_points(middle.end(), curve.evaluate(0.6)));
		assert!(compare_points(right.start(), curve.evaluate(0.6)));
		assert_eq!(right.end(), curve.end());
	}

	#[test]
	fn test_reversed() {
		let curve = arch();
		let reversed = curve.reversed();
		assert!(compare_points(reversed.evaluate(0.3), curve.evaluate(0.7)));
		assert_eq!(reversed.reversed(), curve);
	}

	#[test]
	fn test_bounds() {
		let curve = arch();
		let bounds = curve.bounds();
		assert!(compare_f64s(bounds.top(), 0.));
		assert!(compare_f64s(bounds.bottom(), 7.5));
		assert!(compare_f64s(bounds.left(), 0.));
		assert!(compare_f64s(bounds.right(), 10.));
		assert_eq!(curve.bounding_box(), Aabb::new(0., 0., 10., 10.));
	}

	#[test]
	fn test_length() {
		let line = Curve::line(DVec2::new(0., 0.), DVec2::new(3., 4.));
		assert_eq!(line.length(), 5.);
		assert_eq!(line.length_at(0.5), 2.5);

		let curve = arch();
		assert!(curve.length() > 10. && curve.length() < 30.);
		assert!(compare_f64s(curve.length_at(0.5) * 2., curve.length()));
	}

	#[test]
	fn test_is_point() {
		assert!(Curve::line(DVec2::ONE, DVec2::ONE + 1e-6).is_point());
		assert!(!Curve::line(DVec2::ONE, DVec2::new(2., 1.)).is_point());
	}

	#[test]
	fn test_equality() {
		let curve = arch();
		let nudged = Curve::new(DVec2::new(0., 0.), DVec2::new(0., 10.05), DVec2::new(10., 10.), DVec2::new(10., 0.));
		assert!(!curve.is_equal(&nudged));
		assert!(curve.is_equal_with_tolerance(&nudged, 0.1));
		assert!(!curve.is_equal_with_tolerance(&Curve::line(curve.start(), curve.end()), 1.));
	}
}
