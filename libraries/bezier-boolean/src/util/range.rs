/// A closed interval of curve parameters (or, for fat lines, of signed distances).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterRange {
	pub min: f64,
	pub max: f64,
}

impl ParameterRange {
	/// The whole curve.
	pub const UNIT: Self = Self { min: 0., max: 1. };
	/// Result of a clip that found no parameters in common.
	pub(crate) const NO_INTERSECTION: Self = Self { min: 1., max: 0. };

	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	pub fn size(&self) -> f64 {
		self.max - self.min
	}

	pub fn average(&self) -> f64 {
		(self.min + self.max) / 2.
	}

	/// Maps `value` from `[0, 1]` into this range.
	pub fn scale_normalized(&self, value: f64) -> f64 {
		(self.max - self.min) * value + self.min
	}

	#[must_use]
	pub fn union(&self, other: &ParameterRange) -> ParameterRange {
		ParameterRange::new(self.min.min(other.min), self.max.max(other.max))
	}

	/// Whether both ends agree once truncated to the given number of decimal places.
	pub fn has_converged(&self, decimal_places: i32) -> bool {
		let factor = 10_f64.powi(decimal_places);
		(self.min * factor) as i64 == (self.max * factor) as i64
	}

	pub(crate) fn is_no_intersection(&self) -> bool {
		*self == Self::NO_INTERSECTION
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_has_converged() {
		assert!(ParameterRange::new(0.1234561, 0.1234569).has_converged(6));
		assert!(!ParameterRange::new(0.1234561, 0.1234579).has_converged(6));
		assert!(!ParameterRange::UNIT.has_converged(6));
	}

	#[test]
	fn test_scale_and_union() {
		let range = ParameterRange::new(0.25, 0.75);
		assert_eq!(range.scale_normalized(0.5), 0.5);
		assert_eq!(range.scale_normalized(0.), 0.25);
		assert_eq!(range.size(), 0.5);
		assert_eq!(range.union(&ParameterRange::new(0.5, 1.)), ParameterRange::new(0.25, 1.));
	}
}
