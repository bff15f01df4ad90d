mod clip;
mod core;
mod solvers;

pub(crate) use clip::bezier_clip;
pub use self::core::SplitSubcurves;

use crate::util::aabb::Aabb;
use glam::DVec2;
use std::cell::OnceCell;
use std::fmt::{Debug, Formatter, Result};

/// Closest point on a curve to some query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveLocation {
	/// Parameter of the closest point, in `[0, 1]`.
	pub parameter: f64,
	/// Distance from the query point to the curve.
	pub distance: f64,
}

#[derive(Clone, Default)]
struct CurveCache {
	bounds: OnceCell<Aabb>,
	bounding_box: OnceCell<Aabb>,
	length: OnceCell<f64>,
	is_point: OnceCell<bool>,
}

/// A cubic Bézier segment. Straight lines are stored as cubics with their handles at one and two thirds along the line and are flagged so the intersection code can use exact line math for them.
///
/// Derived geometry (bounds, length, degeneracy) is computed on first use and cached, so a curve's points never change after construction.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
	start: DVec2,
	handle_start: DVec2,
	handle_end: DVec2,
	end: DVec2,
	is_line: bool,
	#[cfg_attr(feature = "serde", serde(skip))]
	cache: CurveCache,
}

impl Debug for Curve {
	fn fmt(&self, f: &mut Formatter<'_>) -> Result {
		let mut debug_struct = f.debug_struct(if self.is_line { "Line" } else { "Curve" });
		debug_struct.field("start", &self.start);
		if !self.is_line {
			debug_struct.field("handle_start", &self.handle_start).field("handle_end", &self.handle_end);
		}
		debug_struct.field("end", &self.end).finish()
	}
}

impl PartialEq for Curve {
	fn eq(&self, other: &Self) -> bool {
		self.is_line == other.is_line && self.points() == other.points()
	}
}
