// Closeness thresholds

/// Two points closer than this on both axes are treated as the same point.
pub const POINT_CLOSE: f64 = 1e-10;
/// Tolerance used by the strict less/greater comparisons and when validating line intersection parameters.
pub const TANGENT_CLOSE: f64 = 1e-12;
/// Padding applied to rectangles before testing them for overlap.
pub const BOUNDS_CLOSE: f64 = 1e-9;
/// Tolerance for comparing raw coordinate data.
pub const EQUAL_DATA: f64 = 1e-10;
/// Parameters closer than this to 0 or 1 sit at an endpoint of their curve.
pub const PARAMETER_CLOSE: f64 = 1e-4;
/// Tolerance used when chaining overlapping edge segments into runs.
pub const OVERLAP_CLOSE: f64 = 1e-2;
/// Two intersection points closer than this are considered tangent.
pub const POINT_NEAR: f64 = 1e-7;
/// A curve whose control points all sit within this of its start is degenerate.
pub const IS_POINT: f64 = 1e-5;
/// Tolerance on the signed area used to decide whether line segments are colinear.
pub const LINE_COLINEAR: f64 = 1e-7;
/// Endpoint tolerance when deciding two curves describe the same segment.
pub const CURVE_ENDPOINTS_EQUAL: f64 = 1e-4;
/// Control point tolerance when deciding two curves describe the same segment.
pub const CURVE_CONTROLS_EQUAL: f64 = 1e-1;
/// Distance at which clipped curves that never converged are still accepted as meeting.
pub const CONVERGENCE_CHECK: f64 = 1e-3;

// Fat line clipping

/// Decimal places two range endpoints must share for the range to count as converged.
pub const CLIP_DECIMAL_PLACES: i32 = 6;
/// Termination bound on the clipping rounds run for one pair of curves, after which the best candidate is used.
pub const CLIP_MAX_ITERATIONS: usize = 500;
/// Termination bound on how many times a pair of curves is split and clipped again.
pub const CLIP_MAX_DEPTH: usize = 10;
/// Clipping that shrinks both ranges by less than this fraction triggers a split.
pub const CLIP_MINIMUM_CHANGE: f64 = 0.20;

// Root finding

/// Termination bound on subdivision in the root finder, which takes the midpoint once it is reached.
pub const ROOT_FINDER_MAX_DEPTH: usize = 64;

// Containment

/// How far outside the shapes the containment test rays start and end.
pub const RAY_OVERLAP: f64 = 10.;
/// Maximum arc length step used when walking away from an ambiguous tangent.
pub const TANGENT_OFFSET_STEP: f64 = 1.;

/// Tolerance when comparing the candidate overlapping pieces of two curves whose clipping stalled.
pub const OVERLAP_CANDIDATE_EQUAL: f64 = 1e-4;
