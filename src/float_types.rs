//! Scalar type selection and the global classification tolerance.

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Tolerance used for every plane-side classification in the crate.
///
/// A point whose signed distance to a plane lies within `±EPSILON` is
/// treated as coplanar. Raising it trades robustness on noisy input for
/// over-merging; lowering it fragments near-coplanar geometry.
pub const EPSILON: Real = 1e-5;
