//! This module contains common constructs for working with angles. Sensor parameters are given in
//! degrees, so the helpers here accept degrees and convert at the last moment.

use crate::{UnitVec3, Vector3};
use parry3d_f64::na::UnitQuaternion;

/// Tolerance, in degrees, used when deciding whether an aperture covers a full turn.
pub const ANGLE_TOL: f64 = 1.0e-9;

/// Returns true if the angle, in degrees, is a full 360 degree turn within `ANGLE_TOL`.
pub fn is_full_turn(degrees: f64) -> bool {
    (degrees - 360.0).abs() <= ANGLE_TOL
}

/// Generates `count` angular offsets, in degrees, spaced by `step` and centered on zero. The
/// offsets are strictly increasing and symmetric, so an odd count always includes zero.
///
/// # Arguments
///
/// * `count`: the number of offsets to generate
/// * `step`: the spacing between consecutive offsets, in degrees
///
/// returns: impl Iterator<Item=f64>
///
/// # Examples
///
/// ```
/// use rangesim::common::centered_offsets;
/// let offsets = centered_offsets(3, 10.0).collect::<Vec<_>>();
/// assert_eq!(offsets, vec![-10.0, 0.0, 10.0]);
/// ```
pub fn centered_offsets(count: usize, step: f64) -> impl Iterator<Item = f64> {
    let center = (count as f64 - 1.0) / 2.0;
    (0..count).map(move |i| (i as f64 - center) * step)
}

/// Rotates a vector about an axis by an angle given in degrees, following the right-hand rule.
pub fn rotate_about(v: &Vector3, axis: &UnitVec3, degrees: f64) -> Vector3 {
    UnitQuaternion::from_axis_angle(axis, degrees.to_radians()) * v
}
