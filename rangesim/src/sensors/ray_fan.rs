//! Generation of the fan of rays swept by a sensor in its horizontal plane.

use super::{SensorRay, WorkingDistance};
use crate::common::{centered_offsets, is_full_turn, rotate_about};
use crate::{Point3, SensorError, UnitVec3, Vector3};
use log::trace;

/// The largest fan a sensor may generate. Fan mesh vertices are indexed with `u32` and every ray
/// contributes two of them, so this stays well below `u32::MAX / 2`.
pub const MAX_RAYS: usize = 1 << 20;

/// An ordered set of rays generated from a sensor pose for a single frame. Rays are ordered by
/// strictly increasing angle about the sensor's up axis, so adjacent rays in the list are
/// adjacent in space.
#[derive(Debug, Clone, PartialEq)]
pub struct RayFan {
    rays: Vec<SensorRay>,
    angles: Vec<f64>,
    closed: bool,
}

impl RayFan {
    pub fn rays(&self) -> &[SensorRay] {
        &self.rays
    }

    /// The angle of each ray relative to the sensor direction, in degrees
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn len(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    /// True if the fan covers a full turn, in which case the last and first rays are adjacent
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

fn finite_unit(v: &Vector3, name: &str) -> Result<UnitVec3, SensorError> {
    if !v.iter().all(|c| c.is_finite()) {
        return Err(SensorError::invalid(format!("{} must be finite, got {:?}", name, v)));
    }
    UnitVec3::try_new(*v, f64::EPSILON)
        .ok_or_else(|| SensorError::invalid(format!("{} must have a non-zero length", name)))
}

/// Generate the fan of rays for a sensor. The number of rays is the whole number of angular
/// steps which fit in the aperture, and the rays are spread symmetrically about the sensor
/// direction by rotating it about the up axis. Every ray starts at the minimum working distance
/// from the sensor origin.
///
/// An aperture smaller than the angular resolution produces an empty fan, which is valid.
///
/// # Arguments
///
/// * `origin`: the sensor origin in world space
/// * `direction`: the direction the sensor faces, does not need to be normalized
/// * `aperture`: the total angle swept by the fan, in degrees, must be zero or positive
/// * `resolution`: the angle between adjacent rays, in degrees, must be positive
/// * `working`: the working distance of every ray
/// * `up`: the axis the fan is swept around, does not need to be normalized
///
/// returns: Result<RayFan, SensorError>
///
/// # Examples
///
/// ```
/// use rangesim::{generate_fan, Point3, Vector3, WorkingDistance};
/// let wd = WorkingDistance::new(1.0, 15.0).unwrap();
/// let fan = generate_fan(&Point3::origin(), &-Vector3::z(), 276.0, 1.0, wd, &Vector3::y())
///     .unwrap();
/// assert_eq!(fan.len(), 276);
/// ```
pub fn generate_fan(
    origin: &Point3,
    direction: &Vector3,
    aperture: f64,
    resolution: f64,
    working: WorkingDistance,
    up: &Vector3,
) -> Result<RayFan, SensorError> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(SensorError::invalid(format!(
            "angular resolution must be positive, got {}",
            resolution
        )));
    }
    if !aperture.is_finite() || aperture < 0.0 {
        return Err(SensorError::invalid(format!(
            "aperture angle must not be negative, got {}",
            aperture
        )));
    }
    if !origin.iter().all(|c| c.is_finite()) {
        return Err(SensorError::invalid(format!(
            "sensor origin must be finite, got {:?}",
            origin
        )));
    }
    working.validate()?;
    let direction = finite_unit(direction, "sensor direction")?;
    let up = finite_unit(up, "up axis")?;

    let steps = (aperture / resolution).floor();
    if steps > MAX_RAYS as f64 {
        return Err(SensorError::invalid(format!(
            "{} deg at {} deg resolution needs {} rays, at most {} are allowed",
            aperture, resolution, steps, MAX_RAYS
        )));
    }
    let count = steps as usize;
    let angles = centered_offsets(count, resolution).collect::<Vec<_>>();
    let rays = angles
        .iter()
        .map(|a| SensorRay::new(*origin, rotate_about(&direction, &up, *a), working))
        .collect::<Result<Vec<_>, _>>()?;

    trace!(
        "generated fan of {} rays over {} deg at {} deg resolution",
        count, aperture, resolution
    );

    Ok(RayFan {
        rays,
        angles,
        closed: is_full_turn(aperture) && count >= 3,
    })
}
