use crate::{Point3, SensorError, UnitVec3, Vector3};
use serde::{Deserialize, Serialize};

/// The radial range, measured from the sensor origin, within which a sensor can register a hit.
/// Anything closer than `min` is in the sensor's dead zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkingDistance {
    pub min: f64,
    pub max: f64,
}

impl WorkingDistance {
    pub fn new(min: f64, max: f64) -> Result<Self, SensorError> {
        let wd = Self { min, max };
        wd.validate()?;
        Ok(wd)
    }

    /// Check that the range is finite, starts at or beyond zero and has a positive width
    pub fn validate(&self) -> Result<(), SensorError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SensorError::invalid(format!(
                "working distance must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min < 0.0 {
            return Err(SensorError::invalid(format!(
                "minimum working distance must not be negative, got {}",
                self.min
            )));
        }
        if self.max <= self.min {
            return Err(SensorError::invalid(format!(
                "maximum working distance {} must be greater than the minimum {}",
                self.max, self.min
            )));
        }
        Ok(())
    }
}

/// A single sensor ray for one frame. The `origin` is the sensor origin that distances are
/// measured from; the visible part of the ray starts at `min_distance` along the direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRay {
    origin: Point3,
    direction: UnitVec3,
    range: WorkingDistance,
}

impl SensorRay {
    /// Create a new ray, normalizing the direction. Fails with `SensorError::InvalidRay` if the
    /// direction has no usable length, and with `SensorError::InvalidParameter` if the range is
    /// malformed.
    ///
    /// # Arguments
    ///
    /// * `origin`: the sensor origin
    /// * `direction`: the direction of the ray, which does not need to be normalized
    /// * `range`: the working distance of the ray
    ///
    /// returns: Result<SensorRay, SensorError>
    pub fn new(
        origin: Point3,
        direction: Vector3,
        range: WorkingDistance,
    ) -> Result<Self, SensorError> {
        range.validate()?;
        if !direction.iter().all(|c| c.is_finite()) {
            return Err(SensorError::InvalidRay);
        }
        let direction = UnitVec3::try_new(direction, f64::EPSILON).ok_or(SensorError::InvalidRay)?;

        Ok(Self {
            origin,
            direction,
            range,
        })
    }

    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    pub fn direction(&self) -> &UnitVec3 {
        &self.direction
    }

    pub fn min_distance(&self) -> f64 {
        self.range.min
    }

    pub fn max_distance(&self) -> f64 {
        self.range.max
    }

    pub fn point_at(&self, distance: f64) -> Point3 {
        self.origin + self.direction.into_inner() * distance
    }

    /// The point where the visible ray starts, at the minimum working distance
    pub fn start(&self) -> Point3 {
        self.point_at(self.range.min)
    }

    /// The far limit of the ray, at the maximum working distance
    pub fn far_point(&self) -> Point3 {
        self.point_at(self.range.max)
    }
}
