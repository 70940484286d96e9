use super::{
    HitResult, RayFan, RayTarget, SensorFrameOutput, WorkingDistance, generate_fan, intersect_fan,
};
use crate::{Point3, SensorError, Vector3};
use log::debug;
use serde::{Deserialize, Serialize};

fn default_angle() -> f64 {
    1.0
}

fn default_up() -> Vector3 {
    Vector3::y()
}

/// The construction-time configuration of a rangefinder sensor. A single-ray sensor is a fan
/// whose aperture equals its angular resolution, which yields one ray along `direction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// The point distances are measured from
    pub origin: Point3,

    /// The direction the sensor faces, normalized when the rays are built
    pub direction: Vector3,

    pub working_distance: WorkingDistance,

    /// Total angle swept by the fan, in degrees
    #[serde(default = "default_angle")]
    pub aperture_angle: f64,

    /// Angle between adjacent rays, in degrees
    #[serde(default = "default_angle")]
    pub angular_resolution: f64,

    /// The axis the fan is swept around
    #[serde(default = "default_up")]
    pub up_axis: Vector3,
}

impl SensorConfig {
    /// A laser distance sensor casting a single ray along `direction`
    pub fn laser_distance(
        origin: Point3,
        direction: Vector3,
        working_distance: WorkingDistance,
    ) -> Self {
        Self {
            origin,
            direction,
            working_distance,
            aperture_angle: default_angle(),
            angular_resolution: default_angle(),
            up_axis: default_up(),
        }
    }

    /// A 2D LiDAR sweeping a fan of rays about the +Y axis
    pub fn lidar_2d(
        origin: Point3,
        direction: Vector3,
        working_distance: WorkingDistance,
        aperture_angle: f64,
        angular_resolution: f64,
    ) -> Self {
        Self {
            origin,
            direction,
            working_distance,
            aperture_angle,
            angular_resolution,
            up_axis: default_up(),
        }
    }

    pub fn with_up_axis(mut self, up_axis: Vector3) -> Self {
        self.up_axis = up_axis;
        self
    }

    /// Generate the fan of rays described by this configuration
    pub fn fan(&self) -> Result<RayFan, SensorError> {
        generate_fan(
            &self.origin,
            &self.direction,
            self.aperture_angle,
            self.angular_resolution,
            self.working_distance,
            &self.up_axis,
        )
    }
}

/// A configured rangefinder sensor. The fan of rays is generated once when the sensor is built
/// and again only when its pose changes, so a static sensor does no per-frame ray setup.
#[derive(Debug, Clone)]
pub struct RangeSensor {
    config: SensorConfig,
    fan: RayFan,
}

impl RangeSensor {
    /// Create a sensor from its configuration, failing with `SensorError::InvalidParameter` if
    /// the configuration is malformed.
    pub fn new(config: SensorConfig) -> Result<Self, SensorError> {
        let fan = config.fan()?;
        debug!(
            "sensor at {:?} built with {} rays over [{}, {}]",
            config.origin.coords.as_slice(),
            fan.len(),
            config.working_distance.min,
            config.working_distance.max
        );
        Ok(Self { config, fan })
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn fan(&self) -> &RayFan {
        &self.fan
    }

    /// Move the sensor. The fan is regenerated only if the pose actually changed. If the new
    /// pose is invalid the error is returned and the sensor keeps its previous pose.
    ///
    /// # Arguments
    ///
    /// * `origin`: the new sensor origin
    /// * `direction`: the new facing direction, does not need to be normalized
    ///
    /// returns: Result<(), SensorError>
    pub fn set_pose(&mut self, origin: Point3, direction: Vector3) -> Result<(), SensorError> {
        if origin == self.config.origin && direction == self.config.direction {
            return Ok(());
        }

        let config = SensorConfig {
            origin,
            direction,
            ..self.config.clone()
        };
        self.fan = config.fan()?;
        self.config = config;
        debug!("sensor moved to {:?}", origin.coords.as_slice());
        Ok(())
    }

    /// Cast every ray of the sensor against the targets
    pub fn cast<T: RayTarget>(&self, targets: &[T]) -> Vec<HitResult> {
        intersect_fan(&self.fan, targets)
    }

    /// Run the sensor for one frame against the current targets and reduce the results
    pub fn scan<T: RayTarget>(&self, targets: &[T]) -> SensorFrameOutput {
        let hits = self.cast(targets);
        SensorFrameOutput::assemble(&self.fan, &hits)
    }
}
