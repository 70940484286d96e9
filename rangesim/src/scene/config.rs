//! Serializable description of a scene: the obstacles in it and the sensors watching them.

use super::{BouncingBox, ObstacleSource, SatelliteBox, Scene, StaticObstacle};
use crate::na::{Translation3, UnitQuaternion};
use crate::{Iso3, Mesh, Point3, RangeSensor, Result, SensorConfig, Vector3};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_height() -> f64 {
    4.0
}

/// The kinds of obstacle a scene file can describe. Sizes are box extents along x, y and z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObstacleConfig {
    /// A box at a fixed position. `rotation` is a scaled axis, its length being the angle in
    /// radians.
    Static {
        size: [f64; 3],
        position: Point3,
        #[serde(default)]
        rotation: Vector3,
    },

    Bouncing {
        size: [f64; 3],
        start: Point3,
        end: Point3,
        speed: f64,
        #[serde(default)]
        phase: f64,
    },

    Satellite {
        size: [f64; 3],
        radius: f64,
        #[serde(default = "default_height")]
        height: f64,
    },
}

impl ObstacleConfig {
    fn validate(&self) -> Result<()> {
        let size = match self {
            ObstacleConfig::Static { size, .. }
            | ObstacleConfig::Bouncing { size, .. }
            | ObstacleConfig::Satellite { size, .. } => size,
        };
        if size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(format!("Box size must be positive, got {:?}", size).into());
        }
        Ok(())
    }

    /// Build the obstacle source this configuration describes
    pub fn build(&self) -> Result<Box<dyn ObstacleSource>> {
        self.validate()?;
        let source: Box<dyn ObstacleSource> = match self {
            ObstacleConfig::Static {
                size,
                position,
                rotation,
            } => {
                let pose = Iso3::from_parts(
                    Translation3::from(position.coords),
                    UnitQuaternion::from_scaled_axis(*rotation),
                );
                Box::new(StaticObstacle::new(
                    Mesh::create_box(size[0], size[1], size[2]),
                    pose,
                ))
            }
            ObstacleConfig::Bouncing {
                size,
                start,
                end,
                speed,
                phase,
            } => Box::new(BouncingBox::new(*size, *start, *end, *speed, *phase)),
            ObstacleConfig::Satellite {
                size,
                radius,
                height,
            } => Box::new(SatelliteBox::new(*size, *radius, *height)),
        };
        Ok(source)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleEntry {
    pub name: String,
    #[serde(flatten)]
    pub config: ObstacleConfig,
}

/// A sensor in a scene file. Without `targets` the sensor watches every obstacle, otherwise only
/// the named ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEntry {
    pub name: String,
    #[serde(flatten)]
    pub config: SensorConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub obstacles: Vec<ObstacleEntry>,
    #[serde(default)]
    pub sensors: Vec<SensorEntry>,
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the scene. Every sensor configuration is validated here, and a sensor naming an
    /// obstacle which is not in the scene is an error.
    pub fn build(&self) -> Result<Scene> {
        let mut scene = Scene::new();
        for entry in &self.obstacles {
            if scene.obstacle_index(&entry.name).is_some() {
                return Err(format!("Duplicate obstacle name '{}'", entry.name).into());
            }
            scene.add_obstacle(&entry.name, entry.config.build()?);
        }

        for entry in &self.sensors {
            let sensor = RangeSensor::new(entry.config.clone())
                .map_err(|e| format!("Sensor '{}': {}", entry.name, e))?;

            match &entry.targets {
                Some(names) => {
                    let indices = names
                        .iter()
                        .map(|n| {
                            scene.obstacle_index(n).ok_or_else(|| {
                                format!("Sensor '{}' watches unknown obstacle '{}'", entry.name, n)
                            })
                        })
                        .collect::<std::result::Result<Vec<_>, _>>()?;
                    scene.add_sensor_watching(&entry.name, sensor, indices);
                }
                None => {
                    scene.add_sensor(&entry.name, sensor);
                }
            }
        }

        debug!(
            "built scene with {} obstacles and {} sensors",
            scene.obstacle_count(),
            scene.sensor_count()
        );
        Ok(scene)
    }
}
