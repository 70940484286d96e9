//! Simulation of simple rangefinder sensors against moving triangle-mesh obstacles. A sensor
//! casts a fan of rays each frame, finds the nearest hit of each ray within its working distance,
//! and reduces the results into hit points and a triangulated coverage fan.

use std::error::Error;

pub mod common;
pub mod errors;
pub mod geom3;
pub mod io;
pub mod scene;
pub mod sensors;

pub use parry3d_f64::na;

pub use errors::SensorError;
pub use geom3::{Iso3, Mesh, Plane3, Point3, UnitVec3, Vector3};
pub use scene::{
    BouncingBox, FrameSink, Obstacle, ObstacleSource, SatelliteBox, Scene, SceneConfig,
    StaticObstacle,
};
pub use sensors::{
    FanMesh, HitResult, RangeSensor, RayFan, RayTarget, SensorConfig, SensorFrameOutput,
    SensorRay, WorkingDistance, generate_fan, intersect,
};

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;
