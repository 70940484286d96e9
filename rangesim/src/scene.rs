//! This module contains the collaborators around the sensor pipeline: obstacles and the sources
//! which pose them each frame, the sink each sensor publishes its frame output into, and a scene
//! which drives the pipeline once per frame.

mod animation;
mod config;
mod obstacle;
mod sink;

pub use animation::{BouncingBox, ObstacleSource, SatelliteBox, StaticObstacle};
pub use config::{ObstacleConfig, ObstacleEntry, SceneConfig, SensorEntry};
pub use obstacle::Obstacle;
pub use sink::FrameSink;

use crate::RangeSensor;
use log::trace;

struct SensorSlot {
    name: String,
    sensor: RangeSensor,
    targets: Option<Vec<usize>>,
    sink: FrameSink,
}

/// A set of obstacle sources and sensors. Each call to `step` poses every obstacle for the given
/// time, runs every sensor against the obstacles it watches, and publishes each sensor's output
/// into its sink.
#[derive(Default)]
pub struct Scene {
    obstacles: Vec<(String, Box<dyn ObstacleSource>)>,
    sensors: Vec<SensorSlot>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an obstacle source, returning its index
    pub fn add_obstacle(&mut self, name: &str, source: Box<dyn ObstacleSource>) -> usize {
        self.obstacles.push((name.to_string(), source));
        self.obstacles.len() - 1
    }

    /// Add a sensor which watches every obstacle in the scene, returning its index
    pub fn add_sensor(&mut self, name: &str, sensor: RangeSensor) -> usize {
        self.push_sensor(name, sensor, None)
    }

    /// Add a sensor which only watches the obstacles at the given indices. An index which does
    /// not refer to an obstacle is treated as an obstacle that is never present.
    pub fn add_sensor_watching(
        &mut self,
        name: &str,
        sensor: RangeSensor,
        targets: Vec<usize>,
    ) -> usize {
        self.push_sensor(name, sensor, Some(targets))
    }

    fn push_sensor(&mut self, name: &str, sensor: RangeSensor, targets: Option<Vec<usize>>) -> usize {
        self.sensors.push(SensorSlot {
            name: name.to_string(),
            sensor,
            targets,
            sink: FrameSink::new(),
        });
        self.sensors.len() - 1
    }

    pub fn obstacle_index(&self, name: &str) -> Option<usize> {
        self.obstacles.iter().position(|(n, _)| n == name)
    }

    pub fn sensor_index(&self, name: &str) -> Option<usize> {
        self.sensors.iter().position(|s| s.name == name)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn sensor(&self, index: usize) -> Option<&RangeSensor> {
        self.sensors.get(index).map(|s| &s.sensor)
    }

    /// Mutable access to a sensor, for moving it between frames
    pub fn sensor_mut(&mut self, index: usize) -> Option<&mut RangeSensor> {
        self.sensors.get_mut(index).map(|s| &mut s.sensor)
    }

    pub fn sink(&self, index: usize) -> Option<&FrameSink> {
        self.sensors.get(index).map(|s| &s.sink)
    }

    /// Mutable access to a sensor's sink, for registering subscribers
    pub fn sink_mut(&mut self, index: usize) -> Option<&mut FrameSink> {
        self.sensors.get_mut(index).map(|s| &mut s.sink)
    }

    /// Pose every obstacle for the given time. Sources which have nothing to offer at this time
    /// leave an empty slot so indices stay aligned with the sources.
    pub fn obstacles_at(&self, time: f64) -> Vec<Option<Obstacle>> {
        self.obstacles
            .iter()
            .map(|(_, source)| source.obstacle_at(time))
            .collect()
    }

    /// Run one frame at `time` seconds for every sensor and publish the results
    pub fn step(&mut self, time: f64) {
        let frame = self.obstacles_at(time);
        trace!(
            "frame at t={:.3}: {} of {} obstacles present",
            time,
            frame.iter().flatten().count(),
            frame.len()
        );

        for slot in self.sensors.iter_mut() {
            let output = match &slot.targets {
                Some(indices) => {
                    let targets = indices
                        .iter()
                        .map(|i| frame.get(*i).and_then(Option::as_ref))
                        .collect::<Vec<_>>();
                    slot.sensor.scan(&targets)
                }
                None => slot.sensor.scan(&frame),
            };
            trace!("sensor '{}': {} hits", slot.name, output.hit_count());
            slot.sink.publish(output);
        }
    }
}
