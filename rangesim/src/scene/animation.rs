//! Sources which pose obstacles for a given time. These stand in for whatever animates or drags
//! the bodies in a host application; the sensors only ever see the posed `Obstacle`.

use super::Obstacle;
use crate::na::{Translation3, UnitQuaternion};
use crate::{Iso3, Mesh, Point3, Vector3};
use std::sync::Arc;

/// Anything which can supply an obstacle for a frame. A source returns `None` when its body is
/// not available at that time, in which case sensors treat it as absent.
pub trait ObstacleSource {
    fn obstacle_at(&self, time: f64) -> Option<Obstacle>;
}

/// An obstacle which stays where it is put. Its pose can be replaced between frames, as when it
/// is dragged by a handle, and it can be unmounted so that it is absent from the scene.
#[derive(Clone)]
pub struct StaticObstacle {
    mesh: Arc<Mesh>,
    pose: Iso3,
    mounted: bool,
}

impl StaticObstacle {
    pub fn new(mesh: Mesh, pose: Iso3) -> Self {
        Self {
            mesh: Arc::new(mesh),
            pose,
            mounted: true,
        }
    }

    pub fn pose(&self) -> &Iso3 {
        &self.pose
    }

    pub fn set_pose(&mut self, pose: Iso3) {
        self.pose = pose;
    }

    pub fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
    }
}

impl ObstacleSource for StaticObstacle {
    fn obstacle_at(&self, _time: f64) -> Option<Obstacle> {
        self.mounted
            .then(|| Obstacle::shared(Arc::clone(&self.mesh), self.pose))
    }
}

/// A box which slides back and forth along a straight line between two points. The position
/// follows `start + (end - start) * (sin(time * speed + phase) / 2 + 0.5)`, so the box spends
/// equal time on either side of the midpoint and never rotates.
#[derive(Clone)]
pub struct BouncingBox {
    mesh: Arc<Mesh>,
    start: Point3,
    end: Point3,
    speed: f64,
    phase: f64,
}

impl BouncingBox {
    /// # Arguments
    ///
    /// * `size`: the box extents along x, y and z
    /// * `start`: one end of the path
    /// * `end`: the other end of the path
    /// * `speed`: angular frequency of the oscillation, in radians per second
    /// * `phase`: phase offset of the oscillation, in radians
    pub fn new(size: [f64; 3], start: Point3, end: Point3, speed: f64, phase: f64) -> Self {
        Self {
            mesh: Arc::new(Mesh::create_box(size[0], size[1], size[2])),
            start,
            end,
            speed,
            phase,
        }
    }

    pub fn position_at(&self, time: f64) -> Point3 {
        let f = (time * self.speed + self.phase).sin() / 2.0 + 0.5;
        self.start + (self.end - self.start) * f
    }
}

impl Default for BouncingBox {
    fn default() -> Self {
        Self::new(
            [1.0, 1.0, 1.0],
            Point3::new(-4.0, 1.0, 2.0),
            Point3::new(10.0, 3.0, -6.0),
            1.0,
            0.0,
        )
    }
}

impl ObstacleSource for BouncingBox {
    fn obstacle_at(&self, time: f64) -> Option<Obstacle> {
        let pose = Iso3::from_parts(self.position_at(time).coords.into(), UnitQuaternion::identity());
        Some(Obstacle::shared(Arc::clone(&self.mesh), pose))
    }
}

/// A box which orbits around the vertical axis while tumbling. At time `t` it sits at
/// `(sin(t) * r, cos(t / 2) * r / 2 + height, cos(t) * r)` and is turned by `t` radians about x
/// followed by `t` radians about y.
#[derive(Clone)]
pub struct SatelliteBox {
    mesh: Arc<Mesh>,
    radius: f64,
    height: f64,
}

impl SatelliteBox {
    pub fn new(size: [f64; 3], radius: f64, height: f64) -> Self {
        Self {
            mesh: Arc::new(Mesh::create_box(size[0], size[1], size[2])),
            radius,
            height,
        }
    }

    pub fn pose_at(&self, time: f64) -> Iso3 {
        let r = self.radius;
        let position = Vector3::new(
            time.sin() * r,
            (time / 2.0).cos() * r / 2.0 + self.height,
            time.cos() * r,
        );
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), time)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), time);
        Iso3::from_parts(Translation3::from(position), rotation)
    }
}

impl Default for SatelliteBox {
    fn default() -> Self {
        Self::new([1.0, 1.0, 1.0], 5.0, 4.0)
    }
}

impl ObstacleSource for SatelliteBox {
    fn obstacle_at(&self, time: f64) -> Option<Obstacle> {
        Some(Obstacle::shared(Arc::clone(&self.mesh), self.pose_at(time)))
    }
}
