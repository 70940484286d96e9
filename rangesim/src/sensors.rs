//! This module contains tools for simulating rangefinder sensors and their per-frame output.
//! A sensor emits a fan of rays, each ray is cast against the obstacles in the scene, and the
//! nearest hit of every ray within the sensor's working distance is reduced into hit points and
//! a coverage fan mesh.

mod frame;
mod intersect;
mod range_sensor;
mod ray;
mod ray_fan;

use crate::{Mesh, Plane3};
use parry3d_f64::query::{Ray, RayCast};

pub use frame::{FanMesh, SensorFrameOutput};
pub use intersect::{DISTANCE_TOL, HitResult, intersect, intersect_fan};
pub use range_sensor::{RangeSensor, SensorConfig};
pub use ray::{SensorRay, WorkingDistance};
pub use ray_fan::{MAX_RAYS, RayFan, generate_fan};

/// Anything a sensor ray can be cast against. Implementors return the distance along `ray` to
/// the first surface crossing, in units of the ray direction's length, as long as it is no
/// further than `max_toi`. Both faces of a surface count; a ray starting inside a closed body
/// reports the boundary it leaves through.
pub trait RayTarget {
    fn cast(&self, ray: &Ray, max_toi: f64) -> Option<f64>;
}

impl RayTarget for Mesh {
    fn cast(&self, ray: &Ray, max_toi: f64) -> Option<f64> {
        self.tri_mesh().cast_local_ray(ray, max_toi, false)
    }
}

impl RayTarget for Plane3 {
    fn cast(&self, ray: &Ray, max_toi: f64) -> Option<f64> {
        self.ray_distance(&ray.origin, &ray.dir)
            .filter(|t| *t <= max_toi)
    }
}

impl<T: RayTarget + ?Sized> RayTarget for &T {
    fn cast(&self, ray: &Ray, max_toi: f64) -> Option<f64> {
        (**self).cast(ray, max_toi)
    }
}

impl<T: RayTarget + ?Sized> RayTarget for Box<T> {
    fn cast(&self, ray: &Ray, max_toi: f64) -> Option<f64> {
        (**self).cast(ray, max_toi)
    }
}

/// An empty slot is an obstacle that is not mounted yet, which nothing can hit.
impl<T: RayTarget> RayTarget for Option<T> {
    fn cast(&self, ray: &Ray, max_toi: f64) -> Option<f64> {
        self.as_ref().and_then(|t| t.cast(ray, max_toi))
    }
}
