//! Intersection of sensor rays with the obstacles of a scene.

use super::{RayFan, RayTarget, SensorRay};
use crate::Point3;
use parry3d_f64::query::Ray;

/// Tolerance, in world units, applied at both ends of a ray's working distance. A surface lying
/// exactly at the minimum or maximum distance is reported as a hit even if rounding puts it a
/// hair outside the range.
pub const DISTANCE_TOL: f64 = 1.0e-6;

/// The outcome of casting one sensor ray for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    /// The nearest surface within range. `distance` is measured from the sensor origin and
    /// `target` is the index of the obstacle that was hit.
    Hit {
        point: Point3,
        distance: f64,
        target: usize,
    },

    /// Nothing within range
    Miss,
}

impl HitResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, HitResult::Hit { .. })
    }

    pub fn point(&self) -> Option<Point3> {
        match self {
            HitResult::Hit { point, .. } => Some(*point),
            HitResult::Miss => None,
        }
    }

    pub fn distance(&self) -> Option<f64> {
        match self {
            HitResult::Hit { distance, .. } => Some(*distance),
            HitResult::Miss => None,
        }
    }
}

/// Find the nearest intersection of a sensor ray with a set of targets within the ray's working
/// distance. Distances are measured from the sensor origin, and the range is inclusive at both
/// ends within `DISTANCE_TOL`. Surfaces in the dead zone in front of the minimum distance are
/// ignored and do not shadow anything behind them.
///
/// When two targets are hit at exactly the same distance, the one that comes first in `targets`
/// wins.
///
/// # Arguments
///
/// * `ray`: the sensor ray to cast
/// * `targets`: the obstacles to test, in priority order for ties
///
/// returns: HitResult
pub fn intersect<T: RayTarget>(ray: &SensorRay, targets: &[T]) -> HitResult {
    let lead = (ray.min_distance() - DISTANCE_TOL).max(0.0);
    let cast = Ray::new(ray.point_at(lead), ray.direction().into_inner());
    let max_toi = ray.max_distance() + DISTANCE_TOL - lead;

    let mut best: Option<(usize, f64)> = None;
    for (i, target) in targets.iter().enumerate() {
        let Some(toi) = target.cast(&cast, max_toi) else {
            continue;
        };
        if !(0.0..=max_toi).contains(&toi) {
            continue;
        }
        if best.is_none_or(|(_, d)| toi < d) {
            best = Some((i, toi));
        }
    }

    match best {
        Some((target, toi)) => {
            let distance = lead + toi;
            HitResult::Hit {
                point: ray.point_at(distance),
                distance,
                target,
            }
        }
        None => HitResult::Miss,
    }
}

/// Cast every ray of a fan against the targets, producing one result per ray in fan order
pub fn intersect_fan<T: RayTarget>(fan: &RayFan, targets: &[T]) -> Vec<HitResult> {
    fan.rays().iter().map(|r| intersect(r, targets)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Obstacle;
    use crate::sensors::WorkingDistance;
    use crate::{Iso3, Mesh, Plane3, Vector3};
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn ray_down_z() -> SensorRay {
        let wd = WorkingDistance::new(1.0, 15.0).unwrap();
        SensorRay::new(Point3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, -1.0), wd).unwrap()
    }

    /// A thin wall whose near face sits at `z`, seen from a sensor looking down -z. It is shifted
    /// sideways so the ray does not run along the diagonal shared by the face's two triangles.
    fn wall_at(z: f64) -> Obstacle {
        let mesh = Mesh::create_box(10.0, 10.0, 1.0);
        Obstacle::new(mesh, Iso3::translation(1.3, 0.7, z - 0.5))
    }

    #[test]
    fn test_no_targets_is_miss() {
        let targets: Vec<Obstacle> = Vec::new();
        assert_eq!(intersect(&ray_down_z(), &targets), HitResult::Miss);
    }

    #[test]
    fn test_out_of_range_is_miss() {
        let targets = vec![wall_at(-25.0)];
        assert_eq!(intersect(&ray_down_z(), &targets), HitResult::Miss);
    }

    #[test]
    fn test_perpendicular_plane_matches_analytic() {
        let ray = ray_down_z();
        for z in [-6.5, -9.25, -13.0, -19.9] {
            let plane = Plane3::new(Vector3::z_axis(), z);
            let expected = plane
                .ray_distance(ray.origin(), &ray.direction().into_inner())
                .unwrap();

            let hit = intersect(&ray, &[wall_at(z)]);
            assert_relative_eq!(hit.distance().unwrap(), expected, epsilon = 1e-9);
            assert_relative_eq!(hit.point().unwrap().z, z, epsilon = 1e-9);

            let hit = intersect(&ray, &[plane]);
            assert_relative_eq!(hit.distance().unwrap(), expected, epsilon = 1e-9);
        }
    }

    #[test_case(-6.0, true; "exactly at min")]
    #[test_case(-20.0, true; "exactly at max")]
    #[test_case(-6.0 + 1e-7, true; "within tolerance before min")]
    #[test_case(-20.0 - 1e-7, true; "within tolerance past max")]
    #[test_case(-20.001, false; "past max")]
    fn test_range_boundaries(z: f64, expect_hit: bool) {
        let plane = Plane3::new(Vector3::z_axis(), z);
        let hit = intersect(&ray_down_z(), &[plane]);
        assert_eq!(hit.is_hit(), expect_hit);
    }

    #[test]
    fn test_mesh_at_min_boundary() {
        let hit = intersect(&ray_down_z(), &[wall_at(-6.0)]);
        assert_relative_eq!(hit.distance().unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dead_zone_does_not_shadow() {
        // The first wall is 0.5 from the sensor, inside the dead zone
        let near = Obstacle::new(
            Mesh::create_box(10.0, 10.0, 0.1),
            Iso3::translation(1.3, 0.7, -5.5),
        );
        let far = wall_at(-12.0);
        let hit = intersect(&ray_down_z(), &[near, far]);
        assert!(matches!(hit, HitResult::Hit { target: 1, .. }));
        assert_relative_eq!(hit.distance().unwrap(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dead_zone_ending_inside_body_reports_exit_face() {
        // The box spans z in [-8, -4] and the ray's visible segment starts at z = -6, inside it
        let body = Obstacle::new(
            Mesh::create_box(10.0, 10.0, 4.0),
            Iso3::translation(1.3, 0.7, -6.0),
        );
        let hit = intersect(&ray_down_z(), &[body]);
        assert!(matches!(hit, HitResult::Hit { target: 0, .. }));
        assert_relative_eq!(hit.distance().unwrap(), 3.0, epsilon = 1e-9);
        assert_relative_eq!(hit.point().unwrap().z, -8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nearest_wins() {
        let targets = vec![wall_at(-14.0), wall_at(-8.0), wall_at(-11.0)];
        let hit = intersect(&ray_down_z(), &targets);
        assert!(matches!(hit, HitResult::Hit { target: 1, .. }));
        assert_relative_eq!(hit.distance().unwrap(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tie_goes_to_first_target() {
        let a = Plane3::new(Vector3::z_axis(), -9.0);
        let b = Plane3::new(-Vector3::z_axis(), 9.0);
        let hit = intersect(&ray_down_z(), &[a, b]);
        assert!(matches!(hit, HitResult::Hit { target: 0, .. }));
    }

    #[test]
    fn test_missing_obstacle_is_skipped() {
        let targets = vec![None, Some(wall_at(-10.0)), None];
        let hit = intersect(&ray_down_z(), &targets);
        assert!(matches!(hit, HitResult::Hit { target: 1, .. }));
    }

    #[test]
    fn test_dyn_targets() {
        let wall = wall_at(-10.0);
        let plane = Plane3::new(Vector3::z_axis(), -7.0);
        let targets: Vec<&dyn RayTarget> = vec![&wall, &plane];
        let hit = intersect(&ray_down_z(), &targets);
        assert!(matches!(hit, HitResult::Hit { target: 1, .. }));
    }
}
