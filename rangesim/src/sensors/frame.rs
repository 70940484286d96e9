//! Reduction of a frame's per-ray hit results into the sensor output.

use super::{HitResult, RayFan};
use crate::io::hit_points_csv;
use crate::{Mesh, Point3, Result, SensorError};
use itertools::Itertools;

/// A triangulated fan covering the area swept by a sensor's rays. Vertex `2i` is the start of
/// ray `i` and vertex `2i + 1` is where it ended, either at its hit point or at its far limit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FanMesh {
    pub vertices: Vec<Point3>,
    pub indices: Vec<[u32; 3]>,
}

impl FanMesh {
    /// Flatten the vertices into an `[x, y, z, x, y, z, ...]` buffer for upload to a renderer
    pub fn vertex_buffer(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }

    /// Flatten the triangle indices into a single index buffer
    pub fn index_buffer(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }

    /// Create a mesh from the fan. Fails if the fan has no triangles, which happens when the
    /// sensor has fewer than two rays.
    pub fn to_mesh(&self) -> Result<Mesh> {
        Mesh::try_new(self.vertices.clone(), self.indices.clone())
    }
}

/// The output of one sensor for one frame. It is assembled in full by `reduce` and is never
/// modified afterward, so a published frame can be shared with readers as an immutable value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorFrameOutput {
    hit_points: Vec<Point3>,
    ranges: Vec<Option<f64>>,
    fan: FanMesh,
}

impl SensorFrameOutput {
    /// Reduce the hit results of a fan into the frame output. `hits[i]` must be the result of
    /// casting `fan.rays()[i]`. The hit points are collected in ray order, and the fan mesh is
    /// built from adjacent pairs of rays, wrapping from the last ray to the first when the fan
    /// covers a full turn.
    ///
    /// # Arguments
    ///
    /// * `fan`: the rays which were cast this frame
    /// * `hits`: one result per ray, in the same order as the fan
    ///
    /// returns: Result<SensorFrameOutput, SensorError>
    pub fn reduce(fan: &RayFan, hits: &[HitResult]) -> std::result::Result<Self, SensorError> {
        if fan.len() != hits.len() {
            return Err(SensorError::ResultMismatch {
                rays: fan.len(),
                results: hits.len(),
            });
        }

        Ok(Self::assemble(fan, hits))
    }

    /// Build the output from results already known to match the fan
    pub(crate) fn assemble(fan: &RayFan, hits: &[HitResult]) -> Self {
        let mut hit_points = Vec::new();
        let mut vertices = Vec::with_capacity(fan.len() * 2);

        for (ray, hit) in fan.rays().iter().zip(hits) {
            let end = match hit {
                HitResult::Hit { point, .. } => {
                    hit_points.push(*point);
                    *point
                }
                HitResult::Miss => ray.far_point(),
            };
            vertices.push(ray.start());
            vertices.push(end);
        }

        let fan_mesh = FanMesh {
            vertices,
            indices: fan_indices(fan.len(), fan.is_closed()),
        };

        Self {
            hit_points,
            ranges: hits.iter().map(|h| h.distance()).collect(),
            fan: fan_mesh,
        }
    }

    /// The points where rays hit an obstacle, in ray order. Rays which missed are not included.
    pub fn hit_points(&self) -> &[Point3] {
        &self.hit_points
    }

    pub fn hit_count(&self) -> usize {
        self.hit_points.len()
    }

    /// The measured distance of each ray from the sensor origin, `None` where the ray missed
    pub fn ranges(&self) -> &[Option<f64>] {
        &self.ranges
    }

    pub fn ray_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn fan(&self) -> &FanMesh {
        &self.fan
    }

    /// Where each ray ended this frame: its hit point, or its far limit if it missed
    pub fn endpoints(&self) -> impl Iterator<Item = &Point3> {
        self.fan.vertices.iter().skip(1).step_by(2)
    }

    /// The visible segment of each ray as `(start, end)` pairs, for drawing laser lines
    pub fn segments(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.fan.vertices.chunks_exact(2).map(|s| (s[0], s[1]))
    }

    /// Export the hit points in the CSV format described in `io::hit_points_csv`
    pub fn to_csv(&self) -> String {
        hit_points_csv(&self.hit_points)
    }
}

fn fan_indices(count: usize, closed: bool) -> Vec<[u32; 3]> {
    if count < 2 {
        return Vec::new();
    }

    let n = count as u32;
    let wrap = closed.then_some((n - 1, 0));
    (0..n)
        .tuple_windows::<(u32, u32)>()
        .chain(wrap)
        .flat_map(|(i, j)| {
            [
                [2 * i, 2 * i + 1, 2 * j],
                [2 * j, 2 * i + 1, 2 * j + 1],
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Obstacle;
    use crate::sensors::{WorkingDistance, generate_fan, intersect_fan};
    use crate::{Iso3, Vector3};
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn make_fan(aperture: f64, resolution: f64) -> RayFan {
        let wd = WorkingDistance::new(1.0, 15.0).unwrap();
        generate_fan(
            &Point3::new(0.0, 0.0, -5.0),
            &Vector3::new(0.0, 0.0, -1.0),
            aperture,
            resolution,
            wd,
            &Vector3::y(),
        )
        .unwrap()
    }

    /// A wide wall with its near face at z = -10, off-center so no ray runs along a face diagonal
    fn wall() -> Obstacle {
        Obstacle::new(
            Mesh::create_box(40.0, 10.0, 2.0),
            Iso3::translation(0.37, 0.21, -11.0),
        )
    }

    #[test]
    fn test_mismatched_results() {
        let fan = make_fan(90.0, 10.0);
        let hits = vec![HitResult::Miss; 3];
        let result = SensorFrameOutput::reduce(&fan, &hits);
        assert_eq!(
            result,
            Err(SensorError::ResultMismatch {
                rays: 9,
                results: 3
            })
        );
    }

    #[test]
    fn test_all_miss_uses_far_points() {
        let fan = make_fan(90.0, 10.0);
        let hits = vec![HitResult::Miss; fan.len()];
        let out = SensorFrameOutput::reduce(&fan, &hits).unwrap();

        assert_eq!(out.hit_count(), 0);
        assert!(out.hit_points().is_empty());
        for (ray, end) in fan.rays().iter().zip(out.endpoints()) {
            assert_eq!(*end, ray.far_point());
        }
        assert!(out.ranges().iter().all(|r| r.is_none()));
    }

    #[test]
    fn test_center_ray_scenario() {
        let fan = make_fan(90.0, 90.0);
        let hits = intersect_fan(&fan, &[wall()]);
        let out = SensorFrameOutput::reduce(&fan, &hits).unwrap();

        assert_eq!(out.hit_count(), 1);
        assert_relative_eq!(out.hit_points()[0].z, -10.0, epsilon = 1e-9);
        assert_relative_eq!(out.ranges()[0].unwrap(), 5.0, epsilon = 1e-9);
        assert!(out.fan().indices.is_empty());
    }

    #[test]
    fn test_partial_occlusion() {
        // Only the rays pointing to +x see the narrow post
        let post = Obstacle::new(
            Mesh::create_box(1.0, 1.0, 1.0),
            Iso3::translation(4.0, 0.0, -9.0),
        );
        let fan = make_fan(120.0, 2.0);
        let hits = intersect_fan(&fan, &[post]);
        let out = SensorFrameOutput::reduce(&fan, &hits).unwrap();

        let expected = hits.iter().filter_map(|h| h.point()).collect::<Vec<_>>();
        assert!(out.hit_count() > 0);
        assert!(out.hit_count() < fan.len());
        assert_eq!(out.hit_points(), expected.as_slice());
        for p in out.hit_points() {
            assert!(p.x > 0.0);
        }

        // The fan stays connected through the occluded section
        assert_eq!(out.fan().indices.len(), 2 * (fan.len() - 1));
    }

    #[test]
    fn test_hit_count_bounded_by_rays() {
        let fan = make_fan(276.0, 1.0);
        let hits = intersect_fan(&fan, &[wall()]);
        let out = SensorFrameOutput::reduce(&fan, &hits).unwrap();
        assert_eq!(out.hit_count(), out.hit_points().len());
        assert!(out.hit_count() <= fan.len());
        assert_eq!(out.ray_count(), fan.len());
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let fan = make_fan(180.0, 3.0);
        let hits = intersect_fan(&fan, &[wall()]);
        let a = SensorFrameOutput::reduce(&fan, &hits).unwrap();
        let b = SensorFrameOutput::reduce(&fan, &hits).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fan().vertex_buffer(), b.fan().vertex_buffer());
    }

    #[test]
    fn test_full_turn_closes_loop() {
        let fan = make_fan(360.0, 1.0);
        assert_eq!(fan.len(), 360);
        let hits = vec![HitResult::Miss; fan.len()];
        let out = SensorFrameOutput::reduce(&fan, &hits).unwrap();

        let indices = &out.fan().indices;
        assert_eq!(indices.len(), 720);
        assert_eq!(indices[718], [718, 719, 0]);
        assert_eq!(indices[719], [0, 719, 1]);
    }

    #[test_case(0, false, 0)]
    #[test_case(1, false, 0)]
    #[test_case(2, false, 2)]
    #[test_case(5, false, 8)]
    #[test_case(5, true, 10)]
    fn test_fan_triangle_count(count: usize, closed: bool, expected: usize) {
        assert_eq!(fan_indices(count, closed).len(), expected);
    }

    #[test]
    fn test_fan_quad_layout() {
        let indices = fan_indices(3, false);
        assert_eq!(indices, vec![[0, 1, 2], [2, 1, 3], [2, 3, 4], [4, 3, 5]]);
    }

    #[test]
    fn test_segments_start_at_min() {
        let fan = make_fan(30.0, 10.0);
        let out = SensorFrameOutput::reduce(&fan, &vec![HitResult::Miss; fan.len()]).unwrap();
        let segments = out.segments().collect::<Vec<_>>();
        assert_eq!(segments.len(), 3);
        for ((start, end), ray) in segments.iter().zip(fan.rays()) {
            assert_eq!(*start, ray.start());
            assert_eq!(*end, ray.far_point());
        }
    }

    #[test]
    fn test_fan_to_mesh() {
        let fan = make_fan(30.0, 10.0);
        let out = SensorFrameOutput::reduce(&fan, &vec![HitResult::Miss; fan.len()]).unwrap();
        let mesh = out.fan().to_mesh().unwrap();
        assert_eq!(mesh.faces().len(), 4);
        assert_eq!(out.fan().index_buffer().len(), 12);
        assert_eq!(out.fan().vertex_buffer().len(), 18);
    }

    #[test]
    fn test_empty_fan() {
        let fan = make_fan(0.0, 1.0);
        let out = SensorFrameOutput::reduce(&fan, &[]).unwrap();
        assert_eq!(out.hit_count(), 0);
        assert!(out.fan().vertices.is_empty());
        assert!(out.fan().to_mesh().is_err());
        assert_eq!(out.to_csv(), "x,y,z");
    }
}
