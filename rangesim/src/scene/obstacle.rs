use crate::sensors::RayTarget;
use crate::{Iso3, Mesh, Point3};
use parry3d_f64::bounding_volume::Aabb;
use parry3d_f64::query::{Ray, RayCast};
use std::sync::Arc;

/// A mesh placed in the world for one frame. The mesh is shared, so posing the same body every
/// frame does not copy its triangles or rebuild its bounding volume hierarchy.
#[derive(Clone)]
pub struct Obstacle {
    mesh: Arc<Mesh>,
    pose: Iso3,
}

impl Obstacle {
    pub fn new(mesh: Mesh, pose: Iso3) -> Self {
        Self::shared(Arc::new(mesh), pose)
    }

    pub fn shared(mesh: Arc<Mesh>, pose: Iso3) -> Self {
        Self { mesh, pose }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn pose(&self) -> &Iso3 {
        &self.pose
    }

    /// The vertices of the mesh moved into world space by the obstacle's pose
    pub fn world_vertices(&self) -> Vec<Point3> {
        self.mesh.vertices().iter().map(|v| self.pose * v).collect()
    }

    pub fn aabb(&self) -> Aabb {
        self.mesh.aabb(&self.pose)
    }
}

impl RayTarget for Obstacle {
    fn cast(&self, ray: &Ray, max_toi: f64) -> Option<f64> {
        self.mesh.tri_mesh().cast_ray(&self.pose, ray, max_toi, false)
    }
}
