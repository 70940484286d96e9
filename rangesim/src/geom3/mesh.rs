//! This module contains the triangle mesh used as obstacle geometry. It is a thin wrapper around
//! the parry3d `TriMesh`, which provides the bounding volume hierarchy used for ray casting.

use crate::{Iso3, Point3, Result, Vector3};
use parry3d_f64::bounding_volume::Aabb;
use parry3d_f64::shape::{Cuboid, TriMesh};

#[derive(Clone)]
pub struct Mesh {
    shape: TriMesh,
}

impl Mesh {
    /// Create a new mesh from a list of vertices and a list of triangular faces, each face being
    /// three indices into the vertex list. Fails if there are no faces or if a face references a
    /// vertex which does not exist.
    ///
    /// # Arguments
    ///
    /// * `vertices`: the vertices of the mesh in its local frame
    /// * `faces`: the triangles of the mesh as indices into `vertices`
    ///
    /// returns: Result<Mesh, Box<dyn Error, Global>>
    pub fn try_new(vertices: Vec<Point3>, faces: Vec<[u32; 3]>) -> Result<Self> {
        let n = vertices.len() as u32;
        if faces.iter().flatten().any(|&i| i >= n) {
            return Err("Face index out of bounds".into());
        }
        let shape = TriMesh::new(vertices, faces)?;
        Ok(Self { shape })
    }

    /// Create a box mesh centered on the origin of its local frame with the given extents along
    /// the x, y and z axes. Each of the six faces is made of two triangles.
    ///
    /// # Arguments
    ///
    /// * `length`: the extent along the x axis
    /// * `width`: the extent along the y axis
    /// * `height`: the extent along the z axis
    ///
    /// returns: Mesh
    ///
    /// # Examples
    ///
    /// ```
    /// use rangesim::Mesh;
    /// let mesh = Mesh::create_box(1.0, 3.0, 2.0);
    /// assert_eq!(mesh.faces().len(), 12);
    /// ```
    pub fn create_box(length: f64, width: f64, height: f64) -> Self {
        let cuboid = Cuboid::new(Vector3::new(length, width, height) * 0.5);
        let (vertices, faces) = cuboid.to_trimesh();

        // A cuboid always produces twelve valid faces
        let shape = TriMesh::new(vertices, faces).expect("cuboid triangulation is never empty");
        Self { shape }
    }

    #[cfg(feature = "stl")]
    pub fn load_stl(path: &std::path::Path) -> Result<Self> {
        let mut file = std::fs::File::open(path)?;
        let stl = stl_io::read_stl(&mut file)?;
        let vertices = stl
            .vertices
            .iter()
            .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
            .collect();
        let faces = stl
            .faces
            .iter()
            .map(|f| {
                [
                    f.vertices[0] as u32,
                    f.vertices[1] as u32,
                    f.vertices[2] as u32,
                ]
            })
            .collect();
        Self::try_new(vertices, faces)
    }

    pub fn vertices(&self) -> &[Point3] {
        self.shape.vertices()
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        self.shape.indices()
    }

    pub fn tri_mesh(&self) -> &TriMesh {
        &self.shape
    }

    /// Returns the axis-aligned bounding box of the mesh after it has been moved by `iso`
    pub fn aabb(&self, iso: &Iso3) -> Aabb {
        self.shape.aabb(iso)
    }
}
