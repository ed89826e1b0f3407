//! Triangle meshes.
//!
//! A [`Mesh`] is a vertex list plus triangular faces indexing into it. Meshes
//! are loaded from Wavefront OBJ files through `tobj`; only positions and
//! faces are retained.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::math::Vec3f;

/// A triangle given as three 0-based indices into the mesh's vertex list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read OBJ file {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("index list of length {0} does not describe whole triangles")]
    NonTriangularFaces(usize),
}

pub const CUBE_VERTICES: [Vec3f; 8] = [
    Vec3f::new(-0.5, -0.5, -0.5),
    Vec3f::new(-0.5, 0.5, -0.5),
    Vec3f::new(0.5, 0.5, -0.5),
    Vec3f::new(0.5, -0.5, -0.5),
    Vec3f::new(0.5, 0.5, 0.5),
    Vec3f::new(0.5, -0.5, 0.5),
    Vec3f::new(-0.5, 0.5, 0.5),
    Vec3f::new(-0.5, -0.5, 0.5),
];

pub const CUBE_FACES: [Face; 12] = [
    // Front
    Face::new(0, 1, 2),
    Face::new(0, 2, 3),
    // Right
    Face::new(3, 2, 4),
    Face::new(3, 4, 5),
    // Back
    Face::new(5, 4, 6),
    Face::new(5, 6, 7),
    // Left
    Face::new(7, 6, 1),
    Face::new(7, 1, 0),
    // Top
    Face::new(1, 6, 4),
    Face::new(1, 4, 2),
    // Bottom
    Face::new(5, 7, 0),
    Face::new(5, 0, 3),
];

/// Vertex positions and triangular faces.
///
/// Every face index is guaranteed to be in `0..vertices.len()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3f>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Builds a mesh, rejecting faces that reference missing vertices.
    pub fn new(vertices: Vec<Vec3f>, faces: Vec<Face>) -> Result<Self, LoadError> {
        let vertex_count = vertices.len();
        for (i, face) in faces.iter().enumerate() {
            if let Some(&index) = face
                .indices()
                .iter()
                .find(|&&idx| idx as usize >= vertex_count)
            {
                return Err(LoadError::IndexOutOfRange {
                    face: i,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// An axis-aligned cube of side 1 centred on the origin, faces wound outward.
    pub fn unit_cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.to_vec(),
            faces: CUBE_FACES.to_vec(),
        }
    }

    /// Loads every object and group in an OBJ file into a single mesh.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _materials) =
            tobj::load_obj(path, &load_options()).map_err(|source| LoadError::Obj {
                path: path.to_path_buf(),
                source,
            })?;
        let mesh = Self::from_models(&models)?;
        log::info!(
            "read model \"{}\" with {} vertices and {} faces",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }

    /// Loads OBJ text from a reader. Material libraries are not resolved.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |mtl_path| {
            log::warn!("ignoring material library {}", mtl_path.display());
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|source| LoadError::Obj {
            path: PathBuf::from("<memory>"),
            source,
        })?;
        Self::from_models(&models)
    }

    fn from_models(models: &[tobj::Model]) -> Result<Self, LoadError> {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for model in models {
            let mesh = &model.mesh;
            let offset = vertices.len() as u32;
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3f::new(p[0], p[1], p[2])),
            );

            if mesh.indices.len() % 3 != 0 {
                return Err(LoadError::NonTriangularFaces(mesh.indices.len()));
            }
            faces.extend(
                mesh.indices
                    .chunks_exact(3)
                    .map(|f| Face::new(f[0] + offset, f[1] + offset, f[2] + offset)),
            );
        }

        Self::new(vertices, faces)
    }

    pub fn vertices(&self) -> &[Vec3f] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The three world-space corners of a face.
    pub fn face_vertices(&self, face: &Face) -> [Vec3f; 3] {
        face.indices().map(|i| self.vertices[i as usize])
    }

    /// Rotates every vertex about the Y axis by `theta` radians, in place.
    pub fn rotate(&mut self, theta: f32) {
        for vertex in &mut self.vertices {
            *vertex = vertex.rotate_y(theta);
        }
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::TAU;

    const TRIANGLE_OBJ: &str = "\
# a single textured triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.5
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1
";

    fn assert_vertices_close(a: &Mesh, b: &Mesh) {
        for (va, vb) in a.vertices().iter().zip(b.vertices()) {
            assert_relative_eq!(va.x, vb.x, epsilon = 1e-5);
            assert_relative_eq!(va.y, vb.y, epsilon = 1e-5);
            assert_relative_eq!(va.z, vb.z, epsilon = 1e-5);
        }
    }

    #[test]
    fn loads_positions_and_zero_based_faces() {
        let mesh = Mesh::from_obj_reader(&mut TRIANGLE_OBJ.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
        assert_eq!(mesh.vertices()[2], Vec3f::new(0.0, 1.0, 0.5));
    }

    #[test]
    fn quads_are_triangulated() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = Mesh::from_obj_reader(&mut obj.as_bytes()).unwrap();
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = Mesh::from_obj("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, LoadError::Obj { .. }));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let err = Mesh::new(vec![Vec3f::ZERO; 2], vec![Face::new(0, 1, 2)]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::IndexOutOfRange {
                face: 0,
                index: 2,
                vertex_count: 2
            }
        ));
    }

    #[test]
    fn unit_cube_shape() {
        let cube = Mesh::unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 12);
        assert!(Mesh::new(cube.vertices().to_vec(), cube.faces().to_vec()).is_ok());
    }

    #[test]
    fn rotate_by_zero_is_identity() {
        let original = Mesh::unit_cube();
        let mut mesh = original.clone();
        mesh.rotate(0.0);
        assert_vertices_close(&mesh, &original);
    }

    #[test]
    fn rotate_full_turn_returns_home() {
        let original = Mesh::unit_cube();
        let mut mesh = original.clone();
        mesh.rotate(TAU);
        assert_vertices_close(&mesh, &original);
    }

    #[test]
    fn rotate_keeps_y() {
        let mut mesh = Mesh::unit_cube();
        mesh.rotate(1.0);
        for (v, orig) in mesh.vertices().iter().zip(CUBE_VERTICES.iter()) {
            assert_eq!(v.y, orig.y);
        }
    }
}
