//! Indexed triangle mesh primitive.
//!
//! Positions are shared between triangles through a flat index list (every
//! three indices form a triangle). Normals and UVs are optional and, when
//! present, hold one entry per vertex.

use lux_math::{Mat4, Vec3};

use crate::transform::{normal_matrix, TransformOp};
use crate::{Material, SceneError, SceneResult};

/// A triangle mesh with a single material.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    positions: Vec<Vec3>,

    /// Vertex normals (optional)
    normals: Option<Vec<Vec3>>,

    /// UV coordinates (optional - one [u, v] per vertex)
    uvs: Option<Vec<[f32; 2]>>,

    /// Triangle indices (every 3 indices form a triangle)
    indices: Vec<u32>,

    material: Material,
}

impl Mesh {
    /// Create a new mesh from positions and indices, optionally with normals.
    ///
    /// Fails if the index list is not a whole number of triangles, refers
    /// past the end of `positions`, or if `normals` has the wrong length.
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        normals: Option<Vec<Vec3>>,
        material: Material,
    ) -> SceneResult<Self> {
        Self::new_with_uvs(positions, indices, normals, None, material)
    }

    /// Create a new mesh with UV coordinates.
    pub fn new_with_uvs(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        normals: Option<Vec<Vec3>>,
        uvs: Option<Vec<[f32; 2]>>,
        material: Material,
    ) -> SceneResult<Self> {
        let mesh = Self {
            positions,
            normals,
            uvs,
            indices,
            material,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// A mesh with no triangles. Never intersected.
    pub fn empty(material: Material) -> Self {
        Self {
            positions: Vec::new(),
            normals: None,
            uvs: None,
            indices: Vec::new(),
            material,
        }
    }

    /// Check the index and attribute arrays against the vertex count.
    pub fn validate(&self) -> SceneResult<()> {
        if self.indices.len() % 3 != 0 {
            return Err(SceneError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }

        let vertex_count = self.positions.len();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(SceneError::InvalidMesh(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }

        if let Some(normals) = &self.normals {
            if normals.len() != vertex_count {
                return Err(SceneError::InvalidMesh(format!(
                    "{} normals for {} vertices",
                    normals.len(),
                    vertex_count
                )));
            }
        }

        if let Some(uvs) = &self.uvs {
            if uvs.len() != vertex_count {
                return Err(SceneError::InvalidMesh(format!(
                    "{} uvs for {} vertices",
                    uvs.len(),
                    vertex_count
                )));
            }
        }

        Ok(())
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Face normals are unnormalized before accumulation, so larger faces
    /// weigh more. Counter-clockwise winding faces the viewer.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for face in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];

            let edge1 = self.positions[i1] - self.positions[i0];
            let edge2 = self.positions[i2] - self.positions[i0];
            let face_normal = edge1.cross(edge2);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            // Unreferenced or degenerate vertices
            *normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }

        self.normals = Some(normals);
    }

    pub fn translated(self, offset: Vec3) -> Self {
        self.transformed(TransformOp::Translate(offset))
    }

    /// Scale about the world origin.
    pub fn scaled(self, factors: Vec3) -> Self {
        self.transformed(TransformOp::Scale(factors))
    }

    /// Apply a placement step to positions and normals.
    pub fn transformed(self, op: TransformOp) -> Self {
        self.transformed_by(&op.to_matrix())
    }

    fn transformed_by(mut self, matrix: &Mat4) -> Self {
        for position in &mut self.positions {
            *position = matrix.transform_point3(*position);
        }

        if let Some(normals) = &mut self.normals {
            let carry = normal_matrix(matrix);
            for normal in normals {
                *normal = (carry * *normal).normalize_or_zero();
            }
        }

        self
    }

    /// Check if the mesh has normals.
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Check if the mesh has UV coordinates.
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Vertex indices of triangle `index`.
    ///
    /// Panics if `index >= triangle_count()`.
    pub fn triangle_indices(&self, index: usize) -> [usize; 3] {
        let face = &self.indices[3 * index..3 * index + 3];
        [face[0] as usize, face[1] as usize, face[2] as usize]
    }

    /// Corner positions of triangle `index`.
    pub fn triangle(&self, index: usize) -> [Vec3; 3] {
        self.triangle_indices(index).map(|i| self.positions[i])
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    pub fn uvs(&self) -> Option<&[[f32; 2]]> {
        self.uvs.as_deref()
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}
