//! One-sided quad primitive.
//!
//! A square is a parallelogram described by its bottom-left corner and two
//! edge vectors. Its four corners are stored explicitly so that placement
//! transforms can move them, after which the edges and the normal are
//! re-derived from the corners.

use lux_math::{Mat4, Vec3};

use crate::transform::TransformOp;
use crate::{Material, SceneError, SceneResult};

/// A quad facing along `normal()`. Rays hitting its back face pass through.
#[derive(Clone, Debug)]
pub struct Square {
    /// Corners: bottom-left, bottom-right, top-right, top-left
    vertices: [Vec3; 4],
    /// Per-corner UV coordinates
    uvs: [[f32; 2]; 4],
    /// Unit normal, cross(right, up)
    normal: Vec3,
    material: Material,
}

impl Square {
    /// Build a quad from a corner and two directions.
    ///
    /// `right` and `up` are normalized and then scaled by `width` and
    /// `height`; the normal is `normalize(cross(right, up))`.
    pub fn new(
        bottom_left: Vec3,
        right: Vec3,
        up: Vec3,
        width: f32,
        height: f32,
        material: Material,
    ) -> SceneResult<Self> {
        let right = right.normalize_or_zero() * width;
        let up = up.normalize_or_zero() * height;

        let vertices = [
            bottom_left,
            bottom_left + right,
            bottom_left + right + up,
            bottom_left + up,
        ];

        let mut square = Self {
            vertices,
            uvs: [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            normal: Vec3::ZERO,
            material,
        };
        square.recompute_normal()?;
        Ok(square)
    }

    /// Replace the UV range spanned by the corners. Hits report UVs
    /// interpolated across this range.
    pub fn with_uv_range(mut self, u_min: f32, u_max: f32, v_min: f32, v_max: f32) -> Self {
        self.uvs = [
            [u_min, v_min],
            [u_max, v_min],
            [u_max, v_max],
            [u_min, v_max],
        ];
        self
    }

    pub fn translated(self, offset: Vec3) -> SceneResult<Self> {
        self.transformed(TransformOp::Translate(offset))
    }

    /// Scale about the world origin.
    pub fn scaled(self, factors: Vec3) -> SceneResult<Self> {
        self.transformed(TransformOp::Scale(factors))
    }

    pub fn rotated_x(self, degrees: f32) -> SceneResult<Self> {
        self.transformed(TransformOp::RotateX(degrees))
    }

    pub fn rotated_y(self, degrees: f32) -> SceneResult<Self> {
        self.transformed(TransformOp::RotateY(degrees))
    }

    pub fn rotated_z(self, degrees: f32) -> SceneResult<Self> {
        self.transformed(TransformOp::RotateZ(degrees))
    }

    /// Apply a placement step to the corners and re-derive the normal.
    pub fn transformed(self, op: TransformOp) -> SceneResult<Self> {
        self.transformed_by(&op.to_matrix())
    }

    fn transformed_by(mut self, matrix: &Mat4) -> SceneResult<Self> {
        for vertex in &mut self.vertices {
            *vertex = matrix.transform_point3(*vertex);
        }
        self.recompute_normal()?;
        Ok(self)
    }

    fn recompute_normal(&mut self) -> SceneResult<()> {
        let normal = self.right_edge().cross(self.up_edge());
        if !normal.is_finite() || normal.length_squared() <= f32::EPSILON * f32::EPSILON {
            return Err(SceneError::InvalidGeometry(format!(
                "square edges {} and {} do not span a plane",
                self.right_edge(),
                self.up_edge()
            )));
        }
        self.normal = normal.normalize();
        Ok(())
    }

    pub fn bottom_left(&self) -> Vec3 {
        self.vertices[0]
    }

    /// Edge from the bottom-left to the bottom-right corner.
    pub fn right_edge(&self) -> Vec3 {
        self.vertices[1] - self.vertices[0]
    }

    /// Edge from the bottom-left to the top-left corner.
    pub fn up_edge(&self) -> Vec3 {
        self.vertices[3] - self.vertices[0]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Center of the quad (midpoint of the bottom-left/top-right diagonal).
    pub fn center(&self) -> Vec3 {
        0.5 * (self.vertices[0] + self.vertices[2])
    }

    pub fn vertices(&self) -> &[Vec3; 4] {
        &self.vertices
    }

    pub fn uvs(&self) -> &[[f32; 2]; 4] {
        &self.uvs
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Square {
        Square::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::X,
            Vec3::Y,
            2.0,
            2.0,
            Material::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_square_corners_and_normal() {
        let square = unit_quad();
        assert_eq!(square.vertices()[2], Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(square.normal(), Vec3::Z);
        assert_eq!(square.center(), Vec3::ZERO);
    }

    #[test]
    fn test_square_edges_are_rescaled() {
        // Direction length is ignored, width/height set the edge length
        let square = Square::new(
            Vec3::ZERO,
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
            3.0,
            1.0,
            Material::default(),
        )
        .unwrap();
        assert_eq!(square.right_edge(), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(square.up_edge(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_square_rejects_parallel_edges() {
        let result = Square::new(Vec3::ZERO, Vec3::X, Vec3::X, 1.0, 1.0, Material::default());
        assert!(matches!(result, Err(SceneError::InvalidGeometry(_))));
    }

    #[test]
    fn test_square_transform_rebases_normal() {
        // Back wall of a box, turned to face +x
        let square = unit_quad()
            .scaled(Vec3::new(2.0, 2.0, 1.0))
            .unwrap()
            .translated(Vec3::new(0.0, 0.0, -2.0))
            .unwrap()
            .rotated_y(90.0)
            .unwrap();

        assert!((square.normal() - Vec3::X).length() < 1e-5);
        assert!((square.center() - Vec3::new(-2.0, 0.0, 0.0)).length() < 1e-5);
        assert!((square.right_edge().length() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_square_uv_range() {
        let square = unit_quad().with_uv_range(0.0, 2.0, 0.5, 1.0);
        assert_eq!(square.uvs()[2], [2.0, 1.0]);
        assert_eq!(square.uvs()[0], [0.0, 0.5]);
    }
}
