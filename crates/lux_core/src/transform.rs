//! Placement transforms applied to primitives before a scene is traced.

use lux_math::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A single placement step. Rotations are in degrees about the world origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOp {
    Translate(Vec3),
    Scale(Vec3),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
}

impl TransformOp {
    /// Convert to a 4x4 transformation matrix.
    pub fn to_matrix(&self) -> Mat4 {
        match *self {
            TransformOp::Translate(offset) => Mat4::from_translation(offset),
            TransformOp::Scale(factors) => Mat4::from_scale(factors),
            TransformOp::RotateX(degrees) => Mat4::from_rotation_x(degrees.to_radians()),
            TransformOp::RotateY(degrees) => Mat4::from_rotation_y(degrees.to_radians()),
            TransformOp::RotateZ(degrees) => Mat4::from_rotation_z(degrees.to_radians()),
        }
    }
}

/// Matrix that carries surface normals through `matrix` (inverse transpose).
pub(crate) fn normal_matrix(matrix: &Mat4) -> Mat3 {
    Mat3::from_mat4(*matrix).inverse().transpose()
}
