//! Sphere primitive.

use lux_math::Vec3;

use crate::{Material, SceneError, SceneResult};

/// A sphere with a single material.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be finite and positive.
    pub fn new(center: Vec3, radius: f32, material: Material) -> SceneResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidGeometry(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        if !center.is_finite() {
            return Err(SceneError::InvalidGeometry(format!(
                "sphere center is not finite: {center}"
            )));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}
