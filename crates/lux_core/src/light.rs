//! Point lights for Phong shading.

use lux_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

/// Emitter shape. Only spherical lights are shaded, as points at their position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    #[default]
    Spherical,
    Quad,
}

/// A light source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec3,

    /// Emission color
    pub color: Color,

    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    pub specular_intensity: f32,

    pub kind: LightKind,

    /// Emitter radius (carried for area sampling, unused by point shading)
    pub radius: f32,

    /// Power correction factor (carried, unused by point shading)
    pub power_correction: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Color::ONE,
            ambient_intensity: 1.0,
            diffuse_intensity: 1.0,
            specular_intensity: 1.0,
            kind: LightKind::Spherical,
            radius: 0.0,
            power_correction: 1.0,
        }
    }
}

impl Light {
    /// Create a spherical light at full intensity.
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position,
            color,
            ..Default::default()
        }
    }

    /// Set the ambient, diffuse and specular intensities.
    pub fn with_intensities(mut self, ambient: f32, diffuse: f32, specular: f32) -> Self {
        self.ambient_intensity = ambient;
        self.diffuse_intensity = diffuse;
        self.specular_intensity = specular;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}
