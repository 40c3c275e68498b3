//! Phong surface materials and the scene-wide defaults they are built from.

use lux_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

/// How a surface continues a ray after local shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Local shading only
    #[default]
    Diffuse,
    /// Spawns a reflected ray when bounces remain
    Mirror,
    /// Spawns a refracted ray when bounces remain
    Glass,
}

/// Reflectance coefficients shared by every material that does not override them.
///
/// Passed explicitly into scene construction via [`crate::SceneConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDefaults {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for MaterialDefaults {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::splat(0.7),
            specular: Vec3::splat(0.5),
            shininess: 20.0,
        }
    }
}

/// A Phong material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Ambient reflectance coefficient (RGB)
    pub ambient: Vec3,

    /// Diffuse reflectance coefficient (RGB)
    pub diffuse: Vec3,

    /// Specular reflectance coefficient (RGB)
    pub specular: Vec3,

    /// Base surface color, multiplied into the lighting sum
    pub color: Color,

    /// Phong exponent
    pub shininess: f32,

    pub kind: MaterialKind,

    /// Blend weight of the refracted ray for glass (0=opaque, 1=clear)
    pub transparency: f32,

    /// Refractive index of the medium behind the surface (glass only)
    pub index_medium: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::splat(0.5), &MaterialDefaults::default())
    }
}

impl Material {
    /// Create a diffuse material of the given color using the scene defaults.
    pub fn new(color: Color, defaults: &MaterialDefaults) -> Self {
        Self {
            ambient: defaults.ambient,
            diffuse: defaults.diffuse,
            specular: defaults.specular,
            color,
            shininess: defaults.shininess,
            kind: MaterialKind::Diffuse,
            transparency: 0.0,
            index_medium: 1.0,
        }
    }

    pub fn with_kind(mut self, kind: MaterialKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Set the transparency, clamped to [0, 1].
    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency.clamp(0.0, 1.0);
        self
    }

    pub fn with_index_medium(mut self, index_medium: f32) -> Self {
        self.index_medium = index_medium;
        self
    }

    /// Override the three reflectance coefficients.
    pub fn with_coefficients(mut self, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self
    }
}
