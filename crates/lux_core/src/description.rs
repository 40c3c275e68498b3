//! JSON scene descriptions.
//!
//! A description lists lights and primitives; primitives that omit material
//! fields fall back to [`SceneConfig::material_defaults`].
//!
//! ```json
//! {
//!   "name": "single_square",
//!   "lights": [{ "position": [-5.0, 5.0, 5.0], "radius": 2.5 }],
//!   "squares": [{
//!     "bottom_left": [-1.0, -1.0, 0.0], "right": [1.0, 0.0, 0.0], "up": [0.0, 1.0, 0.0],
//!     "width": 2.0, "height": 2.0,
//!     "transform": [{ "translate": [0.0, 0.0, -2.0] }],
//!     "material": { "color": [0.8, 0.8, 0.8] }
//!   }]
//! }
//! ```

use lux_math::{Color, Vec3};
use serde::Deserialize;

use crate::transform::TransformOp;
use crate::{
    Light, Material, MaterialDefaults, MaterialKind, Mesh, Scene, SceneConfig, SceneResult,
    Sphere, Square,
};

/// Material fields of a description. Unset coefficients use the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDescription {
    #[serde(default = "default_color")]
    pub color: Color,
    pub ambient: Option<Vec3>,
    pub diffuse: Option<Vec3>,
    pub specular: Option<Vec3>,
    pub shininess: Option<f32>,
    #[serde(default)]
    pub kind: MaterialKind,
    #[serde(default)]
    pub transparency: f32,
    #[serde(default = "default_index_medium")]
    pub index_medium: f32,
}

fn default_color() -> Color {
    Color::splat(0.5)
}

fn default_index_medium() -> f32 {
    1.0
}

fn default_extent() -> f32 {
    1.0
}

impl MaterialDescription {
    /// Resolve against the scene defaults.
    pub fn to_material(&self, defaults: &MaterialDefaults) -> Material {
        Material::new(self.color, defaults)
            .with_coefficients(
                self.ambient.unwrap_or(defaults.ambient),
                self.diffuse.unwrap_or(defaults.diffuse),
                self.specular.unwrap_or(defaults.specular),
            )
            .with_shininess(self.shininess.unwrap_or(defaults.shininess))
            .with_kind(self.kind)
            .with_transparency(self.transparency)
            .with_index_medium(self.index_medium)
    }
}

fn resolve_material(description: &Option<MaterialDescription>, defaults: &MaterialDefaults) -> Material {
    match description {
        Some(description) => description.to_material(defaults),
        None => Material::new(default_color(), defaults),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    pub material: Option<MaterialDescription>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SquareDescription {
    pub bottom_left: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    #[serde(default = "default_extent")]
    pub width: f32,
    #[serde(default = "default_extent")]
    pub height: f32,
    /// Placement steps, applied in order
    #[serde(default)]
    pub transform: Vec<TransformOp>,
    pub material: Option<MaterialDescription>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshDescription {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub normals: Option<Vec<Vec3>>,
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Generate smooth normals when none are given
    #[serde(default)]
    pub smooth: bool,
    #[serde(default)]
    pub transform: Vec<TransformOp>,
    pub material: Option<MaterialDescription>,
}

/// A whole scene as read from JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneDescription {
    pub name: String,
    pub lights: Vec<Light>,
    pub meshes: Vec<MeshDescription>,
    pub spheres: Vec<SphereDescription>,
    pub squares: Vec<SquareDescription>,
}

impl SceneDescription {
    /// Parse a description from a JSON string.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the scene, validating every primitive.
    pub fn build(&self, config: &SceneConfig) -> SceneResult<Scene> {
        let defaults = &config.material_defaults;
        let mut scene = Scene::new(self.name.clone());

        for description in &self.meshes {
            let mut mesh = Mesh::new_with_uvs(
                description.positions.clone(),
                description.indices.clone(),
                description.normals.clone(),
                description.uvs.clone(),
                resolve_material(&description.material, defaults),
            )?;
            if description.smooth && !mesh.has_normals() {
                mesh.compute_normals();
            }
            let mesh = description
                .transform
                .iter()
                .fold(mesh, |mesh, op| mesh.transformed(*op));
            scene.add_mesh(mesh);
        }

        for description in &self.spheres {
            scene.add_sphere(Sphere::new(
                description.center,
                description.radius,
                resolve_material(&description.material, defaults),
            )?);
        }

        for description in &self.squares {
            let mut square = Square::new(
                description.bottom_left,
                description.right,
                description.up,
                description.width,
                description.height,
                resolve_material(&description.material, defaults),
            )?;
            for op in &description.transform {
                square = square.transformed(*op)?;
            }
            scene.add_square(square);
        }

        for light in &self.lights {
            scene.add_light(light.clone());
        }

        log::info!(
            "Built scene '{}': {} meshes ({} triangles), {} spheres, {} squares, {} lights",
            scene.name,
            scene.meshes().len(),
            scene.total_triangle_count(),
            scene.spheres().len(),
            scene.squares().len(),
            scene.lights().len()
        );

        Ok(scene)
    }
}

impl Scene {
    /// Parse a JSON description and build it in one step.
    pub fn from_json_str(json: &str, config: &SceneConfig) -> SceneResult<Scene> {
        SceneDescription::from_json_str(json)?.build(config)
    }
}
