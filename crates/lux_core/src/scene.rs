//! Scene container for ray tracing.
//!
//! A scene is built once (mutably) and then shared read-only with any number
//! of tracing threads. Holding `&Scene` keeps it frozen: mutation needs
//! `&mut Scene`, which the borrow checker refuses while a trace is running.

use serde::{Deserialize, Serialize};

use crate::{Light, MaterialDefaults, Mesh, Sphere, Square};

/// Settings applied while constructing a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Coefficients for materials that do not specify their own
    pub material_defaults: MaterialDefaults,
}

/// All primitives and lights of one scene configuration.
///
/// Primitives are kept per kind, in insertion order. That order is part of
/// the intersection contract: on equal distances the earlier primitive wins.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    spheres: Vec<Sphere>,
    squares: Vec<Square>,
    lights: Vec<Light>,

    /// Scene name (usually from the description file)
    pub name: String,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a mesh and return its index among meshes.
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Add a sphere and return its index among spheres.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.spheres.push(sphere);
        self.spheres.len() - 1
    }

    /// Add a square and return its index among squares.
    pub fn add_square(&mut self, square: Square) -> usize {
        self.squares.push(square);
        self.squares.len() - 1
    }

    /// Add a light and return its index.
    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    /// Remove every primitive and light.
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.spheres.clear();
        self.squares.clear();
        self.lights.clear();
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Total number of primitives of every kind.
    pub fn primitive_count(&self) -> usize {
        self.meshes.len() + self.spheres.len() + self.squares.len()
    }

    /// Get total triangle count across all meshes.
    pub fn total_triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// True when there is nothing to hit.
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Material;
    use lux_math::{Color, Vec3};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_scene_is_shareable() {
        assert_send_sync::<Scene>();
    }

    #[test]
    fn test_scene_creation() {
        let mut scene = Scene::new("test");
        let defaults = MaterialDefaults::default();

        let sphere = Sphere::new(Vec3::ZERO, 1.0, Material::new(Color::X, &defaults)).unwrap();
        assert_eq!(scene.add_sphere(sphere.clone()), 0);
        assert_eq!(scene.add_sphere(sphere), 1);

        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![0, 1, 2],
            None,
            Material::default(),
        )
        .unwrap();
        assert_eq!(scene.add_mesh(mesh), 0);
        assert_eq!(scene.add_light(Light::new(Vec3::new(-5.0, 5.0, 5.0), Color::ONE)), 0);

        assert_eq!(scene.primitive_count(), 3);
        assert_eq!(scene.total_triangle_count(), 1);
        assert_eq!(scene.lights().len(), 1);
        assert!(!scene.is_empty());
    }

    #[test]
    fn test_scene_clear() {
        let mut scene = Scene::new("test");
        scene.add_light(Light::default());
        scene.add_mesh(Mesh::empty(Material::default()));
        scene.clear();

        assert!(scene.is_empty());
        assert!(scene.lights().is_empty());
        assert_eq!(scene.name, "test");
    }
}
