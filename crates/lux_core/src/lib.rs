//! Lux Core - scene data model for the Lux ray tracer.
//!
//! This crate provides:
//!
//! - **Primitives**: `Sphere`, `Square`, `Mesh`, each owning a `Material`
//! - **Lighting**: `Light` records with per-term intensities
//! - **Scene**: the container handed read-only to the tracer
//! - **Descriptions**: building a `Scene` from JSON
//!
//! # Example
//!
//! ```
//! use lux_core::{Light, Material, MaterialDefaults, Scene, Sphere};
//! use lux_math::{Color, Vec3};
//!
//! let defaults = MaterialDefaults::default();
//! let mut scene = Scene::new("single_sphere");
//! scene.add_light(Light::new(Vec3::new(-5.0, 5.0, 5.0), Color::ONE));
//! scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, Material::new(Color::X, &defaults))?);
//! assert_eq!(scene.primitive_count(), 1);
//! # Ok::<(), lux_core::SceneError>(())
//! ```

pub mod description;
pub mod error;
pub mod light;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod sphere;
pub mod square;
pub mod transform;

// Re-export commonly used types
pub use description::SceneDescription;
pub use error::{SceneError, SceneResult};
pub use light::{Light, LightKind};
pub use material::{Material, MaterialDefaults, MaterialKind};
pub use mesh::Mesh;
pub use scene::{Scene, SceneConfig};
pub use sphere::Sphere;
pub use square::Square;
pub use transform::TransformOp;
