//! Lux Tracer - recursive Phong ray tracing over a `lux_core::Scene`.
//!
//! Traces single rays: nearest-hit search across meshes, spheres and
//! squares, Phong shading with hard shadows, then mirror and glass
//! recursion bounded by a bounce budget.
//!
//! # Example
//!
//! ```
//! use lux_core::{Light, Material, MaterialDefaults, Scene, Sphere};
//! use lux_tracer::{render_ray, Color, Ray, TraceConfig, Vec3};
//!
//! let mut scene = Scene::new("single_sphere");
//! scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Color::ONE));
//! scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, Material::new(Color::X, &MaterialDefaults::default()))?);
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
//! let color = render_ray(&scene, &ray, &TraceConfig::default())?;
//! assert!(color.x > 0.0);
//! assert_eq!(color.y, 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod batch;
mod error;
mod hit;
mod mesh;
mod scene_hit;
mod shading;
mod sphere;
mod square;

pub use batch::{trace_grid, trace_rays, ColorGrid};
pub use error::{TraceError, TraceResult};
pub use hit::{
    Intersect, MeshHit, PrimitiveKind, SphereHit, SquareHit, SurfaceHit, MAX_DISTANCE, SURFACE_EPSILON,
};
pub use scene_hit::{HitDetail, SceneHit};
pub use shading::{is_occluded, render_ray, shade_hit, trace, TraceConfig};

/// Re-export common math types from lux_math
pub use lux_math::{Color, Interval, Ray, Vec3};
