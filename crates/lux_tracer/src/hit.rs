//! Intersection capability and per-kind hit records.

use lux_math::{Ray, Vec2, Vec3};

/// Minimum accepted distance for plane and triangle hits, and the offset
/// used to lift secondary rays off a surface.
pub const SURFACE_EPSILON: f32 = 1e-4;

/// Hits farther than this along the ray are treated as misses.
pub const MAX_DISTANCE: f32 = 1e5;

/// The closed set of primitive kinds.
///
/// Declaration order is the scan order of the scene aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Mesh,
    Sphere,
    Square,
}

/// Geometry shared by every hit record.
pub trait SurfaceHit {
    /// Ray parameter of the hit, in units of the ray direction's length.
    fn t(&self) -> f32;

    /// World-space hit point.
    fn point(&self) -> Vec3;

    /// Unit surface normal at the hit point.
    fn normal(&self) -> Vec3;
}

/// Trait for objects that can be hit by rays.
pub trait Intersect: Send + Sync {
    type Hit: SurfaceHit;

    /// Nearest intersection in front of the ray origin, if any.
    ///
    /// Degenerate configurations (tangent rays, parallel planes, zero-length
    /// directions) are reported as `None`, never as errors.
    fn intersect(&self, ray: &Ray) -> Option<Self::Hit>;
}

/// Ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereHit {
    pub t: f32,
    pub point: Vec3,
    /// Outward unit normal
    pub normal: Vec3,
    /// Where the ray leaves the sphere. Equals `point` when the ray starts inside.
    pub exit_point: Vec3,
}

/// Ray-square intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareHit {
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
    /// Texture coordinates, interpolated from the square's corner UVs
    /// (the [0, 1] edge fractions for the default range)
    pub u: f32,
    pub v: f32,
}

/// Ray-mesh intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
    /// Index of the triangle that was hit
    pub triangle: usize,
    /// Barycentric weights of the second and third corner
    pub barycentric: Vec2,
}

macro_rules! impl_surface_hit {
    ($($hit:ty),*) => {
        $(
            impl SurfaceHit for $hit {
                #[inline]
                fn t(&self) -> f32 {
                    self.t
                }

                #[inline]
                fn point(&self) -> Vec3 {
                    self.point
                }

                #[inline]
                fn normal(&self) -> Vec3 {
                    self.normal
                }
            }
        )*
    };
}

impl_surface_hit!(SphereHit, SquareHit, MeshHit);
