//! Ray-mesh intersection.
//!
//! Uses the Möller-Trumbore algorithm per triangle and keeps the closest hit.

use crate::hit::{Intersect, MeshHit, SURFACE_EPSILON};
use lux_core::Mesh;
use lux_math::{Interval, Ray, Vec2, Vec3};

/// Determinant below which a ray counts as parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Barycentric hit on a single triangle: (t, u, v).
fn intersect_triangle(ray: &Ray, [v0, v1, v2]: [Vec3; 3], ray_t: Interval) -> Option<(f32, f32, f32)> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    ray_t.contains(t).then_some((t, u, v))
}

impl Intersect for Mesh {
    type Hit = MeshHit;

    /// Closest triangle hit; the first triangle wins exact ties.
    ///
    /// Normals are interpolated from per-vertex normals when the mesh has
    /// them, otherwise the flat face normal is used. Triangles are two-sided.
    fn intersect(&self, ray: &Ray) -> Option<MeshHit> {
        let ray_t = Interval::new(SURFACE_EPSILON, f32::INFINITY);
        let mut closest: Option<(usize, f32, f32, f32)> = None;

        for triangle in 0..self.triangle_count() {
            if let Some((t, u, v)) = intersect_triangle(ray, self.triangle(triangle), ray_t) {
                if closest.map_or(true, |(_, best, _, _)| t < best) {
                    closest = Some((triangle, t, u, v));
                }
            }
        }

        let (triangle, t, u, v) = closest?;
        Some(MeshHit {
            t,
            point: ray.at(t),
            normal: shading_normal(self, triangle, u, v),
            triangle,
            barycentric: Vec2::new(u, v),
        })
    }
}

fn shading_normal(mesh: &Mesh, triangle: usize, u: f32, v: f32) -> Vec3 {
    let [v0, v1, v2] = mesh.triangle(triangle);
    let face_normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();

    match mesh.normals() {
        Some(normals) => {
            let [i0, i1, i2] = mesh.triangle_indices(triangle);
            let w = 1.0 - u - v;
            (w * normals[i0] + u * normals[i1] + v * normals[i2])
                .try_normalize()
                .unwrap_or(face_normal)
        }
        None => face_normal,
    }
}
