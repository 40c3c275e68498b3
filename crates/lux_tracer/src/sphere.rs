//! Ray-sphere intersection.

use crate::hit::{Intersect, SphereHit};
use lux_core::Sphere;
use lux_math::Ray;

impl Intersect for Sphere {
    type Hit = SphereHit;

    /// Solves `a t² + b t + c = 0` for the ray against the sphere surface.
    ///
    /// A zero or negative discriminant is a miss, so tangent rays do not hit.
    /// Negative roots are discarded; the smaller remaining root is the hit.
    fn intersect(&self, ray: &Ray) -> Option<SphereHit> {
        let origin = ray.origin();
        let direction = ray.direction();
        let oc = origin - self.center();

        let a = direction.dot(direction);
        let b = 2.0 * direction.dot(oc);
        let c = oc.dot(oc) - self.radius() * self.radius();

        let discriminant = b * b - 4.0 * a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let behind = |t: f32| if t < 0.0 { f32::INFINITY } else { t };
        let mut near = behind((-b - sqrtd) / (2.0 * a));
        let mut far = behind((-b + sqrtd) / (2.0 * a));
        if near > far {
            std::mem::swap(&mut near, &mut far);
        }

        if near == f32::INFINITY {
            return None;
        }

        let point = ray.at(near);
        let exit_point = if far.is_finite() { ray.at(far) } else { point };

        Some(SphereHit {
            t: near,
            point,
            normal: (point - self.center()) / self.radius(),
            exit_point,
        })
    }
}
