//! Ray-square intersection.

use crate::hit::{Intersect, SquareHit, MAX_DISTANCE, SURFACE_EPSILON};
use lux_core::Square;
use lux_math::{Interval, Ray};

impl Intersect for Square {
    type Hit = SquareHit;

    /// Plane test followed by a parallelogram bounds check.
    ///
    /// The quad is one-sided: rays travelling along its normal, or parallel
    /// to its plane, never hit it.
    fn intersect(&self, ray: &Ray) -> Option<SquareHit> {
        let normal = self.normal();
        let denominator = normal.dot(ray.direction());
        if denominator > -SURFACE_EPSILON {
            return None;
        }

        let t = (self.center() - ray.origin()).dot(normal) / denominator;
        if !Interval::new(SURFACE_EPSILON, MAX_DISTANCE).contains(t) {
            return None;
        }

        let point = ray.at(t);
        let ab = self.right_edge();
        let ac = self.up_edge();
        let am = point - self.bottom_left();

        let (along_ab, ab_sq) = (ab.dot(am), ab.dot(ab));
        let (along_ac, ac_sq) = (ac.dot(am), ac.dot(ac));
        if !Interval::new(0.0, ab_sq).contains(along_ab) || !Interval::new(0.0, ac_sq).contains(along_ac) {
            return None;
        }

        // Edge fractions, carried through the corner UVs
        let (s, r) = (along_ab / ab_sq, along_ac / ac_sq);
        let [uv0, uv1, _, uv3] = *self.uvs();
        let u = uv0[0] + s * (uv1[0] - uv0[0]) + r * (uv3[0] - uv0[0]);
        let v = uv0[1] + s * (uv1[1] - uv0[1]) + r * (uv3[1] - uv0[1]);

        Some(SquareHit { t, point, normal, u, v })
    }
}
