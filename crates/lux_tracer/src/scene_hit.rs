//! Nearest-hit query over a whole scene.

use crate::hit::{Intersect, MeshHit, PrimitiveKind, SphereHit, SquareHit, SurfaceHit};
use lux_core::{Material, Scene};
use lux_math::{Ray, Vec3};

/// Kind-specific detail of a scene hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitDetail {
    Mesh(MeshHit),
    Sphere(SphereHit),
    Square(SquareHit),
}

impl HitDetail {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            HitDetail::Mesh(_) => PrimitiveKind::Mesh,
            HitDetail::Sphere(_) => PrimitiveKind::Sphere,
            HitDetail::Square(_) => PrimitiveKind::Square,
        }
    }

    fn surface(&self) -> &dyn SurfaceHit {
        match self {
            HitDetail::Mesh(hit) => hit,
            HitDetail::Sphere(hit) => hit,
            HitDetail::Square(hit) => hit,
        }
    }
}

/// The nearest primitive along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    /// Index into the scene's collection for `kind()`
    pub index: usize,
    pub detail: HitDetail,
}

impl SceneHit {
    pub fn kind(&self) -> PrimitiveKind {
        self.detail.kind()
    }

    /// Material of the hit primitive, or `None` if `scene` has no such primitive.
    pub fn material<'a>(&self, scene: &'a Scene) -> Option<&'a Material> {
        match self.kind() {
            PrimitiveKind::Mesh => scene.meshes().get(self.index).map(|p| p.material()),
            PrimitiveKind::Sphere => scene.spheres().get(self.index).map(|p| p.material()),
            PrimitiveKind::Square => scene.squares().get(self.index).map(|p| p.material()),
        }
    }
}

impl SurfaceHit for SceneHit {
    fn t(&self) -> f32 {
        self.detail.surface().t()
    }

    fn point(&self) -> Vec3 {
        self.detail.surface().point()
    }

    fn normal(&self) -> Vec3 {
        self.detail.surface().normal()
    }
}

/// Replace `closest` only if `candidate` is strictly nearer.
fn keep_closest(closest: &mut Option<SceneHit>, index: usize, detail: HitDetail) {
    let nearer = match closest {
        Some(best) => detail.surface().t() < best.t(),
        None => true,
    };
    if nearer {
        *closest = Some(SceneHit { index, detail });
    }
}

impl Intersect for Scene {
    type Hit = SceneHit;

    /// Linear scan of meshes, then spheres, then squares, in insertion order.
    ///
    /// On exactly equal distances the primitive scanned first wins.
    fn intersect(&self, ray: &Ray) -> Option<SceneHit> {
        let mut closest = None;

        for (index, mesh) in self.meshes().iter().enumerate() {
            if let Some(hit) = mesh.intersect(ray) {
                keep_closest(&mut closest, index, HitDetail::Mesh(hit));
            }
        }

        for (index, sphere) in self.spheres().iter().enumerate() {
            if let Some(hit) = sphere.intersect(ray) {
                keep_closest(&mut closest, index, HitDetail::Sphere(hit));
            }
        }

        for (index, square) in self.squares().iter().enumerate() {
            if let Some(hit) = square.intersect(ray) {
                keep_closest(&mut closest, index, HitDetail::Square(hit));
            }
        }

        closest
    }
}
