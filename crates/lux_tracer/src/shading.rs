//! Recursive Phong shading.
//!
//! Implements Whitted-style tracing with:
//! - Ambient, diffuse and specular terms per point light
//! - Hard shadows from occlusion probes
//! - Mirror reflection and glass refraction while bounces remain

use crate::error::{TraceError, TraceResult};
use crate::hit::{Intersect, SurfaceHit, SURFACE_EPSILON};
use crate::scene_hit::SceneHit;
use lux_core::{Material, MaterialKind, Scene};
use lux_math::{Color, Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Trace configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Bounce budget of a primary ray. 1 shades the first hit only.
    pub max_bounces: u32,
    /// Offset along the normal for rays leaving a surface
    pub shadow_bias: f32,
    /// Color returned on a miss or when the budget is exhausted
    pub background: Color,
    /// Weight of the reflected color on mirror surfaces
    pub mirror_reflectance: f32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_bounces: 1,
            shadow_bias: SURFACE_EPSILON,
            background: Color::ZERO,
            mirror_reflectance: 0.8,
        }
    }
}

/// Test whether anything blocks the segment from `origin` to `origin + to_light`.
///
/// Only hits strictly closer than `|to_light|` occlude, so surfaces behind
/// the light do not cast shadows.
pub fn is_occluded(scene: &Scene, origin: Vec3, to_light: Vec3) -> bool {
    let probe = Ray::new(origin, to_light);
    match scene.intersect(&probe) {
        Some(hit) => hit.point().distance(origin) < to_light.length(),
        None => false,
    }
}

/// Per-light sums before they are combined with the surface color.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LightingTerms {
    ambient: Color,
    diffuse: Color,
    specular: Color,
    /// Lights not blocked by any primitive
    lit_lights: usize,
}

impl LightingTerms {
    fn combine(&self, surface_color: Color) -> Color {
        let direct = if self.lit_lights == 0 {
            Color::ZERO
        } else {
            self.diffuse + self.specular
        };
        clamp_color(surface_color * (self.ambient + direct))
    }
}

fn gather_lighting(
    scene: &Scene,
    ray: &Ray,
    point: Vec3,
    normal: Vec3,
    material: &Material,
    config: &TraceConfig,
) -> LightingTerms {
    let lights = scene.lights();
    let view = -ray.direction().normalize_or_zero();
    let probe_origin = point + config.shadow_bias * normal;

    let mut terms = LightingTerms {
        ambient: Color::ZERO,
        diffuse: Color::ZERO,
        specular: Color::ZERO,
        lit_lights: lights.len(),
    };

    for light in lights {
        terms.ambient += light.ambient_intensity * material.ambient;

        if is_occluded(scene, probe_origin, light.position - point) {
            terms.lit_lights -= 1;
            continue;
        }

        let to_light = (light.position - point).normalize_or_zero();
        let incidence = to_light.dot(normal);
        // Light from behind the surface adds neither diffuse nor highlight
        if incidence <= 0.0 {
            continue;
        }
        terms.diffuse += light.diffuse_intensity * material.diffuse * incidence * light.color;

        let reflected = 2.0 * incidence * normal - to_light;
        let highlight = reflected.dot(view).max(0.0).powf(material.shininess);
        terms.specular += light.specular_intensity * material.specular * highlight * light.color;
    }

    terms
}

fn lookup_material<'a>(scene: &'a Scene, hit: &SceneHit) -> TraceResult<&'a Material> {
    let material = hit.material(scene);
    debug_assert!(
        material.is_some(),
        "Hit refers to missing {:?} #{}",
        hit.kind(),
        hit.index
    );

    material.ok_or_else(|| {
        let error = TraceError::MissingPrimitive {
            kind: hit.kind(),
            index: hit.index,
        };
        log::error!("{error}");
        error
    })
}

/// Local Phong shading of a resolved hit, with shadow probes to every light.
///
/// Ambient light is always added. Diffuse and specular light is added only
/// for lights that reach the point from in front of the surface; with no
/// light reaching it the result is `color * ambient`.
pub fn shade_hit(scene: &Scene, ray: &Ray, hit: &SceneHit, config: &TraceConfig) -> TraceResult<Color> {
    let material = lookup_material(scene, hit)?;
    let terms = gather_lighting(scene, ray, hit.point(), hit.normal(), material, config);
    Ok(terms.combine(material.color))
}

/// Color seen along `ray` with `remaining_bounces` levels of recursion.
///
/// A budget of zero returns the background without touching the scene.
/// Each secondary ray is traced with a budget one lower than its parent.
pub fn trace(scene: &Scene, ray: &Ray, remaining_bounces: u32, config: &TraceConfig) -> TraceResult<Color> {
    if remaining_bounces == 0 {
        return Ok(config.background);
    }

    let Some(hit) = scene.intersect(ray) else {
        return Ok(config.background);
    };

    let local = shade_hit(scene, ray, &hit, config)?;
    let material = lookup_material(scene, &hit)?;

    if remaining_bounces == 1 {
        return Ok(local);
    }

    let color = match material.kind {
        MaterialKind::Diffuse => local,
        MaterialKind::Mirror => {
            let bounce = reflected_ray(ray, &hit, config.shadow_bias);
            let reflected = trace(scene, &bounce, remaining_bounces - 1, config)?;
            local.lerp(reflected, config.mirror_reflectance)
        }
        MaterialKind::Glass => {
            let bounce = refracted_ray(ray, &hit, material.index_medium, config.shadow_bias)
                .unwrap_or_else(|| reflected_ray(ray, &hit, config.shadow_bias));
            let transmitted = trace(scene, &bounce, remaining_bounces - 1, config)?;
            local.lerp(transmitted, material.transparency)
        }
    };

    Ok(clamp_color(color))
}

/// Trace a primary ray with the configured bounce budget.
pub fn render_ray(scene: &Scene, ray: &Ray, config: &TraceConfig) -> TraceResult<Color> {
    trace(scene, ray, config.max_bounces, config)
}

// =============================================================================
// Helper functions
// =============================================================================

/// Clamp each channel to [0, 1].
#[inline]
fn clamp_color(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with outward normal `n`.
///
/// The side is taken from the sign of `v · n`: entering goes from air into
/// the medium, leaving goes back out. Returns `None` on total internal
/// reflection or a non-positive index.
fn refract(v: Vec3, n: Vec3, index_medium: f32) -> Option<Vec3> {
    if index_medium <= 0.0 {
        return None;
    }

    let mut cos_i = v.dot(n).clamp(-1.0, 1.0);
    let (mut eta_i, mut eta_t) = (1.0, index_medium);
    let mut n = n;

    if cos_i > 0.0 {
        std::mem::swap(&mut eta_i, &mut eta_t);
        n = -n;
    } else {
        cos_i = -cos_i;
    }

    let eta = eta_i / eta_t;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    (k >= 0.0).then(|| v * eta + n * (eta * cos_i - k.sqrt()))
}

/// Lift `point` off the surface on the side `direction` leaves through.
#[inline]
fn offset_origin(point: Vec3, normal: Vec3, direction: Vec3, bias: f32) -> Vec3 {
    if direction.dot(normal) < 0.0 {
        point - bias * normal
    } else {
        point + bias * normal
    }
}

fn reflected_ray(ray: &Ray, hit: &SceneHit, bias: f32) -> Ray {
    let direction = reflect(ray.direction().normalize_or_zero(), hit.normal());
    Ray::new(offset_origin(hit.point(), hit.normal(), direction, bias), direction)
}

fn refracted_ray(ray: &Ray, hit: &SceneHit, index_medium: f32, bias: f32) -> Option<Ray> {
    let direction = refract(ray.direction().normalize_or_zero(), hit.normal(), index_medium)?;
    Some(Ray::new(offset_origin(hit.point(), hit.normal(), direction, bias), direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::{PrimitiveKind, SphereHit};
    use crate::scene_hit::HitDetail;
    use lux_core::{Light, MaterialDefaults, Sphere, Square};

    const GREY: Color = Color::splat(0.5);

    fn material(color: Color) -> Material {
        Material::new(color, &MaterialDefaults::default())
    }

    /// Quad spanning (-1,-1,0)..(1,1,0), facing +Z.
    fn floor(material: Material) -> Square {
        Square::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::X, Vec3::Y, 2.0, 2.0, material).unwrap()
    }

    /// Grey floor, one white light straight above the origin.
    fn lit_floor() -> Scene {
        let mut scene = Scene::new("lit_floor");
        scene.add_square(floor(material(GREY)));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 4.0), Color::ONE));
        scene
    }

    /// Oblique view of the origin that passes clear of (0, 0, 2).
    fn oblique_ray() -> Ray {
        Ray::new(Vec3::new(2.0, 0.0, 2.0), Vec3::new(-1.0, 0.0, -1.0))
    }

    fn add_occluder(scene: &mut Scene) {
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 2.0), 0.5, material(Color::ONE)).unwrap());
    }

    fn assert_color_eq(actual: Color, expected: Color) {
        assert!(
            (actual - expected).abs().max_element() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_zero_budget_returns_background() {
        let config = TraceConfig {
            background: Color::new(0.2, 0.3, 0.4),
            ..Default::default()
        };
        let color = trace(&lit_floor(), &oblique_ray(), 0, &config).unwrap();
        assert_eq!(color, config.background);
    }

    #[test]
    fn test_miss_returns_background() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let color = render_ray(&lit_floor(), &ray, &TraceConfig::default()).unwrap();
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_config_from_json() {
        let config: TraceConfig = serde_json::from_str(r#"{ "max_bounces": 3, "background": [0.1, 0.2, 0.3] }"#).unwrap();
        assert_eq!(config.max_bounces, 3);
        assert_eq!(config.background, Color::new(0.1, 0.2, 0.3));
        assert_eq!(config.shadow_bias, SURFACE_EPSILON);
        assert_eq!(config.mirror_reflectance, 0.8);
    }

    #[test]
    fn test_is_occluded() {
        let mut scene = Scene::new("probe");
        add_occluder(&mut scene);

        // Sphere between origin and light
        assert!(is_occluded(&scene, Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0)));
        // Light in front of the sphere
        assert!(!is_occluded(&scene, Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)));
        // Probe pointing away
        assert!(!is_occluded(&scene, Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0)));
    }

    #[test]
    fn test_shading_formula_for_visible_light() {
        let color = render_ray(&lit_floor(), &oblique_ray(), &TraceConfig::default()).unwrap();

        // L = N, so R = N; R·V = cos 45°
        let highlight = 0.5f32.sqrt().powf(20.0);
        let expected = GREY * (0.1 + 0.7 + 0.5 * highlight);
        assert_color_eq(color, expected);
    }

    #[test]
    fn test_occluded_light_leaves_only_ambient() {
        let mut scene = lit_floor();
        add_occluder(&mut scene);
        let config = TraceConfig::default();

        let shadowed = render_ray(&scene, &oblique_ray(), &config).unwrap();
        assert_color_eq(shadowed, GREY * 0.1);
        assert!(shadowed.min_element() > 0.0);

        let lit = render_ray(&lit_floor(), &oblique_ray(), &config).unwrap();
        assert!(lit.x > shadowed.x);
    }

    #[test]
    fn test_partially_occluded_lights() {
        let mut scene = lit_floor();
        add_occluder(&mut scene);
        // Second light off to the side, unblocked
        scene.add_light(Light::new(Vec3::new(0.0, 4.0, 4.0), Color::ONE));

        let terms = gather_lighting(
            &scene,
            &oblique_ray(),
            Vec3::ZERO,
            Vec3::Z,
            &material(GREY),
            &TraceConfig::default(),
        );

        assert_eq!(terms.lit_lights, 1);
        assert_color_eq(terms.ambient, Color::splat(0.2));
        // Only the side light at 45° contributes diffuse
        assert_color_eq(terms.diffuse, Color::splat(0.7 * 0.5f32.sqrt()));
    }

    #[test]
    fn test_light_behind_surface_is_clamped() {
        let mut scene = Scene::new("backlit");
        scene.add_square(floor(material(GREY)));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, -4.0), Color::ONE));

        let terms = gather_lighting(
            &scene,
            &oblique_ray(),
            Vec3::ZERO,
            Vec3::Z,
            &material(GREY),
            &TraceConfig::default(),
        );
        // One-sided quad does not block light from behind
        assert_eq!(terms.lit_lights, 1);
        assert_eq!(terms.diffuse, Color::ZERO);
        assert_eq!(terms.specular, Color::ZERO);

        let color = render_ray(&scene, &oblique_ray(), &TraceConfig::default()).unwrap();
        assert_color_eq(color, GREY * 0.1);
    }

    #[test]
    fn test_grazing_view_of_backlit_surface_has_no_highlight() {
        // Light just below the floor plane, viewer low on the other side.
        // R·V is positive here, so only the incidence gate removes the highlight.
        let mut scene = Scene::new("grazing");
        scene.add_square(floor(material(GREY)));
        scene.add_light(Light::new(Vec3::new(-8.0, 0.0, -1.5), Color::ONE));

        let view = Ray::new(Vec3::new(3.0, 0.0, 1.0), Vec3::new(-3.0, 0.0, -1.0));
        let terms = gather_lighting(&scene, &view, Vec3::ZERO, Vec3::Z, &material(GREY), &TraceConfig::default());

        assert_eq!(terms.lit_lights, 1);
        assert_eq!(terms.diffuse, Color::ZERO);
        assert_eq!(terms.specular, Color::ZERO);

        let color = render_ray(&scene, &view, &TraceConfig::default()).unwrap();
        assert_color_eq(color, GREY * 0.1);
    }

    #[test]
    fn test_all_lights_occluded_leaves_ambient_sum() {
        let mut scene = lit_floor();
        scene.add_light(Light::new(Vec3::new(0.2, 0.0, 4.0), Color::ONE));
        add_occluder(&mut scene);

        let terms = gather_lighting(
            &scene,
            &oblique_ray(),
            Vec3::ZERO,
            Vec3::Z,
            &material(GREY),
            &TraceConfig::default(),
        );
        assert_eq!(terms.lit_lights, 0);
        assert_color_eq(terms.ambient, Color::splat(0.2));

        // Surface color times the ambient of both lights, nothing more
        let color = render_ray(&scene, &oblique_ray(), &TraceConfig::default()).unwrap();
        assert_color_eq(color, GREY * 0.2);
    }

    #[test]
    fn test_trace_shades_like_shade_hit() {
        let mut scene = lit_floor();
        scene.add_light(Light::new(Vec3::new(0.0, 4.0, 4.0), Color::new(0.5, 0.8, 1.0)));
        add_occluder(&mut scene);
        let config = TraceConfig::default();

        let hit = scene.intersect(&oblique_ray()).unwrap();
        let shaded = shade_hit(&scene, &oblique_ray(), &hit, &config).unwrap();
        assert_eq!(trace(&scene, &oblique_ray(), 1, &config).unwrap(), shaded);
    }

    #[test]
    fn test_channels_are_clamped() {
        let mut bright = material(Color::ONE);
        bright.ambient = Color::ONE;

        let mut scene = Scene::new("bright");
        scene.add_square(floor(bright));
        for z in [4.0, 3.0, 2.5] {
            scene.add_light(Light::new(Vec3::new(0.0, 0.0, z), Color::ONE));
        }

        let color = render_ray(&scene, &oblique_ray(), &TraceConfig::default()).unwrap();
        assert_eq!(color, Color::ONE);
    }

    #[test]
    fn test_mirror_reflects_at_depth() {
        let mut scene = Scene::new("mirror");
        scene.add_square(floor(material(Color::ZERO).with_kind(MaterialKind::Mirror)));
        // Sits on the reflected path of the view ray
        scene.add_sphere(Sphere::new(Vec3::new(2.0, 0.0, 2.0), 0.5, material(Color::X)).unwrap());
        scene.add_light(Light::new(Vec3::new(0.0, 5.0, 5.0), Color::ONE));

        let view = Ray::new(Vec3::new(-2.0, 0.0, 2.0), Vec3::new(1.0, 0.0, -1.0));

        let shallow = TraceConfig::default();
        assert_eq!(render_ray(&scene, &view, &shallow).unwrap(), Color::ZERO);

        let deep = TraceConfig {
            max_bounces: 2,
            mirror_reflectance: 1.0,
            ..Default::default()
        };
        let color = render_ray(&scene, &view, &deep).unwrap();
        assert!(color.x > 0.0);
        assert_eq!(color.y, 0.0);
        assert_eq!(color.z, 0.0);
    }

    #[test]
    fn test_glass_transmits_what_is_behind() {
        let mut scene = Scene::new("glass");
        scene.add_sphere(
            Sphere::new(
                Vec3::ZERO,
                1.0,
                material(Color::ZERO)
                    .with_kind(MaterialKind::Glass)
                    .with_transparency(1.0)
                    .with_index_medium(1.0),
            )
            .unwrap(),
        );
        scene.add_square(
            Square::new(Vec3::new(-2.0, -2.0, -3.0), Vec3::X, Vec3::Y, 4.0, 4.0, material(Color::Y))
                .unwrap(),
        );
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Color::ONE));

        let config = TraceConfig {
            max_bounces: 3,
            ..Default::default()
        };
        let view = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        // Entry, exit, then the green wall, which the sphere shadows
        let color = render_ray(&scene, &view, &config).unwrap();
        assert_color_eq(color, Color::new(0.0, 0.1, 0.0));
    }

    #[test]
    fn test_refract() {
        // Matched index passes straight through
        let v = Vec3::new(1.0, -1.0, 0.0).normalize();
        let t = refract(v, Vec3::Y, 1.0).unwrap();
        assert!((t - v).length() < 1e-6);

        // Denser medium bends toward the normal
        let t = refract(v, Vec3::Y, 1.5).unwrap();
        assert!(t.x < v.x);

        // Grazing exit from a dense medium reflects totally
        let out = Vec3::new(1.0, 0.2, 0.0).normalize();
        assert!(refract(out, Vec3::Y, 1.5).is_none());

        assert!(refract(v, Vec3::Y, 0.0).is_none());
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "Hit refers to missing Sphere #3"))]
    fn test_foreign_hit_is_internal_error() {
        let hit = SceneHit {
            index: 3,
            detail: HitDetail::Sphere(SphereHit {
                t: 1.0,
                point: Vec3::ZERO,
                normal: Vec3::Z,
                exit_point: Vec3::ZERO,
            }),
        };

        let result = shade_hit(&lit_floor(), &oblique_ray(), &hit, &TraceConfig::default());
        assert_eq!(
            result,
            Err(TraceError::MissingPrimitive {
                kind: PrimitiveKind::Sphere,
                index: 3
            })
        );
    }
}
