//! ASCII preview of a Lux scene.
//!
//! Traces one ray per character cell through a pinhole at the origin and
//! prints the luminance as ASCII shades.
//!
//! ```text
//! cargo run -p lux_tracer --example ascii_preview [scene.json]
//! ```

use anyhow::{Context, Result};
use lux_core::{Scene, SceneConfig};
use lux_tracer::{trace_grid, Color, Ray, TraceConfig, Vec3};

const WIDTH: u32 = 72;
const HEIGHT: u32 = 36;
const SHADES: &[u8] = b" .:-=+*#%@";

/// Three walls, a mirror ball and a glass ball.
const DEFAULT_SCENE: &str = r#"{
    "name": "ascii_box",
    "lights": [{ "position": [0.0, 1.8, -1.0] }],
    "squares": [
        { "bottom_left": [-2.0, -2.0, -4.0], "right": [1.0, 0.0, 0.0], "up": [0.0, 1.0, 0.0],
          "width": 4.0, "height": 4.0, "material": { "color": [0.8, 0.8, 0.8] } },
        { "bottom_left": [-2.0, -2.0, 0.0], "right": [1.0, 0.0, 0.0], "up": [0.0, 0.0, -1.0],
          "width": 4.0, "height": 4.0, "material": { "color": [0.9, 0.9, 0.9] } },
        { "bottom_left": [-2.0, -2.0, 0.0], "right": [0.0, 0.0, -1.0], "up": [0.0, 1.0, 0.0],
          "width": 4.0, "height": 4.0, "material": { "color": [0.9, 0.2, 0.2] } }
    ],
    "spheres": [
        { "center": [-0.8, -1.3, -2.5], "radius": 0.7,
          "material": { "color": [0.2, 0.2, 0.2], "kind": "mirror" } },
        { "center": [0.9, -1.4, -2.0], "radius": 0.6,
          "material": { "color": [0.1, 0.1, 0.1], "kind": "glass", "transparency": 0.9, "index_medium": 1.5 } }
    ]
}"#;

fn main() -> Result<()> {
    env_logger::init();

    let scene = load_scene()?;
    log::info!(
        "Scene '{}': {} primitives, {} lights",
        scene.name,
        scene.primitive_count(),
        scene.lights().len()
    );

    let config = TraceConfig {
        max_bounces: 4,
        ..Default::default()
    };

    let start = std::time::Instant::now();
    let grid = trace_grid(&scene, WIDTH, HEIGHT, &config, pinhole)?;
    log::info!("Traced {}x{} in {:?}", WIDTH, HEIGHT, start.elapsed());

    for row in grid.rows() {
        let line: String = row.iter().map(|&color| shade(color)).collect();
        println!("{line}");
    }

    Ok(())
}

fn load_scene() -> Result<Scene> {
    let config = SceneConfig::default();
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            Scene::from_json_str(&json, &config).with_context(|| format!("building scene from {path}"))
        }
        None => Ok(Scene::from_json_str(DEFAULT_SCENE, &config)?),
    }
}

/// Ray through cell (x, y) of a 60° pinhole looking down -Z.
/// Character cells are about twice as tall as wide.
fn pinhole(x: u32, y: u32) -> Ray {
    let half_height = (30.0f32).to_radians().tan();
    let half_width = half_height * WIDTH as f32 / (2.0 * HEIGHT as f32);

    let u = ((x as f32 + 0.5) / WIDTH as f32 * 2.0 - 1.0) * half_width;
    let v = (1.0 - (y as f32 + 0.5) / HEIGHT as f32 * 2.0) * half_height;
    Ray::new(Vec3::new(0.0, 0.0, 1.5), Vec3::new(u, v, -1.0).normalize())
}

fn shade(color: Color) -> char {
    let luminance = color.dot(Vec3::new(0.2126, 0.7152, 0.0722)).clamp(0.0, 1.0);
    let index = (luminance * (SHADES.len() - 1) as f32).round() as usize;
    SHADES[index] as char
}
