//! Parallel tracing of many primary rays.
//!
//! Rays are independent, so batches are split across threads with rayon.
//! The scene is only read, never mutated, while a batch is in flight.

use crate::error::TraceResult;
use crate::shading::{render_ray, TraceConfig};
use lux_core::Scene;
use lux_math::{Color, Ray};
use rayon::prelude::*;

/// Trace every ray in `rays`; output order matches input order.
///
/// Fails with the first internal error any ray reports.
pub fn trace_rays(scene: &Scene, rays: &[Ray], config: &TraceConfig) -> TraceResult<Vec<Color>> {
    log::debug!(
        "Tracing {} rays against {} primitives ({} bounces)",
        rays.len(),
        scene.primitive_count(),
        config.max_bounces
    );

    rays.par_iter()
        .map(|ray| render_ray(scene, ray, config))
        .collect()
}

/// Row-major grid of traced colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGrid {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ColorGrid {
    /// Color at (x, y), or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Iterate over the `height` rows, top first. Rows are empty when the
    /// width is zero.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        let width = self.width as usize;
        (0..self.height as usize).map(move |y| {
            self.pixels
                .get(y * width..(y + 1) * width)
                .unwrap_or(&[])
        })
    }
}

/// Trace one primary ray per cell of a `width` x `height` grid.
///
/// `primary` maps a cell (x, y) to its ray. Rows are traced in parallel.
pub fn trace_grid<F>(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &TraceConfig,
    primary: F,
) -> TraceResult<ColorGrid>
where
    F: Fn(u32, u32) -> Ray + Sync,
{
    log::debug!("Tracing {width}x{height} grid");

    let rows = (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .map(|x| render_ray(scene, &primary(x, y), config))
                .collect::<TraceResult<Vec<_>>>()
        })
        .collect::<TraceResult<Vec<_>>>()?;

    Ok(ColorGrid {
        width,
        height,
        pixels: rows.into_iter().flatten().collect(),
    })
}
