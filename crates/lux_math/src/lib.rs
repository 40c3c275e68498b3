// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// RGB color with linear channels, nominally in [0, 1].
pub type Color = Vec3;
