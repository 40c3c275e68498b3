//! Tracing errors.

use thiserror::Error;

use crate::hit::PrimitiveKind;

/// Internal invariant violations during tracing.
///
/// Misses and degenerate geometry are not errors; they resolve to `None`
/// hits and the background color.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// A hit names a primitive the scene does not contain, e.g. a hit
    /// resolved against a different scene than the one being shaded.
    #[error("Hit refers to missing {kind:?} #{index}")]
    MissingPrimitive { kind: PrimitiveKind, index: usize },
}

/// Result type for tracing operations.
pub type TraceResult<T> = Result<T, TraceError>;
