//! Error types for shapekit operations.

use thiserror::Error;

/// Errors reported by the opt-in checks and the bounds pool.
///
/// Shape mutators themselves never fail; degenerate input propagates into
/// the derived fields as `NaN`, infinity or zero.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// A semi-axis is zero or negative.
    #[error("degenerate shape: semi-axes ({half_width}, {half_height}) must be positive")]
    DegenerateShape {
        /// Half of the full width.
        half_width: f64,
        /// Half of the full height.
        half_height: f64,
    },

    /// The center or a radius is `NaN` or infinite.
    #[error("non-finite shape parameter: {0}")]
    NonFinite(&'static str),

    /// The pool free list already holds `capacity` instances.
    #[error("bounds pool is full (capacity {capacity})")]
    PoolFull {
        /// Configured free-list capacity.
        capacity: usize,
    },
}
