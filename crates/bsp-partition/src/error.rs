//! Error types for geometric operations.

use crate::Real;

/// Errors raised by scalar math and geometric constructions.
///
/// Numeric domain errors signal malformed geometry upstream (a degenerate
/// polygon, a line parallel to a plane) and are propagated to the caller
/// rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("division by a near-zero value")]
    DivisionByZero,

    #[error("square root of negative value {0}")]
    NegativeSqrt(Real),

    #[error("inverse trigonometric input {0} outside [-1, 1]")]
    InverseTrigDomain(Real),

    #[error("logarithm of non-positive value {0}")]
    NonPositiveLog(Real),

    #[error("vector is too short to define a direction")]
    ZeroVector,

    #[error("line is parallel to the plane")]
    ParallelLine,

    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon vertices are collinear, no plane can be derived")]
    DegeneratePolygon,
}
