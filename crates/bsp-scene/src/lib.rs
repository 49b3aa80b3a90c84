//! Scene generation and structural checks for [`bsp_partition`] trees.
//!
//! - [`random`]: random convex polygons scattered in a box
//! - [`shapes`]: cubes and floors for hand-built scenes
//! - [`verify`]: read-only walk of a finished tree checking its invariants

use bsp_partition::Real;
use thiserror::Error;

pub mod random;
pub mod shapes;
pub mod verify;

pub use random::random_polygons;
pub use verify::{verify_tree, InvariantViolation};

/// Parameters for random scene generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Number of polygons to generate.
    pub polygons: usize,
    /// Lower bound of the cube `[min, max]^3` holding every anchor vertex.
    pub min: Real,
    /// Upper bound of that cube.
    pub max: Real,
    /// Each extra vertex is offset from the anchor by at most this much along
    /// both in-plane axes.
    pub extent: Real,
    /// Vertices added around the anchor; 2 gives triangles.
    pub extra_vertices: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            polygons: 200,
            min: 0.0,
            max: 500.0,
            extent: 2.0,
            extra_vertices: 2,
        }
    }
}

impl SceneConfig {
    /// Rejects settings the generators cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(ConfigError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        if !self.extent.is_finite() || self.extent <= 0.0 {
            return Err(ConfigError::InvalidExtent(self.extent));
        }
        if self.extra_vertices < 2 {
            return Err(ConfigError::TooFewVertices(self.extra_vertices));
        }
        Ok(())
    }
}

/// Invalid [`SceneConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("scene bounds [{min}, {max}] are empty or not finite")]
    InvalidBounds { min: Real, max: Real },

    #[error("edge extent must be positive and finite, got {0}")]
    InvalidExtent(Real),

    #[error("a polygon needs at least 2 extra vertices, got {0}")]
    TooFewVertices(usize),
}
