//! BSP (Binary Space Partitioning) tree over convex 3D polygons.
//!
//! Polygons are inserted one at a time; each lands at the node whose plane it
//! lies on, splitting where it straddles a partition. The finished tree
//! answers point-location ([`BspTree::visibility_order`]), ordered traversal
//! and segment collision ([`BspTree::detect_collision`]) queries.

pub mod bsp;
mod error;
mod plane;
mod polygon;
mod scalar;
mod segment;
mod split;
mod vector;

/// Floating type used for all coordinates.
pub type Real = f64;

pub use bsp::{BspNode, BspTree, BspVisitor, CollectingVisitor, FnVisitor, Hit, NodeId};
pub use error::GeometryError;
pub use plane::{Plane, PlaneSide};
pub use polygon::{Polygon, Relation};
pub use scalar::{Scalar, Sign, EPSILON};
pub use segment::LineSegment;
pub use split::Split;
pub use vector::{points_coincide, Point, Vector, VectorExt};
