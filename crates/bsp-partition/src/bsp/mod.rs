//! Binary Space Partitioning tree for 3D polygon management.
//!
//! This module provides a BSP tree that recursively partitions 3D space using
//! planes taken from the polygons inserted into it. The tree enables:
//!
//! - Incremental insertion, splitting polygons that straddle a partition
//! - Point location (which cell of the partition holds a point)
//! - Front-to-back and back-to-front traversal relative to a viewpoint
//! - Segment collision queries against the stored polygons
//!
//! # Example
//!
//! ```
//! use bsp_partition::{BspTree, CollectingVisitor, LineSegment, Point, Polygon};
//!
//! let floor = Polygon::triangle(
//!     Point::new(0.0, 0.0, 0.0),
//!     Point::new(4.0, 0.0, 0.0),
//!     Point::new(0.0, 4.0, 0.0),
//! )?;
//! let ceiling = Polygon::triangle(
//!     Point::new(0.0, 0.0, 3.0),
//!     Point::new(4.0, 0.0, 3.0),
//!     Point::new(0.0, 4.0, 3.0),
//! )?;
//!
//! let mut tree = BspTree::new();
//! tree.insert(floor.clone())?;
//! tree.insert(ceiling)?;
//!
//! // A segment dropping through the floor hits it
//! let drop = LineSegment::new(Point::new(1.0, 1.0, 1.0), Point::new(1.0, 1.0, -1.0));
//! assert_eq!(tree.detect_collision(&drop), Some(&floor));
//!
//! // Traverse front-to-back from a viewer above everything
//! let mut visitor = CollectingVisitor::new();
//! tree.traverse_front_to_back(Point::new(1.0, 1.0, 10.0), &mut visitor);
//! assert_eq!(visitor.polygons().len(), 2);
//! # Ok::<(), bsp_partition::GeometryError>(())
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: Arena owning every node, plus insertion and queries
//! - [`BspNode`]: A partition plane, its coincident polygons and links to
//!   children and parent by [`NodeId`]
//! - [`BspVisitor`]: Visitor trait for custom traversal behavior

mod node;
mod query;
mod tree;
mod visitor;

// Re-export main types
pub use node::{BspNode, NodeId};
pub use query::Hit;
pub use tree::BspTree;
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor};
