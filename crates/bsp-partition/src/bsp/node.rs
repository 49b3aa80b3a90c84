//! BSP tree node implementation.

use std::fmt;

use crate::{Plane, PlaneSide, Point, Polygon};

/// Index of a node inside its [`BspTree`](super::BspTree) arena.
///
/// Ids are stable for the lifetime of the tree; nodes are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the BSP tree.
///
/// Each node partitions space using a plane and stores the polygons that lie
/// on that plane. Polygons in front of or behind the plane live in the
/// respective child subtrees.
///
/// A node is only ever created for the polygon that first needs it, so its
/// partition is that polygon's plane and it always stores at least one
/// polygon. Children start out absent and are attached lazily.
#[derive(Debug, Clone)]
pub struct BspNode {
    /// The partition plane for this node.
    partition: Plane,

    /// Polygons coincident with the partition plane.
    polygons: Vec<Polygon>,

    /// Subtree for the space in FRONT of the partition.
    front: Option<NodeId>,

    /// Subtree for the space BEHIND the partition.
    back: Option<NodeId>,

    /// Non-owning link back to the parent; `None` for the root.
    parent: Option<NodeId>,
}

impl BspNode {
    pub(crate) fn new(partition: Plane, parent: Option<NodeId>) -> Self {
        Self {
            partition,
            polygons: Vec::new(),
            front: None,
            back: None,
            parent,
        }
    }

    /// Returns a reference to the partition plane.
    #[inline]
    pub fn partition(&self) -> &Plane {
        &self.partition
    }

    /// Returns the polygons coincident with the partition.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn front(&self) -> Option<NodeId> {
        self.front
    }

    #[inline]
    pub fn back(&self) -> Option<NodeId> {
        self.back
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the child on the given side. `OnPlane` is routed to the front.
    #[inline]
    pub fn child(&self, side: PlaneSide) -> Option<NodeId> {
        match side {
            PlaneSide::Front | PlaneSide::OnPlane => self.front,
            PlaneSide::Back => self.back,
        }
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Returns `true` if any polygon stored at this node contains the point.
    pub fn contains(&self, point: &Point) -> bool {
        self.polygons.iter().any(|p| p.contains_point(point))
    }

    pub(crate) fn push_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub(crate) fn set_child(&mut self, side: PlaneSide, child: NodeId) {
        match side {
            PlaneSide::Front | PlaneSide::OnPlane => self.front = Some(child),
            PlaneSide::Back => self.back = Some(child),
        }
    }
}
