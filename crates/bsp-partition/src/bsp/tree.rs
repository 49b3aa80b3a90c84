//! BSP tree container and construction.

use log::{debug, trace};

use crate::{GeometryError, PlaneSide, Point, Polygon, Relation, Split};

use super::node::{BspNode, NodeId};
use super::visitor::BspVisitor;

/// A Binary Space Partitioning tree for 3D polygons.
///
/// BSP trees recursively partition space using planes, enabling ordered
/// traversal and spatial queries. Each node contains the polygons that lie on
/// its partition plane, while other polygons are stored in front or back
/// subtrees.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]; the root is
/// the first node created.
///
/// # Construction
///
/// Polygons are inserted one at a time. The first polygon to reach an empty
/// branch defines that branch's plane, so the shape of the tree depends on
/// insertion order:
///
/// ```ignore
/// let mut tree = BspTree::new();
/// for polygon in polygons {
///     tree.insert(polygon)?;
/// }
/// ```
///
/// # Traversal
///
/// The tree supports front-to-back and back-to-front traversal relative to
/// a viewpoint, useful for painter's algorithm rendering:
///
/// ```ignore
/// tree.traverse_back_to_front(eye_position, &mut visitor);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    /// Creates an empty BSP tree.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Builds a tree by inserting the polygons in order.
    pub fn from_polygons<I>(polygons: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = Polygon>,
    {
        let mut tree = Self::new();
        for polygon in polygons {
            tree.insert(polygon)?;
        }
        Ok(tree)
    }

    /// Inserts a polygon into the tree.
    ///
    /// The polygon descends from the root: it is stored at the first node whose
    /// partition it lies on, moves into the front or back child when it lies
    /// entirely on one side (creating that child from its own plane if absent),
    /// and is split when it straddles a partition, each piece continuing on its
    /// own side.
    ///
    /// Fails only if splitting hits a numeric domain error.
    pub fn insert(&mut self, polygon: Polygon) -> Result<(), GeometryError> {
        let root = match self.root() {
            Some(root) => root,
            None => {
                debug!("creating root from {}-gon", polygon.len());
                self.push_node(BspNode::new(polygon.plane().clone(), None))
            }
        };

        let mut pending = vec![(root, polygon)];

        while let Some((id, polygon)) = pending.pop() {
            let relation = polygon.relation_with_plane(self.nodes[id.0].partition());
            trace!("{}-gon is {relation:?} at node {id}", polygon.len());

            match relation {
                Relation::Coincident => self.nodes[id.0].push_polygon(polygon),
                Relation::InFront => {
                    let child = self.child_or_create(id, PlaneSide::Front, &polygon);
                    pending.push((child, polygon));
                }
                Relation::Behind => {
                    let child = self.child_or_create(id, PlaneSide::Back, &polygon);
                    pending.push((child, polygon));
                }
                Relation::Split => match polygon.split(self.nodes[id.0].partition())? {
                    Split::Pieces { positive, negative } => {
                        debug!(
                            "split at node {id}: {} + {} vertices",
                            positive.len(),
                            negative.len()
                        );
                        let front = self.child_or_create(id, PlaneSide::Front, &positive);
                        let back = self.child_or_create(id, PlaneSide::Back, &negative);
                        pending.push((front, positive));
                        pending.push((back, negative));
                    }
                    Split::Whole(side) => {
                        let child = self.child_or_create(id, side, &polygon);
                        pending.push((child, polygon));
                    }
                },
            }
        }

        Ok(())
    }

    /// Returns the child of `id` on `side`, creating it from `polygon`'s plane
    /// if the branch is still empty.
    fn child_or_create(&mut self, id: NodeId, side: PlaneSide, polygon: &Polygon) -> NodeId {
        if let Some(child) = self.nodes[id.0].child(side) {
            return child;
        }
        let child = self.push_node(BspNode::new(polygon.plane().clone(), Some(id)));
        self.nodes[id.0].set_child(side, child);
        debug!("attached {side:?} child {child} to node {id}");
        child
    }

    fn push_node(&mut self, node: BspNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Returns `true` if the tree contains no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the id of the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    /// Returns the node with the given id, if it belongs to this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&BspNode> {
        self.nodes.get(id.0)
    }

    /// Iterates all nodes with their ids, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &BspNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of polygons stored at the root.
    pub fn root_polygons_count(&self) -> usize {
        self.nodes.first().map_or(0, |n| n.polygons().len())
    }

    /// Returns the total number of polygons in the tree.
    pub fn polygon_count(&self) -> usize {
        self.nodes.iter().map(|n| n.polygons().len()).sum()
    }

    /// Returns the number of polygons in the subtree rooted at `id`.
    pub fn subtree_polygon_count(&self, id: NodeId) -> usize {
        let Some(node) = self.node(id) else {
            return 0;
        };
        let mut count = node.polygons().len();

        if let Some(front) = node.front() {
            count += self.subtree_polygon_count(front);
        }
        if let Some(back) = node.back() {
            count += self.subtree_polygon_count(back);
        }

        count
    }

    /// Returns the height of the tree (0 for empty tree, 1 for a lone root).
    pub fn height(&self) -> usize {
        self.root().map_or(0, |root| self.subtree_height(root))
    }

    fn subtree_height(&self, id: NodeId) -> usize {
        let node = &self.nodes[id.0];
        let front_height = node.front().map_or(0, |n| self.subtree_height(n));
        let back_height = node.back().map_or(0, |n| self.subtree_height(n));
        1 + front_height.max(back_height)
    }

    /// Traverses the tree front-to-back relative to the given viewpoint.
    ///
    /// The visitor's `visit` method is called for each group of coincident
    /// polygons, nearest first.
    pub fn traverse_front_to_back<V: BspVisitor>(&self, eye: Point, visitor: &mut V) {
        if let Some(root) = self.root() {
            self.traverse_node(root, &eye, visitor, Order::FrontToBack);
        }
    }

    /// Traverses the tree back-to-front relative to the given viewpoint.
    ///
    /// This is the painter's algorithm order: farthest polygons first.
    pub fn traverse_back_to_front<V: BspVisitor>(&self, eye: Point, visitor: &mut V) {
        if let Some(root) = self.root() {
            self.traverse_node(root, &eye, visitor, Order::BackToFront);
        }
    }

    fn traverse_node<V: BspVisitor>(&self, id: NodeId, eye: &Point, visitor: &mut V, order: Order) {
        let node = &self.nodes[id.0];

        // The half-space holding the eye is the near side
        let (near, far) = match node.partition().classify_point(eye) {
            PlaneSide::Front | PlaneSide::OnPlane => (node.front(), node.back()),
            PlaneSide::Back => (node.back(), node.front()),
        };
        let (first, last) = match order {
            Order::FrontToBack => (near, far),
            Order::BackToFront => (far, near),
        };

        if let Some(first) = first {
            self.traverse_node(first, eye, visitor, order);
        }
        if !node.polygons().is_empty() {
            visitor.visit(id, node.polygons());
        }
        if let Some(last) = last {
            self.traverse_node(last, eye, visitor, order);
        }
    }

    /// Collects all polygons in the tree into a vector, in node creation order.
    pub fn collect_polygons(&self) -> Vec<Polygon> {
        self.nodes
            .iter()
            .flat_map(|n| n.polygons().iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Order {
    FrontToBack,
    BackToFront,
}
