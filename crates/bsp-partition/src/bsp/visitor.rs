//! Callbacks driven by ordered tree traversal.
//!
//! [`BspTree::traverse_front_to_back`](super::BspTree::traverse_front_to_back)
//! and its back-to-front twin hand each node's coincident polygons to a
//! visitor, so consumers (depth sorting, picking, export) stay decoupled from
//! the walk itself.

use std::fmt;

use crate::Polygon;

use super::node::NodeId;

/// Receives the polygons of each non-empty node in traversal order.
pub trait BspVisitor {
    /// Called once per node. `polygons` all lie on that node's partition.
    fn visit(&mut self, node: NodeId, polygons: &[Polygon]);
}

impl<V: BspVisitor + ?Sized> BspVisitor for &mut V {
    fn visit(&mut self, node: NodeId, polygons: &[Polygon]) {
        (**self).visit(node, polygons);
    }
}

/// Clones every visited polygon and remembers which nodes were seen.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<Polygon>,
    order: Vec<NodeId>,
}

impl CollectingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polygons in the order they were visited.
    pub fn polygons(&self) -> &[Polygon] {
        &self.collected
    }

    /// Node ids in the order they were visited.
    pub fn nodes(&self) -> &[NodeId] {
        &self.order
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.collected
    }
}

impl BspVisitor for CollectingVisitor {
    fn visit(&mut self, node: NodeId, polygons: &[Polygon]) {
        self.order.push(node);
        self.collected.extend(polygons.iter().cloned());
    }
}

/// Adapts a closure into a [`BspVisitor`].
pub struct FnVisitor<F>
where
    F: FnMut(NodeId, &[Polygon]),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(NodeId, &[Polygon]),
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> fmt::Debug for FnVisitor<F>
where
    F: FnMut(NodeId, &[Polygon]),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnVisitor").finish_non_exhaustive()
    }
}

impl<F> BspVisitor for FnVisitor<F>
where
    F: FnMut(NodeId, &[Polygon]),
{
    fn visit(&mut self, node: NodeId, polygons: &[Polygon]) {
        (self.func)(node, polygons);
    }
}
