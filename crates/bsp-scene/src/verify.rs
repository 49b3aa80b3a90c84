//! Structural checks over a finished tree.
//!
//! Only the public read-only accessors are used, so the checks see the tree
//! exactly as any other consumer would.

use bsp_partition::{BspNode, BspTree, EPSILON, NodeId, PlaneSide, Real, Relation};
use log::debug;
use thiserror::Error;

/// How far a vertex may reach across an ancestor's partition.
///
/// A split only keeps a polygon whole when the piece on one side has collapsed
/// to within [`EPSILON`] of a line. The tip of that piece may still cross the
/// partition by a few epsilons where the polygon meets it at a narrow angle.
pub const SIDE_SLACK: Real = 100.0 * EPSILON;

/// A broken structural invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("node {0} stores no polygons")]
    EmptyNode(NodeId),

    #[error("polygon {index} at node {node} is {relation:?} with the node's partition")]
    Misplaced {
        node: NodeId,
        index: usize,
        relation: Relation,
    },

    #[error("node {node} lies in the {side:?} subtree of {ancestor} but reaches {depth} across it")]
    WrongSide {
        ancestor: NodeId,
        node: NodeId,
        side: PlaneSide,
        depth: Real,
    },

    #[error("node {node} repeats the partition of its ancestor {ancestor}")]
    DuplicatePartition { node: NodeId, ancestor: NodeId },

    #[error("child {child} of node {node} does not link back to it")]
    BrokenLink { node: NodeId, child: NodeId },
}

/// Checks every invariant, stopping at the first violation.
pub fn verify_tree(tree: &BspTree) -> Result<(), InvariantViolation> {
    match violations(tree).into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Collects every violation in the tree.
pub fn violations(tree: &BspTree) -> Vec<InvariantViolation> {
    let mut found = Vec::new();

    for (id, node) in tree.nodes() {
        check_node(id, node, &mut found);
        check_links(tree, id, node, &mut found);
        check_sides(tree, id, node, &mut found);
        check_unique_partition(tree, id, node, &mut found);
    }

    debug!("verified {} nodes, {} violations", tree.len(), found.len());
    found
}

/// Non-empty, and every stored polygon lies on the partition.
fn check_node(id: NodeId, node: &BspNode, found: &mut Vec<InvariantViolation>) {
    if node.polygons().is_empty() {
        found.push(InvariantViolation::EmptyNode(id));
    }
    for (index, polygon) in node.polygons().iter().enumerate() {
        let relation = polygon.relation_with_plane(node.partition());
        if relation != Relation::Coincident {
            found.push(InvariantViolation::Misplaced {
                node: id,
                index,
                relation,
            });
        }
    }
}

fn check_links(tree: &BspTree, id: NodeId, node: &BspNode, found: &mut Vec<InvariantViolation>) {
    for child in node.front().into_iter().chain(node.back()) {
        let parent = tree.node(child).and_then(BspNode::parent);
        if parent != Some(id) {
            found.push(InvariantViolation::BrokenLink { node: id, child });
        }
    }
}

/// Every vertex below the front child is on or in front of `node`'s
/// partition, and likewise for the back.
fn check_sides(tree: &BspTree, id: NodeId, node: &BspNode, found: &mut Vec<InvariantViolation>) {
    let branches = [
        (PlaneSide::Front, node.front(), 1.0),
        (PlaneSide::Back, node.back(), -1.0),
    ];

    for (side, child, sign) in branches {
        let Some(child) = child else { continue };

        for below in subtree(tree, child) {
            let Some(below_node) = tree.node(below) else {
                continue;
            };
            let deepest = below_node
                .polygons()
                .iter()
                .flat_map(|p| p.vertices())
                .map(|v| sign * node.partition().signed_distance(v).value())
                .fold(Real::INFINITY, Real::min);

            if deepest < -SIDE_SLACK {
                found.push(InvariantViolation::WrongSide {
                    ancestor: id,
                    node: below,
                    side,
                    depth: -deepest,
                });
            }
        }
    }
}

/// A partition never reappears further down its own path.
fn check_unique_partition(
    tree: &BspTree,
    id: NodeId,
    node: &BspNode,
    found: &mut Vec<InvariantViolation>,
) {
    let repeated = tree.ancestors(id).skip(1).find(|ancestor| {
        tree.node(*ancestor)
            .is_some_and(|a| a.partition().is_coincident_with(node.partition()))
    });
    if let Some(ancestor) = repeated {
        found.push(InvariantViolation::DuplicatePartition { node: id, ancestor });
    }
}

fn subtree(tree: &BspTree, root: NodeId) -> Vec<NodeId> {
    let mut ids = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        ids.push(id);
        if let Some(node) = tree.node(id) {
            stack.extend(node.front());
            stack.extend(node.back());
        }
    }
    ids
}
