//! Point location, ancestry and collision queries.

use std::iter;

use log::trace;

use crate::{LineSegment, Point, Polygon, Scalar, Sign};

use super::node::NodeId;
use super::tree::BspTree;

/// A polygon struck by a segment.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Node storing the polygon
    pub node: NodeId,
    /// The polygon containing the crossing point
    pub polygon: &'a Polygon,
    /// Where the segment crosses the polygon's plane
    pub point: Point,
    /// Segment parameter of the crossing (0 = start, 1 = end)
    pub t: Scalar,
}

impl BspTree {
    /// Locates the cell of the partition that contains `point`.
    ///
    /// Descends from the root, taking the front child when the point is on or
    /// in front of a node's partition and the back child otherwise. Stops at a
    /// leaf, or at a node whose child on the point's side is absent (the point
    /// lies in that empty half-space). Returns `None` for an empty tree.
    pub fn visibility_order(&self, point: &Point) -> Option<NodeId> {
        let mut current = self.root()?;

        loop {
            let node = self.node(current)?;
            let next = match node.partition().signed_distance(point).sign() {
                Sign::Negative => node.back(),
                Sign::Positive | Sign::Zero => node.front(),
            };
            match next {
                Some(child) => current = child,
                None => return Some(current),
            }
        }
    }

    /// Iterates from `id` up to the root: `id`, its parent, ..., root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(self.node(id).map(|_| id), move |current| {
            self.node(*current).and_then(|n| n.parent())
        })
    }

    /// Returns the chain of ids from the root down to `id` (inclusive).
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(id).collect();
        path.reverse();
        path
    }

    /// Returns the depth of `id` (0 for the root), or `None` for an unknown id.
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        self.node(id)?;
        Some(self.ancestors(id).count() - 1)
    }

    /// Finds the lowest common ancestor of two nodes.
    ///
    /// Walks both root-to-node chains in lockstep and returns the last node
    /// they share. If one node is an ancestor of the other, that node is
    /// returned. Returns `None` if either id is not in this tree.
    pub fn first_common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        self.node(a)?;
        self.node(b)?;

        self.path_from_root(a)
            .into_iter()
            .zip(self.path_from_root(b))
            .take_while(|(x, y)| x == y)
            .map(|(x, _)| x)
            .last()
    }

    /// Returns the first stored polygon the segment passes through, if any.
    ///
    /// See [`BspTree::trace`] for the details.
    pub fn detect_collision(&self, segment: &LineSegment) -> Option<&Polygon> {
        self.trace(segment).map(|hit| hit.polygon)
    }

    /// Traces a segment through the tree and reports the nearest polygon hit.
    ///
    /// Both endpoints are located with [`BspTree::visibility_order`]. When
    /// they fall in the same cell no partition separates them and there is no
    /// hit. Otherwise the partitions that can separate them are the ones on
    /// the paths from each endpoint's cell up to their lowest common ancestor,
    /// ancestor included. Each such plane the segment actually crosses is
    /// intersected, and the crossing point is tested against that node's
    /// polygons. The hit closest to the segment start wins.
    pub fn trace(&self, segment: &LineSegment) -> Option<Hit<'_>> {
        let start_cell = self.visibility_order(&segment.start())?;
        let end_cell = self.visibility_order(&segment.end())?;
        if start_cell == end_cell {
            trace!("segment stays inside cell {start_cell}");
            return None;
        }

        let ancestor = self.first_common_ancestor(start_cell, end_cell)?;
        trace!("segment spans cells {start_cell} and {end_cell}, ancestor {ancestor}");

        let below_ancestor =
            move |cell: NodeId| self.ancestors(cell).take_while(move |id| *id != ancestor);

        below_ancestor(start_cell)
            .chain(below_ancestor(end_cell))
            .chain(iter::once(ancestor))
            .filter_map(|id| {
                let node = self.node(id)?;
                let (t, point) = node.partition().intersect_segment(segment)?;
                node.polygons()
                    .iter()
                    .find(|polygon| polygon.contains_point(&point))
                    .map(|polygon| Hit {
                        node: id,
                        polygon,
                        point,
                        t,
                    })
            })
            .min_by(|a, b| a.t.value().total_cmp(&b.t.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_triangle(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Polygon {
        Polygon::triangle(Point::from(a), Point::from(b), Point::from(c)).unwrap()
    }

    fn flat_triangle(z: f64) -> Polygon {
        make_triangle([0.0, 0.0, z], [1.0, 0.0, z], [0.0, 1.0, z])
    }

    /// Root at z=0 with a front child at z=1 and a back child at z=-1.
    fn layered_tree() -> BspTree {
        BspTree::from_polygons(vec![flat_triangle(0.0), flat_triangle(1.0), flat_triangle(-1.0)])
            .unwrap()
    }

    fn segment(a: [f64; 3], b: [f64; 3]) -> LineSegment {
        LineSegment::new(Point::from(a), Point::from(b))
    }

    #[test]
    fn visibility_order_empty_tree() {
        let tree = BspTree::new();
        assert_eq!(tree.visibility_order(&Point::origin()), None);
    }

    #[test]
    fn visibility_order_single_node() {
        let tree = BspTree::from_polygons(vec![flat_triangle(0.0)]).unwrap();
        assert_eq!(tree.visibility_order(&Point::new(0.0, 0.0, 5.0)), tree.root());
        assert_eq!(tree.visibility_order(&Point::new(0.0, 0.0, -5.0)), tree.root());
    }

    #[test]
    fn visibility_order_descends_to_leaves() {
        let tree = layered_tree();
        let root = tree.node(tree.root().unwrap()).unwrap();

        let above = tree.visibility_order(&Point::new(0.0, 0.0, 0.5)).unwrap();
        let below = tree.visibility_order(&Point::new(0.0, 0.0, -0.5)).unwrap();
        assert_eq!(Some(above), root.front());
        assert_eq!(Some(below), root.back());
        assert!(tree.node(above).unwrap().is_leaf());
    }

    #[test]
    fn visibility_order_on_plane_goes_front() {
        let tree = layered_tree();
        let root = tree.node(tree.root().unwrap()).unwrap();
        let on_plane = tree.visibility_order(&Point::new(3.0, 3.0, 0.0)).unwrap();
        assert_eq!(Some(on_plane), root.front());
    }

    #[test]
    fn visibility_order_stops_at_missing_branch() {
        let tree = BspTree::from_polygons(vec![flat_triangle(0.0), flat_triangle(1.0)]).unwrap();
        assert_eq!(tree.visibility_order(&Point::new(0.0, 0.0, -3.0)), tree.root());
    }

    #[test]
    fn ancestors_and_depth() {
        let tree = BspTree::from_polygons(vec![
            flat_triangle(0.0),
            flat_triangle(1.0),
            flat_triangle(2.0),
        ])
        .unwrap();
        let deepest = tree.visibility_order(&Point::new(0.0, 0.0, 9.0)).unwrap();

        assert_eq!(tree.depth_of(deepest), Some(2));
        assert_eq!(tree.ancestors(deepest).count(), 3);
        assert_eq!(tree.path_from_root(deepest)[0], tree.root().unwrap());
        assert_eq!(tree.depth_of(NodeId(42)), None);
        assert_eq!(tree.ancestors(NodeId(42)).count(), 0);
    }

    #[test]
    fn common_ancestor_of_siblings_is_parent() {
        let tree = layered_tree();
        let root_id = tree.root().unwrap();
        let root = tree.node(root_id).unwrap();
        let (front, back) = (root.front().unwrap(), root.back().unwrap());

        assert_eq!(tree.first_common_ancestor(front, back), Some(root_id));
        assert_eq!(tree.first_common_ancestor(back, front), Some(root_id));
    }

    #[test]
    fn common_ancestor_when_one_contains_the_other() {
        let tree = BspTree::from_polygons(vec![
            flat_triangle(0.0),
            flat_triangle(1.0),
            flat_triangle(2.0),
        ])
        .unwrap();
        let root = tree.root().unwrap();
        let deepest = tree.visibility_order(&Point::new(0.0, 0.0, 9.0)).unwrap();
        let middle = tree.node(deepest).unwrap().parent().unwrap();

        assert_eq!(tree.first_common_ancestor(middle, deepest), Some(middle));
        assert_eq!(tree.first_common_ancestor(deepest, root), Some(root));
        assert_eq!(tree.first_common_ancestor(deepest, deepest), Some(deepest));
    }

    #[test]
    fn common_ancestor_unknown_node() {
        let tree = layered_tree();
        assert_eq!(tree.first_common_ancestor(NodeId(0), NodeId(99)), None);
    }

    #[test]
    fn collision_empty_tree() {
        let tree = BspTree::new();
        assert!(tree.detect_collision(&segment([0.0, 0.0, 1.0], [0.0, 0.0, -1.0])).is_none());
    }

    #[test]
    fn collision_same_cell_is_none() {
        let tree = layered_tree();
        let s = segment([0.2, 0.2, 0.3], [0.5, 0.1, 0.6]);
        assert!(tree.detect_collision(&s).is_none());
    }

    #[test]
    fn collision_through_root_polygon() {
        let tree = layered_tree();
        let s = segment([0.2, 0.2, 0.5], [0.2, 0.2, -0.5]);

        let hit = tree.trace(&s).unwrap();
        assert_eq!(hit.node, tree.root().unwrap());
        assert_eq!(hit.polygon, &flat_triangle(0.0));
        assert_eq!(hit.t, 0.5);
        assert_eq!(tree.detect_collision(&s), Some(&flat_triangle(0.0)));
    }

    #[test]
    fn collision_misses_outside_polygon() {
        let tree = layered_tree();
        let s = segment([0.9, 0.9, 0.5], [0.9, 0.9, -0.5]);
        assert!(tree.detect_collision(&s).is_none());
    }

    #[test]
    fn collision_reports_nearest_to_start() {
        let tree = layered_tree();

        let down = segment([0.2, 0.2, 2.0], [0.2, 0.2, -2.0]);
        let hit = tree.trace(&down).unwrap();
        assert_eq!(hit.polygon, &flat_triangle(1.0));
        assert_eq!(hit.t, 0.25);

        let up = segment([0.2, 0.2, -2.0], [0.2, 0.2, 2.0]);
        assert_eq!(tree.detect_collision(&up), Some(&flat_triangle(-1.0)));
    }

    #[test]
    fn collision_with_split_fragment() {
        let t1 = flat_triangle(0.0);
        // Vertical wall crossing the root plane, lying in x = 0.5
        let wall = Polygon::new(vec![
            Point::new(0.5, -1.0, -1.0),
            Point::new(0.5, 1.0, -1.0),
            Point::new(0.5, 1.0, 1.0),
            Point::new(0.5, -1.0, 1.0),
        ])
        .unwrap();
        let tree = BspTree::from_polygons(vec![t1, wall]).unwrap();
        assert_eq!(tree.polygon_count(), 3);

        // Enter the upper half of the wall from behind, leave below the floor
        let s = segment([0.0, 0.2, 0.6], [1.0, 0.2, -0.2]);
        let hit = tree.trace(&s).unwrap();
        assert!(hit.polygon.vertices().iter().all(|v| v.z >= -1e-9));
        assert_eq!(hit.point.x, 0.5);
        assert_eq!(hit.t, 0.5);
    }

    #[test]
    fn collision_inside_one_cell_ignores_its_own_plane() {
        let t1 = flat_triangle(0.0);
        let wall = Polygon::new(vec![
            Point::new(0.5, -1.0, -1.0),
            Point::new(0.5, 1.0, -1.0),
            Point::new(0.5, 1.0, 1.0),
            Point::new(0.5, -1.0, 1.0),
        ])
        .unwrap();
        let tree = BspTree::from_polygons(vec![t1, wall]).unwrap();

        // Both endpoints resolve to the node holding the upper wall piece
        let s = segment([0.0, 0.0, 0.5], [1.0, 0.0, 0.5]);
        assert_eq!(tree.visibility_order(&s.start()), tree.visibility_order(&s.end()));
        assert!(tree.detect_collision(&s).is_none());
    }
}
