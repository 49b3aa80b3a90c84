//! Property-based tests for partitioning invariants using the `proptest` crate.

use proptest::prelude::*;

use bsp_partition::{
    BspTree, EPSILON, LineSegment, NodeId, Plane, PlaneSide, Point, Polygon, Relation, Split,
    Vector,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_coord() -> impl Strategy<Value = f64> {
    -10.0f64..10.0
}

fn arb_point() -> impl Strategy<Value = Point> {
    (arb_coord(), arb_coord(), arb_coord()).prop_map(|(x, y, z)| Point::new(x, y, z))
}

/// Unit direction, rejecting vectors too short to normalize reliably.
fn arb_unit() -> impl Strategy<Value = Vector> {
    (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0).prop_filter_map("near-zero direction", |(x, y, z)| {
        let v = Vector::new(x, y, z);
        (v.norm() > 0.1).then(|| v.normalize())
    })
}

fn arb_plane() -> impl Strategy<Value = Plane> {
    (arb_point(), arb_unit()).prop_filter_map("invalid plane", |(anchor, normal)| {
        Plane::new(anchor, normal).ok()
    })
}

/// Well-shaped triangle: three corners spread around a center in a random
/// plane, so no interior angle gets close to zero.
fn arb_triangle() -> impl Strategy<Value = Polygon> {
    (arb_point(), arb_unit(), arb_unit(), 0.5f64..2.0, 0.5f64..2.0, 0.5f64..2.0)
        .prop_filter_map("degenerate triangle", |(center, n, hint, s1, s2, s3)| {
            let u = n.cross(&hint);
            if u.norm() < 0.1 {
                return None;
            }
            let u = u.normalize();
            let v = n.cross(&u);
            Polygon::triangle(center + u * s1, center + v * s2, center - (u + v) * s3).ok()
        })
}

fn arb_scene() -> impl Strategy<Value = Vec<Polygon>> {
    prop::collection::vec(arb_triangle(), 1..24)
}

/// A collapsed piece kept whole may poke this far across a partition.
const SIDE_SLACK: f64 = 100.0 * EPSILON;

const TOL: f64 = 1e-6;

/// Ids of every node in the subtree rooted at `id`, `id` included.
fn subtree(tree: &BspTree, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        out.push(current);
        let node = tree.node(current).unwrap();
        stack.extend(node.front());
        stack.extend(node.back());
    }
    out
}

// ---------------------------------------------------------------------------
// 1. Classification agrees with per-vertex signed distances
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn classification_matches_vertex_signs(poly in arb_triangle(), plane in arb_plane()) {
        let distances: Vec<f64> = poly
            .vertices()
            .iter()
            .map(|v| plane.signed_distance(v).value())
            .collect();
        let any_front = distances.iter().any(|d| *d > TOL);
        let any_back = distances.iter().any(|d| *d < -TOL);

        let expected = match (any_front, any_back) {
            (false, false) => Relation::Coincident,
            (true, false) => Relation::InFront,
            (false, true) => Relation::Behind,
            (true, true) => Relation::Split,
        };
        prop_assert_eq!(poly.relation_with_plane(&plane), expected);
    }
}

// ---------------------------------------------------------------------------
// 2. Split pieces lie on their own side and on the source plane
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn split_pieces_respect_sides(poly in arb_triangle(), plane in arb_plane()) {
        match poly.split(&plane).unwrap() {
            Split::Pieces { positive, negative } => {
                prop_assert!(positive.len() >= 3 && negative.len() >= 3);
                for v in positive.vertices() {
                    prop_assert!(plane.signed_distance(v).value() >= -TOL);
                    prop_assert!(poly.plane().signed_distance(v).is_zero());
                }
                for v in negative.vertices() {
                    prop_assert!(plane.signed_distance(v).value() <= TOL);
                    prop_assert!(poly.plane().signed_distance(v).is_zero());
                }
                prop_assert_eq!(positive.plane(), poly.plane());
                prop_assert_eq!(negative.plane(), poly.plane());
            }
            Split::Whole(side) => {
                let relation = poly.relation_with_plane(&plane);
                match relation {
                    Relation::Coincident => prop_assert_eq!(side, PlaneSide::OnPlane),
                    Relation::InFront => prop_assert_eq!(side, PlaneSide::Front),
                    Relation::Behind => prop_assert_eq!(side, PlaneSide::Back),
                    Relation::Split => prop_assert_ne!(side, PlaneSide::OnPlane),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Every stored polygon lies on its node's partition
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn placement_is_coincident(scene in arb_scene()) {
        let tree = BspTree::from_polygons(scene).unwrap();
        for (id, node) in tree.nodes() {
            prop_assert!(!node.polygons().is_empty(), "node {} is empty", id);
            for poly in node.polygons() {
                prop_assert_eq!(poly.relation_with_plane(node.partition()), Relation::Coincident);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Subtrees stay on their side of every ancestor partition
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn subtrees_stay_on_their_side(scene in arb_scene()) {
        let tree = BspTree::from_polygons(scene).unwrap();
        for (_, node) in tree.nodes() {
            let sides = [(node.front(), 1.0), (node.back(), -1.0)];
            for (child, sign) in sides {
                let Some(child) = child else { continue };
                for id in subtree(&tree, child) {
                    for poly in tree.node(id).unwrap().polygons() {
                        for v in poly.vertices() {
                            let d = sign * node.partition().signed_distance(v).value();
                            prop_assert!(d >= -SIDE_SLACK, "vertex {} across partition by {}", v, -d);
                        }
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Total polygon count never drops below the number inserted
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn insertion_never_loses_polygons(scene in arb_scene()) {
        let inserted = scene.len();
        let tree = BspTree::from_polygons(scene).unwrap();
        prop_assert!(tree.polygon_count() >= inserted);
        prop_assert_eq!(tree.subtree_polygon_count(tree.root().unwrap()), tree.polygon_count());
    }
}

// ---------------------------------------------------------------------------
// 6. Point location ends where the point's branch runs out
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn visibility_order_terminates_at_open_branch(scene in arb_scene(), p in arb_point()) {
        let tree = BspTree::from_polygons(scene).unwrap();
        let cell = tree.visibility_order(&p).unwrap();
        let node = tree.node(cell).unwrap();
        let side = node.partition().classify_point(&p);
        prop_assert_eq!(node.child(side), None);

        // Every ancestor routes the point towards the cell
        let path = tree.path_from_root(cell);
        for pair in path.windows(2) {
            let parent = tree.node(pair[0]).unwrap();
            let side = parent.partition().classify_point(&p);
            prop_assert_eq!(parent.child(side), Some(pair[1]));
        }
    }
}

// ---------------------------------------------------------------------------
// 7. The common ancestor lies on both paths and nothing deeper does
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn common_ancestor_is_lowest(scene in arb_scene(), a in arb_point(), b in arb_point()) {
        let tree = BspTree::from_polygons(scene).unwrap();
        let cell_a = tree.visibility_order(&a).unwrap();
        let cell_b = tree.visibility_order(&b).unwrap();
        let ancestor = tree.first_common_ancestor(cell_a, cell_b).unwrap();

        let path_a = tree.path_from_root(cell_a);
        let path_b = tree.path_from_root(cell_b);
        prop_assert!(path_a.contains(&ancestor));
        prop_assert!(path_b.contains(&ancestor));

        let depth = tree.depth_of(ancestor).unwrap();
        if let (Some(x), Some(y)) = (path_a.get(depth + 1), path_b.get(depth + 1)) {
            prop_assert_ne!(x, y);
        }
    }
}

// ---------------------------------------------------------------------------
// 8. No partition repeats along a root-to-node path
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn no_duplicate_partitions_on_paths(scene in arb_scene()) {
        let tree = BspTree::from_polygons(scene).unwrap();
        for (id, node) in tree.nodes() {
            for ancestor in tree.ancestors(id).skip(1) {
                let above = tree.node(ancestor).unwrap();
                prop_assert!(!node.partition().is_coincident_with(above.partition()));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 9. A reported hit lies on the segment and inside the polygon
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn hits_lie_on_segment_and_polygon(scene in arb_scene(), a in arb_point(), b in arb_point()) {
        let tree = BspTree::from_polygons(scene).unwrap();
        let segment = LineSegment::new(a, b);
        if let Some(hit) = tree.trace(&segment) {
            prop_assert!(hit.t >= 0.0 && hit.t <= 1.0);
            prop_assert!(hit.polygon.contains_point(&hit.point));
            let expected = segment.point_at(hit.t.value());
            prop_assert!((expected - hit.point).norm() < 1e-6);
            prop_assert_eq!(tree.detect_collision(&segment), Some(hit.polygon));
        }
    }
}
