//! Shared fixtures and the whole-tree invariant checker.

use approx::assert_relative_eq;

use crate::geom::{Point, Rect};
use crate::rtree::node::{Entry, NodeId};
use crate::{RTree, Spatial};


pub(crate) const EPS: f64 = 1e-9;

/// Construct a rectangle from corner and side lengths, panicking on bad input.
pub(crate) fn must_rect(lo: &[f64], lengths: &[f64]) -> Rect {
    Rect::new(Point::from(lo), lengths).unwrap()
}

/// Wrap rectangles as leaf entries.
pub(crate) fn object_entries(rects: &[Rect]) -> Vec<Entry<Rect>> {
    rects
        .iter()
        .map(|r| Entry::Object {
            bb: r.clone(),
            obj: r.clone(),
        })
        .collect()
}

pub(crate) fn assert_rect_near(actual: &Rect, expected: &Rect) {
    assert_eq!(actual.dim(), expected.dim());
    for i in 0..actual.dim() {
        assert_relative_eq!(actual.lo()[i], expected.lo()[i], epsilon = EPS);
        assert_relative_eq!(actual.hi()[i], expected.hi()[i], epsilon = EPS);
    }
}

/// Every element of `actual` must appear in `expected`; order is traversal
/// dependent and deliberately not compared.
pub(crate) fn assert_same_objects<T: PartialEq + std::fmt::Debug>(actual: &[&T], expected: &[T]) {
    for obj in actual {
        assert!(
            expected.contains(obj),
            "unexpected object in results: {obj:?}"
        );
    }
}

/// The fixed rectangle sets the end-to-end scenarios are built from.
#[derive(Clone, Copy)]
pub(crate) enum Scenario {
    /// Six rectangles whose insertion splits the root once.
    SplitRoot,
    /// Ten rectangles whose insertion splits a second level.
    SecondLevelSplit,
    /// Ten rectangles probed by the intersection-query scenarios.
    Search,
}

impl Scenario {
    pub(crate) fn rects(self) -> Vec<Rect> {
        let coords: &[([f64; 2], [f64; 2])] = match self {
            Scenario::SplitRoot => &[
                ([0.0, 0.0], [2.0, 1.0]),
                ([3.0, 1.0], [1.0, 2.0]),
                ([1.0, 2.0], [2.0, 2.0]),
                ([8.0, 6.0], [1.0, 1.0]),
                ([10.0, 3.0], [1.0, 2.0]),
                ([11.0, 7.0], [1.0, 1.0]),
            ],
            Scenario::SecondLevelSplit => &[
                ([0.0, 0.0], [2.0, 1.0]),
                ([3.0, 1.0], [1.0, 2.0]),
                ([1.0, 2.0], [2.0, 2.0]),
                ([8.0, 6.0], [1.0, 1.0]),
                ([10.0, 3.0], [1.0, 2.0]),
                ([11.0, 7.0], [1.0, 1.0]),
                ([0.0, 6.0], [1.0, 2.0]),
                ([1.0, 6.0], [1.0, 2.0]),
                ([0.0, 8.0], [1.0, 2.0]),
                ([1.0, 8.0], [1.0, 2.0]),
            ],
            Scenario::Search => &[
                ([0.0, 0.0], [2.0, 1.0]),
                ([3.0, 1.0], [1.0, 2.0]),
                ([1.0, 2.0], [2.0, 2.0]),
                ([8.0, 6.0], [1.0, 1.0]),
                ([10.0, 3.0], [1.0, 2.0]),
                ([11.0, 7.0], [1.0, 1.0]),
                ([2.0, 6.0], [1.0, 2.0]),
                ([3.0, 6.0], [1.0, 2.0]),
                ([2.0, 8.0], [1.0, 2.0]),
                ([3.0, 8.0], [1.0, 2.0]),
            ],
        };
        coords
            .iter()
            .map(|(lo, lengths)| must_rect(lo, lengths))
            .collect()
    }
}

/// The seven rectangles that force an uneven 3/3/1 split.
pub(crate) fn split_scenario_rects() -> Vec<Rect> {
    let mut rects = Scenario::SplitRoot.rects();
    rects.push(must_rect(&[10.0, 10.0], &[2.0, 2.0]));
    rects
}

/// The six unit squares used by the nearest-neighbor ordering tests.
pub(crate) fn nn_rects() -> Vec<Rect> {
    vec![
        must_rect(&[1.0, 1.0], &[1.0, 1.0]),
        must_rect(&[-7.0, -7.0], &[1.0, 1.0]),
        must_rect(&[1.0, 3.0], &[1.0, 1.0]),
        must_rect(&[7.0, 7.0], &[1.0, 1.0]),
        must_rect(&[10.0, 2.0], &[1.0, 1.0]),
        must_rect(&[3.0, 3.0], &[1.0, 1.0]),
    ]
}

/// Check every structural invariant the tree promises after a public
/// operation: height balance, level order, MBR correctness, parent links,
/// maximum occupancy, and size accounting. Minimum occupancy is not asserted
/// because quadratic splits and OMT tail slabs legitimately underfill nodes.
pub(crate) fn verify<T: Spatial>(tree: &RTree<T>) {
    assert_eq!(tree.node(tree.root).parent, None, "root has a parent");
    assert_eq!(
        tree.node(tree.root).level,
        tree.depth(),
        "root level disagrees with tree height"
    );
    verify_node(tree, tree.root);
    assert_eq!(
        tree.iter().count(),
        tree.size(),
        "reachable objects disagree with size()"
    );
}

fn verify_node<T: Spatial>(tree: &RTree<T>, id: NodeId) {
    let node = tree.node(id);
    assert!(
        node.entries.len() <= tree.max_children,
        "node holds more than max_children entries"
    );

    if node.is_leaf() {
        for e in &node.entries {
            assert!(e.child().is_none(), "leaf node holds a child entry");
        }
        return;
    }

    for e in &node.entries {
        let child = match e {
            Entry::Child { child, .. } => *child,
            Entry::Object { .. } => panic!("internal node holds an object entry"),
        };
        assert_eq!(
            tree.node(child).level,
            node.level - 1,
            "level order not preserved"
        );
        assert_eq!(
            tree.node(child).parent,
            Some(id),
            "stale parent pointer after restructuring"
        );
        assert!(
            !tree.node(child).entries.is_empty(),
            "empty node left in the tree"
        );
        assert_rect_near(e.bb(), &tree.node(child).compute_bounding_box());
        verify_node(tree, child);
    }
}
