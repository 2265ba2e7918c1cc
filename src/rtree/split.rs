use std::mem;

use crate::geom::Rect;
use crate::rtree::node::{Entry, Node, NodeId};
use crate::rtree::{RTree, Spatial};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl<T: Spatial> RTree<T> {
    /// Split an overflowing node into two siblings while attempting to
    /// minimize the area of the resulting nodes (Guttman's quadratic split).
    ///
    /// `id` is reused as the left half; the right half is newly allocated and
    /// inherits the node's parent and level. Subtrees that migrate to the
    /// right group are re-pointed at their new owner. The caller decides
    /// whether the result grows the root or propagates into the parent.
    pub(super) fn split_node(&mut self, id: NodeId, min_group_size: usize) -> (NodeId, NodeId) {
        let mut entries = mem::take(&mut self.node_mut(id).entries);
        let (ls, rs) = pick_seeds(&entries);
        // remove the higher index first so the lower one stays valid
        let right_seed = entries.remove(rs);
        let left_seed = entries.remove(ls);

        let (parent, level) = {
            let n = self.node(id);
            (n.parent, n.level)
        };
        let right = self.alloc(Node {
            parent,
            level,
            entries: Vec::new(),
        });

        self.attach(id, left_seed);
        self.attach(right, right_seed);

        let mut remaining = entries;
        while !remaining.is_empty() {
            let left_bb = self.node(id).compute_bounding_box();
            let right_bb = self.node(right).compute_bounding_box();
            let next = pick_next(&left_bb, &right_bb, &remaining);

            let left_len = self.node(id).entries.len();
            let right_len = self.node(right).entries.len();

            // A group that needs every remaining entry to reach the minimum
            // size gets them unconditionally.
            let group = if remaining.len() + left_len <= min_group_size {
                id
            } else if remaining.len() + right_len <= min_group_size {
                right
            } else {
                match assign_group(
                    remaining[next].bb(),
                    &left_bb,
                    &right_bb,
                    left_len,
                    right_len,
                ) {
                    Side::Left => id,
                    Side::Right => right,
                }
            };

            let e = remaining.remove(next);
            self.attach(group, e);
        }

        (id, right)
    }
}

/// Choose the pair of entries wasting the most space when grouped together;
/// they seed the two split groups.
fn pick_seeds<T>(entries: &[Entry<T>]) -> (usize, usize) {
    let (mut left, mut right) = (0, 1);
    let mut max_wasted = f64::NEG_INFINITY;
    for (i, e1) in entries.iter().enumerate() {
        for (j, e2) in entries.iter().enumerate().skip(i + 1) {
            let wasted = e1.bb().union(e2.bb()).size() - e1.bb().size() - e2.bb().size();
            if wasted > max_wasted {
                max_wasted = wasted;
                left = i;
                right = j;
            }
        }
    }
    (left, right)
}

/// Choose the remaining entry whose group preference is strongest: the one
/// maximizing the difference between the enlargements it would cause.
fn pick_next<T>(left_bb: &Rect, right_bb: &Rect, remaining: &[Entry<T>]) -> usize {
    let mut next = 0;
    let mut max_diff = -1.0;
    for (i, e) in remaining.iter().enumerate() {
        let d_left = left_bb.union(e.bb()).size() - left_bb.size();
        let d_right = right_bb.union(e.bb()).size() - right_bb.size();
        let diff = (d_left - d_right).abs();
        if diff > max_diff {
            max_diff = diff;
            next = i;
        }
    }
    next
}

/// Pick the group an entry belongs to: least enlargement, then smaller area,
/// then fewer entries, with a final tie going left.
fn assign_group(
    bb: &Rect,
    left_bb: &Rect,
    right_bb: &Rect,
    left_len: usize,
    right_len: usize,
) -> Side {
    let d_left = left_bb.union(bb).size() - left_bb.size();
    let d_right = right_bb.union(bb).size() - right_bb.size();
    if d_left < d_right {
        return Side::Left;
    } else if d_left > d_right {
        return Side::Right;
    }

    let left_size = left_bb.size();
    let right_size = right_bb.size();
    if left_size < right_size {
        return Side::Left;
    } else if left_size > right_size {
        return Side::Right;
    }

    if left_len <= right_len {
        Side::Left
    } else {
        Side::Right
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{assert_rect_near, must_rect, object_entries};
    use crate::RTree;

    #[test]
    fn pick_seeds_spreads_the_groups() {
        let entries = object_entries(&[
            must_rect(&[1.0, 1.0], &[1.0, 1.0]),
            must_rect(&[1.0, -1.0], &[2.0, 1.0]),
            must_rect(&[-1.0, -1.0], &[1.0, 2.0]),
        ]);
        assert_eq!(pick_seeds(&entries), (0, 2));
    }

    #[test]
    fn pick_next_prefers_the_strongest_preference() {
        let left_bb = must_rect(&[1.0, 1.0], &[1.0, 1.0]);
        let right_bb = must_rect(&[-1.0, -1.0], &[1.0, 2.0]);
        let remaining = object_entries(&[
            must_rect(&[0.0, 0.0], &[1.0, 1.0]),
            must_rect(&[-2.0, -2.0], &[1.0, 1.0]),
            must_rect(&[1.0, 2.0], &[1.0, 1.0]),
        ]);
        assert_eq!(pick_next(&left_bb, &right_bb, &remaining), 1);
    }

    #[test]
    fn split_minimizes_group_areas() {
        let mut tree: RTree<_> = RTree::new(2, 1, 4);
        let root = tree.root;
        tree.node_mut(root).entries = object_entries(&[
            must_rect(&[-3.0, -1.0], &[2.0, 1.0]),
            must_rect(&[1.0, 2.0], &[1.0, 1.0]),
            must_rect(&[-1.0, 0.0], &[1.0, 1.0]),
            must_rect(&[-3.0, -3.0], &[1.0, 1.0]),
            must_rect(&[1.0, -1.0], &[2.0, 2.0]),
        ]);

        let (left, right) = tree.split_node(root, 0);
        assert_rect_near(
            &tree.node(left).compute_bounding_box(),
            &must_rect(&[1.0, -1.0], &[2.0, 4.0]),
        );
        assert_rect_near(
            &tree.node(right).compute_bounding_box(),
            &must_rect(&[-3.0, -3.0], &[3.0, 4.0]),
        );
    }

    #[test]
    fn split_tops_up_a_starved_group() {
        let mut tree: RTree<_> = RTree::new(2, 1, 4);
        let root = tree.root;
        tree.node_mut(root).entries = object_entries(&[
            must_rect(&[0.0, 0.0], &[1.0, 1.0]),
            must_rect(&[0.0, 1.0], &[1.0, 1.0]),
            must_rect(&[0.0, 2.0], &[1.0, 1.0]),
            must_rect(&[0.0, 3.0], &[1.0, 1.0]),
            must_rect(&[-50.0, -50.0], &[1.0, 1.0]),
        ]);

        let (left, right) = tree.split_node(root, 2);
        assert_eq!(tree.node(left).entries.len(), 3);
        assert_eq!(tree.node(right).entries.len(), 2);
    }

    #[test]
    fn assign_group_least_enlargement() {
        let left_bb = must_rect(&[0.0, 0.0], &[1.0, 2.0]);
        let right_bb = must_rect(&[1.0, 0.0], &[1.0, 2.0]);
        let e = must_rect(&[0.0, 2.0], &[1.0, 1.0]);
        assert_eq!(assign_group(&e, &left_bb, &right_bb, 2, 2), Side::Left);
    }

    #[test]
    fn assign_group_smaller_area() {
        let left_bb = must_rect(&[0.0, 0.0], &[1.0, 2.0]);
        let right_bb = must_rect(&[1.0, 2.0], &[1.0, 1.0]);
        let e = must_rect(&[0.0, 2.0], &[1.0, 1.0]);
        assert_eq!(assign_group(&e, &left_bb, &right_bb, 2, 1), Side::Right);
    }

    #[test]
    fn assign_group_fewer_entries() {
        let left_bb = must_rect(&[0.0, 0.0], &[1.0, 2.0]);
        let right_bb = must_rect(&[1.0, 2.0], &[2.0, 1.0]);
        let e = must_rect(&[0.0, 2.0], &[1.0, 1.0]);
        assert_eq!(assign_group(&e, &left_bb, &right_bb, 1, 2), Side::Left);
    }
}
