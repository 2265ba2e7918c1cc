//! Utilities to walk the tree structure.

use crate::geom::Rect;
use crate::rtree::node::{Entry, NodeId};
use crate::rtree::{RTree, Spatial};

impl<T: Spatial> RTree<T> {
    /// Iterate over every indexed object in depth-first order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: self,
            stack: vec![(self.root, 0)],
        }
    }

    /// The bounding boxes of every child entry in the tree, depth-first: a
    /// snapshot of the internal structure for debugging and visualization.
    /// Object boxes are not included.
    pub fn all_bounding_boxes(&self) -> Vec<Rect> {
        let mut boxes = Vec::new();
        self.collect_bounding_boxes(self.root, &mut boxes);
        boxes
    }

    fn collect_bounding_boxes(&self, id: NodeId, boxes: &mut Vec<Rect>) {
        for e in &self.node(id).entries {
            if let Entry::Child { bb, child } = e {
                boxes.push(bb.clone());
                self.collect_bounding_boxes(*child, boxes);
            }
        }
    }
}

/// Depth-first iterator over the objects of an [`RTree`].
pub struct Iter<'a, T: Spatial> {
    tree: &'a RTree<T>,
    /// nodes on the path to the cursor, each with the entry index to resume at
    stack: Vec<(NodeId, usize)>,
}

impl<'a, T: Spatial> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while let Some((id, idx)) = self.stack.pop() {
            let node = self.tree.node(id);
            let Some(e) = node.entries.get(idx) else {
                continue;
            };
            self.stack.push((id, idx + 1));
            match e {
                Entry::Object { obj, .. } => return Some(obj),
                Entry::Child { child, .. } => self.stack.push((*child, 0)),
            }
        }
        None
    }
}
