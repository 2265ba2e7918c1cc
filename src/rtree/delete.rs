use crate::geom::Rect;
use crate::rtree::node::{Entry, NodeId};
use crate::rtree::{RTree, Spatial};

impl<T: Spatial> RTree<T> {
    /// Remove an object from the tree, comparing by equality. Returns `false`
    /// when no equal object is indexed. Of several equal objects, the first
    /// match in depth-first order is removed.
    ///
    /// Implemented per section 3.3 of Guttman, "R-trees: A Dynamic Index
    /// Structure for Spatial Searching" (SIGMOD 1984).
    pub fn delete(&mut self, obj: &T) -> bool
    where
        T: PartialEq,
    {
        self.delete_with_comparator(obj, |a, b| a == b)
    }

    /// Remove the first object (in depth-first order) for which
    /// `cmp(indexed, obj)` holds, so callers can delete by logical identity.
    /// Returns `false` when nothing matches.
    ///
    /// # Panics
    ///
    /// Panics if the object's bounds do not match the tree's dimensionality.
    pub fn delete_with_comparator(&mut self, obj: &T, cmp: impl Fn(&T, &T) -> bool) -> bool {
        let bounds = obj.bounds();
        assert_eq!(
            bounds.dim(),
            self.dim,
            "object bounds have dimension {} but the tree indexes dimension {}",
            bounds.dim(),
            self.dim
        );

        let Some(leaf) = self.find_leaf(self.root, &bounds, obj, &cmp) else {
            return false;
        };

        let idx = self
            .node(leaf)
            .entries
            .iter()
            .position(|e| matches!(e.object(), Some(o) if cmp(o, obj)))
            .expect("find_leaf returned a leaf without a match");
        self.node_mut(leaf).entries.remove(idx);
        self.size -= 1;

        self.condense_tree(leaf);

        let root = self.root;
        if !self.node(root).is_leaf() {
            match self.node(root).entries.len() {
                // the last object is gone; restart from an empty leaf root
                0 => {
                    self.node_mut(root).level = 1;
                    self.height = 1;
                }
                // a root left with a single child is replaced by it
                1 => {
                    let child = self.node(root).entries[0]
                        .child()
                        .expect("non-leaf root holds an object entry");
                    self.nodes.remove(root.0);
                    self.node_mut(child).parent = None;
                    self.root = child;
                    self.height -= 1;
                }
                _ => {}
            }
        }

        true
    }

    /// Depth-first descent through subtrees whose box contains `bounds`,
    /// returning the first leaf holding a comparator match.
    pub(super) fn find_leaf(
        &self,
        id: NodeId,
        bounds: &Rect,
        obj: &T,
        cmp: &impl Fn(&T, &T) -> bool,
    ) -> Option<NodeId> {
        let node = self.node(id);
        if node.is_leaf() {
            let matched = node
                .entries
                .iter()
                .any(|e| matches!(e.object(), Some(o) if cmp(o, obj)));
            return matched.then_some(id);
        }
        for e in &node.entries {
            if e.bb().contains_rect(bounds) {
                let child = e.child().expect("non-leaf node holds an object entry");
                if let Some(leaf) = self.find_leaf(child, bounds, obj, cmp) {
                    return Some(leaf);
                }
            }
        }
        None
    }

    /// Walk from `id` to the root, detaching nodes that underflowed and
    /// refreshing the MBRs of those that did not. Detached subtrees that
    /// still hold entries are reinserted afterwards at the level they came
    /// from, which keeps the tree height-balanced.
    pub(super) fn condense_tree(&mut self, mut id: NodeId) {
        let mut orphans = Vec::new();

        while id != self.root {
            let parent = self.node(id).parent.expect("non-root node has no parent");
            if self.node(id).entries.len() < self.min_children {
                let idx = self.child_entry_index(parent, id);
                self.node_mut(parent).entries.remove(idx);
                if self.node(id).entries.is_empty() {
                    self.nodes.remove(id.0);
                } else {
                    orphans.push(id);
                }
            } else {
                self.refresh_child_entry(parent, id);
            }
            id = parent;
        }

        // Highest subtrees first, so lower orphans always find a descent
        // path. When the walk stripped the root bare, the tallest orphan
        // simply takes its place.
        for orphan in orphans.into_iter().rev() {
            if self.node(self.root).entries.is_empty() {
                let old = self.root;
                self.nodes.remove(old.0);
                self.node_mut(orphan).parent = None;
                self.root = orphan;
                self.height = self.node(orphan).level;
                continue;
            }
            let bb = self.node(orphan).compute_bounding_box();
            let level = self.node(orphan).level;
            self.insert_entry(Entry::Child { bb, child: orphan }, level + 1);
        }
    }
}
