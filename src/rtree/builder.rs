use crate::geom::Rect;
use crate::rtree::constants::{DEFAULT_MAX_CHILDREN, DEFAULT_MIN_CHILDREN};
use crate::rtree::node::{Entry, Node, NodeId};
use crate::rtree::{RTree, Spatial};

impl<T: Spatial> RTree<T> {
    /// Build a tree from a batch of objects with the default branching
    /// factors, using the Overlap-Minimizing Top-down (OMT) bulk-loading
    /// algorithm. `O(n log n)`, and considerably better packed than inserting
    /// the objects one by one.
    pub fn bulk_load(dim: usize, objects: Vec<T>) -> Self {
        Self::bulk_load_with_params(dim, DEFAULT_MIN_CHILDREN, DEFAULT_MAX_CHILDREN, objects)
    }

    /// OMT bulk load with explicit branching factors.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`RTree::new`], or when any
    /// object's bounds do not match `dim`.
    pub fn bulk_load_with_params(
        dim: usize,
        min_children: usize,
        max_children: usize,
        objects: Vec<T>,
    ) -> Self {
        let mut tree = Self::new(dim, min_children, max_children);
        if objects.is_empty() {
            return tree;
        }

        let items: Vec<(Rect, T)> = objects
            .into_iter()
            .map(|obj| {
                let bb = obj.bounds();
                assert_eq!(
                    bb.dim(),
                    dim,
                    "object bounds have dimension {} but the tree indexes dimension {}",
                    bb.dim(),
                    dim
                );
                (bb, obj)
            })
            .collect();

        tree.size = items.len();
        let height = tree_height(items.len(), max_children);

        tree.nodes.remove(tree.root.0);
        let root = tree.omt(height, items);
        tree.height = tree.node(root).level;
        tree.root = root;
        tree
    }

    /// Build a subtree of exactly height `h` over `items`, sorting by the
    /// box center along an axis that rotates with the recursion level and
    /// cutting the batch into contiguous slabs, one per child.
    fn omt(&mut self, h: usize, mut items: Vec<(Rect, T)>) -> NodeId {
        let n = items.len();
        if h == 1 {
            debug_assert!(n <= self.max_children);
            let entries = items
                .into_iter()
                .map(|(bb, obj)| Entry::Object { bb, obj })
                .collect();
            return self.alloc(Node {
                parent: None,
                level: 1,
                entries,
            });
        }

        let axis = (h - 1) % self.dim;
        // sort the whole batch by center along this level's axis
        items.sort_by(|(a, _), (b, _)| {
            let ca = a.lo()[axis] + a.hi()[axis];
            let cb = b.lo()[axis] + b.hi()[axis];
            ca.partial_cmp(&cb).unwrap()
        });

        // number of slabs: the leaf count's h-th root, raised where needed so
        // no slab outgrows the capacity of an (h-1)-high subtree
        let leaves = n.div_ceil(self.max_children);
        let capacity = self.max_children.pow(h as u32 - 1);
        let slabs = ((leaves as f64).powf(1.0 / h as f64).ceil() as usize).max(n.div_ceil(capacity));
        let slab_size = n.div_ceil(slabs);

        let mut children = Vec::with_capacity(slabs);
        while !items.is_empty() {
            let rest = items.split_off(items.len().min(slab_size));
            let slab = std::mem::replace(&mut items, rest);
            children.push(self.omt(h - 1, slab));
        }

        let level = self.node(children[0]).level + 1;
        debug_assert!(children.iter().all(|c| self.node(*c).level + 1 == level));

        let entries = children
            .iter()
            .map(|&child| Entry::Child {
                bb: self.node(child).compute_bounding_box(),
                child,
            })
            .collect();
        let id = self.alloc(Node {
            parent: None,
            level,
            entries,
        });
        for child in children {
            self.node_mut(child).parent = Some(id);
        }
        id
    }
}

/// Height of an OMT tree over `n` objects: `max(1, ceil(log_max(n)))`,
/// computed in integers so capacity boundaries land exactly.
fn tree_height(n: usize, max_children: usize) -> usize {
    let mut h = 1;
    let mut capacity = max_children;
    while capacity < n {
        h += 1;
        capacity = capacity.saturating_mul(max_children);
    }
    h
}
