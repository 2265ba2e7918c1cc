use crate::geom::Rect;
use crate::rtree::node::{Entry, Node, NodeId};
use crate::rtree::{RTree, Spatial};

impl<T: Spatial> RTree<T> {
    /// Insert a spatial object into the tree, rebalancing automatically if a
    /// node overflows.
    ///
    /// Implemented per section 3.2 of Guttman, "R-trees: A Dynamic Index
    /// Structure for Spatial Searching" (SIGMOD 1984).
    ///
    /// # Panics
    ///
    /// Panics if the object's bounds do not match the tree's dimensionality.
    pub fn insert(&mut self, obj: T) {
        let bb = obj.bounds();
        assert_eq!(
            bb.dim(),
            self.dim,
            "object bounds have dimension {} but the tree indexes dimension {}",
            bb.dim(),
            self.dim
        );
        self.insert_entry(Entry::Object { bb, obj }, 1);
        self.size += 1;
    }

    /// Insert `e` at `level`. New objects enter at level 1; subtrees orphaned
    /// by deletion re-enter at the level they previously occupied.
    pub(super) fn insert_entry(&mut self, e: Entry<T>, level: usize) {
        let target = self.choose_node(self.root, e.bb(), level);
        self.attach(target, e);

        let split = if self.node(target).entries.len() > self.max_children {
            let (_, right) = self.split_node(target, self.min_children);
            Some(right)
        } else {
            None
        };

        let (old_root, split_root) = self.adjust_tree(target, split);
        if let Some(split_root) = split_root {
            self.grow_root(old_root, split_root);
        }
    }

    /// Descend from `id` to the node that should receive an entry with
    /// bounding box `bb`: the node at `level`, or the leaf if none is. Each
    /// step follows the child needing the least enlargement, breaking ties by
    /// smaller current area and then by first match.
    pub(super) fn choose_node(&self, id: NodeId, bb: &Rect, level: usize) -> NodeId {
        let node = self.node(id);
        if node.is_leaf() || node.level == level {
            return id;
        }

        let mut chosen = 0;
        let mut min_enlargement = f64::INFINITY;
        let mut chosen_size = f64::INFINITY;
        for (i, e) in node.entries.iter().enumerate() {
            let size = e.bb().size();
            let enlargement = e.bb().union(bb).size() - size;
            if enlargement < min_enlargement
                || (enlargement == min_enlargement && size < chosen_size)
            {
                chosen = i;
                min_enlargement = enlargement;
                chosen_size = size;
            }
        }

        let child = node.entries[chosen]
            .child()
            .expect("non-leaf node holds an object entry");
        self.choose_node(child, bb, level)
    }

    /// Propagate a mutation of `n` (and its split sibling `nn`, if any)
    /// upward: refresh MBRs along the path and split ancestors that overflow.
    /// Root handling is left to the caller, which receives the surviving pair.
    fn adjust_tree(&mut self, n: NodeId, nn: Option<NodeId>) -> (NodeId, Option<NodeId>) {
        if n == self.root {
            return (n, nn);
        }
        let parent = self.node(n).parent.expect("non-root node has no parent");

        // account for lower-level changes to n
        self.refresh_child_entry(parent, n);

        if let Some(nn) = nn {
            // n was reused as the left half of a split; its new sibling still
            // needs an entry in the parent.
            let bb = self.node(nn).compute_bounding_box();
            self.attach(parent, Entry::Child { bb, child: nn });
            if self.node(parent).entries.len() > self.max_children {
                let (left, right) = self.split_node(parent, self.min_children);
                return self.adjust_tree(left, Some(right));
            }
        }

        self.adjust_tree(parent, None)
    }

    /// Replace the root with a new one holding the two halves of a root
    /// split, growing the tree by one level.
    fn grow_root(&mut self, old: NodeId, split: NodeId) {
        self.height += 1;
        let entries = vec![
            Entry::Child {
                bb: self.node(old).compute_bounding_box(),
                child: old,
            },
            Entry::Child {
                bb: self.node(split).compute_bounding_box(),
                child: split,
            },
        ];
        let new_root = self.alloc(Node {
            parent: None,
            level: self.height,
            entries,
        });
        self.node_mut(old).parent = Some(new_root);
        self.node_mut(split).parent = Some(new_root);
        self.root = new_root;
    }
}
