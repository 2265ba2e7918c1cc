use slab::Slab;

use crate::rtree::node::{Entry, Node, NodeId};
use crate::rtree::Spatial;

/// A dynamic R-tree: a height-balanced search tree indexing objects by their
/// axis-aligned bounding boxes in n-dimensional space.
///
/// Insertion and splitting follow Guttman's quadratic algorithm; deletion
/// condenses the tree with level-preserving reinsertion; nearest-neighbor
/// search is the Roussopoulos branch-and-bound.
///
/// ```
/// use spatial_tree::{Point, RTree, Rect};
///
/// let mut tree = RTree::new(2, 2, 4);
/// tree.insert(Rect::new(Point::new(vec![0.0, 0.0]), &[2.0, 1.0]).unwrap());
/// tree.insert(Rect::new(Point::new(vec![5.0, 5.0]), &[1.0, 1.0]).unwrap());
///
/// let query = Rect::new(Point::new(vec![1.0, 0.0]), &[1.0, 1.0]).unwrap();
/// assert_eq!(tree.search_intersect(&query).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RTree<T: Spatial> {
    pub(crate) dim: usize,
    pub(crate) min_children: usize,
    pub(crate) max_children: usize,
    pub(crate) nodes: Slab<Node<T>>,
    pub(crate) root: NodeId,
    pub(crate) size: usize,
    pub(crate) height: usize,
}

impl<T: Spatial> RTree<T> {
    /// Create an empty tree over `dim`-dimensional boxes with the given
    /// minimum and maximum branching factors.
    ///
    /// Guttman's analysis suggests `2 <= min_children <= max_children / 2`;
    /// any `1 <= min_children <= max_children` is accepted.
    ///
    /// # Panics
    ///
    /// Panics if `dim == 0` or the branching factors are out of order.
    pub fn new(dim: usize, min_children: usize, max_children: usize) -> Self {
        assert!(dim >= 1, "tree dimension must be at least 1");
        assert!(
            (1..=max_children).contains(&min_children),
            "branching factors must satisfy 1 <= min <= max"
        );

        let mut nodes = Slab::new();
        let root = NodeId(nodes.insert(Node {
            parent: None,
            level: 1,
            entries: Vec::new(),
        }));
        Self {
            dim,
            min_children,
            max_children,
            nodes,
            root,
            size: 0,
            height: 1,
        }
    }

    /// The number of objects currently stored in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no objects.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The level of the root. A tree holding only a root leaf has depth 1.
    pub fn depth(&self) -> usize {
        self.height
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        NodeId(self.nodes.insert(node))
    }

    /// Push `e` onto `group`, re-pointing the entry's subtree at its new
    /// parent when the entry carries one.
    pub(crate) fn attach(&mut self, group: NodeId, e: Entry<T>) {
        if let Some(child) = e.child() {
            self.node_mut(child).parent = Some(group);
        }
        self.node_mut(group).entries.push(e);
    }

    /// Index of the entry in `parent` that references `child`.
    pub(crate) fn child_entry_index(&self, parent: NodeId, child: NodeId) -> usize {
        self.node(parent)
            .entries
            .iter()
            .position(|e| e.child() == Some(child))
            .expect("parent is missing the entry for its child")
    }

    /// Replace the bounding box of `child`'s entry in `parent` with the MBR
    /// freshly computed from `child`'s entries.
    pub(crate) fn refresh_child_entry(&mut self, parent: NodeId, child: NodeId) {
        let bb = self.node(child).compute_bounding_box();
        let idx = self.child_entry_index(parent, child);
        if let Entry::Child { bb: entry_bb, .. } = &mut self.node_mut(parent).entries[idx] {
            *entry_bb = bb;
        }
    }
}

#[cfg(test)]
mod test {
    use crate::geom::Rect;
    use crate::test::must_rect;
    use crate::RTree;

    #[test]
    fn new_tree_is_an_empty_leaf() {
        let tree: RTree<Rect> = RTree::new(2, 3, 3);
        assert_eq!(tree.size(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 1);
        assert!(tree.node(tree.root).is_leaf());
    }

    #[test]
    #[should_panic]
    fn zero_dimension_is_rejected() {
        let _: RTree<Rect> = RTree::new(0, 3, 3);
    }

    #[test]
    #[should_panic]
    fn inverted_branching_factors_are_rejected() {
        let _: RTree<Rect> = RTree::new(2, 4, 3);
    }

    #[test]
    fn size_tracks_mutations() {
        let mut tree = RTree::new(2, 2, 4);
        let r = must_rect(&[0.0, 0.0], &[1.0, 1.0]);
        tree.insert(r.clone());
        tree.insert(must_rect(&[2.0, 2.0], &[1.0, 1.0]));
        assert_eq!(tree.size(), 2);
        assert!(tree.delete(&r));
        assert_eq!(tree.size(), 1);
    }
}
