use crate::geom::Rect;

/// Key of a node in the tree's slab arena.
///
/// Child entries own the `NodeId` of their subtree; `Node::parent` is a plain
/// back-reference, so the owning edges run strictly downward and the arena
/// never forms an ownership cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) usize);

/// One slot of a node: a bounding box plus either a child subtree or an
/// indexed object.
#[derive(Debug, Clone)]
pub(crate) enum Entry<T> {
    Child { bb: Rect, child: NodeId },
    Object { bb: Rect, obj: T },
}

impl<T> Entry<T> {
    pub(crate) fn bb(&self) -> &Rect {
        match self {
            Entry::Child { bb, .. } | Entry::Object { bb, .. } => bb,
        }
    }

    pub(crate) fn child(&self) -> Option<NodeId> {
        match self {
            Entry::Child { child, .. } => Some(*child),
            Entry::Object { .. } => None,
        }
    }

    pub(crate) fn object(&self) -> Option<&T> {
        match self {
            Entry::Object { obj, .. } => Some(obj),
            Entry::Child { .. } => None,
        }
    }
}

/// An in-memory tree node. Leaves sit at level 1; levels increase toward the
/// root.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) level: usize,
    pub(crate) entries: Vec<Entry<T>>,
}

impl<T> Node<T> {
    pub(crate) fn is_leaf(&self) -> bool {
        self.level == 1
    }

    /// The MBR of all entries in this node. Nodes are never left empty except
    /// for an empty tree's root, which callers handle before asking.
    pub(crate) fn compute_bounding_box(&self) -> Rect {
        let mut entries = self.entries.iter();
        let first = entries
            .next()
            .expect("bounding box of an empty node")
            .bb()
            .clone();
        entries.fold(first, |mut bb, e| {
            bb.expand(e.bb());
            bb
        })
    }
}
