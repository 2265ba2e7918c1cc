use crate::geom::Point;
use crate::rtree::filter::{apply_filters, Filter};
use crate::rtree::node::{Entry, NodeId};
use crate::rtree::{RTree, Spatial};

impl<T: Spatial> RTree<T> {
    /// The object closest to `p` by Euclidean distance between the point and
    /// the object's bounding box, or `None` for an empty tree. Of several
    /// equally close objects the first in traversal order wins.
    ///
    /// Branch-and-bound over the Roussopoulos bounds: subtrees are visited in
    /// ascending order of their minimum possible distance, and a subtree is
    /// skipped when that minimum exceeds either the tightest min-max bound
    /// among its siblings or the best distance found so far.
    ///
    /// # Panics
    ///
    /// Panics if `p`'s dimensionality does not match the tree's.
    pub fn nearest_neighbor(&self, p: &Point) -> Option<&T> {
        assert_eq!(
            p.dim(),
            self.dim,
            "query point has dimension {} but the tree indexes dimension {}",
            p.dim(),
            self.dim
        );
        self.nearest(p, self.root, f64::INFINITY, None).0
    }

    fn nearest<'a>(
        &'a self,
        p: &Point,
        id: NodeId,
        mut best_dist: f64,
        mut best: Option<&'a T>,
    ) -> (Option<&'a T>, f64) {
        let node = self.node(id);
        if node.is_leaf() {
            for e in &node.entries {
                let dist = p.min_dist(e.bb()).sqrt();
                if dist < best_dist {
                    best_dist = dist;
                    best = e.object();
                }
            }
            return (best, best_dist);
        }

        let branches = prune_entries(p, sort_entries(p, &node.entries), &node.entries);
        for (min_dist, child) in branches {
            if min_dist > best_dist * best_dist {
                continue;
            }
            let (sub_best, sub_dist) = self.nearest(p, child, best_dist, best);
            if sub_dist < best_dist {
                best_dist = sub_dist;
                best = sub_best;
            }
        }
        (best, best_dist)
    }

    /// Up to `k` objects in nondecreasing distance from `p`. Fewer are
    /// returned when the tree holds fewer, or when a filter refuses some.
    pub fn nearest_neighbors(&self, k: usize, p: &Point) -> Vec<&T> {
        self.nearest_neighbors_with_filters(k, p, &[])
    }

    /// Like [`nearest_neighbors`][Self::nearest_neighbors], consulting
    /// `filters` for every candidate before it enters the result buffer.
    pub fn nearest_neighbors_with_filters(
        &self,
        k: usize,
        p: &Point,
        filters: &[&dyn Filter<T>],
    ) -> Vec<&T> {
        assert_eq!(
            p.dim(),
            self.dim,
            "query point has dimension {} but the tree indexes dimension {}",
            p.dim(),
            self.dim
        );
        if k == 0 {
            return Vec::new();
        }
        let mut buffer = NearestBuffer::new(k);
        self.nearest_k(p, self.root, &mut buffer, filters);
        buffer.objs
    }

    /// Returns true when an aborting filter ended the search.
    fn nearest_k<'a>(
        &'a self,
        p: &Point,
        id: NodeId,
        buffer: &mut NearestBuffer<'a, T>,
        filters: &[&dyn Filter<T>],
    ) -> bool {
        let node = self.node(id);
        if node.is_leaf() {
            for e in &node.entries {
                let dist = p.min_dist(e.bb()).sqrt();
                let Some(pos) = buffer.position(dist) else {
                    continue;
                };
                let obj = e.object().expect("leaf node holds a child entry");
                let (refuse, abort) = apply_filters(&buffer.objs, obj, filters);
                if !refuse {
                    buffer.insert(pos, dist, obj);
                }
                if abort {
                    return true;
                }
            }
            return false;
        }

        // a min-max prune is only sound for the single nearest object, so
        // the k-th buffered distance is the sole bound here
        for (min_dist, child) in sort_entries(p, &node.entries) {
            if let Some(worst) = buffer.cutoff() {
                if min_dist > worst * worst {
                    break;
                }
            }
            if self.nearest_k(p, child, buffer, filters) {
                return true;
            }
        }
        false
    }
}

/// A bounded buffer of the nearest objects seen so far, sorted by ascending
/// distance. Ties keep the earlier arrival first.
struct NearestBuffer<'a, T> {
    k: usize,
    dists: Vec<f64>,
    objs: Vec<&'a T>,
}

impl<'a, T> NearestBuffer<'a, T> {
    fn new(k: usize) -> Self {
        Self {
            k,
            dists: Vec::with_capacity(k),
            objs: Vec::with_capacity(k),
        }
    }

    /// Where an object at `dist` would be inserted, or `None` when the buffer
    /// is already full of closer objects.
    fn position(&self, dist: f64) -> Option<usize> {
        let pos = self.dists.partition_point(|d| *d <= dist);
        (pos < self.k).then_some(pos)
    }

    fn insert(&mut self, pos: usize, dist: f64, obj: &'a T) {
        self.dists.insert(pos, dist);
        self.objs.insert(pos, obj);
        self.dists.truncate(self.k);
        self.objs.truncate(self.k);
    }

    /// The distance a branch must beat once the buffer is full.
    fn cutoff(&self) -> Option<f64> {
        (self.dists.len() == self.k).then(|| self.dists[self.k - 1])
    }
}

/// Child entries of a node in ascending order of squared minimum distance
/// from `p`.
fn sort_entries<T>(p: &Point, entries: &[Entry<T>]) -> Vec<(f64, NodeId)> {
    let mut sorted: Vec<(f64, NodeId)> = entries
        .iter()
        .map(|e| {
            let child = e.child().expect("non-leaf node holds an object entry");
            (p.min_dist(e.bb()), child)
        })
        .collect();
    // distances are never NaN for well-formed boxes
    sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    sorted
}

/// Drop branches that cannot contain the nearest object: those whose minimum
/// distance exceeds the smallest min-max bound within the group.
fn prune_entries<T>(
    p: &Point,
    sorted: Vec<(f64, NodeId)>,
    entries: &[Entry<T>],
) -> Vec<(f64, NodeId)> {
    let min_min_max = entries
        .iter()
        .map(|e| p.min_max_dist(e.bb()))
        .fold(f64::INFINITY, f64::min);
    sorted
        .into_iter()
        .filter(|(d, _)| *d <= min_min_max)
        .collect()
}
