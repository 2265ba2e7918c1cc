use crate::geom::Rect;
use crate::rtree::filter::{apply_filters, Filter, LimitFilter};
use crate::rtree::node::{Entry, NodeId};
use crate::rtree::{RTree, Spatial};

impl<T: Spatial> RTree<T> {
    /// All objects whose bounding box has a non-empty intersection with
    /// `bb`, in traversal order. Boxes that merely touch the query on a
    /// boundary are not reported, matching
    /// [`Rect::intersection`][crate::Rect::intersection] returning `None`
    /// for touching-only contact.
    pub fn search_intersect(&self, bb: &Rect) -> Vec<&T> {
        self.search_intersect_with_filters(bb, &[])
    }

    /// Like [`search_intersect`][Self::search_intersect], but each candidate
    /// is passed through `filters` first: refused candidates are skipped, and
    /// an aborting filter ends the walk with the results accumulated so far.
    pub fn search_intersect_with_filters(
        &self,
        bb: &Rect,
        filters: &[&dyn Filter<T>],
    ) -> Vec<&T> {
        assert_eq!(
            bb.dim(),
            self.dim,
            "query box has dimension {} but the tree indexes dimension {}",
            bb.dim(),
            self.dim
        );
        let mut results = Vec::new();
        self.search_node(self.root, bb, filters, &mut results);
        results
    }

    /// Intersection search capped at `limit` results. `None` means unlimited
    /// and `Some(0)` returns empty without inspecting any entry.
    pub fn search_intersect_with_limit(
        &self,
        limit: Option<usize>,
        bb: &Rect,
        filters: &[&dyn Filter<T>],
    ) -> Vec<&T> {
        match limit {
            None => self.search_intersect_with_filters(bb, filters),
            Some(0) => Vec::new(),
            Some(k) => {
                let limit = LimitFilter::new(k);
                let mut filters: Vec<&dyn Filter<T>> = filters.to_vec();
                filters.push(&limit);
                self.search_intersect_with_filters(bb, &filters)
            }
        }
    }

    /// Returns true when an aborting filter ended the walk.
    fn search_node<'a>(
        &'a self,
        id: NodeId,
        bb: &Rect,
        filters: &[&dyn Filter<T>],
        results: &mut Vec<&'a T>,
    ) -> bool {
        for e in &self.node(id).entries {
            if !e.bb().intersects(bb) {
                continue;
            }
            match e {
                Entry::Child { child, .. } => {
                    if self.search_node(*child, bb, filters, results) {
                        return true;
                    }
                }
                Entry::Object { obj, .. } => {
                    let (refuse, abort) = apply_filters(results, obj, filters);
                    if !refuse {
                        results.push(obj);
                    }
                    if abort {
                        return true;
                    }
                }
            }
        }
        false
    }
}
