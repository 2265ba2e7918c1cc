//! In-memory R-trees: height-balanced spatial indexes over axis-aligned
//! bounding boxes in n dimensions, supporting incremental insertion and
//! deletion, bulk loading, range queries and (k-)nearest-neighbor search.
//!
//! Insertion and node splitting follow Guttman's quadratic algorithm
//! (SIGMOD 1984), nearest-neighbor search is the Roussopoulos et al.
//! branch-and-bound, and batch construction uses the Overlap-Minimizing
//! Top-down (OMT) bulk loader.
//!
//! ```
//! use spatial_tree::{Point, RTree, Rect};
//!
//! let rects = vec![
//!     Rect::new(Point::new(vec![0.0, 0.0]), &[2.0, 1.0]).unwrap(),
//!     Rect::new(Point::new(vec![5.0, 4.0]), &[1.0, 2.0]).unwrap(),
//! ];
//! let tree = RTree::bulk_load_with_params(2, 2, 4, rects);
//!
//! let nearest = tree.nearest_neighbor(&Point::new(vec![1.0, 1.0])).unwrap();
//! assert_eq!(nearest.lo().coords(), &[0.0, 0.0]);
//! ```

pub mod error;
pub mod geom;
pub mod rtree;

pub use error::{Result, SpatialTreeError};
pub use geom::{Point, Rect};
pub use rtree::{Filter, LimitFilter, RTree, Spatial};

#[cfg(test)]
pub(crate) mod test;
