//! A dynamic R-tree supporting insertion, deletion and OMT bulk loading.

mod builder;
mod constants;
mod delete;
mod filter;
mod index;
mod insert;
mod neighbors;
pub(crate) mod node;
mod search;
mod split;
mod r#trait;
mod traversal;

pub use constants::{DEFAULT_MAX_CHILDREN, DEFAULT_MIN_CHILDREN};
pub use filter::{Filter, LimitFilter};
pub use index::RTree;
pub use r#trait::Spatial;
pub use traversal::Iter;
