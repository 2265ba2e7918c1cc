use std::fmt;

use crate::error::{Result, SpatialTreeError};
use crate::geom::Point;

/// A closed axis-aligned box `[lo_1, hi_1] x ... x [lo_n, hi_n]`.
///
/// `lo[i] <= hi[i]` holds in every dimension; [`Rect::new`] enforces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    lo: Point,
    hi: Point,
}

impl Rect {
    /// Construct a rectangle from its most-negative corner and the length of
    /// each side. Every length must be positive.
    pub fn new(lo: Point, lengths: &[f64]) -> Result<Rect> {
        if lo.dim() != lengths.len() {
            return Err(SpatialTreeError::DimensionMismatch {
                expected: lo.dim(),
                actual: lengths.len(),
            });
        }
        let mut hi = Vec::with_capacity(lo.dim());
        for (i, &len) in lengths.iter().enumerate() {
            if len <= 0.0 {
                return Err(SpatialTreeError::ImproperDistance(len));
            }
            hi.push(lo[i] + len);
        }
        Ok(Rect {
            lo,
            hi: Point::new(hi),
        })
    }

    /// Internal constructor for rectangles already known to be well-formed.
    pub(crate) fn from_points(lo: Point, hi: Point) -> Rect {
        debug_assert_eq!(lo.dim(), hi.dim());
        debug_assert!(lo.coords().iter().zip(hi.coords()).all(|(a, b)| a <= b));
        Rect { lo, hi }
    }

    /// The most-negative corner.
    pub fn lo(&self) -> &Point {
        &self.lo
    }

    /// The most-positive corner.
    pub fn hi(&self) -> &Point {
        &self.hi
    }

    /// The number of dimensions of this rectangle.
    pub fn dim(&self) -> usize {
        self.lo.dim()
    }

    /// The measure of the rectangle: the product of its side lengths.
    pub fn size(&self) -> f64 {
        self.lo
            .coords()
            .iter()
            .zip(self.hi.coords())
            .map(|(a, b)| b - a)
            .product()
    }

    /// The sum of the edge lengths. An n-dimensional rectangle has `2^(n-1)`
    /// edges per axis, so this is `2^(n-1) * sum(hi[i] - lo[i])`.
    pub fn margin(&self) -> f64 {
        let sum: f64 = self
            .lo
            .coords()
            .iter()
            .zip(self.hi.coords())
            .map(|(a, b)| b - a)
            .sum();
        2.0_f64.powi(self.dim() as i32 - 1) * sum
    }

    /// Whether `p` lies inside or on the boundary of this rectangle.
    pub fn contains_point(&self, p: &Point) -> bool {
        debug_assert_eq!(self.dim(), p.dim());
        p.coords()
            .iter()
            .enumerate()
            .all(|(i, &c)| self.lo[i] <= c && c <= self.hi[i])
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        debug_assert_eq!(self.dim(), other.dim());
        (0..self.dim()).all(|i| self.lo[i] <= other.lo[i] && other.hi[i] <= self.hi[i])
    }

    /// Whether two rectangles have a common point. Rectangles that merely
    /// touch on a boundary overlap (closed intersection).
    pub fn overlaps(&self, other: &Rect) -> bool {
        debug_assert_eq!(self.dim(), other.dim());
        (0..self.dim()).all(|i| other.lo[i] <= self.hi[i] && self.lo[i] <= other.hi[i])
    }

    /// Whether two rectangles share interior: their intersection is
    /// non-empty and non-degenerate. Unlike [`overlaps`][Self::overlaps],
    /// touching-only contact does not count. Range search skips entries by
    /// this predicate, consistent with [`intersection`][Self::intersection]
    /// returning `None`.
    pub(crate) fn intersects(&self, other: &Rect) -> bool {
        debug_assert_eq!(self.dim(), other.dim());
        (0..self.dim()).all(|i| other.lo[i] < self.hi[i] && self.lo[i] < other.hi[i])
    }

    /// The intersection of two rectangles, or `None` when they are disjoint.
    /// A touching-only contact (a shared face or corner with no interior in
    /// common) also yields `None`.
    pub fn intersection(&self, other: &Rect) -> Result<Option<Rect>> {
        if self.dim() != other.dim() {
            return Err(SpatialTreeError::DimensionMismatch {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        let mut lo = Vec::with_capacity(self.dim());
        let mut hi = Vec::with_capacity(self.dim());
        for i in 0..self.dim() {
            let a = self.lo[i].max(other.lo[i]);
            let b = self.hi[i].min(other.hi[i]);
            if a >= b {
                return Ok(None);
            }
            lo.push(a);
            hi.push(b);
        }
        Ok(Some(Rect::from_points(Point::new(lo), Point::new(hi))))
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn bounding_box(&self, other: &Rect) -> Result<Rect> {
        if self.dim() != other.dim() {
            return Err(SpatialTreeError::DimensionMismatch {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        Ok(self.union(other))
    }

    /// The smallest rectangle containing every rectangle in `rects`.
    pub fn bounding_box_n<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Result<Rect> {
        let mut iter = rects.into_iter();
        let first = iter.next().expect("bounding_box_n of no rectangles");
        let mut bb = first.clone();
        for r in iter {
            bb = bb.bounding_box(r)?;
        }
        Ok(bb)
    }

    /// Infallible union for rectangles the tree already knows to agree in
    /// dimension.
    pub(crate) fn union(&self, other: &Rect) -> Rect {
        debug_assert_eq!(self.dim(), other.dim());
        let lo = (0..self.dim())
            .map(|i| self.lo[i].min(other.lo[i]))
            .collect();
        let hi = (0..self.dim())
            .map(|i| self.hi[i].max(other.hi[i]))
            .collect();
        Rect::from_points(Point::new(lo), Point::new(hi))
    }

    /// Grow this rectangle in place to cover `other`.
    pub(crate) fn expand(&mut self, other: &Rect) {
        *self = self.union(other);
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.dim() {
            if i > 0 {
                write!(f, "x")?;
            }
            write!(f, "[{:.2}, {:.2}]", self.lo[i], self.hi[i])?;
        }
        Ok(())
    }
}
