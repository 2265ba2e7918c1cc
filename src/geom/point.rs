use std::ops::Index;

use crate::error::{Result, SpatialTreeError};
use crate::geom::Rect;

/// A point in n-dimensional Euclidean space.
#[derive(Debug, Clone, PartialEq)]
pub struct Point(Vec<f64>);

impl Point {
    pub fn new(coords: Vec<f64>) -> Self {
        Self(coords)
    }

    /// The number of dimensions of this point.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    /// The Euclidean distance between `self` and `other`.
    pub fn dist(&self, other: &Point) -> Result<f64> {
        if self.dim() != other.dim() {
            return Err(SpatialTreeError::DimensionMismatch {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        let sum: f64 = self
            .0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        Ok(sum.sqrt())
    }

    /// The squared distance from this point to the closest point of `r`,
    /// or 0 if the point lies inside `r`.
    pub fn min_dist(&self, r: &Rect) -> f64 {
        debug_assert_eq!(self.dim(), r.dim());
        let mut sum = 0.0;
        for (i, &p) in self.0.iter().enumerate() {
            if p < r.lo()[i] {
                let d = p - r.lo()[i];
                sum += d * d;
            } else if p > r.hi()[i] {
                let d = p - r.hi()[i];
                sum += d * d;
            }
        }
        sum
    }

    /// The Roussopoulos min-max distance from this point to `r`: an upper
    /// bound (squared) on the distance to the nearest object guaranteed to
    /// lie somewhere inside `r`. Used strictly for pruning.
    pub fn min_max_dist(&self, r: &Rect) -> f64 {
        debug_assert_eq!(self.dim(), r.dim());

        // minMaxDist(p, r) = min over k of
        //   (p[k] - rm[k])^2 + sum over i != k of (p[i] - rM[i])^2
        // where rm is the nearer and rM the farther face in each dimension.
        // Computable in linear time by precomputing S = sum (p[i] - rM[i])^2.
        let nearer = |i: usize| {
            if self.0[i] <= (r.lo()[i] + r.hi()[i]) / 2.0 {
                r.lo()[i]
            } else {
                r.hi()[i]
            }
        };
        let farther = |i: usize| {
            if self.0[i] >= (r.lo()[i] + r.hi()[i]) / 2.0 {
                r.lo()[i]
            } else {
                r.hi()[i]
            }
        };

        let s: f64 = (0..self.dim())
            .map(|i| {
                let d = self.0[i] - farther(i);
                d * d
            })
            .sum();

        let mut min = f64::INFINITY;
        for k in 0..self.dim() {
            let dm = self.0[k] - nearer(k);
            let df = self.0[k] - farther(k);
            let d = s - df * df + dm * dm;
            if d < min {
                min = d;
            }
        }
        min
    }

    /// A rectangle centered on this point with side lengths `2 * tol`.
    ///
    /// Unlike [`Rect::new`] this admits `tol == 0`, producing a degenerate
    /// rectangle useful for point queries.
    pub fn to_rect(&self, tol: f64) -> Rect {
        let lo = self.0.iter().map(|c| c - tol).collect();
        let hi = self.0.iter().map(|c| c + tol).collect();
        Rect::from_points(Point(lo), Point(hi))
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Self(coords)
    }
}

impl From<&[f64]> for Point {
    fn from(coords: &[f64]) -> Self {
        Self(coords.to_vec())
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}
