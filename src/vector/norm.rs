//! Norm Kernels
//!
//! Slice-level norm, distance and dot product computations.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Vector norm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Norm {
    /// Sum of absolute values
    L1,
    /// Euclidean length
    L2,
    /// Maximum absolute value
    Chebyshev,
}

impl Norm {
    pub const ALL: [Norm; 3] = [Norm::L1, Norm::L2, Norm::Chebyshev];
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Norm::L1 => write!(f, "l1"),
            Norm::L2 => write!(f, "l2"),
            Norm::Chebyshev => write!(f, "chebyshev"),
        }
    }
}

impl FromStr for Norm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l1" | "first" | "manhattan" => Ok(Norm::L1),
            "l2" | "second" | "euclidean" => Ok(Norm::L2),
            "chebyshev" | "max" | "inf" => Ok(Norm::Chebyshev),
            other => Err(Error::InvalidArgument(format!("unsupported norm: {}", other))),
        }
    }
}

/// Compute the norm of `values`. The result may overflow to infinity.
#[inline]
pub fn norm_of(values: &[f64], kind: Norm) -> f64 {
    fold_norm(values.iter().copied(), kind)
}

/// Compute the norm of `a - b` without materializing the difference
#[inline]
pub fn distance(a: &[f64], b: &[f64], kind: Norm) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    fold_norm(a.iter().zip(b.iter()).map(|(x, y)| x - y), kind)
}

/// Compute dot product of two slices
#[inline]
pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn fold_norm(values: impl Iterator<Item = f64>, kind: Norm) -> f64 {
    match kind {
        Norm::L1 => values.map(f64::abs).sum(),
        Norm::L2 => values.map(|x| x * x).sum::<f64>().sqrt(),
        Norm::Chebyshev => values.fold(0.0, |acc, x| acc.max(x.abs())),
    }
}
