//! Set Algebra
//!
//! Intersection, union, difference and comparisons of vector sets.
//!
//! Membership is tolerance based: an element of one set belongs to the other
//! when the other holds some element strictly closer than `tolerance` under
//! the chosen norm. Results are new sets built by deduplicating insertion,
//! visiting `op1` before `op2`, each in storage order. A set that has never
//! received an insert is compatible with any dimension.

use super::store::Set;
use crate::error::{Error, Result};
use crate::vector::Norm;

impl Set {
    /// Elements of `op1` that also belong to `op2`
    pub fn intersection(op1: &Set, op2: &Set, norm: Norm, tolerance: f64) -> Result<Set> {
        Self::combine(op1, op2, tolerance, |out, op1, op2| {
            out.extend_where(op1, norm, tolerance, |e| op2.matches(e, norm, tolerance))
        })
    }

    /// Elements of either set
    pub fn union(op1: &Set, op2: &Set, norm: Norm, tolerance: f64) -> Result<Set> {
        Self::combine(op1, op2, tolerance, |out, op1, op2| {
            out.extend_where(op1, norm, tolerance, |_| true)?;
            out.extend_where(op2, norm, tolerance, |_| true)
        })
    }

    /// Elements of `op1` that do not belong to `op2`
    pub fn difference(op1: &Set, op2: &Set, norm: Norm, tolerance: f64) -> Result<Set> {
        Self::combine(op1, op2, tolerance, |out, op1, op2| {
            out.extend_where(op1, norm, tolerance, |e| !op2.matches(e, norm, tolerance))
        })
    }

    /// Elements belonging to exactly one of the sets
    pub fn symmetric_difference(
        op1: &Set,
        op2: &Set,
        norm: Norm,
        tolerance: f64,
    ) -> Result<Set> {
        Self::combine(op1, op2, tolerance, |out, op1, op2| {
            out.extend_where(op1, norm, tolerance, |e| !op2.matches(e, norm, tolerance))?;
            out.extend_where(op2, norm, tolerance, |e| !op1.matches(e, norm, tolerance))
        })
    }

    /// Whether each set is a subset of the other
    pub fn equals(op1: &Set, op2: &Set, norm: Norm, tolerance: f64) -> bool {
        Self::is_subset(op1, op2, norm, tolerance) && Self::is_subset(op2, op1, norm, tolerance)
    }

    /// Whether every element of `op1` belongs to `op2`.
    ///
    /// Sets of different dimensions are never subsets of one another.
    pub fn is_subset(op1: &Set, op2: &Set, norm: Norm, tolerance: f64) -> bool {
        if Self::check_compatible(op1, op2).is_err() {
            return false;
        }
        op1.iter().all(|e| op2.matches(e, norm, tolerance))
    }

    fn combine<F>(op1: &Set, op2: &Set, tolerance: f64, build: F) -> Result<Set>
    where
        F: FnOnce(&mut Set, &Set, &Set) -> Result<()>,
    {
        if let Err(err) = Self::check_compatible(op1, op2) {
            return op1.fail(err);
        }
        if tolerance.is_nan() {
            return op1.fail(Error::InvalidArgument("tolerance is NaN".to_string()));
        }
        let mut out = Set::with_config(*op1.config(), op1.logger().clone());
        if let Err(err) = build(&mut out, op1, op2) {
            return op1.fail(err);
        }
        Ok(out)
    }

    fn extend_where<P>(&mut self, source: &Set, norm: Norm, tolerance: f64, keep: P) -> Result<()>
    where
        P: Fn(&[f64]) -> bool,
    {
        for element in source.iter().filter(|e| keep(*e)) {
            self.insert_values(element, norm, tolerance)?;
        }
        Ok(())
    }

    fn check_compatible(op1: &Set, op2: &Set) -> Result<()> {
        match (op1.dim(), op2.dim()) {
            (Some(expected), Some(actual)) if expected != actual => {
                Err(Error::MismatchingDimensions { expected, actual })
            }
            _ => Ok(()),
        }
    }
}
