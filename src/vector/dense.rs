//! Dense Vector
//!
//! Fixed-dimension vector of finite `f64` coordinates.

use std::fmt;
use std::mem;

use super::norm::{distance, dot_product, norm_of, Norm};
use crate::config::checks_enabled;
use crate::error::{Error, Result};
use crate::logging::{self, SharedLogger};

/// Fixed-dimension vector of finite doubles.
///
/// The coordinates live in a single owned allocation sized exactly to the
/// dimension. Every mutating operation either succeeds completely or leaves
/// the vector untouched, so a vector never holds NaN or infinite values.
///
/// Not synchronized: share behind a lock if several threads mutate it.
#[derive(Clone)]
pub struct Vector {
    data: Box<[f64]>,
    logger: SharedLogger,
}

impl Vector {
    /// Create a vector from its coordinates.
    ///
    /// Fails with `InvalidArgument` for an empty slice or any non-finite
    /// coordinate and with `AllocationError` when storage is unavailable.
    pub fn new(values: &[f64]) -> Result<Self> {
        Self::new_with_logger(values, logging::noop())
    }

    /// Create a vector reporting failures to `logger`
    pub fn new_with_logger(values: &[f64], logger: SharedLogger) -> Result<Self> {
        if values.is_empty() {
            let err = Error::InvalidArgument("dimension must be positive".to_string());
            logging::report(logger.as_ref(), &err, module_path!());
            return Err(err);
        }
        if checks_enabled() {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                let err = Error::InvalidArgument(format!("coordinate {} is not finite", index));
                logging::report(logger.as_ref(), &err, module_path!());
                return Err(err);
            }
        }
        let data = match alloc_from(values.iter().copied(), values.len()) {
            Ok(data) => data,
            Err(err) => {
                logging::report(logger.as_ref(), &err, module_path!());
                return Err(err);
            }
        };
        Ok(Self { data, logger })
    }

    /// Replace the logger receiving this vector's failures
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Number of coordinates
    #[inline]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Bytes held by this vector: control block plus payload
    pub fn size_allocated(&self) -> usize {
        mem::size_of::<Self>() + self.dim() * mem::size_of::<f64>()
    }

    /// Read the coordinate at `index`
    pub fn get(&self, index: usize) -> Result<f64> {
        if checks_enabled() && index >= self.dim() {
            return self.fail(Error::IndexOutOfBound {
                index,
                len: self.dim(),
            });
        }
        Ok(self.data[index])
    }

    /// Overwrite the coordinate at `index` with a finite value
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        if checks_enabled() {
            if index >= self.dim() {
                return self.fail(Error::IndexOutOfBound {
                    index,
                    len: self.dim(),
                });
            }
            if !value.is_finite() {
                return self.fail(Error::InvalidArgument(format!(
                    "coordinate value {} is not finite",
                    value
                )));
            }
        }
        self.data[index] = value;
        Ok(())
    }

    /// Multiply every coordinate by `factor`
    pub fn scale(&mut self, factor: f64) -> Result<()> {
        if checks_enabled() {
            if !factor.is_finite() {
                return self.fail(Error::InvalidArgument(format!(
                    "scale factor {} is not finite",
                    factor
                )));
            }
            if self.data.iter().any(|v| !(v * factor).is_finite()) {
                return self.fail(Error::InfinityOverflow);
            }
        }
        self.data.iter_mut().for_each(|v| *v *= factor);
        Ok(())
    }

    /// Add `other` element-wise
    pub fn increment(&mut self, other: &Vector) -> Result<()> {
        self.combine(other, |a, b| a + b)
    }

    /// Subtract `other` element-wise
    pub fn decrement(&mut self, other: &Vector) -> Result<()> {
        self.combine(other, |a, b| a - b)
    }

    fn combine(&mut self, other: &Vector, op: fn(f64, f64) -> f64) -> Result<()> {
        if checks_enabled() {
            self.check_dim(other)?;
            let overflows = self
                .data
                .iter()
                .zip(other.data.iter())
                .any(|(&a, &b)| !op(a, b).is_finite());
            if overflows {
                return self.fail(Error::InfinityOverflow);
            }
        }
        self.data
            .iter_mut()
            .zip(other.data.iter())
            .for_each(|(a, &b)| *a = op(*a, b));
        Ok(())
    }

    /// Norm of this vector, or NaN when the result is not finite
    pub fn norm(&self, kind: Norm) -> f64 {
        self.try_norm(kind).unwrap_or(f64::NAN)
    }

    /// Norm of this vector, failing with `InfinityOverflow` when not finite
    pub fn try_norm(&self, kind: Norm) -> Result<f64> {
        let value = norm_of(&self.data, kind);
        if checks_enabled() && !value.is_finite() {
            return self.fail(Error::InfinityOverflow);
        }
        Ok(value)
    }

    /// Replace every coordinate, in index order, with `f(coordinate)`.
    ///
    /// Each result must be finite; otherwise nothing is changed.
    pub fn apply_function<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64) -> f64,
    {
        if !checks_enabled() {
            self.data.iter_mut().for_each(|v| *v = f(*v));
            return Ok(());
        }

        let mapped = match alloc_from(self.data.iter().map(|&v| f(v)), self.dim()) {
            Ok(mapped) => mapped,
            Err(err) => return self.fail(err),
        };
        if let Some(index) = mapped.iter().position(|v| !v.is_finite()) {
            return self.fail(Error::InvalidArgument(format!(
                "function result at coordinate {} is not finite",
                index
            )));
        }
        self.data = mapped;
        Ok(())
    }

    /// Observe every coordinate in index order
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(f64),
    {
        self.data.iter().copied().for_each(f);
    }

    /// New vector `op1 + op2`
    pub fn add(op1: &Vector, op2: &Vector) -> Result<Vector> {
        op1.zip_with(op2, |a, b| a + b)
    }

    /// New vector `op1 - op2`
    pub fn subtract(op1: &Vector, op2: &Vector) -> Result<Vector> {
        op1.zip_with(op2, |a, b| a - b)
    }

    fn zip_with(&self, other: &Vector, op: fn(f64, f64) -> f64) -> Result<Vector> {
        if checks_enabled() {
            self.check_dim(other)?;
        }
        let values = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| op(a, b));
        let data = match alloc_from(values, self.dim()) {
            Ok(data) => data,
            Err(err) => return self.fail(err),
        };
        if checks_enabled() && data.iter().any(|v| !v.is_finite()) {
            return self.fail(Error::InfinityOverflow);
        }
        Ok(Vector {
            data,
            logger: self.logger.clone(),
        })
    }

    /// Dot product, or NaN on dimension mismatch or overflow
    pub fn dot(op1: &Vector, op2: &Vector) -> f64 {
        Self::try_dot(op1, op2).unwrap_or(f64::NAN)
    }

    /// Dot product, failing on dimension mismatch or overflow
    pub fn try_dot(op1: &Vector, op2: &Vector) -> Result<f64> {
        if checks_enabled() {
            op1.check_dim(op2)?;
        }
        let value = dot_product(&op1.data, &op2.data);
        if checks_enabled() && !value.is_finite() {
            return op1.fail(Error::InfinityOverflow);
        }
        Ok(value)
    }

    /// True when `norm(op1 - op2)` is strictly below `tolerance`.
    ///
    /// Mismatching dimensions or a non-finite difference compare unequal.
    pub fn equals(op1: &Vector, op2: &Vector, kind: Norm, tolerance: f64) -> bool {
        if op1.dim() != op2.dim() {
            return false;
        }
        let diff = distance(&op1.data, &op2.data, kind);
        diff.is_finite() && diff < tolerance
    }

    /// Overwrite `dest` with the coordinates and logger of `src`.
    ///
    /// Both vectors must occupy the same footprint, i.e. share a dimension.
    pub fn copy_instance(dest: &mut Vector, src: &Vector) -> Result<()> {
        if checks_enabled() && dest.size_allocated() != src.size_allocated() {
            return dest.fail(Error::MismatchingDimensions {
                expected: dest.dim(),
                actual: src.dim(),
            });
        }
        dest.data.copy_from_slice(&src.data);
        dest.logger = src.logger.clone();
        Ok(())
    }

    /// Copy `src` into `dest`, then release `src` and clear the handle
    pub fn move_instance(dest: &mut Vector, src: &mut Option<Vector>) -> Result<()> {
        let Some(source) = src.as_ref() else {
            return dest.fail(Error::NullPointer("source vector"));
        };
        Self::copy_instance(dest, source)?;
        *src = None;
        Ok(())
    }

    #[track_caller]
    fn check_dim(&self, other: &Vector) -> Result<()> {
        if self.dim() != other.dim() {
            return self.fail(Error::MismatchingDimensions {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        Ok(())
    }

    #[track_caller]
    fn fail<T>(&self, err: Error) -> Result<T> {
        logging::report(self.logger.as_ref(), &err, module_path!());
        Err(err)
    }
}

/// Collect `len` values into an exactly sized boxed slice
fn alloc_from(values: impl Iterator<Item = f64>, len: usize) -> Result<Box<[f64]>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::AllocationError(len))?;
    buf.extend(values.take(len));
    Ok(buf.into_boxed_slice())
}

impl AsRef<[f64]> for Vector {
    fn as_ref(&self) -> &[f64] {
        self.as_slice()
    }
}

impl TryFrom<&[f64]> for Vector {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        Vector::new(values)
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector").field("data", &self.data).finish()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(all(test, not(feature = "fast-math")))]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ReturnCode;
    use crate::logging::testing::RecordingLogger;
    use crate::logging::Level;

    fn vector(values: &[f64]) -> Vector {
        Vector::new(values).unwrap()
    }

    #[test]
    fn test_create_and_read_back() {
        let v = vector(&[1.0, -2.5, 3.25]);
        assert_eq!(v.dim(), 3);
        assert_eq!(v.as_slice(), &[1.0, -2.5, 3.25]);
        assert_eq!(v.get(1).unwrap(), -2.5);
    }

    #[test]
    fn test_create_rejects_empty_and_non_finite() {
        assert!(matches!(Vector::new(&[]), Err(Error::InvalidArgument(_))));
        assert!(Vector::new(&[f64::INFINITY, 0.0, 0.0]).is_err());
        assert!(Vector::new(&[0.0, f64::NAN]).is_err());
        assert!(Vector::new(&[0.0, f64::NEG_INFINITY]).is_err());
    }

    #[test]
    fn test_create_failure_is_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let result = Vector::new_with_logger(&[f64::NAN], logger.clone());
        assert!(result.is_err());
        assert_eq!(
            logger.records(),
            vec![(ReturnCode::InvalidArgument, Level::Warning)]
        );
    }

    #[test]
    fn test_get_set_bounds() {
        let mut v = vector(&[1.0, 2.0, 3.0]);
        assert_eq!(
            v.get(3).unwrap_err(),
            Error::IndexOutOfBound { index: 3, len: 3 }
        );
        assert!(matches!(
            v.set(5, 0.0),
            Err(Error::IndexOutOfBound { index: 5, len: 3 })
        ));

        v.set(1, 16.0).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 16.0, 3.0]);
    }

    #[test]
    fn test_set_rejects_non_finite_and_keeps_value() {
        let mut v = vector(&[1.0, 2.0]);
        assert!(matches!(v.set(0, f64::NAN), Err(Error::InvalidArgument(_))));
        assert_eq!(v.get(0).unwrap(), 1.0);
    }

    #[test]
    fn test_scale() {
        let mut v = vector(&[1.0, -2.0, 0.5]);
        v.scale(2.0).unwrap();
        assert_eq!(v.as_slice(), &[2.0, -4.0, 1.0]);
        assert!(matches!(v.scale(f64::INFINITY), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_scale_is_all_or_nothing() {
        let mut v = vector(&[1.0, f64::MAX, 2.0]);
        assert_eq!(v.scale(4.0).unwrap_err(), Error::InfinityOverflow);
        assert_eq!(v.as_slice(), &[1.0, f64::MAX, 2.0]);
    }

    #[test]
    fn test_increment_decrement() {
        let mut v = vector(&[1.0, 2.0, 3.0]);
        let w = vector(&[0.5, 0.5, 0.5]);
        v.increment(&w).unwrap();
        assert_eq!(v.as_slice(), &[1.5, 2.5, 3.5]);
        v.decrement(&w).unwrap();
        v.decrement(&w).unwrap();
        assert_eq!(v.as_slice(), &[0.5, 1.5, 2.5]);
    }

    #[test]
    fn test_increment_mismatch_and_overflow() {
        let mut v = vector(&[1.0, f64::MAX]);
        let short = vector(&[1.0]);
        assert_eq!(
            v.increment(&short).unwrap_err(),
            Error::MismatchingDimensions {
                expected: 2,
                actual: 1
            }
        );

        let big = vector(&[1.0, f64::MAX]);
        assert_eq!(v.increment(&big).unwrap_err(), Error::InfinityOverflow);
        assert_eq!(v.as_slice(), &[1.0, f64::MAX]);
    }

    #[test]
    fn test_norm_values() {
        let v = vector(&[1.0, 2.0, 3.0]);
        assert_eq!(v.norm(Norm::L1), 6.0);
        assert!((v.norm(Norm::L2) - 14f64.sqrt()).abs() < 1e-12);
        assert_eq!(v.norm(Norm::Chebyshev), 3.0);

        let w = vector(&[-1.0, -2.0, -3.0]);
        assert_eq!(w.norm(Norm::Chebyshev), 3.0);
    }

    #[test]
    fn test_norm_overflow_is_nan() {
        let logger = Arc::new(RecordingLogger::default());
        let v = vector(&[f64::MAX, f64::MAX]).with_logger(logger.clone());
        assert!(v.norm(Norm::L2).is_nan());
        assert_eq!(v.try_norm(Norm::L1).unwrap_err(), Error::InfinityOverflow);
        assert_eq!(v.norm(Norm::Chebyshev), f64::MAX);
        assert_eq!(
            logger.records(),
            vec![
                (ReturnCode::InfinityOverflow, Level::Warning),
                (ReturnCode::InfinityOverflow, Level::Warning),
            ]
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let v = vector(&[1.0, 2.0]);
        let mut c = v.clone();
        c.set(0, 9.0).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0]);
        assert_eq!(c.as_slice(), &[9.0, 2.0]);
    }

    #[test]
    fn test_apply_function() {
        let mut v = vector(&[1.0, 4.0, 9.0]);
        v.apply_function(f64::sqrt).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);

        let mut calls = 0;
        let result = v.apply_function(|x| {
            calls += 1;
            if x > 1.5 {
                f64::NAN
            } else {
                x * 10.0
            }
        });
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert_eq!(calls, 3);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_for_each_visits_in_order() {
        let v = vector(&[3.0, 1.0, 2.0]);
        let mut seen = Vec::new();
        v.for_each(|x| seen.push(x));
        assert_eq!(seen, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_add_subtract_dot() {
        let a = vector(&[1.0, 2.0, 3.0]);
        let b = vector(&[-1.0, -2.0, -3.0]);

        assert_eq!(Vector::add(&a, &b).unwrap().as_slice(), &[0.0, 0.0, 0.0]);
        assert_eq!(
            Vector::subtract(&a, &b).unwrap().as_slice(),
            &[2.0, 4.0, 6.0]
        );
        assert_eq!(Vector::dot(&a, &b), -14.0);
    }

    #[test]
    fn test_binary_mismatch() {
        let a = vector(&[1.0, 2.0, 3.0]);
        let b = vector(&[1.0, 2.0]);

        assert!(matches!(
            Vector::add(&a, &b),
            Err(Error::MismatchingDimensions { .. })
        ));
        assert!(matches!(
            Vector::subtract(&a, &b),
            Err(Error::MismatchingDimensions { .. })
        ));
        assert!(Vector::dot(&a, &b).is_nan());
        assert!(!Vector::equals(&a, &b, Norm::L2, 1.0));
    }

    #[test]
    fn test_equals_mismatch_is_not_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let a = vector(&[1.0, 2.0, 3.0]).with_logger(logger.clone());
        let b = vector(&[1.0, 2.0]).with_logger(logger.clone());

        assert!(!Vector::equals(&a, &b, Norm::L2, 1.0));
        assert!(!Vector::equals(&b, &a, Norm::Chebyshev, 1.0));
        assert!(logger.records().is_empty());
    }

    #[test]
    fn test_dot_overflow() {
        let a = vector(&[f64::MAX, f64::MAX]);
        assert!(Vector::dot(&a, &a).is_nan());
        assert_eq!(Vector::try_dot(&a, &a).unwrap_err(), Error::InfinityOverflow);
    }

    #[test]
    fn test_equals_is_strict() {
        let a = vector(&[0.0, 0.0]);
        let b = vector(&[1.0, 0.0]);
        assert!(!Vector::equals(&a, &b, Norm::L1, 1.0));
        assert!(Vector::equals(&a, &b, Norm::L1, 1.0 + 1e-9));
        assert!(Vector::equals(&a, &a, Norm::Chebyshev, 1e-12));
        assert!(!Vector::equals(&a, &a, Norm::Chebyshev, 0.0));
    }

    #[test]
    fn test_copy_instance() {
        let mut dest = vector(&[1.0, 2.0, 3.0]);
        let src = vector(&[-1.0, 16.0, -3.0]);
        Vector::copy_instance(&mut dest, &src).unwrap();
        assert_eq!(dest.as_slice(), src.as_slice());

        let other = vector(&[1.0]);
        assert!(matches!(
            Vector::copy_instance(&mut dest, &other),
            Err(Error::MismatchingDimensions {
                expected: 3,
                actual: 1
            })
        ));
        assert_eq!(dest.as_slice(), &[-1.0, 16.0, -3.0]);
    }

    #[test]
    fn test_move_instance() {
        let mut dest = vector(&[0.0, 0.0]);
        let mut src = Some(vector(&[4.0, 5.0]));
        Vector::move_instance(&mut dest, &mut src).unwrap();
        assert!(src.is_none());
        assert_eq!(dest.as_slice(), &[4.0, 5.0]);

        assert_eq!(
            Vector::move_instance(&mut dest, &mut src).unwrap_err(),
            Error::NullPointer("source vector")
        );

        let mut wrong = Some(vector(&[1.0]));
        assert!(Vector::move_instance(&mut dest, &mut wrong).is_err());
        assert!(wrong.is_some());
    }

    #[test]
    fn test_size_allocated() {
        let v = vector(&[1.0, 2.0, 3.0]);
        let w = vector(&[1.0]);
        assert_eq!(
            v.size_allocated() - w.size_allocated(),
            2 * mem::size_of::<f64>()
        );
    }

    #[test]
    fn test_display() {
        let v = vector(&[1.0, -2.0, 3.5]);
        assert_eq!(v.to_string(), "[1, -2, 3.5]");
    }
}
