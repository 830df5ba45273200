//! Vector Set Storage
//!
//! Contiguous, tolerance-deduplicated storage for vectors of one dimension.

use std::fmt;

use tracing::{debug, trace};

use crate::config::{checks_enabled, SetConfig};
use crate::error::{Error, Result};
use crate::logging::{self, SharedLogger};
use crate::vector::{distance, Norm, Vector};

/// Growable set of same-dimension vectors with approximate deduplication.
///
/// Elements are stored back to back in a single coordinate buffer. Two
/// vectors are considered equal when the norm of their difference is
/// strictly below the tolerance given to the operation. The dimension is
/// fixed by the first insert and kept for the lifetime of the set.
///
/// Not synchronized: share behind a lock if several threads mutate it.
pub struct Set {
    /// Row-major coordinates of all elements
    elements: Vec<f64>,
    /// Dimension, unset until the first insert
    dim: Option<usize>,
    /// Reserved element slots
    capacity: usize,
    config: SetConfig,
    logger: SharedLogger,
}

impl Default for Set {
    fn default() -> Self {
        Self::new()
    }
}

impl Set {
    /// Create an empty set with default configuration and no logging
    pub fn new() -> Self {
        Self::with_config(SetConfig::default(), logging::noop())
    }

    /// Create an empty set reporting failures to `logger`
    pub fn with_logger(logger: SharedLogger) -> Self {
        Self::with_config(SetConfig::default(), logger)
    }

    /// Create an empty set with explicit growth parameters
    pub fn with_config(config: SetConfig, logger: SharedLogger) -> Self {
        Self {
            elements: Vec::new(),
            dim: None,
            capacity: 0,
            config,
            logger,
        }
    }

    pub fn config(&self) -> &SetConfig {
        &self.config
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Dimension of the elements, `None` before the first insert
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self.dim {
            Some(dim) => self.elements.len() / dim,
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Reserved element slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Borrow the coordinates of each element in storage order
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.elements.chunks_exact(self.dim.unwrap_or(1))
    }

    /// Copy of the element at `index`
    pub fn get(&self, index: usize) -> Result<Vector> {
        if checks_enabled() && index >= self.len() {
            return self.fail(Error::IndexOutOfBound {
                index,
                len: self.len(),
            });
        }
        Vector::new_with_logger(self.slot(index), self.logger.clone())
    }

    /// Copy of the first element, in storage order, whose distance to
    /// `pattern` under `norm` is strictly below `tolerance`
    pub fn find_first(&self, pattern: &Vector, norm: Norm, tolerance: f64) -> Result<Vector> {
        match self.locate(pattern.as_slice(), norm, tolerance) {
            Ok(index) => Vector::new_with_logger(self.slot(index), self.logger.clone()),
            Err(err) => self.fail(err),
        }
    }

    /// Whether some element lies within `tolerance` of `pattern`
    pub fn contains(&self, pattern: &Vector, norm: Norm, tolerance: f64) -> bool {
        self.locate(pattern.as_slice(), norm, tolerance).is_ok()
    }

    /// Insert a copy of `value` unless an element within `tolerance` already
    /// exists, in which case the set is left unchanged.
    ///
    /// The first insert fixes the dimension of the set.
    pub fn insert(&mut self, value: &Vector, norm: Norm, tolerance: f64) -> Result<()> {
        match self.insert_values(value.as_slice(), norm, tolerance) {
            Ok(()) => Ok(()),
            Err(err) => self.fail(err),
        }
    }

    /// Remove the element at `index`, shifting later elements down by one
    pub fn remove(&mut self, index: usize) -> Result<()> {
        let len = self.len();
        if checks_enabled() && index >= len {
            return self.fail(Error::IndexOutOfBound { index, len });
        }
        let dim = self.dim.unwrap_or(1);
        let start = index * dim;
        self.elements.drain(start..start + dim);
        trace!(index, remaining = len - 1, "Removed set element");
        Ok(())
    }

    /// Remove the first element within `tolerance` of `pattern`
    pub fn remove_first(&mut self, pattern: &Vector, norm: Norm, tolerance: f64) -> Result<()> {
        match self.locate(pattern.as_slice(), norm, tolerance) {
            Ok(index) => self.remove(index),
            Err(err) => self.fail(err),
        }
    }

    /// Insert raw coordinates with deduplication, without logging
    pub(super) fn insert_values(&mut self, values: &[f64], norm: Norm, tolerance: f64) -> Result<()> {
        if checks_enabled() {
            check_tolerance(tolerance)?;
        }
        match self.dim {
            None => {
                if values.is_empty() {
                    return Err(Error::InvalidArgument(
                        "dimension must be positive".to_string(),
                    ));
                }
                self.reserve(values.len(), self.config.grown_capacity(0))?;
                self.dim = Some(values.len());
                debug!(dim = values.len(), capacity = self.capacity, "Set dimension fixed");
            }
            Some(dim) if checks_enabled() && dim != values.len() => {
                return Err(Error::MismatchingDimensions {
                    expected: dim,
                    actual: values.len(),
                });
            }
            Some(_) => {}
        }

        if self.scan(values, norm, tolerance).is_some() {
            return Ok(());
        }
        if self.len() == self.capacity {
            self.grow()?;
        }
        self.elements.extend_from_slice(values);
        Ok(())
    }

    /// Whether some element lies within `tolerance` of `values`
    pub(super) fn matches(&self, values: &[f64], norm: Norm, tolerance: f64) -> bool {
        self.dim == Some(values.len()) && self.scan(values, norm, tolerance).is_some()
    }

    /// Index of the first match for `pattern`, without logging
    fn locate(&self, pattern: &[f64], norm: Norm, tolerance: f64) -> Result<usize> {
        if checks_enabled() {
            check_tolerance(tolerance)?;
        }
        let Some(dim) = self.dim else {
            return Err(Error::VectorNotFound);
        };
        if self.is_empty() {
            return Err(Error::VectorNotFound);
        }
        if checks_enabled() && dim != pattern.len() {
            return Err(Error::MismatchingDimensions {
                expected: dim,
                actual: pattern.len(),
            });
        }
        self.scan(pattern, norm, tolerance)
            .ok_or(Error::VectorNotFound)
    }

    fn scan(&self, values: &[f64], norm: Norm, tolerance: f64) -> Option<usize> {
        self.iter()
            .position(|element| distance(element, values, norm) < tolerance)
    }

    fn slot(&self, index: usize) -> &[f64] {
        let dim = self.dim.unwrap_or(1);
        &self.elements[index * dim..(index + 1) * dim]
    }

    /// Grow a full set by doubling, adding at most `max_growth` slots
    fn grow(&mut self) -> Result<()> {
        let dim = self.dim.unwrap_or(1);
        let from = self.capacity;
        self.reserve(dim, self.config.grown_capacity(from))?;
        debug!(from, to = self.capacity, "Grew set storage");
        Ok(())
    }

    fn reserve(&mut self, dim: usize, slots: usize) -> Result<()> {
        let total = slots
            .checked_mul(dim)
            .ok_or(Error::AllocationError(usize::MAX))?;
        let additional = total.saturating_sub(self.elements.len());
        self.elements
            .try_reserve_exact(additional)
            .map_err(|_| Error::AllocationError(total))?;
        self.capacity = slots;
        Ok(())
    }

    #[track_caller]
    pub(super) fn fail<T>(&self, err: Error) -> Result<T> {
        logging::report(self.logger.as_ref(), &err, module_path!());
        Err(err)
    }
}

fn check_tolerance(tolerance: f64) -> Result<()> {
    if tolerance.is_nan() {
        return Err(Error::InvalidArgument("tolerance is NaN".to_string()));
    }
    Ok(())
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Set")
            .field("dim", &self.dim)
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("config", &self.config)
            .finish()
    }
}
