//! VECSET - Fixed-Dimension Vectors and Vector Sets
//!
//! Finite `f64` vectors with norm arithmetic, and growable sets of vectors
//! that deduplicate and search by tolerance under a chosen norm.
//!
//! Nothing here is synchronized. Failures are returned as [`Error`] values
//! and, when a logger is attached, also reported to it.

pub mod config;
pub mod error;
pub mod logging;
pub mod set;
pub mod vector;

pub use config::SetConfig;
pub use error::{Error, Result, ReturnCode};
pub use logging::{Level, Logger, NoopLogger, SharedLogger, StreamLogger, TracingLogger};
pub use set::Set;
pub use vector::{Norm, Vector};
