//! Vector Module
//!
//! Fixed-dimension `f64` vectors and the norm kernels they are measured with.

mod dense;
mod norm;

pub use dense::Vector;
pub use norm::{distance, dot_product, norm_of, Norm};
