//! Set Module
//!
//! Tolerance-deduplicating sets of same-dimension vectors.

mod algebra;
mod store;

pub use store::Set;
