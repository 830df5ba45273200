//! Error Types
//!
//! Discrete result codes shared by errors and log records.

use std::fmt;

use thiserror::Error;

/// Discrete result code of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnCode {
    Unknown,
    Success,
    InvalidArgument,
    MismatchingDimensions,
    IndexOutOfBound,
    InfinityOverflow,
    NotNumber,
    AllocationError,
    NullPointerError,
    FileNotFound,
    VectorNotFound,
    IoError,
}

impl ReturnCode {
    /// Human-readable message written by loggers
    pub fn message(&self) -> &'static str {
        match self {
            ReturnCode::Unknown => "Unknown error",
            ReturnCode::Success => "Success",
            ReturnCode::InvalidArgument => "Invalid argument",
            ReturnCode::MismatchingDimensions => "Vectors' dimensions mismatch",
            ReturnCode::IndexOutOfBound => "Index is out of bound",
            ReturnCode::InfinityOverflow => "Result of the operation is too large",
            ReturnCode::NotNumber => "Result of the operation is NaN",
            ReturnCode::AllocationError => "Unable to allocate memory",
            ReturnCode::NullPointerError => "Null pointer as argument",
            ReturnCode::FileNotFound => "Unable to find file",
            ReturnCode::VectorNotFound => "Unable to find vector",
            ReturnCode::IoError => "Input/Output error",
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Vector and set operation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    MismatchingDimensions { expected: usize, actual: usize },
    #[error("Index {index} is out of bound for length {len}")]
    IndexOutOfBound { index: usize, len: usize },
    #[error("Result of the operation is not finite")]
    InfinityOverflow,
    #[error("Unable to allocate storage for {0} values")]
    AllocationError(usize),
    #[error("Required {0} is absent")]
    NullPointer(&'static str),
    #[error("No vector within tolerance")]
    VectorNotFound,
}

impl Error {
    /// Result code this error is reported as
    pub fn code(&self) -> ReturnCode {
        match self {
            Error::InvalidArgument(_) => ReturnCode::InvalidArgument,
            Error::MismatchingDimensions { .. } => ReturnCode::MismatchingDimensions,
            Error::IndexOutOfBound { .. } => ReturnCode::IndexOutOfBound,
            Error::InfinityOverflow => ReturnCode::InfinityOverflow,
            Error::AllocationError(_) => ReturnCode::AllocationError,
            Error::NullPointer(_) => ReturnCode::NullPointerError,
            Error::VectorNotFound => ReturnCode::VectorNotFound,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
