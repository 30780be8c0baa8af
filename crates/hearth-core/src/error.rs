//! Library error types
//!
//! Pure-logic modules (animation, warranty, recurrence, forms) fail only on
//! invalid caller input, surfaced synchronously as [`CoreError`]. Backend
//! operations have their own error type in [`crate::backend`].

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The caller supplied an argument outside the valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CoreError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
