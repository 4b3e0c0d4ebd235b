//! Reasons a check-in request is refused.

use thiserror::Error;

/// A single rule a check-in request failed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("Name is empty or whitespace-only")]
    EmptyName,

    #[error("Active user limit ({max}) reached")]
    CapacityReached { max: usize },

    #[error("Custom check failed: {message}")]
    Custom { message: String },
}
