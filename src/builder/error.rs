//! Build errors for the tracker builder.

use thiserror::Error;

/// Errors that can occur when building a tracker.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("History limit must be at least 1. Omit .history_limit() for unbounded history")]
    ZeroHistoryLimit,

    #[error("Active user limit must be at least 1. Omit .max_active() for no limit")]
    ZeroCapacity,
}
