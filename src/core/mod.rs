//! Core visit tracking types and logic.
//!
//! This module contains the pure functional core of the tracker:
//! - Visit records (`User`, `HistoryEntry`) and their ids
//! - Guard predicates for request control
//! - Immutable, most-recent-first history
//!
//! All logic in this module is pure (no side effects), following
//! the "pure core, imperative shell" philosophy.

mod guard;
mod history;
mod visit;

pub use guard::Guard;
pub use history::VisitHistory;
pub use visit::{HistoryEntry, User, VisitId};
