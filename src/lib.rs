//! Visitlog: an in-memory library visit tracker
//!
//! Visitlog is built on a "pure core, imperative shell" split.
//! The visit records, the history, and the check-in rules are pure values
//! and functions; the tracker is the one place where state changes.
//!
//! # Core Concepts
//!
//! - **Check-in**: creates an active visit for a user
//! - **Check-out**: moves an active visit to the front of the history
//! - **Search**: case-insensitive substring filter over the history
//! - **Rules**: check-in preconditions that report every violation at once
//!
//! Nothing is persisted. State lives for as long as the tracker does.
//!
//! # Example
//!
//! ```rust
//! use visitlog::VisitTracker;
//!
//! let mut tracker = VisitTracker::new();
//!
//! let alice = tracker.check_in("Alice").unwrap();
//! let bob = tracker.check_in("Bob").unwrap();
//!
//! // Blank names and unknown ids are ignored
//! assert!(tracker.check_in("   ").is_none());
//! assert_eq!(tracker.active_count(), 2);
//!
//! tracker.check_out(&alice.id);
//! tracker.check_out(&bob.id);
//!
//! // Most recent checkout first
//! assert_eq!(tracker.history().entries()[0].user_name, "Bob");
//! assert_eq!(tracker.search("ali").len(), 1);
//! ```

pub mod builder;
pub mod core;
pub mod policy;
pub mod tracker;
pub mod view;

// Re-export commonly used types
pub use builder::{BuildError, TrackerBuilder};
pub use crate::core::{Guard, HistoryEntry, User, VisitHistory, VisitId};
pub use tracker::{TrackerError, VisitTracker};
pub use view::{Dashboard, TimeFormat};
