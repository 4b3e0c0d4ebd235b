//! Builder API for tracker construction.
//!
//! # Example
//!
//! ```
//! use visitlog::builder::TrackerBuilder;
//! use visitlog::tracker::SequentialIds;
//!
//! let mut tracker = TrackerBuilder::new()
//!     .ids(SequentialIds::new("desk-"))
//!     .history_limit(500)
//!     .max_active(120)
//!     .build()
//!     .unwrap();
//!
//! let user = tracker.check_in("Ada").unwrap();
//! assert_eq!(user.id.as_str(), "desk-1");
//! ```

pub mod error;
pub mod tracker;

pub use error::BuildError;
pub use tracker::TrackerBuilder;
