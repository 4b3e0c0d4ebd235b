//! Validation-based rules for check-in requests.
//!
//! Check-in requests are checked with Stillwater's `Validation` type so that
//! every failed rule is reported at once instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use visitlog::policy::{CheckInContext, CheckInRulesBuilder, Violation};
//! use chrono::Utc;
//!
//! let rules = CheckInRulesBuilder::new().max_active(1).build();
//!
//! let request = CheckInContext {
//!     name: "   ".to_string(),
//!     active_count: 1,
//!     requested_at: Utc::now(),
//! };
//!
//! let violations = rules.violations(&request);
//! assert_eq!(violations.len(), 2);
//! assert!(violations.contains(&Violation::EmptyName));
//! assert!(violations.contains(&Violation::CapacityReached { max: 1 }));
//! ```

pub mod builder;
pub mod context;
pub mod rules;
pub mod violations;

pub use builder::CheckInRulesBuilder;
pub use context::CheckInContext;
pub use rules::CheckInRules;
pub use violations::Violation;
