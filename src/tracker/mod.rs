//! The imperative shell around the pure core.
//!
//! `VisitTracker` owns the two collections and applies the check-in and
//! check-out transitions. Time and id generation are injected through the
//! `Clock` and `IdGenerator` traits so tests can pin both.

mod clock;
mod error;
mod ids;
mod machine;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::TrackerError;
pub use ids::{IdGenerator, RandomIds, SequentialIds, ID_LEN};
pub use machine::{VisitTracker, MAX_ID_ATTEMPTS};
