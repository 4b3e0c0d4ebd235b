//! Builder for constructing visit trackers.

use crate::builder::error::BuildError;
use crate::core::VisitHistory;
use crate::policy::CheckInRules;
use crate::tracker::{Clock, IdGenerator, RandomIds, SystemClock, VisitTracker};
use std::num::NonZeroUsize;

/// Builder for constructing trackers with a fluent API.
///
/// Every setting is optional; an empty builder produces the same tracker
/// as [`VisitTracker::new`].
#[derive(Default)]
pub struct TrackerBuilder {
    clock: Option<Box<dyn Clock>>,
    ids: Option<Box<dyn IdGenerator>>,
    rules: Option<CheckInRules>,
    max_active: Option<usize>,
    history_limit: Option<usize>,
}

impl TrackerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this time source instead of the system clock.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Use this id generator instead of random tokens.
    pub fn ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Check-in rules to enforce.
    pub fn rules(mut self, rules: CheckInRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Cap the number of users checked in at once.
    /// Overrides any limit carried by `rules`.
    pub fn max_active(mut self, max: usize) -> Self {
        self.max_active = Some(max);
        self
    }

    /// Keep only the newest `limit` history entries.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Build the tracker.
    /// Returns an error if a limit is zero.
    pub fn build(self) -> Result<VisitTracker, BuildError> {
        let history = match self.history_limit {
            None => VisitHistory::new(),
            Some(limit) => {
                let limit = NonZeroUsize::new(limit).ok_or(BuildError::ZeroHistoryLimit)?;
                VisitHistory::with_limit(limit)
            }
        };

        let mut rules = self.rules.unwrap_or_default();
        if let Some(max) = self.max_active {
            rules.max_active = Some(max);
        }
        if rules.max_active == Some(0) {
            return Err(BuildError::ZeroCapacity);
        }

        Ok(VisitTracker::from_parts(
            rules,
            history,
            self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            self.ids.unwrap_or_else(|| Box::new(RandomIds)),
        ))
    }
}
