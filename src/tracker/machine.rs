//! Visit tracker that owns the active set and the history.

use crate::core::{HistoryEntry, User, VisitHistory, VisitId};
use crate::policy::{CheckInContext, CheckInRules};
use crate::tracker::clock::{Clock, SystemClock};
use crate::tracker::error::TrackerError;
use crate::tracker::ids::{IdGenerator, RandomIds};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

/// How many times a colliding id is regenerated before giving up.
pub const MAX_ID_ATTEMPTS: usize = 32;

/// In-memory visit tracker.
///
/// Holds the users currently checked in (in check-in order) and the
/// history of completed visits (most recent first). Every mutation is a
/// single `&mut self` call, so no caller can observe a user that is both
/// active and in the history.
///
/// # Example
///
/// ```rust
/// use visitlog::tracker::VisitTracker;
///
/// let mut tracker = VisitTracker::new();
///
/// let alice = tracker.check_in("Alice").unwrap();
/// assert_eq!(tracker.active_count(), 1);
///
/// let entry = tracker.check_out(&alice.id).unwrap();
/// assert_eq!(entry.user_name, "Alice");
/// assert_eq!(tracker.active_count(), 0);
/// assert_eq!(tracker.history().len(), 1);
///
/// assert!(tracker.search("zzz").is_empty());
/// assert_eq!(tracker.search("ALICE").len(), 1);
/// ```
pub struct VisitTracker {
    active: Vec<User>,
    history: VisitHistory,
    rules: CheckInRules,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    /// Every id handed out this session, including evicted history ids
    issued: HashSet<VisitId>,
}

impl VisitTracker {
    /// Unbounded tracker on the system clock with random ids
    pub fn new() -> Self {
        Self::from_parts(
            CheckInRules::unbounded(),
            VisitHistory::new(),
            Box::new(SystemClock),
            Box::new(RandomIds),
        )
    }

    pub(crate) fn from_parts(
        rules: CheckInRules,
        history: VisitHistory,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            active: Vec::new(),
            history,
            rules,
            clock,
            ids,
            issued: HashSet::new(),
        }
    }

    /// Current time on the tracker's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Users currently checked in, in check-in order (pure)
    pub fn active(&self) -> &[User] {
        &self.active
    }

    /// Number of users currently checked in (pure)
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Completed visits, most recent first (pure)
    pub fn history(&self) -> &VisitHistory {
        &self.history
    }

    pub fn rules(&self) -> &CheckInRules {
        &self.rules
    }

    /// Look up an active user by id (pure)
    pub fn find_active(&self, id: &VisitId) -> Option<&User> {
        self.active.iter().find(|user| &user.id == id)
    }

    pub fn is_active(&self, id: &VisitId) -> bool {
        self.find_active(id).is_some()
    }

    /// History entries whose user name contains `query`, ignoring case.
    ///
    /// Pure and recomputed on every call.
    pub fn search(&self, query: &str) -> Vec<&HistoryEntry> {
        self.history.search(query)
    }

    /// Check a user in.
    ///
    /// Requests that fail a rule (a blank name, a full reading room) are
    /// logged and ignored: the tracker is unchanged and `None` is returned.
    /// The same name may be checked in any number of times.
    pub fn check_in(&mut self, name: &str) -> Option<User> {
        match self.try_check_in(name) {
            Ok(user) => Some(user),
            Err(err) => {
                debug!(error = %err, "check-in ignored");
                None
            }
        }
    }

    /// Check a user out, moving the visit to the front of the history.
    ///
    /// Unknown ids are logged and ignored.
    pub fn check_out(&mut self, id: &VisitId) -> Option<HistoryEntry> {
        match self.try_check_out(id) {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "check-out ignored");
                None
            }
        }
    }

    /// Check a user in, reporting why the request was refused.
    pub fn try_check_in(&mut self, name: &str) -> Result<User, TrackerError> {
        let context = CheckInContext {
            name: name.to_string(),
            active_count: self.active.len(),
            requested_at: self.clock.now(),
        };

        let violations = self.rules.violations(&context);
        if !violations.is_empty() {
            return Err(TrackerError::Rejected { violations });
        }

        let user = User {
            id: self.fresh_id()?,
            name: context.trimmed_name().to_string(),
            check_in_time: context.requested_at,
        };

        info!(id = %user.id, name = %user.name, "checked in");
        self.active.push(user.clone());
        Ok(user)
    }

    /// Check a user out, reporting why the request was refused.
    pub fn try_check_out(&mut self, id: &VisitId) -> Result<HistoryEntry, TrackerError> {
        let position = self
            .active
            .iter()
            .position(|user| &user.id == id)
            .ok_or_else(|| TrackerError::UnknownVisit { id: id.clone() })?;

        // Allocate before touching the active set so a failure changes nothing.
        let entry_id = self.fresh_id()?;
        let user = self.active.remove(position);

        // Never stamp a checkout before its check-in, even if the clock stepped back.
        let check_out_time = self.clock.now().max(user.check_in_time);

        let entry = HistoryEntry {
            id: entry_id,
            user_name: user.name,
            check_in_time: user.check_in_time,
            check_out_time,
        };

        if let Some(evicted) = self.history.push(entry.clone()) {
            debug!(limit = ?self.history.limit(), evicted = %evicted.id, "oldest history entry evicted");
        }

        info!(id = %user.id, entry = %entry.id, name = %entry.user_name, "checked out");
        Ok(entry)
    }

    /// Draw ids until one has never been issued in this session.
    ///
    /// Evicted history ids stay reserved, so a bounded history never
    /// reuses an id.
    fn fresh_id(&mut self) -> Result<VisitId, TrackerError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if self.issued.insert(id.clone()) {
                return Ok(id);
            }
            debug!(%id, "generated id already in use");
        }

        warn!(attempts = MAX_ID_ATTEMPTS, "id generator kept colliding");
        Err(TrackerError::IdSpaceExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

impl Default for VisitTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VisitTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitTracker")
            .field("active", &self.active)
            .field("history", &self.history)
            .field("rules", &self.rules)
            .field("issued", &self.issued.len())
            .finish_non_exhaustive()
    }
}
