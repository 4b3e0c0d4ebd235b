//! Visit records: the active user and the completed history entry.
//!
//! Both are plain immutable values. A `User` exists only while its owner is
//! checked in; check-out consumes it and produces a `HistoryEntry`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opaque identifier for an active visit or a history entry.
///
/// Ids are short tokens (nine base-36 characters by default). They carry no
/// meaning beyond identity within one tracker session.
///
/// # Example
///
/// ```rust
/// use visitlog::core::VisitId;
///
/// let id = VisitId::new("k3x9a0b2q");
/// assert_eq!(id.as_str(), "k3x9a0b2q");
/// assert_eq!(id.to_string(), "k3x9a0b2q");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitId(String);

impl VisitId {
    /// Wrap an existing token as an id.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VisitId {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for VisitId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// A user who is currently checked in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique among active users for as long as this user is checked in
    pub id: VisitId,
    /// Name as entered, with surrounding whitespace removed
    pub name: String,
    /// When the user checked in
    pub check_in_time: DateTime<Utc>,
}

impl User {
    /// Time spent in the library so far, as seen from `now`.
    ///
    /// Returns zero if `now` precedes the check-in time.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.check_in_time)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Immutable record of a completed visit.
///
/// The user's name is copied at check-out time; the entry does not refer
/// back to the `User` it was built from.
///
/// # Example
///
/// ```rust
/// use visitlog::core::{HistoryEntry, VisitId};
/// use chrono::{Duration, Utc};
///
/// let check_in_time = Utc::now();
/// let entry = HistoryEntry {
///     id: VisitId::new("h1"),
///     user_name: "Alice".to_string(),
///     check_in_time,
///     check_out_time: check_in_time + Duration::minutes(45),
/// };
///
/// assert_eq!(entry.duration().as_secs(), 45 * 60);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Fresh id, unrelated to the id the user held while active
    pub id: VisitId,
    /// Copy of the user's name
    pub user_name: String,
    /// When the visit started
    pub check_in_time: DateTime<Utc>,
    /// When the visit ended, never earlier than `check_in_time`
    pub check_out_time: DateTime<Utc>,
}

impl HistoryEntry {
    /// Length of the visit.
    pub fn duration(&self) -> Duration {
        self.check_out_time
            .signed_duration_since(self.check_in_time)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Case-insensitive substring match on the user name.
    ///
    /// An empty query matches every entry.
    pub fn matches(&self, query: &str) -> bool {
        self.user_name
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}
