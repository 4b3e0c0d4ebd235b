//! Visit history tracking.
//!
//! Provides immutable, most-recent-first tracking of completed visits,
//! following functional programming principles.

use super::visit::{HistoryEntry, VisitId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Ordered history of completed visits, newest first.
///
/// History is immutable - the `record` method returns a new history
/// with the entry prepended, following functional programming principles.
///
/// By default the history grows without bound. A history created with
/// [`VisitHistory::with_limit`] keeps only the newest `limit` entries.
///
/// # Example
///
/// ```rust
/// use visitlog::core::{HistoryEntry, VisitHistory, VisitId};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let visit = |id: &str, name: &str| HistoryEntry {
///     id: VisitId::new(id),
///     user_name: name.to_string(),
///     check_in_time: now,
///     check_out_time: now,
/// };
///
/// let history = VisitHistory::new()
///     .record(visit("h1", "Alice"))
///     .record(visit("h2", "Bob"));
///
/// // Most recent checkout first
/// assert_eq!(history.entries()[0].user_name, "Bob");
/// assert_eq!(history.search("ALI").len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitHistory {
    entries: VecDeque<HistoryEntry>,
    limit: Option<NonZeroUsize>,
}

impl VisitHistory {
    /// Create a new, empty, unbounded history.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            limit: None,
        }
    }

    /// Create a new, empty history that keeps at most `limit` entries.
    ///
    /// # Example
    ///
    /// ```rust
    /// use visitlog::core::VisitHistory;
    /// use std::num::NonZeroUsize;
    ///
    /// let history = VisitHistory::with_limit(NonZeroUsize::new(100).unwrap());
    /// assert_eq!(history.limit(), Some(100));
    /// assert!(history.is_empty());
    /// ```
    pub fn with_limit(limit: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: Some(limit),
        }
    }

    /// Record a completed visit, returning a new history.
    ///
    /// This is a pure function - it does not mutate the existing history
    /// but returns a new one with the entry at the front. When the history
    /// is bounded and full, the oldest entry is dropped.
    pub fn record(&self, entry: HistoryEntry) -> Self {
        let mut next = self.clone();
        next.push(entry);
        next
    }

    /// In-place form of [`record`](Self::record), returning the evicted entry.
    pub(crate) fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push_front(entry);
        match self.limit {
            Some(limit) if self.entries.len() > limit.get() => self.entries.pop_back(),
            _ => None,
        }
    }

    /// Entries whose user name contains `query`, ignoring case.
    ///
    /// Relative order is the same as in the history. An empty query
    /// returns every entry. Nothing is cached; each call scans the
    /// current entries.
    pub fn search(&self, query: &str) -> Vec<&HistoryEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.matches(query))
            .collect()
    }

    /// Get all entries, most recent first.
    pub fn entries(&self) -> &VecDeque<HistoryEntry> {
        &self.entries
    }

    /// Iterate over entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Whether any entry carries this id.
    pub fn contains_id(&self, id: &VisitId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    /// The most recently recorded entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit.map(NonZeroUsize::get)
    }

    /// Sum of all recorded visit durations.
    pub fn total_time(&self) -> Duration {
        self.entries.iter().map(HistoryEntry::duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};

    fn entry(id: &str, name: &str, minutes: i64) -> HistoryEntry {
        let check_in_time = Utc::now();
        HistoryEntry {
            id: VisitId::new(id),
            user_name: name.to_string(),
            check_in_time,
            check_out_time: check_in_time + ChronoDuration::minutes(minutes),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = VisitHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.latest().is_none());
        assert_eq!(history.limit(), None);
        assert_eq!(history.total_time(), Duration::ZERO);
    }

    #[test]
    fn record_prepends_entry() {
        let history = VisitHistory::new()
            .record(entry("h1", "Alice", 1))
            .record(entry("h2", "Bob", 1));

        let names: Vec<_> = history.iter().map(|e| e.user_name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
        assert_eq!(history.latest().unwrap().id, VisitId::new("h2"));
    }

    #[test]
    fn record_is_immutable() {
        let history = VisitHistory::new();
        let new_history = history.record(entry("h1", "Alice", 1));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn bounded_history_drops_oldest() {
        let mut history = VisitHistory::with_limit(NonZeroUsize::new(2).unwrap());
        history = history.record(entry("h1", "Alice", 1));
        history = history.record(entry("h2", "Bob", 1));
        history = history.record(entry("h3", "Carol", 1));

        assert_eq!(history.len(), 2);
        assert!(!history.contains_id(&VisitId::new("h1")));
        assert!(history.contains_id(&VisitId::new("h2")));
        assert!(history.contains_id(&VisitId::new("h3")));
        assert_eq!(history.limit(), Some(2));
    }

    #[test]
    fn push_updates_in_place_and_returns_evicted() {
        let mut history = VisitHistory::with_limit(NonZeroUsize::new(2).unwrap());

        assert_eq!(history.push(entry("h1", "Alice", 1)), None);
        assert_eq!(history.push(entry("h2", "Bob", 1)), None);
        let evicted = history.push(entry("h3", "Carol", 1)).unwrap();

        assert_eq!(evicted.id, VisitId::new("h1"));
        let ids: Vec<_> = history.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["h3", "h2"]);
    }

    #[test]
    fn unbounded_push_never_evicts() {
        let mut history = VisitHistory::new();
        for i in 0..50 {
            assert!(history.push(entry(&format!("h{i}"), "Alice", 1)).is_none());
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.latest().unwrap().id, VisitId::new("h49"));
    }

    #[test]
    fn search_filters_case_insensitively_in_order() {
        let history = VisitHistory::new()
            .record(entry("h1", "Alice", 1))
            .record(entry("h2", "Bob", 1))
            .record(entry("h3", "Malik", 1));

        let hits: Vec<_> = history
            .search("ALI")
            .into_iter()
            .map(|e| e.user_name.as_str())
            .collect();
        assert_eq!(hits, vec!["Malik", "Alice"]);
    }

    #[test]
    fn empty_query_returns_everything() {
        let history = VisitHistory::new()
            .record(entry("h1", "Alice", 1))
            .record(entry("h2", "Bob", 1));

        assert_eq!(history.search("").len(), 2);
    }

    #[test]
    fn search_without_match_is_empty() {
        let history = VisitHistory::new().record(entry("h1", "Alice", 1));
        assert!(history.search("zzz").is_empty());
    }

    #[test]
    fn total_time_sums_durations() {
        let history = VisitHistory::new()
            .record(entry("h1", "Alice", 10))
            .record(entry("h2", "Bob", 20));

        assert_eq!(history.total_time(), Duration::from_secs(30 * 60));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = VisitHistory::new().record(entry("h1", "Alice", 5));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: VisitHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
