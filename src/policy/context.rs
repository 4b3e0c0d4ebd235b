//! Context provided to check-in rules.

use chrono::{DateTime, Utc};

/// Snapshot of a check-in request and the tracker it targets
#[derive(Clone, Debug)]
pub struct CheckInContext {
    /// Name exactly as submitted, before trimming
    pub name: String,
    /// Number of users checked in when the request arrived
    pub active_count: usize,
    pub requested_at: DateTime<Utc>,
}

impl CheckInContext {
    /// The submitted name with surrounding whitespace removed (pure)
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}
