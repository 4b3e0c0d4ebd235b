//! Render model for the tracker.
//!
//! A [`Dashboard`] is rebuilt from the tracker on every render: the live
//! active count, the active list, and the history filtered by the current
//! search query. Nothing is cached between renders.
//!
//! Timestamps are shown in the local timezone and the user's locale, taken
//! from `LC_ALL`, `LC_TIME` or `LANG` in that order.

use crate::core::{HistoryEntry, User, VisitId};
use crate::tracker::VisitTracker;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Locale, TimeZone, Utc};
use std::fmt::{self, Write as _};
use std::time::Duration;
use thiserror::Error;

/// The locale's preferred date and time
pub const DEFAULT_DATETIME_FORMAT: &str = "%x %X";
/// The locale's preferred time of day
pub const DEFAULT_TIME_FORMAT: &str = "%X";

/// Shown in place of the history table when no entry matches.
pub const EMPTY_HISTORY: &str = "No history entries found";

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid time format '{format}'")]
    Invalid { format: String },

    #[error("Time format must not be empty")]
    Empty,

    #[error("Unknown locale '{locale}'")]
    UnknownLocale { locale: String },
}

/// `strftime` patterns and the locale used to render timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeFormat {
    /// Full date and time, used in the history table
    pub datetime: String,
    /// Time of day, used for "Since" in the active list
    pub time: String,
    /// Names and layouts behind `%x`, `%X`, `%p`, `%B` and friends
    pub locale: Locale,
}

impl TimeFormat {
    /// Build a format pair in the environment's locale, rejecting patterns
    /// chrono cannot render.
    pub fn new(datetime: impl Into<String>, time: impl Into<String>) -> Result<Self, FormatError> {
        let format = Self {
            datetime: datetime.into(),
            time: time.into(),
            locale: detect_locale(),
        };
        check_pattern(&format.datetime)?;
        check_pattern(&format.time)?;
        Ok(format)
    }

    /// The locale's own date and time layouts.
    pub fn localized(locale: Locale) -> Self {
        Self {
            datetime: DEFAULT_DATETIME_FORMAT.to_string(),
            time: DEFAULT_TIME_FORMAT.to_string(),
            locale,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self::localized(detect_locale())
    }
}

/// Validate a `strftime` pattern without rendering anything.
pub fn check_pattern(pattern: &str) -> Result<(), FormatError> {
    if pattern.is_empty() {
        return Err(FormatError::Empty);
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(FormatError::Invalid {
            format: pattern.to_string(),
        });
    }
    Ok(())
}

/// Map a POSIX locale name such as `de_DE.UTF-8` or `sr_RS@latin` to a
/// chrono locale.
///
/// `C` and `POSIX` map to [`Locale::POSIX`]. A BCP 47 style `en-US` is
/// accepted too.
pub fn parse_locale(name: &str) -> Result<Locale, FormatError> {
    let base = name
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('-', "_");
    match base.as_str() {
        "C" | "POSIX" => Ok(Locale::POSIX),
        _ => Locale::try_from(base.as_str()).map_err(|_| FormatError::UnknownLocale {
            locale: name.to_string(),
        }),
    }
}

/// The locale named by the environment, or POSIX when unset or unknown.
pub fn detect_locale() -> Locale {
    locale_from(|var| std::env::var(var).ok())
}

/// First non-empty locale variable wins, as in the C library.
fn locale_from(lookup: impl Fn(&str) -> Option<String>) -> Locale {
    LOCALE_VARS
        .iter()
        .find_map(|var| lookup(var).filter(|value| !value.is_empty()))
        .and_then(|value| parse_locale(&value).ok())
        .unwrap_or(Locale::POSIX)
}

/// Render `instant` in `tz` and `locale`, falling back to RFC 3339 if the
/// pattern fails.
fn render<Tz>(instant: DateTime<Utc>, tz: &Tz, pattern: &str, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let local = instant.with_timezone(tz);
    let mut out = String::new();
    if write!(out, "{}", local.format_localized(pattern, locale)).is_err() {
        return local.to_rfc3339();
    }
    out
}

/// Short duration for people: `42s`, `5m`, `2h 7m`.
pub fn humanize(duration: Duration) -> String {
    let secs = duration.as_secs();
    match (secs / 3600, (secs % 3600) / 60) {
        (0, 0) => format!("{secs}s"),
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveRow {
    pub id: VisitId,
    pub name: String,
    pub since: String,
    /// Time spent in the library so far, e.g. `40m`
    pub stay: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRow {
    pub id: VisitId,
    pub user_name: String,
    pub check_in: String,
    pub check_out: String,
}

/// Everything one render shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub active_count: usize,
    pub active: Vec<ActiveRow>,
    pub query: String,
    /// History entries matching `query`, most recent first
    pub history: Vec<HistoryRow>,
    /// Size of the unfiltered history
    pub history_total: usize,
}

impl Dashboard {
    /// Capture the tracker in the local timezone.
    pub fn from_tracker(tracker: &VisitTracker, query: &str, format: &TimeFormat) -> Self {
        Self::in_timezone(tracker, query, format, &Local)
    }

    /// Capture the tracker, rendering timestamps in `tz`.
    pub fn in_timezone<Tz>(
        tracker: &VisitTracker,
        query: &str,
        format: &TimeFormat,
        tz: &Tz,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let now = tracker.now();
        let active_row = |user: &User| ActiveRow {
            id: user.id.clone(),
            name: user.name.clone(),
            since: render(user.check_in_time, tz, &format.time, format.locale),
            stay: humanize(user.elapsed(now)),
        };
        let history_row = |entry: &HistoryEntry| HistoryRow {
            id: entry.id.clone(),
            user_name: entry.user_name.clone(),
            check_in: render(entry.check_in_time, tz, &format.datetime, format.locale),
            check_out: render(entry.check_out_time, tz, &format.datetime, format.locale),
        };

        Self {
            active_count: tracker.active_count(),
            active: tracker.active().iter().map(active_row).collect(),
            query: query.to_string(),
            history: tracker.search(query).into_iter().map(history_row).collect(),
            history_total: tracker.history().len(),
        }
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Library visits | {} Active Users", self.active_count)?;

        if !self.active.is_empty() {
            writeln!(f)?;
            writeln!(f, "Active Users")?;
            let width = column_width(self.active.iter().map(|row| row.name.as_str()), 4);
            for (position, row) in self.active.iter().enumerate() {
                writeln!(
                    f,
                    "  #{:<3} {:<width$}  Since {} ({})  [{}]",
                    position + 1,
                    row.name,
                    row.since,
                    row.stay,
                    row.id
                )?;
            }
        }

        writeln!(f)?;
        if self.query.is_empty() {
            writeln!(f, "Check-out History")?;
        } else {
            writeln!(
                f,
                "Check-out History (search \"{}\": {} of {})",
                self.query,
                self.history.len(),
                self.history_total
            )?;
        }

        if self.history.is_empty() {
            return writeln!(f, "  {EMPTY_HISTORY}");
        }

        let user_w = column_width(self.history.iter().map(|row| row.user_name.as_str()), 4);
        let time_w = column_width(self.history.iter().map(|row| row.check_in.as_str()), 8);
        writeln!(f, "  {:<user_w$}  {:<time_w$}  Check Out", "User", "Check In")?;
        for row in &self.history {
            writeln!(
                f,
                "  {:<user_w$}  {:<time_w$}  {}",
                row.user_name, row.check_in, row.check_out
            )?;
        }
        Ok(())
    }
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>, header: usize) -> usize {
    cells.map(|cell| cell.chars().count()).max().unwrap_or(0).max(header)
}
