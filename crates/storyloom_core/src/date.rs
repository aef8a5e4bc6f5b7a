//! The calendar date a pipeline run works on.

use chrono::{Datelike, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use storyloom_error::{ConfigError, StoryloomResult};

/// Target date of a pipeline run.
///
/// Every storage key and log entry is derived from this value, so a run for
/// an arbitrary past date resolves exactly the same blobs as the run that
/// happened on that day.
///
/// # Examples
///
/// ```
/// use storyloom_core::RunDate;
///
/// let date = RunDate::parse("2025-06-23").unwrap();
/// assert_eq!(date.to_string(), "2025-06-23");
/// assert_eq!(date.year(), "2025");
/// assert_eq!(date.month(), "06");
/// assert_eq!(date.year_month(), "2025-06");
/// assert_eq!(date.week_label(), "W26");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct RunDate(NaiveDate);

impl RunDate {
    /// Wrap a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a `YYYY-MM-DD` string.
    #[track_caller]
    pub fn parse(value: &str) -> StoryloomResult<Self> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| ConfigError::new(format!("Invalid date '{}': {}", value, e)).into())
    }

    /// Today's date in the zone `offset_hours` east of UTC.
    ///
    /// Offsets outside ±23 hours fall back to UTC.
    pub fn today(offset_hours: i32) -> Self {
        Self(Self::now(offset_hours).date_naive())
    }

    /// Current wall-clock time in the zone `offset_hours` east of UTC.
    pub fn now(offset_hours: i32) -> chrono::DateTime<FixedOffset> {
        let offset = offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Utc::now().with_timezone(&offset)
    }

    /// The wrapped calendar date.
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Four-digit calendar year, e.g. `2025`.
    pub fn year(&self) -> String {
        self.0.format("%Y").to_string()
    }

    /// Zero-padded month, e.g. `06`.
    pub fn month(&self) -> String {
        self.0.format("%m").to_string()
    }

    /// Year and month, e.g. `2025-06`.
    pub fn year_month(&self) -> String {
        self.0.format("%Y-%m").to_string()
    }

    /// ISO week label without zero padding, e.g. `W26` or `W5`.
    pub fn week_label(&self) -> String {
        format!("W{}", self.0.iso_week().week())
    }
}

impl From<NaiveDate> for RunDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for RunDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
