//! Entries of the per-day remote error log.

use serde::{Deserialize, Deserializer, Serialize};

/// Importance of an activity log entry.
///
/// Serialized as `info`, `warning` or `error`. Older logs spelled these
/// `OK`, `WARNING` and `ERROR` in any case; those still decode.
///
/// ```
/// use storyloom_core::Severity;
///
/// let legacy: Severity = serde_json::from_str("\"OK\"").unwrap();
/// assert_eq!(legacy, Severity::Info);
/// assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
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
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Milestones and expected conditions
    #[display("info")]
    Info,
    /// Recoverable problems
    #[display("warning")]
    Warning,
    /// Failures
    #[display("error")]
    Error,
}

impl Severity {
    /// Parse any spelling seen in stored logs.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "info" | "ok" => Some(Self::Info),
            "warning" | "warn" => Some(Self::Warning),
            "error" | "err" => Some(Self::Error),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown severity '{}'", label)))
    }
}

/// One line of `logs/errors/{date}_error.json`.
///
/// ```
/// use storyloom_core::{ErrorLogEntry, Severity};
///
/// let legacy = r#"{"timestamp": "2025-06-23T08:00:00+08:00", "type": "WARNING", "message": "no theme"}"#;
/// let entry: ErrorLogEntry = serde_json::from_str(legacy).unwrap();
/// assert_eq!(entry.severity, Severity::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    /// RFC 3339 time the event was recorded
    pub timestamp: String,
    /// Importance of the event
    #[serde(alias = "type")]
    pub severity: Severity,
    /// Human readable description
    pub message: String,
}

impl ErrorLogEntry {
    /// Build an entry stamped with `timestamp`.
    pub fn new(
        timestamp: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            severity,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_labels_any_case() {
        assert_eq!(Severity::from_label("Error"), Some(Severity::Error));
        assert_eq!(Severity::from_label(" warning "), Some(Severity::Warning));
        assert_eq!(Severity::from_label("ok"), Some(Severity::Info));
        assert_eq!(Severity::from_label("fatal"), None);
    }

    #[test]
    fn test_entry_serializes_canonical_field() {
        let entry = ErrorLogEntry::new("2025-06-23T00:00:00+08:00", Severity::Error, "boom");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["severity"], "error");
        assert!(value.get("type").is_none());
    }
}
