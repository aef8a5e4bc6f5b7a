//! Remote activity log.

use serde_json::Value;
use storyloom_core::{ErrorLogEntry, RunDate, Severity};
use storyloom_error::{JsonError, StoryloomResult};
use storyloom_storage::LockedBlobStore;

use crate::paths::error_log_key;

/// Appends notable events to `logs/errors/{date}_error.json`.
///
/// Every event is traced locally first. Problems reaching the remote log
/// are traced and swallowed; logging never fails a run.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    store: LockedBlobStore,
    path: String,
    offset_hours: i32,
}

impl ActivityLog {
    /// Log for the run on `date`, stamping entries in the zone
    /// `offset_hours` east of UTC.
    pub fn new(store: LockedBlobStore, date: RunDate, offset_hours: i32) -> Self {
        Self {
            store,
            path: error_log_key(date),
            offset_hours,
        }
    }

    /// Key of the remote log.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Record `message` at `severity`.
    pub async fn log_event(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!(%message, "Activity"),
            Severity::Warning => tracing::warn!(%message, "Activity"),
            Severity::Error => tracing::error!(%message, "Activity"),
        }

        let timestamp = RunDate::now(self.offset_hours).to_rfc3339();
        let entry = ErrorLogEntry::new(timestamp, severity, message);
        if let Err(e) = self.append(entry).await {
            tracing::warn!(path = %self.path, error = %e, "Failed to update remote activity log");
        }
    }

    async fn append(&self, entry: ErrorLogEntry) -> StoryloomResult<()> {
        let path = self.path.clone();
        let entry = serde_json::to_value(entry).map_err(|e| JsonError::new(e.to_string()))?;
        self.store
            .update_json::<Value, _>(&self.path, move |current| match current {
                None => Ok(Value::Array(vec![entry])),
                Some(Value::Object(map)) if map.is_empty() => Ok(Value::Array(vec![entry])),
                Some(Value::Array(mut entries)) => {
                    entries.push(entry);
                    Ok(Value::Array(entries))
                }
                Some(_) => Err(JsonError::at_path(path, "activity log is not a JSON array").into()),
            })
            .await?;
        Ok(())
    }

    /// Record an informational event.
    pub async fn info(&self, message: impl AsRef<str>) {
        self.log_event(message.as_ref(), Severity::Info).await
    }

    /// Record a recoverable problem.
    pub async fn warning(&self, message: impl AsRef<str>) {
        self.log_event(message.as_ref(), Severity::Warning).await
    }

    /// Record a failure.
    pub async fn error(&self, message: impl AsRef<str>) {
        self.log_event(message.as_ref(), Severity::Error).await
    }
}
