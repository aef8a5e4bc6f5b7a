//! Loading and updating per-character log records.

use serde_json::Value;
use storyloom_core::{LogRecord, RunDate, WorkItem};
use storyloom_error::{PipelineError, PipelineErrorKind, StoryloomResult};
use storyloom_interface::BlobStore;
use storyloom_storage::LockedBlobStore;

/// True for a stored value the builder treats as "no record yet".
pub(crate) fn is_blank_record(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Decode a stored record. An absent or `{}` document becomes a fresh
/// empty record for `item`.
#[track_caller]
pub(crate) fn decode_record(
    path: &str,
    value: Option<Value>,
    date: RunDate,
    item: &WorkItem,
) -> StoryloomResult<LogRecord> {
    match value {
        Some(value) if !is_blank_record(&value) => {
            serde_json::from_value(value).map_err(|e| {
                PipelineError::new(PipelineErrorKind::InvalidRecord {
                    path: path.to_string(),
                    reason: e.to_string(),
                })
                .into()
            })
        }
        _ => Ok(LogRecord::new_empty(
            date,
            item.character_id().as_str(),
            item.theme_slug().as_str(),
        )),
    }
}

#[track_caller]
fn encode_record(path: &str, record: &LogRecord) -> StoryloomResult<Value> {
    serde_json::to_value(record).map_err(|e| {
        PipelineError::new(PipelineErrorKind::InvalidRecord {
            path: path.to_string(),
            reason: e.to_string(),
        })
        .into()
    })
}

/// Current record for `item`.
pub(crate) async fn load_record(
    store: &LockedBlobStore,
    item: &WorkItem,
    date: RunDate,
) -> StoryloomResult<LogRecord> {
    let path = item.log_path();
    let value = store.read_json(path).await?;
    decode_record(path, Some(value), date, item)
}

/// Apply `change` to the stored record under the record's lock and write
/// the whole document back. Returns the record as written.
pub(crate) async fn update_record<F>(
    store: &LockedBlobStore,
    item: &WorkItem,
    date: RunDate,
    change: F,
) -> StoryloomResult<LogRecord>
where
    F: FnOnce(&mut LogRecord) + Send,
{
    let path = item.log_path();
    let written = store
        .update_json::<Value, _>(path, |current| {
            let mut record = decode_record(path, current, date, item)?;
            change(&mut record);
            encode_record(path, &record)
        })
        .await?;
    decode_record(path, Some(written), date, item)
}
