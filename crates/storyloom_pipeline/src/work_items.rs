//! The daily work-item builder.

use serde_json::Value;
use storyloom_core::{LogRecord, RunDate, TodayManifest, WorkItem};
use storyloom_error::{JsonError, StoryloomErrorKind, StoryloomResult};
use storyloom_interface::BlobStore;
use storyloom_storage::LockedBlobStore;
use tracing::instrument;

use crate::activity::ActivityLog;
use crate::paths::{log_record_key, narrative_key, today_paths_key, weekly_narrative_key};
use crate::record::is_blank_record;
use crate::render::NARRATIVE_HEADER;
use crate::selector::Selection;

/// Prepare every blob today's characters need and persist the manifest.
///
/// Existing manifest entries are reused and entries for characters not
/// selected today are kept. Log records are only created where none
/// exists, so a second call for the same date changes nothing. The
/// manifest is written last; any storage failure before that aborts the
/// build with nothing written to it.
///
/// Returns the work items for the selected characters only.
#[instrument(skip_all, fields(date = %date, characters = selection.len()))]
pub async fn build_work_items(
    store: &LockedBlobStore,
    selection: &Selection,
    date: RunDate,
    activity: &ActivityLog,
) -> StoryloomResult<TodayManifest> {
    let manifest_path = today_paths_key(date);
    let parsed = match store.read_json(&manifest_path).await {
        Ok(value) => TodayManifest::from_value(value),
        Err(e) if matches!(e.kind(), StoryloomErrorKind::Json(_)) => Err(e),
        Err(e) => return Err(e),
    };
    let mut manifest = match parsed {
        Ok(manifest) => manifest,
        Err(e) => {
            activity
                .error(format!("Rebuilding unreadable manifest {}: {}", manifest_path, e))
                .await;
            TodayManifest::default()
        }
    };

    ensure_narrative(store, &weekly_narrative_key(date)).await?;

    let mut today = TodayManifest::default();
    for (character_id, theme_slug) in selection {
        let item = match manifest.get(character_id) {
            Some(existing) => existing.clone(),
            None => WorkItem::new(
                character_id.as_str(),
                theme_slug.as_str(),
                log_record_key(character_id, date, theme_slug)?,
                narrative_key(character_id, date)?,
            ),
        };

        ensure_record(store, &item, date, activity).await?;
        ensure_narrative(store, item.narrative_path()).await?;

        manifest.insert(item.clone());
        today.insert(item);
    }

    store
        .write_json(&manifest_path, &manifest.to_value()?)
        .await?;
    tracing::info!(path = %manifest_path, items = today.len(), "Manifest written");
    Ok(today)
}

/// Create an empty log record unless one with content already exists.
#[instrument(skip(store, item, activity), fields(character_id = %item.character_id()))]
async fn ensure_record(
    store: &LockedBlobStore,
    item: &WorkItem,
    date: RunDate,
    activity: &ActivityLog,
) -> StoryloomResult<()> {
    let path = item.log_path();
    let _guard = store.lock(path).await;
    let inner = store.inner();

    let current = match inner.read_text(path).await {
        Ok(text) => Some(text),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e),
    };
    let missing = match current.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(text) => match serde_json::from_str::<Value>(text) {
            Ok(value) => is_blank_record(&value),
            Err(e) => {
                activity
                    .warning(format!("Leaving unreadable log record {} in place: {}", path, e))
                    .await;
                false
            }
        },
    };
    if !missing {
        tracing::debug!(path = %path, "Log record already present");
        return Ok(());
    }

    let record = LogRecord::new_empty(
        date,
        item.character_id().as_str(),
        item.theme_slug().as_str(),
    );
    let value = serde_json::to_value(&record).map_err(|e| JsonError::at_path(path, e.to_string()))?;
    inner.write_json(path, &value).await?;
    tracing::debug!(path = %path, "Empty log record created");
    Ok(())
}

/// Initialize a narrative with its header line when it does not exist.
async fn ensure_narrative(store: &LockedBlobStore, path: &str) -> StoryloomResult<()> {
    let _guard = store.lock(path).await;
    let inner = store.inner();
    if !inner.exists(path).await? {
        inner.write_text(path, NARRATIVE_HEADER).await?;
        tracing::debug!(path, "Narrative initialized");
    }
    Ok(())
}
