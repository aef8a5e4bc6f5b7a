//! Storage key layout.
//!
//! Every blob the pipeline touches is addressed by a key derived from the
//! run date and, where relevant, a character id and theme slug. Keys never
//! depend on the wall clock, so rerunning a date resolves the same blobs.

use storyloom_core::RunDate;
use storyloom_error::{StorageError, StorageErrorKind, StoryloomResult};

#[track_caller]
fn checked<'a>(what: &str, value: &'a str) -> StoryloomResult<&'a str> {
    if value.trim().is_empty() || value.contains('/') || value.contains('\\') {
        return Err(StorageError::new(StorageErrorKind::InvalidKey(format!(
            "{} '{}' cannot be used in a storage key",
            what, value
        )))
        .into());
    }
    Ok(value)
}

/// `themes/{year}/{month}_{week}_theme.json`
pub fn theme_key(date: RunDate) -> String {
    format!(
        "themes/{}/{}_{}_theme.json",
        date.year(),
        date.month(),
        date.week_label()
    )
}

/// `logs/today_paths/{year-month}/{date}.json`
pub fn today_paths_key(date: RunDate) -> String {
    format!("logs/today_paths/{}/{}.json", date.year_month(), date)
}

/// `logs/errors/{date}_error.json`
pub fn error_log_key(date: RunDate) -> String {
    format!("logs/errors/{}_error.json", date)
}

/// `logs/characters/{id}/{date}_{slug}_log.json`
#[track_caller]
pub fn log_record_key(character_id: &str, date: RunDate, theme_slug: &str) -> StoryloomResult<String> {
    Ok(format!(
        "logs/characters/{}/{}_{}_log.json",
        checked("character id", character_id)?,
        date,
        checked("theme slug", theme_slug)?
    ))
}

/// `characters/{id}/{year}/{year}_{week}.txt`
#[track_caller]
pub fn narrative_key(character_id: &str, date: RunDate) -> StoryloomResult<String> {
    Ok(format!(
        "characters/{}/{}/{}_{}.txt",
        checked("character id", character_id)?,
        date.year(),
        date.year(),
        date.week_label()
    ))
}

/// `characters/weekly/{year}/{year}_{week}.txt`, shared by every character.
pub fn weekly_narrative_key(date: RunDate) -> String {
    format!(
        "characters/weekly/{}/{}_{}.txt",
        date.year(),
        date.year(),
        date.week_label()
    )
}

/// `memory/{id}/memory_{year-month}.json`
#[track_caller]
pub fn memory_key(character_id: &str, date: RunDate) -> StoryloomResult<String> {
    Ok(format!(
        "memory/{}/memory_{}.json",
        checked("character id", character_id)?,
        date.year_month()
    ))
}

/// `characters/data/{id}.json`
#[track_caller]
pub fn profile_key(character_id: &str) -> StoryloomResult<String> {
    Ok(format!(
        "characters/data/{}.json",
        checked("character id", character_id)?
    ))
}
