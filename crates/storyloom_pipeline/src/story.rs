//! Story generation step.

use std::sync::Arc;
use std::time::Instant;
use storyloom_core::{CharacterProfile, LogRecord, RunDate, WorkItem};
use storyloom_error::{JsonError, StoryloomResult};
use storyloom_interface::{BlobStore, StoryDriver};
use storyloom_storage::LockedBlobStore;
use tracing::instrument;

use crate::activity::ActivityLog;
use crate::extraction::parse_story_reply;
use crate::paths::{memory_key, profile_key, weekly_narrative_key};
use crate::prompt::build_story_prompt;
use crate::record::{load_record, update_record};
use crate::render::publish_block;
use crate::report::StepStatus;

/// Writes one story per character and renders it into the narratives.
#[derive(Clone)]
pub struct StoryStep {
    store: LockedBlobStore,
    driver: Arc<dyn StoryDriver>,
    activity: ActivityLog,
    max_tokens: u32,
    temperature: f32,
}

impl std::fmt::Debug for StoryStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryStep")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl StoryStep {
    /// Step writing through `store` with `driver`.
    pub fn new(
        store: LockedBlobStore,
        driver: Arc<dyn StoryDriver>,
        activity: ActivityLog,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            store,
            driver,
            activity,
            max_tokens,
            temperature,
        }
    }

    /// Generate the story for `item` unless its record already has one.
    ///
    /// Failures are logged and reported; they never propagate.
    #[instrument(skip_all, fields(character_id = %item.character_id(), date = %date))]
    pub async fn run(&self, item: &WorkItem, date: RunDate) -> StepStatus {
        match self.generate(item, date).await {
            Ok(status) => status,
            Err(e) => {
                let reason = e.to_string();
                self.activity
                    .error(format!(
                        "Story generation failed for {}: {}",
                        item.character_id(),
                        reason
                    ))
                    .await;
                StepStatus::Failed(reason)
            }
        }
    }

    async fn generate(&self, item: &WorkItem, date: RunDate) -> StoryloomResult<StepStatus> {
        let character_id = item.character_id();
        let record = load_record(&self.store, item, date).await?;
        if record.has_story() {
            tracing::info!("Story already written, skipping");
            self.publish(item, &record).await?;
            return Ok(StepStatus::Skipped("story already written".to_string()));
        }

        let profile = self.load_profile(character_id).await?;
        let memory = self.load_memory(character_id, date).await?;
        let prompt = build_story_prompt(
            &profile,
            item.theme_slug(),
            &memory,
            self.max_tokens,
            self.temperature,
        );

        let started = Instant::now();
        let response = self.driver.generate(&prompt.request).await?;
        let duration = started.elapsed().as_secs_f64();
        tracing::debug!(duration, "Model replied");

        let parts = parse_story_reply(response.text())?;
        let model_name = match response.model_name() {
            "" => self.driver.model_name().to_string(),
            served => served.to_string(),
        };
        let prompts = parts.prompt_list.len();

        let record = update_record(&self.store, item, date, move |record| {
            record.apply_story(parts, model_name, prompt.token_count, duration)
        })
        .await?;
        tracing::info!(prompts, tokens = record.token_count, "Story persisted");

        self.publish(item, &record).await?;
        Ok(StepStatus::Done)
    }

    async fn load_profile(&self, character_id: &str) -> StoryloomResult<CharacterProfile> {
        let path = profile_key(character_id)?;
        let value = self.store.read_json(&path).await?;
        serde_json::from_value(value).map_err(|e| JsonError::at_path(path, e.to_string()).into())
    }

    async fn load_memory(&self, character_id: &str, date: RunDate) -> StoryloomResult<String> {
        let path = memory_key(character_id, date)?;
        match self.store.read_text(&path).await {
            Ok(memory) => Ok(memory),
            Err(e) if e.is_not_found() => {
                self.activity
                    .info(format!(
                        "No memory for {} in {}, starting fresh",
                        character_id,
                        date.year_month()
                    ))
                    .await;
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn publish(&self, item: &WorkItem, record: &LogRecord) -> StoryloomResult<()> {
        let weekly = weekly_narrative_key(record.date);
        publish_block(&self.store, &[item.narrative_path().as_str(), weekly.as_str()], record).await
    }
}
