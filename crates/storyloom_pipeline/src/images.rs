//! Image generation step.

use std::sync::Arc;
use storyloom_core::{LogRecord, RunDate, WorkItem};
use storyloom_error::StoryloomResult;
use storyloom_interface::{ImageGenerator, ImageUploader};
use storyloom_rate_limit::RequestPacer;
use storyloom_storage::LockedBlobStore;
use tracing::instrument;

use crate::activity::ActivityLog;
use crate::paths::weekly_narrative_key;
use crate::record::{load_record, update_record};
use crate::render::publish_block;
use crate::report::StepStatus;

/// Upload name for the `index`-th image (1-based) of a character's day.
///
/// ```
/// use storyloom_pipeline::image_name;
///
/// assert_eq!(
///     image_name("2025-06-23_081500", "rabbit_chef", "creative_cooking", 3),
///     "2025-06-23_081500_rabbit_chef_creative_cooking_03"
/// );
/// ```
pub fn image_name(stamp: &str, character_id: &str, theme_slug: &str, index: usize) -> String {
    format!("{}_{}_{}_{:02}", stamp, character_id, theme_slug, index)
}

/// Illustrates each story prompt and records the hosted URLs.
#[derive(Clone)]
pub struct ImageStep {
    store: LockedBlobStore,
    generator: Arc<dyn ImageGenerator>,
    uploader: Arc<dyn ImageUploader>,
    pacer: RequestPacer,
    activity: ActivityLog,
    offset_hours: i32,
}

impl std::fmt::Debug for ImageStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageStep")
            .field("pacer", &self.pacer)
            .field("offset_hours", &self.offset_hours)
            .finish()
    }
}

impl ImageStep {
    /// Step publishing through `uploader`, spacing requests with `pacer`.
    pub fn new(
        store: LockedBlobStore,
        generator: Arc<dyn ImageGenerator>,
        uploader: Arc<dyn ImageUploader>,
        pacer: RequestPacer,
        activity: ActivityLog,
        offset_hours: i32,
    ) -> Self {
        Self {
            store,
            generator,
            uploader,
            pacer,
            activity,
            offset_hours,
        }
    }

    /// Illustrate `item`'s prompts unless its images are already complete.
    ///
    /// Returns the step status and the number of images uploaded.
    #[instrument(skip_all, fields(character_id = %item.character_id(), date = %date))]
    pub async fn run(&self, item: &WorkItem, date: RunDate) -> (StepStatus, usize) {
        match self.illustrate(item, date).await {
            Ok(result) => result,
            Err(e) => {
                let reason = e.to_string();
                self.activity
                    .error(format!(
                        "Image step failed for {}: {}",
                        item.character_id(),
                        reason
                    ))
                    .await;
                (StepStatus::Failed(reason), 0)
            }
        }
    }

    async fn illustrate(&self, item: &WorkItem, date: RunDate) -> StoryloomResult<(StepStatus, usize)> {
        let record = load_record(&self.store, item, date).await?;
        if record.prompt_list.is_empty() {
            tracing::info!("No prompts to illustrate");
            return Ok((StepStatus::Skipped("no prompts".to_string()), 0));
        }
        if record.images_complete() {
            tracing::info!(images = record.images.len(), "Images already complete");
            self.publish(item, &record).await?;
            return Ok((StepStatus::Skipped("images already complete".to_string()), 0));
        }

        let mut urls = Vec::with_capacity(record.prompt_list.len());
        for (index, prompt) in record.prompt_list.iter().enumerate() {
            let index = index + 1;
            self.pacer.wait().await;
            if let Some(url) = self.illustrate_one(item, prompt, index).await {
                urls.push(url);
            }
        }

        let uploaded = urls.len();
        let total = record.prompt_list.len();
        let record = update_record(&self.store, item, date, move |record| record.images = urls).await?;
        tracing::info!(uploaded, total, "Image URLs persisted");

        self.publish(item, &record).await?;

        if uploaded == 0 {
            let reason = format!("no images uploaded for {} prompts", total);
            self.activity
                .error(format!("Image step for {}: {}", item.character_id(), reason))
                .await;
            return Ok((StepStatus::Failed(reason), 0));
        }
        Ok((StepStatus::Done, uploaded))
    }

    async fn publish(&self, item: &WorkItem, record: &LogRecord) -> StoryloomResult<()> {
        let weekly = weekly_narrative_key(record.date);
        publish_block(&self.store, &[item.narrative_path().as_str(), weekly.as_str()], record).await
    }

    /// Generate and upload one image. Every problem is a warning.
    async fn illustrate_one(&self, item: &WorkItem, prompt: &str, index: usize) -> Option<String> {
        let character_id = item.character_id();
        let image = match self.generator.generate(prompt).await {
            Ok(Some(image)) => image,
            Ok(None) => {
                self.activity
                    .warning(format!("No image generated for {} prompt {}", character_id, index))
                    .await;
                return None;
            }
            Err(e) => {
                self.activity
                    .warning(format!(
                        "Image generation failed for {} prompt {}: {}",
                        character_id, index, e
                    ))
                    .await;
                return None;
            }
        };

        let stamp = RunDate::now(self.offset_hours)
            .format("%Y-%m-%d_%H%M%S")
            .to_string();
        let name = image_name(&stamp, character_id, item.theme_slug(), index);
        match self.uploader.upload(&image, &name).await {
            Ok(Some(url)) => {
                tracing::debug!(index, url = %url, "Image uploaded");
                Some(url)
            }
            Ok(None) => {
                self.activity
                    .warning(format!("Upload of {} returned no URL", name))
                    .await;
                None
            }
            Err(e) => {
                self.activity
                    .warning(format!("Upload of {} failed: {}", name, e))
                    .await;
                None
            }
        }
    }
}
