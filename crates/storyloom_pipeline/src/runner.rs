//! Run orchestration.

use derive_getters::Getters;
use futures::StreamExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use storyloom_core::{RunDate, ThemeDocument, WorkItem};
use storyloom_error::StoryloomResult;
use storyloom_interface::{BlobStore, ImageGenerator, ImageUploader, StoryDriver};
use storyloom_rate_limit::RequestPacer;
use storyloom_storage::LockedBlobStore;
use tokio::time::Instant;
use tracing::instrument;

use crate::activity::ActivityLog;
use crate::images::ImageStep;
use crate::paths::theme_key;
use crate::report::{CharacterReport, Outcome, RunReport};
use crate::selector::select_characters;
use crate::story::StoryStep;
use crate::work_items::build_work_items;

/// Tunables for a run.
///
/// # Examples
///
/// ```
/// use storyloom_pipeline::PipelineOptionsBuilder;
///
/// let options = PipelineOptionsBuilder::default()
///     .character_concurrency(3usize)
///     .build()
///     .unwrap();
/// assert_eq!(*options.character_concurrency(), 3);
/// assert_eq!(*options.timezone_offset_hours(), 8);
/// assert_eq!(*options.max_tokens(), 2048);
/// ```
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct PipelineOptions {
    /// Characters processed at the same time
    #[builder(default = "1")]
    character_concurrency: usize,
    /// Stop starting new characters after this long
    #[builder(default)]
    timeout: Option<Duration>,
    /// Zone used for log timestamps and upload names, hours east of UTC
    #[builder(default = "8")]
    timezone_offset_hours: i32,
    /// Completion token ceiling for story requests
    #[builder(default = "2048")]
    max_tokens: u32,
    /// Sampling temperature for story requests
    #[builder(default = "1.0")]
    temperature: f32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            character_concurrency: 1,
            timeout: None,
            timezone_offset_hours: 8,
            max_tokens: 2048,
            temperature: 1.0,
        }
    }
}

/// Shared flag asking a run to stop before its next character.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Flag in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// External controls for one run.
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    cancel: CancelFlag,
    deadline: Option<Instant>,
}

impl RunControl {
    /// Control honoring `cancel` and no deadline.
    pub fn new(cancel: CancelFlag) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// Stop starting characters after `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The cancellation flag.
    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// The daily illustrated-story pipeline.
///
/// # Examples
///
/// ```rust,ignore
/// let pipeline = DailyPipeline::new(store, driver, generator, uploader)
///     .with_options(options);
/// match pipeline.run(RunDate::today(8), &RunControl::default()).await {
///     Outcome::Completed(report) => println!("{} images", report.images_uploaded()),
///     other => println!("{}", other),
/// }
/// ```
pub struct DailyPipeline {
    store: LockedBlobStore,
    driver: Arc<dyn StoryDriver>,
    generator: Arc<dyn ImageGenerator>,
    uploader: Arc<dyn ImageUploader>,
    pacer: RequestPacer,
    options: PipelineOptions,
}

impl std::fmt::Debug for DailyPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyPipeline")
            .field("store", &self.store)
            .field("provider", &self.driver.provider_name())
            .field("pacer", &self.pacer)
            .field("options", &self.options)
            .finish()
    }
}

impl DailyPipeline {
    /// Pipeline over `store` with default options and image pacing.
    pub fn new(
        store: Arc<dyn BlobStore>,
        driver: Arc<dyn StoryDriver>,
        generator: Arc<dyn ImageGenerator>,
        uploader: Arc<dyn ImageUploader>,
    ) -> Self {
        Self {
            store: LockedBlobStore::new(store),
            driver,
            generator,
            uploader,
            pacer: RequestPacer::default(),
            options: PipelineOptions::default(),
        }
    }

    /// Replace the run options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the pacer spacing image requests.
    pub fn with_pacer(mut self, pacer: RequestPacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Current options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run every step for `date`.
    #[instrument(skip_all, fields(date = %date, backend = self.store.backend_name()))]
    pub async fn run(&self, date: RunDate, control: &RunControl) -> Outcome {
        let activity = ActivityLog::new(
            self.store.clone(),
            date,
            self.options.timezone_offset_hours,
        );
        let control = match (control.deadline, self.options.timeout) {
            (None, Some(timeout)) => control.clone().with_deadline(Instant::now() + timeout),
            _ => control.clone(),
        };

        tracing::info!("Starting daily run");
        let document = match self.load_themes(date).await {
            Ok(document) => document,
            Err(e) => return self.fail(&activity, "Theme document unusable", e).await,
        };

        let selection = match select_characters(&document, date, &activity).await {
            Ok(selection) => selection,
            Err(e) => return self.fail(&activity, "Theme document unusable", e).await,
        };
        if selection.is_empty() {
            return Outcome::NothingScheduled;
        }

        let manifest = match build_work_items(&self.store, &selection, date, &activity).await {
            Ok(manifest) => manifest,
            Err(e) => return self.fail(&activity, "Work-item build failed", e).await,
        };

        let story = StoryStep::new(
            self.store.clone(),
            self.driver.clone(),
            activity.clone(),
            self.options.max_tokens,
            self.options.temperature,
        );
        let images = ImageStep::new(
            self.store.clone(),
            self.generator.clone(),
            self.uploader.clone(),
            self.pacer.clone(),
            activity.clone(),
            self.options.timezone_offset_hours,
        );

        let items: Vec<WorkItem> = manifest.items().cloned().collect();
        let scheduled = items.len();
        let concurrency = self.options.character_concurrency.max(1);
        let mut characters: Vec<CharacterReport> = futures::stream::iter(items)
            .map(|item| {
                let (story, images, control) = (&story, &images, &control);
                async move {
                    if control.should_stop() {
                        tracing::info!(character_id = %item.character_id(), "Run stopping, character not started");
                        return None;
                    }
                    let story_status = story.run(&item, date).await;
                    let (image_status, uploaded) = images.run(&item, date).await;
                    Some(CharacterReport::new(
                        item.character_id().as_str(),
                        story_status,
                        image_status,
                        uploaded,
                    ))
                }
            })
            .buffer_unordered(concurrency)
            .filter_map(|report| async move { report })
            .collect()
            .await;
        characters.sort_by(|a, b| a.character_id().cmp(b.character_id()));

        let report = RunReport { characters };
        if report.characters.len() < scheduled {
            activity
                .warning(format!(
                    "Run for {} stopped after {} of {} characters",
                    date,
                    report.characters.len(),
                    scheduled
                ))
                .await;
            return Outcome::Cancelled(report);
        }

        tracing::info!(
            characters = report.characters.len(),
            failures = report.failures(),
            images = report.images_uploaded(),
            "Daily run complete"
        );
        Outcome::Completed(report)
    }

    async fn load_themes(&self, date: RunDate) -> StoryloomResult<ThemeDocument> {
        let path = theme_key(date);
        tracing::debug!(path = %path, "Loading theme document");
        ThemeDocument::from_value(self.store.read_json(&path).await?)
    }

    async fn fail(
        &self,
        activity: &ActivityLog,
        context: &str,
        error: storyloom_error::StoryloomError,
    ) -> Outcome {
        let reason = format!("{}: {}", context, error);
        activity.error(&reason).await;
        Outcome::Failed(reason)
    }
}
