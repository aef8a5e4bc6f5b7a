//! Daily run command handler.

use std::sync::Arc;
use storyloom::{
    BlobStore, CancelFlag, DailyPipeline, FileSystemBlobStore, GcsBlobStore, GcsConfig,
    ImgBbUploader, OpenAICompatibleClient, OpenAIImageClient, Outcome, RequestPacer, RunControl,
    RunDate, Secrets, StorageBackend, StoryloomConfig, StoryloomResult,
};
use storyloom_error::ConfigError;
use tracing::{info, instrument, warn};

fn open_store(config: &StoryloomConfig, secrets: &Secrets) -> StoryloomResult<Arc<dyn BlobStore>> {
    match config.storage.backend {
        StorageBackend::Filesystem => {
            Ok(Arc::new(FileSystemBlobStore::new(&config.storage.root)?))
        }
        StorageBackend::Gcs => {
            let bucket = secrets
                .bucket_name
                .clone()
                .ok_or_else(|| ConfigError::missing_env("BUCKET_NAME"))?;
            let mut gcs = GcsConfig::new(bucket, secrets.gcs_access_token.clone());
            gcs.base_url = config.storage.gcs_base_url.clone();
            Ok(Arc::new(GcsBlobStore::new(gcs)?))
        }
    }
}

/// Execute one daily run.
///
/// Ctrl-C stops the run before its next character.
#[instrument(skip(config))]
pub async fn run_daily(config: &StoryloomConfig, date: Option<&str>) -> StoryloomResult<Outcome> {
    let secrets = Secrets::from_env(config.storage.backend)?;
    let date = match date {
        Some(date) => RunDate::parse(date)?,
        None => RunDate::today(config.run.timezone_offset_hours),
    };

    let store = open_store(config, &secrets)?;
    let driver = OpenAICompatibleClient::new(
        secrets.llm_api_key.clone(),
        config.llm.model.clone(),
        config.llm.url.clone(),
        "openrouter",
    )
    .with_app_title(config.llm.app_title.clone());
    let generator = OpenAIImageClient::new(
        secrets.image_api_key.clone(),
        config.images.model.clone(),
        config.images.generation_url.clone(),
        config.images.size.clone(),
    );
    let uploader = ImgBbUploader::new(
        secrets.imgbb_api_key.clone(),
        config.images.upload_url.clone(),
    );

    let pipeline = DailyPipeline::new(
        store,
        Arc::new(driver),
        Arc::new(generator),
        Arc::new(uploader),
    )
    .with_options(config.pipeline_options()?)
    .with_pacer(RequestPacer::new(config.image_request_delay()));

    let cancel = CancelFlag::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing current characters");
            on_signal.cancel();
        }
    });

    info!(date = %date, backend = ?config.storage.backend, "Running daily pipeline");
    Ok(pipeline.run(date, &RunControl::new(cancel)).await)
}
