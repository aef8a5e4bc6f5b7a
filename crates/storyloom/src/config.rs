//! Layered configuration.
//!
//! Values come from, in increasing precedence:
//! 1. Bundled defaults (`include_str!` of `storyloom.toml`)
//! 2. `~/.config/storyloom/storyloom.toml`
//! 3. `./storyloom.toml`
//! 4. `STORYLOOM__SECTION__KEY` environment variables
//!
//! Credentials never live in these files; see [`Secrets`].

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use storyloom_error::{ConfigError, StoryloomError, StoryloomResult};
use storyloom_pipeline::{PipelineOptions, PipelineOptionsBuilder};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../storyloom.toml");

/// Which blob store backs the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Directory on the local filesystem
    Filesystem,
    /// Google Cloud Storage bucket
    Gcs,
}

/// `[run]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunConfig {
    /// Hours east of UTC used for the run date and timestamps
    pub timezone_offset_hours: i32,
    /// Characters processed at the same time
    pub character_concurrency: usize,
    /// Stop starting new characters after this many seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// `[storage]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Backend selection
    pub backend: StorageBackend,
    /// Root directory for the filesystem backend
    pub root: PathBuf,
    /// API root for the gcs backend
    pub gcs_base_url: String,
}

/// `[llm]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Chat completions endpoint
    pub url: String,
    /// Model requested for stories
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token ceiling
    pub max_tokens: u32,
    /// Sent as `X-Title`
    pub app_title: String,
}

/// `[images]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImagesConfig {
    /// Image generation endpoint
    pub generation_url: String,
    /// Image model
    pub model: String,
    /// Requested size, provider default when absent
    #[serde(default)]
    pub size: Option<String>,
    /// ImGBB upload endpoint
    pub upload_url: String,
    /// Minimum spacing between prompts
    pub request_delay_ms: u64,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

/// Complete application configuration.
///
/// # Example
///
/// ```rust,no_run
/// use storyloom::StoryloomConfig;
///
/// let config = StoryloomConfig::load()?;
/// println!("model: {}", config.llm.model);
/// # Ok::<(), storyloom::StoryloomError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoryloomConfig {
    /// Run scheduling
    pub run: RunConfig,
    /// Blob storage
    pub storage: StorageConfig,
    /// Story model
    pub llm: LlmConfig,
    /// Image generation and hosting
    pub images: ImagesConfig,
    /// Local tracing output
    pub logging: LoggingConfig,
}

impl StoryloomConfig {
    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> StoryloomResult<Self> {
        builder
            .build()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!("Failed to load configuration: {}", e)))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!("Invalid configuration: {}", e)))
            })
    }

    /// Load with full precedence: defaults, home, current directory,
    /// environment.
    #[instrument]
    pub fn load() -> StoryloomResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyloom/storyloom.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }
        builder = builder
            .add_source(File::with_name("storyloom").required(false))
            .add_source(
                Environment::with_prefix("STORYLOOM")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Bundled defaults overridden by the file at `path`.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryloomResult<Self> {
        debug!("Loading configuration from file");
        Self::finish(Self::defaults().add_source(File::from(path.as_ref())))
    }

    /// Bundled defaults overridden by TOML `overrides`.
    pub fn from_toml_str(overrides: &str) -> StoryloomResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(overrides, FileFormat::Toml)))
    }

    /// Pipeline options derived from `[run]` and `[llm]`.
    pub fn pipeline_options(&self) -> StoryloomResult<PipelineOptions> {
        PipelineOptionsBuilder::default()
            .character_concurrency(self.run.character_concurrency)
            .timeout(self.run.timeout_secs.map(Duration::from_secs))
            .timezone_offset_hours(self.run.timezone_offset_hours)
            .max_tokens(self.llm.max_tokens)
            .temperature(self.llm.temperature)
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid run options: {}", e)).into())
    }

    /// Spacing between image prompts.
    pub fn image_request_delay(&self) -> Duration {
        Duration::from_millis(self.images.request_delay_ms)
    }
}

/// Credentials read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    /// OpenRouter key (`OR_DEEPKEEP_R1_API`)
    pub llm_api_key: String,
    /// ImgBB key (`IMG_BB_API_KEY`)
    pub imgbb_api_key: String,
    /// Image generation key (`IMAGE_GEN_API_KEY`)
    pub image_api_key: String,
    /// Bucket (`BUCKET_NAME`), required for the gcs backend
    pub bucket_name: Option<String>,
    /// Bearer token (`GCS_ACCESS_TOKEN`) for the gcs backend
    pub gcs_access_token: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("bucket_name", &self.bucket_name)
            .finish_non_exhaustive()
    }
}

impl Secrets {
    /// Read secrets from process environment variables.
    pub fn from_env(backend: StorageBackend) -> StoryloomResult<Self> {
        Self::from_lookup(backend, |name| std::env::var(name).ok())
    }

    /// Read secrets through `lookup`. Blank values count as missing.
    pub fn from_lookup<F>(backend: StorageBackend, lookup: F) -> StoryloomResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &str| -> StoryloomResult<String> {
            optional(name).ok_or_else(|| ConfigError::missing_env(name).into())
        };

        let bucket_name = match backend {
            StorageBackend::Gcs => Some(required("BUCKET_NAME")?),
            StorageBackend::Filesystem => optional("BUCKET_NAME"),
        };

        Ok(Self {
            llm_api_key: required("OR_DEEPKEEP_R1_API")?,
            imgbb_api_key: required("IMG_BB_API_KEY")?,
            image_api_key: required("IMAGE_GEN_API_KEY")?,
            bucket_name,
            gcs_access_token: optional("GCS_ACCESS_TOKEN"),
        })
    }
}
