//! Configuration layering and secret lookup.

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;
use storyloom::{Secrets, StorageBackend, StoryloomConfig};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn test_bundled_defaults() {
    let config = StoryloomConfig::from_toml_str("").unwrap();

    assert_eq!(config.run.timezone_offset_hours, 8);
    assert_eq!(config.run.character_concurrency, 1);
    assert_eq!(config.run.timeout_secs, None);
    assert_eq!(config.storage.backend, StorageBackend::Filesystem);
    assert_eq!(config.llm.model, "deepseek/deepseek-r1-0528:free");
    assert_eq!(config.llm.max_tokens, 2048);
    assert_eq!(config.llm.app_title, "AI_Animal_Story_Generator");
    assert_eq!(config.image_request_delay(), Duration::from_millis(1500));
    assert!(!config.logging.json);

    let options = config.pipeline_options().unwrap();
    assert_eq!(*options.max_tokens(), 2048);
    assert_eq!(*options.timezone_offset_hours(), 8);
}

#[test]
fn test_overrides_merge_per_key() {
    let config = StoryloomConfig::from_toml_str(
        r#"
        [run]
        character_concurrency = 3
        timeout_secs = 600

        [storage]
        backend = "gcs"
        "#,
    )
    .unwrap();

    assert_eq!(config.run.character_concurrency, 3);
    assert_eq!(config.run.timezone_offset_hours, 8);
    assert_eq!(config.storage.backend, StorageBackend::Gcs);
    let options = config.pipeline_options().unwrap();
    assert_eq!(*options.timeout(), Some(Duration::from_secs(600)));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[logging]\nlevel = \"debug\"\njson = true").unwrap();

    let config = StoryloomConfig::from_file(file.path()).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn test_unknown_backend_rejected() {
    let result = StoryloomConfig::from_toml_str("[storage]\nbackend = \"ftp\"");
    assert!(result.is_err());
}

#[test]
fn test_secrets_required() {
    let full = env(&[
        ("OR_DEEPKEEP_R1_API", "or-key"),
        ("IMG_BB_API_KEY", "bb-key"),
        ("IMAGE_GEN_API_KEY", "img-key"),
    ]);
    let secrets = Secrets::from_lookup(StorageBackend::Filesystem, full).unwrap();
    assert_eq!(secrets.llm_api_key, "or-key");
    assert!(secrets.bucket_name.is_none());

    let missing = env(&[("OR_DEEPKEEP_R1_API", "or-key"), ("IMAGE_GEN_API_KEY", "img-key")]);
    let err = Secrets::from_lookup(StorageBackend::Filesystem, missing).unwrap_err();
    assert!(err.to_string().contains("IMG_BB_API_KEY"));
}

#[test]
fn test_gcs_needs_bucket() {
    let no_bucket = env(&[
        ("OR_DEEPKEEP_R1_API", "or-key"),
        ("IMG_BB_API_KEY", "bb-key"),
        ("IMAGE_GEN_API_KEY", "img-key"),
        ("BUCKET_NAME", "  "),
    ]);
    let err = Secrets::from_lookup(StorageBackend::Gcs, no_bucket).unwrap_err();
    assert!(err.to_string().contains("BUCKET_NAME"));
}

#[test]
fn test_secrets_debug_hides_keys() {
    let secrets = Secrets::from_lookup(
        StorageBackend::Filesystem,
        env(&[
            ("OR_DEEPKEEP_R1_API", "or-key"),
            ("IMG_BB_API_KEY", "bb-key"),
            ("IMAGE_GEN_API_KEY", "img-key"),
        ]),
    )
    .unwrap();
    assert!(!format!("{:?}", secrets).contains("or-key"));
}
