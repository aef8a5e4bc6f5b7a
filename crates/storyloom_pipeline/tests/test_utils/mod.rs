//! Test utilities for pipeline tests.

pub mod failing_store;
pub mod fixtures;
pub mod mock_services;

#[allow(unused_imports)]
pub use failing_store::FailingStore;
#[allow(unused_imports)]
pub use fixtures::{activity_entries, date, reply, seed_profile, seed_themes, warnings};
#[allow(unused_imports)]
pub use mock_services::{MockDriver, RecordingUploader, ScriptedGenerator};
