//! Test utilities for Storyloom client tests.

pub mod http_stub;

#[allow(unused_imports)]
pub use http_stub::{CapturedRequest, serve_once};
