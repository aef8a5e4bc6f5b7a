//! Timing tests for the request pacer.

use std::time::{Duration, Instant};
use storyloom_rate_limit::{DEFAULT_REQUEST_DELAY, RequestPacer};

#[tokio::test]
async fn test_first_call_is_immediate() {
    let pacer = RequestPacer::new(Duration::from_secs(5));
    let start = Instant::now();
    pacer.wait().await;
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_consecutive_calls_are_spaced() {
    let pacer = RequestPacer::new(Duration::from_millis(100));
    let start = Instant::now();
    pacer.wait().await;
    pacer.wait().await;
    pacer.wait().await;
    assert!(start.elapsed() >= Duration::from_millis(190));
}

#[tokio::test]
async fn test_zero_interval_never_waits() {
    let pacer = RequestPacer::unlimited();
    let start = Instant::now();
    for _ in 0..100 {
        pacer.wait().await;
    }
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn test_clones_share_schedule() {
    let pacer = RequestPacer::new(Duration::from_millis(100));
    let other = pacer.clone();
    let start = Instant::now();
    pacer.wait().await;
    other.wait().await;
    assert!(start.elapsed() >= Duration::from_millis(90));
}

#[test]
fn test_default_delay() {
    assert_eq!(RequestPacer::default().interval(), DEFAULT_REQUEST_DELAY);
    assert_eq!(DEFAULT_REQUEST_DELAY, Duration::from_millis(1500));
}
