//! Fixed-interval pacing built on governor.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Delay between image requests used when nothing else is configured.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(1500);

/// Spaces calls at least `interval` apart.
///
/// The first call passes immediately. Clones share the same schedule, so
/// one pacer handed to several tasks paces them collectively.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use storyloom_rate_limit::RequestPacer;
///
/// # async fn example() {
/// let pacer = RequestPacer::new(Duration::from_millis(1500));
/// for prompt in ["a fox at dawn", "a fox at dusk"] {
///     pacer.wait().await;
///     // call the image service with `prompt`
/// #   let _ = prompt;
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct RequestPacer {
    interval: Duration,
    limiter: Option<Arc<DirectRateLimiter>>,
}

impl std::fmt::Debug for RequestPacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPacer")
            .field("interval", &self.interval)
            .finish()
    }
}

impl RequestPacer {
    /// Pacer with the given minimum spacing. A zero interval never waits.
    pub fn new(interval: Duration) -> Self {
        let limiter = Quota::with_period(interval)
            .map(|quota| Arc::new(RateLimiter::direct(quota)));
        Self { interval, limiter }
    }

    /// Pacer that never waits.
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Configured minimum spacing.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the next call may go out.
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter
            && limiter.check().is_err()
        {
            tracing::debug!(interval_ms = self.interval.as_millis() as u64, "Pacing request");
            limiter.until_ready().await;
        }
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}
