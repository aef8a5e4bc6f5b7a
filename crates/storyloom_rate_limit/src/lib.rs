//! Request pacing for Storyloom image services.
//!
//! Image generation and hosting APIs on free tiers reject bursts. The
//! [`RequestPacer`] spaces consecutive calls by a fixed interval using
//! governor's GCRA limiter with a burst of one.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pacer;

pub use pacer::{DEFAULT_REQUEST_DELAY, RequestPacer};
