//! Request rate limiting
//!
//! Admits at most `max_per_second` requests per second across the service.
//! Callers pass the current time in, so the limiter is testable without a
//! real clock.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Rejection with the time left until the next request is admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Too many requests. Please wait before trying again.")]
pub struct RateLimited {
    pub retry_after: Duration,
}

/// Minimum-interval rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_admitted: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter admitting `max_per_second` requests per second.
    /// Zero disables limiting.
    pub fn new(max_per_second: u32) -> Self {
        let min_interval = if max_per_second == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / max_per_second
        };
        Self {
            min_interval,
            last_admitted: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Admit or reject a request arriving at `now`
    pub fn check(&self, now: Instant) -> Result<(), RateLimited> {
        let mut last = self.last_admitted.lock();

        if let Some(previous) = *last {
            let elapsed = now.saturating_duration_since(previous);
            if elapsed < self.min_interval {
                return Err(RateLimited {
                    retry_after: self.min_interval - elapsed,
                });
            }
        }

        *last = Some(now);
        Ok(())
    }
}
