use crate::error::AppError;
use dashmap::DashMap;
use std::time::Instant;

/// Token bucket with continuous refill.
#[derive(Clone)]
struct Bucket {
    capacity: u32,
    tokens: f64,
    refill_per_sec: f64,
    last_update: Instant,
}

impl Bucket {
    fn new(capacity: u32, refill_per_sec: f64, now: Instant) -> Self {
        Self {
            capacity,
            tokens: capacity as f64,
            refill_per_sec,
            last_update: now,
        }
    }

    fn try_take(&mut self, now: Instant) -> bool {
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = f64::min(
            self.capacity as f64,
            self.tokens + elapsed * self.refill_per_sec,
        );
        self.last_update = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Per-caller, per-route request budgets.
pub struct RateLimiter {
    // Maps scoped keys, e.g. "uid_123:render", to their bucket.
    buckets: DashMap<String, Bucket>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    pub fn check_rate_limit(
        &self,
        key: &str,
        capacity: u32,
        refill_per_sec: f64,
    ) -> Result<(), AppError> {
        self.check_at(key, capacity, refill_per_sec, Instant::now())
    }

    fn check_at(
        &self,
        key: &str,
        capacity: u32,
        refill_per_sec: f64,
        now: Instant,
    ) -> Result<(), AppError> {
        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| Bucket::new(capacity, refill_per_sec, now));

        if bucket.try_take(now) {
            Ok(())
        } else {
            Err(AppError::RateLimitExceeded(format!("Rate limit for {}", key)))
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
