//! Rate limit headers and client-side throttling.
//!
//! AniList allows a fixed number of requests per minute and reports the
//! budget in `X-RateLimit-*` headers; throttled calls get HTTP 429 with a
//! `Retry-After`. Nothing here retries a failed call.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Rate limit information parsed from response headers.
///
/// Headers read:
/// - `X-RateLimit-Limit`: requests allowed per window
/// - `X-RateLimit-Remaining`: requests left in the window
/// - `X-RateLimit-Reset`: unix timestamp when the window resets
/// - `Retry-After`: seconds to wait (on 429 responses)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset_timestamp: Option<u64>,
    pub retry_after: Option<Duration>,
}

impl RateLimitInfo {
    /// Parse rate limit information from response headers.
    pub fn from_headers(headers: &http::HeaderMap) -> Self {
        Self {
            limit: parse_u64(headers, "x-ratelimit-limit"),
            remaining: parse_u64(headers, "x-ratelimit-remaining"),
            reset_timestamp: parse_u64(headers, "x-ratelimit-reset"),
            retry_after: parse_u64(headers, "retry-after").map(Duration::from_secs),
        }
    }

    /// Whether any rate limit header was present.
    pub fn is_present(&self) -> bool {
        self.limit.is_some()
            || self.remaining.is_some()
            || self.reset_timestamp.is_some()
            || self.retry_after.is_some()
    }

    /// Whether the budget is exhausted.
    pub fn is_rate_limited(&self) -> bool {
        self.remaining == Some(0) || self.retry_after.is_some()
    }

    /// How long to wait before the next request is allowed, if at all.
    pub fn wait_duration(&self) -> Option<Duration> {
        if let Some(retry_after) = self.retry_after {
            return Some(retry_after);
        }
        if self.remaining != Some(0) {
            return None;
        }
        let reset = self.reset_timestamp?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        (reset > now).then(|| Duration::from_secs(reset - now))
    }
}

fn parse_u64(headers: &http::HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

/// Token bucket limiter used to stay under a requests-per-minute budget.
///
/// Each request takes one token; tokens refill continuously up to the
/// bucket size.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: f64,
    refill_interval: Duration,
    state: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// A limiter allowing `requests` per minute with a burst of the same size.
    pub fn per_minute(requests: u32) -> Self {
        Self::with_burst(requests, requests)
    }

    /// A limiter allowing `requests` per minute and at most `burst`
    /// back-to-back.
    pub fn with_burst(requests: u32, burst: u32) -> Self {
        let requests = requests.max(1);
        let capacity = f64::from(burst.max(1));
        Self {
            capacity,
            refill_interval: Duration::from_secs(60) / requests,
            state: Mutex::new(Bucket {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Time between two refilled tokens.
    pub fn refill_interval(&self) -> Duration {
        self.refill_interval
    }

    /// Take a token if one is available.
    pub fn try_acquire(&self) -> bool {
        let mut bucket = self.state.lock();
        self.refill(&mut bucket);
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Time until a token is available, or `None` if one is available now.
    pub fn wait_time(&self) -> Option<Duration> {
        let mut bucket = self.state.lock();
        self.refill(&mut bucket);
        if bucket.tokens >= 1.0 {
            None
        } else {
            Some(self.refill_interval.mul_f64(1.0 - bucket.tokens))
        }
    }

    /// Wait until a token is available and take it.
    pub async fn acquire(&self) {
        loop {
            if self.try_acquire() {
                return;
            }
            let wait = self.wait_time().unwrap_or(Duration::ZERO);
            tracing::debug!(
                target: anilist_core::logging::targets::TRANSPORT,
                wait_ms = wait.as_millis() as u64,
                "throttling request"
            );
            tokio::time::sleep(wait).await;
        }
    }

    fn refill(&self, bucket: &mut Bucket) {
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill);
        let added = elapsed.as_secs_f64() / self.refill_interval.as_secs_f64();
        bucket.tokens = (bucket.tokens + added).min(self.capacity);
        bucket.last_refill = now;
    }
}
