use chrono::Utc;
use reqwest::header::HeaderMap;

/// Below this many remaining calls every response logs a warning.
const LOW_REMAINING_WARNING: u32 = 10;

/// Rate-limit headers of a single response.
///
/// Only read to explain failures and warn early; nothing here waits or
/// budgets requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub remaining: Option<u32>,
    /// Unix timestamp at which the primary window resets.
    pub reset_at: Option<i64>,
    /// Seconds from a `retry-after` header (secondary limits).
    pub retry_after: Option<u64>,
}

impl RateLimitStatus {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        Self {
            remaining: read("x-ratelimit-remaining").and_then(|v| v.parse().ok()),
            reset_at: read("x-ratelimit-reset").and_then(|v| v.parse().ok()),
            retry_after: read("retry-after").and_then(|v| v.parse().ok()),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0) || self.retry_after.is_some()
    }

    pub fn seconds_until_reset(&self, now_unix: i64) -> u64 {
        if let Some(retry_after) = self.retry_after {
            return retry_after;
        }
        self.reset_at
            .map(|reset| (reset - now_unix).max(0) as u64)
            .unwrap_or(0)
    }

    pub fn seconds_until_reset_from_now(&self) -> u64 {
        self.seconds_until_reset(Utc::now().timestamp())
    }

    pub fn observe(&self, url: &str) {
        match self.remaining {
            Some(0) => tracing::warn!(
                "GitHub rate limit exhausted at {}, resets in {}s",
                url,
                self.seconds_until_reset_from_now()
            ),
            Some(remaining) if remaining < LOW_REMAINING_WARNING => {
                tracing::warn!("GitHub rate limit low: {} calls remaining", remaining)
            }
            _ => {}
        }
    }
}
