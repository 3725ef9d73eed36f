use std::time::Duration;

/// Bounded exponential backoff for the qualitative model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

/// Where a retry loop stands. A successful attempt leaves the machine directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Attempting(u32),
    Retrying { next: u32, delay: Duration },
    Exhausted,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }

    /// Delay after the given failed attempt (1-based): `initial * 2^(attempt-1)`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay.saturating_mul(factor)
    }

    pub fn start(&self) -> RetryState {
        RetryState::Attempting(1)
    }

    pub fn on_failure(&self, attempt: u32) -> RetryState {
        if attempt >= self.max_attempts {
            RetryState::Exhausted
        } else {
            RetryState::Retrying {
                next: attempt + 1,
                delay: self.delay_after(attempt),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.start(), RetryState::Attempting(1));
        assert_eq!(
            policy.on_failure(1),
            RetryState::Retrying {
                next: 2,
                delay: Duration::from_secs(5)
            }
        );
        assert_eq!(
            policy.on_failure(2),
            RetryState::Retrying {
                next: 3,
                delay: Duration::from_secs(10)
            }
        );
        assert_eq!(policy.on_failure(3), RetryState::Exhausted);
    }

    #[test]
    fn test_at_least_one_attempt() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.on_failure(1), RetryState::Exhausted);
    }

    #[test]
    fn test_delay_saturates() {
        let policy = RetryPolicy::new(100, Duration::from_secs(1));
        assert_eq!(policy.delay_after(64), Duration::from_secs(u64::from(u32::MAX)));
        let huge = RetryPolicy::new(3, Duration::MAX);
        assert_eq!(huge.delay_after(2), Duration::MAX);
    }
}
