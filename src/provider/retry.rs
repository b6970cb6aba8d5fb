// src/provider/retry.rs — Per-provider retry schedule
//
// A tiny state machine: after each failed attempt it either yields the delay
// to wait before the next attempt or says to give up. Sleeping is delegated
// to a `Sleeper` so tests can observe delays without waiting for them.

use async_trait::async_trait;
use std::time::Duration;

/// Largest exponent applied to the base delay.
const MAX_EXPONENT: u32 = 16;

/// Longest server-requested wait honoured before a retry.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Wait this long, then make the next attempt.
    Retry(Duration),
    /// Attempts are used up.
    GiveUp,
}

#[derive(Debug, Clone)]
pub struct Backoff {
    max_attempts: u32,
    failed: u32,
    base: Duration,
}

impl Backoff {
    pub fn new(max_attempts: u32, base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            failed: 0,
            base,
        }
    }

    /// Attempts that have failed so far.
    pub fn failed_attempts(&self) -> u32 {
        self.failed
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Record a failed attempt. Attempt `n` (1-based) that is not the last
    /// one is followed by a delay of `base * 2^n`.
    pub fn after_failure(&mut self) -> Step {
        self.failed += 1;
        if self.failed >= self.max_attempts {
            return Step::GiveUp;
        }
        Step::Retry(delay_for_attempt(self.base, self.failed))
    }
}

/// `base * 2^attempt`, saturating.
pub fn delay_for_attempt(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(1u32 << attempt.min(MAX_EXPONENT))
}

/// The server's `Retry-After` (capped) when it sent one, else `computed`.
pub fn retry_delay(computed: Duration, retry_after: Option<Duration>) -> Duration {
    retry_after.map_or(computed, |hint| hint.min(MAX_RETRY_AFTER))
}

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_two_attempts_one_delay() {
        let mut b = Backoff::new(2, SECOND);
        assert_eq!(b.after_failure(), Step::Retry(Duration::from_secs(2)));
        assert_eq!(b.after_failure(), Step::GiveUp);
        assert_eq!(b.failed_attempts(), 2);
    }

    #[test]
    fn test_three_attempts_doubling() {
        let mut b = Backoff::new(3, SECOND);
        assert_eq!(b.after_failure(), Step::Retry(Duration::from_secs(2)));
        assert_eq!(b.after_failure(), Step::Retry(Duration::from_secs(4)));
        assert_eq!(b.after_failure(), Step::GiveUp);
    }

    #[test]
    fn test_single_attempt_never_retries() {
        let mut b = Backoff::new(1, SECOND);
        assert_eq!(b.after_failure(), Step::GiveUp);
    }

    #[test]
    fn test_zero_attempts_treated_as_one() {
        let b = Backoff::new(0, SECOND);
        assert_eq!(b.max_attempts(), 1);
    }

    #[test]
    fn test_delay_for_attempt() {
        assert_eq!(delay_for_attempt(SECOND, 1), Duration::from_secs(2));
        assert_eq!(delay_for_attempt(SECOND, 3), Duration::from_secs(8));
        assert_eq!(
            delay_for_attempt(Duration::from_millis(250), 2),
            Duration::from_secs(1)
        );
        // exponent is capped rather than overflowing
        assert_eq!(delay_for_attempt(SECOND, 64), delay_for_attempt(SECOND, 16));
    }

    #[test]
    fn test_retry_delay_prefers_server_hint() {
        let computed = Duration::from_secs(2);
        assert_eq!(retry_delay(computed, None), computed);
        assert_eq!(
            retry_delay(computed, Some(Duration::from_secs(7))),
            Duration::from_secs(7)
        );
        assert_eq!(
            retry_delay(computed, Some(Duration::from_millis(u64::MAX))),
            MAX_RETRY_AFTER
        );
    }

    #[tokio::test]
    async fn test_tokio_sleeper_zero() {
        TokioSleeper.sleep(Duration::ZERO).await;
    }
}
