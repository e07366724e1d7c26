// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Bounded retry with linear backoff.

use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::ModelError;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Backoff unit; attempt `n` (0-based) is followed by `step * (n + 1)`.
    pub step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            step: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Build the policy described by the `[llm]` table.
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            step: Duration::from_secs(config.backoff_step_secs),
        }
    }

    /// Wait after the failed attempt with 0-based index `attempt`.
    ///
    /// Saturates at `Duration::MAX` instead of overflowing.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.step
            .checked_mul(attempt.saturating_add(1))
            .unwrap_or(Duration::MAX)
    }

    /// Run `operation` until it succeeds or the attempts run out.
    ///
    /// The closure receives the 0-based attempt index. No wait follows the
    /// final attempt.
    pub fn run<T, F>(&self, mut operation: F) -> Result<T, ModelError>
    where
        F: FnMut(u32) -> Result<T, ModelError>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match operation(attempt) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::debug!(
                        attempt = attempt + 1,
                        max_attempts,
                        error = %err,
                        "model attempt failed"
                    );

                    if attempt + 1 >= max_attempts {
                        return Err(ModelError::AttemptsExhausted {
                            attempts: max_attempts,
                            last: Box::new(err),
                        });
                    }

                    let wait = self.delay_after(attempt);
                    if !wait.is_zero() {
                        std::thread::sleep(wait);
                    }
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn instant() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            step: Duration::ZERO,
        }
    }

    fn transient() -> ModelError {
        ModelError::Transport {
            url: "http://localhost:11434/api/chat".to_string(),
            message: "connection refused".to_string(),
        }
    }

    #[test]
    fn test_linear_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(0), Duration::from_secs(1));
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
    }

    #[test]
    fn test_huge_step_saturates() {
        let policy = RetryPolicy::from_config(&LlmConfig {
            backoff_step_secs: u64::MAX,
            ..LlmConfig::default()
        });
        assert_eq!(policy.delay_after(1), Duration::MAX);
        assert_eq!(policy.delay_after(u32::MAX), Duration::MAX);
        assert_eq!(policy.delay_after(0), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_succeeds_on_first_attempt() {
        let calls = Cell::new(0);
        let result = instant().run(|_| {
            calls.set(calls.get() + 1);
            Ok("ok")
        });
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_success_on_second_attempt_stops_retrying() {
        let calls = Cell::new(0);
        let result = instant().run(|attempt| {
            calls.set(calls.get() + 1);
            if attempt == 0 {
                Err(transient())
            } else {
                Ok(attempt)
            }
        });
        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_exhausts_after_max_attempts() {
        let calls = Cell::new(0);
        let result: Result<(), ModelError> = instant().run(|_| {
            calls.set(calls.get() + 1);
            Err(transient())
        });
        assert_eq!(calls.get(), 3);
        match result {
            Err(ModelError::AttemptsExhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, ModelError::Transport { .. }));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            step: Duration::ZERO,
        };
        let calls = Cell::new(0);
        let _ = policy.run(|_| -> Result<(), ModelError> {
            calls.set(calls.get() + 1);
            Err(transient())
        });
        assert_eq!(calls.get(), 1);
    }
}
