//! Retry-until-assert engine.
//!
//! Re-invokes a probe on a fixed poll interval until its assertions hold or
//! the policy's maximum wait elapses. Only assertion failures are retried;
//! transport failures end the loop immediately.

use std::future::Future;
use std::time::Duration;

use petstore_domain::{AssertionFailure, PollPolicy};
use thiserror::Error;
use tokio::time::{Instant, sleep};

use crate::ports::HttpClientError;

/// Why a single probe attempt failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    /// The response arrived but did not satisfy its expectations.
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// The exchange itself failed.
    #[error(transparent)]
    Transport(#[from] HttpClientError),
}

/// Terminal failure of [`retry_until`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RetryError {
    /// Every attempt failed its assertions; carries the last failure.
    #[error("{failure} (gave up after {attempts} attempt(s) in {elapsed:?})")]
    Exhausted {
        /// Failure of the final attempt.
        failure: AssertionFailure,
        /// Number of attempts made.
        attempts: u32,
        /// Time since the first attempt started.
        elapsed: Duration,
    },

    /// A probe hit a transport error.
    #[error("transport error on attempt {attempt}: {source}")]
    Transport {
        /// Underlying error.
        source: HttpClientError,
        /// Attempt that failed.
        attempt: u32,
    },
}

impl RetryError {
    /// The assertion failure of the last attempt, if polling was exhausted.
    #[must_use]
    pub const fn last_failure(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Exhausted { failure, .. } => Some(failure),
            Self::Transport { .. } => None,
        }
    }

    /// Number of attempts made before giving up.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
            Self::Transport { attempt, .. } => *attempt,
        }
    }
}

/// Polls `probe` until it succeeds.
///
/// The first attempt runs immediately. After a failed attempt the engine
/// sleeps for the poll interval, clamped so that the last attempt starts no
/// later than `max_wait` after the first. An attempt that ends past the
/// deadline is still reported, never replaced by a synthetic timeout.
///
/// # Errors
///
/// Returns [`RetryError::Exhausted`] with the last assertion failure once
/// `max_wait` has elapsed, or [`RetryError::Transport`] as soon as a probe
/// reports a transport error.
pub async fn retry_until<T, F, Fut>(policy: PollPolicy, mut probe: F) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProbeError>>,
{
    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts = attempts.saturating_add(1);

        match probe().await {
            Ok(value) => {
                tracing::debug!(attempts, elapsed = ?start.elapsed(), "probe succeeded");
                return Ok(value);
            }
            Err(ProbeError::Transport(source)) => {
                tracing::warn!(attempt = attempts, error = %source, "probe hit transport error");
                return Err(RetryError::Transport {
                    source,
                    attempt: attempts,
                });
            }
            Err(ProbeError::Assertion(failure)) => {
                let elapsed = start.elapsed();
                if elapsed >= policy.max_wait() {
                    tracing::warn!(attempts, ?elapsed, %failure, "polling exhausted");
                    return Err(RetryError::Exhausted {
                        failure,
                        attempts,
                        elapsed,
                    });
                }

                let pause = policy.poll_interval().min(policy.max_wait() - elapsed);
                tracing::debug!(attempt = attempts, ?pause, %failure, "probe failed, polling again");
                sleep(pause).await;
            }
        }
    }
}
