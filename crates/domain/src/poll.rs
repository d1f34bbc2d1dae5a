//! Timing policy for polling probes until their assertions hold.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// How long to keep re-probing and how often.
///
/// A zero `max_wait` means exactly one attempt. Otherwise the poll interval
/// must be positive and no longer than `max_wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollPolicy {
    #[serde(with = "crate::response::duration_millis")]
    max_wait: Duration,
    #[serde(with = "crate::response::duration_millis")]
    poll_interval: Duration,
}

impl PollPolicy {
    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPollPolicy`] if the interval is zero or
    /// longer than a non-zero `max_wait`.
    pub fn new(max_wait: Duration, poll_interval: Duration) -> DomainResult<Self> {
        if poll_interval.is_zero() {
            return Err(DomainError::InvalidPollPolicy(
                "poll interval must be positive".to_string(),
            ));
        }
        if !max_wait.is_zero() && poll_interval > max_wait {
            return Err(DomainError::InvalidPollPolicy(format!(
                "poll interval {poll_interval:?} exceeds max wait {max_wait:?}"
            )));
        }
        Ok(Self {
            max_wait,
            poll_interval,
        })
    }

    /// Shorthand for [`PollPolicy::new`] in milliseconds.
    ///
    /// # Errors
    ///
    /// Same as [`PollPolicy::new`].
    pub fn from_millis(max_wait_ms: u64, poll_interval_ms: u64) -> DomainResult<Self> {
        Self::new(
            Duration::from_millis(max_wait_ms),
            Duration::from_millis(poll_interval_ms),
        )
    }

    /// A policy that probes once and never sleeps.
    #[must_use]
    pub const fn single_attempt() -> Self {
        Self {
            max_wait: Duration::ZERO,
            poll_interval: Duration::from_millis(1),
        }
    }

    /// Upper bound on the total time spent polling.
    #[must_use]
    pub const fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Pause between two attempts.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Upper bound on attempts when each probe takes no time:
    /// `ceil(max_wait / poll_interval) + 1`.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        let wait = self.max_wait.as_nanos();
        let step = self.poll_interval.as_nanos();
        let polls = wait.div_ceil(step);
        u32::try_from(polls).map_or(u32::MAX, |p| p.saturating_add(1))
    }
}
