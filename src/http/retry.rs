//! Retry policy and error classification for API requests.

use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

/// Maximum number of retries after the first attempt.
pub const MAX_RETRIES: u32 = 3;

/// Message fragments of network errors that are worth another attempt.
const RETRYABLE_MESSAGES: &[&str] = &[
    "connection reset",
    "timeout",
    "timed out",
    "temporary failure",
    "network is unreachable",
    "no route to host",
    "connection refused",
];

/// How many times to retry and how long to wait in between.
///
/// All delays are multiples of `unit` (one second in production).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            unit: Duration::from_secs(1),
        }
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    RetryAfter(Duration),
    GiveUp,
}

impl RetryPolicy {
    /// Whether another attempt is allowed after `attempt` (zero-based).
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Exponential backoff before attempt `attempt + 1`: 1, 2, 4 units.
    ///
    /// Saturates at `Duration::MAX`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.units(2u32.saturating_pow(attempt))
    }

    fn units(&self, count: u32) -> Duration {
        self.unit.checked_mul(count).unwrap_or(Duration::MAX)
    }

    /// Decision after a network error on `attempt`.
    pub fn on_network_error(&self, attempt: u32, retryable: bool) -> Decision {
        if retryable && self.has_attempts_left(attempt) {
            Decision::RetryAfter(self.backoff(attempt))
        } else {
            Decision::GiveUp
        }
    }

    /// Decision after an error status (>= 400) on `attempt`.
    ///
    /// A numeric `Retry-After` on a 429 replaces the exponential delay.
    pub fn on_status(&self, attempt: u32, status: StatusCode, headers: &HeaderMap) -> Decision {
        if !self.has_attempts_left(attempt) {
            return Decision::GiveUp;
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return match retry_after_seconds(headers) {
                Some(seconds) => Decision::RetryAfter(self.units(seconds)),
                None => Decision::RetryAfter(self.backoff(attempt)),
            };
        }

        if status.is_server_error() {
            return Decision::RetryAfter(self.backoff(attempt));
        }

        Decision::GiveUp
    }
}

/// Integer seconds from a `Retry-After` header; HTTP-date values are ignored.
fn retry_after_seconds(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u32>()
        .ok()
}

/// Classifies a transport failure as transient (worth retrying) or fatal.
///
/// Only timeouts, resets, refusals and unreachable networks are transient.
/// Other connect failures (DNS, TLS) end the call.
pub fn is_retryable_network_error(error: &reqwest::Error) -> bool {
    if error.is_timeout() {
        return true;
    }

    let mut source: Option<&(dyn StdError + 'static)> = error.source();
    while let Some(err) = source {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if is_retryable_io_kind(io_err.kind()) {
                return true;
            }
        }
        source = err.source();
    }

    is_retryable_message(&error_chain_message(error))
}

fn is_retryable_io_kind(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::TimedOut
            | io::ErrorKind::NetworkUnreachable
            | io::ErrorKind::HostUnreachable
    )
}

fn is_retryable_message(message: &str) -> bool {
    let message = message.to_lowercase();
    RETRYABLE_MESSAGES
        .iter()
        .any(|fragment| message.contains(fragment))
}

fn error_chain_message(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(err) = source {
        message.push_str(": ");
        message.push_str(&err.to_string());
        source = err.source();
    }
    message
}
