//! Cooperative cancellation for the current thread.
//!
//! A computation that observes a cancellation request raises [`Cancelled`].
//! Generic error handling tends to swallow that signal, so a carrier built
//! around it can put it back with
//! [`CarrierError::replay_cancellation_if_applicable`](crate::CarrierError::replay_cancellation_if_applicable).

use std::cell::Cell;
use std::fmt;

thread_local! {
    static CANCELLED: Cell<bool> = const { Cell::new(false) };
}

/// Failure representing a cooperative cancellation of the current thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cancelled {
    reason: Option<String>,
}

impl Cancelled {
    /// Create a cancellation signal without a reason
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cancellation signal with a reason
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    /// Get the reason, if one was given
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "cancelled: {}", reason),
            None => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for Cancelled {}

/// Mark the current thread as cancelled.
pub fn cancel_current() {
    CANCELLED.with(|flag| flag.set(true));
}

/// Check whether the current thread is marked cancelled, leaving the mark in place.
pub fn is_cancelled() -> bool {
    CANCELLED.with(Cell::get)
}

/// Read and clear the cancellation mark of the current thread.
pub fn take_cancelled() -> bool {
    CANCELLED.with(|flag| flag.replace(false))
}

/// Cancellation checkpoint for long-running computations.
///
/// Consumes the mark and raises [`Cancelled`] if the current thread was
/// cancelled.
pub fn check_cancelled() -> Result<(), Cancelled> {
    if take_cancelled() {
        return Err(Cancelled::new());
    }
    Ok(())
}
