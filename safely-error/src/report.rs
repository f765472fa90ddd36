//! Serializable snapshot of a carrier's diagnostic surface

use std::backtrace::BacktraceStatus;

use serde::{Deserialize, Serialize};

use crate::CarrierError;

/// What a carrier shows to logs, in a form that can be serialized.
///
/// Every field is read from the wrapped failure, so a report of a carrier is
/// the report of the failure it wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    /// The wrapped failure's message
    pub message: String,
    /// Messages of the cause chain below the wrapped failure, outermost first
    pub causes: Vec<String>,
    /// Whether the wrapped failure is a cancellation signal
    pub cancellation: bool,
    /// Rendered backtrace, when one was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<String>,
}

impl FailureReport {
    /// Build a report from a carrier
    pub fn from_carrier(carrier: &CarrierError) -> Self {
        let backtrace = carrier.backtrace();
        let backtrace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            message: carrier.message(),
            causes: carrier.chain().skip(1).map(ToString::to_string).collect(),
            cancellation: carrier.originated_from_cancellation(),
            backtrace,
        }
    }
}
