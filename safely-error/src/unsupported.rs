//! Error raised when a carrier cannot be reclassified

use thiserror::Error;

use crate::{CarrierError, Strategy};

/// No construction strategy could build the requested target type.
///
/// Owns the carrier that was being reclassified, so the original failure is
/// never lost.
#[derive(Debug, Error)]
#[error("cannot instantiate instance of type {target}")]
pub struct UnsupportedReclassification {
    target: &'static str,
    attempted: Vec<Strategy>,
    #[source]
    carrier: CarrierError,
}

impl UnsupportedReclassification {
    pub(crate) fn new(target: &'static str, attempted: Vec<Strategy>, carrier: CarrierError) -> Self {
        Self {
            target,
            attempted,
            carrier,
        }
    }

    /// Type name of the requested target
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Strategies that were tried and rejected, in order
    pub fn attempted(&self) -> &[Strategy] {
        &self.attempted
    }

    /// The carrier that could not be reclassified
    pub fn carrier(&self) -> &CarrierError {
        &self.carrier
    }

    /// Take back the carrier
    pub fn into_carrier(self) -> CarrierError {
        self.carrier
    }
}
