//! Error types for safely
//!
//! Re-exports safely-error so callers need a single dependency.

pub use safely_error::cancel;
pub use safely_error::{
    Cancelled, CarrierError, Failure, FailureReport, Reclassify, Result, Strategy,
    UnsupportedReclassification,
};
