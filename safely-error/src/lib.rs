//! # safely-error
//!
//! A single carrier error for failures raised inside deferred computations.
//!
//! ## Design Philosophy
//!
//! - **CarrierError**: One nominal type around any failure, diagnostically
//!   indistinguishable from the failure it wraps
//! - **Reclassify**: Re-express a carrier as your own error type, keeping the
//!   original failure as the cause
//! - **Strategy**: The ordered construction shapes tried during reclassification
//! - **Cancelled**: A cooperative cancellation signal that can be replayed on
//!   the current thread after being caught
//!
//! ## Usage
//!
//! ```rust
//! use safely_error::{CarrierError, Failure, Reclassify};
//!
//! #[derive(Debug)]
//! struct ConfigError {
//!     message: String,
//!     cause: Failure,
//! }
//!
//! impl Reclassify for ConfigError {
//!     fn from_message_and_cause(message: String, cause: Failure) -> Result<Self, Failure> {
//!         Ok(ConfigError { message, cause })
//!     }
//! }
//!
//! let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
//! let carrier = CarrierError::new(io);
//! assert!(carrier.wraps::<std::io::Error>());
//!
//! let err: ConfigError = carrier.reclassify_with_message("cannot load config").unwrap();
//! assert_eq!(err.message, "cannot load config");
//! assert_eq!(err.cause.to_string(), "config.toml");
//! ```
//!
//! ## Principles
//!
//! - A failure is wrapped once; carriers are never nested by this crate
//! - Reclassification consumes the carrier and hands it back on failure
//! - Nothing here logs above `debug`; recovery stays silent

pub mod cancel;
mod error;
mod kind;
mod reclassify;
mod report;
mod unsupported;

pub use cancel::Cancelled;
pub use error::CarrierError;
pub use kind::Strategy;
pub use reclassify::Reclassify;
pub use report::FailureReport;
pub use unsupported::UnsupportedReclassification;

/// Any failure a computation may raise.
pub type Failure = anyhow::Error;

/// Result type alias using the carrier error
pub type Result<T, E = CarrierError> = std::result::Result<T, E>;
