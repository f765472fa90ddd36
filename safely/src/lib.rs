//! # safely
//!
//! Run fallible closures so that every failure surfaces as one
//! [`CarrierError`].
//!
//! ## Core Concepts
//! - **Executor**: `run_wrapping`, `run_unchecked` and `run_silently` are the
//!   only places a failure gets wrapped
//! - **Computation**: A lazy, re-runnable closure with `and_then`, `on_error`
//!   and `on_error_return` combinators
//! - **Reclassification**: Turn a carrier back into a domain error with
//!   [`CarrierError::reclassify`]
//!
//! ## Usage
//!
//! ```rust
//! use safely::{run_wrapping, Computation};
//!
//! let parsed = run_wrapping(|| "42".parse::<u32>());
//! assert_eq!(parsed.unwrap(), 42);
//!
//! let failed = run_wrapping(|| "x".parse::<u32>()).unwrap_err();
//! assert!(failed.wraps::<std::num::ParseIntError>());
//!
//! let half = Computation::of(|| 23).map(|x| x as f64 / 2.0);
//! assert_eq!(half.call().unwrap(), 11.5);
//! ```

pub mod computation;
pub mod error;
pub mod executor;

pub use computation::Computation;
pub use error::{
    cancel, Cancelled, CarrierError, Failure, FailureReport, Reclassify, Result, Strategy,
    UnsupportedReclassification,
};
pub use executor::{run_silently, run_unchecked, run_wrapping, silently};
