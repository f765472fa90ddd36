//! # Wrapping executor
//!
//! The boundary where outside computations enter the carrier contract. Each
//! entry point invokes its closure exactly once; there are no retries and no
//! timeouts.

use crate::error::{CarrierError, Failure, Result};

/// Run a computation, wrapping any failure into a [`CarrierError`].
///
/// Every failure is wrapped, including one that already is a carrier. The
/// success value is returned untouched.
pub fn run_wrapping<T, E, F>(computation: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: Into<Failure>,
{
    computation().map_err(CarrierError::new)
}

/// Run a computation, passing carriers through and wrapping anything else.
///
/// A failure that already is a [`CarrierError`] is propagated as the same
/// value rather than wrapped a second time. A carrier buried under `anyhow`
/// context is not one; the whole failure is wrapped so the context survives.
pub fn run_unchecked<T, E, F>(computation: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: Into<Failure>,
{
    computation().map_err(|err| {
        let failure: Failure = err.into();
        if !(*failure).is::<CarrierError>() {
            return CarrierError::new(failure);
        }
        match failure.downcast::<CarrierError>() {
            Ok(carrier) => carrier,
            Err(failure) => CarrierError::new(failure),
        }
    })
}

/// Run a computation and discard any failure.
///
/// Nothing is returned, reported or logged. Use it only for best-effort side
/// effects where losing the failure is acceptable.
pub fn run_silently<T, E, F>(computation: F)
where
    F: FnOnce() -> std::result::Result<T, E>,
{
    let _ = computation();
}

/// Wrap a computation so that every call runs it through [`run_silently`].
pub fn silently<T, E, F>(computation: F) -> impl Fn()
where
    F: Fn() -> std::result::Result<T, E>,
{
    move || run_silently(&computation)
}
