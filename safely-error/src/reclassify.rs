//! Re-expressing a wrapped failure as a caller-chosen error type

use crate::{Failure, Strategy};

/// Constructor shapes a target error type offers for reclassification.
///
/// Every shape is optional and defaults to "not available". Implement the
/// ones your type supports; [`CarrierError::reclassify`](crate::CarrierError::reclassify)
/// tries them in [`Strategy`] order and keeps the first that succeeds.
///
/// Fallible shapes that take the cause must hand it back on rejection.
///
/// # Example
///
/// ```rust
/// use safely_error::{CarrierError, Failure, Reclassify};
///
/// #[derive(Debug, Default)]
/// struct Shutdown {
///     cause: Option<Failure>,
/// }
///
/// impl Reclassify for Shutdown {
///     fn bare() -> Option<Self> {
///         Some(Shutdown::default())
///     }
///
///     fn init_cause(&mut self, cause: Failure) -> Result<(), Failure> {
///         if self.cause.is_some() {
///             return Err(cause);
///         }
///         self.cause = Some(cause);
///         Ok(())
///     }
/// }
///
/// let carrier = CarrierError::new(std::fmt::Error);
/// let err: Shutdown = carrier.reclassify().unwrap();
/// assert!(err.cause.unwrap().is::<std::fmt::Error>());
/// ```
pub trait Reclassify: Sized {
    /// No-argument constructor
    fn bare() -> Option<Self> {
        None
    }

    /// Attach a cause to an already constructed value.
    ///
    /// Returns the cause when the slot is already occupied or cannot be set.
    fn init_cause(&mut self, cause: Failure) -> Result<(), Failure> {
        Err(cause)
    }

    /// Constructor taking only the cause
    fn from_cause(cause: Failure) -> Result<Self, Failure> {
        Err(cause)
    }

    /// Constructor taking a message and the cause
    fn from_message_and_cause(message: String, cause: Failure) -> Result<Self, Failure> {
        let _ = message;
        Err(cause)
    }

    /// Message-only constructor
    fn from_message(message: String) -> Option<Self> {
        let _ = message;
        None
    }
}

/// `anyhow::Error` becomes the cause with `message` as context on top.
impl Reclassify for anyhow::Error {
    fn from_message_and_cause(message: String, cause: Failure) -> Result<Self, Failure> {
        Ok(cause.context(message))
    }
}

/// Run the strategy search.
///
/// Returns the built value, or the untouched cause together with the
/// strategies that rejected it.
pub(crate) fn search<T: Reclassify>(
    cause: Failure,
    message: Option<&str>,
) -> Result<T, (Failure, Vec<Strategy>)> {
    let target = std::any::type_name::<T>();
    let mut cause = cause;
    let mut attempted = Vec::new();

    for strategy in Strategy::candidates(message.is_some()) {
        match strategy.attempt::<T>(cause, message) {
            Ok(built) => {
                tracing::debug!(target_type = target, strategy = %strategy, "reclassified failure");
                return Ok(built);
            }
            Err(returned) => {
                tracing::trace!(target_type = target, strategy = %strategy, "construction strategy rejected");
                attempted.push(*strategy);
                cause = returned;
            }
        }
    }

    tracing::debug!(target_type = target, attempts = attempted.len(), "no construction strategy applies");
    Err((cause, attempted))
}
