//! The carrier error

use std::backtrace::Backtrace;
use std::fmt;

use crate::cancel::{self, Cancelled};
use crate::reclassify;
use crate::{Failure, FailureReport, Reclassify, UnsupportedReclassification};

/// The single error type every wrapped failure surfaces as.
///
/// A carrier owns exactly one failure, set at construction and never changed.
/// Its diagnostic surface reads through to that failure:
/// - `Display` / `message()`: the failure's message
/// - `Debug`: the failure's full report (chain and backtrace)
/// - `source()` / `cause()`: the failure's own cause
/// - `backtrace()`: the failure's backtrace
///
/// In logs a carrier cannot be told apart from what it wraps, yet it stays a
/// distinct type for matching and downcasting.
///
/// # Example
///
/// ```rust
/// use safely_error::CarrierError;
///
/// let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only");
/// let err = CarrierError::new(io);
///
/// assert!(err.wraps::<std::io::Error>());
/// assert!(!err.wraps::<std::fmt::Error>());
/// assert_eq!(err.to_string(), "read only");
/// ```
pub struct CarrierError {
    wrapped: Failure,
    cancellation: bool,
}

impl CarrierError {
    /// Wrap a failure.
    ///
    /// Records whether the failure is a [`Cancelled`] signal.
    pub fn new(failure: impl Into<Failure>) -> Self {
        let wrapped = failure.into();
        let cancellation = wrapped.is::<Cancelled>();
        Self {
            wrapped,
            cancellation,
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Check whether the wrapped failure is exactly of type `E`.
    ///
    /// This is type identity of the outermost error object, not a trait
    /// match. Types layered underneath `anyhow` context do not count.
    pub fn wraps<E>(&self) -> bool
    where
        E: std::error::Error + 'static,
    {
        (*self.wrapped).is::<E>()
    }

    /// Borrow the wrapped failure as `E`
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        (*self.wrapped).downcast_ref::<E>()
    }

    /// Get the wrapped failure
    pub fn wrapped(&self) -> &Failure {
        &self.wrapped
    }

    /// Unwrap the carrier
    pub fn into_wrapped(self) -> Failure {
        self.wrapped
    }

    // =========================================================================
    // Cancellation
    // =========================================================================

    /// Whether the wrapped failure is a cancellation signal
    pub fn originated_from_cancellation(&self) -> bool {
        self.cancellation
    }

    /// Re-assert a swallowed cancellation on the current thread.
    ///
    /// Returns `true` and marks the current thread cancelled if the wrapped
    /// failure is a [`Cancelled`]; otherwise does nothing and returns `false`.
    pub fn replay_cancellation_if_applicable(&self) -> bool {
        if !self.cancellation {
            return false;
        }
        tracing::debug!(failure = %self.wrapped, "replaying cancellation on current thread");
        cancel::cancel_current();
        true
    }

    // =========================================================================
    // Delegated diagnostics
    // =========================================================================

    /// The wrapped failure's message
    pub fn message(&self) -> String {
        self.wrapped.to_string()
    }

    /// The wrapped failure's cause
    pub fn cause(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.wrapped.source()
    }

    /// The wrapped failure's backtrace
    pub fn backtrace(&self) -> &Backtrace {
        self.wrapped.backtrace()
    }

    /// Iterate the wrapped failure and its causes, outermost first
    pub fn chain(&self) -> anyhow::Chain<'_> {
        self.wrapped.chain()
    }

    /// Snapshot the diagnostic surface for structured output
    pub fn report(&self) -> FailureReport {
        FailureReport::from_carrier(self)
    }

    // =========================================================================
    // Reclassification
    // =========================================================================

    /// Re-express the wrapped failure as `T`, keeping it as the cause.
    ///
    /// The new error's message is whatever `T`'s message-less construction
    /// yields. Fails with [`UnsupportedReclassification`], which hands this
    /// carrier back, when `T` offers no workable constructor shape.
    pub fn reclassify<T: Reclassify>(self) -> Result<T, UnsupportedReclassification> {
        self.reclassify_inner(None)
    }

    /// Re-express the wrapped failure as `T` with the given message, keeping
    /// it as the cause.
    pub fn reclassify_with_message<T: Reclassify>(
        self,
        message: impl Into<String>,
    ) -> Result<T, UnsupportedReclassification> {
        let message = message.into();
        self.reclassify_inner(Some(&message))
    }

    fn reclassify_inner<T: Reclassify>(
        self,
        message: Option<&str>,
    ) -> Result<T, UnsupportedReclassification> {
        let cancellation = self.cancellation;
        reclassify::search::<T>(self.wrapped, message).map_err(|(wrapped, attempted)| {
            let carrier = CarrierError {
                wrapped,
                cancellation,
            };
            UnsupportedReclassification::new(std::any::type_name::<T>(), attempted, carrier)
        })
    }
}

// =============================================================================
// Display / Debug - both read through to the wrapped failure
// =============================================================================

impl fmt::Display for CarrierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.wrapped, f)
    }
}

impl fmt::Debug for CarrierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.wrapped, f)
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl std::error::Error for CarrierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Strategy;
    use proptest::prelude::*;
    use std::error::Error as _;
    use std::io;

    #[derive(Debug, thiserror::Error)]
    #[error("io msg")]
    struct ReadFailure {
        #[source]
        source: io::Error,
    }

    fn read_failure() -> ReadFailure {
        ReadFailure {
            source: io::Error::new(io::ErrorKind::Other, "disk on fire"),
        }
    }

    /// Message + cause constructor, like most hand-written domain errors
    #[derive(Debug)]
    struct LookupError {
        message: String,
        cause: Failure,
    }

    impl fmt::Display for LookupError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.message)
        }
    }

    impl std::error::Error for LookupError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            let cause: &(dyn std::error::Error + 'static) = &*self.cause;
            Some(cause)
        }
    }

    impl Reclassify for LookupError {
        fn from_message_and_cause(message: String, cause: Failure) -> Result<Self, Failure> {
            Ok(LookupError { message, cause })
        }
    }

    /// Only a no-argument constructor with a one-shot cause slot
    #[derive(Debug, Default)]
    struct Aborted {
        cause: Option<Failure>,
    }

    impl Reclassify for Aborted {
        fn bare() -> Option<Self> {
            Some(Aborted::default())
        }

        fn init_cause(&mut self, cause: Failure) -> Result<(), Failure> {
            if self.cause.is_some() {
                return Err(cause);
            }
            self.cause = Some(cause);
            Ok(())
        }
    }

    /// Exposes none of the usable shapes
    #[derive(Debug)]
    struct Unbuildable;

    impl Reclassify for Unbuildable {}

    #[test]
    fn test_wraps_exact_type() {
        let err = CarrierError::new(Cancelled::new());
        assert!(err.wraps::<Cancelled>());
        assert!(!err.wraps::<io::Error>());

        let err = CarrierError::new(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(err.wraps::<io::Error>());
        assert!(!err.wraps::<Cancelled>());
    }

    #[test]
    fn test_wraps_ignores_context_layers() {
        let failure = anyhow::Error::new(io::Error::new(io::ErrorKind::Other, "boom")).context("loading");
        let err = CarrierError::new(failure);
        assert!(!err.wraps::<io::Error>());
        assert!(err.downcast_ref::<io::Error>().is_none());
        assert_eq!(err.message(), "loading");

        let err = CarrierError::new(anyhow::anyhow!("plain"));
        assert!(!err.wraps::<io::Error>());
        assert!(!err.wraps::<fmt::Error>());

        let err = CarrierError::new(anyhow::Error::new(read_failure()));
        assert!(err.wraps::<ReadFailure>());
        assert!(!err.wraps::<io::Error>());

        // context on top of a cancellation still counts as one
        let err = CarrierError::new(anyhow::Error::new(Cancelled::new()).context("draining"));
        assert!(!err.wraps::<Cancelled>());
        assert!(err.originated_from_cancellation());
    }

    #[test]
    fn test_carrier_is_not_its_failure() {
        let err = CarrierError::new(fmt::Error);
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.downcast_ref::<CarrierError>().is_some());
        assert!(boxed.downcast_ref::<fmt::Error>().is_none());
    }

    #[test]
    fn test_delegates() {
        let err = CarrierError::new(read_failure());
        let wrapped = err.wrapped();

        assert_eq!(err.message(), wrapped.to_string());
        assert_eq!(err.to_string(), wrapped.to_string());
        assert_eq!(format!("{:?}", err), format!("{:?}", wrapped));
        assert!(std::ptr::eq(err.backtrace(), wrapped.backtrace()));

        let cause = err.cause().unwrap();
        assert_eq!(cause.to_string(), "disk on fire");
        assert_eq!(cause.to_string(), wrapped.source().unwrap().to_string());
        assert_eq!(err.source().unwrap().to_string(), cause.to_string());
    }

    #[test]
    fn test_delegation_is_idempotent() {
        let err = CarrierError::new(read_failure());
        let first = (err.message(), err.backtrace().to_string());
        let second = (err.message(), err.backtrace().to_string());
        assert_eq!(first, second);
        assert_eq!(err.chain().count(), err.chain().count());
    }

    #[test]
    fn test_downcast_and_unwrap() {
        let err = CarrierError::new(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        assert_eq!(err.downcast_ref::<io::Error>().unwrap().kind(), io::ErrorKind::TimedOut);

        let failure = err.into_wrapped();
        assert_eq!(failure.downcast::<io::Error>().unwrap().kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_interrupted() {
        let err = CarrierError::new(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(!cancel::is_cancelled());
        assert!(!err.originated_from_cancellation());
        assert!(!err.replay_cancellation_if_applicable());
        assert!(!cancel::is_cancelled());

        let err = CarrierError::new(Cancelled::with_reason("shutdown"));
        assert!(err.originated_from_cancellation());
        assert!(err.replay_cancellation_if_applicable());
        assert!(cancel::is_cancelled());

        assert!(cancel::take_cancelled());
    }

    #[test]
    fn test_reclassify_with_message() {
        let err = CarrierError::new(read_failure());
        let msg = "this is really bad";
        let lookup: LookupError = err.reclassify_with_message(msg).unwrap();

        assert_eq!(lookup.to_string(), msg);
        let cause = lookup.source().unwrap();
        assert!(cause.downcast_ref::<ReadFailure>().is_some());
        assert_eq!(cause.to_string(), "io msg");
        assert_eq!(cause.source().unwrap().to_string(), "disk on fire");
        assert!(lookup.cause.chain().any(|e| e.to_string() == "disk on fire"));
    }

    #[test]
    fn test_reclassify_without_message() {
        let err = CarrierError::new(read_failure());
        let lookup: LookupError = err.reclassify().unwrap();
        assert_eq!(lookup.message, "");
        assert!(lookup.cause.is::<ReadFailure>());

        let err = CarrierError::new(read_failure());
        let aborted: Aborted = err.reclassify().unwrap();
        let cause = aborted.cause.unwrap();
        assert!(cause.is::<ReadFailure>());
        assert_eq!(cause.to_string(), "io msg");
    }

    #[test]
    fn test_reclassify_bare_rejects_message() {
        let err = CarrierError::new(read_failure());
        let unsupported = err.reclassify_with_message::<Aborted>("nope").unwrap_err();
        assert_eq!(
            unsupported.attempted(),
            &[Strategy::MessageAndCause, Strategy::MessageThenCause]
        );
    }

    #[test]
    fn test_reclassify_unsupported() {
        let err = CarrierError::new(Cancelled::with_reason("drain"));
        let unsupported = err.reclassify::<Unbuildable>().unwrap_err();

        assert!(unsupported.to_string().contains("cannot instantiate instance of type"));
        assert!(unsupported.to_string().contains("Unbuildable"));
        assert_eq!(unsupported.attempted().len(), 4);

        let carrier = unsupported.carrier();
        assert!(carrier.wraps::<Cancelled>());
        assert!(carrier.originated_from_cancellation());
        assert_eq!(
            unsupported.source().unwrap().to_string(),
            "cancelled: drain"
        );

        let carrier = unsupported.into_carrier();
        assert_eq!(carrier.message(), "cancelled: drain");
    }

    proptest! {
        #[test]
        fn prop_wraps_and_delegates_message(message in ".*") {
            let err = CarrierError::new(io::Error::new(io::ErrorKind::Other, message.clone()));
            prop_assert!(err.wraps::<io::Error>());
            prop_assert!(!err.wraps::<fmt::Error>());
            prop_assert!(!err.wraps::<Cancelled>());
            prop_assert_eq!(err.message(), message.clone());
            prop_assert_eq!(err.to_string(), message);
        }

        #[test]
        fn prop_reclassify_preserves_failure(message in ".*", outer in ".+") {
            let err = CarrierError::new(io::Error::new(io::ErrorKind::Other, message.clone()));
            let lookup: LookupError = err.reclassify_with_message(outer.clone()).unwrap();
            prop_assert_eq!(lookup.message, outer);
            prop_assert_eq!(lookup.cause.to_string(), message);
        }
    }
}
