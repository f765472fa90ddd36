//! # Composable computation
//!
//! A deferred unit of work whose failures always surface as a
//! [`CarrierError`](crate::CarrierError). Combinators build new computations lazily; nothing runs
//! until [`Computation::call`].

use std::fmt;
use std::sync::Arc;

use crate::error::{Failure, Result};
use crate::executor::{run_unchecked, run_wrapping};

type Thunk<T> = dyn Fn() -> Result<T> + Send + Sync;

/// A re-runnable computation that fails only with [`CarrierError`](crate::CarrierError).
///
/// Computations are stateless: every [`call`](Computation::call) re-executes
/// the whole chain from the root, nothing is memoized. Cloning shares the
/// underlying closure.
///
/// # Example
///
/// ```rust
/// use safely::Computation;
///
/// let flaky = Computation::new(|| "nope".parse::<i32>());
/// let fixed = flaky.clone().on_error_return(42);
///
/// assert!(flaky.call().is_err());
/// assert_eq!(fixed.call().unwrap(), 42);
/// ```
pub struct Computation<T> {
    thunk: Arc<Thunk<T>>,
}

impl<T: 'static> Computation<T> {
    /// Create a computation whose failures are wrapped by [`run_wrapping`]
    pub fn new<E, F>(computation: F) -> Self
    where
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Into<Failure>,
    {
        Self::from_thunk(move || run_wrapping(&computation))
    }

    /// Create a computation whose failures go through [`run_unchecked`].
    ///
    /// Carriers raised by `computation` pass through as they are.
    pub fn unchecked<E, F>(computation: F) -> Self
    where
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Into<Failure>,
    {
        Self::from_thunk(move || run_unchecked(&computation))
    }

    /// Create a computation from a closure that cannot fail
    pub fn of<F>(computation: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::from_thunk(move || Ok(computation()))
    }

    fn from_thunk<F>(thunk: F) -> Self
    where
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        Self {
            thunk: Arc::new(thunk),
        }
    }

    /// Run the computation
    pub fn call(&self) -> Result<T> {
        (self.thunk)()
    }

    /// View as a value-returning closure sharing the same work
    pub fn to_callable(&self) -> impl Fn() -> Result<T> + Send + Sync + 'static {
        let thunk = Arc::clone(&self.thunk);
        move || thunk()
    }

    /// View as a fire-and-forget closure sharing the same work.
    ///
    /// The value is dropped; a failure is still reported.
    pub fn to_runnable(&self) -> impl Fn() -> Result<()> + Send + Sync + 'static {
        let thunk = Arc::clone(&self.thunk);
        move || thunk().map(drop)
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Apply a fallible transform to the result.
    ///
    /// A failure of this computation propagates as the same carrier; a
    /// failure of `transform` is wrapped by [`run_wrapping`].
    pub fn and_then<S, E, G>(self, transform: G) -> Computation<S>
    where
        S: 'static,
        G: Fn(T) -> std::result::Result<S, E> + Send + Sync + 'static,
        E: Into<Failure>,
    {
        Computation::from_thunk(move || {
            let value = self.call()?;
            run_wrapping(|| transform(value))
        })
    }

    /// Apply an infallible transform to the result
    pub fn map<S, G>(self, transform: G) -> Computation<S>
    where
        S: 'static,
        G: Fn(T) -> S + Send + Sync + 'static,
    {
        Computation::from_thunk(move || self.call().map(&transform))
    }

    /// Run `fallback` instead when this computation fails.
    ///
    /// The original failure is dropped. A failure of `fallback` is wrapped
    /// by [`run_wrapping`] and returned.
    pub fn on_error<E, F>(self, fallback: F) -> Self
    where
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Into<Failure>,
    {
        Self::from_thunk(move || self.call().or_else(|_| run_wrapping(&fallback)))
    }

    /// Return `value` instead when this computation fails
    pub fn on_error_return(self, value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Self::from_thunk(move || Ok(self.call().unwrap_or_else(|_| value.clone())))
    }
}

impl<T> Clone for Computation<T> {
    fn clone(&self) -> Self {
        Self {
            thunk: Arc::clone(&self.thunk),
        }
    }
}

impl<T> fmt::Debug for Computation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computation").finish_non_exhaustive()
    }
}
