//! Construction strategies used during reclassification

use std::fmt;

use crate::{Failure, Reclassify};

/// One way of building a target error around a wrapped failure.
///
/// Strategies are tried in declaration order; the first one that succeeds
/// wins. A rejected strategy only rules out itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Strategy {
    /// No-argument constructor, then attach the cause
    Bare,

    /// Constructor taking only the cause
    Cause,

    /// Constructor taking a message and the cause
    MessageAndCause,

    /// Message-only constructor, then attach the cause
    MessageThenCause,
}

const WITHOUT_MESSAGE: &[Strategy] = &[
    Strategy::Bare,
    Strategy::Cause,
    Strategy::MessageAndCause,
    Strategy::MessageThenCause,
];

const WITH_MESSAGE: &[Strategy] = &[Strategy::MessageAndCause, Strategy::MessageThenCause];

impl Strategy {
    /// Returns the strategy as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Bare => "Bare",
            Strategy::Cause => "Cause",
            Strategy::MessageAndCause => "MessageAndCause",
            Strategy::MessageThenCause => "MessageThenCause",
        }
    }

    /// Check if this strategy can carry a caller-supplied message
    pub fn carries_message(&self) -> bool {
        matches!(self, Strategy::MessageAndCause | Strategy::MessageThenCause)
    }

    /// The strategies to try, in order.
    ///
    /// When a message is requested only message-bearing strategies apply.
    pub fn candidates(with_message: bool) -> &'static [Strategy] {
        if with_message {
            WITH_MESSAGE
        } else {
            WITHOUT_MESSAGE
        }
    }

    /// Attempt to build `T` around `cause`.
    ///
    /// On rejection the cause is handed back untouched so the next strategy
    /// can use it.
    pub(crate) fn attempt<T: Reclassify>(
        &self,
        cause: Failure,
        message: Option<&str>,
    ) -> Result<T, Failure> {
        let message = || message.unwrap_or_default().to_string();
        match self {
            Strategy::Bare => match T::bare() {
                Some(target) => attach(target, cause),
                None => Err(cause),
            },
            Strategy::Cause => T::from_cause(cause),
            Strategy::MessageAndCause => T::from_message_and_cause(message(), cause),
            Strategy::MessageThenCause => match T::from_message(message()) {
                Some(target) => attach(target, cause),
                None => Err(cause),
            },
        }
    }
}

fn attach<T: Reclassify>(mut target: T, cause: Failure) -> Result<T, Failure> {
    target.init_cause(cause)?;
    Ok(target)
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
