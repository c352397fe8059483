//! Error types.
//!
//! Internally we use `anyhow` everywhere through the `Res` alias. At the public surface errors are
//! wrapped in `Error`, which carries an `ErrorType` so that callers can tell a rejected argument
//! apart from a broken configuration or dataset.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The result type used inside the crate.
pub(crate) type Res<T> = anyhow::Result<T>;

/// The result type returned by public functions.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of an `Error`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// A required argument was missing or malformed, e.g. an empty employee id.
    InvalidArgument,
    /// The configuration file or home directory is missing or invalid.
    Config,
    /// The dataset could not be read or violates its invariants.
    Dataset,
    /// A request through the facade failed for a reason other than its arguments.
    Request,
    /// Anything else.
    Internal,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// The public error type. It holds an `anyhow::Error` chain along with its `ErrorType`.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub(crate) fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    /// Creates an `InvalidArgument` error with `message`.
    pub(crate) fn invalid_argument(message: impl Display + Debug + Send + Sync + 'static) -> Self {
        Self::new(ErrorType::InvalidArgument, anyhow::Error::msg(message))
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.error_type == ErrorType::InvalidArgument
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// Converts an internal result into a public `Result` tagged with an `ErrorType`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_pub_result_keeps_type_and_context() {
        let res: Res<()> = Err(anyhow::anyhow!("disk on fire")).context("Unable to load dataset");
        let err = res.pub_result(ErrorType::Dataset).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Dataset);
        assert_eq!(err.to_string(), "Unable to load dataset: disk on fire");
    }

    #[test]
    fn test_invalid_argument() {
        let err = Error::invalid_argument("Employee id cannot be empty");
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Employee id cannot be empty");
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::InvalidArgument.to_string(), "invalid_argument");
    }
}
