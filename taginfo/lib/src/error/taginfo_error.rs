//! Top-level taginfo error type.

use super::{CallError, ValidationError, ValueError};
use thiserror::Error;

/// Top-level error type for all taginfo calls.
///
/// Each pipeline stage translates its own failures into exactly one of these
/// variants, so nothing unclassified ever reaches the caller.
///
/// ## Examples
///
/// ```rust,ignore
/// use taginfo::TaginfoError;
///
/// fn handle_error(err: TaginfoError) {
///     match err {
///         TaginfoError::Value(e) => eprintln!("Fix your input: {e}"),
///         TaginfoError::Call(e) => eprintln!("Request failed: {e}"),
///         TaginfoError::Validation(e) => eprintln!("Unexpected response: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum TaginfoError {
    /// Parameters failed validation; the API was not called.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Call(#[from] CallError),

    /// The response failed schema validation.
    ///
    /// This usually indicates a bug in this library or drift in the remote API.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Discriminant of a [`TaginfoError`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// See [`TaginfoError::Value`].
    Value,
    /// See [`TaginfoError::Call`].
    Call,
    /// See [`TaginfoError::Validation`].
    Validation,
}

impl TaginfoError {
    /// Returns which of the three failure kinds this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Value(_) => ErrorKind::Value,
            Self::Call(_) => ErrorKind::Call,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Returns `true` if retrying the same call might succeed.
    ///
    /// Only transient [`CallError`]s qualify. Bad input and schema drift will
    /// fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Call(e) => e.is_retryable(),
            Self::Value(_) | Self::Validation(_) => false,
        }
    }
}
