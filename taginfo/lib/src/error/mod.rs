//! Layered error types for the taginfo client.
//!
//! Every call either succeeds or fails with a [`TaginfoError`], which is
//! always exactly one of three kinds:
//!
//! - [`ValueError`] - the caller's parameters were rejected; no request was sent
//! - [`CallError`] - the HTTP exchange failed (network fault or non-2xx status)
//! - [`ValidationError`] - the response did not match the expected schema
//!
//! Match on [`TaginfoError`] to handle everything at once, or on the inner
//! type when only one failure mode matters.

mod call_error;
mod taginfo_error;
mod validation_error;
mod value_error;

pub use call_error::CallError;
pub use taginfo_error::{ErrorKind, TaginfoError};
pub use validation_error::{SchemaViolation, ValidationError};
pub use value_error::{ParamFault, ValueError};
