//! Response decoding.
//!
//! This module provides the [`ResponseFormat`] trait for turning raw bodies
//! into validated values, the [`Response`] and [`PngResponse`] envelopes, and
//! the [`schema`] helpers used by every payload type.

mod envelope;
mod format;
pub mod schema;

pub use envelope::{PngResponse, Response, PNG_MAGIC};
pub use format::{JsonFormat, PngFormat, ResponseFormat};
pub use schema::Validate;
