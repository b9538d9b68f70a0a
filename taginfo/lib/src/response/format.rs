//! Response format trait and implementations.
//!
//! The [`ResponseFormat`] trait defines how to turn a raw response body into
//! a validated value, and which `Accept` content type to request it with.

use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use super::envelope::PngResponse;
use super::schema::Validate;
use crate::error::ValidationError;

/// Trait for response decoding strategies.
///
/// ## Examples
///
/// ```rust,ignore
/// use taginfo::response::{JsonFormat, Response};
///
/// // The format type encodes both the parsing strategy and output type
/// type KeyOverviewFormat = JsonFormat<Response<KeyOverview>>;
/// ```
pub trait ResponseFormat: Send + Sync {
    /// The output type after decoding.
    type Output: Send + Sync;

    /// The content type sent in the `Accept` header.
    const CONTENT_TYPE: &'static str;

    /// Decode and validate a response body.
    ///
    /// ## Errors
    ///
    /// Returns a [`ValidationError`] if the body does not match the schema.
    fn parse(body: Bytes) -> Result<Self::Output, ValidationError>;
}

/// Strict JSON decoding followed by [`Validate`] checks.
///
/// Field types must match exactly; a numeric string is not an integer.
///
/// ## Type Parameters
///
/// - `T`: The type to deserialize the JSON into.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Validate + Send + Sync> ResponseFormat for JsonFormat<T> {
    type Output = T;

    const CONTENT_TYPE: &'static str = "application/json";

    fn parse(body: Bytes) -> Result<Self::Output, ValidationError> {
        let value: T = serde_json::from_slice(&body)?;
        value.validate()?;
        Ok(value)
    }
}

/// PNG image decoding.
///
/// The body is kept as opaque bytes after checking the signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngFormat;

impl ResponseFormat for PngFormat {
    type Output = PngResponse;

    const CONTENT_TYPE: &'static str = "image/png";

    fn parse(body: Bytes) -> Result<Self::Output, ValidationError> {
        PngResponse::new(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaViolation;
    use crate::response::envelope::PNG_MAGIC;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    impl Validate for TestData {
        fn validate(&self) -> Result<(), SchemaViolation> {
            crate::response::schema::non_empty("name", &self.name)
        }
    }

    #[test]
    fn test_json_format_parse() {
        let body = Bytes::from(r#"{"name": "test", "value": 42}"#);
        let result = JsonFormat::<TestData>::parse(body).unwrap();
        assert_eq!(result.name, "test");
        assert_eq!(result.value, 42);
    }

    #[test]
    fn test_json_format_invalid() {
        let result = JsonFormat::<TestData>::parse(Bytes::from("not json"));
        assert!(matches!(result, Err(ValidationError::JsonParse(_))));
    }

    #[test]
    fn test_json_format_is_strict() {
        let result = JsonFormat::<TestData>::parse(Bytes::from(r#"{"name": "x", "value": "42"}"#));
        assert!(matches!(result, Err(ValidationError::JsonParse(_))));
    }

    #[test]
    fn test_json_format_runs_validation() {
        let result = JsonFormat::<TestData>::parse(Bytes::from(r#"{"name": "", "value": 1}"#));
        assert!(matches!(result, Err(ValidationError::Schema(_))));
    }

    #[test]
    fn test_png_format() {
        let png = PngFormat::parse(Bytes::copy_from_slice(&PNG_MAGIC)).unwrap();
        assert_eq!(png.data().len(), 8);
        assert!(PngFormat::parse(Bytes::from_static(b"nonsense")).is_err());
    }

    #[test]
    fn test_content_types() {
        assert_eq!(JsonFormat::<TestData>::CONTENT_TYPE, "application/json");
        assert_eq!(PngFormat::CONTENT_TYPE, "image/png");
    }
}
