//! Response validation and parsing errors.

use std::fmt;

use thiserror::Error;

/// A decoded value that broke a schema constraint.
///
/// `field` is a dotted path from the response root, e.g. `data[3].fraction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    field: String,
    reason: String,
}

impl SchemaViolation {
    /// Creates a violation for `field`.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefixes the field path with the enclosing field or index.
    ///
    /// Indices (`[3]`) are appended without a separating dot.
    pub fn within(mut self, parent: &str) -> Self {
        self.field = if self.field.starts_with('[') {
            format!("{parent}{}", self.field)
        } else {
            format!("{parent}.{}", self.field)
        };
        self
    }

    /// Returns the path of the offending field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns why the value was rejected.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Errors during response parsing and validation.
///
/// A 2xx response that fails here signals a schema mismatch between this
/// library and the remote API, never a caller mistake.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON parsing or strict type matching failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The payload parsed but broke a value constraint.
    #[error("Schema violation: {0}")]
    Schema(SchemaViolation),

    /// The binary payload does not start with the PNG signature.
    #[error("Did not find PNG magic bytes in {len} byte payload")]
    PngSignature {
        /// Length of the rejected payload.
        len: usize,
    },
}

impl From<SchemaViolation> for ValidationError {
    fn from(violation: SchemaViolation) -> Self {
        Self::Schema(violation)
    }
}

impl ValidationError {
    /// Returns `true` if the payload could not be parsed at all.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_))
    }
}
