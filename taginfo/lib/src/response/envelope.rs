//! Response envelopes shared by all endpoints.

use std::fmt;
use std::num::NonZeroU64;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::schema::{timestamp, Validate};
use crate::error::{SchemaViolation, ValidationError};

/// The 8-byte signature every PNG file starts with.
pub const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// JSON envelope wrapping most endpoint payloads.
///
/// `page` and `rp` are only present for paginated endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    /// Payload specific to the called endpoint.
    pub data: T,
    /// All changes in the source until this time are reflected in this result.
    #[serde(deserialize_with = "timestamp")]
    pub data_until: DateTime<Utc>,
    /// URL of the request.
    pub url: Url,
    /// Total number of results.
    pub total: u64,
    /// Result page number (first has page number 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<NonZeroU64>,
    /// Results per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<NonZeroU64>,
}

impl<T: Validate> Validate for Response<T> {
    fn validate(&self) -> Result<(), SchemaViolation> {
        self.data.validate().map_err(|v| v.within("data"))
    }
}

impl<T> Response<Vec<T>> {
    /// Returns a copy with at most `max` items in `data`.
    ///
    /// `total`, `page` and `rp` are kept as received.
    pub fn truncated(&self, max: usize) -> Self
    where
        T: Clone,
    {
        Self {
            data: self.data.iter().take(max).cloned().collect(),
            data_until: self.data_until,
            url: self.url.clone(),
            total: self.total,
            page: self.page,
            rp: self.rp,
        }
    }
}

/// PNG image response.
///
/// Construction checks the PNG signature and nothing else.
#[derive(Clone, PartialEq, Eq)]
pub struct PngResponse {
    data: Bytes,
}

impl PngResponse {
    /// Wraps `data` if it starts with [`PNG_MAGIC`].
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::PngSignature`] otherwise.
    pub fn new(data: impl Into<Bytes>) -> Result<Self, ValidationError> {
        let data = data.into();
        if !data.starts_with(&PNG_MAGIC) {
            return Err(ValidationError::PngSignature { len: data.len() });
        }
        Ok(Self { data })
    }

    /// Returns the image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the image bytes, consuming the response.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl TryFrom<Vec<u8>> for PngResponse {
    type Error = ValidationError;

    fn try_from(data: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}

impl fmt::Debug for PngResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PngResponse(len(data)={})", self.data.len())
    }
}
