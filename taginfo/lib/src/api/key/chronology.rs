use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::KeyParams;
use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::{SchemaViolation, TaginfoError};
use crate::response::{Response, Validate};

/// Change in key usage relative to the previous entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChronology {
    pub date: NaiveDate,
    pub nodes: i64,
    pub ways: i64,
    pub relations: i64,
}

// Deltas may be negative; the date is checked by the decoder
impl Validate for KeyChronology {
    fn validate(&self) -> Result<(), SchemaViolation> {
        Ok(())
    }
}

impl TaginfoClient {
    /// Gets the chronology of key counts.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn key_chronology(
        &self,
        params: &KeyParams,
    ) -> Result<Response<Vec<KeyChronology>>, TaginfoError> {
        self.execute(&catalog::KEY_CHRONOLOGY, params).await
    }
}
