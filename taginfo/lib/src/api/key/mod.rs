//! `key/*` endpoints.

mod chronology;
mod combinations;
mod distribution;
mod overview;
mod prevalent_values;
mod projects;
mod similar;
mod stats;

use serde::{Deserialize, Serialize};

use crate::error::{SchemaViolation, ValueError};
use crate::params::{ParamsBuilder, QueryParameters, QueryParams};
use crate::response::schema::{fraction, non_empty_opt};
use crate::response::Validate;

pub use chronology::KeyChronology;
pub use combinations::{KeyCombination, KeyCombinationSorting, KeyCombinationsParams};
pub use overview::{KeyDescription, KeyObjectCount, KeyOverview, KeyWikiPage};
pub use prevalent_values::PrevalentValuesParams;
pub use projects::{KeyProject, KeyProjectSorting, KeyProjectsParams};
pub use similar::{SimilarKey, SimilarKeySorting, SimilarKeysParams};
pub use stats::KeyStats;

/// Parameters for endpoints that only take a tag key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParams {
    /// Tag key.
    pub key: String,
}

impl KeyParams {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl QueryParameters for KeyParams {
    fn to_query(&self) -> Result<QueryParams, ValueError> {
        ParamsBuilder::new().text("key", &self.key).finish()
    }
}

/// One value of a key and how often it is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevalentValue {
    /// The tag value, or `None` for the sum of all values not listed.
    pub value: Option<String>,
    /// Number of objects with this value.
    pub count: u64,
    /// Share of objects with this value among all objects with the key.
    pub fraction: f64,
}

impl Validate for PrevalentValue {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty_opt("value", self.value.as_deref())?;
        fraction("fraction", self.fraction)
    }
}
