use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::{SchemaViolation, TaginfoError, ValueError};
use crate::params::{Choice, ParamsBuilder, QueryParameters, QueryParams};
use crate::response::schema::non_empty;
use crate::response::{Response, Validate};
use crate::types::SortOrder;

/// Sort fields for similar keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum SimilarKeySorting {
    #[default]
    OtherKey,
    CountAll,
    Similarity,
}

/// Parameters for `key/similar`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarKeysParams {
    pub key: String,
    /// Only show results where `other_key` contains this text.
    pub query: Option<String>,
    pub sortname: Choice<SimilarKeySorting>,
    pub sortorder: Choice<SortOrder>,
    pub page: i64,
    pub rp: i64,
}

impl SimilarKeysParams {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            query: None,
            sortname: Choice::default(),
            sortorder: Choice::default(),
            page: 1,
            rp: 0,
        }
    }
}

impl QueryParameters for SimilarKeysParams {
    fn to_query(&self) -> Result<QueryParams, ValueError> {
        ParamsBuilder::new()
            .text("key", &self.key)
            .optional_text("query", self.query.as_deref())
            .choice("sortname", &self.sortname)
            .choice("sortorder", &self.sortorder)
            .pagination(self.page, self.rp)
            .finish()
    }
}

/// A key that is spelled similarly to the requested one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarKey {
    pub other_key: String,
    /// Number of objects with the other key.
    pub count_all: u64,
    /// Edit distance between the keys; smaller is more similar.
    pub similarity: u64,
}

impl Validate for SimilarKey {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("other_key", &self.other_key)
    }
}

impl TaginfoClient {
    /// Finds keys that are similar to a key.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn key_similar(
        &self,
        params: &SimilarKeysParams,
    ) -> Result<Response<Vec<SimilarKey>>, TaginfoError> {
        self.execute(&catalog::KEY_SIMILAR, params).await
    }
}
