//! `tags/*` endpoints.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::{SchemaViolation, TaginfoError, ValueError};
use crate::params::{Choice, ParamsBuilder, QueryParameters, QueryParams};
use crate::response::schema::{fraction, int_bool, non_empty};
use crate::response::{Response, Validate};
use crate::types::SortOrder;

/// Sort fields for popular tags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum PopularTagSorting {
    Tag,
    #[default]
    CountAll,
    CountNodes,
    CountWays,
    CountRelations,
}

/// Parameters for `tags/popular`.
///
/// The default sorts by total count, descending, and returns the first page
/// at the server's page size:
///
/// ```rust
/// use taginfo::api::PopularTagsParams;
/// use taginfo::params::QueryParameters;
///
/// let query = PopularTagsParams::default().to_query().unwrap();
/// assert_eq!(query.to_query_string(), "page=1&rp=0&sortname=count_all&sortorder=desc");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PopularTagsParams {
    /// Only show results where the key or value contains this text.
    pub query: Option<String>,
    pub sortname: Choice<PopularTagSorting>,
    pub sortorder: Choice<SortOrder>,
    pub page: i64,
    pub rp: i64,
}

impl Default for PopularTagsParams {
    fn default() -> Self {
        Self {
            query: None,
            sortname: Choice::default(),
            sortorder: SortOrder::Desc.into(),
            page: 1,
            rp: 0,
        }
    }
}

impl QueryParameters for PopularTagsParams {
    fn to_query(&self) -> Result<QueryParams, ValueError> {
        ParamsBuilder::new()
            .optional_text("query", self.query.as_deref())
            .choice("sortname", &self.sortname)
            .choice("sortorder", &self.sortorder)
            .pagination(self.page, self.rp)
            .finish()
    }
}

/// A tag and its usage statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularTag {
    pub key: String,
    pub value: String,
    /// Whether at least one wiki page documents this tag.
    #[serde(deserialize_with = "int_bool")]
    pub in_wiki: bool,
    pub count_all: u64,
    pub count_all_fraction: f64,
    pub count_nodes: u64,
    pub count_nodes_fraction: f64,
    pub count_ways: u64,
    pub count_ways_fraction: f64,
    pub count_relations: u64,
    pub count_relations_fraction: f64,
    /// Number of projects using this tag.
    #[serde(default)]
    pub projects: u64,
}

impl Validate for PopularTag {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("key", &self.key)?;
        non_empty("value", &self.value)?;
        fraction("count_all_fraction", self.count_all_fraction)?;
        fraction("count_nodes_fraction", self.count_nodes_fraction)?;
        fraction("count_ways_fraction", self.count_ways_fraction)?;
        fraction("count_relations_fraction", self.count_relations_fraction)
    }
}

impl TaginfoClient {
    /// Gets the most often used tags.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn tags_popular(
        &self,
        params: &PopularTagsParams,
    ) -> Result<Response<Vec<PopularTag>>, TaginfoError> {
        self.execute(&catalog::TAGS_POPULAR, params).await
    }
}
