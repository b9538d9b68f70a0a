use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::{SchemaViolation, TaginfoError, ValueError};
use crate::params::{Choice, ParamsBuilder, QueryParameters, QueryParams};
use crate::response::schema::{fraction, non_empty};
use crate::response::{Response, Validate};
use crate::types::{ObjectType, SortOrder};

/// Sort fields for key combinations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum KeyCombinationSorting {
    #[default]
    TogetherCount,
    OtherKey,
    FromFraction,
}

/// Parameters for `key/combinations`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCombinationsParams {
    /// Tag key.
    pub key: String,
    /// Only show results where `other_key` contains this text.
    pub query: Option<String>,
    pub sortname: Choice<KeyCombinationSorting>,
    pub sortorder: Choice<SortOrder>,
    /// Only count tags used on this object type.
    pub filter: Choice<ObjectType>,
    /// Page number, starting at 1.
    pub page: i64,
    /// Results per page.
    pub rp: i64,
}

impl KeyCombinationsParams {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            query: None,
            sortname: Choice::default(),
            sortorder: SortOrder::Desc.into(),
            filter: Choice::default(),
            page: 1,
            rp: 0,
        }
    }
}

impl QueryParameters for KeyCombinationsParams {
    fn to_query(&self) -> Result<QueryParams, ValueError> {
        ParamsBuilder::new()
            .text("key", &self.key)
            .optional_text("query", self.query.as_deref())
            .choice("sortname", &self.sortname)
            .choice("sortorder", &self.sortorder)
            .choice("filter", &self.filter)
            .pagination(self.page, self.rp)
            .finish()
    }
}

/// How often a key is used together with another key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyCombination {
    pub other_key: String,
    /// Number of objects that have both keys.
    pub together_count: u64,
    /// Share of objects with this key that also have the other key.
    pub to_fraction: f64,
    /// Share of objects with the other key that also have this key.
    pub from_fraction: f64,
}

impl Validate for KeyCombination {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("other_key", &self.other_key)?;
        fraction("to_fraction", self.to_fraction)?;
        fraction("from_fraction", self.from_fraction)
    }
}

impl TaginfoClient {
    /// Finds keys that are used together with a key.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn key_combinations(
        &self,
        params: &KeyCombinationsParams,
    ) -> Result<Response<Vec<KeyCombination>>, TaginfoError> {
        self.execute(&catalog::KEY_COMBINATIONS, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = KeyCombinationsParams::new("highway").to_query().unwrap();
        assert_eq!(
            query.to_query_string(),
            "filter=all&key=highway&page=1&rp=0&sortname=together_count&sortorder=desc"
        );
    }

    #[test]
    fn test_all_faults_reported() {
        let params = KeyCombinationsParams {
            query: Some(" ".to_string()),
            sortname: Choice::token("count"),
            page: 0,
            ..KeyCombinationsParams::new("")
        };
        let err = params.to_query().unwrap_err();
        for field in ["key", "query", "sortname", "page"] {
            assert!(err.rejects(field), "{field} not reported");
        }
        assert_eq!(err.faults().len(), 4);
    }

    #[test]
    fn test_sort_tokens() {
        assert_eq!(KeyCombinationSorting::FromFraction.as_ref(), "from_fraction");
        assert_eq!(
            KeyCombinationSorting::VARIANTS,
            &["together_count", "other_key", "from_fraction"]
        );
    }
}
