use super::PrevalentValue;
use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::{TaginfoError, ValueError};
use crate::params::{Choice, ParamsBuilder, QueryParameters, QueryParams};
use crate::response::Response;
use crate::types::ObjectType;

/// Parameters for `key/prevalent_values`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrevalentValuesParams {
    /// Tag key.
    pub key: String,
    /// Only return values used on at least this share of objects with the
    /// key. Must lie in `[0.01, 1.0]`.
    pub min_fraction: f64,
    /// Only count tags used on this object type.
    pub filter: Choice<ObjectType>,
}

impl PrevalentValuesParams {
    /// Smallest accepted `min_fraction`, also the default.
    pub const MIN_FRACTION: f64 = 0.01;

    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            min_fraction: Self::MIN_FRACTION,
            filter: Choice::default(),
        }
    }
}

impl QueryParameters for PrevalentValuesParams {
    fn to_query(&self) -> Result<QueryParams, ValueError> {
        ParamsBuilder::new()
            .text("key", &self.key)
            .bounded("min_fraction", self.min_fraction, Self::MIN_FRACTION, 1.0)
            .choice("filter", &self.filter)
            .finish()
    }
}

impl TaginfoClient {
    /// Gets the most prevalent values used with a key.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn key_prevalent_values(
        &self,
        params: &PrevalentValuesParams,
    ) -> Result<Response<Vec<PrevalentValue>>, TaginfoError> {
        self.execute(&catalog::KEY_PREVALENT_VALUES, params).await
    }
}
