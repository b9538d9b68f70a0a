//! `relation/*` endpoints.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};
use url::Url;

use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::{SchemaViolation, TaginfoError, ValueError};
use crate::params::{Choice, ParamsBuilder, QueryParameters, QueryParams};
use crate::response::schema::{non_empty, optional_text, optional_url};
use crate::response::{Response, Validate};
use crate::types::SortOrder;

/// Sort fields for projects using a relation type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum RelationProjectSorting {
    #[default]
    ProjectName,
}

/// Parameters for `relation/projects`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationProjectsParams {
    /// Relation type.
    pub rtype: String,
    /// Only show results where the value contains this text.
    pub query: Option<String>,
    pub sortname: Choice<RelationProjectSorting>,
    pub sortorder: Choice<SortOrder>,
    pub page: i64,
    pub rp: i64,
}

impl RelationProjectsParams {
    pub fn new(rtype: impl Into<String>) -> Self {
        Self {
            rtype: rtype.into(),
            query: None,
            sortname: Choice::default(),
            sortorder: Choice::default(),
            page: 1,
            rp: 0,
        }
    }
}

impl QueryParameters for RelationProjectsParams {
    fn to_query(&self) -> Result<QueryParams, ValueError> {
        ParamsBuilder::new()
            .text("rtype", &self.rtype)
            .optional_text("query", self.query.as_deref())
            .choice("sortname", &self.sortname)
            .choice("sortorder", &self.sortorder)
            .pagination(self.page, self.rp)
            .finish()
    }
}

/// A project that uses a relation type.
///
/// Empty strings in the optional fields are decoded as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationProject {
    pub project_id: String,
    pub project_name: String,
    #[serde(default, deserialize_with = "optional_url")]
    pub project_icon_url: Option<Url>,
    /// Relation type.
    pub rtype: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_url")]
    pub doc_url: Option<Url>,
    #[serde(default, deserialize_with = "optional_url")]
    pub icon_url: Option<Url>,
}

impl Validate for RelationProject {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("project_id", &self.project_id)?;
        non_empty("project_name", &self.project_name)?;
        non_empty("rtype", &self.rtype)
    }
}

impl TaginfoClient {
    /// Gets projects using a relation type.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn relation_projects(
        &self,
        params: &RelationProjectsParams,
    ) -> Result<Response<Vec<RelationProject>>, TaginfoError> {
        self.execute(&catalog::RELATION_PROJECTS, params).await
    }
}
