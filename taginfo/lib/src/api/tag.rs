//! `tag/*` endpoints.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::{SchemaViolation, TaginfoError, ValueError};
use crate::params::{Choice, ParamsBuilder, QueryParameters, QueryParams};
use crate::response::schema::{non_empty, non_empty_opt};
use crate::response::{Response, Validate};
use crate::types::{ObjectType, SortOrder};

/// Sort fields for projects using a tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum TagProjectSorting {
    #[default]
    ProjectName,
    Tag,
}

/// Parameters for `tag/projects`.
#[derive(Debug, Clone, PartialEq)]
pub struct TagProjectsParams {
    pub key: String,
    pub value: String,
    /// Only show results where the project name contains this text.
    pub query: Option<String>,
    pub sortname: Choice<TagProjectSorting>,
    pub sortorder: Choice<SortOrder>,
    pub filter: Choice<ObjectType>,
    pub page: i64,
    pub rp: i64,
}

impl TagProjectsParams {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            query: None,
            sortname: Choice::default(),
            sortorder: Choice::default(),
            filter: Choice::default(),
            page: 1,
            rp: 0,
        }
    }
}

impl QueryParameters for TagProjectsParams {
    fn to_query(&self) -> Result<QueryParams, ValueError> {
        ParamsBuilder::new()
            .text("key", &self.key)
            .text("value", &self.value)
            .optional_text("query", self.query.as_deref())
            .choice("sortname", &self.sortname)
            .choice("sortorder", &self.sortorder)
            .choice("filter", &self.filter)
            .pagination(self.page, self.rp)
            .finish()
    }
}

/// A project that uses a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagProject {
    pub project_id: String,
    pub project_name: String,
    pub project_icon_url: Option<String>,
    pub key: String,
    pub value: Option<String>,
    pub on_node: bool,
    pub on_way: bool,
    pub on_relation: bool,
    pub on_area: bool,
    pub description: Option<String>,
    pub doc_url: Option<String>,
    pub icon_url: Option<String>,
}

impl Validate for TagProject {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("project_id", &self.project_id)?;
        non_empty("project_name", &self.project_name)?;
        non_empty("key", &self.key)?;
        non_empty_opt("value", self.value.as_deref())
    }
}

impl TaginfoClient {
    /// Gets projects using a tag.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn tag_projects(
        &self,
        params: &TagProjectsParams,
    ) -> Result<Response<Vec<TagProject>>, TaginfoError> {
        self.execute(&catalog::TAG_PROJECTS, params).await
    }
}
