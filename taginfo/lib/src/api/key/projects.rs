use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::{SchemaViolation, TaginfoError, ValueError};
use crate::params::{Choice, ParamsBuilder, QueryParameters, QueryParams};
use crate::response::schema::non_empty;
use crate::response::{Response, Validate};
use crate::types::{ObjectType, SortOrder};

/// Sort fields for projects using a key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum KeyProjectSorting {
    #[default]
    ProjectName,
    Tag,
}

/// Parameters for `key/projects`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyProjectsParams {
    pub key: String,
    /// Only show results where the project name or tag value contains this text.
    pub query: Option<String>,
    pub sortname: Choice<KeyProjectSorting>,
    pub sortorder: Choice<SortOrder>,
    pub filter: Choice<ObjectType>,
    pub page: i64,
    pub rp: i64,
}

impl KeyProjectsParams {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            query: None,
            sortname: Choice::default(),
            sortorder: Choice::default(),
            filter: Choice::default(),
            page: 1,
            rp: 0,
        }
    }
}

impl QueryParameters for KeyProjectsParams {
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

/// A project that uses a key.
///
/// See <https://wiki.openstreetmap.org/wiki/Taginfo/Projects>.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyProject {
    pub project_id: String,
    pub project_name: String,
    pub project_icon_url: Option<String>,
    pub key: String,
    /// Value, if the project uses a specific tag rather than the whole key.
    pub value: Option<String>,
    pub on_node: bool,
    pub on_way: bool,
    pub on_relation: bool,
    pub on_area: bool,
    pub description: Option<String>,
    pub doc_url: Option<String>,
    pub icon_url: Option<String>,
}

impl Validate for KeyProject {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("project_id", &self.project_id)?;
        non_empty("project_name", &self.project_name)?;
        non_empty("key", &self.key)
    }
}

impl TaginfoClient {
    /// Gets projects using a key.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn key_projects(
        &self,
        params: &KeyProjectsParams,
    ) -> Result<Response<Vec<KeyProject>>, TaginfoError> {
        self.execute(&catalog::KEY_PROJECTS, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"{
        "project_id": "id_editor",
        "project_name": "iD Editor",
        "project_icon_url": "https://example.com/id.png",
        "key": "highway",
        "value": null,
        "on_node": true,
        "on_way": true,
        "on_relation": false,
        "on_area": false,
        "description": "",
        "doc_url": null,
        "icon_url": null
    }"#;

    #[test]
    fn test_defaults() {
        let query = KeyProjectsParams::new("highway").to_query().unwrap();
        assert_eq!(
            query.to_query_string(),
            "filter=all&key=highway&page=1&rp=0&sortname=project_name&sortorder=asc"
        );
    }

    #[test]
    fn test_decode_keeps_raw_strings() {
        let project: KeyProject = serde_json::from_str(PROJECT).unwrap();
        assert_eq!(project.value, None);
        assert_eq!(project.description.as_deref(), Some(""));
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_flags_must_be_booleans() {
        let raw = PROJECT.replace(r#""on_node": true"#, r#""on_node": "true""#);
        assert!(serde_json::from_str::<KeyProject>(&raw).is_err());
    }
}
