use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{KeyParams, PrevalentValue};
use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::{SchemaViolation, TaginfoError};
use crate::response::schema::{fraction, min_chars, non_empty};
use crate::response::{Response, Validate};
use crate::types::{ObjectType, PrintingDirection};

/// Usage of a key on one type of object.
///
/// Also returned, one per object type, by the `key/stats` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyObjectCount {
    /// Object type.
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    /// Number of objects of this type with the key.
    pub count: u64,
    /// `count` relative to all objects of this type.
    pub count_fraction: f64,
    /// Number of different values for the key.
    pub values: u64,
}

impl Validate for KeyObjectCount {
    fn validate(&self) -> Result<(), SchemaViolation> {
        fraction("count_fraction", self.count_fraction)
    }
}

/// Description of a key in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescription {
    pub text: String,
    /// Printing direction for this language.
    pub dir: PrintingDirection,
}

impl Validate for KeyDescription {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("text", &self.text)
    }
}

/// A language in which a wiki page about the key exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyWikiPage {
    /// Language code.
    pub lang: String,
    /// English name of the language.
    pub english: String,
    /// Native name of the language.
    pub native: String,
    /// Printing direction for the native name.
    pub dir: PrintingDirection,
}

impl Validate for KeyWikiPage {
    fn validate(&self) -> Result<(), SchemaViolation> {
        min_chars("lang", &self.lang, 2)?;
        non_empty("english", &self.english)?;
        non_empty("native", &self.native)
    }
}

/// Various data for a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyOverview {
    /// The requested key.
    pub key: String,
    /// Prevalent values, most used first.
    pub prevalent_values: Vec<PrevalentValue>,
    /// Object counts per object type.
    pub counts: Vec<KeyObjectCount>,
    /// Descriptions by language code.
    pub description: HashMap<String, KeyDescription>,
    pub wiki_pages: Vec<KeyWikiPage>,
    /// Whether a distribution map is available.
    pub has_map: bool,
    /// Number of users last editing objects with this key.
    #[serde(default)]
    pub users: u64,
    /// Number of projects mentioning this key.
    #[serde(default)]
    pub projects: u64,
}

impl Validate for KeyOverview {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("key", &self.key)?;
        self.prevalent_values
            .validate()
            .map_err(|v| v.within("prevalent_values"))?;
        self.counts.validate().map_err(|v| v.within("counts"))?;
        self.description
            .validate()
            .map_err(|v| v.within("description"))?;
        self.wiki_pages.validate().map_err(|v| v.within("wiki_pages"))
    }
}

impl TaginfoClient {
    /// Shows various data for a key.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn key_overview(
        &self,
        params: &KeyParams,
    ) -> Result<Response<KeyOverview>, TaginfoError> {
        self.execute(&catalog::KEY_OVERVIEW, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OVERVIEW: &str = r#"{
        "key": "amenity",
        "prevalent_values": [{"value": "parking", "count": 10, "fraction": 0.5}],
        "counts": [
            {"type": "all", "count": 20, "count_fraction": 0.01, "values": 2},
            {"type": "nodes", "count": 12, "count_fraction": 0.002, "values": 2}
        ],
        "description": {"en": {"text": "Facilities", "dir": "ltr"}},
        "wiki_pages": [{"lang": "de", "english": "German", "native": "Deutsch", "dir": "ltr"}],
        "has_map": true
    }"#;

    #[test]
    fn test_decode_with_defaults() {
        let overview: KeyOverview = serde_json::from_str(OVERVIEW).unwrap();
        assert_eq!(overview.counts[1].object_type, ObjectType::Nodes);
        assert_eq!(overview.description["en"].dir, PrintingDirection::Ltr);
        assert_eq!(overview.users, 0);
        assert_eq!(overview.projects, 0);
        assert!(overview.validate().is_ok());
    }

    #[test]
    fn test_short_language_code_rejected() {
        let raw = OVERVIEW.replace(r#""lang": "de""#, r#""lang": "d""#);
        let overview: KeyOverview = serde_json::from_str(&raw).unwrap();
        assert_eq!(overview.validate().unwrap_err().field(), "wiki_pages[0].lang");
    }

    #[test]
    fn test_empty_description_rejected() {
        let raw = OVERVIEW.replace(r#""text": "Facilities""#, r#""text": """#);
        let overview: KeyOverview = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            overview.validate().unwrap_err().field(),
            r#"description["en"].text"#
        );
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let raw = OVERVIEW.replace(r#""dir": "ltr"}}"#, r#""dir": "up"}}"#);
        assert!(serde_json::from_str::<KeyOverview>(&raw).is_err());
    }
}
