//! xAPI statement wire shapes
//!
//! These structs serialize to the exact JSON an LRS expects; field naming
//! and optionality follow the xAPI statement data model, not Rust
//! conventions.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

/// A locale-tagged string, serialized as `{"en-US": "..."}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMap(pub String);

impl Serialize for LanguageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("en-US", &self.0)?;
        map.end()
    }
}

impl From<&str> for LanguageMap {
    fn from(s: &str) -> Self {
        LanguageMap(s.to_string())
    }
}

impl From<String> for LanguageMap {
    fn from(s: String) -> Self {
        LanguageMap(s)
    }
}

/// One fully-formed xAPI statement, immutable once produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XapiStatement {
    pub id: Uuid,
    /// ISO 8601, or null when the event timestamp could not be parsed
    pub timestamp: Option<String>,
    pub actor: XapiAgent,
    pub verb: XapiVerb,
    pub object: XapiObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<XapiResult>,
    pub context: XapiContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<XapiAttachment>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XapiVerb {
    pub id: String,
    pub display: LanguageMap,
}

/// An xAPI agent. Exactly one identity method is ever set; construction
/// goes through [`crate::xapi::generate_agent`] which enforces the
/// openid > account > mbox precedence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XapiAgent {
    #[serde(rename = "objectType")]
    pub object_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<XapiAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbox: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XapiAccount {
    #[serde(rename = "homePage")]
    pub home_page: String,
    pub name: String,
}

/// The object of a statement: another statement (by derived id) or an
/// activity with a nested definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XapiObject {
    Ref(StatementRef),
    Activity(XapiActivity),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementRef {
    #[serde(rename = "objectType")]
    pub object_type: &'static str,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XapiActivity {
    #[serde(rename = "objectType")]
    pub object_type: &'static str,
    pub id: String,
    pub definition: ActivityDefinition,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActivityDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LanguageMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LanguageMap>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(rename = "moreInfo", skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
    /// Vendor/domain-specific fields, keyed by their own IRI
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct XapiResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<XapiScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XapiScore {
    pub raw: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaled: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XapiContext {
    pub platform: String,
    #[serde(rename = "contextActivities")]
    pub context_activities: ContextActivities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<XapiAgent>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ContextActivities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<XapiObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<XapiObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XapiAttachment {
    #[serde(rename = "usageType")]
    pub usage_type: String,
    pub display: LanguageMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LanguageMap>,
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Size in bytes, carried through from the caller verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<Number>,
    #[serde(rename = "fileUrl", skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Base64-encoded SHA-256 of the display text, used by consuming
    /// stores as a content-identity check
    pub sha2: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn language_map_serializes_locale_tagged() {
        let value = serde_json::to_value(LanguageMap::from("created")).unwrap();
        assert_eq!(value, json!({"en-US": "created"}));
    }

    #[test]
    fn empty_definition_serializes_without_extensions_key() {
        let definition = ActivityDefinition {
            name: Some("Intro".into()),
            ..ActivityDefinition::default()
        };
        let value = serde_json::to_value(&definition).unwrap();
        assert_eq!(value, json!({"name": {"en-US": "Intro"}}));
    }

    #[test]
    fn null_timestamp_stays_in_the_output() {
        let statement = XapiStatement {
            id: Uuid::nil(),
            timestamp: None,
            actor: XapiAgent {
                object_type: "Agent",
                name: None,
                openid: None,
                account: None,
                mbox: Some("mailto:s@example.edu".to_string()),
            },
            verb: XapiVerb {
                id: "http://activitystrea.ms/schema/1.0/create".to_string(),
                display: "created".into(),
            },
            object: XapiObject::Ref(StatementRef {
                object_type: "StatementRef",
                id: Uuid::nil().to_string(),
            }),
            result: None,
            context: XapiContext {
                platform: "Example LMS".to_string(),
                context_activities: ContextActivities::default(),
                instructor: None,
            },
            attachments: None,
        };
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(value["timestamp"], Value::Null);
        assert!(value.get("result").is_none());
    }
}
