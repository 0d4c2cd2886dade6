//! Configuration passed in when generating a learning activity statement

use serde::{Deserialize, Deserializer, Serialize};

use lume_models::Platform;

use crate::error::StatementError;

/// The statement format to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementType {
    /// Experience API (actor-verb-object model)
    #[default]
    Xapi,
    /// IMS Caliper (activity/entity/action model, JSON-LD based)
    Caliper,
}

/// Configuration for a statement-generation call.
///
/// Read-only after construction and safe to share across any number of
/// concurrent calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementConfig {
    /// The statement type to generate, `XAPI` or `CALIPER`. Defaults to
    /// `XAPI`. Kept as free-form text so an unrecognized value fails at
    /// dispatch time with a 400 rather than at config-load time.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub statement_type: Option<String>,

    /// The platform generating learning activities
    pub platform: Platform,

    /// Record stores to deliver generated xAPI statements to. Accepts a
    /// single store object or a list of them; empty means generate only,
    /// deliver nowhere.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub lrs: Vec<LrsConfig>,
}

/// Deserialize `lrs` given either as one store object or as a list
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<LrsConfig>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(LrsConfig),
        Many(Vec<LrsConfig>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(store) => vec![store],
        OneOrMany::Many(stores) => stores,
    })
}

impl StatementConfig {
    pub fn new(platform: Platform) -> Self {
        Self {
            statement_type: None,
            platform,
            lrs: Vec::new(),
        }
    }

    /// Select CALIPER output
    pub fn caliper(mut self) -> Self {
        self.statement_type = Some("CALIPER".to_string());
        self
    }

    /// Add a record store to deliver statements to
    pub fn with_lrs(mut self, lrs: LrsConfig) -> Self {
        self.lrs.push(lrs);
        self
    }

    /// Resolve the configured statement type.
    ///
    /// An unrecognized value is a dispatch-level 400: neither projector may
    /// run for it.
    pub fn resolve_type(&self) -> Result<StatementType, StatementError> {
        match self.statement_type.as_deref() {
            None | Some("XAPI") => Ok(StatementType::Xapi),
            Some("CALIPER") => Ok(StatementType::Caliper),
            Some(_) => Err(StatementError::validation("Unrecognized statement type")),
        }
    }
}

/// Connection values for one Learning Record Store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LrsConfig {
    /// The URL to the endpoint used for storing new statements
    pub endpoint: String,
    /// The LRS username
    pub username: String,
    /// The LRS password
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform() -> Platform {
        Platform::new("Example LMS", "https://lms.example.edu")
    }

    #[test]
    fn statement_type_defaults_to_xapi() {
        let config = StatementConfig::new(platform());
        assert_eq!(config.resolve_type().unwrap(), StatementType::Xapi);
    }

    #[test]
    fn statement_type_caliper_is_recognized() {
        let config = StatementConfig::new(platform()).caliper();
        assert_eq!(config.resolve_type().unwrap(), StatementType::Caliper);
    }

    #[test]
    fn unrecognized_statement_type_is_a_400() {
        let mut config = StatementConfig::new(platform());
        config.statement_type = Some("SCORM".to_string());
        let err = config.resolve_type().unwrap_err();
        assert_eq!(err.code(), 400);
        assert!(err.to_string().contains("Unrecognized"));
    }

    #[test]
    fn config_deserializes_single_lrs_list() {
        let json = r#"{
            "type": "XAPI",
            "platform": {"name": "Example LMS", "url": "https://lms.example.edu"},
            "lrs": [{"endpoint": "https://lrs.example.com/xAPI/", "username": "u", "password": "p"}]
        }"#;
        let config: StatementConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.lrs.len(), 1);
        assert_eq!(config.lrs[0].endpoint, "https://lrs.example.com/xAPI/");
    }

    #[test]
    fn config_accepts_a_bare_lrs_object() {
        let json = r#"{
            "platform": {"name": "Example LMS", "url": "https://lms.example.edu"},
            "lrs": {"endpoint": "https://lrs.example.com/xAPI/", "username": "u", "password": "p"}
        }"#;
        let config: StatementConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.lrs.len(), 1);
        assert_eq!(config.lrs[0].endpoint, "https://lrs.example.com/xAPI/");
    }
}
