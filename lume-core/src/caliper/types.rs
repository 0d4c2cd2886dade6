//! Caliper wire shapes and vocabulary constants (JSON-LD)

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// The JSON-LD context every Caliper entity and event carries
pub const CONTEXT: &str = "http://purl.imsglobal.org/ctx/caliper/v1/Context";

/// Caliper entity type IRIs
pub mod entity_type {
    pub const ENTITY: &str = "http://purl.imsglobal.org/caliper/v1/Entity";
    pub const PERSON: &str = "http://purl.imsglobal.org/caliper/v1/lis/Person";
    pub const SOFTWARE_APPLICATION: &str =
        "http://purl.imsglobal.org/caliper/v1/SoftwareApplication";
    pub const DIGITAL_RESOURCE: &str = "http://purl.imsglobal.org/caliper/v1/DigitalResource";
    pub const SESSION: &str = "http://purl.imsglobal.org/caliper/v1/Session";
}

/// Caliper event type IRIs
pub mod event_type {
    pub const EVENT: &str = "http://purl.imsglobal.org/caliper/v1/Event";
    pub const VIEW: &str = "http://purl.imsglobal.org/caliper/v1/ViewEvent";
    pub const SESSION: &str = "http://purl.imsglobal.org/caliper/v1/SessionEvent";
}

/// A Caliper entity.
///
/// `@type` and `@id` are lifted out of the property bag; every remaining
/// property is flattened into the entity verbatim, so arbitrary additional
/// fields pass through without being re-listed here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaliperEntity {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub entity_type: &'static str,
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl CaliperEntity {
    pub fn builder() -> CaliperEntityBuilder {
        CaliperEntityBuilder::default()
    }
}

/// Builder for [`CaliperEntity`]; the entity type defaults to the generic
/// `Entity` and absent property values leave no key behind
#[derive(Debug, Default)]
pub struct CaliperEntityBuilder {
    entity_type: Option<&'static str>,
    id: Option<String>,
    properties: Map<String, Value>,
    extensions: Option<Map<String, Value>>,
}

impl CaliperEntityBuilder {
    pub fn entity_type(mut self, entity_type: &'static str) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn property(mut self, key: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            self.properties.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn extensions(mut self, extensions: Map<String, Value>) -> Self {
        self.extensions = Some(extensions);
        self
    }

    pub fn build(self) -> CaliperEntity {
        CaliperEntity {
            context: CONTEXT,
            entity_type: self.entity_type.unwrap_or(entity_type::ENTITY),
            id: self.id,
            properties: self.properties,
            extensions: self.extensions,
        }
    }
}

/// One fully-formed Caliper event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaliperEvent {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub event_type: &'static str,
    /// ISO 8601, or null when the event timestamp could not be parsed
    #[serde(rename = "eventTime")]
    pub event_time: Option<String>,
    #[serde(rename = "edApp")]
    pub ed_app: CaliperEntity,
    pub action: String,
    pub actor: CaliperEntity,
    pub object: CaliperEntity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<CaliperEntity>,
}

/// The Caliper projection result.
///
/// Many event kinds have no Caliper mapping authored yet; those produce the
/// explicit [`CaliperStatement::Unmapped`] variant, which serializes to an
/// empty object rather than failing or fabricating data.
#[derive(Debug, Clone, PartialEq)]
pub enum CaliperStatement {
    Event(Box<CaliperEvent>),
    Unmapped,
}

impl Serialize for CaliperStatement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CaliperStatement::Event(event) => event.serialize(serializer),
            CaliperStatement::Unmapped => serializer.serialize_map(Some(0))?.end(),
        }
    }
}
