//! Caliper projector: builds a Caliper event from an internal event
//!
//! Coverage is deliberately partial: event kinds without an authored
//! Caliper mapping project to [`CaliperStatement::Unmapped`]. Delivery of
//! Caliper statements to an event store is not integrated; the dispatcher
//! returns the generated statement without attempting storage.

pub mod types;

use tracing::debug;

use lume_models::{Actor, LearningEvent, Platform, VerbDef};

pub use types::{
    entity_type, event_type, CaliperEntity, CaliperEntityBuilder, CaliperEvent, CaliperStatement,
    CONTEXT,
};

use crate::config::StatementConfig;

/// Caliper-specific shaping hints for a mapped event kind
#[derive(Debug, Clone)]
pub struct CaliperOptions {
    /// The Caliper event type; the generic `Event` when not set
    pub event_type: Option<&'static str>,
    /// The object of the event, already entity-shaped
    pub object: CaliperEntity,
    /// Entity produced by the action (e.g. a submission), when one applies
    pub generated: Option<CaliperEntity>,
}

impl CaliperOptions {
    pub fn new(object: CaliperEntity) -> Self {
        Self {
            event_type: None,
            object,
            generated: None,
        }
    }

    pub fn event_type(mut self, event_type: &'static str) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn generated(mut self, generated: CaliperEntity) -> Self {
        self.generated = Some(generated);
        self
    }
}

/// Build the Caliper statement for a learning activity.
///
/// `opts` of `None` means no Caliper mapping has been authored for the
/// event kind; the result is the explicit empty statement.
pub(crate) fn generate_statement(
    config: &StatementConfig,
    event: &LearningEvent,
    verb: &VerbDef,
    opts: Option<CaliperOptions>,
) -> CaliperStatement {
    let Some(opts) = opts else {
        debug!(verb = verb.key, "no Caliper mapping authored, emitting empty statement");
        return CaliperStatement::Unmapped;
    };

    CaliperStatement::Event(Box::new(CaliperEvent {
        context: CONTEXT,
        event_type: opts.event_type.unwrap_or(event_type::EVENT),
        event_time: event.timestamp.to_iso8601(),
        ed_app: generate_ed_app(&config.platform),
        action: verb.caliper_action().to_string(),
        actor: generate_person(&event.actor),
        object: opts.object,
        generated: opts.generated,
    }))
}

/// The platform as a Caliper SoftwareApplication entity
pub fn generate_ed_app(platform: &Platform) -> CaliperEntity {
    CaliperEntity::builder()
        .entity_type(entity_type::SOFTWARE_APPLICATION)
        .id(&platform.url)
        .property("name", Some(platform.name.as_str()))
        .property("description", platform.description.as_deref())
        .build()
}

/// An actor as a Caliper Person entity
pub fn generate_person(actor: &Actor) -> CaliperEntity {
    let mut builder = CaliperEntity::builder()
        .entity_type(entity_type::PERSON)
        .property("name", actor.name.as_deref())
        .property(
            "dateCreated",
            actor.created.as_ref().and_then(|t| t.to_iso8601()),
        )
        .property(
            "dateModified",
            actor.updated.as_ref().and_then(|t| t.to_iso8601()),
        );
    if let Some(id) = &actor.id {
        builder = builder.id(id);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lume_models::{verbs, Timestamp};
    use serde_json::json;

    fn config() -> StatementConfig {
        let mut platform = Platform::new("Example LMS", "https://lms.example.edu");
        platform.description = Some("The example LMS".to_string());
        StatementConfig::new(platform)
    }

    fn event() -> LearningEvent {
        LearningEvent::new("2018-03-14T10:00:00Z", Actor::email("s@example.edu"))
    }

    #[test]
    fn unmapped_event_kind_produces_empty_statement() {
        let statement = generate_statement(&config(), &event(), &verbs::CREATED, None);
        assert_eq!(statement, CaliperStatement::Unmapped);
        assert_eq!(serde_json::to_value(&statement).unwrap(), json!({}));
    }

    #[test]
    fn ed_app_is_a_software_application_entity() {
        let ed_app = generate_ed_app(&config().platform);
        let value = serde_json::to_value(&ed_app).unwrap();
        assert_eq!(value["@type"], entity_type::SOFTWARE_APPLICATION);
        assert_eq!(value["@id"], "https://lms.example.edu");
        assert_eq!(value["name"], "Example LMS");
        assert_eq!(value["description"], "The example LMS");
    }

    #[test]
    fn person_carries_normalized_account_dates() {
        let actor = Actor {
            id: Some("https://lms.example.edu/users/7".to_string()),
            id_source: Some("https://lms.example.edu".to_string()),
            name: Some("Student".to_string()),
            created: Some(Timestamp::from("2017-09-01")),
            updated: Some(Timestamp::Millis(1_521_021_600_000)),
            ..Actor::default()
        };
        let value = serde_json::to_value(generate_person(&actor)).unwrap();
        assert_eq!(value["@type"], entity_type::PERSON);
        assert_eq!(value["@id"], "https://lms.example.edu/users/7");
        assert_eq!(value["dateCreated"], "2017-09-01T00:00:00.000Z");
        assert_eq!(value["dateModified"], "2018-03-14T10:00:00.000Z");
    }

    #[test]
    fn mapped_event_defaults_to_generic_event_type() {
        let object = CaliperEntity::builder()
            .id("https://lms.example.edu/discussions/1")
            .build();
        let statement = generate_statement(
            &config(),
            &event(),
            &verbs::STARTED,
            Some(CaliperOptions::new(object)),
        );
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(value["@type"], event_type::EVENT);
        assert_eq!(value["eventTime"], "2018-03-14T10:00:00.000Z");
        assert_eq!(value["action"], verbs::STARTED.xapi.id);
    }

    #[test]
    fn mapped_verb_uses_its_caliper_action() {
        let object = CaliperEntity::builder().id("https://lms.example.edu").build();
        let statement = generate_statement(
            &config(),
            &event(),
            &verbs::LOGGED_IN,
            Some(CaliperOptions::new(object).event_type(event_type::SESSION)),
        );
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(value["@type"], event_type::SESSION);
        assert_eq!(
            value["action"],
            "http://purl.imsglobal.org/vocab/caliper/v1/action#LoggedIn"
        );
    }
}
