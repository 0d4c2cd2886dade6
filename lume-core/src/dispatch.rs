//! Dispatcher: select a projector, generate the statement, optionally
//! deliver it
//!
//! Generation and delivery are separable outcomes: a delivery failure is
//! carried in the outcome next to the statement it failed to deliver, so
//! the caller can always retrieve the generated statement.

use serde::Serialize;

use lume_models::{LearningEvent, VerbDef};

use crate::caliper::{self, CaliperOptions, CaliperStatement};
use crate::config::{StatementConfig, StatementType};
use crate::error::{DeliveryError, StatementError};
use crate::lrs::LrsClient;
use crate::xapi::{self, XapiOptions, XapiStatement};

/// The format-specific shaping hints one event kind passes to the
/// dispatcher
#[derive(Debug, Clone)]
pub(crate) struct StatementOptions {
    pub verb: &'static VerbDef,
    pub xapi: XapiOptions,
    /// `None` when no Caliper mapping has been authored for the event kind
    pub caliper: Option<CaliperOptions>,
}

/// A generated statement in one of the two supported formats
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    Xapi(XapiStatement),
    Caliper(CaliperStatement),
}

impl Statement {
    pub fn as_xapi(&self) -> Option<&XapiStatement> {
        match self {
            Statement::Xapi(statement) => Some(statement),
            Statement::Caliper(_) => None,
        }
    }

    pub fn as_caliper(&self) -> Option<&CaliperStatement> {
        match self {
            Statement::Xapi(_) => None,
            Statement::Caliper(statement) => Some(statement),
        }
    }
}

/// The result of a successful generation call
#[derive(Debug)]
pub struct StatementOutcome {
    /// The generated statement, immutable once produced
    pub statement: Statement,
    /// Normalized delivery failures, one per store that did not accept the
    /// statement. Empty when delivery succeeded everywhere or no store is
    /// configured.
    pub delivery: Vec<DeliveryError>,
}

/// Generate a statement for a validated event and deliver it where
/// configured.
///
/// Caliper statements are returned without storage: event store delivery
/// for Caliper is not integrated.
pub(crate) async fn process(
    config: &StatementConfig,
    event: &LearningEvent,
    opts: StatementOptions,
) -> Result<StatementOutcome, StatementError> {
    match config.resolve_type()? {
        StatementType::Xapi => {
            let statement = xapi::generate_statement(config, event, opts.verb, opts.xapi);
            let delivery = if config.lrs.is_empty() {
                Vec::new()
            } else {
                LrsClient::new()
                    .store_statement(&config.lrs, &statement)
                    .await
            };
            Ok(StatementOutcome {
                statement: Statement::Xapi(statement),
                delivery,
            })
        }
        StatementType::Caliper => {
            let statement = caliper::generate_statement(config, event, opts.verb, opts.caliper);
            Ok(StatementOutcome {
                statement: Statement::Caliper(statement),
                delivery: Vec::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xapi::{ActivitySpec, ObjectSpec};
    use lume_models::{verbs, Actor, Platform};

    fn options() -> StatementOptions {
        StatementOptions {
            verb: &verbs::CREATED,
            xapi: XapiOptions::new(
                vec!["https://lms.example.edu/courses/1".to_string()],
                ObjectSpec::Activity(ActivitySpec::new("https://lms.example.edu/courses/1")),
            ),
            caliper: None,
        }
    }

    fn event() -> LearningEvent {
        LearningEvent::new("2018-03-14T10:00:00Z", Actor::email("s@example.edu"))
    }

    #[tokio::test]
    async fn unrecognized_type_fails_before_any_projector() {
        let mut config =
            StatementConfig::new(Platform::new("Example LMS", "https://lms.example.edu"));
        config.statement_type = Some("SCORM".to_string());
        let err = process(&config, &event(), options()).await.unwrap_err();
        assert_eq!(err.code(), 400);
    }

    #[tokio::test]
    async fn default_type_generates_xapi() {
        let config = StatementConfig::new(Platform::new("Example LMS", "https://lms.example.edu"));
        let outcome = process(&config, &event(), options()).await.unwrap();
        assert!(outcome.statement.as_xapi().is_some());
        assert!(outcome.delivery.is_empty());
    }

    #[tokio::test]
    async fn caliper_type_without_mapping_yields_unmapped() {
        let config = StatementConfig::new(Platform::new("Example LMS", "https://lms.example.edu"))
            .caliper();
        let outcome = process(&config, &event(), options()).await.unwrap();
        assert_eq!(
            outcome.statement.as_caliper(),
            Some(&CaliperStatement::Unmapped)
        );
    }
}
