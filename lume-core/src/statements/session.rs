//! Session events: logging in and out of the platform

use lume_models::{verbs, LearningEvent, VerbDef};

use crate::caliper::{self, event_type, CaliperOptions};
use crate::config::StatementConfig;
use crate::dispatch::{self, StatementOptions, StatementOutcome};
use crate::error::StatementError;
use crate::statements::required;
use crate::validate::{validate, FieldRules};
use crate::xapi::{ActivitySpec, ObjectSpec, XapiOptions};

const SESSION_RULES: FieldRules = &[];

/// A user logging in to the platform.
///
/// No metadata. Id seed: `[timestamp, user key]`. The object is the
/// platform itself; Caliper maps this to a SessionEvent.
pub async fn login(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    session_statement(config, event, &verbs::LOGGED_IN).await
}

/// A user logging out of the platform.
///
/// No metadata. Id seed: `[timestamp, user key]`.
pub async fn logout(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    session_statement(config, event, &verbs::LOGGED_OUT).await
}

async fn session_statement(
    config: &StatementConfig,
    event: &LearningEvent,
    verb: &'static VerbDef,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, SESSION_RULES)?;

    let user_key = required(event.actor.user_key(), "actor")?;
    let object = ActivitySpec::new(&config.platform.url)
        .name(Some(config.platform.name.as_str()))
        .description(config.platform.description.as_deref());

    let caliper_object = caliper::generate_ed_app(&config.platform);

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb,
            xapi: XapiOptions::new(
                vec![event.timestamp.seed_string(), user_key],
                ObjectSpec::Activity(object),
            ),
            caliper: Some(CaliperOptions::new(caliper_object).event_type(event_type::SESSION)),
        },
    )
    .await
}
