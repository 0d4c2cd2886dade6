//! Course events: creation, enrollment, leaving

use lume_models::{activity_types, verbs, LearningEvent};

use crate::config::StatementConfig;
use crate::dispatch::{self, StatementOptions, StatementOutcome};
use crate::error::StatementError;
use crate::id::derive_statement_id;
use crate::statements::required;
use crate::validate::{validate, FieldKind, FieldRule, FieldRules};
use crate::xapi::{ActivitySpec, ObjectSpec, XapiOptions};

const PLANNED_START_TIME: &str = "http://id.tincanapi.com/extension/planned-start-time";
const PLANNED_DURATION: &str = "http://id.tincanapi.com/extension/planned-duration";

const CREATE_RULES: FieldRules = &[
    ("id", FieldRule::required(FieldKind::Uri)),
    ("name", FieldRule::required(FieldKind::Str)),
    ("description", FieldRule::optional(FieldKind::Str)),
    ("start", FieldRule::optional(FieldKind::Date)),
    ("end", FieldRule::optional(FieldKind::Date)),
];

/// A user creating a new course.
///
/// Metadata: `id` (course URL), `name`, optional `description`, optional
/// `start`/`end` dates. Id seed: `[course id]`.
pub async fn create(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, CREATE_RULES)?;

    let metadata = &event.metadata;
    let id = required(metadata.str("id"), "id")?;
    let object = ActivitySpec::new(id)
        .activity_type(&activity_types::COURSE)
        .name(metadata.str("name"))
        .description(metadata.str("description"))
        .extension(PLANNED_START_TIME, metadata.date("start"))
        .extension(PLANNED_DURATION, metadata.date("end"));

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::CREATED,
            xapi: XapiOptions::new(vec![id.to_string()], ObjectSpec::Activity(object)),
            caliper: None,
        },
    )
    .await
}

const ENROLL_RULES: FieldRules = &[("course", FieldRule::required(FieldKind::Uri))];

/// A user enrolling in a course.
///
/// Metadata: `course` (URL of the course). Id seed: `[timestamp, user key]`.
/// The object references the id the course-creation statement would have
/// produced, rederived rather than looked up.
pub async fn enroll(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, ENROLL_RULES)?;

    let course = required(event.metadata.str("course"), "course")?;
    let user_key = required(event.actor.user_key(), "actor")?;
    let course_ref = derive_statement_id(&config.platform, &verbs::CREATED, &[course]);

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::REGISTERED,
            xapi: XapiOptions::new(
                vec![event.timestamp.seed_string(), user_key],
                ObjectSpec::from(course_ref),
            ),
            caliper: None,
        },
    )
    .await
}

const LEAVE_RULES: FieldRules = &[("course", FieldRule::required(FieldKind::Uri))];

/// A user leaving a course.
///
/// Metadata: `course` (URL of the course). Id seed: `[timestamp, user key]`.
pub async fn leave(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, LEAVE_RULES)?;

    let course = required(event.metadata.str("course"), "course")?;
    let user_key = required(event.actor.user_key(), "actor")?;
    let course_ref = derive_statement_id(&config.platform, &verbs::CREATED, &[course]);

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::UNREGISTERED,
            xapi: XapiOptions::new(
                vec![event.timestamp.seed_string(), user_key],
                ObjectSpec::from(course_ref),
            ),
            caliper: None,
        },
    )
    .await
}
