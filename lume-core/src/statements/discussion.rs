//! Discussion events: starting, reading, posting

use lume_models::{activity_types, verbs, LearningEvent};

use crate::caliper::{CaliperEntity, CaliperOptions};
use crate::config::StatementConfig;
use crate::dispatch::{self, StatementOptions, StatementOutcome};
use crate::error::StatementError;
use crate::id::derive_statement_id;
use crate::statements::required;
use crate::validate::{validate, FieldKind, FieldRule, FieldRules};
use crate::xapi::{ActivitySpec, ObjectSpec, XapiOptions, XapiResult};

const START_RULES: FieldRules = &[
    ("id", FieldRule::required(FieldKind::Uri)),
    ("title", FieldRule::required(FieldKind::Str)),
    ("body", FieldRule::optional(FieldKind::Str)),
];

/// A user starting a new discussion.
///
/// Metadata: `id` (discussion URL), `title`, optional `body`. Id seed:
/// `[discussion id]`.
pub async fn start(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, START_RULES)?;

    let metadata = &event.metadata;
    let id = required(metadata.str("id"), "id")?;
    let object = ActivitySpec::new(id)
        .activity_type(&activity_types::DISCUSSION)
        .name(metadata.str("title"))
        .description(metadata.str("body"));

    let caliper_object = CaliperEntity::builder()
        .id(id)
        .property("name", metadata.str("title"))
        .property("description", metadata.str("body"))
        .property("dateCreated", event.timestamp.to_iso8601())
        .build();

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::STARTED,
            xapi: XapiOptions::new(vec![id.to_string()], ObjectSpec::Activity(object)),
            caliper: Some(CaliperOptions::new(caliper_object)),
        },
    )
    .await
}

const READ_RULES: FieldRules = &[("discussion", FieldRule::required(FieldKind::Uri))];

/// A user reading a discussion.
///
/// Metadata: `discussion` (URL of the discussion read). Id seed:
/// `[timestamp, discussion, user key]`.
pub async fn read(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, READ_RULES)?;

    let discussion = required(event.metadata.str("discussion"), "discussion")?;
    let user_key = required(event.actor.user_key(), "actor")?;
    let discussion_ref = derive_statement_id(&config.platform, &verbs::STARTED, &[discussion]);

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::READ,
            xapi: XapiOptions::new(
                vec![
                    event.timestamp.seed_string(),
                    discussion.to_string(),
                    user_key,
                ],
                ObjectSpec::from(discussion_ref),
            ),
            caliper: None,
        },
    )
    .await
}

const POST_RULES: FieldRules = &[
    ("id", FieldRule::required(FieldKind::Uri)),
    ("body", FieldRule::required(FieldKind::Str)),
    ("discussion", FieldRule::required(FieldKind::Uri)),
    ("parent", FieldRule::optional(FieldKind::Uri)),
];

/// A user posting to a discussion.
///
/// Metadata: `id` (post URL), `body`, `discussion` (URL of the discussion
/// posted in), optional `parent` (URL of the post this replies to). Id
/// seed: `[post id]`.
pub async fn post(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, POST_RULES)?;

    let metadata = &event.metadata;
    let id = required(metadata.str("id"), "id")?;
    let body = required(metadata.str("body"), "body")?;
    let discussion = required(metadata.str("discussion"), "discussion")?;
    let discussion_ref = derive_statement_id(&config.platform, &verbs::STARTED, &[discussion]);

    let mut xapi = XapiOptions::new(vec![id.to_string()], ObjectSpec::from(discussion_ref));
    xapi.result = Some(XapiResult {
        response: Some(body.to_string()),
        ..XapiResult::default()
    });
    xapi.parent = metadata
        .str("parent")
        .map(|parent| ObjectSpec::Reference(parent.to_string()));

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::COMMENTED,
            xapi,
            caliper: None,
        },
    )
    .await
}
