//! xAPI projector: builds a full xAPI statement from an internal event
//!
//! Input is assumed to have passed [`crate::validate`]; this layer does not
//! re-validate. The one tolerated failure is an unparseable timestamp,
//! which becomes a null timestamp field rather than an error.

pub mod types;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Number, Value};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use lume_models::{activity_types, ActivityContext, Actor, LearningEvent, VerbDef};

pub use types::{
    ActivityDefinition, ContextActivities, LanguageMap, StatementRef, XapiAccount, XapiActivity,
    XapiAgent, XapiContext, XapiObject, XapiResult, XapiScore, XapiStatement, XapiVerb,
};

use crate::config::StatementConfig;
use crate::id::derive_statement_id;

/// xAPI-specific shaping hints, built per event kind
#[derive(Debug, Clone)]
pub struct XapiOptions {
    /// Seed values for the statement id, in the event kind's documented
    /// order (changing the order changes the id)
    pub id_seed: Vec<String>,
    /// The object of the statement
    pub object: ObjectSpec,
    /// Result of the activity (completion, response, score)
    pub result: Option<XapiResult>,
    /// Parent activity for `contextActivities.parent`
    pub parent: Option<ObjectSpec>,
    /// Instructor involved in the activity (e.g. grader)
    pub instructor: Option<Actor>,
    /// Attachment carried by the statement
    pub attachment: Option<AttachmentSpec>,
}

impl XapiOptions {
    pub fn new(id_seed: Vec<String>, object: ObjectSpec) -> Self {
        Self {
            id_seed,
            object,
            result: None,
            parent: None,
            instructor: None,
            attachment: None,
        }
    }
}

/// What the statement's object should be
#[derive(Debug, Clone)]
pub enum ObjectSpec {
    /// Another statement, referenced by its (usually rederived) id
    Reference(String),
    /// An activity described in place
    Activity(ActivitySpec),
}

impl From<Uuid> for ObjectSpec {
    fn from(id: Uuid) -> Self {
        ObjectSpec::Reference(id.to_string())
    }
}

/// Description of an activity object before projection
#[derive(Debug, Clone, Default)]
pub struct ActivitySpec {
    pub id: String,
    pub activity_type: Option<&'static str>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub more_info: Option<String>,
    /// IRI-keyed vendor/domain fields destined for `definition.extensions`
    pub extensions: Vec<(&'static str, Value)>,
}

impl ActivitySpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn activity_type(mut self, activity_type: &activity_types::ActivityTypeDef) -> Self {
        self.activity_type = Some(activity_type.id);
        self
    }

    pub fn name(mut self, name: Option<impl Into<String>>) -> Self {
        self.name = name.map(Into::into);
        self
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = description.map(Into::into);
        self
    }

    /// Add an extension when a value is present; absent values leave no
    /// trace in the projected definition
    pub fn extension(mut self, iri: &'static str, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            self.extensions.push((iri, value.into()));
        }
        self
    }
}

impl From<&ActivityContext> for ActivitySpec {
    fn from(context: &ActivityContext) -> Self {
        ActivitySpec::new(&context.id)
            .name(context.name.as_deref())
            .description(context.description.as_deref())
    }
}

/// An attachment before projection; `sha2` is computed, not supplied
#[derive(Debug, Clone)]
pub struct AttachmentSpec {
    /// URL that describes the usage of the attachment
    pub usage_type: String,
    /// The display name of the attachment
    pub display: String,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub length: Option<Number>,
    pub file_url: Option<String>,
}

/// Build the full xAPI statement for a learning activity
pub(crate) fn generate_statement(
    config: &StatementConfig,
    event: &LearningEvent,
    verb: &VerbDef,
    opts: XapiOptions,
) -> XapiStatement {
    let seed: Vec<&str> = opts.id_seed.iter().map(String::as_str).collect();
    let id = derive_statement_id(&config.platform, verb, &seed);
    debug!(statement_id = %id, verb = verb.key, "generating xAPI statement");

    let mut context = XapiContext {
        platform: config.platform.name.clone(),
        context_activities: ContextActivities::default(),
        instructor: None,
    };
    if let Some(grouping) = &event.context {
        context.context_activities.grouping =
            Some(generate_object(ObjectSpec::Activity(grouping.into())));
    }
    if let Some(parent) = opts.parent {
        context.context_activities.parent = Some(generate_object(parent));
    }
    if let Some(instructor) = &opts.instructor {
        context.instructor = Some(generate_agent(instructor));
    }

    XapiStatement {
        id,
        timestamp: event.timestamp.to_iso8601(),
        actor: generate_agent(&event.actor),
        verb: XapiVerb {
            id: verb.xapi.id.to_string(),
            display: verb.xapi.display.into(),
        },
        object: generate_object(opts.object),
        result: opts.result,
        context,
        attachments: opts.attachment.map(|a| vec![generate_attachment(a)]),
    }
}

/// Encode an actor as an xAPI agent.
///
/// Exactly one identity method is chosen, by precedence: OpenID, then
/// account-on-a-system, then mbox. Encoding more than one would make the
/// agent ambiguous to an LRS, so the precedence is load-bearing.
pub fn generate_agent(actor: &Actor) -> XapiAgent {
    let mut agent = XapiAgent {
        object_type: "Agent",
        name: actor.name.clone(),
        openid: None,
        account: None,
        mbox: None,
    };

    match (&actor.id, &actor.id_source) {
        (Some(id), Some(source)) if source == "openid" => {
            agent.openid = Some(id.clone());
        }
        (Some(id), Some(source)) => {
            agent.account = Some(XapiAccount {
                home_page: source.clone(),
                name: id.clone(),
            });
        }
        _ => {
            if let Some(email) = &actor.email {
                agent.mbox = Some(format!("mailto:{}", email));
            }
        }
    }

    agent
}

/// Project an object spec into its wire shape
pub fn generate_object(spec: ObjectSpec) -> XapiObject {
    match spec {
        ObjectSpec::Reference(id) => XapiObject::Ref(StatementRef {
            object_type: "StatementRef",
            id,
        }),
        ObjectSpec::Activity(activity) => {
            let mut definition = ActivityDefinition {
                name: activity.name.map(LanguageMap::from),
                description: activity.description.map(LanguageMap::from),
                activity_type: activity.activity_type.map(str::to_string),
                more_info: activity.more_info,
                extensions: serde_json::Map::new(),
            };
            for (iri, value) in activity.extensions {
                definition.extensions.insert(iri.to_string(), value);
            }
            XapiObject::Activity(XapiActivity {
                object_type: "Activity",
                id: activity.id,
                definition,
            })
        }
    }
}

/// Project an attachment, computing its mandatory `sha2` digest from the
/// display text
pub fn generate_attachment(spec: AttachmentSpec) -> types::XapiAttachment {
    let sha2 = BASE64.encode(Sha256::digest(spec.display.as_bytes()));
    types::XapiAttachment {
        usage_type: spec.usage_type,
        display: spec.display.into(),
        description: spec.description.map(LanguageMap::from),
        content_type: spec.content_type,
        length: spec.length,
        file_url: spec.file_url,
        sha2,
    }
}
