//! Input validation for statement generation
//!
//! Each event kind declares its metadata contract as a table of
//! [`FieldRule`]s; on top of that, every call checks the same platform,
//! timestamp and actor requirements. Validation is fail-fast: the first
//! violation is returned as a 400-class [`StatementError`] and generation
//! stops before any projector runs.

use serde_json::Value;
use tracing::warn;
use url::Url;

use lume_models::types::iso8601_from_value;
use lume_models::{Actor, LearningEvent};

use crate::config::StatementConfig;
use crate::error::StatementError;

/// The validator type to run on a metadata field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Number,
    Date,
    Uri,
    Array,
    Agent,
}

/// One entry of an event kind's metadata contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            required: true,
        }
    }

    pub const fn optional(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }
}

/// The metadata contract of one event kind
pub type FieldRules = &'static [(&'static str, FieldRule)];

/// Validate the input of a statement-generation call.
///
/// Falsy metadata values have no bearing here: [`LearningEvent`] metadata
/// accessors already treat them as "not provided", so a required field set
/// to `""` or `0` fails the required check exactly like an absent one.
///
/// The rule table is closed: a metadata field it does not name is rejected,
/// never silently dropped.
pub fn validate(
    config: &StatementConfig,
    event: &LearningEvent,
    rules: FieldRules,
) -> Result<(), StatementError> {
    if config.platform.name.is_empty() {
        return Err(fail("\"platform.name\" is not allowed to be empty"));
    }
    if Url::parse(&config.platform.url).is_err() {
        return Err(fail("\"platform.url\" must be a valid uri"));
    }

    if event.timestamp.to_iso8601().is_none() {
        return Err(fail("\"timestamp\" must be a valid date"));
    }

    validate_agent(&event.actor, "actor")?;

    for (field, rule) in rules {
        match event.metadata.value(field) {
            None if rule.required => {
                return Err(fail(format!("\"{}\" is required", field)));
            }
            None => {}
            Some(value) => check_field(field, rule.kind, value)?,
        }
    }

    for (field, _) in event.metadata.iter() {
        if !rules.iter().any(|(name, _)| *name == field) {
            return Err(fail(format!("\"{}\" is not allowed", field)));
        }
    }

    Ok(())
}

/// Check the actor identity invariant: identifiable by exactly one of
/// (`id` + `id_source`) or `email`, never silently fall back.
pub fn validate_agent(actor: &Actor, scope: &str) -> Result<(), StatementError> {
    match (&actor.id, &actor.id_source) {
        (Some(id), Some(source)) => {
            if Url::parse(id).is_err() {
                return Err(fail(format!("\"{}.id\" must be a valid uri", scope)));
            }
            if source != "openid" && Url::parse(source).is_err() {
                return Err(fail(format!("\"{}.id_source\" must be a valid uri", scope)));
            }
        }
        (Some(_), None) => {
            return Err(fail(format!(
                "\"{}.id\" missing required peer \"{}.id_source\"",
                scope, scope
            )));
        }
        (None, _) => {
            if actor.email.is_none() {
                return Err(fail(format!(
                    "\"{}\" must contain at least one of [id, email]",
                    scope
                )));
            }
        }
    }

    if let Some(email) = &actor.email {
        if !is_email(email) {
            return Err(fail(format!("\"{}.email\" must be a valid email", scope)));
        }
    }

    Ok(())
}

fn check_field(field: &str, kind: FieldKind, value: &Value) -> Result<(), StatementError> {
    match kind {
        FieldKind::Str => {
            if !value.is_string() {
                return Err(fail(format!("\"{}\" must be a string", field)));
            }
        }
        FieldKind::Number => {
            if !value.is_number() {
                return Err(fail(format!("\"{}\" must be a number", field)));
            }
        }
        FieldKind::Date => {
            if iso8601_from_value(value).is_none() {
                return Err(fail(format!("\"{}\" must be a valid date", field)));
            }
        }
        FieldKind::Uri => {
            let valid = value.as_str().is_some_and(|s| Url::parse(s).is_ok());
            if !valid {
                return Err(fail(format!("\"{}\" must be a valid uri", field)));
            }
        }
        FieldKind::Array => {
            if !value.is_array() {
                return Err(fail(format!("\"{}\" must be an array", field)));
            }
        }
        FieldKind::Agent => {
            let actor: Actor = serde_json::from_value(value.clone())
                .map_err(|_| fail(format!("\"{}\" must be an agent", field)))?;
            validate_agent(&actor, field)?;
        }
    }
    Ok(())
}

fn fail(msg: impl Into<String>) -> StatementError {
    let msg = msg.into();
    warn!(error = %msg, "statement input rejected");
    StatementError::validation(msg)
}

fn is_email(s: &str) -> bool {
    s.split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}
