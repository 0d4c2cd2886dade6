//! Value types shared by every statement-generation call

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The system producing learning activity events.
///
/// Immutable for the lifetime of a configuration. The URL doubles as the
/// namespace seed for deterministic statement ids and as the id of the
/// "software application" / EdApp actor in emitted statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// The name of the platform generating learning activities
    pub name: String,
    /// The description of the platform generating learning activities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The URL of the platform generating learning activities
    pub url: String,
}

impl Platform {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            url: url.into(),
        }
    }
}

/// The user performing the action described by a learning activity.
///
/// An actor must be identifiable by exactly one of `id` + `id_source` or
/// `email`. An `id_source` of the literal value `openid` selects OpenID
/// encoding; any other `id_source` must be a dereferenceable URI and selects
/// an account-on-a-system encoding. The validator enforces this before any
/// projector runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique id of the user, a URI on the system named by `id_source`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The canonical home page for the system the user's account is on,
    /// or the literal `openid`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_source: Option<String>,
    /// The display name of the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The email address of the user. May be an SHA1 sum of the address in
    /// case it needs to be hashed before use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The date at which the user was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
    /// The date at which the user was last updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,
}

impl Actor {
    /// Actor identified by an account on a system
    pub fn account(id: impl Into<String>, id_source: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            id_source: Some(id_source.into()),
            ..Self::default()
        }
    }

    /// Actor identified by an email address
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Stable key identifying this user, used as an id-derivation seed for
    /// per-user events (enroll, read, download, ...).
    ///
    /// `id_source:id` for account actors, `mbox:mailto:email` for actors
    /// identified by email. `None` when the actor carries neither, which the
    /// validator rejects before any seed is built.
    pub fn user_key(&self) -> Option<String> {
        match (&self.id, &self.id_source, &self.email) {
            (Some(id), Some(source), _) => Some(format!("{}:{}", source, id)),
            (_, _, Some(email)) => Some(format!("mbox:mailto:{}", email)),
            _ => None,
        }
    }
}

/// The time at which a learning activity took place.
///
/// Callers may pass epoch milliseconds, a date string, or an already parsed
/// `DateTime`. The raw form is kept: it participates verbatim in id
/// derivation for view-type events, so normalizing it would change ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// A date string (RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`)
    Text(String),
    /// An already parsed instant
    DateTime(DateTime<Utc>),
}

impl Timestamp {
    /// The raw form used as an id-derivation seed value.
    pub fn seed_string(&self) -> String {
        match self {
            Timestamp::Millis(ms) => ms.to_string(),
            Timestamp::Text(s) => s.clone(),
            Timestamp::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Normalize to an ISO 8601 string (UTC, millisecond precision).
    ///
    /// Returns `None` for unparseable input; statement generation carries
    /// the `None` through as a null timestamp rather than failing.
    pub fn to_iso8601(&self) -> Option<String> {
        let instant = match self {
            Timestamp::Millis(ms) => Utc.timestamp_millis_opt(*ms).single()?,
            Timestamp::Text(s) => parse_datetime_text(s)?,
            Timestamp::DateTime(dt) => *dt,
        };
        Some(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::DateTime(dt)
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Timestamp::Text(s.to_string())
    }
}

fn parse_datetime_text(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Normalize a metadata value holding a date to ISO 8601.
///
/// Accepts strings (parsed like [`Timestamp::Text`]) and numbers (epoch
/// milliseconds). Anything else yields `None`.
pub fn iso8601_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Timestamp::Text(s.clone()).to_iso8601(),
        Value::Number(n) => Timestamp::Millis(n.as_i64()?).to_iso8601(),
        _ => None,
    }
}

/// Per-event metadata: a mapping of field name to value.
///
/// The set of meaningful fields is defined per event kind by its validation
/// rules. Falsy values (null, false, 0, empty string) are treated as "not
/// provided": they are stripped before validation and invisible to the typed
/// accessors, so optional fields are truly optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(serde_json::Map<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// The value for a field, with falsy values stripped
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !is_falsy(v))
    }

    /// String field accessor
    pub fn str(&self, field: &str) -> Option<&str> {
        self.value(field).and_then(Value::as_str)
    }

    /// Numeric field accessor
    pub fn number(&self, field: &str) -> Option<f64> {
        self.value(field).and_then(Value::as_f64)
    }

    /// Array field accessor
    pub fn array(&self, field: &str) -> Option<&Vec<Value>> {
        self.value(field).and_then(Value::as_array)
    }

    /// Date field accessor, normalized to ISO 8601
    pub fn date(&self, field: &str) -> Option<String> {
        self.value(field).and_then(iso8601_from_value)
    }

    /// Agent field accessor (e.g. the grader of a submission)
    pub fn agent(&self, field: &str) -> Option<Actor> {
        self.value(field)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    /// Iterate over fields, skipping falsy values
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter(|(_, v)| !is_falsy(v))
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// Whether a value counts as "not provided"
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// A parent or grouping activity an event took place in (e.g. the course a
/// discussion belongs to).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityContext {
    /// The URL of the context
    pub id: String,
    /// The name of the context (e.g. course name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The description of the context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The caller-facing unit: one learning activity, ready to be projected
/// into an xAPI or Caliper statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningEvent {
    /// The time at which the learning activity took place
    pub timestamp: Timestamp,
    /// The user performing the action
    pub actor: Actor,
    /// Event-kind-specific fields
    #[serde(default)]
    pub metadata: Metadata,
    /// The context in which the activity took place, when one applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ActivityContext>,
}

impl LearningEvent {
    pub fn new(timestamp: impl Into<Timestamp>, actor: Actor) -> Self {
        Self {
            timestamp: timestamp.into(),
            actor,
            metadata: Metadata::new(),
            context: None,
        }
    }

    /// Builder-style metadata insert
    pub fn with_metadata(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(field, value);
        self
    }

    /// Builder-style context
    pub fn with_context(mut self, context: ActivityContext) -> Self {
        self.context = Some(context);
        self
    }
}
