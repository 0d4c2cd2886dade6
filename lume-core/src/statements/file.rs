//! File events: uploading, previewing, downloading

use serde_json::Value;

use lume_models::{activity_types, verbs, LearningEvent};

use crate::caliper::{entity_type, event_type, CaliperEntity, CaliperOptions};
use crate::config::StatementConfig;
use crate::dispatch::{self, StatementOptions, StatementOutcome};
use crate::error::StatementError;
use crate::id::derive_statement_id;
use crate::statements::required;
use crate::validate::{validate, FieldKind, FieldRule, FieldRules};
use crate::xapi::{ActivitySpec, AttachmentSpec, ObjectSpec, XapiOptions};

const UPLOAD_RULES: FieldRules = &[
    ("id", FieldRule::required(FieldKind::Uri)),
    ("title", FieldRule::required(FieldKind::Str)),
    ("description", FieldRule::optional(FieldKind::Str)),
    ("url", FieldRule::optional(FieldKind::Uri)),
    ("size", FieldRule::optional(FieldKind::Number)),
    ("mime_type", FieldRule::optional(FieldKind::Str)),
];

/// A user uploading a new file.
///
/// Metadata: `id` (file URL), `title`, optional `description`, optional
/// download `url`, optional `size` in bytes, optional `mime_type`. Id
/// seed: `[file id]`. The file metadata is also carried as an xAPI
/// attachment.
pub async fn upload(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, UPLOAD_RULES)?;

    let metadata = &event.metadata;
    let id = required(metadata.str("id"), "id")?;
    let title = required(metadata.str("title"), "title")?;
    let object = ActivitySpec::new(id)
        .activity_type(&activity_types::FILE)
        .name(Some(title))
        .description(metadata.str("description"));

    let mut xapi = XapiOptions::new(vec![id.to_string()], ObjectSpec::Activity(object));
    xapi.attachment = Some(AttachmentSpec {
        usage_type: activity_types::FILE.id.to_string(),
        display: title.to_string(),
        description: None,
        content_type: metadata.str("mime_type").map(str::to_string),
        length: metadata.value("size").and_then(Value::as_number).cloned(),
        file_url: metadata.str("url").map(str::to_string),
    });

    let caliper_object = CaliperEntity::builder()
        .entity_type(entity_type::DIGITAL_RESOURCE)
        .id(id)
        .property("name", Some(title))
        .property("description", metadata.str("description"))
        .build();

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::CREATED,
            xapi,
            caliper: Some(CaliperOptions::new(caliper_object)),
        },
    )
    .await
}

const PREVIEW_RULES: FieldRules = &[("file", FieldRule::required(FieldKind::Uri))];

/// A user previewing a file.
///
/// Metadata: `file` (URL of the file previewed). Id seed:
/// `[timestamp, file, user key]`.
pub async fn preview(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, PREVIEW_RULES)?;

    let file = required(event.metadata.str("file"), "file")?;
    let user_key = required(event.actor.user_key(), "actor")?;
    let file_ref = derive_statement_id(&config.platform, &verbs::CREATED, &[file]);

    let caliper_object = CaliperEntity::builder()
        .entity_type(entity_type::DIGITAL_RESOURCE)
        .id(file)
        .build();

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::PREVIEWED,
            xapi: XapiOptions::new(
                vec![event.timestamp.seed_string(), file.to_string(), user_key],
                ObjectSpec::from(file_ref),
            ),
            caliper: Some(CaliperOptions::new(caliper_object).event_type(event_type::VIEW)),
        },
    )
    .await
}

const DOWNLOAD_RULES: FieldRules = &[("file", FieldRule::required(FieldKind::Uri))];

/// A user downloading a file.
///
/// Metadata: `file` (URL of the file downloaded). Id seed:
/// `[timestamp, file, user key]`.
pub async fn download(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, DOWNLOAD_RULES)?;

    let file = required(event.metadata.str("file"), "file")?;
    let user_key = required(event.actor.user_key(), "actor")?;
    let file_ref = derive_statement_id(&config.platform, &verbs::CREATED, &[file]);

    let caliper_object = CaliperEntity::builder()
        .entity_type(entity_type::DIGITAL_RESOURCE)
        .id(file)
        .build();

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::VIEWED,
            xapi: XapiOptions::new(
                vec![event.timestamp.seed_string(), file.to_string(), user_key],
                ObjectSpec::from(file_ref),
            ),
            caliper: Some(CaliperOptions::new(caliper_object).event_type(event_type::VIEW)),
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use lume_models::{Actor, Platform};

    fn config() -> StatementConfig {
        StatementConfig::new(Platform::new("Example LMS", "https://lms.example.edu"))
    }

    fn event() -> LearningEvent {
        LearningEvent::new("2018-03-14T10:00:00Z", Actor::email("s@example.edu"))
    }

    #[tokio::test]
    async fn upload_carries_an_attachment_with_computed_sha2() {
        let event = event()
            .with_metadata("id", "https://lms.example.edu/files/1")
            .with_metadata("title", "Syllabus.pdf")
            .with_metadata("mime_type", "application/pdf")
            .with_metadata("size", 128_000)
            .with_metadata("url", "https://lms.example.edu/files/1/download");
        let outcome = upload(&config(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_xapi().unwrap()).unwrap();
        let attachment = &value["attachments"][0];
        assert_eq!(attachment["usageType"], activity_types::FILE.id);
        assert_eq!(attachment["display"]["en-US"], "Syllabus.pdf");
        assert_eq!(attachment["contentType"], "application/pdf");
        assert_eq!(attachment["length"], 128_000);
        assert_eq!(attachment["fileUrl"], "https://lms.example.edu/files/1/download");
        assert_eq!(attachment["sha2"], "e8W9bgepdLe7HrTUfT8HaDdxXKVPUU7FhtawgJ+frak=");
    }

    #[tokio::test]
    async fn upload_keeps_a_non_integer_size_verbatim() {
        let event = event()
            .with_metadata("id", "https://lms.example.edu/files/1")
            .with_metadata("title", "Syllabus.pdf")
            .with_metadata("size", 1536.5);
        let outcome = upload(&config(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_xapi().unwrap()).unwrap();
        assert_eq!(value["attachments"][0]["length"], 1536.5);
    }

    #[tokio::test]
    async fn upload_caliper_object_is_a_digital_resource() {
        let event = event()
            .with_metadata("id", "https://lms.example.edu/files/1")
            .with_metadata("title", "Syllabus.pdf");
        let outcome = upload(&config().caliper(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_caliper().unwrap()).unwrap();
        assert_eq!(value["object"]["@type"], entity_type::DIGITAL_RESOURCE);
        assert_eq!(value["object"]["name"], "Syllabus.pdf");
    }

    #[tokio::test]
    async fn preview_is_a_caliper_view_event() {
        let event = event().with_metadata("file", "https://lms.example.edu/files/1");
        let outcome = preview(&config().caliper(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_caliper().unwrap()).unwrap();
        assert_eq!(value["@type"], event_type::VIEW);
        assert_eq!(value["object"]["@id"], "https://lms.example.edu/files/1");
    }

    #[tokio::test]
    async fn download_references_the_upload_statement() {
        let event = event().with_metadata("file", "https://lms.example.edu/files/1");
        let outcome = download(&config(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_xapi().unwrap()).unwrap();
        let expected = derive_statement_id(
            &config().platform,
            &verbs::CREATED,
            &["https://lms.example.edu/files/1"],
        );
        assert_eq!(value["object"]["id"], expected.to_string());
        assert_eq!(value["verb"]["id"], verbs::VIEWED.xapi.id);
    }

    #[tokio::test]
    async fn preview_and_download_of_the_same_file_get_distinct_ids() {
        let event = event().with_metadata("file", "https://lms.example.edu/files/1");
        let a = preview(&config(), &event).await.unwrap();
        let b = download(&config(), &event).await.unwrap();
        assert_ne!(
            a.statement.as_xapi().unwrap().id,
            b.statement.as_xapi().unwrap().id
        );
    }
}
