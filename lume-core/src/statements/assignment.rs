//! Assignment events: creation, viewing, submission, grading, feedback

use serde_json::Value;

use lume_models::{activity_types, verbs, LearningEvent};

use crate::config::StatementConfig;
use crate::dispatch::{self, StatementOptions, StatementOutcome};
use crate::error::StatementError;
use crate::id::derive_statement_id;
use crate::statements::required;
use crate::validate::{validate, FieldKind, FieldRule, FieldRules};
use crate::xapi::{ActivitySpec, ObjectSpec, XapiOptions, XapiResult, XapiScore};

const SUBMISSION_TYPES: &str =
    "https://canvas.instructure.com/xapi/assignments/submissions_types";

const CREATE_RULES: FieldRules = &[
    ("id", FieldRule::required(FieldKind::Uri)),
    ("title", FieldRule::required(FieldKind::Str)),
    ("description", FieldRule::optional(FieldKind::Str)),
    ("submission_types", FieldRule::optional(FieldKind::Array)),
];

/// A user creating a new assignment.
///
/// Metadata: `id` (assignment URL), `title`, optional `description`,
/// optional `submission_types`. Id seed: `[assignment id]`.
pub async fn create(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, CREATE_RULES)?;

    let metadata = &event.metadata;
    let id = required(metadata.str("id"), "id")?;
    let object = ActivitySpec::new(id)
        .activity_type(&activity_types::ASSESSMENT)
        .name(metadata.str("title"))
        .description(metadata.str("description"))
        .extension(
            SUBMISSION_TYPES,
            metadata.array("submission_types").map(|v| Value::Array(v.clone())),
        );

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

const VIEW_RULES: FieldRules = &[("assignment", FieldRule::required(FieldKind::Uri))];

/// A user viewing an assignment.
///
/// Metadata: `assignment` (URL of the assignment viewed). Id seed:
/// `[timestamp, assignment]` so repeated views at different times get
/// distinct statements.
pub async fn view(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, VIEW_RULES)?;

    let assignment = required(event.metadata.str("assignment"), "assignment")?;
    let assignment_ref = derive_statement_id(&config.platform, &verbs::CREATED, &[assignment]);

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::VIEWED,
            xapi: XapiOptions::new(
                vec![event.timestamp.seed_string(), assignment.to_string()],
                ObjectSpec::from(assignment_ref),
            ),
            caliper: None,
        },
    )
    .await
}

const SUBMIT_RULES: FieldRules = &[
    ("id", FieldRule::required(FieldKind::Uri)),
    ("assignment", FieldRule::required(FieldKind::Uri)),
    ("submission", FieldRule::optional(FieldKind::Str)),
];

/// A user submitting an assignment submission.
///
/// Metadata: `id` (submission URL), `assignment` (URL of the assignment),
/// optional `submission` content. Id seed: `[submission id]`.
pub async fn submit(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, SUBMIT_RULES)?;

    let metadata = &event.metadata;
    let id = required(metadata.str("id"), "id")?;
    let assignment = required(metadata.str("assignment"), "assignment")?;
    let assignment_ref = derive_statement_id(&config.platform, &verbs::CREATED, &[assignment]);

    let mut xapi = XapiOptions::new(vec![id.to_string()], ObjectSpec::from(assignment_ref));
    xapi.result = Some(XapiResult {
        completion: Some(true),
        response: metadata.str("submission").map(str::to_string),
        ..XapiResult::default()
    });

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::SUBMITTED,
            xapi,
            caliper: None,
        },
    )
    .await
}

const RECEIVE_GRADE_RULES: FieldRules = &[
    ("id", FieldRule::required(FieldKind::Uri)),
    ("assignment", FieldRule::required(FieldKind::Uri)),
    ("grade", FieldRule::required(FieldKind::Number)),
    ("grader", FieldRule::optional(FieldKind::Agent)),
    ("grade_min", FieldRule::optional(FieldKind::Number)),
    ("grade_max", FieldRule::optional(FieldKind::Number)),
];

/// A user receiving a grade for an assignment submission.
///
/// Metadata: `id` (submission URL), `assignment`, `grade`, optional
/// `grader` agent, optional `grade_min`/`grade_max`. Id seed:
/// `[submission id]`. The score is scaled only when `grade_max` is known.
pub async fn receive_grade(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, RECEIVE_GRADE_RULES)?;

    let metadata = &event.metadata;
    let id = required(metadata.str("id"), "id")?;
    let grade = required(metadata.number("grade"), "grade")?;
    let grade_max = metadata.number("grade_max");
    let submission_ref = derive_statement_id(&config.platform, &verbs::SUBMITTED, &[id]);

    let mut xapi = XapiOptions::new(vec![id.to_string()], ObjectSpec::from(submission_ref));
    xapi.result = Some(XapiResult {
        score: Some(XapiScore {
            raw: grade,
            min: metadata.number("grade_min"),
            max: grade_max,
            scaled: grade_max.map(|max| grade / max),
        }),
        ..XapiResult::default()
    });
    xapi.instructor = metadata.agent("grader");

    dispatch::process(
        config,
        event,
        StatementOptions {
            verb: &verbs::SCORED,
            xapi,
            caliper: None,
        },
    )
    .await
}

const FEEDBACK_RULES: FieldRules = &[
    ("id", FieldRule::required(FieldKind::Uri)),
    ("submission", FieldRule::required(FieldKind::Uri)),
    ("feedback", FieldRule::required(FieldKind::Str)),
];

/// A user receiving feedback on an assignment submission.
///
/// Metadata: `id` (feedback URL), `submission` (URL of the submission the
/// feedback is on), `feedback` text. Id seed: `[feedback id]`.
pub async fn feedback(
    config: &StatementConfig,
    event: &LearningEvent,
) -> Result<StatementOutcome, StatementError> {
    validate(config, event, FEEDBACK_RULES)?;

    let metadata = &event.metadata;
    let id = required(metadata.str("id"), "id")?;
    let submission = required(metadata.str("submission"), "submission")?;
    let feedback_text = required(metadata.str("feedback"), "feedback")?;
    let submission_ref = derive_statement_id(&config.platform, &verbs::SUBMITTED, &[submission]);

    let mut xapi = XapiOptions::new(vec![id.to_string()], ObjectSpec::from(submission_ref));
    xapi.result = Some(XapiResult {
        response: Some(feedback_text.to_string()),
        ..XapiResult::default()
    });

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

#[cfg(test)]
mod tests {
    use super::*;
    use lume_models::{Actor, Platform};
    use serde_json::json;

    fn config() -> StatementConfig {
        StatementConfig::new(Platform::new("Example LMS", "https://lms.example.edu"))
    }

    fn event() -> LearningEvent {
        LearningEvent::new("2018-03-14T10:00:00Z", Actor::email("s@example.edu"))
    }

    #[tokio::test]
    async fn create_carries_submission_types_extension() {
        let event = event()
            .with_metadata("id", "https://lms.example.edu/assignments/1")
            .with_metadata("title", "Problem set 1")
            .with_metadata("submission_types", json!(["online_text_entry", "online_upload"]));
        let outcome = create(&config(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_xapi().unwrap()).unwrap();
        assert_eq!(
            value["object"]["definition"]["extensions"][SUBMISSION_TYPES],
            json!(["online_text_entry", "online_upload"])
        );
        assert_eq!(
            value["object"]["definition"]["type"],
            activity_types::ASSESSMENT.id
        );
    }

    #[tokio::test]
    async fn view_id_depends_on_the_timestamp() {
        let assignment = "https://lms.example.edu/assignments/1";
        let a = view(&config(), &event().with_metadata("assignment", assignment))
            .await
            .unwrap();
        let b = view(&config(), &event().with_metadata("assignment", assignment))
            .await
            .unwrap();
        let mut later = event().with_metadata("assignment", assignment);
        later.timestamp = "2018-03-14T11:00:00Z".into();
        let c = view(&config(), &later).await.unwrap();

        let id = |outcome: &StatementOutcome| outcome.statement.as_xapi().unwrap().id;
        assert_eq!(id(&a), id(&b));
        assert_ne!(id(&a), id(&c));
    }

    #[tokio::test]
    async fn submit_references_the_assignment_creation_statement() {
        let event = event()
            .with_metadata("id", "https://lms.example.edu/submissions/1")
            .with_metadata("assignment", "https://lms.example.edu/assignments/1")
            .with_metadata("submission", "My answer");
        let outcome = submit(&config(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_xapi().unwrap()).unwrap();
        let expected = derive_statement_id(
            &config().platform,
            &verbs::CREATED,
            &["https://lms.example.edu/assignments/1"],
        );
        assert_eq!(value["object"]["objectType"], "StatementRef");
        assert_eq!(value["object"]["id"], expected.to_string());
        assert_eq!(value["result"]["completion"], true);
        assert_eq!(value["result"]["response"], "My answer");
    }

    #[tokio::test]
    async fn receive_grade_scales_against_grade_max() {
        let event = event()
            .with_metadata("id", "https://lms.example.edu/submissions/1")
            .with_metadata("assignment", "https://lms.example.edu/assignments/1")
            .with_metadata("grade", 85)
            .with_metadata("grade_max", 100);
        let outcome = receive_grade(&config(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_xapi().unwrap()).unwrap();
        assert_eq!(value["result"]["score"]["raw"], 85.0);
        assert_eq!(value["result"]["score"]["scaled"], 0.85);
    }

    #[tokio::test]
    async fn receive_grade_without_grade_max_has_no_scaled_score() {
        let event = event()
            .with_metadata("id", "https://lms.example.edu/submissions/1")
            .with_metadata("assignment", "https://lms.example.edu/assignments/1")
            .with_metadata("grade", 85);
        let outcome = receive_grade(&config(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_xapi().unwrap()).unwrap();
        assert!(value["result"]["score"].get("scaled").is_none());
        assert!(value["result"]["score"].get("max").is_none());
    }

    #[tokio::test]
    async fn receive_grade_encodes_the_grader_as_instructor() {
        let event = event()
            .with_metadata("id", "https://lms.example.edu/submissions/1")
            .with_metadata("assignment", "https://lms.example.edu/assignments/1")
            .with_metadata("grade", 85)
            .with_metadata("grader", json!({"email": "t@example.edu", "name": "Teacher"}));
        let outcome = receive_grade(&config(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_xapi().unwrap()).unwrap();
        assert_eq!(value["context"]["instructor"]["mbox"], "mailto:t@example.edu");
    }

    #[tokio::test]
    async fn feedback_references_the_submission_statement() {
        let event = event()
            .with_metadata("id", "https://lms.example.edu/feedback/1")
            .with_metadata("submission", "https://lms.example.edu/submissions/1")
            .with_metadata("feedback", "Good work");
        let outcome = feedback(&config(), &event).await.unwrap();
        let value = serde_json::to_value(outcome.statement.as_xapi().unwrap()).unwrap();
        let expected = derive_statement_id(
            &config().platform,
            &verbs::SUBMITTED,
            &["https://lms.example.edu/submissions/1"],
        );
        assert_eq!(value["object"]["id"], expected.to_string());
        assert_eq!(value["result"]["response"], "Good work");
    }
}
