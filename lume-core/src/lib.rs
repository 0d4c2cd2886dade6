//! lume-core: Statement-generation engine for learning analytics
//!
//! This crate turns application-level learning events (a user creating a
//! course, submitting an assignment, posting to a discussion, uploading a
//! file) into standardized learning-analytics statements in one of two
//! interoperability formats, xAPI or Caliper:
//!
//! - **Validation** - [`validate`] checks heterogeneous per-event metadata
//!   against declarative per-verb rules, fail-fast with a 400-class error
//! - **Deterministic identity** - [`id::derive_statement_id`] derives
//!   stable statement ids so related events can reference each other
//!   without shared storage
//! - **Projection** - [`xapi`] and [`caliper`] project one internal event
//!   into the two structurally different wire formats
//! - **Delivery** - [`lrs::LrsClient`] optionally POSTs finished xAPI
//!   statements to configured Learning Record Stores
//!
//! # Quick Start
//!
//! ```no_run
//! use lume_core::{statements, Actor, LearningEvent, Platform, StatementConfig};
//!
//! async fn example() -> Result<(), lume_core::StatementError> {
//!     let config = StatementConfig::new(Platform::new(
//!         "Example LMS",
//!         "https://lms.example.edu",
//!     ));
//!     let event = LearningEvent::new("2018-03-14T10:00:00Z", Actor::email("s@example.edu"))
//!         .with_metadata("id", "https://lms.example.edu/courses/1")
//!         .with_metadata("name", "Introduction to Everything");
//!
//!     let outcome = statements::course::create(&config, &event).await?;
//!     println!("{}", serde_json::to_string_pretty(&outcome.statement).unwrap());
//!     Ok(())
//! }
//! ```
//!
//! Statement generation is pure and synchronous; only the optional LRS
//! delivery at the end of a call performs I/O. Configuration and catalogs
//! are read-only, so any number of calls may run concurrently.

pub mod caliper;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod id;
pub mod lrs;
pub mod statements;
pub mod validate;
pub mod xapi;

// Re-export key types for convenience
pub use config::{LrsConfig, StatementConfig, StatementType};
pub use dispatch::{Statement, StatementOutcome};
pub use error::{DeliveryError, StatementError};
pub use validate::{validate, FieldKind, FieldRule, FieldRules};

// Re-export the data model so callers need only one dependency
pub use lume_models::{
    activity_types, verbs, ActivityContext, Actor, LearningEvent, Metadata, Platform, Timestamp,
};
