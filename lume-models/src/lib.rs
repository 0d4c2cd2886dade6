//! lume-models: Data model and reference catalogs for lume
//!
//! This crate carries the caller-facing value types and the immutable
//! reference data used when generating learning activity statements:
//!
//! - **Value types** - [`Platform`], [`Actor`], [`Timestamp`], [`Metadata`]
//!   and [`LearningEvent`], the uniform event description callers build
//! - **Verb catalog** - [`verbs`], mapping verb names to their canonical
//!   xAPI and (where defined) Caliper identifiers
//! - **Activity type catalog** - [`activity_types`], tags classifying the
//!   kind of object a statement is about
//!
//! Everything here is plain data: no I/O, no shared mutable state. The
//! catalogs are `const` tables safe to share across any number of
//! concurrent statement-generation calls.

pub mod activity_types;
pub mod types;
pub mod verbs;

// Re-export key types for convenience
pub use activity_types::ActivityTypeDef;
pub use types::{ActivityContext, Actor, LearningEvent, Metadata, Platform, Timestamp};
pub use verbs::{VerbDef, VerbFormat};
