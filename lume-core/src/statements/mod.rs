//! Per-event-kind statement generation operations
//!
//! Each operation validates its input against a declarative rule table,
//! derives the statement id (and any cross-referenced ids), shapes the
//! format-specific hints and hands off to the dispatcher. The id seed
//! order of every operation is documented on it and must never change:
//! related events rederive each other's ids from these seeds.

pub mod assignment;
pub mod course;
pub mod discussion;
pub mod file;
pub mod session;

use crate::error::StatementError;

/// Unwrap a field the validator has already guaranteed.
///
/// Kept as a guard rather than a panic so a rule-table/extraction mismatch
/// surfaces as a 400 instead of crashing the caller.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, StatementError> {
    value.ok_or_else(|| StatementError::validation(format!("\"{}\" is required", field)))
}
