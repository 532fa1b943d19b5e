//! RIASEC Core - Survey Data Types and Pure Logic
//!
//! The trait taxonomy, answer/selection state, respondent records,
//! survey configuration, scoring engine, and submission validator.
//! This crate performs no I/O: everything here is safe to re-run on
//! every input mutation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod answers;
pub mod config;
pub mod error;
pub mod respondent;
pub mod scoring;
pub mod taxonomy;
pub mod validate;

pub use answers::{Answer, AnswerSet, CompleteAnswers, SelectionSet};
pub use config::{SurveyConfig, CONSENT_FLAGS_THREE, CONSENT_FLAG_SINGLE, STANDARD_COURSES};
pub use error::{ConfigError, InputError, StoreError, SurveyError, SurveyResult};
pub use respondent::{ConsentRecord, Identity, Submission};
pub use scoring::{score, score_items, ScoreReport, ScoreRow};
pub use taxonomy::{
    question, questions_for, Question, TraitCode, ITEMS_PER_TRAIT, QUESTIONS, QUESTION_COUNT,
    TRAIT_COUNT,
};
pub use validate::{evaluate, Diagnostic, ValidationReport};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Submission identifier using UUIDv7 for timestamp-sortable IDs.
pub type SubmissionId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 submission id (timestamp-sortable).
pub fn new_submission_id() -> SubmissionId {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_ids_are_unique() {
        let a = new_submission_id();
        let b = new_submission_id();
        assert_ne!(a, b);
    }
}
