//! Persistence writer
//!
//! Sequences the ordered append of one submission row, 42 answer rows,
//! one scores row, and one choices row. The sequence is strictly
//! ordered but NOT transactional: a failure halts at its stage, later
//! stages are never attempted, and earlier stages are never rolled
//! back. A choices-stage failure therefore leaves an orphaned
//! submission; callers are told exactly which stage failed and decide
//! what to surface.
//!
//! There is no idempotency: re-invoking with the same submission
//! appends duplicate rows under the same submission id.

use crate::schema::{expected_header, Table};
use crate::SheetStore;
use riasec_core::{StoreError, Submission, SurveyConfig, TraitCode};
use std::fmt;
use thiserror::Error;

// ============================================================================
// STAGES AND FAILURES
// ============================================================================

/// One stage of the write sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStage {
    /// Header comparison and repair across all four tables.
    Schema,
    /// The single submissions row.
    Submissions,
    /// The 42 per-question answer rows.
    Answers,
    /// The single scores row.
    Scores,
    /// The single choices row.
    Choices,
}

impl WriteStage {
    pub fn name(&self) -> &'static str {
        match self {
            WriteStage::Schema => "schema",
            WriteStage::Submissions => "submissions",
            WriteStage::Answers => "answers",
            WriteStage::Scores => "scores",
            WriteStage::Choices => "choices",
        }
    }
}

impl fmt::Display for WriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A write-sequence failure: which stage, and the store's own error text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Write failed at the {stage} stage: {error}")]
pub struct WriteFailure {
    pub stage: WriteStage,
    #[source]
    pub error: StoreError,
}

// ============================================================================
// SCHEMA REPAIR
// ============================================================================

/// Compare each table's header against the expected set and replace it
/// on mismatch. Data rows are never touched. Destructive toward stray
/// headers but idempotent; runs before every write batch.
pub fn ensure_schema(store: &dyn SheetStore, config: &SurveyConfig) -> Result<(), StoreError> {
    for table in Table::ALL {
        let expected = expected_header(table, config);
        let actual = store.read_header(table)?;
        if actual != expected {
            if !actual.is_empty() {
                tracing::warn!(
                    table = %table,
                    found = actual.len(),
                    expected = expected.len(),
                    "header mismatch, replacing header row"
                );
            }
            store.write_header(table, &expected)?;
        }
    }
    Ok(())
}

// ============================================================================
// WRITE SEQUENCE
// ============================================================================

/// Append one fully-validated submission to the store.
///
/// Stage order: schema repair, submissions, answers, scores, choices.
/// Returns on the first failing stage; nothing written before it is
/// rolled back.
pub fn persist_submission(
    store: &dyn SheetStore,
    submission: &Submission,
    config: &SurveyConfig,
) -> Result<(), WriteFailure> {
    let fail = |stage: WriteStage| {
        move |error: StoreError| {
            tracing::warn!(stage = %stage, error = %error, "write sequence halted");
            WriteFailure { stage, error }
        }
    };

    ensure_schema(store, config).map_err(fail(WriteStage::Schema))?;

    store
        .append_row(Table::Submissions, submission_row(submission))
        .map_err(fail(WriteStage::Submissions))?;
    store
        .append_rows(Table::Answers, answer_rows(submission))
        .map_err(fail(WriteStage::Answers))?;
    store
        .append_row(Table::Scores, scores_row(submission))
        .map_err(fail(WriteStage::Scores))?;
    store
        .append_row(Table::Choices, choices_row(submission))
        .map_err(fail(WriteStage::Choices))?;

    tracing::info!(
        submission_id = %submission.submission_id,
        answers = submission.answers.iter().count(),
        "submission persisted across all four tables"
    );
    Ok(())
}

// ============================================================================
// ROW BUILDERS
// ============================================================================

fn submission_row(submission: &Submission) -> Vec<String> {
    let mut row = vec![
        submission.submission_id.to_string(),
        submission.identity.name.trim().to_string(),
        submission.identity.degree.trim().to_string(),
        submission
            .identity
            .email_trimmed()
            .unwrap_or_default()
            .to_string(),
        submission.timestamp.to_rfc3339(),
    ];
    row.extend(
        submission
            .consent
            .granted_flags()
            .iter()
            .map(|g| g.to_string()),
    );
    row.push(
        submission
            .consent
            .stamped_at()
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
    );
    row
}

fn answer_rows(submission: &Submission) -> Vec<Vec<String>> {
    let id = submission.submission_id.to_string();
    submission
        .answers
        .iter()
        .map(|(question, yes)| {
            vec![
                id.clone(),
                question.id.to_string(),
                question.trait_code.letter().to_string(),
                if yes { "1" } else { "0" }.to_string(),
            ]
        })
        .collect()
}

fn scores_row(submission: &Submission) -> Vec<String> {
    let mut row = vec![submission.submission_id.to_string()];
    // Percent values go out as text with exactly one fractional digit.
    row.extend(
        TraitCode::ALL
            .iter()
            .map(|t| format!("{:.1}", submission.scores.percent(*t))),
    );
    row
}

fn choices_row(submission: &Submission) -> Vec<String> {
    let mut row = vec![submission.submission_id.to_string()];
    row.extend(
        submission
            .selections
            .flags()
            .iter()
            .map(|selected| if *selected { "1" } else { "0" }.to_string()),
    );
    row
}

// =============================================================================
// TESTS
// =============================================================================
