//! RIASEC Session - Respondent Session State and Submit Orchestration
//!
//! One value owns everything a respondent accumulates during a session:
//! answers, course selections, identity fields, and consent flags. The
//! caller mutates it through explicit methods and recomputes the full
//! derived state after every mutation - there is no ambient storage and
//! no incremental bookkeeping, so the logic stays independent of
//! whatever event-dispatch mechanism drives it.
//!
//! Submission is a single synchronous action: re-validate (the UI gate
//! may be stale or bypassed), stamp consent, generate the submission
//! id, score, persist, latch. Store failures leave the session open for
//! a manual retry; a retry re-runs the whole write sequence and may
//! duplicate rows for stages that already succeeded.

use chrono::Utc;
use riasec_core::{
    evaluate, new_submission_id, score, Answer, AnswerSet, ConsentRecord, Identity, ScoreReport,
    ScoreRow, SelectionSet, Submission, SubmissionId, SurveyConfig, SurveyResult, Timestamp,
    ValidationReport,
};
use riasec_storage::{persist_submission, SheetStore, WriteFailure};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Why a submit attempt was refused or failed.
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    /// The session already submitted successfully; duplicates are refused.
    #[error("This session was already submitted (id {id})")]
    AlreadySubmitted { id: SubmissionId },

    /// The server-side gate re-check failed; the report names every
    /// unmet condition.
    #[error("Submission blocked: {}", .report.messages().join("; "))]
    GateClosed { report: ValidationReport },

    /// The store write sequence halted; the failure names the stage.
    #[error(transparent)]
    Write(#[from] WriteFailure),
}

// ============================================================================
// DERIVED STATE
// ============================================================================

/// Everything the presentation layer displays, recomputed in full on
/// every input change.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedState {
    /// The five-condition gate and its diagnostics.
    pub report: ValidationReport,
    /// Questions answered so far, out of 42.
    pub answered_count: usize,
    /// Courses currently selected.
    pub selected_count: usize,
    /// Whether every consent flag is granted (gates showing the form).
    pub consent_complete: bool,
    /// Live scores, present only once every question is answered.
    pub score_preview: Option<ScoreReport>,
}

/// The data behind the respondent's shareable profile card. Rendering
/// (chart, image, fonts) happens elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub student_name: String,
    pub degree: String,
    pub scores: ScoreReport,
    /// The three highest-scoring rows, stable under ties.
    pub top_traits: Vec<ScoreRow>,
}

/// Returned on a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: SubmissionId,
    pub timestamp: Timestamp,
    pub profile: ProfileSummary,
}

// ============================================================================
// SESSION
// ============================================================================

/// One respondent's in-progress session.
#[derive(Debug, Clone)]
pub struct Session {
    config: SurveyConfig,
    identity: Identity,
    answers: AnswerSet,
    selections: SelectionSet,
    consent: ConsentRecord,
    submitted: Option<SubmissionId>,
}

impl Session {
    /// Start an empty session under a validated configuration.
    pub fn new(config: SurveyConfig) -> SurveyResult<Self> {
        config.validate()?;
        let selections = SelectionSet::new(config.course_catalog.len());
        let consent = ConsentRecord::new(config.consent_flags.len());
        Ok(Self {
            config,
            identity: Identity::default(),
            answers: AnswerSet::new(),
            selections,
            consent,
            submitted: None,
        })
    }

    pub fn config(&self) -> &SurveyConfig {
        &self.config
    }

    // === Identity ===

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.identity.name = name.into();
    }

    pub fn set_degree(&mut self, degree: impl Into<String>) {
        self.identity.degree = degree.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.identity.email = Some(email.into());
    }

    // === Answers ===

    /// Record one question's response.
    pub fn answer(&mut self, question_id: u8, answer: Answer) -> SurveyResult<()> {
        self.answers.set(question_id, answer)
    }

    // === Course selections ===

    /// Set one course's selection flag.
    pub fn set_course(&mut self, index: usize, selected: bool) -> SurveyResult<()> {
        self.selections.set(index, selected)
    }

    /// Flip one course's selection flag, returning the new state.
    pub fn toggle_course(&mut self, index: usize) -> SurveyResult<bool> {
        self.selections.toggle(index)
    }

    // === Consent ===

    /// Grant or withdraw one consent flag. Rejected after submission.
    pub fn grant_consent(&mut self, index: usize, granted: bool) -> SurveyResult<()> {
        self.consent.grant(index, granted)
    }

    /// Whether all consent flags are granted. The presentation layer
    /// keeps the question form hidden until this is true.
    pub fn consent_complete(&self) -> bool {
        self.consent.all_granted()
    }

    // === Derived state ===

    /// Evaluate the submit gate against the current state.
    pub fn validation(&self) -> ValidationReport {
        evaluate(
            &self.answers,
            &self.selections,
            &self.identity,
            &self.consent,
            &self.config,
        )
    }

    /// Recompute the full derived state. Called after every mutation;
    /// cheap by construction (42-element scans, no I/O).
    pub fn derived(&self) -> DerivedState {
        let report = self.validation();
        let score_preview = self.answers.finalize().map(|complete| score(&complete));
        DerivedState {
            answered_count: self.answers.answered_count(),
            selected_count: self.selections.selected_count(),
            consent_complete: self.consent.all_granted(),
            report,
            score_preview,
        }
    }

    /// The id of the persisted submission, once one exists.
    pub fn submission_id(&self) -> Option<SubmissionId> {
        self.submitted
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.is_some()
    }

    // === Submission ===

    /// Validate, score, and persist this session's responses.
    ///
    /// The gate is re-checked here regardless of what the UI showed.
    /// On success the session latches shut and further submits are
    /// refused; on a store failure it stays open so the respondent can
    /// retry manually.
    pub fn submit(&mut self, store: &dyn SheetStore) -> Result<SubmissionReceipt, SubmitError> {
        if let Some(id) = self.submitted {
            return Err(SubmitError::AlreadySubmitted { id });
        }

        let report = self.validation();
        if !report.submit_enabled {
            tracing::debug!(
                diagnostics = report.diagnostics.len(),
                "submit refused by gate re-check"
            );
            return Err(SubmitError::GateClosed { report });
        }
        let Some(complete) = self.answers.finalize() else {
            // questions_ok guarantees completeness; kept as a guard
            // rather than a panic.
            return Err(SubmitError::GateClosed { report });
        };

        let now = Utc::now();
        // First stamp wins: a retry after a store failure keeps the
        // consent moment of the original attempt.
        self.consent.stamp(now);

        let scores = score(&complete);
        let submission = Submission {
            submission_id: new_submission_id(),
            identity: self.identity.clone(),
            consent: self.consent.clone(),
            timestamp: now,
            answers: complete,
            scores: scores.clone(),
            selections: self.selections.clone(),
        };

        persist_submission(store, &submission, &self.config)?;
        self.submitted = Some(submission.submission_id);
        tracing::info!(submission_id = %submission.submission_id, "session submitted");

        Ok(SubmissionReceipt {
            submission_id: submission.submission_id,
            timestamp: now,
            profile: ProfileSummary {
                student_name: self.identity.name.trim().to_string(),
                degree: self.identity.degree.trim().to_string(),
                top_traits: scores.top_traits(3),
                scores,
            },
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
