//! Respondent records: identity, consent, and the submission aggregate.

use crate::answers::{CompleteAnswers, SelectionSet};
use crate::error::{InputError, SurveyResult};
use crate::scoring::ScoreReport;
use crate::{SubmissionId, Timestamp};
use serde::{Deserialize, Serialize};

// ============================================================================
// IDENTITY
// ============================================================================

/// Who is responding. Name and degree are required; email is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub degree: String,
    pub email: Option<String>,
}

impl Identity {
    /// Whether both required fields are non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.degree.trim().is_empty()
    }

    /// Names of required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.degree.trim().is_empty() {
            missing.push("degree");
        }
        missing
    }

    /// Trimmed email, `None` when absent or blank.
    pub fn email_trimmed(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

// ============================================================================
// CONSENT
// ============================================================================

/// The respondent's consent flags, one per configured flag name, plus a
/// timestamp set exactly once at overall submission (not per checkbox).
/// Once stamped the record rejects further changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    granted: Vec<bool>,
    stamped_at: Option<Timestamp>,
}

impl ConsentRecord {
    /// Create an all-denied record sized to the configured flag count.
    pub fn new(flag_count: usize) -> Self {
        Self {
            granted: vec![false; flag_count],
            stamped_at: None,
        }
    }

    /// Grant or withdraw one consent flag. Fails once stamped.
    pub fn grant(&mut self, index: usize, granted: bool) -> SurveyResult<()> {
        if self.stamped_at.is_some() {
            return Err(InputError::ConsentStamped.into());
        }
        let flag_count = self.granted.len();
        let flag = self
            .granted
            .get_mut(index)
            .ok_or(InputError::UnknownConsentFlag { index, flag_count })?;
        *flag = granted;
        Ok(())
    }

    /// Whether every configured flag has been granted.
    pub fn all_granted(&self) -> bool {
        self.granted.iter().all(|g| *g)
    }

    /// Indices of flags not yet granted, ascending.
    pub fn missing_indices(&self) -> Vec<usize> {
        self.granted
            .iter()
            .enumerate()
            .filter(|(_, g)| !**g)
            .map(|(i, _)| i)
            .collect()
    }

    /// The raw flags in configured order.
    pub fn granted_flags(&self) -> &[bool] {
        &self.granted
    }

    /// Record the consent timestamp. The first stamp wins; later calls
    /// are no-ops so a manual retry keeps the original moment.
    pub fn stamp(&mut self, at: Timestamp) {
        if self.stamped_at.is_none() {
            self.stamped_at = Some(at);
        }
    }

    /// When consent was stamped, `None` before the first submit attempt.
    pub fn stamped_at(&self) -> Option<Timestamp> {
        self.stamped_at
    }
}

// ============================================================================
// SUBMISSION AGGREGATE
// ============================================================================

/// One respondent's complete, validated response set. Created exactly
/// once per session, write-once, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Freshly generated unique id tying all derived rows together.
    pub submission_id: SubmissionId,
    pub identity: Identity,
    pub consent: ConsentRecord,
    /// Moment of submission, UTC.
    pub timestamp: Timestamp,
    /// The frozen answers the scores were derived from.
    pub answers: CompleteAnswers,
    /// The six derived score rows in trait order.
    pub scores: ScoreReport,
    /// The frozen course selections.
    pub selections: SelectionSet,
}

// =============================================================================
// TESTS
// =============================================================================
