//! Submission validator
//!
//! A conjunction gate over five independently reportable conditions,
//! re-evaluated in full after every mutation (level-triggered, no
//! incremental state). Diagnostics are advisory; the gate is what
//! blocks the submit action.

use crate::answers::{AnswerSet, SelectionSet};
use crate::config::SurveyConfig;
use crate::respondent::{ConsentRecord, Identity};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// A specific, human-readable description of one unmet condition.
/// Always names the exact deficiency: which question ids, which fields,
/// by how many the selection count is off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    MissingIdentity { fields: Vec<String> },
    UnansweredQuestions { ids: Vec<u8> },
    ConsentPending { flags: Vec<String> },
    TooManySelections { selected: usize, maximum: usize },
    TooFewSelections { selected: usize, minimum: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingIdentity { fields } => {
                write!(f, "Please fill in: {}", fields.join(", "))
            }
            Diagnostic::UnansweredQuestions { ids } => {
                let labels: Vec<String> = ids.iter().map(|id| format!("Q{id}")).collect();
                write!(
                    f,
                    "Please answer all questions. Missing: {}",
                    labels.join(", ")
                )
            }
            Diagnostic::ConsentPending { flags } => {
                write!(
                    f,
                    "Please check all consent boxes to proceed: {}",
                    flags.join(", ")
                )
            }
            Diagnostic::TooManySelections { selected, maximum } => {
                write!(
                    f,
                    "You selected {selected} courses, the maximum is {maximum}. Remove {}.",
                    selected - maximum
                )
            }
            Diagnostic::TooFewSelections { selected, minimum } => {
                write!(
                    f,
                    "You selected {selected} courses, the minimum is {minimum}. Add {}.",
                    minimum - selected
                )
            }
        }
    }
}

// ============================================================================
// VALIDATION REPORT
// ============================================================================

/// The gate state: five independent conditions plus their conjunction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Name and degree non-empty after trimming.
    pub identity_ok: bool,
    /// All 42 questions answered yes or no.
    pub questions_ok: bool,
    /// Every configured consent flag granted.
    pub consent_ok: bool,
    /// Selection count within the configured [min, max].
    pub selection_count_ok: bool,
    /// The conjunction of the four conditions above.
    pub submit_enabled: bool,
    /// One specific message per unmet condition.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// All diagnostics rendered as display strings, for callers that
    /// only want text.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.to_string()).collect()
    }
}

/// Evaluate the full gate. Pure and cheap: a 42-element scan plus a few
/// counts, safe to run on every input change.
pub fn evaluate(
    answers: &AnswerSet,
    selections: &SelectionSet,
    identity: &Identity,
    consent: &ConsentRecord,
    config: &SurveyConfig,
) -> ValidationReport {
    let mut diagnostics = Vec::new();

    let identity_ok = identity.is_complete();
    if !identity_ok {
        diagnostics.push(Diagnostic::MissingIdentity {
            fields: identity
                .missing_fields()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        });
    }

    let missing = answers.missing_ids();
    let questions_ok = missing.is_empty();
    if !questions_ok {
        diagnostics.push(Diagnostic::UnansweredQuestions { ids: missing });
    }

    let consent_ok = consent.all_granted();
    if !consent_ok {
        let flags = consent
            .missing_indices()
            .into_iter()
            .filter_map(|i| config.consent_flags.get(i).cloned())
            .collect();
        diagnostics.push(Diagnostic::ConsentPending { flags });
    }

    let selected = selections.selected_count();
    let selection_count_ok = selected >= config.min_selections && selected <= config.max_selections;
    if selected > config.max_selections {
        diagnostics.push(Diagnostic::TooManySelections {
            selected,
            maximum: config.max_selections,
        });
    } else if selected < config.min_selections {
        diagnostics.push(Diagnostic::TooFewSelections {
            selected,
            minimum: config.min_selections,
        });
    }

    ValidationReport {
        identity_ok,
        questions_ok,
        consent_ok,
        selection_count_ok,
        submit_enabled: identity_ok && questions_ok && consent_ok && selection_count_ok,
        diagnostics,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::Answer;
    use crate::taxonomy::QUESTION_COUNT;

    struct Fixture {
        answers: AnswerSet,
        selections: SelectionSet,
        identity: Identity,
        consent: ConsentRecord,
        config: SurveyConfig,
    }

    /// A fixture with every condition satisfied; tests break one
    /// condition at a time.
    fn ready() -> Fixture {
        let config = SurveyConfig::standard();
        let mut answers = AnswerSet::new();
        for id in 1..=QUESTION_COUNT as u8 {
            answers.set(id, Answer::Yes).unwrap();
        }
        let mut selections = SelectionSet::new(config.course_catalog.len());
        for index in 0..3 {
            selections.set(index, true).unwrap();
        }
        let mut consent = ConsentRecord::new(config.consent_flags.len());
        for index in 0..config.consent_flags.len() {
            consent.grant(index, true).unwrap();
        }
        Fixture {
            answers,
            selections,
            identity: Identity {
                name: "Asha".to_string(),
                degree: "B.Sc Computer Science".to_string(),
                email: None,
            },
            consent,
            config,
        }
    }

    fn run(fixture: &Fixture) -> ValidationReport {
        evaluate(
            &fixture.answers,
            &fixture.selections,
            &fixture.identity,
            &fixture.consent,
            &fixture.config,
        )
    }

    #[test]
    fn test_ready_fixture_enables_submit() {
        let report = run(&ready());
        assert!(report.identity_ok);
        assert!(report.questions_ok);
        assert!(report.consent_ok);
        assert!(report.selection_count_ok);
        assert!(report.submit_enabled);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_submit_enabled_iff_all_conditions_hold() {
        // Truth table over the four sub-conditions: break each subset
        // and confirm the gate is the exact conjunction.
        for mask in 0u8..16 {
            let mut fixture = ready();
            let break_identity = mask & 1 != 0;
            let break_questions = mask & 2 != 0;
            let break_consent = mask & 4 != 0;
            let break_selection = mask & 8 != 0;

            if break_identity {
                fixture.identity.name = "  ".to_string();
            }
            if break_questions {
                fixture.answers.set(7, Answer::Unanswered).unwrap();
            }
            if break_consent {
                fixture.consent.grant(1, false).unwrap();
            }
            if break_selection {
                for index in 3..11 {
                    fixture.selections.set(index, true).unwrap();
                }
            }

            let report = run(&fixture);
            assert_eq!(report.identity_ok, !break_identity, "mask {mask}");
            assert_eq!(report.questions_ok, !break_questions, "mask {mask}");
            assert_eq!(report.consent_ok, !break_consent, "mask {mask}");
            assert_eq!(report.selection_count_ok, !break_selection, "mask {mask}");
            assert_eq!(report.submit_enabled, mask == 0, "mask {mask}");
            assert_eq!(report.diagnostics.len(), mask.count_ones() as usize);
        }
    }

    #[test]
    fn test_unanswered_questions_named_by_id() {
        let mut fixture = ready();
        fixture.answers.set(3, Answer::Unanswered).unwrap();
        fixture.answers.set(41, Answer::Unanswered).unwrap();
        let report = run(&fixture);
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::UnansweredQuestions { ids: vec![3, 41] }]
        );
        assert_eq!(
            report.messages(),
            vec!["Please answer all questions. Missing: Q3, Q41"]
        );
    }

    #[test]
    fn test_over_selection_reports_exact_excess() {
        // Scenario: 9 selected against a maximum of 7.
        let mut fixture = ready();
        for index in 0..9 {
            fixture.selections.set(index, true).unwrap();
        }
        let report = run(&fixture);
        assert!(!report.selection_count_ok);
        assert!(!report.submit_enabled);
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::TooManySelections {
                selected: 9,
                maximum: 7
            }]
        );
        assert_eq!(
            report.messages(),
            vec!["You selected 9 courses, the maximum is 7. Remove 2."]
        );
    }

    #[test]
    fn test_exact_minimum_selection_is_ok() {
        // Scenario: exactly the minimum of a 2..=4 bound.
        let mut fixture = ready();
        fixture.config = SurveyConfig::standard().with_selection_bounds(2, 4);
        fixture.selections = SelectionSet::new(fixture.config.course_catalog.len());
        fixture.selections.set(0, true).unwrap();
        fixture.selections.set(1, true).unwrap();
        let report = run(&fixture);
        assert!(report.selection_count_ok);
        assert!(report.submit_enabled);
    }

    #[test]
    fn test_under_selection_reports_exact_shortfall() {
        let mut fixture = ready();
        fixture.config = SurveyConfig::standard().with_selection_bounds(2, 4);
        fixture.selections = SelectionSet::new(fixture.config.course_catalog.len());
        fixture.selections.set(0, true).unwrap();
        let report = run(&fixture);
        assert!(!report.selection_count_ok);
        assert_eq!(
            report.messages(),
            vec!["You selected 1 courses, the minimum is 2. Add 1."]
        );
    }

    #[test]
    fn test_consent_diagnostic_names_pending_flags() {
        let mut fixture = ready();
        fixture.consent.grant(2, false).unwrap();
        let report = run(&fixture);
        assert!(!report.consent_ok);
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::ConsentPending {
                flags: vec!["consent_participate".to_string()]
            }]
        );
    }

    #[test]
    fn test_zero_selections_ok_when_minimum_is_zero() {
        let mut fixture = ready();
        fixture.selections = SelectionSet::new(fixture.config.course_catalog.len());
        let report = run(&fixture);
        assert!(report.selection_count_ok);
        assert!(report.submit_enabled);
    }
}
