//! RIASEC Test Utilities
//!
//! Centralized test infrastructure for the survey workspace:
//! - Fixtures for complete answer sets, identities, and consent records
//! - Proptest generators for answer data
//! - Re-export of the mock store from its source crate

// Re-export the mock store from its source crate
pub use riasec_storage::MockSheetStore;

// Re-export core types for convenience
pub use riasec_core::{
    Answer, AnswerSet, CompleteAnswers, ConsentRecord, Identity, SelectionSet, SurveyConfig,
    QUESTION_COUNT,
};

use proptest::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

/// A complete answer set with every question answered the same way.
pub fn answers_uniform(answer: Answer) -> AnswerSet {
    let mut set = AnswerSet::new();
    for id in 1..=QUESTION_COUNT as u8 {
        // Ids 1..=42 are always valid.
        let _ = set.set(id, answer);
    }
    set
}

/// A frozen all-yes answer set.
pub fn complete_all_yes() -> CompleteAnswers {
    answers_uniform(Answer::Yes)
        .finalize()
        .expect("uniform set is complete")
}

/// A frozen all-no answer set.
pub fn complete_all_no() -> CompleteAnswers {
    answers_uniform(Answer::No)
        .finalize()
        .expect("uniform set is complete")
}

/// Build a complete answer set from one yes/no bit per question, in
/// catalogue order.
pub fn complete_from_bits(bits: &[bool]) -> CompleteAnswers {
    assert_eq!(bits.len(), QUESTION_COUNT, "expected one bit per question");
    let mut set = AnswerSet::new();
    for (idx, yes) in bits.iter().enumerate() {
        let answer = if *yes { Answer::Yes } else { Answer::No };
        let _ = set.set(idx as u8 + 1, answer);
    }
    set.finalize().expect("all bits resolved")
}

/// A plausible respondent identity.
pub fn test_identity() -> Identity {
    Identity {
        name: "Asha Iyer".to_string(),
        degree: "B.Sc Computer Science".to_string(),
        email: Some("asha@example.edu".to_string()),
    }
}

/// A consent record with every configured flag granted.
pub fn granted_consent(config: &SurveyConfig) -> ConsentRecord {
    let mut consent = ConsentRecord::new(config.consent_flags.len());
    for index in 0..config.consent_flags.len() {
        // Indices are in range by construction.
        let _ = consent.grant(index, true);
    }
    consent
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

/// Strategy for a single tri-state answer.
pub fn arb_answer() -> impl Strategy<Value = Answer> {
    prop_oneof![
        Just(Answer::Unanswered),
        Just(Answer::Yes),
        Just(Answer::No),
    ]
}

/// Strategy for an answer set in any state of completion.
pub fn arb_answer_set() -> impl Strategy<Value = AnswerSet> {
    prop::collection::vec(arb_answer(), QUESTION_COUNT).prop_map(|answers| {
        let mut set = AnswerSet::new();
        for (idx, answer) in answers.into_iter().enumerate() {
            let _ = set.set(idx as u8 + 1, answer);
        }
        set
    })
}

/// Strategy for a frozen, complete answer set.
pub fn arb_complete_answers() -> impl Strategy<Value = CompleteAnswers> {
    prop::collection::vec(any::<bool>(), QUESTION_COUNT)
        .prop_map(|bits| complete_from_bits(&bits))
}

// =============================================================================
// TESTS
// =============================================================================
