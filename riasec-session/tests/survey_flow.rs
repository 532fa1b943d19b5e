//! End-to-end session flow against the mock store: answer everything,
//! submit, and check what landed in each of the four tables.

use riasec_core::{Answer, SurveyConfig, TraitCode, QUESTION_COUNT};
use riasec_session::{Session, SubmitError};
use riasec_storage::{Table, WriteStage};
use riasec_test_utils::MockSheetStore;

fn filled_session(config: SurveyConfig) -> Session {
    let consent_flags = config.consent_flags.len();
    let min_selections = config.min_selections.max(1);
    let mut session = Session::new(config).unwrap();
    session.set_name("Ravi Menon");
    session.set_degree("B.Com");
    session.set_email("ravi@example.edu");
    for index in 0..consent_flags {
        session.grant_consent(index, true).unwrap();
    }
    // Yes to every Investigative and Social question, no elsewhere.
    for id in 1..=QUESTION_COUNT as u8 {
        let question = riasec_core::question(id).unwrap();
        let answer = match question.trait_code {
            TraitCode::I | TraitCode::S => Answer::Yes,
            _ => Answer::No,
        };
        session.answer(id, answer).unwrap();
    }
    for index in 0..min_selections {
        session.set_course(index, true).unwrap();
    }
    session
}

#[test]
fn full_flow_persists_one_submission_across_four_tables() {
    let store = MockSheetStore::new();
    let mut session = filled_session(SurveyConfig::standard());

    let receipt = session.submit(&store).unwrap();
    let id = receipt.submission_id.to_string();

    assert_eq!(store.row_count(Table::Submissions), 1);
    assert_eq!(store.row_count(Table::Answers), 42);
    assert_eq!(store.row_count(Table::Scores), 1);
    assert_eq!(store.row_count(Table::Choices), 1);

    // Every row carries the same submission id.
    for table in Table::ALL {
        assert!(store.rows(table).iter().all(|row| row[0] == id));
    }

    // I and S split the profile 50/50.
    let scores = &store.rows(Table::Scores)[0];
    assert_eq!(scores[1..].to_vec(), vec!["0.0", "50.0", "0.0", "50.0", "0.0", "0.0"]);

    let submissions = &store.rows(Table::Submissions)[0];
    assert_eq!(submissions[1], "Ravi Menon");
    assert_eq!(submissions[3], "ravi@example.edu");
    // Submission timestamp and consent timestamp are the same moment.
    assert_eq!(submissions[4], submissions[8]);
}

#[test]
fn receipt_top_traits_follow_scores_with_stable_ties() {
    let store = MockSheetStore::new();
    let mut session = filled_session(SurveyConfig::standard());
    let receipt = session.submit(&store).unwrap();

    let top: Vec<TraitCode> = receipt
        .profile
        .top_traits
        .iter()
        .map(|row| row.trait_code)
        .collect();
    // I and S tie at 50.0 and keep taxonomy order; R leads the zeros.
    assert_eq!(top, [TraitCode::I, TraitCode::S, TraitCode::R]);
}

#[test]
fn single_consent_deployment_round_trip() {
    let store = MockSheetStore::new();
    let mut session = filled_session(SurveyConfig::single_consent());

    session.submit(&store).unwrap();

    let header = store.header(Table::Submissions);
    assert_eq!(header[5], "consent_given");
    assert_eq!(header.len(), 7);
    let row = &store.rows(Table::Submissions)[0];
    assert_eq!(row[5], "true");
}

#[test]
fn store_failure_leaves_session_retryable_with_duplicates() {
    let store = MockSheetStore::new();
    let mut session = filled_session(SurveyConfig::standard());

    store.fail_appends_on(Table::Choices);
    let err = session.submit(&store).unwrap_err();
    match err {
        SubmitError::Write(failure) => assert_eq!(failure.stage, WriteStage::Choices),
        other => panic!("expected Write failure, got {other:?}"),
    }
    assert!(!session.is_submitted());
    // Orphaned submission: first three stages persisted, choices did not.
    assert_eq!(store.row_count(Table::Submissions), 1);
    assert_eq!(store.row_count(Table::Choices), 0);

    // Manual retry re-runs every stage; already-written rows duplicate.
    store.clear_failures();
    session.submit(&store).unwrap();
    assert_eq!(store.row_count(Table::Submissions), 2);
    assert_eq!(store.row_count(Table::Answers), 84);
    assert_eq!(store.row_count(Table::Choices), 1);

    // Both attempts kept the consent timestamp of the first attempt.
    let rows = store.rows(Table::Submissions);
    assert_eq!(rows[0][8], rows[1][8]);
}

#[test]
fn gate_recheck_blocks_a_bypassed_ui() {
    let store = MockSheetStore::new();
    let mut session = filled_session(SurveyConfig::standard());
    // Simulate the respondent clearing an answer after the UI enabled
    // the button.
    session.answer(11, Answer::Unanswered).unwrap();

    let err = session.submit(&store).unwrap_err();
    match err {
        SubmitError::GateClosed { report } => {
            assert!(!report.questions_ok);
            assert!(report
                .messages()
                .iter()
                .any(|m| m.contains("Q11")));
        }
        other => panic!("expected GateClosed, got {other:?}"),
    }
    // Nothing was written.
    for table in Table::ALL {
        assert_eq!(store.row_count(table), 0);
    }
}

#[test]
fn over_selection_blocks_submit_with_exact_counts() {
    let store = MockSheetStore::new();
    let mut session = filled_session(SurveyConfig::standard());
    for index in 0..9 {
        session.set_course(index, true).unwrap();
    }

    let err = session.submit(&store).unwrap_err();
    match err {
        SubmitError::GateClosed { report } => {
            assert!(!report.selection_count_ok);
            assert!(report
                .messages()
                .contains(&"You selected 9 courses, the maximum is 7. Remove 2.".to_string()));
        }
        other => panic!("expected GateClosed, got {other:?}"),
    }
}
