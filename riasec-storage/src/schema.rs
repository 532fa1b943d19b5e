//! Durable-store schema
//!
//! The four named tables and their expected header rows. Column names
//! and order are the wire contract with the external tabular store;
//! changing them breaks every deployed sheet.

use riasec_core::{SurveyConfig, TraitCode};

/// The four append-only tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Submissions,
    Answers,
    Scores,
    Choices,
}

impl Table {
    /// All tables, in write order.
    pub const ALL: [Table; 4] = [
        Table::Submissions,
        Table::Answers,
        Table::Scores,
        Table::Choices,
    ];

    /// The table's name in the external store.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Submissions => "submissions",
            Table::Answers => "answers",
            Table::Scores => "scores",
            Table::Choices => "choices",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed header of the answers table.
pub const ANSWERS_HEADER: [&str; 4] = ["submission_id", "question_id", "trait", "answer"];

/// Header of the submissions table. The consent columns come from the
/// configured flag names, so single-flag deployments get a lone
/// `consent_given` column and three-flag deployments get all three.
pub fn submissions_header(config: &SurveyConfig) -> Vec<String> {
    let mut header: Vec<String> = ["submission_id", "student_name", "degree", "email", "timestamp"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend(config.consent_flags.iter().cloned());
    header.push("consent_timestamp".to_string());
    header
}

/// Header of the scores table: one percent column per trait, in trait order.
pub fn scores_header() -> Vec<String> {
    let mut header = vec!["submission_id".to_string()];
    header.extend(
        TraitCode::ALL
            .iter()
            .map(|t| format!("{}_percent", t.letter())),
    );
    header
}

/// Header of the choices table: one 0/1 column per catalog entry,
/// named after the course, in catalog order.
pub fn choices_header(config: &SurveyConfig) -> Vec<String> {
    let mut header = vec!["submission_id".to_string()];
    header.extend(config.course_catalog.iter().cloned());
    header
}

/// The expected header for any table under a given configuration.
pub fn expected_header(table: Table, config: &SurveyConfig) -> Vec<String> {
    match table {
        Table::Submissions => submissions_header(config),
        Table::Answers => ANSWERS_HEADER.iter().map(|s| s.to_string()).collect(),
        Table::Scores => scores_header(),
        Table::Choices => choices_header(config),
    }
}

// =============================================================================
// TESTS
// =============================================================================
