//! Error types for survey operations

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid selection bounds: min {min} > max {max}")]
    InvalidSelectionBounds { min: usize, max: usize },

    #[error("Maximum selections {max} exceeds catalog size {catalog_len}")]
    BoundExceedsCatalog { max: usize, catalog_len: usize },

    #[error("Course catalog must not be empty")]
    EmptyCatalog,

    #[error("At least one consent flag is required")]
    NoConsentFlags,

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },
}

/// Errors for out-of-range respondent input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown question id: {id}")]
    UnknownQuestion { id: u8 },

    #[error("Course index {index} out of range for catalog of {catalog_len}")]
    UnknownCourse { index: usize, catalog_len: usize },

    #[error("Consent flag index {index} out of range ({flag_count} flags configured)")]
    UnknownConsentFlag { index: usize, flag_count: usize },

    #[error("Consent record is already stamped and can no longer change")]
    ConsentStamped,
}

/// Durable-store errors, classified into exactly two kinds: transient
/// store/API failures and everything else.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store API error: {reason}")]
    Api { reason: String },

    #[error("Unexpected error: {reason}")]
    Unexpected { reason: String },
}

/// Master error type for survey operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SurveyError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for survey operations.
pub type SurveyResult<T> = Result<T, SurveyError>;

// =============================================================================
// TESTS
// =============================================================================
