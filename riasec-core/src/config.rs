//! Survey configuration
//!
//! The observed deployments disagree on selection bounds (at most 7 vs.
//! between 2 and 4), consent shape (three flags vs. a single
//! `consent_given`), and catalog size. All of that is configuration,
//! not constants.

use crate::error::{ConfigError, SurveyResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The three-flag consent shape, in gating order. Each name doubles as
/// a column name in the submissions table.
pub const CONSENT_FLAGS_THREE: [&str; 3] = [
    "consent_purpose",
    "consent_confidentiality",
    "consent_participate",
];

/// The single-flag consent shape used by the earliest deployment.
pub const CONSENT_FLAG_SINGLE: &str = "consent_given";

/// The standard 30-course catalog. Entry names double as column names
/// in the choices table, in this order.
pub const STANDARD_COURSES: [&str; 30] = [
    "ENVIRONMENTAL STUDIES",
    "CLASSICAL MECHANICS",
    "HUMAN RESOURCE MANAGEMENT",
    "FUNDAMENTALS OF ARTIFICIAL INTELLIGENCE",
    "COMPUTER AIDED DESIGN (CAD)",
    "BIOTECHNOLOGY",
    "ORGANIC CHEMISTRY",
    "ZOOLOGY",
    "PYTHON PROGRAMMING",
    "BUSINESS ECONOMICS",
    "INTERIOR DESIGN",
    "LANGUAGE STUDIES",
    "CLAY MODELING",
    "GRAPHIC DESIGN",
    "PAINTING",
    "FUNDAMENTALS OF ADVERTISING",
    "MARKETING MANAGEMENT",
    "TALENT ACQUISITION",
    "SOCIOLOGY",
    "BASIC PSYCHOLOGY",
    "POLITICAL SCIENCE",
    "BANKING AUDIT AND ASSURANCE",
    "ENTREPRENEURSHIP AND FASHION MERCHENDISING",
    "BUSINESS LAW",
    "FINANCIAL TRADES AND MARKET RESEARCH",
    "FINANCIAL REPORTING STATEMENT AND ANALYSIS",
    "TRAVEL & TOUR OPERATIONS",
    "BUSINESS DATA ANALYSIS",
    "JOURNALISM",
    "WEALTH MANAGEMENT",
];

/// Per-deployment survey configuration.
/// ALL values are explicit - no ambient defaults anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Minimum number of course selections required at submit time.
    pub min_selections: usize,
    /// Maximum number of course selections allowed at submit time.
    pub max_selections: usize,
    /// Ordered consent flag names; every flag must be granted before
    /// the respondent may proceed. Also the consent column names in the
    /// submissions table.
    pub consent_flags: Vec<String>,
    /// Ordered course catalog. Also the column names of the choices table.
    pub course_catalog: Vec<String>,
}

impl SurveyConfig {
    /// The standard deployment: up to 7 of 30 courses, three consent flags.
    pub fn standard() -> Self {
        Self {
            min_selections: 0,
            max_selections: 7,
            consent_flags: CONSENT_FLAGS_THREE.iter().map(|s| s.to_string()).collect(),
            course_catalog: STANDARD_COURSES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The earliest deployment shape: a single consent flag, 2 to 4
    /// selections from the standard catalog.
    pub fn single_consent() -> Self {
        Self {
            min_selections: 2,
            max_selections: 4,
            consent_flags: vec![CONSENT_FLAG_SINGLE.to_string()],
            course_catalog: STANDARD_COURSES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the selection bounds.
    pub fn with_selection_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_selections = min;
        self.max_selections = max;
        self
    }

    /// Replace the course catalog.
    pub fn with_course_catalog(mut self, catalog: Vec<String>) -> Self {
        self.course_catalog = catalog;
        self
    }

    /// Replace the consent flag names.
    pub fn with_consent_flags(mut self, flags: Vec<String>) -> Self {
        self.consent_flags = flags;
        self
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - min_selections <= max_selections
    /// - max_selections <= catalog size
    /// - catalog and consent flags non-empty
    /// - no duplicate course or consent-flag names (both become store columns)
    pub fn validate(&self) -> SurveyResult<()> {
        if self.min_selections > self.max_selections {
            return Err(ConfigError::InvalidSelectionBounds {
                min: self.min_selections,
                max: self.max_selections,
            }
            .into());
        }
        if self.course_catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog.into());
        }
        if self.max_selections > self.course_catalog.len() {
            return Err(ConfigError::BoundExceedsCatalog {
                max: self.max_selections,
                catalog_len: self.course_catalog.len(),
            }
            .into());
        }
        if self.consent_flags.is_empty() {
            return Err(ConfigError::NoConsentFlags.into());
        }

        let mut seen = HashSet::new();
        for course in &self.course_catalog {
            if !seen.insert(course.as_str()) {
                return Err(ConfigError::DuplicateName {
                    kind: "course",
                    name: course.clone(),
                }
                .into());
            }
        }
        let mut seen = HashSet::new();
        for flag in &self.consent_flags {
            if !seen.insert(flag.as_str()) {
                return Err(ConfigError::DuplicateName {
                    kind: "consent flag",
                    name: flag.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
