//! Trait taxonomy - the fixed catalogue of six vocational-interest
//! traits and the 42 question-to-trait mappings.
//!
//! Pure static data. The catalogue is defined at compile time and never
//! changes at runtime; by construction each trait maps to exactly seven
//! questions.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Number of questions in the fixed catalogue.
pub const QUESTION_COUNT: usize = 42;

/// Number of traits in the taxonomy.
pub const TRAIT_COUNT: usize = 6;

/// Questions mapped to each trait (42 / 6).
pub const ITEMS_PER_TRAIT: usize = 7;

// ============================================================================
// TRAIT CODES
// ============================================================================

/// One of the six vocational-interest categories.
///
/// Variant order is significant: it is the display order and the column
/// order of the scores table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitCode {
    /// Realistic - hands-on, practical work
    R,
    /// Investigative - analytical, research-oriented work
    I,
    /// Artistic - creative, expressive work
    A,
    /// Social - helping, teaching, service work
    S,
    /// Enterprising - persuasive, leadership work
    E,
    /// Conventional - structured, detail-oriented work
    C,
}

impl TraitCode {
    /// All six trait codes in fixed display order.
    pub const ALL: [TraitCode; TRAIT_COUNT] = [
        TraitCode::R,
        TraitCode::I,
        TraitCode::A,
        TraitCode::S,
        TraitCode::E,
        TraitCode::C,
    ];

    /// Single-letter code used in the answers table and column names.
    pub fn letter(&self) -> &'static str {
        match self {
            TraitCode::R => "R",
            TraitCode::I => "I",
            TraitCode::A => "A",
            TraitCode::S => "S",
            TraitCode::E => "E",
            TraitCode::C => "C",
        }
    }

    /// Full category name.
    pub fn name(&self) -> &'static str {
        match self {
            TraitCode::R => "Realistic",
            TraitCode::I => "Investigative",
            TraitCode::A => "Artistic",
            TraitCode::S => "Social",
            TraitCode::E => "Enterprising",
            TraitCode::C => "Conventional",
        }
    }

    /// One-line category description shown on the respondent's profile card.
    pub fn description(&self) -> &'static str {
        match self {
            TraitCode::R => "Hands-on, practical, and mechanical work.",
            TraitCode::I => "Analytical, intellectual, and research-oriented roles.",
            TraitCode::A => "Creative, expressive, and design-oriented activities.",
            TraitCode::S => "Helping, teaching, or service-oriented careers.",
            TraitCode::E => "Persuasive, leadership, and business-focused roles.",
            TraitCode::C => "Structured, detail-oriented, and data-driven work.",
        }
    }
}

impl fmt::Display for TraitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

// ============================================================================
// QUESTION CATALOGUE
// ============================================================================

/// One forced-choice questionnaire item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Question id, 1..=42, unique, in fixed order.
    pub id: u8,
    /// The statement the respondent agrees or disagrees with.
    pub prompt: &'static str,
    /// The trait this question loads onto.
    pub trait_code: TraitCode,
}

const fn q(id: u8, prompt: &'static str, trait_code: TraitCode) -> Question {
    Question {
        id,
        prompt,
        trait_code,
    }
}

/// The fixed 42-question catalogue, in presentation order.
pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    q(1, "I like to work on cars", TraitCode::R),
    q(2, "I like to do puzzles", TraitCode::I),
    q(3, "I am good at working independently", TraitCode::A),
    q(4, "I like to work in teams", TraitCode::S),
    q(5, "I am an ambitious person, I set goals for myself", TraitCode::E),
    q(6, "I like to organize things, (files, desks/offices)", TraitCode::C),
    q(7, "I like to build things", TraitCode::R),
    q(8, "I like to read about art and music", TraitCode::A),
    q(9, "I like to have clear instructions to follow", TraitCode::C),
    q(10, "I like to try to influence or persuade people", TraitCode::E),
    q(11, "I like to do experiments", TraitCode::I),
    q(12, "I like to teach or train people", TraitCode::S),
    q(13, "I like trying to help people solve their problems", TraitCode::S),
    q(14, "I like to take care of animals", TraitCode::R),
    q(15, "I wouldn't mind working 8 hours per day in an office", TraitCode::C),
    q(16, "I like selling things", TraitCode::E),
    q(17, "I enjoy creative writing", TraitCode::A),
    q(18, "I enjoy science", TraitCode::I),
    q(19, "I am quick to take on new responsibilities", TraitCode::E),
    q(20, "I am interested in healing people", TraitCode::S),
    q(21, "I enjoy trying to figure out how things work", TraitCode::I),
    q(22, "I like putting things together or assembling things", TraitCode::R),
    q(23, "I am a creative person", TraitCode::A),
    q(24, "I pay attention to details", TraitCode::C),
    q(25, "I like to do filing or typing", TraitCode::C),
    q(26, "I like to analyze things (problems/ situations)", TraitCode::I),
    q(27, "I like to play instruments or sing", TraitCode::A),
    q(28, "I enjoy learning about other cultures", TraitCode::S),
    q(29, "I would like to start my own business", TraitCode::E),
    q(30, "I like to cook", TraitCode::R),
    q(31, "I like acting in plays", TraitCode::A),
    q(32, "I am a practical person", TraitCode::R),
    q(33, "I like working with numbers or charts", TraitCode::I),
    q(34, "I like to get into discussions about issues", TraitCode::S),
    q(35, "I am good at keeping records of my work", TraitCode::C),
    q(36, "I like to lead", TraitCode::E),
    q(37, "I like working outdoors", TraitCode::R),
    q(38, "I would like to work in an office", TraitCode::C),
    q(39, "I'm good at math", TraitCode::I),
    q(40, "I like helping people", TraitCode::S),
    q(41, "I like to draw", TraitCode::A),
    q(42, "I like to give speeches", TraitCode::E),
];

static QUESTION_INDEX: Lazy<HashMap<u8, &'static Question>> =
    Lazy::new(|| QUESTIONS.iter().map(|q| (q.id, q)).collect());

/// Look up a question by id. Returns `None` for ids outside 1..=42.
pub fn question(id: u8) -> Option<&'static Question> {
    QUESTION_INDEX.get(&id).copied()
}

/// Iterate the questions mapped to one trait, in catalogue order.
pub fn questions_for(trait_code: TraitCode) -> impl Iterator<Item = &'static Question> {
    QUESTIONS.iter().filter(move |q| q.trait_code == trait_code)
}

// =============================================================================
// TESTS
// =============================================================================
