//! Answer collection state
//!
//! Holds the respondent's per-question tri-state responses and the
//! course-selection flags. Both start empty and are mutated one entry
//! at a time; neither is ever silently defaulted.

use crate::error::{InputError, SurveyResult};
use crate::taxonomy::{question, Question, QUESTIONS, QUESTION_COUNT};
use serde::{Deserialize, Serialize};

// ============================================================================
// TRI-STATE ANSWERS
// ============================================================================

/// A single question's response. `Unanswered` is a distinct third state
/// that blocks submission; it is never coerced to yes or no.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    #[default]
    Unanswered,
    Yes,
    No,
}

impl Answer {
    /// Whether the respondent has picked yes or no.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Answer::Unanswered)
    }

    /// The 0/1 wire value, `None` while unanswered.
    pub fn as_bit(&self) -> Option<u8> {
        match self {
            Answer::Unanswered => None,
            Answer::Yes => Some(1),
            Answer::No => Some(0),
        }
    }
}

/// The respondent's in-progress answers, one tri-state entry per
/// catalogue question. Complete only when all 42 entries are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    // Always QUESTION_COUNT entries, indexed by question id - 1.
    entries: Vec<Answer>,
}

impl AnswerSet {
    /// Create an answer set with every question unanswered.
    pub fn new() -> Self {
        Self {
            entries: vec![Answer::Unanswered; QUESTION_COUNT],
        }
    }

    /// Record a response for a question. Setting `Unanswered` clears a
    /// previous response.
    pub fn set(&mut self, question_id: u8, answer: Answer) -> SurveyResult<()> {
        if question(question_id).is_none() {
            return Err(InputError::UnknownQuestion { id: question_id }.into());
        }
        self.entries[question_id as usize - 1] = answer;
        Ok(())
    }

    /// The recorded response for a question, `None` for unknown ids.
    pub fn get(&self, question_id: u8) -> Option<Answer> {
        question(question_id).map(|q| self.entries[q.id as usize - 1])
    }

    /// Number of questions answered yes or no.
    pub fn answered_count(&self) -> usize {
        self.entries.iter().filter(|a| a.is_resolved()).count()
    }

    /// Ids of questions still unanswered, ascending.
    pub fn missing_ids(&self) -> Vec<u8> {
        QUESTIONS
            .iter()
            .filter(|q| !self.entries[q.id as usize - 1].is_resolved())
            .map(|q| q.id)
            .collect()
    }

    /// Whether every question has been answered yes or no.
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|a| a.is_resolved())
    }

    /// Freeze a complete answer set into a scoring-ready witness.
    /// Returns `None` while any question is unanswered.
    pub fn finalize(&self) -> Option<CompleteAnswers> {
        let mut yes = vec![false; QUESTION_COUNT];
        for (idx, answer) in self.entries.iter().enumerate() {
            match answer {
                Answer::Yes => yes[idx] = true,
                Answer::No => {}
                Answer::Unanswered => return None,
            }
        }
        Some(CompleteAnswers { yes })
    }
}

impl Default for AnswerSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete, frozen answer set. Only producible via
/// [`AnswerSet::finalize`], so holding one proves every question was
/// answered - the scoring engine accepts nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteAnswers {
    // Always QUESTION_COUNT entries, indexed by question id - 1.
    yes: Vec<bool>,
}

impl CompleteAnswers {
    /// Whether the respondent answered yes to a question.
    pub fn answered_yes(&self, question_id: u8) -> bool {
        question(question_id)
            .map(|q| self.yes[q.id as usize - 1])
            .unwrap_or(false)
    }

    /// Iterate `(question, answered_yes)` pairs in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static Question, bool)> + '_ {
        QUESTIONS.iter().zip(self.yes.iter().copied())
    }
}

// ============================================================================
// COURSE SELECTIONS
// ============================================================================

/// One selected/unselected flag per catalog course, all false at
/// session start. The count may transiently exceed the configured
/// maximum during editing; the validator reports that as a correctable
/// condition rather than a hard stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    flags: Vec<bool>,
}

impl SelectionSet {
    /// Create an all-unselected set sized to the catalog.
    pub fn new(catalog_len: usize) -> Self {
        Self {
            flags: vec![false; catalog_len],
        }
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// True when the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Set one course's selection flag.
    pub fn set(&mut self, index: usize, selected: bool) -> SurveyResult<()> {
        let catalog_len = self.flags.len();
        let flag = self
            .flags
            .get_mut(index)
            .ok_or(InputError::UnknownCourse { index, catalog_len })?;
        *flag = selected;
        Ok(())
    }

    /// Flip one course's selection flag, returning the new state.
    pub fn toggle(&mut self, index: usize) -> SurveyResult<bool> {
        let catalog_len = self.flags.len();
        let flag = self
            .flags
            .get_mut(index)
            .ok_or(InputError::UnknownCourse { index, catalog_len })?;
        *flag = !*flag;
        Ok(*flag)
    }

    /// Whether a course is selected. Out-of-range indices read as false.
    pub fn is_selected(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Number of selected courses.
    pub fn selected_count(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    /// The raw flags in catalog order.
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurveyError;

    #[test]
    fn test_new_answer_set_is_fully_unanswered() {
        let set = AnswerSet::new();
        assert_eq!(set.answered_count(), 0);
        assert!(!set.is_complete());
        assert_eq!(set.missing_ids().len(), QUESTION_COUNT);
        assert!(set.finalize().is_none());
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let mut set = AnswerSet::new();
        set.set(5, Answer::Yes).unwrap();
        set.set(6, Answer::No).unwrap();
        assert_eq!(set.get(5), Some(Answer::Yes));
        assert_eq!(set.get(6), Some(Answer::No));
        assert_eq!(set.get(7), Some(Answer::Unanswered));
        assert_eq!(set.answered_count(), 2);
    }

    #[test]
    fn test_unknown_question_id_rejected() {
        let mut set = AnswerSet::new();
        let err = set.set(43, Answer::Yes).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::Input(InputError::UnknownQuestion { id: 43 })
        ));
        assert!(set.get(0).is_none());
    }

    #[test]
    fn test_clearing_an_answer_reopens_completeness() {
        let mut set = AnswerSet::new();
        for id in 1..=QUESTION_COUNT as u8 {
            set.set(id, Answer::No).unwrap();
        }
        assert!(set.is_complete());
        set.set(17, Answer::Unanswered).unwrap();
        assert!(!set.is_complete());
        assert_eq!(set.missing_ids(), vec![17]);
    }

    #[test]
    fn test_finalize_preserves_answers() {
        let mut set = AnswerSet::new();
        for id in 1..=QUESTION_COUNT as u8 {
            let answer = if id % 2 == 0 { Answer::Yes } else { Answer::No };
            set.set(id, answer).unwrap();
        }
        let complete = set.finalize().unwrap();
        assert!(complete.answered_yes(2));
        assert!(!complete.answered_yes(1));
        assert_eq!(complete.iter().filter(|(_, yes)| *yes).count(), 21);
    }

    #[test]
    fn test_selection_set_count_and_toggle() {
        let mut selections = SelectionSet::new(30);
        assert_eq!(selections.selected_count(), 0);
        selections.set(0, true).unwrap();
        selections.set(3, true).unwrap();
        assert_eq!(selections.selected_count(), 2);
        assert!(selections.is_selected(3));

        let now_on = selections.toggle(4).unwrap();
        assert!(now_on);
        let now_off = selections.toggle(4).unwrap();
        assert!(!now_off);
        assert_eq!(selections.selected_count(), 2);
    }

    #[test]
    fn test_selection_out_of_range_rejected() {
        let mut selections = SelectionSet::new(12);
        let err = selections.set(12, true).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::Input(InputError::UnknownCourse {
                index: 12,
                catalog_len: 12
            })
        ));
        assert!(!selections.is_selected(12));
    }
}
