//! Scoring engine
//!
//! Pure transformation from a complete answer set to six normalized
//! trait scores. No I/O, no hidden state: identical inputs always
//! produce bit-identical reports, and the engine is cheap enough to
//! re-run on every input mutation.

use crate::answers::CompleteAnswers;
use crate::taxonomy::{TraitCode, TRAIT_COUNT};
use serde::{Deserialize, Serialize};

/// Derived score for one trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub trait_code: TraitCode,
    /// Questions for this trait answered yes.
    pub yes_count: u32,
    /// Questions mapped to this trait (7 for the fixed taxonomy).
    pub n_items: u32,
    /// `yes_count / n_items`, 0 when the trait has no items.
    pub proportion: f64,
    /// This trait's share of the summed proportions, in [0, 1].
    pub normalized_fraction: f64,
    /// `normalized_fraction * 100`, rounded to 1 decimal place.
    pub normalized_percent: f64,
}

/// The six score rows, always in `[R, I, A, S, E, C]` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    rows: Vec<ScoreRow>,
}

impl ScoreReport {
    /// All six rows in trait order.
    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    /// The row for one trait.
    pub fn row(&self, trait_code: TraitCode) -> &ScoreRow {
        &self.rows[trait_code as usize]
    }

    /// Shorthand for a trait's normalized percent.
    pub fn percent(&self, trait_code: TraitCode) -> f64 {
        self.row(trait_code).normalized_percent
    }

    /// The `n` highest-scoring rows, descending by normalized percent.
    ///
    /// The sort is stable, so traits with equal percents keep their
    /// taxonomy order. There is deliberately no secondary key.
    pub fn top_traits(&self, n: usize) -> Vec<ScoreRow> {
        let mut ranked = self.rows.clone();
        ranked.sort_by(|a, b| b.normalized_percent.total_cmp(&a.normalized_percent));
        ranked.truncate(n);
        ranked
    }

    /// `(trait letter, percent)` pairs for a polar chart, with the first
    /// point repeated at the end to close the polygon.
    pub fn chart_points(&self) -> Vec<(&'static str, f64)> {
        let mut points: Vec<(&'static str, f64)> = self
            .rows
            .iter()
            .map(|r| (r.trait_code.letter(), r.normalized_percent))
            .collect();
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        points
    }

    /// Suggested radial-axis maximum for the chart: 20% headroom above
    /// the highest percent, capped at 100; full scale when all zero.
    pub fn radial_axis_max(&self) -> f64 {
        let max = self
            .rows
            .iter()
            .map(|r| r.normalized_percent)
            .fold(0.0_f64, f64::max);
        if max > 0.0 {
            100.0_f64.min(max * 1.2)
        } else {
            100.0
        }
    }
}

/// Score a complete answer set against the fixed taxonomy.
pub fn score(answers: &CompleteAnswers) -> ScoreReport {
    score_items(answers.iter().map(|(q, yes)| (q.trait_code, yes)))
}

/// Score an arbitrary stream of `(trait, answered_yes)` items.
///
/// Item counts are tallied per trait rather than assumed, so the result
/// stays correct if the taxonomy ever changes shape - including the
/// degenerate case of a trait with no items at all, whose proportion is
/// defined as 0 instead of dividing by zero.
pub fn score_items<T>(items: T) -> ScoreReport
where
    T: IntoIterator<Item = (TraitCode, bool)>,
{
    let mut yes_counts = [0u32; TRAIT_COUNT];
    let mut item_counts = [0u32; TRAIT_COUNT];
    for (trait_code, answered_yes) in items {
        let idx = trait_code as usize;
        item_counts[idx] += 1;
        if answered_yes {
            yes_counts[idx] += 1;
        }
    }

    let proportions: Vec<f64> = TraitCode::ALL
        .iter()
        .map(|t| {
            let idx = *t as usize;
            if item_counts[idx] == 0 {
                0.0
            } else {
                f64::from(yes_counts[idx]) / f64::from(item_counts[idx])
            }
        })
        .collect();

    let denominator: f64 = proportions.iter().sum();

    let rows = TraitCode::ALL
        .iter()
        .map(|t| {
            let idx = *t as usize;
            // All-"no" respondents (and an all-empty taxonomy) get six
            // zero rows rather than a division by zero.
            let fraction = if denominator == 0.0 {
                0.0
            } else {
                proportions[idx] / denominator
            };
            ScoreRow {
                trait_code: *t,
                yes_count: yes_counts[idx],
                n_items: item_counts[idx],
                proportion: proportions[idx],
                normalized_fraction: fraction,
                normalized_percent: round1(fraction * 100.0),
            }
        })
        .collect();

    ScoreReport { rows }
}

// Rounded independently per trait and never renormalized, so the six
// percents may sum anywhere in 99.4..=100.6. Prior outputs depend on
// this drift.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// =============================================================================
// TESTS
// =============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::answers::{Answer, AnswerSet};
    use crate::taxonomy::{ITEMS_PER_TRAIT, QUESTION_COUNT};
    use proptest::prelude::*;

    fn complete_from_bits(bits: &[bool]) -> CompleteAnswers {
        let mut set = AnswerSet::new();
        for (idx, yes) in bits.iter().enumerate() {
            let answer = if *yes { Answer::Yes } else { Answer::No };
            set.set(idx as u8 + 1, answer).unwrap();
        }
        set.finalize().unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Every percent lies in [0, 100]; their sum is 0 for an all-no
        /// respondent and within 100 +/- 0.6 otherwise.
        #[test]
        fn prop_percent_bounds_and_sum(bits in prop::collection::vec(any::<bool>(), QUESTION_COUNT)) {
            let report = score(&complete_from_bits(&bits));
            let mut sum = 0.0;
            for row in report.rows() {
                prop_assert!(row.normalized_percent >= 0.0);
                prop_assert!(row.normalized_percent <= 100.0);
                sum += row.normalized_percent;
            }
            if bits.iter().any(|b| *b) {
                prop_assert!((sum - 100.0).abs() <= 0.6, "sum {} outside drift bound", sum);
            } else {
                prop_assert_eq!(sum, 0.0);
            }
        }

        /// Proportions are exactly yes_count / 7 on the fixed taxonomy.
        #[test]
        fn prop_proportion_is_yes_over_seven(bits in prop::collection::vec(any::<bool>(), QUESTION_COUNT)) {
            let report = score(&complete_from_bits(&bits));
            for row in report.rows() {
                prop_assert_eq!(row.n_items as usize, ITEMS_PER_TRAIT);
                prop_assert_eq!(row.proportion, f64::from(row.yes_count) / 7.0);
            }
        }

        /// Scoring is a pure function: same bits, bit-identical report.
        #[test]
        fn prop_scoring_is_deterministic(bits in prop::collection::vec(any::<bool>(), QUESTION_COUNT)) {
            let answers = complete_from_bits(&bits);
            prop_assert_eq!(score(&answers), score(&answers));
        }
    }
}
