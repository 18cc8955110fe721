//! Hard-criteria screening of evaluated listings.
//!
//! Checks a listing's [`CriterionAnswer`]s against the hard criteria of an
//! [`EvaluationCriteria`] and produces a [`ScreeningVerdict`]. Listings that
//! pass are relevant to the gallery; the rest are kept aside as irrelevant.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    CriteriaError, CriterionAnswer, EvaluationCriteria, HardCriterion, Result,
};
use crate::format::{format_criterion_answer, format_hard_criterion};

impl HardCriterion {
    /// Whether `answer` passes this hard criterion.
    ///
    /// An unset numeric predicate passes every answer of its domain. An
    /// answer of another shape never passes.
    pub fn is_satisfied_by(&self, answer: &CriterionAnswer) -> bool {
        match (self, answer) {
            (HardCriterion::YesNo(expected), CriterionAnswer::YesNo(actual)) => {
                expected == actual
            }
            (HardCriterion::Int(criterion), CriterionAnswer::Int(value)) => {
                criterion.map_or(true, |c| c.is_satisfied_by(*value))
            }
            (HardCriterion::Float(criterion), CriterionAnswer::Float(value)) => {
                criterion.map_or(true, |c| c.is_satisfied_by(*value))
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// One answer that failed its criterion's hard criterion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreeningViolation {
    /// Position of the criterion.
    pub index: usize,
    pub question: String,
    /// Human-readable explanation.
    pub reason: String,
}

/// The outcome of screening one listing's answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ScreeningVerdict {
    /// Violations found (empty when passed).
    pub violations: Vec<ScreeningViolation>,
}

impl ScreeningVerdict {
    /// Whether every hard criterion was satisfied.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Screen `answers` (one per criterion, in order) against `criteria`.
pub fn screen_answers(
    criteria: &EvaluationCriteria,
    answers: &[CriterionAnswer],
) -> Result<ScreeningVerdict> {
    if answers.len() != criteria.len() {
        return Err(CriteriaError::AnswerCount {
            expected: criteria.len(),
            actual: answers.len(),
        });
    }

    let violations = criteria
        .iter()
        .zip(answers)
        .enumerate()
        .filter_map(|(index, (criterion, answer))| {
            let hard = criterion.hard_criterion.as_ref()?;
            if hard.is_satisfied_by(answer) {
                return None;
            }
            let reason = if hard.criterion_type() == answer.criterion_type() {
                format!(
                    "answer {} is not {}",
                    format_criterion_answer(answer),
                    format_hard_criterion(Some(hard))
                )
            } else {
                format!(
                    "{} answer does not match the {} hard criterion",
                    answer.criterion_type(),
                    hard.criterion_type()
                )
            };
            Some(ScreeningViolation {
                index,
                question: criterion.question.clone(),
                reason,
            })
        })
        .collect::<Vec<_>>();

    debug!(
        criteria = criteria.len(),
        violations = violations.len(),
        "screened answers"
    );
    Ok(ScreeningVerdict { violations })
}

impl EvaluationCriteria {
    /// Parse raw answers and report whether they satisfy every hard
    /// criterion.
    pub fn parse_answers_and_check_hard_criteria<S: AsRef<str>>(
        &self,
        answers: &[S],
    ) -> Result<(Vec<CriterionAnswer>, bool)> {
        let parsed = self.parse_answers(answers)?;
        let verdict = screen_answers(self, &parsed)?;
        Ok((parsed, verdict.passed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Criterion, CriterionType, NumericalHardCriterion, YesNo};

    fn criteria() -> EvaluationCriteria {
        EvaluationCriteria::new(vec![
            Criterion::new("Is it a shirt?", CriterionType::YesNo)
                .with_hard_criterion(HardCriterion::YesNo(YesNo::Yes)),
            Criterion::new("Price in yen?", CriterionType::Int).with_hard_criterion(
                HardCriterion::Int(Some(NumericalHardCriterion::Between(1000, 5000))),
            ),
            Criterion::new("Describe the print", CriterionType::OpenEnded),
        ])
        .expect("valid criteria")
    }

    #[test]
    fn test_all_satisfied_passes() {
        let (answers, satisfied) = criteria()
            .parse_answers_and_check_hard_criteria(&["Y", "2500", "a cat"])
            .expect("parse");
        assert!(satisfied);
        assert_eq!(answers[1], CriterionAnswer::Int(2500));
    }

    #[test]
    fn test_out_of_range_price_fails() {
        let criteria = criteria();
        let answers = criteria.parse_answers(&["Y", "9000", "a cat"]).unwrap();
        let verdict = screen_answers(&criteria, &answers).unwrap();
        assert!(!verdict.passed());
        assert_eq!(verdict.violations.len(), 1);
        assert_eq!(verdict.violations[0].index, 1);
        assert_eq!(
            verdict.violations[0].reason,
            "answer 9000 is not between 1000 and 5000"
        );
    }

    #[test]
    fn test_unset_numeric_passes_any_value() {
        let hard = HardCriterion::Float(None);
        assert!(hard.is_satisfied_by(&CriterionAnswer::Float(-12.0)));
        assert!(!hard.is_satisfied_by(&CriterionAnswer::Int(3)));
    }

    #[test]
    fn test_wrong_answer_shape_is_violation() {
        let criteria = criteria();
        let answers = vec![
            CriterionAnswer::YesNo(YesNo::Yes),
            CriterionAnswer::Float(2500.0),
            CriterionAnswer::OpenEnded(String::new()),
        ];
        let verdict = screen_answers(&criteria, &answers).unwrap();
        assert_eq!(
            verdict.violations[0].reason,
            "Float answer does not match the Int hard criterion"
        );
    }

    #[test]
    fn test_answer_count_checked() {
        let err = screen_answers(&criteria(), &[]).unwrap_err();
        assert!(matches!(
            err,
            CriteriaError::AnswerCount {
                expected: 3,
                actual: 0
            }
        ));
    }
}
