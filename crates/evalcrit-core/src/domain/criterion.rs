//! Criteria a gallery's listings are judged against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{CriteriaError, Result};
use super::hard_criterion::HardCriterion;

/// The declared type of a criterion.
///
/// Decides which hard criterion (if any) may be attached and which answer
/// shape is expected when a listing is evaluated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum CriterionType {
    #[default]
    YesNo,
    YesNoUncertain,
    Int,
    Float,
    OpenEnded,
}

impl CriterionType {
    /// All types, in the order the authoring form lists them.
    pub const ALL: [CriterionType; 5] = [
        CriterionType::YesNo,
        CriterionType::YesNoUncertain,
        CriterionType::Int,
        CriterionType::Float,
        CriterionType::OpenEnded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionType::YesNo => "YesNo",
            CriterionType::YesNoUncertain => "YesNoUncertain",
            CriterionType::Int => "Int",
            CriterionType::Float => "Float",
            CriterionType::OpenEnded => "OpenEnded",
        }
    }

    /// Whether criteria of this type may carry a hard criterion.
    pub fn supports_hard_criterion(&self) -> bool {
        matches!(
            self,
            CriterionType::YesNo | CriterionType::Int | CriterionType::Float
        )
    }
}

impl fmt::Display for CriterionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CriterionType {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self> {
        CriterionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CriteriaError::UnknownCriterionType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum YesNoUncertain {
    Yes,
    No,
    Uncertain,
}

impl YesNoUncertain {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNoUncertain::Yes => "Yes",
            YesNoUncertain::No => "No",
            YesNoUncertain::Uncertain => "Uncertain",
        }
    }
}

impl fmt::Display for YesNoUncertain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One question a listing is judged against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Criterion {
    /// The question asked about each listing.
    pub question: String,

    /// Declared type of the criterion.
    pub criterion_type: CriterionType,

    /// Optional machine-checkable predicate. Its tag must agree with
    /// `criterion_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_criterion: Option<HardCriterion>,
}

impl Criterion {
    /// Create a criterion without a hard criterion.
    pub fn new(question: impl Into<String>, criterion_type: CriterionType) -> Self {
        Self {
            question: question.into(),
            criterion_type,
            hard_criterion: None,
        }
    }

    /// Attach a hard criterion.
    pub fn with_hard_criterion(mut self, hard_criterion: HardCriterion) -> Self {
        self.hard_criterion = Some(hard_criterion);
        self
    }

    /// Check that the hard criterion (if any) agrees with the declared type,
    /// that float operands are finite and that `Between` bounds are strictly
    /// ordered.
    ///
    /// `index` is only used to locate the failure in the error.
    pub fn validate(&self, index: usize) -> Result<()> {
        let Some(hard) = &self.hard_criterion else {
            return Ok(());
        };

        if hard.criterion_type() != self.criterion_type {
            return Err(CriteriaError::HardCriterionMismatch {
                index,
                criterion_type: self.criterion_type,
                hard_criterion: hard.criterion_type().as_str(),
            });
        }

        if let HardCriterion::Float(Some(c)) = hard {
            let (first, second) = c.operands();
            if !first.is_finite() || second.is_some_and(|v| !v.is_finite()) {
                return Err(CriteriaError::NonFiniteOperand { index });
            }
        }

        let bounds = match hard {
            HardCriterion::Int(Some(c)) => c.between_bounds().map(|(lo, hi)| {
                (lo < hi, lo.to_string(), hi.to_string())
            }),
            HardCriterion::Float(Some(c)) => c.between_bounds().map(|(lo, hi)| {
                (lo < hi, lo.to_string(), hi.to_string())
            }),
            _ => None,
        };
        if let Some((false, lo, hi)) = bounds {
            return Err(CriteriaError::InvalidBounds { index, lo, hi });
        }

        Ok(())
    }

    /// How an answer to this criterion must be written to be parsed.
    pub fn answer_format_hint(&self) -> &'static str {
        match self.criterion_type {
            CriterionType::YesNo => "Y or N",
            CriterionType::YesNoUncertain => "Y, N or U",
            CriterionType::Int => "a whole number",
            CriterionType::Float => "a number",
            CriterionType::OpenEnded => "free text",
        }
    }
}

/// All criteria for a gallery, in authoring order.
///
/// # Invariants
///
/// Holds at least one criterion. Values deserialized from the outside are
/// not trusted: call [`EvaluationCriteria::validate`] before using them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationCriteria {
    pub criteria: Vec<Criterion>,
}

impl Default for EvaluationCriteria {
    fn default() -> Self {
        Self {
            criteria: vec![Criterion::default()],
        }
    }
}

impl EvaluationCriteria {
    /// Create criteria, validating every entry.
    pub fn new(criteria: Vec<Criterion>) -> Result<Self> {
        let criteria = Self { criteria };
        criteria.validate()?;
        Ok(criteria)
    }

    /// Check the non-empty invariant and each criterion's consistency.
    pub fn validate(&self) -> Result<()> {
        if self.criteria.is_empty() {
            return Err(CriteriaError::Empty);
        }
        for (index, criterion) in self.criteria.iter().enumerate() {
            criterion.validate(index)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    /// Instructions listing every question with its expected answer format,
    /// in the order answers must be given.
    pub fn answer_instructions(&self) -> String {
        let mut out = String::from(
            "Answer every question below, in order, with exactly one answer each.\n",
        );
        for (index, criterion) in self.criteria.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} (answer with {})\n",
                index,
                criterion.question,
                criterion.answer_format_hint()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hard_criterion::NumericalHardCriterion;

    #[test]
    fn test_criterion_type_from_str() {
        assert_eq!(
            "YesNoUncertain".parse::<CriterionType>().unwrap(),
            CriterionType::YesNoUncertain
        );
        assert!(matches!(
            "Boolean".parse::<CriterionType>(),
            Err(CriteriaError::UnknownCriterionType(ref s)) if s == "Boolean"
        ));
    }

    #[test]
    fn test_default_criteria_has_one_yes_no_row() {
        let criteria = EvaluationCriteria::default();
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria.criteria[0].criterion_type, CriterionType::YesNo);
        assert!(criteria.criteria[0].question.is_empty());
        assert!(criteria.criteria[0].hard_criterion.is_none());
    }

    #[test]
    fn test_empty_criteria_rejected() {
        assert!(matches!(
            EvaluationCriteria::new(vec![]),
            Err(CriteriaError::Empty)
        ));
    }

    #[test]
    fn test_mismatched_hard_criterion_rejected() {
        let criterion = Criterion::new("price?", CriterionType::Int).with_hard_criterion(
            HardCriterion::Float(Some(NumericalHardCriterion::LessThan(3.0))),
        );
        let err = EvaluationCriteria::new(vec![Criterion::default(), criterion]).unwrap_err();
        match err {
            CriteriaError::HardCriterionMismatch {
                index,
                criterion_type,
                hard_criterion,
            } => {
                assert_eq!(index, 1);
                assert_eq!(criterion_type, CriterionType::Int);
                assert_eq!(hard_criterion, "Float");
            }
            other => panic!("Expected HardCriterionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_hard_criterion_on_descriptive_type_rejected() {
        let criterion = Criterion::new("condition?", CriterionType::YesNoUncertain)
            .with_hard_criterion(HardCriterion::YesNo(YesNo::Yes));
        assert!(criterion.validate(0).is_err());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let criterion = Criterion::new("price?", CriterionType::Int)
            .with_hard_criterion(HardCriterion::Int(Some(NumericalHardCriterion::Between(5, 3))));
        assert!(matches!(
            criterion.validate(2),
            Err(CriteriaError::InvalidBounds { index: 2, .. })
        ));
    }

    #[test]
    fn test_non_finite_float_operands_rejected() {
        for hard in [
            NumericalHardCriterion::Equal(f64::NAN),
            NumericalHardCriterion::LessThan(f64::INFINITY),
            NumericalHardCriterion::Between(1.0, f64::INFINITY),
            NumericalHardCriterion::Between(f64::NEG_INFINITY, 1.0),
        ] {
            let criterion = Criterion::new("weight?", CriterionType::Float)
                .with_hard_criterion(HardCriterion::Float(Some(hard)));
            assert!(matches!(
                criterion.validate(1),
                Err(CriteriaError::NonFiniteOperand { index: 1 })
            ));
        }
    }

    #[test]
    fn test_unset_numeric_hard_criterion_is_consistent() {
        let criterion = Criterion::new("rating?", CriterionType::Float)
            .with_hard_criterion(HardCriterion::Float(None));
        assert!(criterion.validate(0).is_ok());
    }

    #[test]
    fn test_answer_instructions_list_questions_in_order() {
        let criteria = EvaluationCriteria::new(vec![
            Criterion::new("Is it a shirt?", CriterionType::YesNo),
            Criterion::new("Rate the condition 0-10", CriterionType::Int),
        ])
        .unwrap();
        let text = criteria.answer_instructions();
        let shirt = text.find("0. Is it a shirt? (answer with Y or N)").unwrap();
        let rating = text
            .find("1. Rate the condition 0-10 (answer with a whole number)")
            .unwrap();
        assert!(shirt < rating);
    }
}
