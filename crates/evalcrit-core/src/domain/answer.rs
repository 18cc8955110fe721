//! Answers given to criteria when a listing is evaluated.

use serde::{Deserialize, Serialize};

use super::criterion::{Criterion, CriterionType, EvaluationCriteria, YesNo, YesNoUncertain};
use super::error::{CriteriaError, Result};

/// The realized answer to one criterion for one listing.
///
/// Numeric domains match [`crate::domain::HardCriterion`]: `Int` is `i64`,
/// `Float` is `f64`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CriterionAnswer {
    YesNo(YesNo),
    YesNoUncertain(YesNoUncertain),
    Int(i64),
    Float(f64),
    OpenEnded(String),
}

impl CriterionAnswer {
    pub fn criterion_type(&self) -> CriterionType {
        match self {
            CriterionAnswer::YesNo(_) => CriterionType::YesNo,
            CriterionAnswer::YesNoUncertain(_) => CriterionType::YesNoUncertain,
            CriterionAnswer::Int(_) => CriterionType::Int,
            CriterionAnswer::Float(_) => CriterionType::Float,
            CriterionAnswer::OpenEnded(_) => CriterionType::OpenEnded,
        }
    }
}

impl Criterion {
    /// Parse a raw answer string into the answer shape of this criterion.
    ///
    /// Yes/no answers accept `Y`/`N` (`U` for uncertain) or the full word,
    /// case-insensitively. Numeric answers must parse in the criterion's
    /// domain; floats must be finite.
    pub fn parse_answer(&self, raw: &str) -> Result<CriterionAnswer> {
        let trimmed = raw.trim();
        let lowered = trimmed.to_ascii_lowercase();
        let parse_error = |expected: &'static str| CriteriaError::AnswerParse {
            question: self.question.clone(),
            answer: raw.to_string(),
            expected,
        };

        match self.criterion_type {
            CriterionType::YesNo => match lowered.as_str() {
                "y" | "yes" => Ok(CriterionAnswer::YesNo(YesNo::Yes)),
                "n" | "no" => Ok(CriterionAnswer::YesNo(YesNo::No)),
                _ => Err(parse_error("Y/N")),
            },
            CriterionType::YesNoUncertain => match lowered.as_str() {
                "y" | "yes" => Ok(CriterionAnswer::YesNoUncertain(YesNoUncertain::Yes)),
                "n" | "no" => Ok(CriterionAnswer::YesNoUncertain(YesNoUncertain::No)),
                "u" | "uncertain" => Ok(CriterionAnswer::YesNoUncertain(
                    YesNoUncertain::Uncertain,
                )),
                _ => Err(parse_error("Y/N/U")),
            },
            CriterionType::Int => trimmed
                .parse::<i64>()
                .map(CriterionAnswer::Int)
                .map_err(|_| parse_error("parsable to integer")),
            CriterionType::Float => trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(CriterionAnswer::Float)
                .ok_or_else(|| parse_error("parsable to float")),
            CriterionType::OpenEnded => Ok(CriterionAnswer::OpenEnded(raw.to_string())),
        }
    }
}

impl EvaluationCriteria {
    /// Parse one raw answer per criterion, in criteria order.
    pub fn parse_answers<S: AsRef<str>>(&self, answers: &[S]) -> Result<Vec<CriterionAnswer>> {
        if answers.len() != self.criteria.len() {
            return Err(CriteriaError::AnswerCount {
                expected: self.criteria.len(),
                actual: answers.len(),
            });
        }

        self.criteria
            .iter()
            .zip(answers)
            .map(|(criterion, answer)| criterion.parse_answer(answer.as_ref()))
            .collect()
    }
}
