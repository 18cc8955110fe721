//! Human-readable rendering of hard criteria and answers.
//!
//! Total functions: anything without a renderable predicate becomes `"-"`.

use std::fmt::Display;

use crate::domain::{CriterionAnswer, HardCriterion, NumericalHardCriterion};

/// Placeholder for a missing or unset hard criterion.
pub const NO_HARD_CRITERION: &str = "-";

fn format_numerical<N: Display>(criterion: &NumericalHardCriterion<N>) -> String {
    match criterion {
        NumericalHardCriterion::LessThan(v) => format!("less than {v}"),
        NumericalHardCriterion::MoreThan(v) => format!("more than {v}"),
        NumericalHardCriterion::Equal(v) => format!("equal {v}"),
        NumericalHardCriterion::Between(lo, hi) => format!("between {lo} and {hi}"),
    }
}

/// Render a hard criterion, e.g. `"between 1 and 10"` or `"Yes"`.
pub fn format_hard_criterion(criterion: Option<&HardCriterion>) -> String {
    match criterion {
        Some(HardCriterion::YesNo(v)) => v.to_string(),
        Some(HardCriterion::Int(Some(c))) => format_numerical(c),
        Some(HardCriterion::Float(Some(c))) => format_numerical(c),
        Some(HardCriterion::Int(None)) | Some(HardCriterion::Float(None)) | None => {
            NO_HARD_CRITERION.to_string()
        }
    }
}

/// Render the scalar of an answer.
pub fn format_criterion_answer(answer: &CriterionAnswer) -> String {
    match answer {
        CriterionAnswer::YesNo(v) => v.to_string(),
        CriterionAnswer::YesNoUncertain(v) => v.to_string(),
        CriterionAnswer::Int(v) => v.to_string(),
        CriterionAnswer::Float(v) => v.to_string(),
        CriterionAnswer::OpenEnded(text) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{YesNo, YesNoUncertain};

    #[test]
    fn test_format_int_between() {
        let hard = HardCriterion::Int(Some(NumericalHardCriterion::Between(1, 10)));
        assert_eq!(format_hard_criterion(Some(&hard)), "between 1 and 10");
    }

    #[test]
    fn test_format_yes_no() {
        let hard = HardCriterion::YesNo(YesNo::Yes);
        assert_eq!(format_hard_criterion(Some(&hard)), "Yes");
    }

    #[test]
    fn test_format_absent_and_unset() {
        assert_eq!(format_hard_criterion(None), "-");
        assert_eq!(format_hard_criterion(Some(&HardCriterion::Float(None))), "-");
    }

    #[test]
    fn test_format_float_operators() {
        let cases = [
            (NumericalHardCriterion::LessThan(2.5), "less than 2.5"),
            (NumericalHardCriterion::MoreThan(1000.0), "more than 1000"),
            (NumericalHardCriterion::Equal(42.5), "equal 42.5"),
            (NumericalHardCriterion::Between(-1.5, 0.25), "between -1.5 and 0.25"),
        ];
        for (criterion, expected) in cases {
            let hard = HardCriterion::Float(Some(criterion));
            assert_eq!(format_hard_criterion(Some(&hard)), expected);
        }
    }

    #[test]
    fn test_format_answers() {
        assert_eq!(format_criterion_answer(&CriterionAnswer::Int(-3)), "-3");
        assert_eq!(format_criterion_answer(&CriterionAnswer::Float(7.5)), "7.5");
        assert_eq!(
            format_criterion_answer(&CriterionAnswer::YesNoUncertain(YesNoUncertain::Uncertain)),
            "Uncertain"
        );
        assert_eq!(
            format_criterion_answer(&CriterionAnswer::OpenEnded("navy blue".to_string())),
            "navy blue"
        );
    }
}
