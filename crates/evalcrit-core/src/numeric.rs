//! Numeric operator validation for `Int` and `Float` rows.
//!
//! Turns an operator selection and up to two operands into a
//! [`NumericalHardCriterion`] or a [`RowError`]. The same rules apply to both
//! numeric domains; only the operand type differs.

use crate::domain::{HardCriterion, NumericDomain, NumericOperator, NumericalHardCriterion, RowError};

/// Result of validating a numeric row.
///
/// `criterion` is `None` whenever `error` is set, and also in the unset
/// resting state (no operator chosen), where `error` is `None` too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericOutcome<N> {
    pub criterion: Option<NumericalHardCriterion<N>>,
    pub error: Option<RowError>,
}

impl<N: NumericDomain> NumericOutcome<N> {
    fn valid(criterion: NumericalHardCriterion<N>) -> Self {
        Self {
            criterion: Some(criterion),
            error: None,
        }
    }

    fn invalid(error: RowError) -> Self {
        Self {
            criterion: None,
            error: Some(error),
        }
    }

    /// The hard criterion to store on the row. Always carries the domain
    /// tag, with a `None` predicate while unset or invalid.
    pub fn hard_criterion(&self) -> HardCriterion {
        N::wrap(self.criterion)
    }
}

/// Validate an operator selection against its operands.
pub fn validate_numeric<N: NumericDomain>(
    operator: Option<NumericOperator>,
    value1: Option<N>,
    value2: Option<N>,
) -> NumericOutcome<N> {
    let Some(operator) = operator else {
        return NumericOutcome {
            criterion: None,
            error: None,
        };
    };

    match operator {
        NumericOperator::Between => match (value1, value2) {
            (Some(lo), Some(hi)) if lo < hi => {
                NumericOutcome::valid(NumericalHardCriterion::Between(lo, hi))
            }
            (Some(_), Some(_)) => NumericOutcome::invalid(RowError::BoundsNotOrdered),
            _ => NumericOutcome::invalid(RowError::MissingBetweenValues),
        },
        NumericOperator::LessThan => single(value1.map(NumericalHardCriterion::LessThan)),
        NumericOperator::Equal => single(value1.map(NumericalHardCriterion::Equal)),
        NumericOperator::MoreThan => single(value1.map(NumericalHardCriterion::MoreThan)),
    }
}

fn single<N: NumericDomain>(criterion: Option<NumericalHardCriterion<N>>) -> NumericOutcome<N> {
    criterion.map_or(
        NumericOutcome::invalid(RowError::MissingValue),
        NumericOutcome::valid,
    )
}

/// Operator and operand inputs of one numeric row while it is being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericDraft<N> {
    pub operator: Option<NumericOperator>,
    pub value1: Option<N>,
    pub value2: Option<N>,
}

impl<N> Default for NumericDraft<N> {
    fn default() -> Self {
        Self {
            operator: None,
            value1: None,
            value2: None,
        }
    }
}

impl<N: NumericDomain> NumericDraft<N> {
    /// Seed the inputs from a stored predicate.
    pub fn from_criterion(criterion: &NumericalHardCriterion<N>) -> Self {
        let (value1, value2) = match *criterion {
            NumericalHardCriterion::LessThan(v)
            | NumericalHardCriterion::Equal(v)
            | NumericalHardCriterion::MoreThan(v) => (Some(v), None),
            NumericalHardCriterion::Between(lo, hi) => (Some(lo), Some(hi)),
        };
        Self {
            operator: Some(criterion.operator()),
            value1,
            value2,
        }
    }

    pub fn validate(&self) -> NumericOutcome<N> {
        validate_numeric(self.operator, self.value1, self.value2)
    }
}
