//! Hard criteria: machine-checkable predicates attached to criteria.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::criterion::{CriterionType, YesNo};
use super::error::{CriteriaError, Result};

/// Comparison operator of a numeric hard criterion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NumericOperator {
    LessThan,
    Equal,
    MoreThan,
    Between,
}

impl NumericOperator {
    pub const ALL: [NumericOperator; 4] = [
        NumericOperator::LessThan,
        NumericOperator::Equal,
        NumericOperator::MoreThan,
        NumericOperator::Between,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NumericOperator::LessThan => "LessThan",
            NumericOperator::Equal => "Equal",
            NumericOperator::MoreThan => "MoreThan",
            NumericOperator::Between => "Between",
        }
    }

    /// Parse an operator selection as the form submits it.
    ///
    /// The empty string is the unset selection and maps to `None`.
    pub fn parse_selection(s: &str) -> Result<Option<Self>> {
        if s.is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl fmt::Display for NumericOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumericOperator {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self> {
        NumericOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CriteriaError::UnknownOperator {
                operator: s.to_string(),
            })
    }
}

/// A numeric predicate over the domain `N` (`i64` or `f64`).
///
/// # Invariants
///
/// `Between(lo, hi)` requires `lo < hi`. The validator never builds equal or
/// inverted bounds; deserialized values are checked by
/// [`crate::domain::Criterion::validate`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum NumericalHardCriterion<N> {
    LessThan(N),
    Equal(N),
    MoreThan(N),
    Between(N, N),
}

impl<N: Copy + PartialOrd> NumericalHardCriterion<N> {
    pub fn operator(&self) -> NumericOperator {
        match self {
            NumericalHardCriterion::LessThan(_) => NumericOperator::LessThan,
            NumericalHardCriterion::Equal(_) => NumericOperator::Equal,
            NumericalHardCriterion::MoreThan(_) => NumericOperator::MoreThan,
            NumericalHardCriterion::Between(_, _) => NumericOperator::Between,
        }
    }

    pub fn between_bounds(&self) -> Option<(N, N)> {
        match *self {
            NumericalHardCriterion::Between(lo, hi) => Some((lo, hi)),
            _ => None,
        }
    }

    /// The operand, plus the upper bound for `Between`.
    pub fn operands(&self) -> (N, Option<N>) {
        match *self {
            NumericalHardCriterion::LessThan(v)
            | NumericalHardCriterion::Equal(v)
            | NumericalHardCriterion::MoreThan(v) => (v, None),
            NumericalHardCriterion::Between(lo, hi) => (lo, Some(hi)),
        }
    }

    /// Whether `value` passes the predicate. `Between` includes both bounds.
    pub fn is_satisfied_by(&self, value: N) -> bool {
        match *self {
            NumericalHardCriterion::LessThan(v) => value < v,
            NumericalHardCriterion::Equal(v) => value == v,
            NumericalHardCriterion::MoreThan(v) => value > v,
            NumericalHardCriterion::Between(lo, hi) => lo <= value && value <= hi,
        }
    }
}

/// A hard criterion, tagged by the criterion type it belongs to.
///
/// The numeric variants hold an `Option`: `Int(None)` means "this is an
/// integer criterion whose predicate is currently unset or invalid", which is
/// distinct from a criterion with no hard criterion at all. On the wire this
/// is `{"Int": null}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum HardCriterion {
    YesNo(YesNo),
    Int(Option<NumericalHardCriterion<i64>>),
    Float(Option<NumericalHardCriterion<f64>>),
}

impl HardCriterion {
    /// The criterion type this hard criterion may be attached to.
    pub fn criterion_type(&self) -> CriterionType {
        match self {
            HardCriterion::YesNo(_) => CriterionType::YesNo,
            HardCriterion::Int(_) => CriterionType::Int,
            HardCriterion::Float(_) => CriterionType::Float,
        }
    }

    /// False for a numeric criterion whose predicate is unset.
    pub fn is_configured(&self) -> bool {
        match self {
            HardCriterion::YesNo(_) => true,
            HardCriterion::Int(c) => c.is_some(),
            HardCriterion::Float(c) => c.is_some(),
        }
    }
}

/// Numeric domains a hard criterion can range over.
pub trait NumericDomain: Copy + PartialOrd + fmt::Display + fmt::Debug {
    /// Criterion type whose rows use this domain.
    const CRITERION_TYPE: CriterionType;

    /// Wrap a (possibly unset) predicate in its domain tag.
    fn wrap(criterion: Option<NumericalHardCriterion<Self>>) -> HardCriterion;

    /// Extract the predicate if `hard` belongs to this domain.
    fn unwrap_from(hard: &HardCriterion) -> Option<Option<NumericalHardCriterion<Self>>>;

    /// Parse an operand typed into the form. `None` when the text is not a
    /// usable number, the same as an empty number input.
    fn parse_operand(raw: &str) -> Option<Self>;
}

impl NumericDomain for i64 {
    const CRITERION_TYPE: CriterionType = CriterionType::Int;

    fn wrap(criterion: Option<NumericalHardCriterion<Self>>) -> HardCriterion {
        HardCriterion::Int(criterion)
    }

    fn unwrap_from(hard: &HardCriterion) -> Option<Option<NumericalHardCriterion<Self>>> {
        match hard {
            HardCriterion::Int(c) => Some(*c),
            _ => None,
        }
    }

    fn parse_operand(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl NumericDomain for f64 {
    const CRITERION_TYPE: CriterionType = CriterionType::Float;

    fn wrap(criterion: Option<NumericalHardCriterion<Self>>) -> HardCriterion {
        HardCriterion::Float(criterion)
    }

    fn unwrap_from(hard: &HardCriterion) -> Option<Option<NumericalHardCriterion<Self>>> {
        match hard {
            HardCriterion::Float(c) => Some(*c),
            _ => None,
        }
    }

    fn parse_operand(raw: &str) -> Option<Self> {
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}
